use crate::{params, Explorer};
use ahash::AHashSet;
use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use wordspace_core::{Error, Projector, Result, Vector};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoordinatesResult {
    /// Words found in the store, in request order
    pub words: Vec<String>,
    pub dimensions: usize,
    /// One row per entry of `words`
    pub coordinates: Vec<Vec<f32>>,
    pub truncated_vectors: BTreeMap<String, String>,
    pub not_found: Vec<String>,
}

/// First `limit` distinct words in request order
fn unique_words(words: &[String], limit: usize) -> Vec<&str> {
    let mut seen = AHashSet::with_capacity(limit);
    let mut unique = Vec::with_capacity(limit);
    for word in words {
        if unique.len() == limit {
            break;
        }
        if seen.insert(word.as_str()) {
            unique.push(word.as_str());
        }
    }
    unique
}

impl Explorer {
    /// Project `words` into 2D or 3D with PCA.
    ///
    /// Unknown words are listed in `not_found`; the request fails only when
    /// none of the words exist.
    pub async fn coordinates(&self, words: &[String], dimensions: usize) -> Result<CoordinatesResult> {
        let unique = unique_words(words, params::MAX_COORDINATE_WORDS);

        let results = join_all(unique.iter().map(|w| self.store().get_vector(w))).await;

        let mut found = Vec::with_capacity(unique.len());
        let mut vectors: Vec<Vector> = Vec::with_capacity(unique.len());
        let mut not_found = Vec::new();
        for (word, result) in unique.iter().zip(results) {
            match result? {
                Some(vector) => {
                    found.push(word.to_string());
                    vectors.push(vector);
                }
                None => not_found.push(word.to_string()),
            }
        }
        if found.is_empty() {
            return Err(Error::NotFound { words: not_found });
        }

        let mut projector = Projector::new(dimensions);
        if let Some(seed) = self.config().projection_seed {
            projector = projector.with_seed(seed);
        }
        let coordinates = projector.project(&vectors)?;

        let truncated_vectors = found
            .iter()
            .cloned()
            .zip(vectors.iter().map(Vector::truncated_view))
            .collect();

        Ok(CoordinatesResult {
            words: found,
            dimensions: projector.dimensions(),
            coordinates,
            truncated_vectors,
            not_found,
        })
    }
}
