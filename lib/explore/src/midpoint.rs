use crate::fetch::{fetch_vectors, neighbor_vector, similarity};
use crate::{params, Explorer};
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use tracing::warn;
use wordspace_core::{Error, Result, Vector};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MidpointVector {
    pub vector: Vector,
    pub truncated_view: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeighborSimilarities {
    pub to_midpoint: f32,
    pub to_word1: f32,
    pub to_word2: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MidpointNeighbor {
    pub word: String,
    pub score: f32,
    pub similarities: NeighborSimilarities,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MidpointResult {
    pub word1: String,
    pub word2: String,
    pub input_similarity: f32,
    pub midpoint: MidpointVector,
    pub neighbors: Vec<MidpointNeighbor>,
}

impl Explorer {
    /// Words nearest to the average of `word1` and `word2`
    pub async fn find_midpoint(
        &self,
        word1: &str,
        word2: &str,
        num_results: usize,
    ) -> Result<MidpointResult> {
        let limit = params::num_results(num_results);
        let vectors = fetch_vectors(self.store(), &[word1, word2]).await?;
        let (v1, v2) = (&vectors[0], &vectors[1]);

        let input_similarity = similarity(v1, v2)?;
        let mid = v1.midpoint(v2).ok_or(Error::InvalidDimension {
            expected: v1.dim(),
            actual: v2.dim(),
        })?;

        let exclude: AHashSet<String> = [word1, word2].iter().map(|w| w.to_string()).collect();
        let hits = self.store().query_nearest(&mid, limit, &exclude, None).await?;

        let mut neighbors = Vec::with_capacity(hits.len());
        for hit in hits {
            let Some(vector) = neighbor_vector(self.store(), &hit).await? else {
                warn!("Neighbor '{}' vanished from the store, skipping", hit.word);
                continue;
            };
            neighbors.push(MidpointNeighbor {
                similarities: NeighborSimilarities {
                    to_midpoint: similarity(&vector, &mid)?,
                    to_word1: similarity(&vector, v1)?,
                    to_word2: similarity(&vector, v2)?,
                },
                word: hit.word,
                score: hit.score,
            });
        }

        Ok(MidpointResult {
            word1: word1.to_string(),
            word2: word2.to_string(),
            input_similarity,
            midpoint: MidpointVector {
                truncated_view: mid.truncated_view(),
                vector: mid,
            },
            neighbors,
        })
    }
}
