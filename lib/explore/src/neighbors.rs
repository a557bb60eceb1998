use crate::fetch::fetch_vectors;
use crate::{params, Explorer, ScoredWord};
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use wordspace_core::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeighborsResult {
    pub word: String,
    pub neighbors: Vec<ScoredWord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareResult {
    pub word1: String,
    pub word2: String,
    pub cosine_similarity: f32,
    pub euclidean_distance: f32,
}

impl Explorer {
    /// Semantic neighbors of `word`, the word itself excluded
    pub async fn find_neighbors(
        &self,
        word: &str,
        num_results: usize,
        min_score: Option<f32>,
    ) -> Result<NeighborsResult> {
        let limit = params::num_results(num_results);
        let vectors = fetch_vectors(self.store(), &[word]).await?;

        let exclude: AHashSet<String> = std::iter::once(word.to_string()).collect();
        let neighbors = self
            .store()
            .query_nearest(&vectors[0], limit, &exclude, min_score)
            .await?
            .into_iter()
            .map(|n| ScoredWord {
                word: n.word,
                score: n.score,
            })
            .collect();

        Ok(NeighborsResult {
            word: word.to_string(),
            neighbors,
        })
    }

    pub async fn compare(&self, word1: &str, word2: &str) -> Result<CompareResult> {
        let vectors = fetch_vectors(self.store(), &[word1, word2]).await?;
        let (v1, v2) = (&vectors[0], &vectors[1]);
        let mismatch = || Error::InvalidDimension {
            expected: v1.dim(),
            actual: v2.dim(),
        };

        Ok(CompareResult {
            word1: word1.to_string(),
            word2: word2.to_string(),
            cosine_similarity: v1.cosine_similarity(v2).ok_or_else(mismatch)?,
            euclidean_distance: v1.euclidean_distance(v2).ok_or_else(mismatch)?,
        })
    }
}
