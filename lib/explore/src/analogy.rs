use crate::fetch::fetch_vectors;
use crate::{params, Explorer, ScoredWord};
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use wordspace_core::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalogyResult {
    pub word1: String,
    pub word2: String,
    pub word3: String,
    /// `word1:word2::word3:?`
    pub formula: String,
    pub neighbors: Vec<ScoredWord>,
}

impl Explorer {
    /// Complete "`word1` is to `word2` as `word3` is to ?" using `word2 - word1 + word3`
    pub async fn find_analogy(
        &self,
        word1: &str,
        word2: &str,
        word3: &str,
        num_results: usize,
    ) -> Result<AnalogyResult> {
        let limit = params::num_results(num_results);
        let vectors = fetch_vectors(self.store(), &[word1, word2, word3]).await?;

        let target = vectors[0]
            .analogy(&vectors[1], &vectors[2])
            .ok_or_else(|| Error::InvalidInput("analogy vectors differ in dimension".to_string()))?;

        let exclude: AHashSet<String> = [word1, word2, word3].iter().map(|w| w.to_string()).collect();
        let neighbors = self
            .store()
            .query_nearest(&target, limit, &exclude, None)
            .await?
            .into_iter()
            .map(|n| ScoredWord {
                word: n.word,
                score: n.score,
            })
            .collect();

        Ok(AnalogyResult {
            word1: word1.to_string(),
            word2: word2.to_string(),
            word3: word3.to_string(),
            formula: format!("{}:{}::{}:?", word1, word2, word3),
            neighbors,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::fixtures;
    use wordspace_core::Error;

    #[tokio::test]
    async fn test_king_man_woman_queen() {
        let explorer = fixtures::royalty();
        let result = explorer.find_analogy("man", "king", "woman", 5).await.unwrap();

        assert_eq!(result.formula, "man:king::woman:?");
        assert_eq!(result.neighbors[0].word, "queen");
        assert!((result.neighbors[0].score - 1.0).abs() < 1e-6);
        assert!(result
            .neighbors
            .iter()
            .all(|n| !["man", "king", "woman"].contains(&n.word.as_str())));
    }

    #[tokio::test]
    async fn test_analogy_lists_every_missing_word() {
        let explorer = fixtures::royalty();
        let err = explorer
            .find_analogy("wizard", "king", "witch", 5)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            Error::NotFound {
                words: vec!["wizard".to_string(), "witch".to_string()]
            }
        );
    }
}
