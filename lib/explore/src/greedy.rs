use crate::fetch::{fetch_vectors, neighbor_vector, similarity};
use crate::{params, Explorer};
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;
use wordspace_core::{PathPoint, Result, Vector};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GreedyStatus {
    /// The target was reached
    Success,
    /// Ran out of hops before reaching the target
    MaxHops,
    /// No unvisited neighbor was left to move to
    Stuck,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GreedyPathResult {
    pub word1: String,
    pub word2: String,
    pub max_hops: usize,
    pub status: GreedyStatus,
    pub path_points: Vec<PathPoint>,
}

impl Explorer {
    /// Walk from `word1` toward `word2`, each hop moving to the unvisited
    /// neighbor of the current word that is most similar to the target.
    ///
    /// Equal similarities keep the store's ranking order. Running out of hops
    /// or neighbors is a partial result, not an error.
    pub async fn greedy_path(
        &self,
        word1: &str,
        word2: &str,
        max_hops: usize,
    ) -> Result<GreedyPathResult> {
        let max_hops = params::max_hops(max_hops);
        let vectors = fetch_vectors(self.store(), &[word1, word2]).await?;
        let target = &vectors[1];

        let mut current = word1.to_string();
        let mut current_vector = vectors[0].clone();
        let mut visited: AHashSet<String> = std::iter::once(current.clone()).collect();
        let mut lineage = vec![current.clone()];
        let mut path_points = vec![PathPoint::endpoint(word1, 0)
            .with_similarity(Some(similarity(&current_vector, target)?))];
        let mut hops = 0;

        let status = loop {
            if current == word2 {
                break GreedyStatus::Success;
            }
            if hops >= max_hops {
                break GreedyStatus::MaxHops;
            }

            let candidates = self
                .store()
                .query_nearest(&current_vector, self.config().greedy_candidates, &visited, None)
                .await?;

            let mut best: Option<(String, Vector, f32)> = None;
            for candidate in candidates {
                let Some(vector) = neighbor_vector(self.store(), &candidate).await? else {
                    continue;
                };
                let to_target = similarity(&vector, target)?;
                if best.as_ref().map_or(true, |(_, _, score)| to_target > *score) {
                    best = Some((candidate.word, vector, to_target));
                }
            }
            let Some((word, vector, to_target)) = best else {
                break GreedyStatus::Stuck;
            };

            hops += 1;
            visited.insert(word.clone());
            lineage.push(word.clone());

            let mut point = PathPoint::new(word.clone(), hops, hops)
                .with_from_words(vec![current.clone()])
                .with_path(lineage.clone())
                .with_similarity(Some(to_target));
            point.is_endpoint = word == word2;
            path_points.push(point);

            current = word;
            current_vector = vector;
        };

        debug!(
            "Greedy path {} -> {} finished as {:?} after {} hops",
            word1, word2, status, hops
        );

        Ok(GreedyPathResult {
            word1: word1.to_string(),
            word2: word2.to_string(),
            max_hops,
            status,
            path_points,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{fixtures, ExplorerConfig};
    use async_trait::async_trait;
    use std::sync::Arc;
    use wordspace_core::{Neighbor, Vector, VectorStore, WordCollection};

    fn narrow(candidates: usize) -> Explorer {
        let config = ExplorerConfig {
            greedy_candidates: candidates,
            ..ExplorerConfig::default()
        };
        Explorer::with_config(Arc::new(fixtures::arc_collection(10, 10.0)), config)
    }

    fn words(result: &GreedyPathResult) -> Vec<&str> {
        result.path_points.iter().map(|p| p.word.as_str()).collect()
    }

    #[tokio::test]
    async fn test_reaches_target() {
        let result = fixtures::arc(10, 10.0).greedy_path("w0", "w9", 20).await.unwrap();
        assert_eq!(result.status, GreedyStatus::Success);
        assert_eq!(words(&result), vec!["w0", "w9"]);
        assert!(result.path_points.last().unwrap().is_endpoint);
    }

    #[tokio::test]
    async fn test_single_candidate_walks_every_word() {
        let result = narrow(1).greedy_path("w0", "w9", 20).await.unwrap();
        assert_eq!(result.status, GreedyStatus::Success);
        assert_eq!(
            words(&result),
            vec!["w0", "w1", "w2", "w3", "w4", "w5", "w6", "w7", "w8", "w9"]
        );
    }

    #[tokio::test]
    async fn test_picks_candidate_closest_to_target() {
        let result = narrow(3).greedy_path("w0", "w9", 1).await.unwrap();
        assert_eq!(result.status, GreedyStatus::MaxHops);
        assert_eq!(words(&result), vec!["w0", "w3"]);
        assert!(!result.path_points[1].is_endpoint);
    }

    #[tokio::test]
    async fn test_max_hops_is_partial() {
        let result = narrow(1).greedy_path("w0", "w9", 3).await.unwrap();
        assert_eq!(result.status, GreedyStatus::MaxHops);
        assert_eq!(words(&result), vec!["w0", "w1", "w2", "w3"]);
        assert!(result.path_points.len() <= result.max_hops + 1);
    }

    #[tokio::test]
    async fn test_max_hops_clamped() {
        let result = narrow(1).greedy_path("w0", "w9", 0).await.unwrap();
        assert_eq!(result.max_hops, 1);
        assert_eq!(words(&result), vec!["w0", "w1"]);
    }

    #[tokio::test]
    async fn test_path_never_repeats() {
        let result = narrow(2).greedy_path("w4", "w0", 50).await.unwrap();
        assert_eq!(result.path_points[0].word, "w4");
        let mut seen = AHashSet::new();
        assert!(result.path_points.iter().all(|p| seen.insert(p.word.clone())));
        assert_eq!(result.status, GreedyStatus::Success);
    }

    #[tokio::test]
    async fn test_same_start_and_target() {
        let explorer = fixtures::arc(4, 10.0);
        let result = explorer.greedy_path("w2", "w2", 5).await.unwrap();
        assert_eq!(result.status, GreedyStatus::Success);
        assert_eq!(words(&result), vec!["w2"]);
    }

    /// A store whose index never returns anything
    struct Isolated(WordCollection);

    #[async_trait]
    impl VectorStore for Isolated {
        async fn exists(&self, word: &str) -> bool {
            self.0.contains(word)
        }

        async fn get_vector(&self, word: &str) -> Result<Option<Vector>> {
            Ok(self.0.get(word))
        }

        async fn query_nearest(
            &self,
            _vector: &Vector,
            _limit: usize,
            _exclude: &AHashSet<String>,
            _min_score: Option<f32>,
        ) -> Result<Vec<Neighbor>> {
            Ok(Vec::new())
        }

        fn store_name(&self) -> &str {
            "isolated"
        }
    }

    #[tokio::test]
    async fn test_stuck_is_partial() {
        let collection = WordCollection::from_pairs(vec![
            ("a", vec![1.0, 0.0]),
            ("b", vec![0.0, 1.0]),
        ])
        .unwrap();
        let explorer = Explorer::new(Arc::new(Isolated(collection)));
        let result = explorer.greedy_path("a", "b", 10).await.unwrap();
        assert_eq!(result.status, GreedyStatus::Stuck);
        assert_eq!(words(&result), vec!["a"]);
    }
}
