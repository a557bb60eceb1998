//! Breadth-first recursive bisection between two words.
//!
//! A FIFO queue of node pairs replaces call-stack recursion so the point cap
//! and depth bound are checked at every dequeue. Each dequeue either resolves
//! a pair (similar enough already), drops it (no unvisited neighbor), or
//! replaces it with at most two deeper pairs, bounded by `max_depth`.

use crate::fetch::{fetch_vectors, neighbor_vector, similarity};
use crate::{params, Explorer};
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::debug;
use wordspace_core::{Error, PathPoint, Result, Vector};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliceResult {
    pub word1: String,
    pub word2: String,
    pub similarity_threshold: f32,
    pub total_points: usize,
    pub slice_points: Vec<PathPoint>,
}

struct Node {
    word: String,
    vector: Vector,
    depth: usize,
    lineage: Vec<String>,
}

impl Node {
    fn root(word: &str, vector: Vector) -> Arc<Self> {
        Arc::new(Self {
            word: word.to_string(),
            vector,
            depth: 0,
            lineage: vec![word.to_string()],
        })
    }
}

/// Union of both lineages in first-seen order
fn merge_lineage(a: &[String], b: &[String]) -> Vec<String> {
    let mut seen = AHashSet::with_capacity(a.len() + b.len());
    a.iter()
        .chain(b.iter())
        .filter(|w| seen.insert(w.as_str()))
        .cloned()
        .collect()
}

impl Explorer {
    /// Recursively bisect the space between `word1` and `word2`.
    ///
    /// `num_results` neighbors are fetched per bisection: the best becomes
    /// the pair's main midpoint, the rest are recorded as secondary points.
    pub async fn slice(
        &self,
        word1: &str,
        word2: &str,
        num_results: usize,
        max_depth: usize,
    ) -> Result<SliceResult> {
        let num_results = params::slice_results(num_results);
        let max_depth = params::max_depth(max_depth);
        let threshold = self.config().similarity_threshold;
        let cap = self.config().max_slice_points.max(2);

        let mut vectors = fetch_vectors(self.store(), &[word1, word2]).await?.into_iter();
        let (Some(v1), Some(v2)) = (vectors.next(), vectors.next()) else {
            return Err(Error::not_found([word1, word2]));
        };

        if word1 == word2 {
            return Ok(SliceResult {
                word1: word1.to_string(),
                word2: word2.to_string(),
                similarity_threshold: threshold,
                total_points: 1,
                slice_points: vec![PathPoint::endpoint(word1, 0)],
            });
        }

        let mut visited: AHashSet<String> = [word1, word2].iter().map(|w| w.to_string()).collect();
        let mut slice_points = vec![PathPoint::endpoint(word1, 0), PathPoint::endpoint(word2, 1)];
        let mut queue: VecDeque<(Arc<Node>, Arc<Node>)> =
            VecDeque::from([(Node::root(word1, v1), Node::root(word2, v2))]);
        let mut resolved = 0;

        while slice_points.len() < cap && resolved < max_depth {
            let Some((left, right)) = queue.pop_front() else {
                break;
            };

            if similarity(&left.vector, &right.vector)? >= threshold {
                resolved += 1;
                continue;
            }

            let mid = left.vector.midpoint(&right.vector).ok_or(Error::InvalidDimension {
                expected: left.vector.dim(),
                actual: right.vector.dim(),
            })?;
            let hits = self
                .store()
                .query_nearest(&mid, num_results, &visited, None)
                .await?;
            let mut hits = hits.into_iter();

            let Some(top) = hits.next() else {
                debug!("No unvisited word between {} and {}", left.word, right.word);
                continue;
            };
            let Some(top_vector) = neighbor_vector(self.store(), &top).await? else {
                continue;
            };

            let depth = left.depth.max(right.depth) + 1;
            let mut lineage = merge_lineage(&left.lineage, &right.lineage);
            lineage.push(top.word.clone());

            visited.insert(top.word.clone());
            slice_points.push(
                PathPoint::new(top.word.clone(), depth, slice_points.len())
                    .with_from_words(vec![left.word.clone(), right.word.clone()])
                    .with_path(lineage.clone())
                    .with_similarity(Some(top.score)),
            );

            for extra in hits {
                if slice_points.len() >= cap {
                    break;
                }
                if !visited.insert(extra.word.clone()) {
                    continue;
                }
                let mut path = lineage.clone();
                path.push(extra.word.clone());
                slice_points.push(
                    PathPoint::new(extra.word, depth, slice_points.len())
                        .with_from_words(vec![top.word.clone()])
                        .with_path(path)
                        .with_similarity(Some(extra.score))
                        .secondary(),
                );
            }

            let node = Arc::new(Node {
                word: top.word,
                vector: top_vector,
                depth,
                lineage,
            });
            if depth < max_depth {
                queue.push_back((left, node.clone()));
                queue.push_back((node, right));
            }
        }

        debug!(
            "Slice {} <-> {}: {} points, {} pairs resolved, {} pending",
            word1,
            word2,
            slice_points.len(),
            resolved,
            queue.len()
        );

        Ok(SliceResult {
            word1: word1.to_string(),
            word2: word2.to_string(),
            similarity_threshold: threshold,
            total_points: slice_points.len(),
            slice_points,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{fixtures, ExplorerConfig};

    fn assert_well_formed(result: &SliceResult, cap: usize) {
        let endpoints: Vec<&str> = result
            .slice_points
            .iter()
            .filter(|p| p.is_endpoint)
            .map(|p| p.word.as_str())
            .collect();
        assert_eq!(endpoints, vec![result.word1.as_str(), result.word2.as_str()]);
        assert!(result.slice_points.len() <= cap);
        assert_eq!(result.total_points, result.slice_points.len());

        let mut seen = AHashSet::new();
        assert!(result.slice_points.iter().all(|p| seen.insert(p.word.clone())));
    }

    #[tokio::test]
    async fn test_first_bisection_finds_midpoint() {
        let explorer = fixtures::arc(12, 10.0);
        let result = explorer.slice("w0", "w8", 2, 3).await.unwrap();

        assert_well_formed(&result, 100);
        let main = &result.slice_points[2];
        assert_eq!(main.word, "w4");
        assert_eq!(main.depth, 1);
        assert!(main.is_main_point);
        assert_eq!(main.from_words, vec!["w0".to_string(), "w8".to_string()]);
        assert_eq!(main.path, vec!["w0".to_string(), "w8".to_string(), "w4".to_string()]);

        let secondary = &result.slice_points[3];
        assert!(!secondary.is_main_point);
        assert_eq!(secondary.depth, 1);
        assert_eq!(secondary.from_words, vec!["w4".to_string()]);
    }

    #[tokio::test]
    async fn test_depth_bounded() {
        let explorer = fixtures::arc(40, 2.0);
        let result = explorer.slice("w0", "w39", 1, 2).await.unwrap();
        assert_well_formed(&result, 100);
        assert!(result.slice_points.iter().all(|p| p.depth <= 2));
    }

    #[tokio::test]
    async fn test_point_cap() {
        let config = ExplorerConfig {
            max_slice_points: 6,
            ..ExplorerConfig::default()
        };
        let store = Arc::new(fixtures::arc_collection(60, 1.5));
        let explorer = Explorer::with_config(store, config);
        let result = explorer.slice("w0", "w59", 10, 10).await.unwrap();
        assert_eq!(result.total_points, 6);
        assert_well_formed(&result, 6);
    }

    #[tokio::test]
    async fn test_similar_endpoints_resolve_immediately() {
        let explorer = fixtures::arc(5, 1.0);
        let result = explorer.slice("w0", "w1", 3, 5).await.unwrap();
        assert_eq!(result.total_points, 2);
        assert_eq!(result.similarity_threshold, 0.98);
    }

    #[tokio::test]
    async fn test_same_word_yields_single_endpoint() {
        let explorer = fixtures::arc(5, 10.0);
        let result = explorer.slice("w2", "w2", 3, 5).await.unwrap();
        assert_eq!(result.total_points, 1);
        assert_eq!(result.slice_points.len(), 1);
        assert_eq!(result.slice_points[0].word, "w2");
        assert!(result.slice_points[0].is_endpoint);
    }

    #[tokio::test]
    async fn test_missing_word() {
        let explorer = fixtures::arc(5, 10.0);
        let err = explorer.slice("w0", "void", 3, 5).await.unwrap_err();
        assert_eq!(err, Error::NotFound { words: vec!["void".to_string()] });
    }

    #[test]
    fn test_merge_lineage() {
        let a = vec!["x".to_string(), "m".to_string()];
        let b = vec!["m".to_string(), "y".to_string()];
        assert_eq!(merge_lineage(&a, &b), vec!["x", "m", "y"]);
    }
}
