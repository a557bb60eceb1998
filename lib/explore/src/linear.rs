use crate::fetch::fetch_vectors;
use crate::{params, Explorer};
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use wordspace_core::{Error, PathPoint, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinearPathResult {
    pub word1: String,
    pub word2: String,
    pub num_steps: usize,
    /// `num_steps + 1` points with strictly increasing `t`
    pub path_points: Vec<PathPoint>,
}

impl Explorer {
    /// Sample the straight line from `word1` to `word2` and name the word
    /// nearest to each interior sample.
    pub async fn linear_path(
        &self,
        word1: &str,
        word2: &str,
        num_steps: usize,
    ) -> Result<LinearPathResult> {
        let steps = params::num_steps(num_steps);
        let vectors = fetch_vectors(self.store(), &[word1, word2]).await?;
        let (v1, v2) = (&vectors[0], &vectors[1]);
        let parents = vec![word1.to_string(), word2.to_string()];
        let no_exclusions = AHashSet::new();

        let mut path_points = Vec::with_capacity(steps + 1);
        path_points.push(PathPoint::endpoint(word1, 0).with_t(0.0));

        for i in 1..steps {
            let t = i as f32 / steps as f32;
            let sample = v1.lerp(v2, t).ok_or(Error::InvalidDimension {
                expected: v1.dim(),
                actual: v2.dim(),
            })?;

            let nearest = self
                .store()
                .query_nearest(&sample, 1, &no_exclusions, None)
                .await?
                .into_iter()
                .next();
            let point = match nearest {
                Some(hit) => PathPoint::new(hit.word, 0, i).with_similarity(Some(hit.score)),
                // Empty store: keep the shape, name the nearer endpoint
                None => PathPoint::new(if t < 0.5 { word1 } else { word2 }, 0, i),
            };
            path_points.push(point.with_from_words(parents.clone()).with_t(t));
        }

        path_points.push(PathPoint::endpoint(word2, steps).with_t(1.0));

        Ok(LinearPathResult {
            word1: word1.to_string(),
            word2: word2.to_string(),
            num_steps: steps,
            path_points,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::fixtures;

    #[tokio::test]
    async fn test_ten_steps_yield_eleven_points() {
        let explorer = fixtures::arc(9, 10.0);
        let result = explorer.linear_path("w0", "w8", 10).await.unwrap();

        assert_eq!(result.path_points.len(), 11);
        assert_eq!(result.path_points[0].word, "w0");
        assert_eq!(result.path_points[10].word, "w8");
        assert!(result.path_points[0].is_endpoint && result.path_points[10].is_endpoint);
        assert!(result
            .path_points
            .windows(2)
            .all(|w| w[0].t.unwrap() < w[1].t.unwrap()));
        // The halfway sample points at 40 degrees
        assert_eq!(result.path_points[5].word, "w4");
    }

    #[tokio::test]
    async fn test_num_steps_clamped() {
        let explorer = fixtures::arc(9, 10.0);
        let result = explorer.linear_path("w0", "w8", 500).await.unwrap();
        assert_eq!(result.num_steps, 100);
        assert_eq!(result.path_points.len(), 101);

        let result = explorer.linear_path("w0", "w8", 0).await.unwrap();
        assert_eq!(result.num_steps, 1);
        let words: Vec<&str> = result.path_points.iter().map(|p| p.word.as_str()).collect();
        assert_eq!(words, vec!["w0", "w8"]);
    }

    #[tokio::test]
    async fn test_missing_endpoint() {
        let explorer = fixtures::arc(3, 10.0);
        assert!(explorer.linear_path("w0", "nope", 4).await.is_err());
    }
}
