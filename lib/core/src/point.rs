use serde::{Deserialize, Serialize};
use crate::vector::Vector;

/// A ranked hit from a nearest-neighbor query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Neighbor {
    pub word: String,
    pub score: f32,
    /// Present when the store returned the stored vector alongside the hit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vector: Option<Vector>,
}

impl Neighbor {
    pub fn new(word: impl Into<String>, score: f32, vector: Option<Vector>) -> Self {
        Self {
            word: word.into(),
            score,
            vector,
        }
    }
}

/// A word placed on a path or slice.
///
/// `from_words` names the parents the point was derived from and `path` is the
/// full lineage, which lets a caller rebuild the bisection tree of a slice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PathPoint {
    pub word: String,
    pub depth: usize,
    pub index: usize,
    pub from_words: Vec<String>,
    pub path: Vec<String>,
    pub is_endpoint: bool,
    pub is_main_point: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f32>,
    /// Interpolation parameter, set on linear paths only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub t: Option<f32>,
}

impl PathPoint {
    pub fn endpoint(word: impl Into<String>, index: usize) -> Self {
        let word = word.into();
        Self {
            path: vec![word.clone()],
            word,
            depth: 0,
            index,
            from_words: Vec::new(),
            is_endpoint: true,
            is_main_point: true,
            similarity: None,
            t: None,
        }
    }

    pub fn new(word: impl Into<String>, depth: usize, index: usize) -> Self {
        let word = word.into();
        Self {
            path: vec![word.clone()],
            word,
            depth,
            index,
            from_words: Vec::new(),
            is_endpoint: false,
            is_main_point: true,
            similarity: None,
            t: None,
        }
    }

    pub fn with_from_words(mut self, from_words: Vec<String>) -> Self {
        self.from_words = from_words;
        self
    }

    pub fn with_path(mut self, path: Vec<String>) -> Self {
        self.path = path;
        self
    }

    pub fn with_similarity(mut self, similarity: Option<f32>) -> Self {
        self.similarity = similarity;
        self
    }

    pub fn with_t(mut self, t: f32) -> Self {
        self.t = Some(t);
        self
    }

    pub fn secondary(mut self) -> Self {
        self.is_main_point = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_point_serializes_camel_case() {
        let point = PathPoint::endpoint("king", 0);
        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json["word"], "king");
        assert_eq!(json["isEndpoint"], true);
        assert_eq!(json["isMainPoint"], true);
        assert_eq!(json["fromWords"], serde_json::json!([]));
        assert!(json.get("similarity").is_none());
        assert!(json.get("t").is_none());
    }

    #[test]
    fn test_secondary_point() {
        let point = PathPoint::new("prince", 2, 5)
            .with_from_words(vec!["royal".to_string()])
            .secondary();
        assert!(!point.is_main_point);
        assert!(!point.is_endpoint);
        assert_eq!(point.path, vec!["prince".to_string()]);
    }
}
