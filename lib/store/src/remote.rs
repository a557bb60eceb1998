//! Client for a Qdrant-compatible REST vector store.
//!
//! Points are keyed by their word (string point ids) and carry the word in
//! the `word` payload field. Exclusions are applied client-side after
//! over-fetching, so any server speaking the basic search endpoint works.

use crate::connection::ConnectionManager;
use crate::error::{Result, StoreError};
use crate::retry::RetryPolicy;
use crate::StoreConfig;
use ahash::AHashSet;
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use wordspace_core::{Neighbor, Vector, VectorStore};

/// An initialized handle to one collection
pub struct RemoteConnection {
    client: reqwest::Client,
    base_url: Url,
    collection: String,
    /// Vector size reported by the server, when it reports one
    pub dimension: Option<usize>,
}

impl RemoteConnection {
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::Protocol(format!("cannot-be-a-base URL: {}", self.base_url)))?
            .pop_if_empty()
            .push("collections")
            .push(&self.collection)
            .extend(segments);
        Ok(url)
    }

    async fn connect(config: StoreConfig) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        if let Some(key) = &config.api_key {
            let value = reqwest::header::HeaderValue::from_str(key)
                .map_err(|e| StoreError::Protocol(format!("invalid API key: {}", e)))?;
            headers.insert("api-key", value);
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(StoreError::from)?;
        let base_url = Url::parse(&config.url)
            .map_err(|e| StoreError::Protocol(format!("invalid store URL {}: {}", config.url, e)))?;

        let mut connection = Self {
            client,
            base_url,
            collection: config.collection.clone(),
            dimension: None,
        };

        let url = connection.endpoint(&[])?;
        let info: Value = connection
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        connection.dimension = parse_dimension(&info);

        info!(
            "Connected to collection '{}' at {} ({} dims)",
            connection.collection,
            connection.base_url,
            connection
                .dimension
                .map(|d| d.to_string())
                .unwrap_or_else(|| "unknown".to_string())
        );
        Ok(connection)
    }

    async fn fetch_vector(&self, word: &str) -> Result<Option<Vector>> {
        let url = self.endpoint(&["points", word])?;
        let response = self.client.get(url.clone()).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            let body = response.text().await?;
            if names_missing_collection(&body) {
                warn!("Collection '{}' disappeared from {}", self.collection, self.base_url);
                return Err(StoreError::Status {
                    status: StatusCode::NOT_FOUND.as_u16(),
                    url: url.to_string(),
                });
            }
            return Ok(None);
        }
        let body: Value = response.error_for_status()?.json().await?;
        parse_point_vector(&body).map(Some)
    }

    async fn search(&self, body: &Value) -> Result<Vec<Neighbor>> {
        let url = self.endpoint(&["points", "search"])?;
        let response: Value = self
            .client
            .post(url)
            .json(body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        parse_search_results(&response)
    }
}

/// A [`VectorStore`] backed by a remote Qdrant-compatible server
pub struct RemoteStore {
    connection: ConnectionManager<RemoteConnection>,
    retry: RetryPolicy,
}

impl RemoteStore {
    /// Nothing touches the network until the first query
    pub fn new(config: StoreConfig) -> Self {
        let retry = config.retry_policy();
        let connection = ConnectionManager::new(move || {
            let config = config.clone();
            async move {
                retry
                    .run("store initialization", || RemoteConnection::connect(config.clone()))
                    .await
                    .map(Arc::new)
            }
        });
        Self { connection, retry }
    }

    /// Connect eagerly, surfacing configuration problems at startup
    pub async fn connect(&self) -> Result<Arc<RemoteConnection>> {
        self.connection.get().await
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_ready()
    }
}

#[async_trait]
impl VectorStore for RemoteStore {
    async fn exists(&self, word: &str) -> bool {
        match self.get_vector(word).await {
            Ok(found) => found.is_some(),
            Err(e) => {
                warn!("Existence check for '{}' failed, treating as absent: {}", word, e);
                false
            }
        }
    }

    async fn get_vector(&self, word: &str) -> wordspace_core::Result<Option<Vector>> {
        let connection = self.connection.get().await?;
        let vector = self
            .retry
            .run("vector fetch", || connection.fetch_vector(word))
            .await?;
        Ok(vector)
    }

    async fn query_nearest(
        &self,
        vector: &Vector,
        limit: usize,
        exclude: &AHashSet<String>,
        min_score: Option<f32>,
    ) -> wordspace_core::Result<Vec<Neighbor>> {
        let connection = self.connection.get().await?;
        if let Some(dim) = connection.dimension {
            if dim != vector.dim() {
                return Err(wordspace_core::Error::InvalidDimension {
                    expected: dim,
                    actual: vector.dim(),
                });
            }
        }

        let body = search_body(vector, limit + exclude.len(), min_score);
        let hits = self
            .retry
            .run("nearest-neighbor query", || connection.search(&body))
            .await?;
        debug!("Search returned {} hits before exclusions", hits.len());

        Ok(hits
            .into_iter()
            .filter(|n| !exclude.contains(&n.word))
            .filter(|n| min_score.map_or(true, |min| n.score >= min))
            .take(limit)
            .collect())
    }

    fn store_name(&self) -> &str {
        "remote"
    }
}

fn search_body(vector: &Vector, limit: usize, min_score: Option<f32>) -> Value {
    let mut body = json!({
        "vector": vector.as_slice(),
        "limit": limit,
        "with_vector": true,
        "with_payload": true,
    });
    if let Some(threshold) = min_score {
        body["score_threshold"] = json!(threshold);
    }
    body
}

/// Vector size from a collection-info response. Accepts the Qdrant layout
/// (`result.config.params.vectors.size`) and the flat `vectors.size` one.
fn parse_dimension(info: &Value) -> Option<usize> {
    let result = info.get("result").unwrap_or(info);
    result
        .pointer("/config/params/vectors/size")
        .or_else(|| result.pointer("/vectors/size"))
        .and_then(Value::as_u64)
        .map(|d| d as usize)
}

/// A 404 on a point lookup means the point is absent, unless the server
/// blames the collection itself.
fn names_missing_collection(body: &str) -> bool {
    body.to_ascii_lowercase().contains("collection")
}

fn parse_vector(value: &Value) -> Option<Vector> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|x| x.as_f64().map(|f| f as f32))
            .collect::<Option<Vec<f32>>>()
            .map(Vector::new),
        // Named vectors: take the first
        Value::Object(named) => named.values().find_map(parse_vector),
        _ => None,
    }
}

fn parse_word(hit: &Value) -> Option<String> {
    if let Some(word) = hit.pointer("/payload/word").and_then(Value::as_str) {
        return Some(word.to_string());
    }
    match hit.get("id")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn parse_point_vector(body: &Value) -> Result<Vector> {
    body.pointer("/result/vector")
        .and_then(parse_vector)
        .ok_or_else(|| StoreError::Protocol("point response without a vector".to_string()))
}

fn parse_search_results(body: &Value) -> Result<Vec<Neighbor>> {
    let hits = body
        .get("result")
        .and_then(Value::as_array)
        .ok_or_else(|| StoreError::Protocol("search response without a result array".to_string()))?;

    hits.iter()
        .map(|hit| {
            let word = parse_word(hit)
                .ok_or_else(|| StoreError::Protocol("search hit without a word".to_string()))?;
            let score = hit
                .get("score")
                .and_then(Value::as_f64)
                .ok_or_else(|| StoreError::Protocol(format!("search hit '{}' without a score", word)))?;
            let vector = hit.get("vector").and_then(parse_vector);
            Ok(Neighbor::new(word, score as f32, vector))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dimension_layouts() {
        let qdrant = json!({"result": {"config": {"params": {"vectors": {"size": 300, "distance": "Cosine"}}}}});
        assert_eq!(parse_dimension(&qdrant), Some(300));

        let flat = json!({"name": "words", "vectors": {"size": 1024, "distance": "Cosine"}, "points_count": 10});
        assert_eq!(parse_dimension(&flat), Some(1024));

        assert_eq!(parse_dimension(&json!({"result": {}})), None);
    }

    #[test]
    fn test_parse_search_results() {
        let body = json!({
            "result": [
                {"id": "queen", "score": 0.97, "payload": {"word": "queen"}, "vector": [0.0, 2.0]},
                {"id": 17, "score": 0.5, "payload": null},
                {"id": "x", "score": 0.4, "payload": {"word": "princess"}, "vector": {"text": [1.0, 0.5]}}
            ]
        });
        let hits = parse_search_results(&body).unwrap();
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].word, "queen");
        assert_eq!(hits[0].vector, Some(Vector::new(vec![0.0, 2.0])));
        assert_eq!(hits[1].word, "17");
        assert_eq!(hits[1].vector, None);
        assert_eq!(hits[2].word, "princess");
        assert_eq!(hits[2].vector, Some(Vector::new(vec![1.0, 0.5])));
    }

    #[test]
    fn test_parse_search_rejects_garbage() {
        assert!(parse_search_results(&json!({"status": "ok"})).is_err());
        assert!(parse_search_results(&json!({"result": [{"id": "a"}]})).is_err());
    }

    #[test]
    fn test_parse_point_vector() {
        let body = json!({"result": {"id": "king", "vector": [1.0, 1.0, 0.0], "payload": null}});
        assert_eq!(parse_point_vector(&body).unwrap(), Vector::new(vec![1.0, 1.0, 0.0]));
        assert!(parse_point_vector(&json!({"result": {"id": "king"}})).is_err());
    }

    #[test]
    fn test_missing_collection_body() {
        assert!(names_missing_collection(r#"{"error": "Collection not found"}"#));
        assert!(names_missing_collection(
            r#"{"status": {"error": "Not found: Collection `words` doesn't exist!"}}"#
        ));
        assert!(!names_missing_collection(r#"{"error": "Point not found"}"#));
        assert!(!names_missing_collection(""));
    }

    #[test]
    fn test_search_body() {
        let body = search_body(&Vector::new(vec![0.5, 0.25]), 7, Some(0.5));
        assert_eq!(body["limit"], 7);
        assert_eq!(body["with_vector"], true);
        assert_eq!(body["score_threshold"], 0.5);
        assert!(search_body(&Vector::new(vec![0.5]), 1, None).get("score_threshold").is_none());
    }

    #[test]
    fn test_endpoint_escapes_words() {
        let connection = RemoteConnection {
            client: reqwest::Client::new(),
            base_url: Url::parse("http://localhost:6333/").unwrap(),
            collection: "words".to_string(),
            dimension: None,
        };
        let url = connection.endpoint(&["points", "new york"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:6333/collections/words/points/new%20york");
    }

    #[tokio::test]
    async fn test_unreachable_store() {
        let store = RemoteStore::new(StoreConfig {
            url: "http://127.0.0.1:1".to_string(),
            retry_attempts: 2,
            retry_delay_ms: 1,
            request_timeout_secs: 1,
            ..StoreConfig::default()
        });
        assert!(!store.exists("king").await);
        assert!(matches!(
            store.get_vector("king").await,
            Err(wordspace_core::Error::UpstreamUnavailable(_))
        ));
        assert!(!store.is_connected());
    }
}
