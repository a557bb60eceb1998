//! # wordspace Store
//!
//! Remote nearest-neighbor store adapter.
//!
//! - [`RemoteStore`] - [`VectorStore`](wordspace_core::VectorStore) over a
//!   Qdrant-compatible REST API
//! - [`ConnectionManager`] - single-flight, memoized connection setup
//! - [`RetryPolicy`] - fixed-count, fixed-delay retries

pub mod connection;
pub mod error;
pub mod remote;
pub mod retry;

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub use connection::{ConnectionManager, ConnectionState};
pub use error::{Result, StoreError};
pub use remote::{RemoteConnection, RemoteStore};
pub use retry::RetryPolicy;

/// Settings for the remote store
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub url: String,
    pub collection: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub retry_attempts: u32,
    pub retry_delay_ms: u64,
    pub request_timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:6333".to_string(),
            collection: "words".to_string(),
            api_key: None,
            retry_attempts: 3,
            retry_delay_ms: 1000,
            request_timeout_secs: 30,
        }
    }
}

impl StoreConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.retry_attempts, Duration::from_millis(self.retry_delay_ms))
    }
}
