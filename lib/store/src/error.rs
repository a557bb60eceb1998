use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Failures talking to the remote store.
///
/// `Clone` so one in-flight connection attempt can hand the same outcome to
/// every waiter.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Malformed response: {0}")]
    Protocol(String),

    #[error("Gave up after {attempts} attempts: {last}")]
    RetriesExhausted { attempts: u32, last: Box<StoreError> },
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => StoreError::Status {
                status: status.as_u16(),
                url: e.url().map(|u| u.to_string()).unwrap_or_default(),
            },
            None => StoreError::Http(e.to_string()),
        }
    }
}

impl From<StoreError> for wordspace_core::Error {
    fn from(e: StoreError) -> Self {
        wordspace_core::Error::UpstreamUnavailable(e.to_string())
    }
}
