use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// One or more words are absent from the store. Every missing word is listed.
    #[error("Words not found: {}", .words.join(", "))]
    NotFound { words: Vec<String> },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    #[error("Vector store unavailable: {0}")]
    UpstreamUnavailable(String),
}

impl Error {
    pub fn not_found<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Error::NotFound {
            words: words.into_iter().map(Into::into).collect(),
        }
    }
}
