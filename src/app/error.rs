use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    /// A required field was missing. Raised before the store is touched.
    #[error("{0}")]
    Validation(String),

    #[error("post not found: {0}")]
    NotFound(String),

    /// A store call failed while writing or while reading the record a
    /// mutation depends on.
    #[error("storage failure: {0:#}")]
    Storage(anyhow::Error),

    #[error("failed to encode post: {0}")]
    Encode(#[from] serde_json::Error),
}

impl RepoError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

pub type RepoResult<T> = Result<T, RepoError>;
