use thiserror::Error;

#[derive(Error, Debug)]
pub enum FolioError {
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("Storage quota exceeded: {size} bytes (limit {limit} bytes)")]
    QuotaExceeded { size: usize, limit: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl FolioError {
    /// Errors raised while writing the persisted record.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            FolioError::QuotaExceeded { .. }
                | FolioError::Store(_)
                | FolioError::Io(_)
                | FolioError::Serialization(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, FolioError>;
