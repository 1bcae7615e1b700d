//! Editor error types

use shared::ObjectId;

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// Link request with equal or missing endpoints
    #[error("invalid link endpoints: {a} -> {b}")]
    InvalidEndpoints { a: ObjectId, b: ObjectId },
    /// Scene document that cannot be loaded
    #[error("invalid scene: {0}")]
    InvalidScene(String),
    /// Id counter has no room left for another id
    #[error("id counter exhausted: {0}")]
    IdsExhausted(&'static str),
    /// Settings file that cannot be parsed
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type EditorResult<T> = Result<T, EditorError>;
