use thiserror::Error;

/// Error type shared by storage ports, the feed aggregator and HTTP handlers.
///
/// The server crate maps each variant onto an HTTP status (`Validation` → 400,
/// `Unauthorized` → 401, `Forbidden` → 403, `NotFound` → 404, `Conflict` → 409,
/// everything else → 500 with a static message).
#[derive(Debug, Error)]
pub enum ArchError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(anyhow::Error),

    #[error("internal error: {0}")]
    Internal(anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ArchError>;

impl ArchError {
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        ArchError::NotFound(format!("{entity} {id}"))
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        ArchError::Validation(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        ArchError::Forbidden(msg.into())
    }
}
