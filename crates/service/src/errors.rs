use thiserror::Error;

/// Single domain error kind; every storage failure is rewrapped into this
/// at the service boundary, keeping the driver detail as message text only.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("duplicate key: {0}")]
    Duplicate(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}
