use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    /// Input does not follow the `{id, fields}` record contract.
    #[error("malformed input: {0}")]
    MalformedInput(String),
    /// A sort spec that cannot be evaluated.
    #[error("invalid sort spec: {0}")]
    InvalidSpec(String),
    #[error("invalid row id: {0:?}")]
    InvalidRowId(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
