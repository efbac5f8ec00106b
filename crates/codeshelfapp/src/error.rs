use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodeshelfError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Nothing selected: select at least one snippet")]
    EmptySelection,

    #[error("A category named '{0}' already exists")]
    DuplicateCategory(String),

    #[error("{0}")]
    Validation(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, CodeshelfError>;
