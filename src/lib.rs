use thiserror::Error;

pub type Result<T> = std::result::Result<T, QaError>;

#[derive(Error, Debug)]
pub enum QaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Document error: {0}")]
    Document(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Index error: {0}")]
    Index(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

pub mod chunker;
pub mod config;
pub mod document;
pub mod extract;
pub mod index;
pub mod pipeline;
pub mod provider;
