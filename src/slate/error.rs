use crate::commands::Decline;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Declined: {0}")]
    Declined(#[from] Decline),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, SlateError>;
