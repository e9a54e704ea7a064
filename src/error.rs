use thiserror::Error;

use crate::models::Modality;

#[derive(Debug, Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("store error: {0}")]
    Store(String),
    #[error("crypto error: {0}")]
    Crypto(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("provider '{0}' is not registered")]
    ProviderNotFound(String),
    #[error("no active provider with an API key supports {0}")]
    NoEligibleProvider(Modality),
}

pub type Result<T> = std::result::Result<T, Error>;
