use crate::domain::payment::ProviderError;
use crate::domain::validation::ValidationErrors;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CheckoutError>;

#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown plan: {0}")]
    UnknownPlan(String),
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("invalid input: {0}")]
    Invalid(#[from] ValidationErrors),
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),
    #[error("form rejected: {0}")]
    FormRejected(String),
}
