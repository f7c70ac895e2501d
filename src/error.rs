use crate::domain::intent::Decision;
use crate::domain::loan::LoanId;
use thiserror::Error;

/// Opaque failure reported by the external loan service.
///
/// No distinction is made between network, authorization or service-side
/// failures; the message is carried through unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ServiceError {
    message: String,
}

impl ServiceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Failed to load pending loans: {0}")]
    FetchFailed(#[source] ServiceError),
    #[error("Failed to {decision} loan {loan_id}: {source}")]
    DecisionFailed {
        loan_id: LoanId,
        decision: Decision,
        #[source]
        source: ServiceError,
    },
    #[error("Admin screen is no longer active")]
    Detached,
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Intent task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, AdminError>;

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
