use crate::domain::intent::Decision;
use crate::domain::loan::{Loan, LoanId};
use crate::domain::ports::LoanService;
use crate::error::{Result, ServiceError, ServiceResult};
use async_trait::async_trait;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory loan service.
///
/// Holds the pending loans in arrival order and records every decision taken.
/// A decided loan leaves the pending list. Used for tests and for serving a
/// fixture file from the CLI.
#[derive(Default, Clone)]
pub struct InMemoryLoanService {
    pending: Arc<RwLock<Vec<Loan>>>,
    decisions: Arc<RwLock<Vec<(LoanId, Decision)>>>,
}

impl InMemoryLoanService {
    /// Creates a service with no pending loans.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_loans(loans: Vec<Loan>) -> Self {
        Self {
            pending: Arc::new(RwLock::new(loans)),
            decisions: Arc::default(),
        }
    }

    /// Loads the pending loans from a JSON array.
    pub fn from_reader<R: Read>(source: R) -> Result<Self> {
        let loans: Vec<Loan> = serde_json::from_reader(source)?;
        Ok(Self::with_loans(loans))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Decisions recorded so far, in the order they were applied.
    pub async fn decisions(&self) -> Vec<(LoanId, Decision)> {
        self.decisions.read().await.clone()
    }

    async fn record(&self, loan_id: &LoanId, decision: Decision) -> ServiceResult<()> {
        let mut pending = self.pending.write().await;
        let position = pending
            .iter()
            .position(|loan| &loan.id == loan_id)
            .ok_or_else(|| ServiceError::new(format!("loan {loan_id} is not pending")))?;
        pending.remove(position);
        self.decisions
            .write()
            .await
            .push((loan_id.clone(), decision));
        Ok(())
    }
}

#[async_trait]
impl LoanService for InMemoryLoanService {
    async fn list_pending_loans(&self) -> ServiceResult<Vec<Loan>> {
        Ok(self.pending.read().await.clone())
    }

    async fn approve_loan(&self, loan_id: &LoanId) -> ServiceResult<()> {
        self.record(loan_id, Decision::Approve).await
    }

    async fn reject_loan(&self, loan_id: &LoanId) -> ServiceResult<()> {
        self.record(loan_id, Decision::Reject).await
    }
}
