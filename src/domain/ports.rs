use super::intent::Decision;
use super::loan::{Loan, LoanId};
use crate::error::ServiceResult;
use async_trait::async_trait;
use std::sync::Arc;

/// The external loan-management API.
#[async_trait]
pub trait LoanService: Send + Sync {
    async fn list_pending_loans(&self) -> ServiceResult<Vec<Loan>>;
    async fn approve_loan(&self, loan_id: &LoanId) -> ServiceResult<()>;
    async fn reject_loan(&self, loan_id: &LoanId) -> ServiceResult<()>;

    async fn decide(&self, loan_id: &LoanId, decision: Decision) -> ServiceResult<()> {
        match decision {
            Decision::Approve => self.approve_loan(loan_id).await,
            Decision::Reject => self.reject_loan(loan_id).await,
        }
    }
}

pub type LoanServiceRef = Arc<dyn LoanService>;
