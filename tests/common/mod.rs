#![allow(dead_code)]

use async_trait::async_trait;
use loan_admin::domain::intent::Decision;
use loan_admin::domain::loan::{Loan, LoanId};
use loan_admin::domain::ports::LoanService;
use loan_admin::error::{ServiceError, ServiceResult};
use std::sync::Mutex;
use tokio::sync::{Notify, oneshot};

pub fn loan(id: &str) -> Loan {
    Loan::new(LoanId::new(id).unwrap())
}

/// Loan service whose fetches stay pending until the test resolves them.
///
/// Fetches are numbered in call order starting at 0. Decisions are recorded
/// and answered immediately with `decision_result`.
#[derive(Default)]
pub struct ScriptedLoanService {
    fetches: Mutex<Vec<Option<oneshot::Sender<ServiceResult<Vec<Loan>>>>>>,
    decisions: Mutex<Vec<(LoanId, Decision)>>,
    decision_error: Mutex<Option<ServiceError>>,
    registered: Notify,
}

impl ScriptedLoanService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_decisions(message: &str) -> Self {
        let service = Self::default();
        *service.decision_error.lock().unwrap() = Some(ServiceError::new(message));
        service
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.lock().unwrap().len()
    }

    pub fn decisions(&self) -> Vec<(LoanId, Decision)> {
        self.decisions.lock().unwrap().clone()
    }

    /// Waits until at least `count` fetches have reached the service.
    pub async fn wait_for_fetches(&self, count: usize) {
        loop {
            let registered = self.registered.notified();
            if self.fetch_count() >= count {
                return;
            }
            registered.await;
        }
    }

    /// Completes fetch number `index` with `result`.
    pub fn resolve(&self, index: usize, result: ServiceResult<Vec<Loan>>) {
        let sender = self.fetches.lock().unwrap()[index]
            .take()
            .expect("fetch already resolved");
        let _ = sender.send(result);
    }
}

#[async_trait]
impl LoanService for ScriptedLoanService {
    async fn list_pending_loans(&self) -> ServiceResult<Vec<Loan>> {
        let (tx, rx) = oneshot::channel();
        self.fetches.lock().unwrap().push(Some(tx));
        self.registered.notify_waiters();
        rx.await
            .unwrap_or_else(|_| Err(ServiceError::new("fetch abandoned")))
    }

    async fn approve_loan(&self, loan_id: &LoanId) -> ServiceResult<()> {
        self.record(loan_id, Decision::Approve)
    }

    async fn reject_loan(&self, loan_id: &LoanId) -> ServiceResult<()> {
        self.record(loan_id, Decision::Reject)
    }
}

impl ScriptedLoanService {
    fn record(&self, loan_id: &LoanId, decision: Decision) -> ServiceResult<()> {
        self.decisions
            .lock()
            .unwrap()
            .push((loan_id.clone(), decision));
        match self.decision_error.lock().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}
