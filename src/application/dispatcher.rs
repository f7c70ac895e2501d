use super::coordinator::{EffectCoordinator, IntentHandle};
use crate::domain::intent::{Decision, Intent};
use crate::domain::loan::LoanId;
use crate::error::Result;
use tracing::debug;

/// Turns operator and lifecycle actions into intents for the coordinator.
///
/// Never touches state directly. Repeated fetch requests are not de-duplicated.
#[derive(Clone)]
pub struct IntentDispatcher {
    coordinator: EffectCoordinator,
}

impl IntentDispatcher {
    pub fn new(coordinator: EffectCoordinator) -> Self {
        Self { coordinator }
    }

    pub fn dispatch(&self, intent: Intent) -> IntentHandle {
        debug!(intent = intent.name(), "dispatching intent");
        self.coordinator.handle(intent)
    }

    pub fn request_fetch_pending(&self) -> IntentHandle {
        self.dispatch(Intent::FetchPending)
    }

    /// Fails with `InvalidInput` for an empty id, without calling the service.
    pub fn request_approve(&self, loan_id: &str) -> Result<IntentHandle> {
        self.request_decision(loan_id, Decision::Approve)
    }

    /// Fails with `InvalidInput` for an empty id, without calling the service.
    pub fn request_reject(&self, loan_id: &str) -> Result<IntentHandle> {
        self.request_decision(loan_id, Decision::Reject)
    }

    pub fn request_decision(&self, loan_id: &str, decision: Decision) -> Result<IntentHandle> {
        let loan_id = LoanId::new(loan_id)?;
        Ok(self.dispatch(Intent::decision(loan_id, decision)))
    }
}
