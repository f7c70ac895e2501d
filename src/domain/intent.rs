use super::loan::LoanId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operator verdict on a pending loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Approve,
    Reject,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Approve => f.write_str("approve"),
            Decision::Reject => f.write_str("reject"),
        }
    }
}

/// A request to perform a side effect, handed to the effect coordinator.
///
/// Intents are fire-and-forget. No ordering is guaranteed between them beyond
/// the order in which they were dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    FetchPending,
    Approve(LoanId),
    Reject(LoanId),
}

impl Intent {
    pub fn decision(loan_id: LoanId, decision: Decision) -> Self {
        match decision {
            Decision::Approve => Intent::Approve(loan_id),
            Decision::Reject => Intent::Reject(loan_id),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Intent::FetchPending => "fetch_pending",
            Intent::Approve(_) => "approve",
            Intent::Reject(_) => "reject",
        }
    }
}
