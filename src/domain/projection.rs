use super::loan::Loan;
use super::state::{FetchPhase, FetchState};
use serde::Serialize;

/// Read-only view of a [`FetchState`] shaped for rendering.
///
/// Always built from a single state snapshot, so the three fields never
/// disagree with each other.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub pending_loans: Option<Vec<Loan>>,
    pub loading: bool,
    pub error: bool,
}

impl Projection {
    pub fn of(state: &FetchState) -> Self {
        Self {
            pending_loans: state.pending_loans().map(<[Loan]>::to_vec),
            loading: state.is_loading(),
            error: state.has_error(),
        }
    }

    /// Recovers which state this projection was derived from.
    pub fn phase(&self) -> FetchPhase {
        match (&self.pending_loans, self.loading, self.error) {
            (Some(_), _, _) => FetchPhase::Loaded,
            (None, true, _) => FetchPhase::Loading,
            (None, false, true) => FetchPhase::Failed,
            (None, false, false) => FetchPhase::Idle,
        }
    }
}
