use super::loan::Loan;
use crate::error::ServiceError;
use std::fmt;

/// The single piece of state owned by the admin screen.
///
/// Exactly one variant is active at a time. `Loaded` and `Failed` are the two
/// terminal states of a fetch cycle; starting a new cycle always goes through
/// `Loading` first, discarding the previous data or error.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState {
    #[default]
    Idle,
    Loading,
    Loaded(Vec<Loan>),
    Failed(ServiceError),
}

/// Outcome fed into the state store by the effect coordinator.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchEvent {
    StartFetch,
    FetchOk(Vec<Loan>),
    FetchErr(ServiceError),
}

/// Discriminant of [`FetchState`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchPhase {
    Idle,
    Loading,
    Loaded,
    Failed,
}

impl fmt::Display for FetchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FetchPhase::Idle => "idle",
            FetchPhase::Loading => "loading",
            FetchPhase::Loaded => "loaded",
            FetchPhase::Failed => "failed",
        };
        f.write_str(name)
    }
}

impl FetchState {
    /// Whether `event` changes this state.
    ///
    /// `StartFetch` is accepted everywhere; outcomes only while `Loading`.
    pub fn accepts(&self, event: &FetchEvent) -> bool {
        matches!(
            (self, event),
            (_, FetchEvent::StartFetch)
                | (FetchState::Loading, FetchEvent::FetchOk(_))
                | (FetchState::Loading, FetchEvent::FetchErr(_))
        )
    }

    /// Pure transition function. Events not accepted by the current state
    /// leave it untouched.
    pub fn transition(self, event: FetchEvent) -> FetchState {
        match (self, event) {
            (_, FetchEvent::StartFetch) => FetchState::Loading,
            (FetchState::Loading, FetchEvent::FetchOk(loans)) => FetchState::Loaded(loans),
            (FetchState::Loading, FetchEvent::FetchErr(error)) => FetchState::Failed(error),
            (state, _) => state,
        }
    }

    pub fn phase(&self) -> FetchPhase {
        match self {
            FetchState::Idle => FetchPhase::Idle,
            FetchState::Loading => FetchPhase::Loading,
            FetchState::Loaded(_) => FetchPhase::Loaded,
            FetchState::Failed(_) => FetchPhase::Failed,
        }
    }

    /// True once the current cycle has produced an outcome.
    pub fn is_settled(&self) -> bool {
        matches!(self, FetchState::Loaded(_) | FetchState::Failed(_))
    }

    pub fn pending_loans(&self) -> Option<&[Loan]> {
        match self {
            FetchState::Loaded(loans) => Some(loans),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn has_error(&self) -> bool {
        matches!(self, FetchState::Failed(_))
    }
}
