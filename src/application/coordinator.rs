use super::store::StateStore;
use crate::config::{FetchOrdering, ScreenConfig};
use crate::domain::intent::{Decision, Intent};
use crate::domain::loan::LoanId;
use crate::domain::ports::LoanServiceRef;
use crate::domain::state::FetchEvent;
use crate::error::{AdminError, Result};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Identifies one fetch of the pending list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

/// Bookkeeping for overlapping fetches.
///
/// Decides, per [`FetchOrdering`], whether a resolved fetch may be folded
/// into the store.
#[derive(Debug, Default)]
pub struct FetchTracker {
    issued: u64,
    in_flight: usize,
}

impl FetchTracker {
    pub fn begin(&mut self) -> RequestToken {
        self.issued += 1;
        self.in_flight += 1;
        RequestToken(self.issued)
    }

    /// Marks `token` as resolved and returns whether its outcome applies.
    pub fn settle(&mut self, token: RequestToken, ordering: FetchOrdering) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);
        match ordering {
            FetchOrdering::LastResolved => self.in_flight == 0,
            FetchOrdering::LatestIssued => token.0 == self.issued,
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}

/// Awaitable result of a dispatched intent.
///
/// Dropping the handle does not cancel the intent.
pub struct IntentHandle {
    task: JoinHandle<Result<()>>,
}

impl IntentHandle {
    /// Waits for the intent's side effect to finish.
    ///
    /// A failed fetch is folded into the store and still completes with `Ok`;
    /// a failed decision completes with [`AdminError::DecisionFailed`].
    pub async fn completion(self) -> Result<()> {
        self.task.await?
    }
}

/// Performs the calls to the loan service and folds fetch outcomes into the
/// [`StateStore`]. It is the only writer of the store.
#[derive(Clone)]
pub struct EffectCoordinator {
    service: LoanServiceRef,
    store: StateStore,
    tracker: Arc<Mutex<FetchTracker>>,
    config: ScreenConfig,
}

impl EffectCoordinator {
    pub fn new(service: LoanServiceRef, store: StateStore, config: ScreenConfig) -> Self {
        Self {
            service,
            store,
            tracker: Arc::new(Mutex::new(FetchTracker::default())),
            config,
        }
    }

    /// Starts the side effect for `intent` on the runtime and returns at once.
    pub fn handle(&self, intent: Intent) -> IntentHandle {
        match intent {
            Intent::FetchPending => self.start_fetch(),
            Intent::Approve(loan_id) => self.start_decision(loan_id, Decision::Approve),
            Intent::Reject(loan_id) => self.start_decision(loan_id, Decision::Reject),
        }
    }

    pub fn in_flight_fetches(&self) -> usize {
        self.lock_tracker().in_flight()
    }

    fn start_fetch(&self) -> IntentHandle {
        let token = self.lock_tracker().begin();
        // StartFetch lands before the request is issued so it is always
        // observed ahead of the matching outcome.
        self.store.apply(FetchEvent::StartFetch);
        debug!(?token, "fetching pending loans");

        let this = self.clone();
        IntentHandle {
            task: tokio::spawn(async move {
                this.run_fetch(token).await;
                Ok(())
            }),
        }
    }

    async fn run_fetch(&self, token: RequestToken) {
        let event = match self.service.list_pending_loans().await {
            Ok(loans) => {
                info!(?token, count = loans.len(), "pending loans loaded");
                FetchEvent::FetchOk(loans)
            }
            Err(error) => {
                warn!(?token, %error, "failed to load pending loans");
                FetchEvent::FetchErr(error)
            }
        };

        let mut tracker = self.lock_tracker();
        if tracker.settle(token, self.config.fetch_ordering) {
            self.store.apply(event);
        } else {
            debug!(
                ?token,
                in_flight = tracker.in_flight(),
                "discarding superseded fetch outcome"
            );
        }
    }

    fn start_decision(&self, loan_id: LoanId, decision: Decision) -> IntentHandle {
        debug!(%loan_id, %decision, "submitting loan decision");
        let this = self.clone();
        IntentHandle {
            task: tokio::spawn(async move { this.run_decision(loan_id, decision).await }),
        }
    }

    async fn run_decision(&self, loan_id: LoanId, decision: Decision) -> Result<()> {
        match self.service.decide(&loan_id, decision).await {
            Ok(()) => {
                info!(%loan_id, %decision, "loan decision recorded");
                if self.config.refresh_after_decision && !self.store.is_detached() {
                    drop(self.start_fetch());
                }
                Ok(())
            }
            Err(source) => {
                warn!(%loan_id, %decision, error = %source, "loan decision failed");
                Err(AdminError::DecisionFailed {
                    loan_id,
                    decision,
                    source,
                })
            }
        }
    }

    fn lock_tracker(&self) -> std::sync::MutexGuard<'_, FetchTracker> {
        self.tracker.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
