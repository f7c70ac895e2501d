use crate::domain::projection::Projection;
use crate::domain::state::{FetchEvent, FetchState};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

/// Holds the current [`FetchState`] and notifies subscribers of changes.
///
/// Transitions are applied atomically through the pure transition table of
/// `FetchState`. Once detached, the store ignores every further event.
#[derive(Clone)]
pub struct StateStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    state: watch::Sender<FetchState>,
    detached: AtomicBool,
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StateStore {
    /// Creates a store in the `Idle` state.
    pub fn new() -> Self {
        let (state, _) = watch::channel(FetchState::Idle);
        Self {
            inner: Arc::new(StoreInner {
                state,
                detached: AtomicBool::new(false),
            }),
        }
    }

    /// Applies `event` to the current state.
    ///
    /// Returns whether the state changed. Subscribers are only woken on change.
    pub fn apply(&self, event: FetchEvent) -> bool {
        if self.is_detached() {
            debug!(?event, "discarding event for detached store");
            return false;
        }

        self.inner.state.send_if_modified(|state| {
            if !state.accepts(&event) {
                trace!(phase = %state.phase(), "event ignored in current state");
                return false;
            }
            let from = state.phase();
            let current = std::mem::take(state);
            *state = current.transition(event);
            debug!(%from, to = %state.phase(), "fetch state transition");
            true
        })
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> FetchState {
        self.inner.state.borrow().clone()
    }

    /// Projection of the current state, read from one snapshot.
    pub fn projection(&self) -> Projection {
        Projection::of(&self.inner.state.borrow())
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchState> {
        self.inner.state.subscribe()
    }

    /// Calls `listener` with the projection of every new state until the
    /// returned [`Subscription`] is dropped.
    ///
    /// Changes that happen in quick succession may be delivered as one call
    /// carrying the latest state.
    pub fn subscribe_with<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Projection) + Send + 'static,
    {
        let mut rx = self.subscribe();
        let task = tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let projection = Projection::of(&rx.borrow_and_update());
                listener(&projection);
            }
        });
        Subscription { task }
    }

    pub fn detach(&self) {
        self.inner.detached.store(true, Ordering::SeqCst);
    }

    pub fn is_detached(&self) -> bool {
        self.inner.detached.load(Ordering::SeqCst)
    }
}

/// Handle to a listener registered with [`StateStore::subscribe_with`].
pub struct Subscription {
    task: JoinHandle<()>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}
