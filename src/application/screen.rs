use super::coordinator::EffectCoordinator;
use super::dispatcher::IntentDispatcher;
use super::store::StateStore;
use crate::config::ScreenConfig;
use crate::domain::ports::LoanServiceRef;
use crate::domain::projection::Projection;
use crate::domain::state::FetchState;
use crate::error::{AdminError, Result};
use tokio::sync::watch;
use tracing::info;

/// Lifecycle owner of one admin screen.
///
/// Activation builds the store, coordinator and dispatcher and requests the
/// pending list. Deactivating (or dropping) the screen detaches the store, so
/// fetches still in flight cannot write into it afterwards.
pub struct AdminScreen {
    store: StateStore,
    dispatcher: IntentDispatcher,
}

impl AdminScreen {
    /// Must be called from within a Tokio runtime.
    pub fn activate(service: LoanServiceRef, config: ScreenConfig) -> Self {
        let screen = Self::attach(service, config);
        info!("admin screen activated");
        drop(screen.dispatcher.request_fetch_pending());
        screen
    }

    /// Builds the screen without requesting the pending list. The store stays
    /// `Idle` until a fetch is dispatched.
    pub fn attach(service: LoanServiceRef, config: ScreenConfig) -> Self {
        let store = StateStore::new();
        let coordinator = EffectCoordinator::new(service, store.clone(), config);
        let dispatcher = IntentDispatcher::new(coordinator);
        Self { store, dispatcher }
    }

    pub fn dispatcher(&self) -> &IntentDispatcher {
        &self.dispatcher
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn state(&self) -> FetchState {
        self.store.snapshot()
    }

    pub fn projection(&self) -> Projection {
        self.store.projection()
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchState> {
        self.store.subscribe()
    }

    /// Waits until the current fetch cycle is `Loaded` or `Failed`.
    pub async fn settled(&self) -> Result<FetchState> {
        let mut rx = self.subscribe();
        let state = rx
            .wait_for(FetchState::is_settled)
            .await
            .map_err(|_| AdminError::Detached)?;
        Ok(state.clone())
    }

    pub fn deactivate(self) {
        drop(self);
    }
}

impl Drop for AdminScreen {
    fn drop(&mut self) {
        self.store.detach();
        info!("admin screen deactivated");
    }
}
