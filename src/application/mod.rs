//! Application layer orchestrating the pending-loan fetch cycle.
//!
//! `AdminScreen` owns a `StateStore` and an `EffectCoordinator` for as long as
//! the screen is active. User and lifecycle actions go through the
//! `IntentDispatcher`; the coordinator runs the service calls as Tokio tasks
//! and is the only component that writes to the store.

pub mod coordinator;
pub mod dispatcher;
pub mod screen;
pub mod store;
