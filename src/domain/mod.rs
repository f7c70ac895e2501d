//! Domain types for the pending-loan admin screen.
//!
//! Everything here is free of I/O: loans and their identifiers, operator
//! intents, the fetch state machine and its projection, and the port through
//! which the external loan service is reached.

pub mod intent;
pub mod loan;
pub mod ports;
pub mod projection;
pub mod state;
