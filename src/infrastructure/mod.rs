//! Adapters implementing the `LoanService` port.

pub mod http;
pub mod in_memory;
