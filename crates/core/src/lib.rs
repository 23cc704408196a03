//! Pure domain layer for the housing-swap service.
//!
//! Nothing in this crate performs I/O. The database and HTTP crates load
//! state, hand it to the functions here, and persist whatever they decide.

pub mod accounts;
pub mod cycle;
pub mod error;
pub mod ledger;
pub mod lifecycle;
pub mod matching;
pub mod swap_request;
pub mod types;
