//! HTTP wiring for the vidvault sync engine.
//!
//! Exposed as a library so integration tests can build the router in
//! process with mock collaborators.

pub mod api;
pub mod metrics;
pub mod state;
