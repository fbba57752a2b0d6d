//! Core infrastructure for the Quibble engine.
//!
//! This crate contains the shared application state, the axum extractors
//! used by every handler crate, and the real-time broadcast registry that
//! backs the push channel.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod app;
pub mod extract;
pub mod prelude;
pub mod ws_broadcast;

pub use app::{App, AppOpts, AppState};
pub use extract::{Auth, OptionalAuth};
pub use ws_broadcast::BroadcastManager;

// vim: ts=4
