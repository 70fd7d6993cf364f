//! Driftwave Core - Shared types library.
//!
//! This crate provides common types used across all Driftwave components:
//! - `funnel` - Session store, event tracking, and checkout simulation
//! - `cli` - Command-line demo driving the funnel
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, emails, prices, the plan catalog, and the
//!   user/project records persisted by the session store

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
