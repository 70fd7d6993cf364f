//! Core types for Driftwave.
//!
//! This module provides type-safe wrappers for common domain concepts and the
//! records persisted by the session store.

pub mod attribution;
pub mod email;
pub mod id;
pub mod plan;
pub mod price;
pub mod user;

pub use attribution::MarketingSource;
pub use email::{Email, EmailError};
pub use id::*;
pub use plan::{BillingInterval, Plan, find_plan, plans};
pub use price::{CurrencyCode, Price};
pub use user::{Project, User};
