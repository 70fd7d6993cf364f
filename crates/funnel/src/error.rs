//! Unified error handling.
//!
//! Provides a unified [`AppError`] type aggregating the per-concern errors
//! plus the typed flow conditions callers turn into redirect decisions. Flow
//! functions return `Result<T, AppError>`.
//!
//! A missing session is deliberately a typed condition ([`AppError::SignedOut`])
//! rather than a panic: the caller decides where to send the user, the core
//! never does.

use thiserror::Error;

use driftwave_core::{EmailError, PlanId, ProjectId};

use crate::config::ConfigError;
use crate::services::analytics::AnalyticsError;
use crate::storage::StorageError;

/// Application-level error type for the funnel.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration loading failed.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Session storage write failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Analytics client construction failed.
    #[error("Analytics error: {0}")]
    Analytics(#[from] AnalyticsError),

    /// No session user; callers redirect to signup.
    #[error("No one is signed in")]
    SignedOut,

    /// The session user has no plan; callers redirect to pricing.
    #[error("A subscription plan is required first")]
    PlanRequired,

    /// Plan ID not in the catalog.
    #[error("Unknown plan: {0}")]
    UnknownPlan(PlanId),

    /// Project not owned by the session user.
    #[error("Unknown project: {0}")]
    UnknownProject(ProjectId),

    /// Email failed to parse.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Form-level input constraint violated.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
