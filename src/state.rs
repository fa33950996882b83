//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It carries the authenticator behind a trait object so tests and
//! alternative account sources can be swapped in at construction time,
//! plus the gate that keeps one submission per username in flight.

use std::sync::Arc;
use std::time::Duration;

use crate::services::auth::{Authenticator, StaticAuthenticator};
use crate::surface::SubmissionGate;

/// Clone is required by Axum; the authenticator and gate are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub authenticator: Arc<dyn Authenticator>,
    /// Upper bound on a single credential check.
    pub auth_timeout: Duration,
    pub submissions: SubmissionGate,
}

impl AppState {
    #[must_use]
    pub fn new(authenticator: Arc<dyn Authenticator>, auth_timeout: Duration) -> Self {
        Self { authenticator, auth_timeout, submissions: SubmissionGate::new() }
    }

    /// State backed by the built-in admin account.
    #[must_use]
    pub fn with_static_account(auth_timeout: Duration) -> Self {
        Self::new(Arc::new(StaticAuthenticator::default()), auth_timeout)
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
