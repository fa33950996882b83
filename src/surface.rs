//! Login surface — the form's lifecycle as an explicit state machine.
//!
//! DESIGN
//! ======
//! ```text
//!   Idle ──submit──▶ Submitting ──Success──▶ Redirecting
//!    ▲                   │
//!    │                   └──Failure──▶ ErrorShown ──submit──▶ Submitting
//!    └── (fresh load)
//! ```
//! `begin_submit` captures the inputs and locks the form; `resolve` applies
//! the verdict. A second submit while locked is refused, so one attempt
//! yields at most one authenticator call. Rendering reads [`SurfaceView`]
//! and never inspects the state directly.
//!
//! A surface lives for one HTTP request, so [`SubmissionGate`] carries the
//! same lock across requests: while a username has a check in flight, a
//! second submit for it is refused before reaching the authenticator.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::services::auth::{AuthResult, Authenticator, Credential, INVALID_CREDENTIALS_MESSAGE};

pub const LOGIN_PATH: &str = "/login";
pub const TODOS_PATH: &str = "/todos";
pub const LOGIN_HEADING: &str = "Login";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceState {
    Idle,
    Submitting,
    ErrorShown,
    Redirecting,
}

/// What the caller must do once a submission resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Re-render the form with this message; stay on the login route.
    ShowError(String),
    /// Navigate the browser to this path.
    Redirect(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    #[error("a submission is already in flight")]
    SubmissionInFlight,
    #[error("no submission is in flight")]
    NotSubmitting,
    #[error("login already completed")]
    AlreadyRedirected,
}

/// Render-facing snapshot of the surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceView<'a> {
    pub heading: &'static str,
    pub username: &'a str,
    pub password: &'a str,
    pub error: Option<&'a str>,
    pub submit_enabled: bool,
}

// =============================================================================
// STATE MACHINE
// =============================================================================

#[derive(Debug, Clone)]
pub struct LoginSurface {
    state: SurfaceState,
    input: Credential,
    error: Option<String>,
}

impl LoginSurface {
    /// Fresh surface as served by `GET /login`: empty inputs, no error.
    #[must_use]
    pub fn new() -> Self {
        Self { state: SurfaceState::Idle, input: Credential::default(), error: None }
    }

    /// Surface with inputs already filled in, as if the user had typed them.
    #[must_use]
    pub fn with_input(input: Credential) -> Self {
        Self { input, ..Self::new() }
    }

    #[must_use]
    pub fn state(&self) -> SurfaceState {
        self.state
    }

    /// Surface for a user whose earlier submission is still pending
    /// elsewhere: inputs shown, button disabled.
    #[must_use]
    pub fn locked(input: Credential) -> Self {
        Self { state: SurfaceState::Submitting, input, error: None }
    }

    fn accepts_submit(&self) -> bool {
        matches!(self.state, SurfaceState::Idle | SurfaceState::ErrorShown)
    }

    /// Capture the current inputs and lock the form.
    ///
    /// # Errors
    ///
    /// Refuses while a submission is in flight or after a successful login.
    pub fn begin_submit(&mut self) -> Result<Credential, SurfaceError> {
        match self.state {
            SurfaceState::Idle | SurfaceState::ErrorShown => {
                self.state = SurfaceState::Submitting;
                self.error = None;
                Ok(self.input.clone())
            }
            SurfaceState::Submitting => Err(SurfaceError::SubmissionInFlight),
            SurfaceState::Redirecting => Err(SurfaceError::AlreadyRedirected),
        }
    }

    /// Apply the authenticator's verdict to a locked form.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::NotSubmitting`] unless `begin_submit` ran first.
    pub fn resolve(&mut self, result: AuthResult) -> Result<Outcome, SurfaceError> {
        if self.state != SurfaceState::Submitting {
            return Err(SurfaceError::NotSubmitting);
        }

        match result {
            AuthResult::Success => {
                self.state = SurfaceState::Redirecting;
                Ok(Outcome::Redirect(TODOS_PATH))
            }
            AuthResult::Failure(reason) => {
                self.state = SurfaceState::ErrorShown;
                self.error = Some(reason.clone());
                Ok(Outcome::ShowError(reason))
            }
        }
    }

    /// Full round trip: lock, authenticate within `limit`, resolve.
    ///
    /// An authenticator that outlives `limit` counts as a rejection, so the
    /// surface always leaves `Submitting`.
    ///
    /// # Errors
    ///
    /// Same as [`LoginSurface::begin_submit`].
    pub async fn submit(&mut self, authenticator: &dyn Authenticator, limit: Duration) -> Result<Outcome, SurfaceError> {
        let candidate = self.begin_submit()?;
        let result = match tokio::time::timeout(limit, authenticator.authenticate(&candidate)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(username = %candidate.username, ?limit, "authenticator timed out");
                AuthResult::Failure(INVALID_CREDENTIALS_MESSAGE.to_owned())
            }
        };
        self.resolve(result)
    }

    #[must_use]
    pub fn view(&self) -> SurfaceView<'_> {
        SurfaceView {
            heading: LOGIN_HEADING,
            username: &self.input.username,
            password: &self.input.password,
            error: self.error.as_deref(),
            submit_enabled: self.accepts_submit(),
        }
    }
}

impl Default for LoginSurface {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// SUBMISSION GATE
// =============================================================================

/// Usernames with a submission currently in flight. Clone shares the set.
#[derive(Debug, Clone, Default)]
pub struct SubmissionGate {
    in_flight: Arc<Mutex<HashSet<String>>>,
}

/// Held for the duration of one submission; releases the username on drop.
#[derive(Debug)]
pub struct SubmissionPermit {
    in_flight: Arc<Mutex<HashSet<String>>>,
    username: String,
}

impl SubmissionGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `username` for one submission.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::SubmissionInFlight`] while another permit for
    /// the same username is alive.
    pub fn try_acquire(&self, username: &str) -> Result<SubmissionPermit, SurfaceError> {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if !in_flight.insert(username.to_owned()) {
            return Err(SurfaceError::SubmissionInFlight);
        }
        Ok(SubmissionPermit { in_flight: Arc::clone(&self.in_flight), username: username.to_owned() })
    }
}

impl Drop for SubmissionPermit {
    fn drop(&mut self) {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.username);
    }
}

#[cfg(test)]
#[path = "surface_test.rs"]
mod tests;
