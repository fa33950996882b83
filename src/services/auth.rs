//! Credential checking — the decision behind every login attempt.
//!
//! DESIGN
//! ======
//! Handlers depend on the [`Authenticator`] trait, never on a concrete
//! account source. [`StaticAuthenticator`] compares against the single
//! [`KnownAccount`]; a store-backed implementation can replace it through
//! `AppState` without touching the login surface.

use serde::Deserialize;

/// Message shown to the user for every rejected attempt.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password";

// =============================================================================
// TYPES
// =============================================================================

/// A username/password pair captured from one submit. Never persisted.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Credential {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

// Keeps passwords out of `{:?}` output in logs and panics.
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The only account accepted by [`StaticAuthenticator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownAccount {
    pub username: &'static str,
    pub password: &'static str,
}

impl KnownAccount {
    pub const ADMIN: Self = Self { username: "admin", password: "password123" };

    /// Exact, case-sensitive match on both fields. No trimming.
    #[must_use]
    pub fn matches(&self, candidate: &Credential) -> bool {
        candidate.username == self.username && candidate.password == self.password
    }
}

/// Rejection reasons. Only one exists in this service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,
}

/// Verdict for one [`Credential`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthResult {
    Success,
    Failure(String),
}

impl From<AuthError> for AuthResult {
    fn from(err: AuthError) -> Self {
        Self::Failure(err.to_string())
    }
}

// =============================================================================
// AUTHENTICATOR
// =============================================================================

/// Anything that can decide whether a credential is valid.
///
/// Implementations that cross a network boundary must fold transport
/// errors into [`AuthResult::Failure`]; the trait has no error channel.
#[async_trait::async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, candidate: &Credential) -> AuthResult;
}

/// Authenticator backed by a single fixed account.
#[derive(Debug, Clone, Copy)]
pub struct StaticAuthenticator {
    account: KnownAccount,
}

impl StaticAuthenticator {
    #[must_use]
    pub fn new(account: KnownAccount) -> Self {
        Self { account }
    }

    /// Synchronous form of [`Authenticator::authenticate`].
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] unless both fields match.
    pub fn check(&self, candidate: &Credential) -> Result<(), AuthError> {
        if self.account.matches(candidate) {
            Ok(())
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

impl Default for StaticAuthenticator {
    fn default() -> Self {
        Self::new(KnownAccount::ADMIN)
    }
}

#[async_trait::async_trait]
impl Authenticator for StaticAuthenticator {
    async fn authenticate(&self, candidate: &Credential) -> AuthResult {
        match self.check(candidate) {
            Ok(()) => AuthResult::Success,
            Err(e) => e.into(),
        }
    }
}

#[cfg(test)]
impl Credential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }
}

#[cfg(test)]
impl AuthResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
