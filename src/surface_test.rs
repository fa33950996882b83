use super::*;
use crate::services::auth::StaticAuthenticator;
use std::sync::atomic::{AtomicUsize, Ordering};

const LIMIT: Duration = Duration::from_secs(5);

struct CountingAuthenticator {
    calls: AtomicUsize,
    inner: StaticAuthenticator,
}

impl CountingAuthenticator {
    fn new() -> Self {
        Self { calls: AtomicUsize::new(0), inner: StaticAuthenticator::default() }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Authenticator for CountingAuthenticator {
    async fn authenticate(&self, candidate: &Credential) -> AuthResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.authenticate(candidate).await
    }
}

struct HangingAuthenticator;

#[async_trait::async_trait]
impl Authenticator for HangingAuthenticator {
    async fn authenticate(&self, _candidate: &Credential) -> AuthResult {
        std::future::pending().await
    }
}

// =============================================================
// Idle
// =============================================================

#[test]
fn fresh_surface_is_idle_with_heading_and_empty_inputs() {
    let surface = LoginSurface::new();
    assert_eq!(surface.state(), SurfaceState::Idle);

    let view = surface.view();
    assert_eq!(view.heading, "Login");
    assert_eq!(view.username, "");
    assert_eq!(view.password, "");
    assert!(view.error.is_none());
    assert!(view.submit_enabled);
}

#[test]
fn with_input_fills_view() {
    let surface = LoginSurface::with_input(Credential::new("admin", "pw"));
    assert_eq!(surface.state(), SurfaceState::Idle);
    assert_eq!(surface.view().username, "admin");
    assert_eq!(surface.view().password, "pw");
}

// =============================================================
// Submitting
// =============================================================

#[test]
fn begin_submit_locks_form_and_captures_input() {
    let mut surface = LoginSurface::with_input(Credential::new("admin", "password123"));
    let captured = surface.begin_submit().unwrap();

    assert_eq!(captured, Credential::new("admin", "password123"));
    assert_eq!(surface.state(), SurfaceState::Submitting);
    assert!(!surface.view().submit_enabled);
}

#[test]
fn second_submit_while_in_flight_is_refused() {
    let mut surface = LoginSurface::new();
    surface.begin_submit().unwrap();
    assert_eq!(surface.begin_submit(), Err(SurfaceError::SubmissionInFlight));
    assert_eq!(surface.state(), SurfaceState::Submitting);
}

#[test]
fn locked_surface_shows_input_and_refuses_submit() {
    let mut surface = LoginSurface::locked(Credential::new("a", "b"));
    assert_eq!(surface.state(), SurfaceState::Submitting);
    assert_eq!(surface.view().username, "a");
    assert!(!surface.view().submit_enabled);
    assert_eq!(surface.begin_submit(), Err(SurfaceError::SubmissionInFlight));
}

#[test]
fn resolve_without_submit_is_refused() {
    let mut surface = LoginSurface::new();
    assert_eq!(surface.resolve(AuthResult::Success), Err(SurfaceError::NotSubmitting));
    assert_eq!(surface.state(), SurfaceState::Idle);
}

// =============================================================
// Resolution
// =============================================================

#[test]
fn success_redirects_to_todos_without_error() {
    let mut surface = LoginSurface::new();
    surface.begin_submit().unwrap();
    let outcome = surface.resolve(AuthResult::Success).unwrap();

    assert_eq!(outcome, Outcome::Redirect("/todos"));
    assert_eq!(surface.state(), SurfaceState::Redirecting);
    assert!(surface.view().error.is_none());
    assert!(!surface.view().submit_enabled);
}

#[test]
fn failure_shows_reason_and_keeps_input() {
    let mut surface = LoginSurface::with_input(Credential::new("wronguser", "wrongpass"));
    surface.begin_submit().unwrap();
    let outcome = surface
        .resolve(AuthResult::Failure(INVALID_CREDENTIALS_MESSAGE.into()))
        .unwrap();

    assert_eq!(outcome, Outcome::ShowError("Invalid username or password".into()));
    assert_eq!(surface.state(), SurfaceState::ErrorShown);

    let view = surface.view();
    assert_eq!(view.error, Some("Invalid username or password"));
    assert_eq!(view.username, "wronguser");
    assert_eq!(view.password, "wrongpass");
    assert!(view.submit_enabled);
}

#[test]
fn retry_after_error_clears_message_while_submitting() {
    let mut surface = LoginSurface::new();
    surface.begin_submit().unwrap();
    surface.resolve(AuthResult::Failure("nope".into())).unwrap();

    surface.begin_submit().unwrap();
    assert_eq!(surface.state(), SurfaceState::Submitting);
    assert!(surface.view().error.is_none());
}

#[test]
fn submit_after_redirect_is_refused() {
    let mut surface = LoginSurface::new();
    surface.begin_submit().unwrap();
    surface.resolve(AuthResult::Success).unwrap();
    assert_eq!(surface.begin_submit(), Err(SurfaceError::AlreadyRedirected));
}

// =============================================================
// submit() round trip
// =============================================================

#[tokio::test]
async fn submit_valid_credentials_redirects() {
    let auth = CountingAuthenticator::new();
    let mut surface = LoginSurface::with_input(Credential::new("admin", "password123"));

    let outcome = surface.submit(&auth, LIMIT).await.unwrap();
    assert_eq!(outcome, Outcome::Redirect(TODOS_PATH));
    assert_eq!(auth.calls(), 1);
}

#[tokio::test]
async fn submit_wrong_case_username_shows_error() {
    let auth = CountingAuthenticator::new();
    let mut surface = LoginSurface::with_input(Credential::new("Admin", "password123"));

    let outcome = surface.submit(&auth, LIMIT).await.unwrap();
    assert_eq!(outcome, Outcome::ShowError(INVALID_CREDENTIALS_MESSAGE.into()));
    assert_eq!(surface.state(), SurfaceState::ErrorShown);
}

#[tokio::test]
async fn repeated_invalid_submits_are_identical() {
    let auth = CountingAuthenticator::new();
    let mut surface = LoginSurface::with_input(Credential::new("wronguser", "wrongpass"));

    let first = surface.submit(&auth, LIMIT).await.unwrap();
    for _ in 0..5 {
        assert_eq!(surface.submit(&auth, LIMIT).await.unwrap(), first);
    }
    assert_eq!(auth.calls(), 6);
    assert_eq!(surface.view().username, "wronguser");
}

#[tokio::test]
async fn submit_while_locked_does_not_call_authenticator() {
    let auth = CountingAuthenticator::new();
    let mut surface = LoginSurface::new();
    surface.begin_submit().unwrap();

    assert_eq!(surface.submit(&auth, LIMIT).await, Err(SurfaceError::SubmissionInFlight));
    assert_eq!(auth.calls(), 0);
}

#[tokio::test]
async fn hanging_authenticator_resolves_to_failure() {
    let mut surface = LoginSurface::with_input(Credential::new("admin", "password123"));

    let outcome = surface
        .submit(&HangingAuthenticator, Duration::from_millis(20))
        .await
        .unwrap();
    assert_eq!(outcome, Outcome::ShowError(INVALID_CREDENTIALS_MESSAGE.into()));
    assert_eq!(surface.state(), SurfaceState::ErrorShown);
}

// =============================================================
// SubmissionGate
// =============================================================

#[test]
fn gate_refuses_second_permit_for_same_username() {
    let gate = SubmissionGate::new();
    let _permit = gate.try_acquire("admin").unwrap();
    assert!(matches!(gate.try_acquire("admin"), Err(SurfaceError::SubmissionInFlight)));
}

#[test]
fn gate_allows_different_usernames_concurrently() {
    let gate = SubmissionGate::new();
    let _a = gate.try_acquire("admin").unwrap();
    assert!(gate.try_acquire("guest").is_ok());
}

#[test]
fn gate_releases_username_when_permit_drops() {
    let gate = SubmissionGate::new();
    let permit = gate.try_acquire("admin").unwrap();
    drop(permit);
    assert!(gate.try_acquire("admin").is_ok());
}

#[test]
fn gate_clones_share_in_flight_set() {
    let gate = SubmissionGate::new();
    let other = gate.clone();
    let _permit = gate.try_acquire("admin").unwrap();
    assert!(other.try_acquire("admin").is_err());
}
