//! Login routes — HTML form flow plus a JSON twin for scripted clients.

use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Redirect, Response};
use tracing::{info, warn};

use crate::pages;
use crate::services::auth::Credential;
use crate::state::AppState;
use crate::surface::{LOGIN_PATH, LoginSurface, Outcome, SurfaceError};

/// Run one submission through a fresh surface.
///
/// A username already holding a permit gets a locked surface and
/// [`SurfaceError::SubmissionInFlight`]; the authenticator is not called.
async fn run_submission(state: &AppState, candidate: Credential) -> (LoginSurface, Result<Outcome, SurfaceError>) {
    let username = candidate.username.clone();
    let _permit = match state.submissions.try_acquire(&username) {
        Ok(permit) => permit,
        Err(e) => {
            warn!(%username, error = %e, "login submission refused");
            return (LoginSurface::locked(candidate), Err(e));
        }
    };

    let mut surface = LoginSurface::with_input(candidate);
    let outcome = surface
        .submit(state.authenticator.as_ref(), state.auth_timeout)
        .await;

    let surface_state = surface.state();
    match &outcome {
        Ok(Outcome::Redirect(to)) => info!(%username, ?surface_state, destination = *to, "login succeeded"),
        Ok(Outcome::ShowError(reason)) => warn!(%username, ?surface_state, %reason, "login rejected"),
        Err(e) => warn!(%username, ?surface_state, error = %e, "login submission refused"),
    }

    (surface, outcome)
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /login` — empty form with the "Login" heading.
pub async fn login_form() -> Response {
    pages::login_page(&LoginSurface::new().view()).into_response()
}

/// `POST /login` — 303 to `/todos` on success, otherwise re-render with the error.
///
/// A duplicate submit for a username still being checked gets 409 and the
/// form with its button disabled.
pub async fn login_submit(State(state): State<AppState>, Form(candidate): Form<Credential>) -> Response {
    let (surface, outcome) = run_submission(&state, candidate).await;
    match outcome {
        Ok(Outcome::Redirect(to)) => Redirect::to(to).into_response(),
        Ok(Outcome::ShowError(_)) => pages::login_page(&surface.view()).into_response(),
        Err(_) => (StatusCode::CONFLICT, pages::login_page(&surface.view())).into_response(),
    }
}

/// `POST /api/auth/login` — JSON verdict: `{"redirect"}` or 401 `{"error"}`.
pub async fn api_login(State(state): State<AppState>, Json(candidate): Json<Credential>) -> Response {
    let (_, outcome) = run_submission(&state, candidate).await;
    match outcome {
        Ok(Outcome::Redirect(to)) => Json(serde_json::json!({ "redirect": to })).into_response(),
        Ok(Outcome::ShowError(reason)) => {
            (StatusCode::UNAUTHORIZED, Json(serde_json::json!({ "error": reason }))).into_response()
        }
        Err(e) => (StatusCode::CONFLICT, Json(serde_json::json!({ "error": e.to_string() }))).into_response(),
    }
}

/// `GET /logout` — nothing to tear down; back to the form.
pub async fn logout() -> Redirect {
    Redirect::to(LOGIN_PATH)
}

#[cfg(test)]
#[path = "login_test.rs"]
mod tests;
