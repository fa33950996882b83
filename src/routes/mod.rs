//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the HTML login flow, its JSON twin under `/api`, the post-login
//! landing page and a health probe under a single Axum router. Every
//! request passes through `TraceLayer`.

pub mod login;
pub mod todos;

use axum::Router;
use axum::http::StatusCode;
use axum::response::Redirect;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::surface::{LOGIN_PATH, TODOS_PATH};

/// Build the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route(LOGIN_PATH, get(login::login_form).post(login::login_submit))
        .route("/logout", get(login::logout))
        .route("/api/auth/login", post(login::api_login))
        .route(TODOS_PATH, get(todos::todos))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn home() -> Redirect {
    Redirect::to(LOGIN_PATH)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}


#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
