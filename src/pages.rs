//! Server-rendered HTML for the login and todos pages.
//!
//! Templates live under `templates/`; askama escapes every interpolated
//! value, including the echoed form inputs.

use askama::Template;
use askama_web::WebTemplate;

use crate::surface::{LOGIN_PATH, SurfaceView};

/// Login form. The `onsubmit` hook disables the button client-side so one
/// click sends one request.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate<'a> {
    heading: &'a str,
    action: &'a str,
    username: &'a str,
    password: &'a str,
    error: Option<&'a str>,
    submit_enabled: bool,
}

/// Landing page reached after a successful login.
#[derive(Template, WebTemplate)]
#[template(path = "todos.html")]
pub struct TodosTemplate {
    logout_path: &'static str,
}

/// Template for the given surface snapshot.
#[must_use]
pub fn login_page<'a>(view: &SurfaceView<'a>) -> LoginTemplate<'a> {
    LoginTemplate {
        heading: view.heading,
        action: LOGIN_PATH,
        username: view.username,
        password: view.password,
        error: view.error,
        submit_enabled: view.submit_enabled,
    }
}

#[must_use]
pub fn todos_page() -> TodosTemplate {
    TodosTemplate { logout_path: "/logout" }
}

#[cfg(test)]
#[path = "pages_test.rs"]
mod tests;
