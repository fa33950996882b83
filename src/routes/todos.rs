//! Post-login landing page. The todo list itself lives elsewhere.

use crate::pages::{self, TodosTemplate};

/// `GET /todos` — landing page reached after a successful login.
pub async fn todos() -> TodosTemplate {
    pages::todos_page()
}
