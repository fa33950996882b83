use super::test_support::{no_redirect_client, spawn_app};

#[tokio::test]
async fn healthz_returns_ok() {
    let base = spawn_app().await;
    let resp = reqwest::get(format!("{base}/healthz")).await.unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn root_redirects_to_login() {
    let base = spawn_app().await;
    let resp = no_redirect_client().get(format!("{base}/")).send().await.unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(resp.headers()["location"], "/login");
}

#[tokio::test]
async fn root_lands_on_login_page_when_followed() {
    let base = spawn_app().await;
    let resp = reqwest::get(format!("{base}/")).await.unwrap();
    assert_eq!(resp.url().path(), "/login");
    assert!(resp.text().await.unwrap().contains("<h1>Login</h1>"));
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let base = spawn_app().await;
    let resp = reqwest::get(format!("{base}/nope")).await.unwrap();
    assert_eq!(resp.status(), 404);
}
