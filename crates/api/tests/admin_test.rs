mod common;

use axum::http::StatusCode;
use common::{bearer, TestContext, ADMIN_EMAIL, ADMIN_PASSWORD};
use klawed_core::models::admin::{LoginResponse, LogoutResponse};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

async fn login(server: &axum_test::TestServer) -> LoginResponse {
    server
        .post("/api/admin/login")
        .json(&json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }))
        .await
        .json::<LoginResponse>()
}

#[tokio::test]
async fn test_login_issues_session() {
    let (server, state) = TestContext::new().server();

    let response = login(&server).await;

    assert_eq!(response.token.len(), 48);
    assert_eq!(response.user.email, ADMIN_EMAIL);
    assert!(response.user.is_admin);
    assert!(state.sessions.get(&response.token).await.is_some());
}

#[tokio::test]
async fn test_login_ignores_email_case() {
    let (server, _) = TestContext::new().server();

    let response = server
        .post("/api/admin/login")
        .json(&json!({ "email": ADMIN_EMAIL.to_uppercase(), "password": ADMIN_PASSWORD }))
        .await;

    response.assert_status(StatusCode::OK);
}

#[rstest]
#[case(ADMIN_EMAIL, "wrong-password")]
#[case("someone@example.com", ADMIN_PASSWORD)]
#[tokio::test]
async fn test_bad_credentials_are_refused(#[case] email: &str, #[case] password: &str) {
    let (server, _) = TestContext::new().server();

    let response = server
        .post("/api/admin/login")
        .json(&json!({ "email": email, "password": password }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[rstest]
#[case("/api/admin/appointments")]
#[case("/api/admin/inquiries")]
#[case("/api/admin/dashboard")]
#[tokio::test]
async fn test_admin_views_need_a_token(#[case] path: &str) {
    let (server, _) = TestContext::new().server();

    server
        .get(path)
        .expect_failure()
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let (name, value) = bearer("not-a-session");
    server
        .get(path)
        .add_header(name, value)
        .expect_failure()
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_ends_session() {
    let (server, state) = TestContext::new().server();
    let session = login(&server).await;

    let (name, value) = bearer(&session.token);
    let body = server
        .post("/api/admin/logout")
        .add_header(name.clone(), value.clone())
        .await
        .json::<LogoutResponse>();

    assert!(body.logged_out);
    assert!(state.sessions.get(&session.token).await.is_none());

    server
        .post("/api/admin/logout")
        .add_header(name, value)
        .expect_failure()
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_gallery_admin_validates_before_writing() {
    let (server, _) = TestContext::new().server();
    let session = login(&server).await;
    let (name, value) = bearer(&session.token);

    let response = server
        .post("/api/admin/gallery")
        .add_header(name, value)
        .json(&json!({ "title": "" }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["errors"]["title"], "Title is required");
    assert_eq!(body["errors"]["url"], "Please upload an image");
}

#[tokio::test]
async fn test_unknown_status_filter_is_rejected_after_auth() {
    let (server, _) = TestContext::new().server();
    let session = login(&server).await;
    let (name, value) = bearer(&session.token);

    server
        .get("/api/admin/inquiries")
        .add_query_param("status", "Archived")
        .add_header(name, value)
        .expect_failure()
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
