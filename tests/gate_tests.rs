use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use tower::ServiceExt;
use wolfe_site::{
    config::AppConfig,
    create_router,
    gate::{GATE_COOKIE, issue_gate_token},
};

mod common;
use common::{MockRepo, TEST_STAFF_ID, create_test_state};

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_gated_path_redirects_to_gate_with_next() {
    let app = create_router(create_test_state(MockRepo::default()));
    let response = app.oneshot(get("/news/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response.headers().get(header::LOCATION).unwrap();
    assert_eq!(location, "/gate/?next=/news/");
}

#[tokio::test]
async fn test_exempt_paths_bypass_gate() {
    for uri in ["/health", "/gate/"] {
        let app = create_router(create_test_state(MockRepo::default()));
        let response = app.oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{} should be exempt", uri);
    }
}

#[tokio::test]
async fn test_valid_gate_cookie_passes() {
    let app = create_router(create_test_state(MockRepo::default()));
    let token = issue_gate_token(&AppConfig::default());

    let request = Request::builder()
        .uri("/news/")
        .header(header::COOKIE, format!("{}={}", GATE_COOKIE, token))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_stale_version_cookie_redirects() {
    // Token issued under v0; the running config expects v1.
    let mut old_config = AppConfig::default();
    old_config.gate_version = "v0".to_string();
    let token = issue_gate_token(&old_config);

    let app = create_router(create_test_state(MockRepo::default()));
    let request = Request::builder()
        .uri("/news/")
        .header(header::COOKIE, format!("{}={}", GATE_COOKIE, token))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_staff_header_bypasses_gate_locally() {
    let app = create_router(create_test_state(MockRepo::default()));
    let request = Request::builder()
        .uri("/mission/")
        .header("x-staff-id", TEST_STAFF_ID.to_string())
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

fn gate_post(uri: &str, password: &str, remember: bool) -> Request<Body> {
    let payload = serde_json::json!({ "password": password, "remember": remember });
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&payload).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn test_gate_accept_sets_cookie_and_redirects() {
    let app = create_router(create_test_state(MockRepo::default()));
    let response = app
        .oneshot(gate_post("/gate/?next=/news/", "wolfe-education", false))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/news/"
    );
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("gate cookie must be set")
        .to_str()
        .unwrap();
    assert!(set_cookie.starts_with(GATE_COOKIE));
    // Session cookie: no Max-Age unless remembered.
    assert!(!set_cookie.contains("Max-Age"));
}

#[tokio::test]
async fn test_gate_accept_remember_persists_cookie() {
    let app = create_router(create_test_state(MockRepo::default()));
    let response = app
        .oneshot(gate_post("/gate/", "wolfe-education", true))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(set_cookie.contains("Max-Age=86400"));
}

#[tokio::test]
async fn test_gate_accept_rejects_wrong_password() {
    let app = create_router(create_test_state(MockRepo::default()));
    let response = app
        .oneshot(gate_post("/gate/", "not-the-password", false))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_gate_accept_sanitizes_offsite_next() {
    let app = create_router(create_test_state(MockRepo::default()));
    let response = app
        .oneshot(gate_post(
            "/gate/?next=//evil.example/phish",
            "wolfe-education",
            false,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");
}

#[tokio::test]
async fn test_gate_logout_clears_cookie() {
    let app = create_router(create_test_state(MockRepo::default()));
    let response = app.oneshot(get("/gate/logout/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/gate/");
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    // Removal cookie: empty value, epoch expiry.
    assert!(set_cookie.starts_with(GATE_COOKIE));
    assert!(set_cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_admin_subtree_is_exempt_but_requires_auth() {
    let app = create_router(create_test_state(MockRepo::default()));
    // No gate redirect; the bearer-token extractor rejects instead.
    let response = app.oneshot(get("/admin/news")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_accepts_local_staff_header() {
    let app = create_router(create_test_state(MockRepo::default()));
    let request = Request::builder()
        .uri("/admin/news")
        .header("x-staff-id", TEST_STAFF_ID.to_string())
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
