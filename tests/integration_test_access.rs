mod common;

use common::{parse_body, TestApp};
use serde_json::json;

const ADMIN_ROUTES: &[(&str, &str)] = &[
    ("GET", "/api/company"),
    ("GET", "/api/company/count-by-month/2024"),
    ("GET", "/api/event/count-by-month/2024"),
    ("GET", "/api/users"),
    ("GET", "/api/users/count-by-month/2024"),
    ("DELETE", "/api/users/someone"),
];

#[tokio::test]
async fn test_admin_routes_require_token() {
    let app = TestApp::new().await;

    for (method, uri) in ADMIN_ROUTES {
        let res = app.request(method, uri, None, None).await;
        assert_eq!(res.status(), 401, "{} {}", method, uri);
        assert_eq!(parse_body(res).await["statusCode"], 401);
    }
}

#[tokio::test]
async fn test_admin_routes_forbid_plain_users() {
    let app = TestApp::new().await;
    let user_id = app.create_user("bob@example.com", "USER").await;
    let token = app.token_for(&user_id);

    for (method, uri) in ADMIN_ROUTES {
        let res = app.request(method, uri, Some(&token), None).await;
        assert_eq!(res.status(), 403, "{} {}", method, uri);
    }
}

#[tokio::test]
async fn test_invalid_or_orphaned_tokens_rejected() {
    let app = TestApp::new().await;

    let res = app.request("GET", "/api/users", Some("not-a-jwt"), None).await;
    assert_eq!(res.status(), 401);

    // Signed correctly but for a user that does not exist.
    let res = app.request("GET", "/api/users", Some(&app.token_for("ghost")), None).await;
    assert_eq!(res.status(), 401);
}

#[tokio::test]
async fn test_company_admin_without_membership_cannot_create_event() {
    let app = TestApp::new().await;
    let user_id = app.create_user("floating@example.com", "COMPANY_ADMIN").await;
    let token = app.token_for(&user_id);

    let res = app.request("POST", "/api/event", Some(&token), Some(json!({
        "title": "Orphan",
        "location": "Nowhere",
        "description": "-",
        "bookingDeadline": "2099-01-01T00:00:00Z",
        "availableSeats": 3
    }))).await;
    assert_eq!(res.status(), 403);
    let body = parse_body(res).await;
    assert_eq!(body["statusCode"], 403);
    assert_eq!(body["message"], "You are not assigned to any company");

    let res = app.request("GET", "/api/event/my", Some(&token), None).await;
    assert_eq!(res.status(), 403);
}

#[tokio::test]
async fn test_plain_user_cannot_create_event() {
    let app = TestApp::new().await;
    let user_id = app.create_user("bob@example.com", "USER").await;

    let res = app.request("POST", "/api/event", Some(&app.token_for(&user_id)), Some(json!({
        "title": "Nope",
        "location": "Nowhere",
        "description": "-",
        "bookingDeadline": "2099-01-01T00:00:00Z",
        "availableSeats": 3
    }))).await;
    assert_eq!(res.status(), 403);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;
    let res = app.request("GET", "/health", None, None).await;
    assert_eq!(res.status(), 200);
    assert_eq!(parse_body(res).await["status"], "ok");
}
