mod common;

use common::{parse_body, TestApp};
use serde_json::{json, Value};

fn company_payload(email: &str, phone: &str, contact_email: &str) -> Value {
    json!({
        "company": { "name": "Acme", "address": "KN 5 Rd", "email": email, "phoneNumber": phone },
        "contactPerson": { "firstName": "Ada", "lastName": "Admin", "email": contact_email, "phoneNumber": "+250788111111" }
    })
}

async fn admin_token(app: &TestApp) -> String {
    let admin_id = app.create_user("root@example.com", "ADMIN").await;
    app.token_for(&admin_id)
}

#[tokio::test]
async fn test_create_company_opens_contact_account() {
    let app = TestApp::new().await;
    let token = admin_token(&app).await;

    let res = app.request("POST", "/api/company", Some(&token), Some(company_payload("acme@example.com", "+250788000001", "ada@example.com"))).await;
    assert_eq!(res.status(), 201);
    let body = parse_body(res).await;
    assert_eq!(body["statusCode"], 201);
    assert_eq!(body["message"], "Company Created Successfully!!");
    assert_eq!(body["data"]["company"]["email"], "acme@example.com");
    assert_eq!(body["data"]["contactPerson"]["role"], "COMPANY_ADMIN");
    assert_eq!(body["data"]["contactSecret"].as_str().unwrap().len(), 16);

    let contact_id = body["data"]["contactPerson"]["id"].as_str().unwrap();
    let roles: Vec<String> = sqlx::query_scalar("SELECT role FROM user_roles WHERE user_id = ?")
        .bind(contact_id)
        .fetch_all(&app.pool)
        .await
        .unwrap();
    assert_eq!(roles, vec!["COMPANY_ADMIN".to_string()]);
}

#[tokio::test]
async fn test_existing_user_becomes_contact() {
    let app = TestApp::new().await;
    let token = admin_token(&app).await;
    let existing = app.create_user("ada@example.com", "USER").await;

    let res = app.request("POST", "/api/company", Some(&token), Some(company_payload("acme@example.com", "", "ada@example.com"))).await;
    assert_eq!(res.status(), 201);
    let body = parse_body(res).await;
    assert_eq!(body["data"]["contactPerson"]["id"], existing.as_str());
    assert!(body["data"].get("contactSecret").is_none());

    let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
        .bind("ada@example.com")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(users, 1);
}

#[tokio::test]
async fn test_duplicate_company_email_reports_one_field() {
    let app = TestApp::new().await;
    let token = admin_token(&app).await;

    let res = app.request("POST", "/api/company", Some(&token), Some(company_payload("a@x.com", "+250788000001", "one@example.com"))).await;
    assert_eq!(res.status(), 201);

    let res = app.request("POST", "/api/company", Some(&token), Some(company_payload("a@x.com", "+250788000002", "two@example.com"))).await;
    assert_eq!(res.status(), 400);
    let body = parse_body(res).await;
    assert_eq!(body["statusCode"], 400);
    assert_eq!(body["error"], json!([{ "field": "company.email", "error": "Email used by other company" }]));

    // Nothing from the rejected request was stored.
    let contacts: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
        .bind("two@example.com")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(contacts, 0);
}

#[tokio::test]
async fn test_duplicate_email_and_phone_report_both_fields() {
    let app = TestApp::new().await;
    let token = admin_token(&app).await;

    app.request("POST", "/api/company", Some(&token), Some(company_payload("a@x.com", "+250788000001", "one@example.com"))).await;

    let res = app.request("POST", "/api/company", Some(&token), Some(company_payload("a@x.com", "+250788000001", "two@example.com"))).await;
    assert_eq!(res.status(), 400);
    let body = parse_body(res).await;
    let fields: Vec<&str> = body["error"].as_array().unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["company.email", "company.phoneNumber"]);
}

#[tokio::test]
async fn test_companies_without_phone_do_not_collide() {
    let app = TestApp::new().await;
    let token = admin_token(&app).await;

    let first = app.request("POST", "/api/company", Some(&token), Some(company_payload("a@x.com", "", "one@example.com"))).await;
    let second = app.request("POST", "/api/company", Some(&token), Some(company_payload("b@x.com", "", "two@example.com"))).await;
    assert_eq!(first.status(), 201);
    assert_eq!(second.status(), 201);
}

#[tokio::test]
async fn test_get_company_includes_contact_person() {
    let app = TestApp::new().await;
    let (_, company_id, _) = app.seed_company("acme@example.com", "ada@example.com").await;

    let res = app.request("GET", &format!("/api/company/{}", company_id), None, None).await;
    assert_eq!(res.status(), 200);
    let body = parse_body(res).await;
    assert_eq!(body["data"]["company"]["id"], company_id.as_str());
    assert_eq!(body["data"]["contactPerson"]["email"], "ada@example.com");
    assert_eq!(body["data"]["contactPerson"]["firstName"], "Ada");
    assert_eq!(body["data"]["contactPerson"]["role"], "COMPANY_ADMIN");
}

#[tokio::test]
async fn test_missing_company_is_404() {
    let app = TestApp::new().await;
    let token = admin_token(&app).await;

    let res = app.request("GET", "/api/company/does-not-exist", None, None).await;
    assert_eq!(res.status(), 404);
    let body = parse_body(res).await;
    assert_eq!(body["statusCode"], 404);
    assert_eq!(body["message"], "No Company found");

    let res = app.request("PUT", "/api/company/does-not-exist", Some(&token), Some(json!({ "company": { "name": "x" } }))).await;
    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn test_update_company_is_partial() {
    let app = TestApp::new().await;
    let (admin, company_id, _) = app.seed_company("acme@example.com", "ada@example.com").await;

    let res = app.request("PUT", &format!("/api/company/{}", company_id), Some(&admin), Some(json!({
        "company": { "address": "KG 7 Ave" }
    }))).await;
    assert_eq!(res.status(), 200);
    let body = parse_body(res).await;
    assert_eq!(body["data"]["address"], "KG 7 Ave");
    assert_eq!(body["data"]["name"], "Acme");
    assert_eq!(body["data"]["email"], "acme@example.com");
}

#[tokio::test]
async fn test_list_companies() {
    let app = TestApp::new().await;
    let (admin, _, _) = app.seed_company("acme@example.com", "ada@example.com").await;

    let res = app.request("GET", "/api/company", Some(&admin), None).await;
    assert_eq!(res.status(), 200);
    assert_eq!(parse_body(res).await["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_company_removes_dependents() {
    let app = TestApp::new().await;
    let (admin, company_id, ca_token) = app.seed_company("acme@example.com", "ada@example.com").await;
    let event_id = app.create_event(&ca_token, 10, "2099-01-01T00:00:00Z").await;
    let res = app.request("POST", "/api/bookings", None, Some(json!({
        "eventId": event_id,
        "numberOfSeats": 1,
        "emailForBooking": "guest@example.com",
        "phoneForBooking": "+250788000000"
    }))).await;
    assert_eq!(res.status(), 201);

    let uri = format!("/api/company/{}", company_id);
    let res = app.request("DELETE", &uri, Some(&admin), None).await;
    assert_eq!(res.status(), 200);
    assert_eq!(parse_body(res).await["message"], "Company deleted successfully");

    assert_eq!(app.request("GET", &uri, None, None).await.status(), 404);
    assert_eq!(app.request("GET", &format!("/api/event/{}", event_id), None, None).await.status(), 404);

    for table in ["bookings", "events", "company_users"] {
        let rows: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&app.pool)
            .await
            .unwrap();
        assert_eq!(rows, 0, "{} not cleared", table);
    }

    // The contact keeps their account.
    let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
        .bind("ada@example.com")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(users, 1);
}

#[tokio::test]
async fn test_delete_missing_company_is_404() {
    let app = TestApp::new().await;
    let token = admin_token(&app).await;

    let res = app.request("DELETE", "/api/company/does-not-exist", Some(&token), None).await;
    assert_eq!(res.status(), 404);
    let body = parse_body(res).await;
    assert_eq!(body["statusCode"], 404);
    assert_eq!(body["message"], "No Company found");
}

#[tokio::test]
async fn test_update_to_taken_phone_rejected() {
    let app = TestApp::new().await;
    let token = admin_token(&app).await;

    app.request("POST", "/api/company", Some(&token), Some(company_payload("a@x.com", "+250788000001", "one@example.com"))).await;
    let res = app.request("POST", "/api/company", Some(&token), Some(company_payload("b@x.com", "+250788000002", "two@example.com"))).await;
    let second_id = parse_body(res).await["data"]["company"]["id"].as_str().unwrap().to_string();
    let uri = format!("/api/company/{}", second_id);

    let res = app.request("PUT", &uri, Some(&token), Some(json!({ "company": { "phoneNumber": "+250788000001" } }))).await;
    assert_eq!(res.status(), 400);
    assert_eq!(
        parse_body(res).await["error"],
        json!([{ "field": "company.phoneNumber", "error": "Phone number used by other company" }])
    );

    // Re-sending its own phone is not a clash.
    let res = app.request("PUT", &uri, Some(&token), Some(json!({ "company": { "phoneNumber": "+250788000002", "name": "Beta" } }))).await;
    assert_eq!(res.status(), 200);
    assert_eq!(parse_body(res).await["data"]["name"], "Beta");
}
