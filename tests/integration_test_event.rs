mod common;

use common::{parse_body, TestApp};
use serde_json::json;

const FUTURE: &str = "2099-06-01T12:00:00Z";

async fn book_n(app: &TestApp, event_id: &str, n: usize) {
    for i in 0..n {
        let res = app.request("POST", "/api/bookings", None, Some(json!({
            "eventId": event_id,
            "numberOfSeats": 1,
            "emailForBooking": format!("guest{}@example.com", i),
            "phoneForBooking": "+250788000000"
        }))).await;
        assert_eq!(res.status(), 201);
    }
}

#[tokio::test]
async fn test_remaining_seats_reflect_bookings() {
    let app = TestApp::new().await;
    let (_, company_id, ca_token) = app.seed_company("acme@example.com", "ada@example.com").await;
    let event_id = app.create_event(&ca_token, 10, FUTURE).await;
    book_n(&app, &event_id, 3).await;

    let res = app.request("GET", &format!("/api/event/{}", event_id), None, None).await;
    assert_eq!(res.status(), 200);
    let body = parse_body(res).await;
    let data = &body["data"];
    assert_eq!(data["availableSeats"], 10);
    assert_eq!(data["numberOfBookings"], 3);
    assert_eq!(data["remainingSeats"], 7);
    assert_eq!(data["bookings"].as_array().unwrap().len(), 3);
    assert_eq!(data["company"]["id"], company_id.as_str());
    assert_eq!(data["isAcceptingBooking"], true);
}

#[tokio::test]
async fn test_remaining_seats_can_go_negative() {
    let app = TestApp::new().await;
    let (_, _, ca_token) = app.seed_company("acme@example.com", "ada@example.com").await;
    let event_id = app.create_event(&ca_token, 10, FUTURE).await;
    book_n(&app, &event_id, 11).await;

    let res = app.request("GET", &format!("/api/event/{}", event_id), None, None).await;
    let body = parse_body(res).await;
    assert_eq!(body["data"]["numberOfBookings"], 11);
    assert_eq!(body["data"]["remainingSeats"], -1);
}

#[tokio::test]
async fn test_list_events_and_my_events() {
    let app = TestApp::new().await;
    let (admin_token, _, ca_token) = app.seed_company("acme@example.com", "ada@example.com").await;
    let mine = app.create_event(&ca_token, 5, FUTURE).await;
    book_n(&app, &mine, 2).await;

    // A second company with its own event.
    let res = app.request("POST", "/api/company", Some(&admin_token), Some(json!({
        "company": { "name": "Globex", "email": "globex@example.com" },
        "contactPerson": { "firstName": "Hank", "lastName": "Scorpio", "email": "hank@example.com" }
    }))).await;
    assert_eq!(res.status(), 201);
    let other_contact = parse_body(res).await["data"]["contactPerson"]["id"].as_str().unwrap().to_string();
    app.create_event(&app.token_for(&other_contact), 5, FUTURE).await;

    let res = app.request("GET", "/api/event", None, None).await;
    assert_eq!(res.status(), 200);
    let body = parse_body(res).await;
    let all = body["data"].as_array().unwrap();
    assert_eq!(all.len(), 2);
    let listed = all.iter().find(|e| e["id"] == mine.as_str()).unwrap();
    assert_eq!(listed["remainingSeats"], 3);
    assert!(listed["company"].is_object());

    let res = app.request("GET", "/api/event/my", Some(&ca_token), None).await;
    assert_eq!(res.status(), 200);
    let body = parse_body(res).await;
    let my = body["data"].as_array().unwrap();
    assert_eq!(my.len(), 1);
    assert_eq!(my[0]["id"], mine.as_str());
    assert_eq!(my[0]["numberOfBookings"], 2);
    assert!(my[0].get("company").is_none());
}

#[tokio::test]
async fn test_partial_update_keeps_other_fields() {
    let app = TestApp::new().await;
    let (_, _, ca_token) = app.seed_company("acme@example.com", "ada@example.com").await;
    let event_id = app.create_event(&ca_token, 10, FUTURE).await;
    let uri = format!("/api/event/{}", event_id);

    let res = app.request("PUT", &uri, None, Some(json!({ "title": "Renamed", "availableSeats": 20 }))).await;
    assert_eq!(res.status(), 200);
    let body = parse_body(res).await;
    assert_eq!(body["data"]["title"], "Renamed");
    assert_eq!(body["data"]["availableSeats"], 20);
    assert_eq!(body["data"]["location"], "Kigali");
}

#[tokio::test]
async fn test_delete_event_removes_its_bookings() {
    let app = TestApp::new().await;
    let (_, _, ca_token) = app.seed_company("acme@example.com", "ada@example.com").await;
    let event_id = app.create_event(&ca_token, 10, FUTURE).await;
    book_n(&app, &event_id, 2).await;
    let uri = format!("/api/event/{}", event_id);

    let res = app.request("DELETE", &uri, None, None).await;
    assert_eq!(res.status(), 200);
    assert_eq!(parse_body(res).await["message"], "Event deleted successfully");

    assert_eq!(app.request("GET", &uri, None, None).await.status(), 404);

    let orphans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE event_id = ?")
        .bind(&event_id)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(orphans, 0);
}

#[tokio::test]
async fn test_missing_event_is_404_everywhere() {
    let app = TestApp::new().await;
    let (_, _, ca_token) = app.seed_company("acme@example.com", "ada@example.com").await;
    let uri = "/api/event/does-not-exist";

    let res = app.request("GET", uri, None, None).await;
    assert_eq!(res.status(), 404);
    let body = parse_body(res).await;
    assert_eq!(body["statusCode"], 404);
    assert_eq!(body["message"], "Event not found");

    assert_eq!(app.request("PUT", uri, None, Some(json!({ "title": "x" }))).await.status(), 404);
    assert_eq!(app.request("DELETE", uri, None, None).await.status(), 404);
    assert_eq!(app.request("GET", "/api/event/does-not-exist/is-accepting-bookings", None, None).await.status(), 404);
    assert_eq!(
        app.request(
            "PUT",
            "/api/event/does-not-exist/set-accepting-bookings",
            Some(&ca_token),
            Some(json!({ "isAcceptingBooking": false })),
        ).await.status(),
        404
    );
}

#[tokio::test]
async fn test_accepting_bookings_toggle() {
    let app = TestApp::new().await;
    let (_, _, ca_token) = app.seed_company("acme@example.com", "ada@example.com").await;
    let event_id = app.create_event(&ca_token, 10, FUTURE).await;
    let read_uri = format!("/api/event/{}/is-accepting-bookings", event_id);
    let write_uri = format!("/api/event/{}/set-accepting-bookings", event_id);

    let res = app.request("GET", &read_uri, None, None).await;
    assert_eq!(parse_body(res).await["data"]["isAcceptingBooking"], true);

    let res = app.request("PUT", &write_uri, Some(&ca_token), Some(json!({ "isAcceptingBooking": false }))).await;
    assert_eq!(res.status(), 200);

    let res = app.request("GET", &read_uri, None, None).await;
    assert_eq!(parse_body(res).await["data"]["isAcceptingBooking"], false);

    // Only company admins may flip the gate.
    let user_id = app.create_user("bob@example.com", "USER").await;
    let res = app.request("PUT", &write_uri, Some(&app.token_for(&user_id)), Some(json!({ "isAcceptingBooking": true }))).await;
    assert_eq!(res.status(), 403);
}

#[tokio::test]
async fn test_negative_seats_rejected() {
    let app = TestApp::new().await;
    let (_, _, ca_token) = app.seed_company("acme@example.com", "ada@example.com").await;

    let res = app.request("POST", "/api/event", Some(&ca_token), Some(json!({
        "title": "Broken",
        "location": "Nowhere",
        "description": "-",
        "bookingDeadline": FUTURE,
        "availableSeats": -1
    }))).await;
    assert_eq!(res.status(), 400);
}
