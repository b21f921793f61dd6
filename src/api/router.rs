use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put, delete},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{booking, company, event, health, user};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Companies
        .route("/api/company", get(company::list_companies).post(company::create_company))
        .route("/api/company/count-by-month/{year}", get(company::count_by_month))
        .route("/api/company/{id}", get(company::get_company).put(company::update_company).delete(company::delete_company))

        // Events
        .route("/api/event", get(event::list_events).post(event::create_event))
        .route("/api/event/my", get(event::list_my_events))
        .route("/api/event/count-by-month/{year}", get(event::count_by_month))
        .route("/api/event/company/count-by-month/{year}", get(event::company_count_by_month))
        .route("/api/event/finished/count-by-month/{year}", get(event::finished_count_by_month))
        .route("/api/event/{id}", get(event::get_event).put(event::update_event).delete(event::delete_event))
        .route("/api/event/{id}/set-accepting-bookings", put(event::set_accepting_booking))
        .route("/api/event/{id}/is-accepting-bookings", get(event::is_accepting_booking))

        // Bookings
        .route("/api/bookings", get(booking::list_bookings).post(booking::create_booking))
        .route("/api/bookings/company/count-by-month/{year}", get(booking::company_count_by_month))
        .route("/api/bookings/{id}", get(booking::get_booking).put(booking::update_booking).delete(booking::delete_booking))

        // Users
        .route("/api/users", get(user::list_users))
        .route("/api/users/signup", post(user::sign_up))
        .route("/api/users/forgot-password", post(user::forgot_password))
        .route("/api/users/reset-password", post(user::reset_password))
        .route("/api/users/count-by-month/{year}", get(user::count_by_month))
        .route("/api/users/{id}", delete(user::delete_user))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
