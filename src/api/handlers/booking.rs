use axum::{extract::State, response::IntoResponse};
use crate::api::extractors::envelope::{AppJson, AppPath};
use crate::state::AppState;
use crate::api::extractors::{auth::AuthUser, maybe_auth::MaybeAuthUser};
use crate::api::dtos::requests::{CreateBookingRequest, UpdateBookingStatusRequest};
use crate::api::dtos::responses::ApiResponse;
use crate::domain::models::user::Role;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    MaybeAuthUser(user_id): MaybeAuthUser,
    AppJson(payload): AppJson<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    info!("create_booking: event {} (authenticated: {})", payload.event_id, user_id.is_some());

    let booking = state.booking_service.create_booking(payload.into(), user_id).await?;
    Ok(ApiResponse::created("Booking created successfully", booking))
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.booking_service.get_all_bookings().await?;
    Ok(ApiResponse::ok("Bookings fetched successfully", bookings))
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    AppPath(id): AppPath<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_service.get_booking_by_id(&id).await?;
    Ok(ApiResponse::ok("Booking fetched successfully", booking))
}

pub async fn update_booking(
    State(state): State<Arc<AppState>>,
    AppPath(id): AppPath<String>,
    AppJson(payload): AppJson<UpdateBookingStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_service.update_booking_status(&id, &payload.status).await?;
    Ok(ApiResponse::ok("Booking updated successfully", booking))
}

pub async fn delete_booking(
    State(state): State<Arc<AppState>>,
    AppPath(id): AppPath<String>,
) -> Result<impl IntoResponse, AppError> {
    state.booking_service.delete_booking(&id).await?;
    Ok(ApiResponse::message("Booking deleted successfully"))
}

pub async fn company_count_by_month(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    AppPath(year): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    auth.require_any(&[Role::CompanyAdmin])?;
    let company_id = auth.require_company()?;

    let counts = state.booking_service.count_by_month(&company_id, year).await?;
    Ok(ApiResponse::ok("Booking count by month fetched successfully", counts))
}
