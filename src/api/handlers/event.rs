use axum::{extract::State, response::IntoResponse};
use crate::api::extractors::envelope::{AppJson, AppPath};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::{CreateEventRequest, SetAcceptingBookingRequest, UpdateEventRequest};
use crate::api::dtos::responses::{AcceptingBookingResponse, ApiResponse};
use crate::domain::models::user::Role;
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use tracing::info;

const COMPANY_ROLES: &[Role] = &[Role::CompanyAdmin, Role::CompanyUser];

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    AppJson(payload): AppJson<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth.require_any(COMPANY_ROLES)?;
    let company_id = auth.require_company()?;

    let event = state.event_service.create_event(&company_id, payload.into()).await?;
    info!("Event {} created for company {}", event.id, company_id);
    Ok(ApiResponse::created("Event created successfully", event))
}

pub async fn list_events(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let events = state.event_service.get_all_events().await?;
    Ok(ApiResponse::ok("Events fetched successfully", events))
}

pub async fn list_my_events(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    auth.require_any(COMPANY_ROLES)?;
    let company_id = auth.require_company()?;

    let events = state.event_service.get_events_for_company(&company_id).await?;
    Ok(ApiResponse::ok("Events fetched successfully", events))
}

pub async fn get_event(
    State(state): State<Arc<AppState>>,
    AppPath(id): AppPath<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_service.get_event(&id).await?;
    Ok(ApiResponse::ok("Event fetched successfully", event))
}

pub async fn update_event(
    State(state): State<Arc<AppState>>,
    AppPath(id): AppPath<String>,
    AppJson(payload): AppJson<UpdateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_service.update_event(&id, payload.into()).await?;
    Ok(ApiResponse::ok("Event updated successfully", event))
}

pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    AppPath(id): AppPath<String>,
) -> Result<impl IntoResponse, AppError> {
    state.event_service.delete_event(&id).await?;
    info!("Event {} deleted", id);
    Ok(ApiResponse::message("Event deleted successfully"))
}

pub async fn set_accepting_booking(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    AppPath(id): AppPath<String>,
    AppJson(payload): AppJson<SetAcceptingBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth.require_any(&[Role::CompanyAdmin])?;
    state.event_service.set_accepting_booking(&id, payload.is_accepting_booking).await?;
    Ok(ApiResponse::ok(
        "Event booking status updated successfully",
        AcceptingBookingResponse { is_accepting_booking: payload.is_accepting_booking },
    ))
}

pub async fn is_accepting_booking(
    State(state): State<Arc<AppState>>,
    AppPath(id): AppPath<String>,
) -> Result<impl IntoResponse, AppError> {
    let flag = state.event_service.is_accepting_booking(&id).await?;
    Ok(ApiResponse::ok(
        "Event booking status fetched successfully",
        AcceptingBookingResponse { is_accepting_booking: flag },
    ))
}

pub async fn count_by_month(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    AppPath(year): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    auth.require_any(&[Role::Admin])?;
    let counts = state.event_service.count_by_month(year, None).await?;
    Ok(ApiResponse::ok("Event count by month fetched successfully", counts))
}

pub async fn company_count_by_month(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    AppPath(year): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    auth.require_any(&[Role::CompanyAdmin])?;
    let company_id = auth.require_company()?;

    let counts = state.event_service.count_by_month(year, Some(&company_id)).await?;
    Ok(ApiResponse::ok("Company event count by month fetched successfully", counts))
}

pub async fn finished_count_by_month(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    AppPath(year): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    auth.require_any(&[Role::CompanyAdmin])?;
    let company_id = auth.require_company()?;

    let counts = state.event_service.finished_count_by_month(&company_id, year, Utc::now()).await?;
    Ok(ApiResponse::ok("Finished event count by month fetched successfully", counts))
}
