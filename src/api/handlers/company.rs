use axum::{extract::State, response::IntoResponse};
use crate::api::extractors::envelope::{AppJson, AppPath};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::{CreateCompanyRequest, UpdateCompanyRequest};
use crate::api::dtos::responses::ApiResponse;
use crate::domain::models::user::Role;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn list_companies(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    auth.require_any(&[Role::Admin])?;
    let companies = state.company_service.get_companies().await?;
    Ok(ApiResponse::ok("Companies fetched successfully", companies))
}

pub async fn create_company(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    AppJson(payload): AppJson<CreateCompanyRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth.require_any(&[Role::Admin])?;
    let (company, contact) = payload.into_parts();
    let created = state.company_service.create_company(company, contact).await?;
    info!("Company {} created by {}", created.company.id, auth.0.user.id);
    Ok(ApiResponse::created("Company Created Successfully!!", created))
}

pub async fn get_company(
    State(state): State<Arc<AppState>>,
    AppPath(id): AppPath<String>,
) -> Result<impl IntoResponse, AppError> {
    let details = state.company_service.get_company(&id).await?;
    Ok(ApiResponse::ok("Company fetched successfully", details))
}

pub async fn update_company(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    AppPath(id): AppPath<String>,
    AppJson(payload): AppJson<UpdateCompanyRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth.require_any(&[Role::Admin])?;
    let company = state.company_service.update_company(&id, payload.into()).await?;
    Ok(ApiResponse::ok("Company updated successfully", company))
}

pub async fn delete_company(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    AppPath(id): AppPath<String>,
) -> Result<impl IntoResponse, AppError> {
    auth.require_any(&[Role::Admin])?;
    state.company_service.delete_company(&id).await?;
    info!("Company {} deleted by {}", id, auth.0.user.id);
    Ok(ApiResponse::message("Company deleted successfully"))
}

pub async fn count_by_month(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    AppPath(year): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    auth.require_any(&[Role::Admin])?;
    let counts = state.company_service.count_by_month(year).await?;
    Ok(ApiResponse::ok("Company count by month fetched successfully", counts))
}
