use axum::{extract::State, response::IntoResponse};
use crate::api::extractors::envelope::{AppJson, AppPath};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::{ForgotPasswordRequest, ResetPasswordRequest, SignUpRequest};
use crate::api::dtos::responses::ApiResponse;
use crate::domain::models::user::Role;
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use tracing::info;

pub async fn list_users(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    auth.require_any(&[Role::Admin])?;
    let users = state.user_service.get_users().await?;
    Ok(ApiResponse::ok("Users fetched successfully", users))
}

pub async fn sign_up(
    State(state): State<Arc<AppState>>,
    AppJson(payload): AppJson<SignUpRequest>,
) -> Result<impl IntoResponse, AppError> {
    let profile = state.user_service.sign_up(payload.into()).await?;
    Ok(ApiResponse::created("User created successfully", profile))
}

pub async fn forgot_password(
    State(state): State<Arc<AppState>>,
    AppJson(payload): AppJson<ForgotPasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.user_service.request_password_reset(&payload.email).await?;
    Ok(ApiResponse::message("OTP sent to your email"))
}

pub async fn reset_password(
    State(state): State<Arc<AppState>>,
    AppJson(payload): AppJson<ResetPasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.user_service
        .reset_password(&payload.email, &payload.otp, &payload.new_password, Utc::now())
        .await?;
    Ok(ApiResponse::message("Password reset successfully"))
}

pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    AppPath(id): AppPath<String>,
) -> Result<impl IntoResponse, AppError> {
    auth.require_any(&[Role::Admin])?;
    state.user_service.delete_user(&id).await?;
    info!("User {} deleted by {}", id, auth.0.user.id);
    Ok(ApiResponse::message("User deleted successfully"))
}

pub async fn count_by_month(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    AppPath(year): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    auth.require_any(&[Role::Admin])?;
    let counts = state.user_service.count_by_month(year).await?;
    Ok(ApiResponse::ok("User count by month fetched successfully", counts))
}
