use axum::{
    extract::{FromRequestParts, FromRef},
    http::{header::AUTHORIZATION, request::Parts},
};
use crate::state::AppState;
use crate::domain::models::auth::Claims;
use crate::domain::models::user::{Actor, Role};
use crate::error::AppError;
use std::sync::Arc;
use jsonwebtoken::{decode, DecodingKey, Validation, Algorithm};
use tracing::{debug, Span};

pub struct AuthUser(pub Actor);

impl AuthUser {
    pub fn require_any(&self, allowed: &[Role]) -> Result<(), AppError> {
        if self.0.has_any_role(allowed) {
            Ok(())
        } else {
            Err(AppError::Forbidden("Insufficient role".into()))
        }
    }

    /// Company id of the caller's membership.
    pub fn require_company(&self) -> Result<String, AppError> {
        self.0.company_id()
            .map(str::to_string)
            .ok_or(AppError::Forbidden("You are not assigned to any company".into()))
    }
}

pub(crate) fn bearer_token(parts: &Parts) -> Option<&str> {
    parts.headers.get(AUTHORIZATION)?
        .to_str().ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

pub(crate) fn verify_token(token: &str, secret: &str) -> Option<Claims> {
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::new(Algorithm::HS256);
    match decode::<Claims>(token, &decoding_key, &validation) {
        Ok(data) => Some(data.claims),
        Err(e) => {
            debug!("Rejected bearer token: {}", e);
            None
        }
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);

        let token = bearer_token(parts).ok_or(AppError::Unauthorized)?;
        let claims = verify_token(token, &app_state.config.jwt_secret)
            .ok_or(AppError::Unauthorized)?;

        let actor = app_state.user_service.resolve_actor(&claims.sub).await?
            .ok_or(AppError::Unauthorized)?;

        Span::current().record("user_id", &actor.user.id);

        Ok(AuthUser(actor))
    }
}
