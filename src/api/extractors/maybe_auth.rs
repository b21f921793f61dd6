use axum::{
    extract::{FromRequestParts, FromRef},
    http::request::Parts,
};
use crate::state::AppState;
use crate::api::extractors::auth::{bearer_token, verify_token};
use crate::error::AppError;
use std::sync::Arc;
use tracing::Span;

/// Subject of a verified bearer token; a missing or invalid token is a guest.
/// The id is not looked up here.
pub struct MaybeAuthUser(pub Option<String>);

impl<S> FromRequestParts<S> for MaybeAuthUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);

        let Some(claims) = bearer_token(parts)
            .and_then(|t| verify_token(t, &app_state.config.jwt_secret))
        else {
            return Ok(MaybeAuthUser(None));
        };

        Span::current().record("user_id", &claims.sub);
        Ok(MaybeAuthUser(Some(claims.sub)))
    }
}
