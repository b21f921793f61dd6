use serde::{Deserialize, Serialize};

/// Bearer token claims. Tokens are minted by the identity provider in front
/// of this service; only `sub` (the user id) is trusted, roles and company
/// membership are always re-read from the store.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    #[serde(default)]
    pub iat: usize,
}
