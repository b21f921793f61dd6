pub mod auth;
pub mod envelope;
pub mod maybe_auth;
