pub mod auth;
pub mod booking;
pub mod company;
pub mod event;
pub mod user;
