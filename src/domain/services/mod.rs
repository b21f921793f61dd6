pub mod aggregation;
pub mod booking_service;
pub mod company_service;
pub mod event_service;
pub mod password;
pub mod user_service;
pub mod validation;
