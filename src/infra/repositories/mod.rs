pub mod sqlite_booking_repo;
pub mod sqlite_company_repo;
pub mod sqlite_event_repo;
pub mod sqlite_user_repo;

pub mod postgres_booking_repo;
pub mod postgres_company_repo;
pub mod postgres_event_repo;
pub mod postgres_user_repo;
