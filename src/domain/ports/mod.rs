use crate::domain::models::{
    company::{Company, ContactPerson, NewCompanyRegistration},
    event::Event,
    booking::Booking,
    user::{User, Membership},
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait CompanyRepository: Send + Sync {
    async fn register(&self, registration: &NewCompanyRegistration) -> Result<Company, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Company>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Company>, AppError>;
    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<Company>, AppError>;
    async fn list(&self) -> Result<Vec<Company>, AppError>;
    async fn update(&self, company: &Company) -> Result<Company, AppError>;
    async fn find_contact_person(&self, company_id: &str) -> Result<Option<ContactPerson>, AppError>;
    /// Removes the company with its events, their bookings and its memberships in one transaction.
    async fn delete(&self, id: &str) -> Result<(), AppError>;
    async fn created_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<DateTime<Utc>>, AppError>;
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: &Event) -> Result<Event, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError>;
    async fn list(&self) -> Result<Vec<Event>, AppError>;
    async fn list_by_company(&self, company_id: &str) -> Result<Vec<Event>, AppError>;
    async fn update(&self, event: &Event) -> Result<Event, AppError>;
    async fn set_accepting_booking(&self, id: &str, flag: bool) -> Result<(), AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
    async fn created_between(&self, company_id: Option<&str>, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<DateTime<Utc>>, AppError>;
    async fn deadlines_between(&self, company_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<DateTime<Utc>>, AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError>;
    async fn find_by_event_and_email(&self, event_id: &str, email: &str) -> Result<Option<Booking>, AppError>;
    async fn list(&self) -> Result<Vec<Booking>, AppError>;
    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Booking>, AppError>;
    async fn list_by_company(&self, company_id: &str) -> Result<Vec<Booking>, AppError>;
    async fn update_status(&self, id: &str, status: &str) -> Result<Booking, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
    async fn created_between_for_company(&self, company_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<DateTime<Utc>>, AppError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts the user and its first role row in one transaction.
    async fn create_with_role(&self, user: &User, role: &str) -> Result<User, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn list(&self) -> Result<Vec<User>, AppError>;
    async fn list_roles(&self, user_id: &str) -> Result<Vec<String>, AppError>;
    async fn find_membership(&self, user_id: &str) -> Result<Option<Membership>, AppError>;
    async fn set_otp(&self, user_id: &str, otp: Option<&str>, expires_at: Option<DateTime<Utc>>) -> Result<(), AppError>;
    async fn update_password(&self, user_id: &str, password_hash: &str) -> Result<(), AppError>;
    /// Removes role rows, membership rows and the user in one transaction.
    async fn delete(&self, id: &str) -> Result<(), AppError>;
    async fn created_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<DateTime<Utc>>, AppError>;
}

#[async_trait]
pub trait EmailService: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), AppError>;
}
