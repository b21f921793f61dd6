use std::sync::Arc;
use crate::domain::ports::{
    BookingRepository, CompanyRepository, EmailService, EventRepository, UserRepository,
};
use crate::domain::services::{
    booking_service::BookingService, company_service::CompanyService,
    event_service::EventService, user_service::UserService,
};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub company_repo: Arc<dyn CompanyRepository>,
    pub user_repo: Arc<dyn UserRepository>,
    pub event_repo: Arc<dyn EventRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub email_service: Arc<dyn EmailService>,
    pub company_service: Arc<CompanyService>,
    pub event_service: Arc<EventService>,
    pub booking_service: Arc<BookingService>,
    pub user_service: Arc<UserService>,
}

impl AppState {
    /// Wires the services on top of whichever repository adapters were chosen.
    pub fn new(
        config: Config,
        company_repo: Arc<dyn CompanyRepository>,
        user_repo: Arc<dyn UserRepository>,
        event_repo: Arc<dyn EventRepository>,
        booking_repo: Arc<dyn BookingRepository>,
        email_service: Arc<dyn EmailService>,
    ) -> Self {
        let tz = config.report_timezone;
        let company_service = Arc::new(CompanyService::new(company_repo.clone(), user_repo.clone(), tz));
        let event_service = Arc::new(EventService::new(event_repo.clone(), booking_repo.clone(), company_repo.clone(), tz));
        let booking_service = Arc::new(BookingService::new(booking_repo.clone(), user_repo.clone(), tz));
        let user_service = Arc::new(UserService::new(user_repo.clone(), email_service.clone(), tz));

        Self {
            config,
            company_repo,
            user_repo,
            event_repo,
            booking_repo,
            email_service,
            company_service,
            event_service,
            booking_service,
            user_service,
        }
    }
}
