use std::collections::HashMap;
use std::sync::Arc;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::info;
use crate::domain::models::booking::Booking;
use crate::domain::models::event::{Event, EventDetails, NewEventParams};
use crate::domain::ports::{BookingRepository, CompanyRepository, EventRepository};
use crate::domain::services::aggregation::{monthly_bucket_count, year_range, MonthlyCounts};
use crate::error::AppError;

pub struct NewEvent {
    pub title: String,
    pub location: String,
    pub description: String,
    pub booking_deadline: DateTime<Utc>,
    pub available_seats: i32,
}

#[derive(Default)]
pub struct EventChanges {
    pub title: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub booking_deadline: Option<DateTime<Utc>>,
    pub available_seats: Option<i32>,
}

pub struct EventService {
    events: Arc<dyn EventRepository>,
    bookings: Arc<dyn BookingRepository>,
    companies: Arc<dyn CompanyRepository>,
    tz: Tz,
}

impl EventService {
    pub fn new(
        events: Arc<dyn EventRepository>,
        bookings: Arc<dyn BookingRepository>,
        companies: Arc<dyn CompanyRepository>,
        tz: Tz,
    ) -> Self {
        Self { events, bookings, companies, tz }
    }

    pub async fn create_event(&self, company_id: &str, data: NewEvent) -> Result<Event, AppError> {
        if data.available_seats < 0 {
            return Err(AppError::Validation("availableSeats cannot be negative".into()));
        }

        let event = Event::new(NewEventParams {
            company_id: company_id.to_string(),
            title: data.title,
            location: data.location,
            description: data.description,
            booking_deadline: data.booking_deadline,
            available_seats: data.available_seats,
        });

        let created = self.events.create(&event).await?;
        info!(event_id = %created.id, company_id = %company_id, "Event created");
        Ok(created)
    }

    pub async fn get_event(&self, id: &str) -> Result<EventDetails, AppError> {
        let event = self.find(id).await?;
        let bookings = self.bookings.list_by_event(&event.id).await?;
        let company = self.companies.find_by_id(&event.company_id).await?;
        Ok(EventDetails::new(event, bookings, company))
    }

    pub async fn get_all_events(&self) -> Result<Vec<EventDetails>, AppError> {
        let events = self.events.list().await?;
        let mut bookings = group_by_event(self.bookings.list().await?);
        let companies: HashMap<String, _> = self.companies.list().await?
            .into_iter()
            .map(|c| (c.id.clone(), c))
            .collect();

        Ok(events
            .into_iter()
            .map(|event| {
                let event_bookings = bookings.remove(&event.id).unwrap_or_default();
                let company = companies.get(&event.company_id).cloned();
                EventDetails::new(event, event_bookings, company)
            })
            .collect())
    }

    pub async fn get_events_for_company(&self, company_id: &str) -> Result<Vec<EventDetails>, AppError> {
        let events = self.events.list_by_company(company_id).await?;
        let mut bookings = group_by_event(self.bookings.list_by_company(company_id).await?);

        Ok(events
            .into_iter()
            .map(|event| {
                let event_bookings = bookings.remove(&event.id).unwrap_or_default();
                EventDetails::new(event, event_bookings, None)
            })
            .collect())
    }

    pub async fn update_event(&self, id: &str, changes: EventChanges) -> Result<Event, AppError> {
        let mut event = self.find(id).await?;

        if let Some(val) = changes.title { event.title = val; }
        if let Some(val) = changes.location { event.location = val; }
        if let Some(val) = changes.description { event.description = val; }
        if let Some(val) = changes.booking_deadline { event.booking_deadline = val; }
        if let Some(val) = changes.available_seats {
            if val < 0 {
                return Err(AppError::Validation("availableSeats cannot be negative".into()));
            }
            event.available_seats = val;
        }

        let updated = self.events.update(&event).await?;
        info!(event_id = %id, "Event updated");
        Ok(updated)
    }

    pub async fn delete_event(&self, id: &str) -> Result<(), AppError> {
        self.events.delete(id).await?;
        info!(event_id = %id, "Event deleted");
        Ok(())
    }

    pub async fn set_accepting_booking(&self, id: &str, flag: bool) -> Result<(), AppError> {
        self.events.set_accepting_booking(id, flag).await?;
        info!(event_id = %id, accepting = flag, "Event booking gate changed");
        Ok(())
    }

    pub async fn is_accepting_booking(&self, id: &str) -> Result<bool, AppError> {
        Ok(self.find(id).await?.is_accepting_booking)
    }

    /// Events created in `year`, across all companies when `company_id` is `None`.
    pub async fn count_by_month(&self, year: i32, company_id: Option<&str>) -> Result<MonthlyCounts, AppError> {
        let (start, end) = self.year_range(year)?;
        let created = self.events.created_between(company_id, start, end).await?;
        Ok(monthly_bucket_count(&created, |d| *d, self.tz))
    }

    /// Events of `company_id` whose booking deadline falls in `year` and has
    /// already passed at `now`, bucketed by the deadline's month.
    pub async fn finished_count_by_month(&self, company_id: &str, year: i32, now: DateTime<Utc>) -> Result<MonthlyCounts, AppError> {
        let (start, end) = self.year_range(year)?;
        let deadlines: Vec<DateTime<Utc>> = self.events.deadlines_between(company_id, start, end).await?
            .into_iter()
            .filter(|deadline| *deadline < now)
            .collect();
        Ok(monthly_bucket_count(&deadlines, |d| *d, self.tz))
    }

    async fn find(&self, id: &str) -> Result<Event, AppError> {
        self.events.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("Event not found".into()))
    }

    fn year_range(&self, year: i32) -> Result<(DateTime<Utc>, DateTime<Utc>), AppError> {
        year_range(year, self.tz).ok_or_else(|| AppError::Validation("Invalid year".into()))
    }
}

fn group_by_event(bookings: Vec<Booking>) -> HashMap<String, Vec<Booking>> {
    let mut grouped: HashMap<String, Vec<Booking>> = HashMap::new();
    for booking in bookings {
        grouped.entry(booking.event_id.clone()).or_default().push(booking);
    }
    grouped
}
