use std::sync::Arc;
use chrono_tz::Tz;
use tracing::info;
use crate::domain::models::booking::{Booking, NewBookingParams};
use crate::domain::ports::{BookingRepository, UserRepository};
use crate::domain::services::aggregation::{monthly_bucket_count, year_range, MonthlyCounts};
use crate::error::AppError;

pub struct NewBooking {
    pub event_id: String,
    pub number_of_seats: i32,
    pub email_for_booking: String,
    pub phone_for_booking: Option<String>,
}

pub struct BookingService {
    bookings: Arc<dyn BookingRepository>,
    users: Arc<dyn UserRepository>,
    tz: Tz,
}

impl BookingService {
    pub fn new(bookings: Arc<dyn BookingRepository>, users: Arc<dyn UserRepository>, tz: Tz) -> Self {
        Self { bookings, users, tz }
    }

    /// `user_id` is `None` for anonymous bookers. Neither the event's
    /// accepting-bookings flag nor its remaining seats are consulted here.
    pub async fn create_booking(&self, data: NewBooking, user_id: Option<String>) -> Result<Booking, AppError> {
        if data.email_for_booking.trim().is_empty() {
            return Err(AppError::Validation("Email is required for booking".into()));
        }
        let phone_missing = data.phone_for_booking.as_deref().is_none_or(|p| p.trim().is_empty());
        if user_id.is_none() && phone_missing {
            return Err(AppError::Validation("Phone number is required for users without an account".into()));
        }
        if data.number_of_seats < 1 {
            return Err(AppError::Validation("numberOfSeats must be at least 1".into()));
        }

        if self.bookings.find_by_event_and_email(&data.event_id, &data.email_for_booking).await?.is_some() {
            return Err(AppError::Conflict("User has already booked this event with the provided email.".into()));
        }

        if let Some(ref id) = user_id
            && self.users.find_by_id(id).await?.is_none() {
            return Err(AppError::Validation("User does not exist.".into()));
        }

        let booking = Booking::new(NewBookingParams {
            event_id: data.event_id,
            user_id,
            number_of_seats: data.number_of_seats,
            email_for_booking: data.email_for_booking,
            phone_for_booking: data.phone_for_booking,
        });

        let created = self.bookings.create(&booking).await?;
        info!(booking_id = %created.id, event_id = %created.event_id, anonymous = created.is_anonymous(), "Booking created");
        Ok(created)
    }

    pub async fn get_booking_by_id(&self, id: &str) -> Result<Booking, AppError> {
        self.bookings.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("Booking not found".into()))
    }

    pub async fn get_all_bookings(&self) -> Result<Vec<Booking>, AppError> {
        self.bookings.list().await
    }

    /// Any status string is accepted.
    pub async fn update_booking_status(&self, id: &str, status: &str) -> Result<Booking, AppError> {
        let updated = self.bookings.update_status(id, status).await?;
        info!(booking_id = %id, status = %status, "Booking status updated");
        Ok(updated)
    }

    pub async fn delete_booking(&self, id: &str) -> Result<(), AppError> {
        self.bookings.delete(id).await?;
        info!(booking_id = %id, "Booking deleted");
        Ok(())
    }

    pub async fn count_by_month(&self, company_id: &str, year: i32) -> Result<MonthlyCounts, AppError> {
        let (start, end) = year_range(year, self.tz)
            .ok_or_else(|| AppError::Validation("Invalid year".into()))?;
        let created = self.bookings.created_between_for_company(company_id, start, end).await?;
        Ok(monthly_bucket_count(&created, |d| *d, self.tz))
    }
}
