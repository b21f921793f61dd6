use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use crate::domain::models::{booking::Booking, company::Company};

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub company_id: String,
    pub title: String,
    pub location: String,
    pub description: String,
    pub booking_deadline: DateTime<Utc>,
    pub available_seats: i32,
    pub is_accepting_booking: bool,
    pub created_at: DateTime<Utc>,
}

pub struct NewEventParams {
    pub company_id: String,
    pub title: String,
    pub location: String,
    pub description: String,
    pub booking_deadline: DateTime<Utc>,
    pub available_seats: i32,
}

impl Event {
    pub fn new(params: NewEventParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            company_id: params.company_id,
            title: params.title,
            location: params.location,
            description: params.description,
            booking_deadline: params.booking_deadline,
            available_seats: params.available_seats,
            is_accepting_booking: true,
            created_at: Utc::now(),
        }
    }
}

/// An event as served to clients: the stored row plus the derived counters.
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EventDetails {
    #[serde(flatten)]
    pub event: Event,
    pub bookings: Vec<Booking>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
    pub number_of_bookings: i64,
    pub remaining_seats: i64,
}

impl EventDetails {
    /// `remaining_seats` counts bookings, not seats, and is allowed to go negative.
    pub fn new(event: Event, bookings: Vec<Booking>, company: Option<Company>) -> Self {
        let number_of_bookings = bookings.len() as i64;
        let remaining_seats = i64::from(event.available_seats) - number_of_bookings;
        Self {
            event,
            bookings,
            company,
            number_of_bookings,
            remaining_seats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::booking::{Booking, NewBookingParams};

    fn event_with_seats(seats: i32) -> Event {
        Event::new(NewEventParams {
            company_id: "c1".into(),
            title: "Launch".into(),
            location: "Kigali".into(),
            description: "Product launch".into(),
            booking_deadline: Utc::now(),
            available_seats: seats,
        })
    }

    fn bookings_for(event: &Event, count: usize, seats_each: i32) -> Vec<Booking> {
        (0..count)
            .map(|i| Booking::new(NewBookingParams {
                event_id: event.id.clone(),
                user_id: None,
                number_of_seats: seats_each,
                email_for_booking: format!("guest{}@example.com", i),
                phone_for_booking: Some("0788000000".into()),
            }))
            .collect()
    }

    #[test]
    fn test_remaining_seats_counts_bookings_not_seats() {
        let event = event_with_seats(10);
        let bookings = bookings_for(&event, 3, 4);
        let details = EventDetails::new(event, bookings, None);
        assert_eq!(details.number_of_bookings, 3);
        assert_eq!(details.remaining_seats, 7);
    }

    #[test]
    fn test_remaining_seats_goes_negative_when_overbooked() {
        let event = event_with_seats(10);
        let bookings = bookings_for(&event, 11, 1);
        let details = EventDetails::new(event, bookings, None);
        assert_eq!(details.remaining_seats, -1);
    }

    #[test]
    fn test_details_serialize_flat_camel_case() {
        let event = event_with_seats(2);
        let details = EventDetails::new(event, vec![], None);
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["availableSeats"], 2);
        assert_eq!(json["isAcceptingBooking"], true);
        assert_eq!(json["remainingSeats"], 2);
        assert!(json.get("company").is_none());
    }
}
