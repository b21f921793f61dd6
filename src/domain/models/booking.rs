use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

pub const DEFAULT_BOOKING_STATUS: &str = "waiting";

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub event_id: String,
    /// `None` for anonymous bookers.
    pub user_id: Option<String>,
    pub number_of_seats: i32,
    pub email_for_booking: String,
    pub phone_for_booking: Option<String>,
    pub booking_status: String,
    pub created_at: DateTime<Utc>,
}

pub struct NewBookingParams {
    pub event_id: String,
    pub user_id: Option<String>,
    pub number_of_seats: i32,
    pub email_for_booking: String,
    pub phone_for_booking: Option<String>,
}

impl Booking {
    pub fn new(params: NewBookingParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            event_id: params.event_id,
            user_id: params.user_id,
            number_of_seats: params.number_of_seats,
            email_for_booking: params.email_for_booking,
            phone_for_booking: params.phone_for_booking,
            booking_status: DEFAULT_BOOKING_STATUS.to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.user_id.is_none()
    }
}
