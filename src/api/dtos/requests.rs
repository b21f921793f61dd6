use chrono::{DateTime, Utc};
use serde::Deserialize;
use crate::domain::services::{
    booking_service::NewBooking,
    company_service::{CompanyChanges, NewCompany, NewContactPerson},
    event_service::{EventChanges, NewEvent},
    user_service::SignUp,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyFields {
    pub name: String,
    pub address: Option<String>,
    pub email: String,
    pub phone_number: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPersonFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub role: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompanyRequest {
    pub company: CompanyFields,
    pub contact_person: ContactPersonFields,
}

impl CreateCompanyRequest {
    pub fn into_parts(self) -> (NewCompany, NewContactPerson) {
        (
            NewCompany {
                name: self.company.name,
                address: self.company.address,
                email: self.company.email,
                phone_number: self.company.phone_number,
            },
            NewContactPerson {
                first_name: self.contact_person.first_name,
                last_name: self.contact_person.last_name,
                email: self.contact_person.email,
                phone_number: self.contact_person.phone_number,
                role: self.contact_person.role,
                user_id: self.contact_person.user_id,
            },
        )
    }
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCompanyFields {
    pub name: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateCompanyRequest {
    #[serde(default)]
    pub company: UpdateCompanyFields,
}

impl From<UpdateCompanyRequest> for CompanyChanges {
    fn from(req: UpdateCompanyRequest) -> Self {
        CompanyChanges {
            name: req.company.name,
            address: req.company.address,
            email: req.company.email,
            phone_number: req.company.phone_number,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub title: String,
    pub location: String,
    pub description: String,
    pub booking_deadline: DateTime<Utc>,
    pub available_seats: i32,
}

impl From<CreateEventRequest> for NewEvent {
    fn from(req: CreateEventRequest) -> Self {
        NewEvent {
            title: req.title,
            location: req.location,
            description: req.description,
            booking_deadline: req.booking_deadline,
            available_seats: req.available_seats,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub booking_deadline: Option<DateTime<Utc>>,
    pub available_seats: Option<i32>,
}

impl From<UpdateEventRequest> for EventChanges {
    fn from(req: UpdateEventRequest) -> Self {
        EventChanges {
            title: req.title,
            location: req.location,
            description: req.description,
            booking_deadline: req.booking_deadline,
            available_seats: req.available_seats,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetAcceptingBookingRequest {
    pub is_accepting_booking: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub event_id: String,
    #[serde(alias = "numberOfseats")]
    pub number_of_seats: i32,
    #[serde(default)]
    pub email_for_booking: String,
    pub phone_for_booking: Option<String>,
}

impl From<CreateBookingRequest> for NewBooking {
    fn from(req: CreateBookingRequest) -> Self {
        NewBooking {
            event_id: req.event_id,
            number_of_seats: req.number_of_seats,
            email_for_booking: req.email_for_booking,
            phone_for_booking: req.phone_for_booking,
        }
    }
}

#[derive(Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<SignUpRequest> for SignUp {
    fn from(req: SignUpRequest) -> Self {
        SignUp {
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
        }
    }
}

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub email: String,
    pub otp: String,
    pub new_password: String,
}
