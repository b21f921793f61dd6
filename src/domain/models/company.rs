use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: String,
    pub name: String,
    pub address: String,
    pub email: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
}

impl Company {
    pub fn new(name: String, address: String, email: String, phone_number: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            address,
            email,
            phone_number,
            created_at: Utc::now(),
        }
    }
}

/// Link between a user and the company they work for.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CompanyUser {
    pub id: String,
    pub company_id: String,
    pub user_id: String,
    pub phone_number: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl CompanyUser {
    pub fn new(company_id: String, user_id: String, phone_number: Option<String>, role: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            company_id,
            user_id,
            phone_number,
            role,
            created_at: Utc::now(),
        }
    }
}

/// Row shape of the first `COMPANY_ADMIN` member of a company.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ContactPerson {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub role: String,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDetails {
    pub company: Company,
    pub contact_person: Option<ContactPerson>,
}

/// Everything the store needs to register a company and its contact in one go.
#[derive(Debug, Clone)]
pub struct NewCompanyRegistration {
    pub company: Company,
    pub contact: ContactResolution,
    pub contact_phone: Option<String>,
    pub contact_role: String,
}

#[derive(Debug, Clone)]
pub enum ContactResolution {
    Existing { user_id: String },
    Create { user: super::user::User },
}

impl ContactResolution {
    pub fn user_id(&self) -> &str {
        match self {
            ContactResolution::Existing { user_id } => user_id,
            ContactResolution::Create { user } => &user.id,
        }
    }
}
