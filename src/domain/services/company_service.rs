use std::sync::Arc;
use chrono_tz::Tz;
use serde::Serialize;
use tracing::info;
use crate::domain::models::company::{
    Company, CompanyDetails, ContactPerson, ContactResolution, NewCompanyRegistration,
};
use crate::domain::models::user::{Role, User};
use crate::domain::ports::{CompanyRepository, UserRepository};
use crate::domain::services::aggregation::{monthly_bucket_count, year_range, MonthlyCounts};
use crate::domain::services::password::{generate_secret, hash_password};
use crate::domain::services::validation::{validate_company_create, validate_company_update};
use crate::error::AppError;

pub struct NewCompany {
    pub name: String,
    pub address: Option<String>,
    pub email: String,
    pub phone_number: Option<String>,
}

pub struct NewContactPerson {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub role: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Default)]
pub struct CompanyChanges {
    pub name: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyCreated {
    pub company: Company,
    pub contact_person: ContactPerson,
    /// Only present when a new account was opened for the contact person.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_secret: Option<String>,
}

pub struct CompanyService {
    companies: Arc<dyn CompanyRepository>,
    users: Arc<dyn UserRepository>,
    tz: Tz,
}

impl CompanyService {
    pub fn new(companies: Arc<dyn CompanyRepository>, users: Arc<dyn UserRepository>, tz: Tz) -> Self {
        Self { companies, users, tz }
    }

    pub async fn get_companies(&self) -> Result<Vec<Company>, AppError> {
        self.companies.list().await
    }

    pub async fn get_company(&self, id: &str) -> Result<CompanyDetails, AppError> {
        let company = self.companies.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("No Company found".into()))?;
        let contact_person = self.companies.find_contact_person(&company.id).await?;
        Ok(CompanyDetails { company, contact_person })
    }

    pub async fn create_company(&self, company: NewCompany, contact: NewContactPerson) -> Result<CompanyCreated, AppError> {
        let phone_number = company.phone_number.unwrap_or_default();

        let errors = validate_company_create(self.companies.as_ref(), &company.email, &phone_number).await?;
        if !errors.is_empty() {
            return Err(AppError::ValidationErrors(errors));
        }

        let contact_role = match contact.role.as_deref() {
            None => Role::CompanyAdmin,
            Some(raw) => match Role::parse(raw) {
                Some(role @ (Role::CompanyAdmin | Role::CompanyUser)) => role,
                _ => return Err(AppError::Validation("Contact role must be COMPANY_ADMIN or COMPANY_USER".into())),
            },
        };

        let mut contact_secret = None;
        let (resolution, contact_user) = if let Some(user_id) = contact.user_id {
            let user = self.users.find_by_id(&user_id).await?
                .ok_or_else(|| AppError::NotFound("Contact user not found".into()))?;
            (ContactResolution::Existing { user_id }, user)
        } else if let Some(user) = self.users.find_by_email(&contact.email).await? {
            (ContactResolution::Existing { user_id: user.id.clone() }, user)
        } else {
            let secret = generate_secret(16);
            let user = User::new(contact.email, contact.first_name, contact.last_name, hash_password(&secret)?);
            contact_secret = Some(secret);
            (ContactResolution::Create { user: user.clone() }, user)
        };

        let registration = NewCompanyRegistration {
            company: Company::new(
                company.name,
                company.address.unwrap_or_default(),
                company.email,
                phone_number,
            ),
            contact: resolution,
            contact_phone: contact.phone_number.clone(),
            contact_role: contact_role.as_str().to_string(),
        };

        let created = self.companies.register(&registration).await?;
        info!(company_id = %created.id, contact_id = %contact_user.id, "Company created");

        Ok(CompanyCreated {
            company: created,
            contact_person: ContactPerson {
                id: contact_user.id,
                first_name: contact_user.first_name,
                last_name: contact_user.last_name,
                email: contact_user.email,
                phone_number: contact.phone_number,
                role: contact_role.as_str().to_string(),
            },
            contact_secret,
        })
    }

    pub async fn update_company(&self, id: &str, changes: CompanyChanges) -> Result<Company, AppError> {
        let mut company = self.companies.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("No Company found".into()))?;

        let errors = validate_company_update(
            self.companies.as_ref(),
            &company,
            changes.email.as_deref(),
            changes.phone_number.as_deref(),
        ).await?;
        if !errors.is_empty() {
            return Err(AppError::ValidationErrors(errors));
        }

        if let Some(name) = changes.name { company.name = name; }
        if let Some(address) = changes.address { company.address = address; }
        if let Some(email) = changes.email { company.email = email; }
        if let Some(phone) = changes.phone_number { company.phone_number = phone; }

        let updated = self.companies.update(&company).await?;
        info!(company_id = %id, "Company updated");
        Ok(updated)
    }

    /// Hard delete; the company's events, their bookings and its memberships go with it.
    pub async fn delete_company(&self, id: &str) -> Result<(), AppError> {
        self.companies.delete(id).await?;
        info!(company_id = %id, "Company deleted");
        Ok(())
    }

    pub async fn count_by_month(&self, year: i32) -> Result<MonthlyCounts, AppError> {
        let (start, end) = year_range(year, self.tz)
            .ok_or_else(|| AppError::Validation("Invalid year".into()))?;
        let created = self.companies.created_between(start, end).await?;
        Ok(monthly_bucket_count(&created, |d| *d, self.tz))
    }
}
