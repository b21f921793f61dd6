use crate::domain::models::company::Company;
use crate::domain::ports::CompanyRepository;
use crate::error::{AppError, FieldError};

/// Reports every uniqueness clash for a new company instead of stopping at
/// the first one. The check is not atomic with the later insert.
pub async fn validate_company_create(
    repo: &dyn CompanyRepository,
    email: &str,
    phone_number: &str,
) -> Result<Vec<FieldError>, AppError> {
    let mut errors = Vec::new();

    let email_taken = repo.find_by_email(email).await?.is_some();
    // An absent phone number is stored as "" and never clashes.
    let phone_taken = !phone_number.is_empty()
        && repo.find_by_phone(phone_number).await?.is_some();

    if email_taken {
        errors.push(FieldError::new("company.email", "Email used by other company"));
    }
    if phone_taken {
        errors.push(FieldError::new("company.phoneNumber", "Phone number used by other company"));
    }

    Ok(errors)
}

/// Same clashes for a partial update; unchanged or absent fields are skipped.
pub async fn validate_company_update(
    repo: &dyn CompanyRepository,
    current: &Company,
    email: Option<&str>,
    phone_number: Option<&str>,
) -> Result<Vec<FieldError>, AppError> {
    let mut errors = Vec::new();

    if let Some(email) = email
        && email != current.email
        && repo.find_by_email(email).await?.is_some() {
        errors.push(FieldError::new("company.email", "Email used by other company"));
    }
    if let Some(phone) = phone_number
        && !phone.is_empty()
        && phone != current.phone_number
        && repo.find_by_phone(phone).await?.is_some() {
        errors.push(FieldError::new("company.phoneNumber", "Phone number used by other company"));
    }

    Ok(errors)
}
