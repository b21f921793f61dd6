use std::sync::Arc;
use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use tracing::{info, warn};
use crate::domain::models::user::{Actor, Role, User, UserProfile};
use crate::domain::ports::{EmailService, UserRepository};
use crate::domain::services::aggregation::{monthly_bucket_count, year_range, MonthlyCounts};
use crate::domain::services::password::{generate_otp, hash_password};
use crate::error::AppError;

const OTP_VALIDITY_MINUTES: i64 = 60;

pub struct SignUp {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

pub struct UserService {
    users: Arc<dyn UserRepository>,
    email: Arc<dyn EmailService>,
    tz: Tz,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, email: Arc<dyn EmailService>, tz: Tz) -> Self {
        Self { users, email, tz }
    }

    pub async fn get_users(&self) -> Result<Vec<User>, AppError> {
        self.users.list().await
    }

    pub async fn sign_up(&self, data: SignUp) -> Result<UserProfile, AppError> {
        if data.email.trim().is_empty() || data.password.is_empty() {
            return Err(AppError::Validation("Email and password are required".into()));
        }
        if self.users.find_by_email(&data.email).await?.is_some() {
            return Err(AppError::Conflict("User already exists".into()));
        }

        let user = User::new(data.email, data.first_name, data.last_name, hash_password(&data.password)?);
        let created = self.users.create_with_role(&user, Role::User.as_str()).await?;
        info!(user_id = %created.id, "User signed up");

        Ok(UserProfile {
            id: created.id,
            email: created.email,
            first_name: created.first_name,
            last_name: created.last_name,
            roles: vec![Role::User],
        })
    }

    pub async fn delete_user(&self, id: &str) -> Result<(), AppError> {
        if self.users.find_by_id(id).await?.is_none() {
            return Err(AppError::NotFound("User not found".into()));
        }
        self.users.delete(id).await?;
        info!(user_id = %id, "User deleted");
        Ok(())
    }

    pub async fn request_password_reset(&self, email: &str) -> Result<(), AppError> {
        let user = self.users.find_by_email(email).await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))?;

        let otp = generate_otp();
        let expires_at = Utc::now() + Duration::minutes(OTP_VALIDITY_MINUTES);
        self.users.set_otp(&user.id, Some(&otp), Some(expires_at)).await?;

        let body = format!(
            "Dear {},\n\nYou have requested to reset your password. Use this one-time password to continue:\n\nOTP: {}\n\nIt expires in {} minutes. If you did not request a reset, ignore this email.\n",
            if user.first_name.is_empty() { "User" } else { user.first_name.as_str() },
            otp,
            OTP_VALIDITY_MINUTES,
        );
        self.email.send(&user.email, "Password Reset - One-Time Password (OTP)", &body).await?;
        info!(user_id = %user.id, "Password reset code issued");
        Ok(())
    }

    pub async fn reset_password(&self, email: &str, otp: &str, new_password: &str, now: DateTime<Utc>) -> Result<(), AppError> {
        if email.trim().is_empty() || otp.is_empty() || new_password.is_empty() {
            return Err(AppError::Validation("Email, OTP and new password are required".into()));
        }

        let user = self.users.find_by_email(email).await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))?;

        let valid = match (&user.otp, user.otp_expires_at) {
            (Some(stored), Some(expires_at)) => stored == otp && expires_at >= now,
            _ => false,
        };
        if !valid {
            warn!(user_id = %user.id, "Rejected password reset with invalid or expired code");
            return Err(AppError::Validation("Invalid or expired OTP".into()));
        }

        self.users.update_password(&user.id, &hash_password(new_password)?).await?;
        self.users.set_otp(&user.id, None, None).await?;
        info!(user_id = %user.id, "Password reset");
        Ok(())
    }

    pub async fn count_by_month(&self, year: i32) -> Result<MonthlyCounts, AppError> {
        let (start, end) = year_range(year, self.tz)
            .ok_or_else(|| AppError::Validation("Invalid year".into()))?;
        let created = self.users.created_between(start, end).await?;
        Ok(monthly_bucket_count(&created, |d| *d, self.tz))
    }

    /// Loads roles and company membership for an authenticated user id.
    pub async fn resolve_actor(&self, user_id: &str) -> Result<Option<Actor>, AppError> {
        let Some(user) = self.users.find_by_id(user_id).await? else {
            return Ok(None);
        };
        let roles = self.users.list_roles(&user.id).await?
            .iter()
            .filter_map(|r| Role::parse(r))
            .collect();
        let company = self.users.find_membership(&user.id).await?;
        Ok(Some(Actor { user, roles, company }))
    }
}
