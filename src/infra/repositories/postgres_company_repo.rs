use crate::domain::{
    models::company::{Company, CompanyUser, ContactPerson, ContactResolution, NewCompanyRegistration},
    models::user::UserRole,
    ports::CompanyRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::error;
use sqlx::PgPool;

pub struct PostgresCompanyRepo {
    pool: PgPool,
}

impl PostgresCompanyRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CompanyRepository for PostgresCompanyRepo {
    async fn register(&self, registration: &NewCompanyRegistration) -> Result<Company, AppError> {
        let company = &registration.company;
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let created = sqlx::query_as::<_, Company>(
            "INSERT INTO companies (id, name, address, email, phone_number, created_at) VALUES ($1, $2, $3, $4, $5, $6) RETURNING *"
        )
            .bind(&company.id)
            .bind(&company.name)
            .bind(&company.address)
            .bind(&company.email)
            .bind(&company.phone_number)
            .bind(company.created_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        if let ContactResolution::Create { user } = &registration.contact {
            sqlx::query(
                "INSERT INTO users (id, email, first_name, last_name, password_hash, otp, otp_expires_at, created_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)"
            )
                .bind(&user.id)
                .bind(&user.email)
                .bind(&user.first_name)
                .bind(&user.last_name)
                .bind(&user.password_hash)
                .bind(&user.otp)
                .bind(user.otp_expires_at)
                .bind(user.created_at)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;
        }

        let contact_id = registration.contact.user_id();
        let role = UserRole::new(contact_id.to_string(), &registration.contact_role);
        sqlx::query("INSERT INTO user_roles (id, user_id, role) VALUES ($1, $2, $3) ON CONFLICT (user_id, role) DO NOTHING")
            .bind(&role.id)
            .bind(&role.user_id)
            .bind(&role.role)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        let member = CompanyUser::new(
            created.id.clone(),
            contact_id.to_string(),
            registration.contact_phone.clone(),
            registration.contact_role.clone(),
        );
        sqlx::query(
            "INSERT INTO company_users (id, company_id, user_id, phone_number, role, created_at) VALUES ($1, $2, $3, $4, $5, $6)"
        )
            .bind(&member.id)
            .bind(&member.company_id)
            .bind(&member.user_id)
            .bind(&member.phone_number)
            .bind(&member.role)
            .bind(member.created_at)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Company>, AppError> {
        sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Company>, AppError> {
        sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE email = $1 LIMIT 1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<Company>, AppError> {
        sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE phone_number = $1 LIMIT 1")
            .bind(phone_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Company>, AppError> {
        sqlx::query_as::<_, Company>("SELECT * FROM companies ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, company: &Company) -> Result<Company, AppError> {
        sqlx::query_as::<_, Company>(
            "UPDATE companies SET name=$1, address=$2, email=$3, phone_number=$4 WHERE id=$5 RETURNING *"
        )
            .bind(&company.name)
            .bind(&company.address)
            .bind(&company.email)
            .bind(&company.phone_number)
            .bind(&company.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("No Company found".into()))
    }

    async fn find_contact_person(&self, company_id: &str) -> Result<Option<ContactPerson>, AppError> {
        sqlx::query_as::<_, ContactPerson>(
            r#"SELECT u.id, u.first_name, u.last_name, u.email, cu.phone_number, cu.role
               FROM company_users cu
               JOIN users u ON u.id = cu.user_id
               WHERE cu.company_id = $1
                 AND EXISTS (SELECT 1 FROM user_roles ur WHERE ur.user_id = u.id AND ur.role = 'COMPANY_ADMIN')
               ORDER BY cu.created_at ASC
               LIMIT 1"#
        )
            .bind(company_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        sqlx::query("DELETE FROM bookings WHERE event_id IN (SELECT id FROM events WHERE company_id = $1)")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        sqlx::query("DELETE FROM events WHERE company_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        sqlx::query("DELETE FROM company_users WHERE company_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        let result = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                error!("Postgres Company Deletion Failed: {:?}", e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("No Company found".into()));
        }
        tx.commit().await.map_err(AppError::Database)?;
        Ok(())
    }

    async fn created_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<DateTime<Utc>>, AppError> {
        sqlx::query_scalar::<_, DateTime<Utc>>(
            "SELECT created_at FROM companies WHERE created_at >= $1 AND created_at < $2"
        )
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
