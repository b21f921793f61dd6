use event_hub::{
    api::router::create_router,
    state::AppState,
    config::Config,
    infra::{
        factory::run_sqlite_migrations,
        repositories::{
            sqlite_booking_repo::SqliteBookingRepo,
            sqlite_company_repo::SqliteCompanyRepo,
            sqlite_event_repo::SqliteEventRepo,
            sqlite_user_repo::SqliteUserRepo,
        },
    },
    domain::{models::{auth::Claims, user::User}, ports::EmailService},
    error::AppError,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, header},
    response::Response,
    Router,
};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use tower::ServiceExt;
use serde_json::{json, Value};

pub const TEST_JWT_SECRET: &str = "test-secret";

/// Keeps every message instead of delivering it.
#[derive(Default)]
pub struct RecordingEmailService {
    pub sent: Mutex<Vec<(String, String, String)>>,
}

#[async_trait]
impl EmailService for RecordingEmailService {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), AppError> {
        self.sent.lock().unwrap().push((recipient.to_string(), subject.to_string(), body.to_string()));
        Ok(())
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
    pub mailbox: Arc<RecordingEmailService>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        run_sqlite_migrations(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url,
            port: 0,
            jwt_secret: TEST_JWT_SECRET.to_string(),
            report_timezone: chrono_tz::UTC,
            db_max_connections: 5,
        };

        let mailbox = Arc::new(RecordingEmailService::default());

        let state = Arc::new(AppState::new(
            config,
            Arc::new(SqliteCompanyRepo::new(pool.clone())),
            Arc::new(SqliteUserRepo::new(pool.clone())),
            Arc::new(SqliteEventRepo::new(pool.clone())),
            Arc::new(SqliteBookingRepo::new(pool.clone())),
            mailbox.clone(),
        ));

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
            mailbox,
        }
    }

    pub fn token_for(&self, user_id: &str) -> String {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            exp: (now + Duration::hours(1)).timestamp() as usize,
            iat: now.timestamp() as usize,
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes())).unwrap()
    }

    /// Inserts a user holding `role` and returns its id.
    pub async fn create_user(&self, email: &str, role: &str) -> String {
        let user = User::new(email.to_string(), "Test".to_string(), "User".to_string(), "not-a-hash".to_string());
        self.state.user_repo.create_with_role(&user, role).await.unwrap().id
    }

    /// Returns `(admin_token, company_id, company_admin_token)`.
    pub async fn seed_company(&self, company_email: &str, contact_email: &str) -> (String, String, String) {
        let admin_email = format!("admin-{}@example.com", Uuid::new_v4());
        let admin_id = self.create_user(&admin_email, "ADMIN").await;
        let admin_token = self.token_for(&admin_id);

        let res = self.request("POST", "/api/company", Some(&admin_token), Some(json!({
            "company": { "name": "Acme", "email": company_email, "phoneNumber": "" },
            "contactPerson": { "firstName": "Ada", "lastName": "Admin", "email": contact_email }
        }))).await;
        assert_eq!(res.status(), 201, "company seed failed");
        let body = parse_body(res).await;

        let company_id = body["data"]["company"]["id"].as_str().unwrap().to_string();
        let contact_id = body["data"]["contactPerson"]["id"].as_str().unwrap().to_string();
        (admin_token, company_id, self.token_for(&contact_id))
    }

    /// Creates an event through the API as a company admin and returns its id.
    pub async fn create_event(&self, token: &str, seats: i32, deadline: &str) -> String {
        let res = self.request("POST", "/api/event", Some(token), Some(json!({
            "title": "Launch",
            "location": "Kigali",
            "description": "Product launch",
            "bookingDeadline": deadline,
            "availableSeats": seats
        }))).await;
        assert_eq!(res.status(), 201, "event seed failed");
        parse_body(res).await["data"]["id"].as_str().unwrap().to_string()
    }

    pub async fn request(&self, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match body {
            Some(v) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };
        self.router.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
    }
}

pub async fn parse_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}
