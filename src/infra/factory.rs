use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use thiserror::Error;
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::state::AppState;
use crate::infra::email::logging_email_service::LoggingEmailService;
use crate::infra::repositories::{
    postgres_booking_repo::PostgresBookingRepo, postgres_company_repo::PostgresCompanyRepo,
    postgres_event_repo::PostgresEventRepo, postgres_user_repo::PostgresUserRepo,
    sqlite_booking_repo::SqliteBookingRepo, sqlite_company_repo::SqliteCompanyRepo,
    sqlite_event_repo::SqliteEventRepo, sqlite_user_repo::SqliteUserRepo,
};

#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("database connection failed: {0}")]
    Connect(#[from] sqlx::Error),
    #[error("migrations failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

pub async fn bootstrap_state(config: &Config) -> Result<AppState, BootstrapError> {
    let database_url = &config.database_url;

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let opts: PgConnectOptions = database_url.parse::<PgConnectOptions>()?
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .connect_with(opts)
            .await?;

        run_postgres_migrations(&pool).await?;

        Ok(AppState::new(
            config.clone(),
            Arc::new(PostgresCompanyRepo::new(pool.clone())),
            Arc::new(PostgresUserRepo::new(pool.clone())),
            Arc::new(PostgresEventRepo::new(pool.clone())),
            Arc::new(PostgresBookingRepo::new(pool)),
            Arc::new(LoggingEmailService),
        ))
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(config.db_max_connections.min(5))
            .connect_with(opts)
            .await?;

        run_sqlite_migrations(&pool).await?;

        Ok(sqlite_state(config.clone(), pool))
    }
}

/// Builds the SQLite-backed state over an already migrated pool.
pub fn sqlite_state(config: Config, pool: SqlitePool) -> AppState {
    AppState::new(
        config,
        Arc::new(SqliteCompanyRepo::new(pool.clone())),
        Arc::new(SqliteUserRepo::new(pool.clone())),
        Arc::new(SqliteEventRepo::new(pool.clone())),
        Arc::new(SqliteBookingRepo::new(pool)),
        Arc::new(LoggingEmailService),
    )
}

async fn run_postgres_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations/postgres").run(pool).await
}

pub async fn run_sqlite_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations/sqlite").run(pool).await
}
