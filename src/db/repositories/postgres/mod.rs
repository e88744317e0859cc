//! Postgres repository implementation using Diesel.
//!
//! Implements the repository traits against a Postgres database with the
//! three-table schema from `migrations/`.
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Automatic retry for transient failures
//! - Automatic migration execution at startup
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATABASE_URL` or `PG_DATABASE_URL`: Connection string (required)
//! - `PG_POOL_MAX`: Maximum pool size (default: 10)
//! - `PG_POOL_MIN`: Minimum pool size (default: 1)
//! - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
//! - `PG_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds (default: 600)
//! - `PG_MAX_RETRIES`: Maximum retry attempts for transient failures (default: 3)
//! - `PG_RETRY_DELAY_MS`: Initial retry delay in milliseconds (default: 100)

use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task;

use crate::api::{
    Mission, MissionWithPlanet, MissionWithRelations, NewMission, NewPlanet, NewScientist, Planet,
    PlanetId, Scientist, ScientistId, ScientistUpdate, ScientistWithMissions,
};
use crate::db::repository::{
    MissionRepository, PlanetRepository, RepositoryError, RepositoryResult, ScientistRepository,
};

mod models;
mod schema;

use models::*;
use schema::{missions, planets, scientists};

type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/postgres/migrations");

/// Configuration for connecting to Postgres.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Minimum number of connections in the pool
    pub min_pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_sec: u64,
    /// Idle connection timeout in seconds
    pub idle_timeout_sec: u64,
    /// Maximum number of retry attempts for transient failures
    pub max_retries: u32,
    /// Initial retry delay in milliseconds (doubles with each retry)
    pub retry_delay_ms: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_pool_size: 10,
            min_pool_size: 1,
            connection_timeout_sec: 30,
            idle_timeout_sec: 600,
            max_retries: 3,
            retry_delay_ms: 100,
        }
    }
}

impl PostgresConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("PG_DATABASE_URL"))
            .map_err(|_| "DATABASE_URL or PG_DATABASE_URL must be set".to_string())?;

        Ok(Self {
            database_url,
            max_pool_size: env_or("PG_POOL_MAX", 10),
            min_pool_size: env_or("PG_POOL_MIN", 1),
            connection_timeout_sec: env_or("PG_CONN_TIMEOUT_SEC", 30),
            idle_timeout_sec: env_or("PG_IDLE_TIMEOUT_SEC", 600),
            max_retries: env_or("PG_MAX_RETRIES", 3),
            retry_delay_ms: env_or("PG_RETRY_DELAY_MS", 100),
        })
    }

    /// Create a new configuration with a database URL.
    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

/// Pool health statistics.
#[derive(Debug, Clone, Default)]
pub struct PoolStats {
    /// Number of connections currently in use
    pub connections_in_use: u32,
    /// Number of idle connections
    pub idle_connections: u32,
    /// Total number of connections in the pool
    pub total_connections: u32,
    /// Maximum pool size
    pub max_size: u32,
    /// Total successful queries executed
    pub total_queries: u64,
    /// Total failed queries
    pub failed_queries: u64,
    /// Total retried operations
    pub retried_operations: u64,
}

/// Diesel-backed repository for Postgres.
#[derive(Clone, Debug)]
pub struct PostgresRepository {
    pool: PgPool,
    config: PostgresConfig,
    // Metrics counters
    total_queries: Arc<AtomicU64>,
    failed_queries: Arc<AtomicU64>,
    retried_operations: Arc<AtomicU64>,
}

impl PostgresRepository {
    /// Create a new repository and run pending migrations.
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_sec)))
            .test_on_check_out(true)
            .build(manager)
            .map_err(|e| RepositoryError::connection(e.to_string()))?;

        // Run migrations once during initialization
        {
            let mut conn = pool
                .get()
                .map_err(|e| RepositoryError::connection(e.to_string()))?;
            Self::run_migrations(&mut conn)?;
        }

        Ok(Self {
            pool,
            config,
            total_queries: Arc::new(AtomicU64::new(0)),
            failed_queries: Arc::new(AtomicU64::new(0)),
            retried_operations: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Run pending database migrations.
    fn run_migrations(conn: &mut PgConnection) -> RepositoryResult<()> {
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|e| RepositoryError::internal(format!("Migration failed: {}", e)))?;
        Ok(())
    }

    /// Execute a database operation with automatic retry for transient
    /// failures.
    ///
    /// Diesel is synchronous, so the operation runs on the blocking thread
    /// pool. Retryable errors (connection loss, serialization failures) are
    /// retried up to `max_retries` times with exponential backoff.
    async fn with_conn<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static + Clone,
    {
        let pool = self.pool.clone();
        let max_retries = self.config.max_retries;
        let retry_delay_ms = self.config.retry_delay_ms;
        let total_queries = self.total_queries.clone();
        let failed_queries = self.failed_queries.clone();
        let retried_operations = self.retried_operations.clone();

        task::spawn_blocking(move || {
            let mut last_error = None;
            let mut retry_delay = Duration::from_millis(retry_delay_ms);

            for attempt in 0..=max_retries {
                if attempt > 0 {
                    retried_operations.fetch_add(1, Ordering::Relaxed);
                    std::thread::sleep(retry_delay);
                    retry_delay *= 2;
                }

                let mut conn = match pool.get() {
                    Ok(c) => c,
                    Err(e) => {
                        let err = RepositoryError::connection(e.to_string());
                        if attempt < max_retries {
                            last_error = Some(err);
                            continue;
                        }
                        failed_queries.fetch_add(1, Ordering::Relaxed);
                        return Err(err);
                    }
                };

                total_queries.fetch_add(1, Ordering::Relaxed);
                match f.clone()(&mut conn) {
                    Ok(result) => return Ok(result),
                    Err(e) if e.is_retryable() && attempt < max_retries => {
                        last_error = Some(e);
                        continue;
                    }
                    Err(e) => {
                        failed_queries.fetch_add(1, Ordering::Relaxed);
                        return Err(e);
                    }
                }
            }

            failed_queries.fetch_add(1, Ordering::Relaxed);
            Err(last_error.unwrap_or_else(|| {
                RepositoryError::internal("Max retries exceeded with no error captured")
            }))
        })
        .await
        .map_err(|e| RepositoryError::internal(format!("Task join error: {}", e)))?
    }

    /// Get pool health statistics for monitoring.
    pub fn get_pool_stats(&self) -> PoolStats {
        let state = self.pool.state();
        PoolStats {
            connections_in_use: state.connections - state.idle_connections,
            idle_connections: state.idle_connections,
            total_connections: state.connections,
            max_size: self.config.max_pool_size,
            total_queries: self.total_queries.load(Ordering::Relaxed),
            failed_queries: self.failed_queries.load(Ordering::Relaxed),
            retried_operations: self.retried_operations.load(Ordering::Relaxed),
        }
    }

    /// Check if the database connection is healthy.
    pub async fn is_healthy(&self) -> bool {
        self.health_check().await.unwrap_or(false)
    }
}

fn map_diesel_error(err: diesel::result::Error) -> RepositoryError {
    RepositoryError::from(err)
}

#[async_trait]
impl ScientistRepository for PostgresRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn(|conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map(|_| true)
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn list_scientists(&self) -> RepositoryResult<Vec<Scientist>> {
        self.with_conn(|conn| {
            let rows = scientists::table
                .order(scientists::id.asc())
                .select(ScientistRow::as_select())
                .load::<ScientistRow>(conn)
                .map_err(map_diesel_error)?;
            Ok(rows.into_iter().map(Scientist::from).collect())
        })
        .await
    }

    async fn get_scientist(&self, id: ScientistId) -> RepositoryResult<Scientist> {
        self.with_conn(move |conn| {
            let row = scientists::table
                .filter(scientists::id.eq(id.value()))
                .select(ScientistRow::as_select())
                .first::<ScientistRow>(conn)
                .optional()
                .map_err(map_diesel_error)?
                .ok_or_else(|| RepositoryError::not_found("Scientist", id.value()))?;
            Ok(row.into())
        })
        .await
    }

    async fn get_scientist_with_missions(
        &self,
        id: ScientistId,
    ) -> RepositoryResult<ScientistWithMissions> {
        self.with_conn(move |conn| {
            let scientist_row = scientists::table
                .filter(scientists::id.eq(id.value()))
                .select(ScientistRow::as_select())
                .first::<ScientistRow>(conn)
                .optional()
                .map_err(map_diesel_error)?
                .ok_or_else(|| RepositoryError::not_found("Scientist", id.value()))?;

            let mission_rows = missions::table
                .inner_join(planets::table)
                .filter(missions::scientist_id.eq(id.value()))
                .order(missions::id.asc())
                .select((MissionRow::as_select(), PlanetRow::as_select()))
                .load::<(MissionRow, PlanetRow)>(conn)
                .map_err(map_diesel_error)?;

            Ok(ScientistWithMissions {
                scientist: scientist_row.into(),
                missions: mission_rows
                    .into_iter()
                    .map(|(m, p)| MissionWithPlanet {
                        mission: m.into(),
                        planet: p.into(),
                    })
                    .collect(),
            })
        })
        .await
    }

    async fn create_scientist(&self, scientist: NewScientist) -> RepositoryResult<Scientist> {
        self.with_conn(move |conn| {
            conn.transaction(|tx| {
                let inserted: ScientistRow = diesel::insert_into(scientists::table)
                    .values(&NewScientistRow {
                        name: scientist.name.clone(),
                        field_of_study: scientist.field_of_study.clone(),
                    })
                    .returning(ScientistRow::as_returning())
                    .get_result(tx)
                    .map_err(map_diesel_error)?;
                Ok(inserted.into())
            })
        })
        .await
    }

    async fn update_scientist(
        &self,
        id: ScientistId,
        update: ScientistUpdate,
    ) -> RepositoryResult<Scientist> {
        self.with_conn(move |conn| {
            conn.transaction(|tx| {
                // An all-None changeset is a no-op read; Diesel rejects
                // empty SET clauses.
                if update.is_empty() {
                    let row = scientists::table
                        .filter(scientists::id.eq(id.value()))
                        .select(ScientistRow::as_select())
                        .first::<ScientistRow>(tx)
                        .optional()
                        .map_err(map_diesel_error)?
                        .ok_or_else(|| RepositoryError::not_found("Scientist", id.value()))?;
                    return Ok(row.into());
                }

                let updated: Option<ScientistRow> =
                    diesel::update(scientists::table.filter(scientists::id.eq(id.value())))
                        .set(&ScientistChangeset {
                            name: update.name.clone(),
                            field_of_study: update.field_of_study.clone(),
                        })
                        .returning(ScientistRow::as_returning())
                        .get_result(tx)
                        .optional()
                        .map_err(map_diesel_error)?;

                updated
                    .map(Scientist::from)
                    .ok_or_else(|| RepositoryError::not_found("Scientist", id.value()))
            })
        })
        .await
    }

    async fn delete_scientist(&self, id: ScientistId) -> RepositoryResult<()> {
        self.with_conn(move |conn| {
            conn.transaction(|tx| {
                // Missions cascade via ON DELETE CASCADE.
                let deleted = diesel::delete(scientists::table.filter(scientists::id.eq(id.value())))
                    .execute(tx)
                    .map_err(map_diesel_error)?;
                if deleted == 0 {
                    return Err(RepositoryError::not_found("Scientist", id.value()));
                }
                Ok(())
            })
        })
        .await
    }
}

#[async_trait]
impl PlanetRepository for PostgresRepository {
    async fn list_planets(&self) -> RepositoryResult<Vec<Planet>> {
        self.with_conn(|conn| {
            let rows = planets::table
                .order(planets::id.asc())
                .select(PlanetRow::as_select())
                .load::<PlanetRow>(conn)
                .map_err(map_diesel_error)?;
            Ok(rows.into_iter().map(Planet::from).collect())
        })
        .await
    }

    async fn get_planet(&self, id: PlanetId) -> RepositoryResult<Planet> {
        self.with_conn(move |conn| {
            let row = planets::table
                .filter(planets::id.eq(id.value()))
                .select(PlanetRow::as_select())
                .first::<PlanetRow>(conn)
                .optional()
                .map_err(map_diesel_error)?
                .ok_or_else(|| RepositoryError::not_found("Planet", id.value()))?;
            Ok(row.into())
        })
        .await
    }

    async fn create_planet(&self, planet: NewPlanet) -> RepositoryResult<Planet> {
        self.with_conn(move |conn| {
            conn.transaction(|tx| {
                let inserted: PlanetRow = diesel::insert_into(planets::table)
                    .values(&NewPlanetRow {
                        name: planet.name.clone(),
                        distance_from_earth: planet.distance_from_earth.clone(),
                        nearest_star: planet.nearest_star.clone(),
                    })
                    .returning(PlanetRow::as_returning())
                    .get_result(tx)
                    .map_err(map_diesel_error)?;
                Ok(inserted.into())
            })
        })
        .await
    }
}

#[async_trait]
impl MissionRepository for PostgresRepository {
    async fn create_mission(&self, mission: NewMission) -> RepositoryResult<MissionWithRelations> {
        self.with_conn(move |conn| {
            conn.transaction(|tx| {
                // A dangling FK aborts here with ForeignKeyViolation, which
                // the error conversion surfaces as Validation.
                let inserted: MissionRow = diesel::insert_into(missions::table)
                    .values(&NewMissionRow {
                        name: mission.name.clone(),
                        scientist_id: mission.scientist_id.value(),
                        planet_id: mission.planet_id.value(),
                    })
                    .returning(MissionRow::as_returning())
                    .get_result(tx)
                    .map_err(map_diesel_error)?;

                let scientist_row = scientists::table
                    .filter(scientists::id.eq(inserted.scientist_id))
                    .select(ScientistRow::as_select())
                    .first::<ScientistRow>(tx)
                    .map_err(map_diesel_error)?;
                let planet_row = planets::table
                    .filter(planets::id.eq(inserted.planet_id))
                    .select(PlanetRow::as_select())
                    .first::<PlanetRow>(tx)
                    .map_err(map_diesel_error)?;

                Ok(MissionWithRelations {
                    mission: Mission::from(inserted),
                    scientist: scientist_row.into(),
                    planet: planet_row.into(),
                })
            })
        })
        .await
    }
}
