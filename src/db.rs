use crate::config::AppConfig;
use crate::errors::ServiceError;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Type alias for a database connection pool
pub type DbPool = DatabaseConnection;

/// Configuration for the store connection
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Store connection URL
    pub url: String,
    /// Maximum number of connections
    pub max_connections: u32,
    /// Minimum number of connections
    pub min_connections: u32,
    /// Connection timeout duration
    pub connect_timeout: Duration,
    /// Idle timeout duration
    pub idle_timeout: Duration,
    /// Acquire connection timeout
    pub acquire_timeout: Duration,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            acquire_timeout: Duration::from_secs(8),
        }
    }
}

impl From<&AppConfig> for DbConfig {
    fn from(cfg: &AppConfig) -> Self {
        Self {
            url: cfg.database_url.clone(),
            max_connections: cfg.db_max_connections,
            min_connections: cfg.db_min_connections,
            connect_timeout: Duration::from_secs(cfg.db_connect_timeout_secs),
            idle_timeout: Duration::from_secs(cfg.db_idle_timeout_secs),
            acquire_timeout: Duration::from_secs(cfg.db_acquire_timeout_secs),
        }
    }
}

/// Establishes a connection pool to the store.
pub async fn establish_connection(database_url: &str) -> Result<DbPool, ServiceError> {
    let config = DbConfig {
        url: database_url.to_string(),
        ..Default::default()
    };

    establish_connection_with_config(&config).await
}

/// Establishes a connection pool with explicit tuning.
pub async fn establish_connection_with_config(config: &DbConfig) -> Result<DbPool, ServiceError> {
    debug!("Configuring store connection with: {:?}", config);

    let mut opt = ConnectOptions::new(config.url.clone());
    opt.max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(config.connect_timeout)
        .acquire_timeout(config.acquire_timeout)
        .idle_timeout(config.idle_timeout)
        .sqlx_logging(false);

    info!(
        "Connecting to store with max_connections={}",
        config.max_connections
    );

    let db_pool = Database::connect(opt)
        .await
        .map_err(|e| ServiceError::StoreUnavailable(e.to_string()))?;

    info!("Store connection pool established");

    Ok(db_pool)
}

/// Establish the pool using `AppConfig` tuning.
pub async fn establish_connection_from_app_config(cfg: &AppConfig) -> Result<DbPool, ServiceError> {
    let db_cfg: DbConfig = cfg.into();
    establish_connection_with_config(&db_cfg).await
}

/// Runs the embedded migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), ServiceError> {
    info!("Running store migrations");
    let start = std::time::Instant::now();

    let result = crate::migrator::Migrator::up(pool, None)
        .await
        .map_err(ServiceError::DatabaseError);

    match &result {
        Ok(_) => info!("Store migrations completed in {:?}", start.elapsed()),
        Err(e) => error!("Store migrations failed after {:?}: {}", start.elapsed(), e),
    }

    result
}

/// Checks that the store connection is alive.
pub async fn check_connection(pool: &DbPool) -> Result<(), ServiceError> {
    pool.ping()
        .await
        .map_err(|e| ServiceError::StoreUnavailable(e.to_string()))
}

/// Closes the connection pool.
pub async fn close_pool(pool: DbPool) -> Result<(), ServiceError> {
    info!("Closing store connection pool");
    pool.close().await.map_err(ServiceError::DatabaseError)
}

fn is_transient(err: &DbErr) -> bool {
    matches!(err, DbErr::Conn(_) | DbErr::ConnectionAcquire(_))
}

/// Runs one store operation under the request-level store timeout, retrying
/// once on a transient connection error.
///
/// The closure is invoked per attempt, so captured inputs must be cloned
/// into the future it builds.
pub async fn run_store_op<T, F, Fut>(
    operation: &str,
    timeout: Duration,
    mut op: F,
) -> Result<T, ServiceError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DbErr>>,
{
    let mut attempts = 0u8;
    loop {
        attempts += 1;
        match tokio::time::timeout(timeout, op()).await {
            Err(_) => {
                error!(operation, ?timeout, "store operation timed out");
                return Err(ServiceError::StoreUnavailable(format!(
                    "{operation} timed out"
                )));
            }
            Ok(Ok(value)) => return Ok(value),
            Ok(Err(err)) if is_transient(&err) && attempts == 1 => {
                warn!(operation, error = %err, "transient store error, retrying once");
            }
            Ok(Err(err)) if is_transient(&err) => {
                error!(operation, error = %err, "store unreachable after retry");
                return Err(ServiceError::StoreUnavailable(err.to_string()));
            }
            Ok(Err(err)) => return Err(ServiceError::DatabaseError(err)),
        }
    }
}
