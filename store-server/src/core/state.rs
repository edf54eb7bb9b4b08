use std::path::PathBuf;
use std::sync::Arc;

use sqlx::SqlitePool;

use crate::core::{BackgroundTasks, Config};
use crate::db::DbService;
use crate::notify::Notifier;
use crate::stock_watch;

/// Server state - shared handles for every request
///
/// Cheap to clone (`Arc`/pool handles only); one instance is shared by
/// all HTTP handlers and background workers.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// Notification dispatcher
    pub notifier: Arc<Notifier>,
}

impl ServerState {
    /// Build state around an existing pool (tests, embedded use).
    pub fn with_pool(config: Config, pool: SqlitePool) -> Self {
        let notifier = Arc::new(Notifier::new(config.notify.clone()));
        Self {
            config,
            pool,
            notifier,
        }
    }

    /// Initialize server state: working directory, database, dispatcher.
    ///
    /// # Panics
    ///
    /// Panics when the working directory or database cannot be set up —
    /// the server has nothing to serve without them.
    pub async fn initialize(config: &Config) -> Self {
        let work_dir = PathBuf::from(&config.work_dir);
        std::fs::create_dir_all(&work_dir).expect("Failed to create work directory");

        let db_path = work_dir.join("storefront.db");
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");

        Self::with_pool(config.clone(), db_service.pool)
    }

    /// Start background tasks. Must be called before `Server::run()`.
    ///
    /// Currently: the back-in-stock sweep (periodic).
    pub fn start_background_tasks(&self) -> BackgroundTasks {
        let mut tasks = BackgroundTasks::new();

        let state = self.clone();
        let token = tasks.shutdown_token();
        tasks.spawn("stock_sweep", async move {
            stock_watch::run(state, token).await;
        });

        tasks
    }

    pub fn work_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.work_dir)
    }
}
