use crate::auth::repo::UserStore;
use crate::config::AppConfig;
use crate::store::memory::MemoryStore;
use crate::store::postgres::{self, PgStore};
use crate::tours::repo::TourStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub tours: Arc<dyn TourStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Environment-driven startup: Postgres-backed stores plus migrations.
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let pool = postgres::connect(&config.database_url).await?;
        if let Err(error) = sqlx::migrate!("./migrations").run(&pool).await {
            tracing::warn!(%error, "migrations did not run, continuing with existing schema");
        }

        let store = PgStore::new(pool);
        Ok(Self::from_parts(
            Arc::new(store.clone()),
            Arc::new(store),
            config,
        ))
    }

    pub fn from_parts(
        users: Arc<dyn UserStore>,
        tours: Arc<dyn TourStore>,
        config: Arc<AppConfig>,
    ) -> Self {
        Self {
            users,
            tours,
            config,
        }
    }

    /// State backed by in-process stores, for tests and local experiments.
    pub fn in_memory(config: AppConfig) -> Self {
        let store = Arc::new(MemoryStore::default());
        Self::from_parts(store.clone(), store, Arc::new(config))
    }
}
