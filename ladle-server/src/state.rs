//! Application state for ladle-server

use sqlx::PgPool;

use crate::config::Config;
use crate::media::MediaStore;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub pool: PgPool,
    /// Local media storage for recipe images
    pub media: MediaStore,
}

impl AppState {
    /// Create a new AppState
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = PgPool::connect(&config.database_url).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");

        let media = MediaStore::new(&config.media_root)?;

        Ok(Self { pool, media })
    }
}
