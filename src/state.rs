//! Shared application state

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::config::Config;
use crate::db;
use crate::error::AppError;
use crate::services::image_store::{ImageStore, LocalImageStore};
use crate::util::hash_password;

#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool
    pub pool: SqlitePool,
    pub config: Config,
    /// Blob store for uploaded menu images
    pub images: Arc<dyn ImageStore>,
}

impl AppState {
    /// Open the database, apply migrations and make sure the bootstrap
    /// super admin exists.
    pub async fn new(config: &Config) -> Result<Self, AppError> {
        let pool = db::connect(&config.database_path).await?;

        let password_hash = hash_password(&config.default_admin_password)
            .map_err(|e| AppError::internal(format!("Failed to hash bootstrap password: {e}")))?;
        let created =
            db::users::ensure_default_admin(&pool, &config.default_admin_email, &password_hash)
                .await?;
        if created {
            tracing::warn!(
                email = %config.default_admin_email,
                "Bootstrap super admin created - change its password immediately"
            );
        }

        let images: Arc<dyn ImageStore> = Arc::new(LocalImageStore::new(&config.upload_dir));

        Ok(Self {
            pool,
            config: config.clone(),
            images,
        })
    }
}
