//! Application state - shared across all handlers.

use std::sync::Arc;

use actix_web::web;

use forum_core::ports::{PasswordService, Repositories, TokenService};
use forum_core::services::{PostService, UserService};
use forum_infra::database::{DatabaseConfig, DatabaseConnections};
use forum_infra::{Argon2PasswordService, InMemoryStore, JwtTokenService};

#[cfg(feature = "postgres")]
use forum_infra::database::{PostgresPostRepository, PostgresUserRepository};

use crate::config::AppConfig;
use crate::observability::HttpMetrics;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub users: UserService,
    pub tokens: Arc<dyn TokenService>,
    pub db: Option<Arc<DatabaseConnections>>,
    pub metrics: Arc<HttpMetrics>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let (db, repos) = open_repositories(config.database.as_ref()).await;

        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));
        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

        let state = Self::with_repositories(repos, passwords, tokens, db)?;
        tracing::info!("Application state initialized");

        Ok(state)
    }

    pub fn with_repositories(
        repos: Repositories,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
        db: Option<Arc<DatabaseConnections>>,
    ) -> Result<Self, prometheus::Error> {
        Ok(Self {
            posts: PostService::new(repos.posts),
            users: UserService::new(repos.users, passwords, tokens.clone()),
            tokens,
            db,
            metrics: Arc::new(HttpMetrics::new()?),
        })
    }

    /// Register the state and the token service as app data.
    ///
    /// The `Identity` extractor looks the token service up on its own.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.clone()))
            .app_data(web::Data::new(self.tokens.clone()));
    }
}

fn in_memory() -> Repositories {
    Repositories::from_store(Arc::new(InMemoryStore::new()))
}

#[cfg(feature = "postgres")]
async fn open_repositories(
    db_config: Option<&DatabaseConfig>,
) -> (Option<Arc<DatabaseConnections>>, Repositories) {
    let Some(config) = db_config else {
        tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        return (None, in_memory());
    };

    match DatabaseConnections::init(config).await {
        Ok(connections) => {
            let conn = Arc::new(connections);
            let repos = Repositories::new(
                Arc::new(PostgresPostRepository::new(conn.main.clone())),
                Arc::new(PostgresUserRepository::new(conn.main.clone())),
            );
            (Some(conn), repos)
        }
        Err(e) => {
            tracing::error!(
                "Failed to connect to database: {}. Using in-memory fallback.",
                e
            );
            (None, in_memory())
        }
    }
}

#[cfg(not(feature = "postgres"))]
async fn open_repositories(
    _db_config: Option<&DatabaseConfig>,
) -> (Option<Arc<DatabaseConnections>>, Repositories) {
    tracing::info!("Running without postgres feature - using in-memory store");
    (None, in_memory())
}
