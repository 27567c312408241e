//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;

use crate::config::{Settings, StorageBackend};
use crate::domain::{ForumRepository, PostRepository, ThreadRepository, UserRepository};
use crate::infrastructure::database;
use crate::infrastructure::memory::InMemoryStore;
use crate::infrastructure::repositories::{
    PgForumRepository, PgPostRepository, PgThreadRepository, PgUserRepository,
};
use crate::presentation::http::{create_router, handlers::health};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub forums: Arc<dyn ForumRepository>,
    pub threads: Arc<dyn ThreadRepository>,
    pub posts: Arc<dyn PostRepository>,
    /// Present only for the postgres backend
    pub db: Option<PgPool>,
}

impl AppState {
    /// State backed by PostgreSQL repositories
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            forums: Arc::new(PgForumRepository::new(pool.clone())),
            threads: Arc::new(PgThreadRepository::new(pool.clone())),
            posts: Arc::new(PgPostRepository::new(pool.clone())),
            db: Some(pool),
        }
    }

    /// State backed by one shared in-memory store
    pub fn in_memory(store: InMemoryStore) -> Self {
        Self {
            users: Arc::new(store.clone()),
            forums: Arc::new(store.clone()),
            threads: Arc::new(store.clone()),
            posts: Arc::new(store),
            db: None,
        }
    }
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        health::init_server_start();

        let state = match settings.storage.backend {
            StorageBackend::Postgres => {
                let db = database::create_pool(&settings.database).await?;
                tracing::info!("Database connection pool created");

                database::run_migrations(&db).await?;
                tracing::info!("Database migrations applied");

                AppState::postgres(db)
            }
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage; data is lost on restart");
                AppState::in_memory(InMemoryStore::new())
            }
        };

        let router = create_router(state);

        // Bind to address
        let addr = settings.server.socket_addr()?;
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Listening on {}", addr);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
