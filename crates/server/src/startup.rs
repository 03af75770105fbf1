use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, StorageBackend};
use migration::MigratorTrait;
use service::storage::{memory::MemoryRepository, seaorm::SeaOrmRepository, CarWashRepository};
use service::CarWashService;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Where the running configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(String),
    /// No file at this path; defaults plus environment variables.
    Environment(String),
}

impl ConfigSource {
    /// Logged by the caller once a subscriber is installed.
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => info!(%path, "configuration loaded from file"),
            ConfigSource::Environment(path) => warn!(%path, "config file not found, using environment"),
        }
    }
}

/// `config.toml` (or `CONFIG_PATH`) when present, otherwise defaults plus
/// `SERVER_HOST` / `SERVER_PORT` / `STORAGE_BACKEND` / `DATABASE_URL`.
pub fn load_config() -> Result<(AppConfig, ConfigSource), StartupError> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    if std::path::Path::new(&path).exists() {
        let cfg = AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(format!("{path}: {e}")))?;
        Ok((cfg, ConfigSource::File(path)))
    } else {
        let cfg = AppConfig::from_env().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
        Ok((cfg, ConfigSource::Environment(path)))
    }
}

/// Pick the store once; everything downstream only sees the trait.
async fn build_repository(cfg: &AppConfig) -> anyhow::Result<Arc<dyn CarWashRepository>> {
    match cfg.storage.backend {
        StorageBackend::Memory => {
            info!(backend = "memory", "storage ready");
            Ok(Arc::new(MemoryRepository::new()))
        }
        StorageBackend::Postgres => {
            let db = models::db::connect_with_config(&cfg.database).await?;
            migration::Migrator::up(&db, None).await?;
            info!(backend = "postgres", "storage ready, migrations applied");
            Ok(Arc::new(SeaOrmRepository::new(db)))
        }
    }
}

/// Router with state; used by `run` and by the router tests.
pub fn build_app(service: CarWashService) -> Router {
    routes::build_router(AppState::new(service), build_cors())
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address: {e}")))
}

/// Public entry: build the app and serve until Ctrl+C.
pub async fn run(cfg: AppConfig) -> Result<(), StartupError> {
    let repo = build_repository(&cfg).await?;
    let app = build_app(CarWashService::new(repo));

    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting carwash server");
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(anyhow::Error::from)?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await
        .map_err(anyhow::Error::from)?;
    Ok(())
}
