use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

pub mod analytics;
pub mod config;
pub mod format;
pub mod notifications;
pub mod pages;
pub mod registries;
pub mod rpc;
pub mod service;
pub mod storage;
pub mod tools;
pub mod usage;

use analytics::Analytics;
use config::AppConfig;
use notifications::Notifications;
use service::ToolService;
use storage::{FileStore, MemoryStore, StoreError, UsageStore};

pub struct AppState {
    pub config: AppConfig,
    pub tools: ToolService,
    pub analytics: Arc<Analytics>,
    pub notifications: Notifications,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn UsageStore>) -> Self {
        let analytics = Arc::new(Analytics::new(store.clone()));
        Self {
            tools: ToolService::new(store.clone(), config.daily_limit, analytics.clone()),
            analytics,
            notifications: Notifications::new(store),
            config,
        }
    }

    /// Opens the configured store: a JSON file when `storage_path` is set,
    /// memory otherwise.
    pub fn from_config(config: AppConfig) -> Result<Self, StoreError> {
        let store: Arc<dyn UsageStore> = match &config.storage_path {
            Some(path) => Arc::new(FileStore::open(path)?),
            None => Arc::new(MemoryStore::new()),
        };
        Ok(Self::new(config, store))
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Catalog page and form posts
        .route("/", get(pages::index))
        .route("/tools/{id}", post(pages::run_tool))
        .route("/notify", post(pages::notify))
        // JSON-RPC endpoint
        .route("/rpc", post(rpc::rpc_handler))
        .layer(cors)
        .with_state(state)
}
