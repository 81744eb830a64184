use std::sync::Arc;

use microtools_hub::{build_router, config::AppConfig, AppState};
use shuttle_runtime::SecretStore;
use tracing::info;

#[shuttle_runtime::main]
async fn main(#[shuttle_runtime::Secrets] secrets: SecretStore) -> shuttle_axum::ShuttleAxum {
    let config = AppConfig::from_secrets(&secrets).expect("Invalid configuration");
    info!(
        "Starting MicroToolsHub (daily limit {}, storage {:?})",
        config.daily_limit, config.storage_path
    );

    let state = AppState::from_config(config).expect("Failed to open usage storage");
    let router = build_router(Arc::new(state));

    Ok(router.into())
}
