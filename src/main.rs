mod app;
mod auth;
mod bookings;
mod config;
mod error;
mod extract;
mod state;
mod store;
mod vehicles;

use crate::{config::AppConfig, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "ev_booking=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = AppConfig::from_env()?;
    auth::services::warm_up();
    let app_state = AppState::init(config).await?;

    vehicles::seed::seed_vehicles(&app_state).await?;

    let config = app_state.config.clone();
    app::serve(app::build_app(app_state), &config).await
}
