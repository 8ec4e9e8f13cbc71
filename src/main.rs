use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod models;
mod services;
mod utils;
mod web;

use api::sth::SthClient;
use config::DashboardConfig;
use models::Window;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("sth_dash=debug".parse().unwrap())
                .add_directive("reqwest=warn".parse().unwrap())
                .add_directive("hyper=warn".parse().unwrap()),
        )
        .with_target(true)
        .init();

    info!("Starting STH sensor dashboard...");

    let config = DashboardConfig::from_env();
    info!(
        "Upstream STH at http://{}:{}, device {} (type {})",
        config.sth_host, config.sth_port, config.device_id, config.device_type
    );

    let client = SthClient::new(&config);
    let window: web::SharedWindow = Arc::new(RwLock::new(Window::default()));

    // Web server runs in the background; the scheduler owns this task
    {
        let bind_addr = config.bind_addr();
        let window = window.clone();
        tokio::spawn(async move {
            if let Err(e) = web::run_server(&bind_addr, window).await {
                error!("Web server error: {}", e);
            }
        });
    }

    info!(
        "Polling every {}s, keeping the last {} samples per signal",
        config.poll_interval_secs, config.last_n
    );

    // Ticks are strictly serialized: a fetch cycle that overruns the
    // interval delays the next tick instead of overlapping it.
    let mut ticker = tokio::time::interval(Duration::from_secs(config.poll_interval_secs));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        match services::window_service::refresh_window(&client, config.last_n).await {
            Ok(Some(new_window)) => {
                let samples = new_window.temperature.len();
                let mut guard = window.write().await;
                *guard = new_window;
                debug!("Window committed ({} temperature samples)", samples);
            }
            Ok(None) => {
                warn!("Tick skipped: at least one signal had no data, keeping stale window");
            }
            Err(e) => {
                error!("Tick aborted, keeping stale window: {}", e);
            }
        }
    }
}
