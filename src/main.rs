mod config;
mod fetcher;
mod formatter;
mod model;
mod notifier;
mod parser;
mod pipeline;

use crate::config::load_config;
use crate::fetcher::HttpFetcher;
use crate::notifier::LineNotifier;
use crate::pipeline::{exit_code, run};
use std::env;
use std::process;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let rules_path = env::args()
        .nth(1)
        .unwrap_or_else(|| "config.json".to_string());

    let config = match load_config(&rules_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            process::exit(1);
        }
    };

    let fetcher = match HttpFetcher::new(&config.rules) {
        Ok(f) => f,
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            process::exit(1);
        }
    };

    let notifier = match LineNotifier::new(
        config.notify_token.clone(),
        config.rules.notify_endpoint.clone(),
        config.rules.request_timeout_secs,
    ) {
        Ok(n) => n,
        Err(e) => {
            error!("Failed to build notifier client: {}", e);
            process::exit(1);
        }
    };

    info!("Checking availability at {}", config.target_url);
    let result = run(&fetcher, &notifier, &config).await;
    process::exit(exit_code(&result, config.rules.legacy_exit_codes));
}
