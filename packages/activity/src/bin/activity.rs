//! Kibun activity tracking API.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin kibun-activity -- --port 3002
//! ```

use clap::Parser;
use kibun_activity::ActivityConfig;
use kibun_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let config = ActivityConfig::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &config.log_level);

    if let Err(e) = kibun_activity::run_activity_server(config).await {
        tracing::error!("Activity server error: {}", e);
        std::process::exit(1);
    }
}
