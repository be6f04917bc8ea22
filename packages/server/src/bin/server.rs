//! Kibun chat server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin kibun-server -- --port 3001
//! ```

use clap::Parser;
use kibun_server::ServerConfig;
use kibun_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &config.log_level);

    // Run the server
    if let Err(e) = kibun_server::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
