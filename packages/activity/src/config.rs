//! Command line and environment configuration for the activity service.

use clap::Parser;

/// Kibun activity tracker
#[derive(Parser, Debug, Clone)]
#[command(name = "kibun-activity", version, about, long_about = None)]
pub struct ActivityConfig {
    /// Address to bind
    #[arg(long, env = "ACTIVITY_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "ACTIVITY_PORT", default_value_t = 3002)]
    pub port: u16,

    /// Default log level when RUST_LOG is unset
    #[arg(long, env = "ACTIVITY_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl ActivityConfig {
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
