//! Command line and environment configuration for the chat server.

use std::{net::SocketAddr, time::Duration};

use clap::Parser;

use crate::{
    infrastructure::classifier::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, GeminiConfig},
    usecase::{DelayWindow, InvalidDelayWindow},
};

/// Kibun chat server
#[derive(Parser, Clone)]
#[command(name = "kibun-server", version, about, long_about = None)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "KIBUN_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "KIBUN_PORT", default_value_t = 3001)]
    pub port: u16,

    /// Lower bound of the delay before a message is analyzed
    #[arg(long, env = "KIBUN_ANALYSIS_DELAY_MIN_MS", default_value_t = 2000)]
    pub analysis_delay_min_ms: u64,

    /// Upper bound of the delay before a message is analyzed
    #[arg(long, env = "KIBUN_ANALYSIS_DELAY_MAX_MS", default_value_t = 4000)]
    pub analysis_delay_max_ms: u64,

    /// Gemini API key; the keyword heuristic is used when absent
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_GEMINI_MODEL)]
    pub gemini_model: String,

    #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_GEMINI_BASE_URL)]
    pub gemini_base_url: String,

    /// Timeout for a single classifier request
    #[arg(long, env = "KIBUN_CLASSIFIER_TIMEOUT_MS", default_value_t = 5000)]
    pub classifier_timeout_ms: u64,

    /// Default log level when RUST_LOG is unset
    #[arg(long, env = "KIBUN_LOG_LEVEL", default_value = "debug")]
    pub log_level: String,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn delay_window(&self) -> Result<DelayWindow, InvalidDelayWindow> {
        DelayWindow::new(
            Duration::from_millis(self.analysis_delay_min_ms),
            Duration::from_millis(self.analysis_delay_max_ms),
        )
    }

    /// `None` when no (non-blank) API key is configured.
    pub fn gemini(&self) -> Option<GeminiConfig> {
        let api_key = self.gemini_api_key.as_deref()?.trim();
        if api_key.is_empty() {
            return None;
        }
        Some(GeminiConfig {
            api_key: api_key.to_string(),
            model: self.gemini_model.clone(),
            base_url: self.gemini_base_url.clone(),
            timeout: Duration::from_millis(self.classifier_timeout_ms),
        })
    }
}
