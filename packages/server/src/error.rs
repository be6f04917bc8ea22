//! Startup errors of the chat server.

use thiserror::Error;

use crate::{infrastructure::classifier::AnalyzerError, usecase::InvalidDelayWindow};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid configuration: {0}")]
    DelayWindow(#[from] InvalidDelayWindow),

    #[error("failed to build sentiment analyzer: {0}")]
    Analyzer(#[from] AnalyzerError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}
