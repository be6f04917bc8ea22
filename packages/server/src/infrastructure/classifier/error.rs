use thiserror::Error;

/// Reasons a provider call did not yield a usable analysis.
///
/// Only construction errors reach callers; failures inside `analyze` are
/// logged and answered with the heuristic.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("API key is not a valid header value")]
    InvalidCredential,

    #[error("request timed out")]
    Timeout,

    #[error("HTTP request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("provider returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to decode provider envelope: {0}")]
    Envelope(#[source] reqwest::Error),

    #[error("provider response contained no candidate text")]
    EmptyResponse,

    #[error("no well-formed analysis object in provider output: {0:?}")]
    NoAnalysisObject(String),
}

impl From<reqwest::Error> for AnalyzerError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AnalyzerError::Timeout
        } else if e.is_decode() {
            AnalyzerError::Envelope(e)
        } else {
            AnalyzerError::Transport(e)
        }
    }
}
