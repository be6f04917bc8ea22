//! Provider-backed sentiment analyzers.

mod error;
mod gemini;

pub use error::AnalyzerError;
pub use gemini::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, GeminiAnalyzer, GeminiConfig};
