//! Google Gemini backed sentiment analyzer.
//!
//! Sends the message text to the `generateContent` endpoint and decodes the
//! first well-formed analysis object found in the model output. Any failure
//! along the way falls back to [`heuristic::classify`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

use super::error::AnalyzerError;
use crate::domain::{Analysis, Sentiment, SentimentAnalyzer, heuristic};

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

const DEFAULT_MOOD: &str = "calm";
const DEFAULT_CONFIDENCE: f64 = 0.5;

/// Connection settings for [`GeminiAnalyzer`].
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    /// Upper bound for the whole HTTP exchange
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct GeminiAnalyzer {
    client: reqwest::Client,
    endpoint: String,
}

impl GeminiAnalyzer {
    pub fn new(config: GeminiConfig) -> Result<Self, AnalyzerError> {
        let mut headers = HeaderMap::new();
        let mut api_key =
            HeaderValue::from_str(&config.api_key).map_err(|_| AnalyzerError::InvalidCredential)?;
        api_key.set_sensitive(true);
        headers.insert("x-goog-api-key", api_key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(AnalyzerError::Client)?;

        let endpoint = format!(
            "{}/v1beta/models/{}:generateContent",
            config.base_url.trim_end_matches('/'),
            config.model
        );

        Ok(Self { client, endpoint })
    }

    async fn request(&self, text: &str) -> Result<Analysis, AnalyzerError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&GenerateContentRequest::for_text(text))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalyzerError::Status { status, body });
        }

        let envelope: GenerateContentResponse = response.json().await?;
        let output = envelope
            .first_text()
            .ok_or(AnalyzerError::EmptyResponse)?;

        extract_analysis(&output).ok_or(AnalyzerError::NoAnalysisObject(output))
    }
}

#[async_trait]
impl SentimentAnalyzer for GeminiAnalyzer {
    async fn analyze(&self, text: &str) -> Analysis {
        match self.request(text).await {
            Ok(analysis) => analysis,
            Err(e) => {
                tracing::warn!("Gemini analysis failed, using fallback: {}", e);
                heuristic::classify(text)
            }
        }
    }
}

/// Decode the first `{...}` in `output` that matches the analysis schema.
///
/// Models like to wrap JSON in prose or code fences; every `{` is tried as
/// the start of an object, and trailing text after the object is ignored.
fn extract_analysis(output: &str) -> Option<Analysis> {
    output.match_indices('{').find_map(|(start, _)| {
        let mut objects =
            serde_json::Deserializer::from_str(&output[start..]).into_iter::<ProviderAnalysis>();
        match objects.next() {
            Some(Ok(candidate)) => candidate.into_analysis(),
            _ => None,
        }
    })
}

/// Analysis object as the model is asked to produce it.
#[derive(Debug, Deserialize)]
struct ProviderAnalysis {
    sentiment: String,
    #[serde(default)]
    mood: Option<String>,
    #[serde(default)]
    confidence: Option<f64>,
    #[serde(default)]
    emotions: Option<Vec<String>>,
}

impl ProviderAnalysis {
    fn into_analysis(self) -> Option<Analysis> {
        let sentiment = match self.sentiment.trim().to_lowercase().as_str() {
            "positive" => Sentiment::Positive,
            "negative" => Sentiment::Negative,
            "neutral" => Sentiment::Neutral,
            _ => return None,
        };
        let mood = self
            .mood
            .map(|m| m.trim().to_lowercase())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_MOOD.to_string());

        Some(Analysis {
            sentiment,
            mood,
            confidence: self.confidence.unwrap_or(DEFAULT_CONFIDENCE).clamp(0.0, 1.0),
            emotions: self.emotions.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    fn for_text(text: &str) -> Self {
        let prompt = format!(
            "Classify the sentiment and mood of the following chat message.\n\
             Message: {text:?}\n\
             Answer with a single JSON object and nothing else, shaped exactly like:\n\
             {{\"sentiment\": \"positive|negative|neutral\", \"mood\": \"happy|sad|angry|excited|calm|confused|curious\", \
             \"confidence\": 0.85, \"emotions\": [\"joy\"]}}"
        );
        Self {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.1,
                max_output_tokens: 100,
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateContentResponse {
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()
            .map(|part| part.text)
            .filter(|text| !text.trim().is_empty())
    }
}
