//! Narrator trait and the Gemini HTTP provider.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, warn};

use crate::types::NarrateError;

/// A generative narrative capability.
///
/// Implementations are injected where needed; nothing reaches a narrator
/// through ambient global state.
#[async_trait]
pub trait Narrator: Send + Sync {
    /// Generate prose for a prompt.
    async fn generate(&self, prompt: &str) -> Result<String, NarrateError>;
}

/// Substitute a placeholder for any failed or empty generation.
///
/// This is the entire degradation policy for collaborator failures: text
/// passes through, everything else becomes the caller-supplied
/// placeholder with a logged warning. Nothing here aborts the request.
pub fn with_placeholder(result: Result<String, NarrateError>, placeholder: &str) -> String {
    match result {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => {
            warn!("Narrator returned empty text; substituting placeholder");
            placeholder.to_string()
        }
        Err(e) => {
            warn!("Narrator failed: {}; substituting placeholder", e);
            placeholder.to_string()
        }
    }
}

/// Default Gemini model.
const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Narrator backed by the Gemini `generateContent` endpoint.
pub struct GeminiNarrator {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiNarrator {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
        }
    }

    /// Override the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the endpoint base URL (used by tests and proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build from the `GEMINI_API_KEY` environment variable, if set.
    pub fn from_env() -> Option<Self> {
        match std::env::var("GEMINI_API_KEY") {
            Ok(key) if !key.trim().is_empty() => Some(Self::new(key)),
            _ => None,
        }
    }
}

#[async_trait]
impl Narrator for GeminiNarrator {
    async fn generate(&self, prompt: &str) -> Result<String, NarrateError> {
        if self.api_key.trim().is_empty() {
            return Err(NarrateError::Unconfigured);
        }

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let body = json!({
            "contents": [{"parts": [{"text": prompt}]}],
        });

        debug!("Requesting narration from model {}", self.model);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| NarrateError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(NarrateError::Api { status, message });
        }

        let parsed: serde_json::Value = response
            .json()
            .await
            .map_err(|e| NarrateError::Http(e.to_string()))?;

        let text = parsed["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .unwrap_or("")
            .trim()
            .to_string();

        if text.is_empty() {
            return Err(NarrateError::EmptyResponse);
        }
        Ok(text)
    }
}
