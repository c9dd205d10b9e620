//! Generative description client for the Gemini `generateContent` endpoint

use crate::error::GenerationError;
use crate::models::Coordinate;
use crate::prompts::{
    chat_prompt, describe_location_prompt, DESCRIPTION_ERROR, DESCRIPTION_UNAVAILABLE,
};
use async_trait::async_trait;
use log::{error, warn};
use serde_json::{json, Value};

/// Turns a map position into prose
#[async_trait]
pub trait LocationNarrator: Send + Sync {
    /// Always yields displayable text; failures become a fallback message
    async fn describe_location(&self, coordinate: Coordinate, address: Option<&str>) -> String;

    async fn answer_question(
        &self,
        message: &str,
        center: Coordinate,
        address: Option<&str>,
    ) -> Result<String, GenerationError>;
}

/// Why a generation call produced no text
enum CallFailure {
    /// The request could not be sent or the body was not JSON
    Transport(String),
    /// JSON came back without `candidates[0].content.parts[0].text`
    Malformed(Value),
}

pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            model: model.into(),
            api_key,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    /// One POST, no retry. The HTTP status is not inspected: error bodies are
    /// JSON too and fall through to the shape check.
    async fn generate(&self, prompt: &str) -> Result<String, CallFailure> {
        let body = json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }]
        });

        let mut request = self.client.post(self.endpoint()).json(&body);
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| CallFailure::Transport(e.to_string()))?;

        let data: Value = response
            .json()
            .await
            .map_err(|e| CallFailure::Transport(e.to_string()))?;

        match extract_text(&data) {
            Some(text) => Ok(text.to_string()),
            None => Err(CallFailure::Malformed(data)),
        }
    }
}

/// `candidates[0].content.parts[0].text`, when present and non-empty
fn extract_text(data: &Value) -> Option<&str> {
    data.get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .get(0)?
        .get("text")?
        .as_str()
        .filter(|text| !text.trim().is_empty())
}

#[async_trait]
impl LocationNarrator for GeminiClient {
    async fn describe_location(&self, coordinate: Coordinate, address: Option<&str>) -> String {
        let prompt = describe_location_prompt(coordinate, address);
        match self.generate(&prompt).await {
            Ok(text) => text,
            Err(CallFailure::Malformed(data)) => {
                error!("[gemini] Unexpected response format: {}", data);
                DESCRIPTION_UNAVAILABLE.to_string()
            }
            Err(CallFailure::Transport(e)) => {
                error!("[gemini] Error fetching content: {}", e);
                DESCRIPTION_ERROR.to_string()
            }
        }
    }

    async fn answer_question(
        &self,
        message: &str,
        center: Coordinate,
        address: Option<&str>,
    ) -> Result<String, GenerationError> {
        let prompt = chat_prompt(message, center, address);
        self.generate(&prompt).await.map_err(|failure| match failure {
            CallFailure::Malformed(data) => {
                warn!("[gemini] Unexpected chat response format: {}", data);
                GenerationError::MalformedResponse
            }
            CallFailure::Transport(e) => GenerationError::Transport(e),
        })
    }
}
