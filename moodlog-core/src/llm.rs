//! Model provider boundary.
//!
//! The journal only needs "complete this prompt", so the seam is the [`LanguageModel`] trait.
//! [`ChatCompletionsClient`] implements it against any OpenAI-compatible
//! `POST {base_url}/chat/completions` endpoint (Groq by default).

use crate::config::ModelSettings;
use crate::error::ModelError;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// A synchronous text-completion capability.
pub trait LanguageModel {
    fn complete(&self, prompt: &str) -> Result<String, ModelError>;
}

/// Blocking client for OpenAI-compatible chat completion APIs.
pub struct ChatCompletionsClient {
    settings: ModelSettings,
    api_key: String,
    client: reqwest::blocking::Client,
}

impl ChatCompletionsClient {
    /// Builds a client reading the API key from `settings.api_key_env`.
    pub fn new(settings: ModelSettings) -> Result<Self, ModelError> {
        let api_key = std::env::var(&settings.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ModelError::MissingApiKey {
                var: settings.api_key_env.clone(),
            })?;
        Self::with_api_key(settings, api_key)
    }

    pub fn with_api_key(settings: ModelSettings, api_key: String) -> Result<Self, ModelError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Ok(Self {
            settings,
            api_key,
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.settings.base_url.trim_end_matches('/')
        )
    }

    fn build_request_body(&self, prompt: &str) -> serde_json::Value {
        serde_json::json!({
            "model": self.settings.model,
            "temperature": self.settings.temperature,
            "messages": [
                { "role": "user", "content": prompt }
            ],
        })
    }
}

impl LanguageModel for ChatCompletionsClient {
    fn complete(&self, prompt: &str) -> Result<String, ModelError> {
        let endpoint = self.endpoint();
        debug!(model = %self.settings.model, %endpoint, "requesting completion");

        let response = self
            .client
            .post(&endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.build_request_body(prompt))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ModelError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletion = response.json()?;
        completion_text(completion)
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Text of the first choice, trimmed. Blank completions are an error.
fn completion_text(completion: ChatCompletion) -> Result<String, ModelError> {
    completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or(ModelError::EmptyResponse)
}
