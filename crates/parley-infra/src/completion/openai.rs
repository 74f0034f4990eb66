//! OpenAiCompletionClient -- live [`CompletionClient`] for any
//! OpenAI-compatible chat-completions endpoint.
//!
//! Sends one request per completion with bearer authentication. The
//! API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in Debug output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use parley_core::completion::{CompletionClient, CompletionVariant};
use parley_types::error::CompletionError;

use super::types::{ChatCompletionRequest, ChatCompletionResponse, WireMessage};

const SYSTEM_STANDARD: &str =
    "You are a helpful assistant. Provide clear and useful responses to user questions.";
const SYSTEM_ALTERNATE: &str =
    "You are a helpful assistant. Please provide a different perspective or approach to the user's question.";

/// Timeout bound applied to every completion call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const MAX_TOKENS: u32 = 1000;

/// Live completion client for OpenAI-compatible APIs.
///
/// # API Key Security
///
/// Does NOT derive Debug to prevent accidental exposure of internal
/// state; the key is stored as a [`SecretString`] and only exposed when
/// constructing the Authorization header.
pub struct OpenAiCompletionClient {
    client: reqwest::Client,
    api_key: SecretString,
    api_url: String,
    model: String,
}

impl OpenAiCompletionClient {
    /// Create a new client for the given endpoint and model.
    pub fn new(api_key: SecretString, api_url: String, model: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            api_url,
            model,
        }
    }

    /// The model sent with every request.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request(&self, prompt: &str, variant: CompletionVariant) -> ChatCompletionRequest {
        let (system, temperature) = match variant {
            CompletionVariant::Standard => (SYSTEM_STANDARD, 0.7),
            // Slightly higher temperature for more variation on regenerate
            CompletionVariant::AlternatePerspective => (SYSTEM_ALTERNATE, 0.8),
        };

        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                WireMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                WireMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            max_tokens: Some(MAX_TOKENS),
            temperature: Some(temperature),
        }
    }
}

impl CompletionClient for OpenAiCompletionClient {
    async fn complete(
        &self,
        prompt: &str,
        variant: CompletionVariant,
    ) -> Result<String, CompletionError> {
        let request = self.build_request(prompt, variant);

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;

        if !status.is_success() {
            if status == reqwest::StatusCode::UNAUTHORIZED {
                return Err(CompletionError::AuthenticationFailed);
            }
            let message = serde_json::from_slice::<ChatCompletionResponse>(&body)
                .ok()
                .and_then(|parsed| parsed.error)
                .map(|error| error.message)
                .unwrap_or_else(|| format!("request failed with status {status}"));
            return Err(CompletionError::Provider { message });
        }

        let parsed: ChatCompletionResponse = serde_json::from_slice(&body)
            .map_err(|e| CompletionError::Deserialization(e.to_string()))?;

        if let Some(error) = parsed.error {
            return Err(CompletionError::Provider {
                message: error.message,
            });
        }

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(CompletionError::EmptyResponse)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> CompletionError {
    if err.is_timeout() {
        CompletionError::Timeout
    } else {
        CompletionError::Provider {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> OpenAiCompletionClient {
        OpenAiCompletionClient::new(
            SecretString::from("sk-test"),
            "https://example.test/v1/chat/completions".to_string(),
            "gpt-3.5-turbo".to_string(),
        )
    }

    #[test]
    fn test_build_request_standard() {
        let client = test_client();
        let request = client.build_request("What is Rust?", CompletionVariant::Standard);

        assert_eq!(request.model, "gpt-3.5-turbo");
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, "system");
        assert_eq!(request.messages[0].content, SYSTEM_STANDARD);
        assert_eq!(request.messages[1].role, "user");
        assert_eq!(request.messages[1].content, "What is Rust?");
        assert_eq!(request.temperature, Some(0.7));
        assert_eq!(request.max_tokens, Some(MAX_TOKENS));
    }

    #[test]
    fn test_build_request_alternate_perspective() {
        let client = test_client();
        let request =
            client.build_request("What is Rust?", CompletionVariant::AlternatePerspective);

        assert_eq!(request.messages[0].content, SYSTEM_ALTERNATE);
        assert_eq!(request.temperature, Some(0.8));
    }
}
