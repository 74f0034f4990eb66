//! Completion provider clients.
//!
//! `OpenAiCompletionClient` talks to an OpenAI-compatible
//! chat-completions endpoint; `MockCompletionClient` returns canned
//! replies for environments without provider credentials.
//! `CompletionBackend` selects between them at composition time.

pub mod mock;
pub mod openai;
mod types;

use parley_core::completion::{CompletionClient, CompletionVariant};
use parley_types::config::CompletionConfig;
use parley_types::error::CompletionError;

use self::mock::MockCompletionClient;
use self::openai::OpenAiCompletionClient;

/// Completion backend selected at composition time.
///
/// Live when an API key is configured, mock otherwise. The chat
/// service sees no behavioral difference beyond the reply text.
pub enum CompletionBackend {
    OpenAi(OpenAiCompletionClient),
    Mock(MockCompletionClient),
}

impl CompletionBackend {
    /// Pick the backend from configuration: live when an API key is
    /// present, mock when it is not.
    pub fn from_config(config: &CompletionConfig) -> Self {
        match &config.api_key {
            Some(key) => CompletionBackend::OpenAi(OpenAiCompletionClient::new(
                key.clone(),
                config.api_url.clone(),
                config.model.clone(),
            )),
            None => CompletionBackend::Mock(MockCompletionClient::new()),
        }
    }

    /// Short backend name for startup logging.
    pub fn name(&self) -> &'static str {
        match self {
            CompletionBackend::OpenAi(_) => "openai",
            CompletionBackend::Mock(_) => "mock",
        }
    }
}

impl CompletionClient for CompletionBackend {
    async fn complete(
        &self,
        prompt: &str,
        variant: CompletionVariant,
    ) -> Result<String, CompletionError> {
        match self {
            CompletionBackend::OpenAi(client) => client.complete(prompt, variant).await,
            CompletionBackend::Mock(client) => client.complete(prompt, variant).await,
        }
    }
}
