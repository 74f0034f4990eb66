//! Mock completion client for environments without provider credentials.
//!
//! Returns a deterministic templated reply so the rest of the system
//! behaves identically to the live backend.

use parley_core::completion::{CompletionClient, CompletionVariant};
use parley_types::error::CompletionError;

/// No-op completion client with canned replies.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockCompletionClient;

impl MockCompletionClient {
    pub fn new() -> Self {
        Self
    }
}

impl CompletionClient for MockCompletionClient {
    async fn complete(
        &self,
        prompt: &str,
        variant: CompletionVariant,
    ) -> Result<String, CompletionError> {
        let reply = match variant {
            CompletionVariant::Standard => format!("Mock response to: {prompt}"),
            CompletionVariant::AlternatePerspective => {
                format!("Mock regenerated response to: {prompt}")
            }
        };
        Ok(reply)
    }
}
