//! Completion client trait definition.
//!
//! The core abstraction over the external text-completion provider.
//! Implementations live in parley-infra (`OpenAiCompletionClient`,
//! `MockCompletionClient`, and the `CompletionBackend` selector).

use parley_types::error::CompletionError;

/// Which request shape to send to the provider.
///
/// `AlternatePerspective` is used by the regenerate flow: a different
/// system instruction and a slightly higher sampling temperature for
/// lexical diversity in the replacement reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionVariant {
    Standard,
    AlternatePerspective,
}

/// Trait for text-completion provider backends.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition). The
/// service hands over the raw prompt string and receives the reply
/// text; provider-specific request shaping stays behind this trait.
/// Every call must complete within the client's timeout bound; a
/// timeout is a recoverable `CompletionError`, not a crash.
pub trait CompletionClient: Send + Sync {
    /// Send a prompt and return the reply text.
    fn complete(
        &self,
        prompt: &str,
        variant: CompletionVariant,
    ) -> impl std::future::Future<Output = Result<String, CompletionError>> + Send;
}
