use async_trait::async_trait;
use secrecy::SecretString;

use crate::domain::{CompletionRequest, DomainError};

/// An interface for sending chat-style prompts to an LLM and receiving text responses.
///
/// Implementors encapsulate transport, serialization, and vendor-specific API
/// details. Consumers (e.g. [`crate::application::Responder`]) remain decoupled
/// from any particular provider or HTTP client library.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send the request's `system` message followed by its `user` prompt,
    /// authenticated with `credential`, and return the first completion's text.
    ///
    /// Non-success statuses and transport failures map to
    /// [`DomainError::Upstream`]; bodies without a first choice map to
    /// [`DomainError::ParseError`].
    async fn complete(
        &self,
        request: &CompletionRequest,
        credential: &SecretString,
    ) -> Result<String, DomainError>;
}
