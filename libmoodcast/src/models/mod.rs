//! Generative text backends
//!
//! The generator talks to a [`TextModel`] rather than to a concrete API so
//! runs can be exercised without network access.

use async_trait::async_trait;

use crate::error::GenerationError;

pub mod gemini;

// Available outside tests so integration tests and downstream crates can use it
pub mod mock;

/// A service that turns a prompt into text
#[async_trait]
pub trait TextModel: Send + Sync {
    /// Generate text for `prompt`
    ///
    /// # Errors
    ///
    /// Returns a [`GenerationError`] for transport failures, non-success
    /// statuses, unparseable bodies and responses without any text.
    async fn generate_content(&self, prompt: &str) -> Result<String, GenerationError>;

    /// Model identifier, for logging
    fn model_name(&self) -> &str;
}
