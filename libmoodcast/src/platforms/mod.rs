//! Posting platforms
//!
//! The publisher posts through the [`Platform`] trait. The production
//! implementation is [`twitter::TwitterClient`]; [`mock::MockPlatform`] stands
//! in for it in tests.

use async_trait::async_trait;

use crate::error::Result;

pub mod oauth;
pub mod twitter;

// Mock platform is available for all builds (not just tests) to support integration tests
pub mod mock;

/// A social platform that can publish a text post
#[async_trait]
pub trait Platform: Send + Sync {
    /// Publish `content` and return the platform-assigned post id
    ///
    /// Length and content rules are left to the platform itself.
    ///
    /// # Errors
    ///
    /// - `PlatformError::Authentication` when credentials are rejected
    /// - `PlatformError::Validation` when the platform rejects the content
    /// - `PlatformError::RateLimit` when the rate limit cannot be waited out
    /// - `PlatformError::Network` on transport failures
    /// - `PlatformError::Posting` for any other failure
    async fn post(&self, content: &str) -> Result<String>;

    /// Lowercase platform identifier (e.g. "twitter")
    fn name(&self) -> &str;
}
