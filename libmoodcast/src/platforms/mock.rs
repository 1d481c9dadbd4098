//! Mock platform implementation for testing
//!
//! Simulates successes and failures without credentials or network access. Call counts and posted content are shared between clones so a test
//! can keep a handle after moving the platform into a publisher.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::error::{PlatformError, Result};
use crate::platforms::Platform;

/// Configuration for mock platform behavior
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub name: String,

    /// Whether posting should succeed
    pub post_succeeds: bool,

    /// Error to return on posting failure
    pub post_error: Option<String>,

    /// Id returned on success; a fresh `mock-<uuid>` id when `None`
    pub post_id: Option<String>,

    pub post_call_count: Arc<Mutex<usize>>,

    pub posted_content: Arc<Mutex<Vec<String>>>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            name: "mock".to_string(),
            post_succeeds: true,
            post_error: None,
            post_id: None,
            post_call_count: Arc::new(Mutex::new(0)),
            posted_content: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

/// Mock platform for testing
#[derive(Debug, Clone)]
pub struct MockPlatform {
    config: MockConfig,
}

impl MockPlatform {
    pub fn new(config: MockConfig) -> Self {
        Self { config }
    }

    /// A platform that accepts every post with a fresh id
    pub fn success(name: &str) -> Self {
        Self::new(MockConfig {
            name: name.to_string(),
            ..Default::default()
        })
    }

    /// A platform that accepts every post and always answers with `id`
    pub fn returning_id(name: &str, id: &str) -> Self {
        Self::new(MockConfig {
            name: name.to_string(),
            post_id: Some(id.to_string()),
            ..Default::default()
        })
    }

    /// A platform that rejects every post
    pub fn post_failure(name: &str, error: &str) -> Self {
        Self::new(MockConfig {
            name: name.to_string(),
            post_succeeds: false,
            post_error: Some(error.to_string()),
            ..Default::default()
        })
    }

    /// Get the number of times post was called
    pub fn post_call_count(&self) -> usize {
        *self.config.post_call_count.lock().unwrap()
    }

    /// Get all content that was posted
    pub fn posted_content(&self) -> Vec<String> {
        self.config.posted_content.lock().unwrap().clone()
    }
}

#[async_trait]
impl Platform for MockPlatform {
    async fn post(&self, content: &str) -> Result<String> {
        *self.config.post_call_count.lock().unwrap() += 1;

        if self.config.post_succeeds {
            self.config
                .posted_content
                .lock()
                .unwrap()
                .push(content.to_string());

            let post_id = self
                .config
                .post_id
                .clone()
                .unwrap_or_else(|| format!("mock-{}", uuid::Uuid::new_v4()));
            Ok(post_id)
        } else {
            let error_msg = self
                .config
                .post_error
                .clone()
                .unwrap_or_else(|| "Mock posting failed".to_string());
            Err(PlatformError::Posting(error_msg).into())
        }
    }

    fn name(&self) -> &str {
        &self.config.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_success() {
        let platform = MockPlatform::success("test");

        assert_eq!(platform.name(), "test");

        let post_id = platform.post("Test content").await.unwrap();
        assert!(post_id.starts_with("mock-"));
        assert_eq!(platform.post_call_count(), 1);
        assert_eq!(platform.posted_content(), vec!["Test content"]);
    }

    #[tokio::test]
    async fn test_mock_fixed_id() {
        let platform = MockPlatform::returning_id("test", "123");
        assert_eq!(platform.post("a").await.unwrap(), "123");
        assert_eq!(platform.post("b").await.unwrap(), "123");
    }

    #[tokio::test]
    async fn test_mock_post_failure() {
        let platform = MockPlatform::post_failure("test", "Network error");

        let result = platform.post("Test content").await;
        assert!(result.unwrap_err().to_string().contains("Network error"));
        assert_eq!(platform.post_call_count(), 1);
        assert!(platform.posted_content().is_empty());
    }

    #[tokio::test]
    async fn test_clones_share_counters() {
        let platform = MockPlatform::success("test");
        let handle = platform.clone();

        platform.post("shared").await.unwrap();

        assert_eq!(handle.post_call_count(), 1);
        assert_eq!(handle.posted_content(), vec!["shared"]);
    }
}
