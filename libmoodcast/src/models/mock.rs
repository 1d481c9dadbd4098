//! Mock text model for testing
//!
//! Returns a canned response or a canned error and records every prompt it
//! receives.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::error::GenerationError;
use crate::models::TextModel;

/// Mock text model
#[derive(Debug, Clone)]
pub struct MockModel {
    response: Result<String, GenerationError>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockModel {
    /// A model that always answers with `text`
    pub fn responding(text: &str) -> Self {
        Self {
            response: Ok(text.to_string()),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A model that always fails with `error`
    pub fn failing(error: GenerationError) -> Self {
        Self {
            response: Err(error),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of times generate_content was called
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// Every prompt received, oldest first
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextModel for MockModel {
    async fn generate_content(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.response.clone()
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
