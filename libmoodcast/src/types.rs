//! Core types for Moodcast

use serde::{Deserialize, Serialize};

/// A published post, as kept in the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    pub id: String,
}

/// Result of asking the generator for post text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Generated(String),
    Failed { reason: String },
}

impl GenerationOutcome {
    /// The generated text, or an empty string when generation failed
    pub fn into_text(self) -> String {
        match self {
            GenerationOutcome::Generated(text) => text,
            GenerationOutcome::Failed { .. } => String::new(),
        }
    }
}

/// Result of a single publish attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostOutcome {
    /// The platform accepted the post and the id was recorded
    Posted { record: PostRecord },
    /// Nothing to post
    Skipped,
    /// The post was rejected, failed, or could not be recorded
    Failed { reason: String },
}

impl PostOutcome {
    pub fn post_id(&self) -> Option<&str> {
        match self {
            PostOutcome::Posted { record } => Some(&record.id),
            _ => None,
        }
    }
}
