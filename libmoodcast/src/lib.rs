//! Moodcast - generate a mood-flavored post about AI and publish it
//!
//! One run asks a generative model for a short post, publishes it to
//! Twitter/X, and records the returned post id in a local SQLite ledger.
//! Failures after startup are logged and absorbed so a cron-driven run never
//! crashes halfway.

pub mod bot;
pub mod config;
pub mod error;
pub mod generator;
pub mod ledger;
pub mod logging;
pub mod models;
pub mod platforms;
pub mod poster;
pub mod types;

// Re-export commonly used types
pub use bot::Bot;
pub use config::Config;
pub use error::{MoodcastError, Result};
pub use generator::{ContentGenerator, Mood};
pub use ledger::Ledger;
pub use poster::Publisher;
pub use types::{GenerationOutcome, PostOutcome, PostRecord};
