//! One generate-then-post run

use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::generator::ContentGenerator;
use crate::ledger::Ledger;
use crate::models::gemini::GeminiClient;
use crate::platforms::twitter::TwitterClient;
use crate::poster::Publisher;
use crate::types::PostOutcome;

pub struct Bot {
    generator: ContentGenerator,
    publisher: Publisher,
}

impl Bot {
    pub fn new(generator: ContentGenerator, publisher: Publisher) -> Self {
        Self {
            generator,
            publisher,
        }
    }

    /// Wire up Gemini, Twitter and the ledger from configuration
    ///
    /// # Errors
    ///
    /// Fails when an HTTP client cannot be built or the ledger cannot be
    /// opened. Nothing is generated or posted in that case.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let model = GeminiClient::from_config(&config.gemini, config.http.timeout)?;
        let platform = TwitterClient::from_config(&config.twitter, config.http.timeout)?;
        let ledger = Ledger::new(&config.database.path).await?;

        Ok(Self::new(
            ContentGenerator::new(Box::new(model)),
            Publisher::new(Box::new(platform), ledger),
        ))
    }

    /// Generate one post and publish it
    ///
    /// A failed generation still reaches the publisher as empty text, which
    /// the publisher skips.
    pub async fn run(&self) -> PostOutcome {
        let text = self.generator.generate_text(None).await;
        let outcome = self.publisher.post(&text).await;
        info!(outcome = outcome_label(&outcome), "Run finished");
        outcome
    }

    pub fn ledger(&self) -> &Ledger {
        self.publisher.ledger()
    }
}

fn outcome_label(outcome: &PostOutcome) -> &'static str {
    match outcome {
        PostOutcome::Posted { .. } => "posted",
        PostOutcome::Skipped => "skipped",
        PostOutcome::Failed { .. } => "failed",
    }
}
