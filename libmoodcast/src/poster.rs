//! Publishing generated text and recording the result
//!
//! A publish attempt never returns an error: empty text is skipped, platform
//! failures are logged, and the outcome is reported as a [`PostOutcome`].

use tracing::{error, info, warn};

use crate::ledger::Ledger;
use crate::platforms::Platform;
use crate::types::{PostOutcome, PostRecord};

pub struct Publisher {
    platform: Box<dyn Platform>,
    ledger: Ledger,
}

impl Publisher {
    pub fn new(platform: Box<dyn Platform>, ledger: Ledger) -> Self {
        Self { platform, ledger }
    }

    /// Post `text` once and record the returned id
    ///
    /// Skips empty text without contacting the platform. On success the id is
    /// inserted into the ledger; an id that is already present is not an error.
    pub async fn post(&self, text: &str) -> PostOutcome {
        if text.is_empty() {
            warn!("Empty post text, skipping post.");
            return PostOutcome::Skipped;
        }

        let id = match self.platform.post(text).await {
            Ok(id) => id,
            Err(e) => {
                error!(platform = self.platform.name(), "Post error: {}", e);
                return PostOutcome::Failed {
                    reason: e.to_string(),
                };
            }
        };

        if let Err(e) = self.ledger.record_if_absent(&id).await {
            error!("Posted {} but could not record it in the ledger: {}", id, e);
            return PostOutcome::Failed {
                reason: e.to_string(),
            };
        }

        info!("Posted tweet {}: {:?}", id, text);
        PostOutcome::Posted {
            record: PostRecord { id },
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }
}
