//! End-to-end runs against mock services
//!
//! These tests verify complete runs including:
//! - Generated text reaching the platform and its id reaching the ledger
//! - Generation failures turning into a skipped post
//! - The log line that reports a published post

use anyhow::Result;
use libmoodcast::error::GenerationError;
use libmoodcast::models::mock::MockModel;
use libmoodcast::platforms::mock::MockPlatform;
use libmoodcast::{Bot, ContentGenerator, Ledger, PostOutcome, Publisher};
use std::io::Write;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Captures formatted log output for assertions
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Install a thread-local subscriber writing into a buffer
///
/// `#[tokio::test]` runs on a current-thread runtime, so every event of the
/// test lands on this thread.
fn capture_logs() -> (LogBuffer, tracing::subscriber::DefaultGuard) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (buffer, guard)
}

async fn create_test_ledger() -> Result<(TempDir, Ledger)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("history.db");
    let ledger = Ledger::new(&db_path.to_string_lossy()).await?;
    Ok((temp_dir, ledger))
}

fn build_bot(model: &MockModel, platform: &MockPlatform, ledger: Ledger) -> Bot {
    Bot::new(
        ContentGenerator::new(Box::new(model.clone())),
        Publisher::new(Box::new(platform.clone()), ledger),
    )
}

#[tokio::test]
async fn test_successful_run_records_id_and_logs_text() -> Result<()> {
    let (logs, _guard) = capture_logs();
    let (_temp_dir, ledger) = create_test_ledger().await?;

    let model = MockModel::responding("AI dreams in gradients.");
    let platform = MockPlatform::returning_id("twitter", "999");
    let bot = build_bot(&model, &platform, ledger.clone());

    let outcome = bot.run().await;

    assert_eq!(outcome.post_id(), Some("999"));
    assert!(ledger.contains("999").await?);
    assert_eq!(ledger.count().await?, 1);

    let output = logs.contents();
    assert!(
        output.contains("Posted tweet 999: \"AI dreams in gradients.\""),
        "log output was: {}",
        output
    );

    Ok(())
}

#[tokio::test]
async fn test_generation_failure_leaves_ledger_unchanged() -> Result<()> {
    let (logs, _guard) = capture_logs();
    let (_temp_dir, ledger) = create_test_ledger().await?;

    // A record from an earlier run
    ledger.record_if_absent("111").await?;

    let model = MockModel::failing(GenerationError::Api {
        status: 503,
        message: "model overloaded".to_string(),
    });
    let platform = MockPlatform::success("twitter");
    let bot = build_bot(&model, &platform, ledger.clone());

    let outcome = bot.run().await;

    assert_eq!(outcome, PostOutcome::Skipped);
    assert_eq!(model.call_count(), 1);
    assert_eq!(platform.post_call_count(), 0);
    assert_eq!(ledger.count().await?, 1);
    assert!(ledger.contains("111").await?);

    let output = logs.contents();
    assert!(output.contains("Gemini generate error"));
    assert!(output.contains("Empty post text, skipping post."));

    Ok(())
}

#[tokio::test]
async fn test_publish_failure_is_absorbed() -> Result<()> {
    let (logs, _guard) = capture_logs();
    let (_temp_dir, ledger) = create_test_ledger().await?;

    let model = MockModel::responding("Gradient descent, but for feelings.");
    let platform = MockPlatform::post_failure("twitter", "duplicate content");
    let bot = build_bot(&model, &platform, ledger.clone());

    let outcome = bot.run().await;

    assert!(matches!(outcome, PostOutcome::Failed { .. }));
    assert_eq!(platform.post_call_count(), 1);
    assert_eq!(ledger.count().await?, 0);
    assert!(logs.contents().contains("Post error"));

    Ok(())
}

#[tokio::test]
async fn test_each_run_uses_a_mood_prompt() -> Result<()> {
    let (_temp_dir, ledger) = create_test_ledger().await?;

    let model = MockModel::responding("ok");
    let platform = MockPlatform::success("twitter");
    let bot = build_bot(&model, &platform, ledger.clone());

    bot.run().await;
    bot.run().await;

    let prompts = model.prompts();
    assert_eq!(prompts.len(), 2);
    for prompt in prompts {
        let mood_line = prompt.lines().last().unwrap_or_default();
        let mood = mood_line.trim_start_matches("Mood: ");
        assert!(
            libmoodcast::Mood::ALL.iter().any(|m| m.as_str() == mood),
            "unexpected mood line: {}",
            mood_line
        );
    }

    // Two successful posts with fresh ids
    assert_eq!(ledger.count().await?, 2);

    Ok(())
}
