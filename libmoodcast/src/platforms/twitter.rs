//! Twitter/X platform implementation
//!
//! Posts through the v2 `POST /2/tweets` endpoint with OAuth 1.0a user
//! context. When the API answers 429 the client sleeps until the rate-limit
//! window resets and tries again, a bounded number of times. No other failure
//! is retried.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, instrument, warn};

use crate::config::TwitterConfig;
use crate::error::{PlatformError, Result};
use crate::platforms::oauth::{Nonce, OAuthCredentials};
use crate::platforms::Platform;

/// Waits for a reset window before a 429 is reported as a failure
const MAX_RATE_LIMIT_WAITS: u32 = 3;

/// Twitter rate-limit windows are 15 minutes
const DEFAULT_RATE_LIMIT_WINDOW: Duration = Duration::from_secs(15 * 60);

#[derive(Debug, Serialize)]
struct CreateTweetRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreateTweetResponse {
    data: CreatedTweet,
}

#[derive(Debug, Deserialize)]
struct CreatedTweet {
    id: String,
}

pub struct TwitterClient {
    client: Client,
    credentials: OAuthCredentials,
    base_url: String,
    wait_on_rate_limit: bool,
    rate_limit_max_wait: Duration,
}

impl TwitterClient {
    pub fn new(credentials: OAuthCredentials, base_url: impl Into<String>, client: Client) -> Self {
        Self {
            client,
            credentials,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            wait_on_rate_limit: true,
            rate_limit_max_wait: DEFAULT_RATE_LIMIT_WINDOW,
        }
    }

    /// Create a client from configuration
    pub fn from_config(config: &TwitterConfig, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PlatformError::Network(format!("Failed to build HTTP client: {}", e)))?;

        let credentials = OAuthCredentials {
            consumer_key: config.consumer_key.clone(),
            consumer_secret: config.consumer_secret.clone(),
            access_token: config.access_token.clone(),
            access_secret: config.access_secret.clone(),
        };

        Ok(Self::new(credentials, config.base_url.clone(), client)
            .with_rate_limit_max_wait(config.rate_limit_max_wait))
    }

    /// Disable waiting on 429 responses; a 429 becomes a `RateLimit` error
    pub fn without_rate_limit_wait(mut self) -> Self {
        self.wait_on_rate_limit = false;
        self
    }

    pub fn with_rate_limit_max_wait(mut self, max_wait: Duration) -> Self {
        self.rate_limit_max_wait = max_wait;
        self
    }

    fn tweets_url(&self) -> String {
        format!("{}/2/tweets", self.base_url)
    }

    async fn create_tweet(&self, url: &str, content: &str) -> Result<reqwest::Response> {
        let authorization =
            self.credentials
                .authorization_header("POST", url, &[], &Nonce::generate())?;

        self.client
            .post(url)
            .header(reqwest::header::AUTHORIZATION, authorization)
            .json(&CreateTweetRequest { text: content })
            .send()
            .await
            .map_err(|e| PlatformError::Network(format!("Twitter request failed: {}", e)).into())
    }
}

#[async_trait]
impl Platform for TwitterClient {
    #[instrument(skip(self, content), fields(platform = "twitter"))]
    async fn post(&self, content: &str) -> Result<String> {
        let url = self.tweets_url();
        let mut waits = 0;

        loop {
            let response = self.create_tweet(&url, content).await?;
            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS
                && self.wait_on_rate_limit
                && waits < MAX_RATE_LIMIT_WAITS
            {
                waits += 1;
                let wait = rate_limit_wait(
                    response.headers(),
                    chrono::Utc::now().timestamp(),
                    self.rate_limit_max_wait,
                );
                warn!(
                    "Rate limit exceeded. Sleeping for {}s (wait {}/{})",
                    wait.as_secs(),
                    waits,
                    MAX_RATE_LIMIT_WAITS
                );
                sleep(wait).await;
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(map_status_error(status, &body).into());
            }

            let created: CreateTweetResponse = response.json().await.map_err(|e| {
                PlatformError::Posting(format!("Failed to parse Twitter response: {}", e))
            })?;

            debug!(id = %created.data.id, "Tweet created");
            return Ok(created.data.id);
        }
    }

    fn name(&self) -> &str {
        "twitter"
    }
}

/// How long to sleep before retrying after a 429
///
/// Uses `x-rate-limit-reset` (epoch seconds) when present, one full window
/// otherwise, never more than `max_wait`. One second of slack covers clock skew.
fn rate_limit_wait(headers: &HeaderMap, now: i64, max_wait: Duration) -> Duration {
    let wait = headers
        .get("x-rate-limit-reset")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<i64>().ok())
        .map(|reset| Duration::from_secs(reset.saturating_sub(now).max(0) as u64 + 1))
        .unwrap_or(DEFAULT_RATE_LIMIT_WINDOW);

    wait.min(max_wait)
}

/// Map a non-success response to a platform error
fn map_status_error(status: StatusCode, body: &str) -> PlatformError {
    let detail = error_detail(body);

    match status.as_u16() {
        401 => PlatformError::Authentication(format!(
            "Twitter rejected the credentials ({}): {}. \
             Check the consumer key/secret and access token/secret.",
            status, detail
        )),
        // Duplicate content and missing app write permission both land here
        403 => PlatformError::Posting(format!("Twitter refused the post ({}): {}", status, detail)),
        400 => PlatformError::Validation(format!("Twitter rejected the post ({}): {}", status, detail)),
        429 => PlatformError::RateLimit(format!("Twitter rate limit exceeded ({}): {}", status, detail)),
        _ => PlatformError::Posting(format!("Twitter returned {}: {}", status, detail)),
    }
}

/// Pull `detail` (v2 problem) or `title` out of an error body, else the raw body
fn error_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            json.get("detail")
                .or_else(|| json.get("title"))
                .and_then(|v| v.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}
