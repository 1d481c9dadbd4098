//! Configuration management for Moodcast
//!
//! All settings come from the process environment. The binary loads an
//! optional `.env` file first, so a local file and real environment variables
//! behave the same way.

use secrecy::SecretString;
use std::time::Duration;

use crate::error::{ConfigError, Result};

pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY2";
pub const TWITTER_BEARER_TOKEN: &str = "TWITTER_BEARER_TOKEN2";
pub const TWITTER_CONSUMER_KEY: &str = "TWITTER_API_KEY2";
pub const TWITTER_CONSUMER_SECRET: &str = "TWITTER_API_SECRET2";
pub const TWITTER_ACCESS_TOKEN: &str = "TWITTER_ACCESS_TOKEN2";
pub const TWITTER_ACCESS_SECRET: &str = "TWITTER_ACCESS_SECRET2";

/// The six credentials a run cannot start without, in reporting order
pub const REQUIRED_VARIABLES: [&str; 6] = [
    GEMINI_API_KEY,
    TWITTER_BEARER_TOKEN,
    TWITTER_CONSUMER_KEY,
    TWITTER_CONSUMER_SECRET,
    TWITTER_ACCESS_TOKEN,
    TWITTER_ACCESS_SECRET,
];

const DB_PATH_VAR: &str = "MOODCAST_DB_PATH";
const GEMINI_MODEL_VAR: &str = "MOODCAST_GEMINI_MODEL";
const GEMINI_BASE_URL_VAR: &str = "MOODCAST_GEMINI_BASE_URL";
const TWITTER_BASE_URL_VAR: &str = "MOODCAST_TWITTER_BASE_URL";
const HTTP_TIMEOUT_VAR: &str = "MOODCAST_HTTP_TIMEOUT_SECS";
const RATE_LIMIT_MAX_WAIT_VAR: &str = "MOODCAST_RATE_LIMIT_MAX_WAIT_SECS";

#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub gemini: GeminiConfig,
    pub twitter: TwitterConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: SecretString,
    pub model: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct TwitterConfig {
    /// App-only token. Creating a post needs user context, so this is
    /// validated at startup but never sent.
    pub bearer_token: SecretString,
    pub consumer_key: SecretString,
    pub consumer_secret: SecretString,
    pub access_token: SecretString,
    pub access_secret: SecretString,
    pub base_url: String,
    /// Upper bound on a single wait for a rate-limit window to reset
    pub rate_limit_max_wait: Duration,
}

#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub timeout: Duration,
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// Empty values are treated as missing. Every missing credential is
    /// collected before failing, so the error names all of them at once.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let missing: Vec<String> = REQUIRED_VARIABLES
            .into_iter()
            .filter(|&name| read(name).is_none())
            .map(String::from)
            .collect();

        if !missing.is_empty() {
            return Err(ConfigError::MissingVariables(missing).into());
        }

        let secret = |name: &str| SecretString::from(read(name).unwrap_or_default());

        let defaults = Self::default_settings();

        Ok(Self {
            database: DatabaseConfig {
                path: read(DB_PATH_VAR).unwrap_or(defaults.db_path),
            },
            gemini: GeminiConfig {
                api_key: secret(GEMINI_API_KEY),
                model: read(GEMINI_MODEL_VAR).unwrap_or(defaults.gemini_model),
                base_url: read(GEMINI_BASE_URL_VAR).unwrap_or(defaults.gemini_base_url),
            },
            twitter: TwitterConfig {
                bearer_token: secret(TWITTER_BEARER_TOKEN),
                consumer_key: secret(TWITTER_CONSUMER_KEY),
                consumer_secret: secret(TWITTER_CONSUMER_SECRET),
                access_token: secret(TWITTER_ACCESS_TOKEN),
                access_secret: secret(TWITTER_ACCESS_SECRET),
                base_url: read(TWITTER_BASE_URL_VAR).unwrap_or(defaults.twitter_base_url),
                rate_limit_max_wait: parse_seconds(
                    RATE_LIMIT_MAX_WAIT_VAR,
                    read(RATE_LIMIT_MAX_WAIT_VAR),
                    defaults.rate_limit_max_wait_secs,
                )?,
            },
            http: HttpConfig {
                timeout: parse_seconds(
                    HTTP_TIMEOUT_VAR,
                    read(HTTP_TIMEOUT_VAR),
                    defaults.http_timeout_secs,
                )?,
            },
        })
    }

    fn default_settings() -> DefaultSettings {
        DefaultSettings {
            db_path: "history.db".to_string(),
            gemini_model: "gemini-2.0-flash".to_string(),
            gemini_base_url: "https://generativelanguage.googleapis.com".to_string(),
            twitter_base_url: "https://api.twitter.com".to_string(),
            http_timeout_secs: 30,
            rate_limit_max_wait_secs: 900,
        }
    }
}

struct DefaultSettings {
    db_path: String,
    gemini_model: String,
    gemini_base_url: String,
    twitter_base_url: String,
    http_timeout_secs: u64,
    rate_limit_max_wait_secs: u64,
}

fn parse_seconds(name: &str, value: Option<String>, default: u64) -> Result<Duration> {
    let secs = match value {
        Some(raw) => raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
            name: name.to_string(),
            reason: e.to_string(),
        })?,
        None => default,
    };
    Ok(Duration::from_secs(secs))
}
