//! Error types for Moodcast

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MoodcastError>;

#[derive(Error, Debug)]
pub enum MoodcastError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),
}

impl MoodcastError {
    /// Returns the process exit code for this error
    ///
    /// Only startup failures ever reach the exit code; generation and
    /// platform failures are absorbed during a run.
    pub fn exit_code(&self) -> i32 {
        match self {
            MoodcastError::Config(_) => 1,
            MoodcastError::Database(_) => 1,
            MoodcastError::Platform(_) => 1,
            MoodcastError::Generation(_) => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing environment variables: {}", .0.join(", "))]
    MissingVariables(Vec<String>),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: String, reason: String },
}

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database operation failed: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Error, Debug, Clone)]
pub enum GenerationError {
    #[error("Request failed: {0}")]
    Http(String),

    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Response contained no text")]
    EmptyResponse,
}

#[derive(Error, Debug, Clone)]
pub enum PlatformError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Content validation failed: {0}")]
    Validation(String),

    #[error("Posting failed: {0}")]
    Posting(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_variables_message_lists_every_name() {
        let error = ConfigError::MissingVariables(vec![
            "GEMINI_API_KEY2".to_string(),
            "TWITTER_ACCESS_SECRET2".to_string(),
        ]);
        assert_eq!(
            error.to_string(),
            "Missing environment variables: GEMINI_API_KEY2, TWITTER_ACCESS_SECRET2"
        );
    }

    #[test]
    fn test_exit_code_config_error() {
        let error = MoodcastError::Config(ConfigError::MissingVariables(vec!["X".to_string()]));
        assert_eq!(error.exit_code(), 1);
    }

    #[test]
    fn test_every_startup_error_exits_with_one() {
        let errors = [
            MoodcastError::Platform(PlatformError::Authentication("bad token".to_string())),
            MoodcastError::Platform(PlatformError::Network("no TLS backend".to_string())),
            MoodcastError::Generation(GenerationError::Http("no TLS backend".to_string())),
        ];
        for error in errors {
            assert_eq!(error.exit_code(), 1, "{}", error);
        }
    }

    #[test]
    fn test_exit_code_database_error() {
        let db_error = DbError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only filesystem",
        ));
        assert_eq!(MoodcastError::Database(db_error).exit_code(), 1);
    }

    #[test]
    fn test_error_message_formatting_invalid_config() {
        let error = MoodcastError::Config(ConfigError::Invalid {
            name: "MOODCAST_HTTP_TIMEOUT_SECS".to_string(),
            reason: "invalid digit found in string".to_string(),
        });
        assert_eq!(
            error.to_string(),
            "Configuration error: Invalid value for MOODCAST_HTTP_TIMEOUT_SECS: invalid digit found in string"
        );
    }

    #[test]
    fn test_error_message_formatting_generation_api() {
        let error = MoodcastError::Generation(GenerationError::Api {
            status: 429,
            message: "quota exhausted".to_string(),
        });
        assert_eq!(
            error.to_string(),
            "Generation error: API returned 429: quota exhausted"
        );
    }

    #[test]
    fn test_error_message_formatting_posting() {
        let error = MoodcastError::Platform(PlatformError::Posting("duplicate content".to_string()));
        assert_eq!(
            error.to_string(),
            "Platform error: Posting failed: duplicate content"
        );
    }

    #[test]
    fn test_error_conversion_from_platform_error() {
        let converted: MoodcastError = PlatformError::RateLimit("slow down".to_string()).into();
        assert!(matches!(
            converted,
            MoodcastError::Platform(PlatformError::RateLimit(_))
        ));
    }
}
