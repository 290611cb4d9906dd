//! Custom error types for Notesaurus with improved type safety and error
//! handling.

use thiserror::Error;

/// Main error type for Notesaurus operations.
#[derive(Error, Debug)]
pub enum NotesaurusError {
    // Cli args errors
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown placeholder '{{{placeholder}}}' in {template} template")]
    UnknownPlaceholder {
        template: String,
        placeholder: String,
    },

    // Forge errors
    #[error("Forge operation failed: {0}")]
    ForgeError(String),

    // Network/API errors
    #[error("Network request failed: {0}")]
    NetworkError(String),

    #[error("API authentication failed: {0}")]
    AuthenticationError(String),

    #[error("API rate limit exceeded")]
    RateLimitExceeded,

    // Parsing errors - automatic conversions via #[from]
    #[error("Regular expression error: {0}")]
    RegexError(#[from] regex::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Datetime parse error: {0}")]
    ChronoParseError(#[from] chrono::ParseError),

    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] log::SetLoggerError),

    // Generic wrapper for other errors
    #[error(transparent)]
    Other(#[from] color_eyre::Report),
}

/// Result type alias using NotesaurusError
pub type Result<T> = std::result::Result<T, NotesaurusError>;

impl NotesaurusError {
    /// Create a forge error with context
    pub fn forge(msg: impl Into<String>) -> Self {
        Self::ForgeError(msg.into())
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create an unknown placeholder error for the named template
    pub fn unknown_placeholder(
        template: impl Into<String>,
        placeholder: impl Into<String>,
    ) -> Self {
        Self::UnknownPlaceholder {
            template: template.into(),
            placeholder: placeholder.into(),
        }
    }
}

// Implement From for std::io::Error - wraps in Other variant for generic I/O errors
impl From<std::io::Error> for NotesaurusError {
    fn from(err: std::io::Error) -> Self {
        Self::Other(color_eyre::Report::from(err))
    }
}

// Implement From for reqwest errors (network/API)
impl From<reqwest::Error> for NotesaurusError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            Self::NetworkError(err.to_string())
        } else if err.is_status() {
            if let Some(status) = err.status() {
                if status.as_u16() == 401 || status.as_u16() == 403 {
                    Self::AuthenticationError(err.to_string())
                } else if status.as_u16() == 429 {
                    Self::RateLimitExceeded
                } else {
                    Self::NetworkError(err.to_string())
                }
            } else {
                Self::NetworkError(err.to_string())
            }
        } else {
            Self::NetworkError(err.to_string())
        }
    }
}

// Implement From for octocrab errors (GitHub API)
impl From<octocrab::Error> for NotesaurusError {
    fn from(err: octocrab::Error) -> Self {
        match &err {
            octocrab::Error::GitHub { source, .. }
                if source.message.contains("rate limit") =>
            {
                Self::RateLimitExceeded
            }
            _ => Self::ForgeError(format!("GitHub API error: {}", err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_formats() {
        let err = NotesaurusError::forge("API call failed");
        assert_eq!(err.to_string(), "Forge operation failed: API call failed");

        let err = NotesaurusError::invalid_config("missing field");
        assert_eq!(err.to_string(), "Invalid configuration: missing field");

        let err = NotesaurusError::unknown_placeholder("intro", "verison");
        assert_eq!(
            err.to_string(),
            "Unknown placeholder '{verison}' in intro template"
        );
    }

    #[test]
    fn test_error_helpers() {
        let err = NotesaurusError::forge("API call failed");
        assert!(matches!(err, NotesaurusError::ForgeError(_)));

        let err = NotesaurusError::invalid_config("missing field");
        assert!(matches!(err, NotesaurusError::InvalidConfig(_)));

        let err = NotesaurusError::unknown_placeholder("title", "name");
        assert!(matches!(err, NotesaurusError::UnknownPlaceholder { .. }));
    }

    #[test]
    fn test_from_conversions() {
        let regex_err = regex::Regex::new("(unclosed");
        assert!(regex_err.is_err());
        let err: NotesaurusError = regex_err.unwrap_err().into();
        assert!(matches!(err, NotesaurusError::RegexError(_)));
    }
}
