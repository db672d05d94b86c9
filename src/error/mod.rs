// Error types for the places client
// Author: kelexine (https://github.com/kelexine)

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlacesError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API KEY is not specified")]
    MissingApiKey,

    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error("Response returned with status: {status}{}", format_upstream_message(.message))]
    Upstream {
        status: String,
        message: Option<String>,
    },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Failure raised by a third-party [`CacheProvider`](crate::cache::CacheProvider)
    /// implementation. The bundled backends report through `Redis` instead.
    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),
}

impl PlacesError {
    /// Upstream status code, if this error came from the API's `status` field.
    pub fn upstream_status(&self) -> Option<&str> {
        match self {
            PlacesError::Upstream { status, .. } => Some(status),
            _ => None,
        }
    }
}

fn format_upstream_message(message: &Option<String>) -> String {
    match message {
        Some(msg) => format!(" (Error Message: {})", msg),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, PlacesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_display_with_message() {
        let err = PlacesError::Upstream {
            status: "REQUEST_DENIED".to_string(),
            message: Some("The provided API key is invalid.".to_string()),
        };
        let display = err.to_string();
        assert!(display.contains("REQUEST_DENIED"));
        assert!(display.contains("The provided API key is invalid."));
    }

    #[test]
    fn test_upstream_display_without_message() {
        let err = PlacesError::Upstream {
            status: "INVALID_REQUEST".to_string(),
            message: None,
        };
        assert_eq!(err.to_string(), "Response returned with status: INVALID_REQUEST");
        assert_eq!(err.upstream_status(), Some("INVALID_REQUEST"));
    }

    #[test]
    fn test_non_upstream_has_no_status() {
        assert_eq!(PlacesError::MissingApiKey.upstream_status(), None);
    }
}
