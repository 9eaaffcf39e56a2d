//! Error types for FRIDAY LITE operations.
//!
//! Conversational no-match conditions (unknown task, missing note, short
//! input) are replies, not errors. This hierarchy covers the failures that
//! are logged: relay calls, persistence and configuration.

use std::collections::HashMap;
use thiserror::Error;

/// Result type alias for FRIDAY LITE operations.
pub type FridayResult<T> = Result<T, FridayError>;

/// Main error type for all FRIDAY LITE operations.
#[derive(Error, Debug)]
pub enum FridayError {
    /// Authentication against the relay failed.
    #[error("Authentication error: {message}")]
    Authentication {
        message: String,
        code: ErrorCode,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Input validation failed.
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        code: ErrorCode,
        details: HashMap<String, String>,
        suggestion: Option<String>,
    },

    /// Requested item does not exist.
    #[error("Not found: {message}")]
    NotFound { message: String, code: ErrorCode },

    /// Intent relay call failed.
    #[error("Relay error: {message}")]
    Relay {
        message: String,
        code: ErrorCode,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Persistence backend failed.
    #[error("Storage error: {message}")]
    Storage {
        message: String,
        code: ErrorCode,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Network error.
    #[error("Network error: {message}")]
    Network {
        message: String,
        code: ErrorCode,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Parse error.
    #[error("Parse error: {message}")]
    Parse { message: String, code: ErrorCode },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error codes for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Authentication (AUTH_xxx)
    AuthInvalidToken,
    AuthMissingCredentials,

    // Validation (VAL_xxx)
    ValInvalidInput,
    ValMissingField,

    // Not found (NF_xxx)
    NotFound,

    // Relay (RLY_xxx)
    RelayConnectionFailed,
    RelayRequestFailed,
    RelayInvalidResponse,

    // Storage (STO_xxx)
    StoOpenFailed,
    StoWriteFailed,
    StoReadFailed,

    // Network (NET_xxx)
    NetTimeout,
    NetConnectionFailed,

    // Parse (PARSE_xxx)
    ParseInvalidJson,
    ParseMissingField,

    // Internal
    Internal,
}

impl ErrorCode {
    /// Get the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::AuthInvalidToken => "AUTH_001",
            ErrorCode::AuthMissingCredentials => "AUTH_002",
            ErrorCode::ValInvalidInput => "VAL_001",
            ErrorCode::ValMissingField => "VAL_002",
            ErrorCode::NotFound => "NF_001",
            ErrorCode::RelayConnectionFailed => "RLY_001",
            ErrorCode::RelayRequestFailed => "RLY_002",
            ErrorCode::RelayInvalidResponse => "RLY_003",
            ErrorCode::StoOpenFailed => "STO_001",
            ErrorCode::StoWriteFailed => "STO_002",
            ErrorCode::StoReadFailed => "STO_003",
            ErrorCode::NetTimeout => "NET_001",
            ErrorCode::NetConnectionFailed => "NET_002",
            ErrorCode::ParseInvalidJson => "PARSE_001",
            ErrorCode::ParseMissingField => "PARSE_002",
            ErrorCode::Internal => "INT_001",
        }
    }
}

impl FridayError {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            code: ErrorCode::ValInvalidInput,
            details: HashMap::new(),
            suggestion: None,
        }
    }

    /// Create a validation error with suggestion.
    pub fn validation_with_suggestion(
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self::Validation {
            message: message.into(),
            code: ErrorCode::ValInvalidInput,
            details: HashMap::new(),
            suggestion: Some(suggestion.into()),
        }
    }

    /// Create a relay error.
    pub fn relay(message: impl Into<String>) -> Self {
        Self::Relay {
            message: message.into(),
            code: ErrorCode::RelayRequestFailed,
            source: None,
        }
    }

    /// Create a relay error for an unparseable response.
    pub fn relay_response(message: impl Into<String>) -> Self {
        Self::Relay {
            message: message.into(),
            code: ErrorCode::RelayInvalidResponse,
            source: None,
        }
    }

    /// Create a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
            code: ErrorCode::StoWriteFailed,
            source: None,
        }
    }

    /// Create a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            code: ErrorCode::ParseInvalidJson,
        }
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
            code: ErrorCode::NetConnectionFailed,
            source: None,
        }
    }

    /// Create an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
            code: ErrorCode::AuthInvalidToken,
            source: None,
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Authentication { code, .. } => *code,
            Self::Validation { code, .. } => *code,
            Self::NotFound { code, .. } => *code,
            Self::Relay { code, .. } => *code,
            Self::Storage { code, .. } => *code,
            Self::Network { code, .. } => *code,
            Self::Parse { code, .. } => *code,
            _ => ErrorCode::Internal,
        }
    }

    /// Get a user-friendly suggestion for resolving this error.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::Authentication { .. } => {
                Some("Please check the Dialogflow access token and project id")
            }
            Self::Validation { suggestion, .. } => suggestion.as_deref(),
            Self::Relay { .. } => Some("Please check your relay provider configuration"),
            Self::Storage { .. } => Some("Please check the data directory permissions"),
            _ => None,
        }
    }

    /// Convert from an HTTP status code returned by the relay.
    pub fn from_http_status(status: u16, body: &str) -> Self {
        match status {
            400 => Self::Validation {
                message: body.to_string(),
                code: ErrorCode::ValInvalidInput,
                details: HashMap::new(),
                suggestion: Some("Please check the request parameters".to_string()),
            },
            401 | 403 => Self::Authentication {
                message: body.to_string(),
                code: ErrorCode::AuthInvalidToken,
                source: None,
            },
            404 => Self::NotFound {
                message: body.to_string(),
                code: ErrorCode::NotFound,
            },
            _ => Self::Relay {
                message: format!("HTTP {}: {}", status, body),
                code: ErrorCode::RelayRequestFailed,
                source: None,
            },
        }
    }
}

impl From<rusqlite::Error> for FridayError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage {
            message: err.to_string(),
            code: ErrorCode::StoWriteFailed,
            source: Some(Box::new(err)),
        }
    }
}
