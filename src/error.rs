//! Describer error types

use thiserror::Error;

/// ARM error codes that mean "the thing you asked for does not exist"
const NOT_FOUND_CODES: &[&str] = &["ResourceNotFound", "ResourceGroupNotFound", "NotFound"];

/// Errors raised while enumerating or querying Azure resources
#[derive(Error, Debug)]
pub enum DescribeError {
    #[error("Azure API returned status {status} ({code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("Resource not found ({code}): {message}")]
    NotFound { code: String, message: String },

    #[error("Request error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Malformed resource identifier: {0}")]
    MalformedIdentifier(String),

    #[error("{kind} item is missing required field '{field}'")]
    MissingIdentifier { kind: String, field: &'static str },

    #[error("Sink rejected resource: {0}")]
    Sink(anyhow::Error),

    #[error("Enumeration cancelled")]
    Cancelled,

    #[error("Operation not supported: {0}")]
    Unsupported(String),

    #[error("Credential error: {0}")]
    Credential(String),

    #[error("Unknown table: {0}")]
    UnknownTable(String),

    #[error("Unknown resource kind: {0}")]
    UnknownKind(String),
}

impl DescribeError {
    /// Build the error for a non-success ARM response.
    ///
    /// 404s and the ARM not-found codes become [`DescribeError::NotFound`] so
    /// single-item lookups can treat them as "no rows".
    pub fn from_response(status: u16, code: Option<String>, message: Option<String>) -> Self {
        let code = code.unwrap_or_else(|| status.to_string());
        let message = message.unwrap_or_default();

        if status == 404 || NOT_FOUND_CODES.contains(&code.as_str()) {
            return DescribeError::NotFound { code, message };
        }

        DescribeError::Api {
            status,
            code,
            message,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DescribeError::NotFound { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, DescribeError::Cancelled)
    }

    /// Short message suitable for a terminal, without raw API payloads
    pub fn user_message(&self) -> String {
        match self {
            DescribeError::Api { status: 401, .. } => {
                "Authentication failed. Refresh AZURE_ACCESS_TOKEN (az account get-access-token).".to_string()
            }
            DescribeError::Api { status: 403, .. } => {
                "Permission denied. Check the Reader role on the subscription.".to_string()
            }
            DescribeError::Api { status: 429, .. } => {
                "Rate limit exceeded. Please try again later.".to_string()
            }
            DescribeError::Api { status, .. } if *status >= 500 => {
                "Azure Resource Manager is temporarily unavailable. Please try again.".to_string()
            }
            DescribeError::Api { status, code, .. } => {
                format!("Request failed with status {} ({})", status, code)
            }
            DescribeError::NotFound { .. } => "Resource not found.".to_string(),
            DescribeError::Transport(_) => {
                "Request failed. Check your network connection and try again.".to_string()
            }
            other => other.to_string(),
        }
    }
}
