//! HTTP utilities for ARM REST API calls

use crate::error::DescribeError;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Header ARM echoes back in its own logs, handy when correlating failures
const CLIENT_REQUEST_ID_HEADER: &str = "x-ms-client-request-id";

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut end = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..end], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// ARM error envelope: `{"error": {"code": "...", "message": "..."}}`
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// HTTP client wrapper for ARM calls
#[derive(Clone)]
pub struct ArmHttpClient {
    client: Client,
}

impl ArmHttpClient {
    /// Create a new HTTP client
    pub fn new() -> Result<Self, DescribeError> {
        let client = Client::builder()
            .user_agent(concat!("azd/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }

    /// Make a GET request to ARM and decode the JSON body
    pub async fn get(&self, url: &str, token: &str) -> Result<Value, DescribeError> {
        let request_id = uuid::Uuid::new_v4().to_string();
        tracing::debug!("GET {} [{}]", url, request_id);

        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .header(CLIENT_REQUEST_ID_HEADER, &request_id)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Only log sanitized/truncated error body to avoid leaking sensitive data
            tracing::error!(
                "API error: {} - {} [{}]",
                status,
                sanitize_for_log(&body),
                request_id
            );
            let (code, message) = match serde_json::from_str::<ErrorEnvelope>(&body) {
                Ok(envelope) => (envelope.error.code, envelope.error.message),
                Err(_) => (None, None),
            };
            return Err(DescribeError::from_response(status.as_u16(), code, message));
        }

        if body.is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&body)?)
    }
}
