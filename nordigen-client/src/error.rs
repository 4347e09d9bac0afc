//! Error types for the Nordigen client.

use serde_json::Value;
use thiserror::Error;

/// Errors that can occur when using the Nordigen client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (DNS, connect, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider returned a non-success status.
    #[error("API error (status {status}): {summary}: {detail}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Short error summary from the provider.
        summary: String,
        /// Longer explanation from the provider.
        detail: String,
    },

    /// Failed to deserialize response.
    #[error("Failed to deserialize response: {0}")]
    Deserialize(#[from] serde_json::Error),

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Missing or malformed configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

impl ClientError {
    /// Create a new config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build an [`ClientError::Api`] from a status and the raw response body.
    ///
    /// The provider reports errors either as `{"summary", "detail", "status_code"}`
    /// or, for validation failures, as one such object per offending field.
    pub(crate) fn from_response(status: u16, body: &str) -> Self {
        let (summary, detail) = match serde_json::from_str::<Value>(body) {
            Ok(json) => extract_message(&json).unwrap_or_else(|| (body.to_string(), String::new())),
            Err(_) => (body.to_string(), String::new()),
        };

        Self::Api {
            status,
            summary,
            detail,
        }
    }

    /// HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the provider rejected the bearer token (or its absence).
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Whether the requested resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

fn extract_message(json: &Value) -> Option<(String, String)> {
    let as_pair = |obj: &Value| {
        let summary = obj.get("summary")?.as_str()?.to_string();
        let detail = match obj.get("detail") {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        };
        Some((summary, detail))
    };

    if let Some(pair) = as_pair(json) {
        return Some(pair);
    }

    // Per-field validation errors: {"institution_id": {"summary": .., "detail": ..}}
    json.as_object()?
        .iter()
        .filter(|(key, _)| key.as_str() != "status_code")
        .find_map(|(field, value)| {
            as_pair(value).map(|(summary, detail)| (format!("{field}: {summary}"), detail))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_response_top_level() {
        let body = r#"{"summary":"Authentication failed","detail":"No active account found","status_code":401}"#;
        let err = ClientError::from_response(401, body);

        match err {
            ClientError::Api {
                status,
                ref summary,
                ref detail,
            } => {
                assert_eq!(status, 401);
                assert_eq!(summary, "Authentication failed");
                assert_eq!(detail, "No active account found");
            }
            _ => panic!("Expected API error"),
        }
        assert!(err.is_unauthorized());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_from_response_field_error() {
        let body = r#"{"institution_id":{"summary":"Unknown Institution ID","detail":"Get Institution IDs from /institutions/?country={$COUNTRY_CODE}"},"status_code":400}"#;
        let err = ClientError::from_response(400, body);

        match err {
            ClientError::Api {
                status, summary, ..
            } => {
                assert_eq!(status, 400);
                assert_eq!(summary, "institution_id: Unknown Institution ID");
            }
            _ => panic!("Expected API error"),
        }
    }

    #[test]
    fn test_from_response_non_json() {
        let err = ClientError::from_response(502, "Bad Gateway");

        match err {
            ClientError::Api {
                status,
                summary,
                detail,
            } => {
                assert_eq!(status, 502);
                assert_eq!(summary, "Bad Gateway");
                assert!(detail.is_empty());
            }
            _ => panic!("Expected API error"),
        }
    }

    #[test]
    fn test_status_of_non_api_error() {
        assert_eq!(ClientError::config("missing").status(), None);
    }
}
