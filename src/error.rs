use reqwest::StatusCode;
use thiserror::Error;

/// Failures talking to the dashboard API or the PDF service.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {status}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    InvalidInput(String),
}

impl ApiError {
    /// Short form for status lines where the full chain is too long.
    pub fn summary(&self) -> String {
        match self {
            ApiError::Status { status, .. } => format!("server returned {}", status),
            ApiError::Network { .. } => "network error, is the API running?".to_string(),
            ApiError::Decode { .. } => "unexpected response from server".to_string(),
            other => other.to_string(),
        }
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_mentions_url_and_code() {
        let err = ApiError::Status {
            url: "http://api/api/v1/dashboard/admin".to_string(),
            status: StatusCode::BAD_GATEWAY,
            body: "upstream down".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/api/v1/dashboard/admin"));
        assert!(msg.contains("502"));
        assert!(msg.contains("upstream down"));
        assert_eq!(err.summary(), "server returned 502 Bad Gateway");
    }

    #[test]
    fn test_invalid_input_summary_is_message() {
        let err = ApiError::InvalidInput("target role is required".to_string());
        assert_eq!(err.summary(), "target role is required");
    }
}
