/// Failure of a single call to the analysis service.
///
/// Shaped after what a browser HTTP client reports: either the server
/// answered (`response` is set, possibly with a `detail` string from the
/// body) or the request never got a response and only a transport message
/// is available.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", self.display_text())]
pub struct ApiFailure {
    pub response: Option<FailureResponse>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureResponse {
    pub status: u16,
    pub detail: Option<String>,
}

impl ApiFailure {
    /// The request never received a response.
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            response: None,
            message: Some(message.into()),
        }
    }

    /// The server answered with a non-success status.
    pub fn status(status: u16, detail: Option<String>) -> Self {
        Self {
            response: Some(FailureResponse { status, detail }),
            message: Some(format!("Request failed with status code {}", status)),
        }
    }

    /// The server answered but the body could not be decoded.
    pub fn decode(status: u16, message: impl Into<String>) -> Self {
        Self {
            response: Some(FailureResponse {
                status,
                detail: None,
            }),
            message: Some(message.into()),
        }
    }

    pub fn has_response(&self) -> bool {
        self.response.is_some()
    }

    /// Non-empty `detail` from the response body, if any.
    pub fn detail(&self) -> Option<&str> {
        self.response
            .as_ref()
            .and_then(|r| r.detail.as_deref())
            .filter(|d| !d.is_empty())
    }

    /// Non-empty transport message, if any.
    pub fn transport_message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.is_empty())
    }

    fn display_text(&self) -> &str {
        self.detail()
            .or_else(|| self.transport_message())
            .unwrap_or("request failed")
    }
}

impl From<reqwest::Error> for ApiFailure {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => ApiFailure::status(status.as_u16(), None),
            None if err.is_timeout() => ApiFailure::transport(format!("Request timed out: {}", err)),
            // Browser clients report every response-less failure this way.
            None => ApiFailure::transport(format!("Network Error: {}", err)),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Analysis request failed: {0}")]
    ApiError(#[from] ApiFailure),

    #[error("Error parsing content: {0}")]
    ParseError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::ApiError(err.into())
    }
}

impl From<std::env::VarError> for AppError {
    fn from(err: std::env::VarError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;
