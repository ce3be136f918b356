//! Error Types
//!
//! API and form errors surfaced in the UI.

use thiserror::Error;

/// Failure talking to the remote API
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Your session has expired, please sign in again")]
    Unauthorized,

    #[error("Request failed ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Could not encode request: {0}")]
    Encode(String),
}

impl ApiError {
    /// Build from a non-2xx status and the raw response body.
    /// Laravel-style `{"message": "..."}` bodies are unwrapped.
    pub fn from_status(status: u16, body: &str) -> Self {
        if status == 401 {
            return ApiError::Unauthorized;
        }
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| default_status_message(status).to_string());
        ApiError::Status { status, message }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

fn default_status_message(status: u16) -> &'static str {
    match status {
        403 => "Not allowed",
        404 => "Not found",
        422 => "Invalid data",
        500..=599 => "Server error",
        _ => "Request failed",
    }
}

/// Form guard failure shown inline next to the form
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a title")]
    MissingTitle,

    #[error("Please enter a name")]
    MissingName,

    #[error("Please select at least one color")]
    NoColors,

    #[error("Please enter how many colors the set has")]
    InvalidCount,

    #[error("Selected {selected} of {expected} colors")]
    CountMismatch { selected: usize, expected: usize },

    #[error("Please pick a date")]
    MissingDate,

    #[error("Please enter a YouTube link or video id")]
    InvalidVideo,

    #[error("Please enter an image link")]
    MissingPath,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_from_body() {
        let err = ApiError::from_status(422, r#"{"message":"The title field is required."}"#);
        assert_eq!(
            err,
            ApiError::Status { status: 422, message: "The title field is required.".to_string() }
        );
        assert_eq!(err.to_string(), "Request failed (422): The title field is required.");
    }

    #[test]
    fn test_status_message_fallback() {
        let err = ApiError::from_status(503, "<html>bad gateway</html>");
        assert_eq!(err, ApiError::Status { status: 503, message: "Server error".to_string() });
    }

    #[test]
    fn test_401_is_unauthorized() {
        assert!(ApiError::from_status(401, "").is_unauthorized());
    }

    #[test]
    fn test_count_mismatch_message() {
        let err = ValidationError::CountMismatch { selected: 3, expected: 12 };
        assert_eq!(err.to_string(), "Selected 3 of 12 colors");
    }
}
