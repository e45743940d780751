//! The one error shape callers of the client ever see.

use serde_json::Value;

/// Fallback when an error body is not JSON at all.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

/// Fallback when an error body is JSON but carries no usable `detail`.
pub const REQUEST_FAILED_MESSAGE: &str = "Request failed";

/// Shown when a 2xx body does not match the expected shape.
pub const UNEXPECTED_RESPONSE_MESSAGE: &str = "Received an unexpected response from the server.";

/// Connectivity message for a failed review submission.
pub const SUBMIT_NETWORK_MESSAGE: &str = "Failed to connect to server. Please try again.";

/// Connectivity message for a failed review listing.
pub const REVIEWS_NETWORK_MESSAGE: &str = "Failed to fetch reviews. Please try again.";

/// Connectivity message for a failed stats fetch.
pub const STATS_NETWORK_MESSAGE: &str = "Failed to fetch statistics. Please try again.";

/// Errors from the backend API layer.
///
/// Whatever went wrong, callers get a human-readable [`message`](Self::message),
/// a [`status`](Self::status) (0 when no response arrived) and, for
/// backend-declared errors, the raw JSON payload.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The backend answered with a non-2xx status.
    #[error("{message}")]
    Status {
        status: u16,
        message: String,
        /// Parsed error body, when it was JSON.
        data: Option<Value>,
    },

    /// No response reached us (DNS, refused connection, timeout, ...).
    #[error("{message}")]
    Network { message: String },

    /// A success response whose body could not be decoded.
    #[error("{message}")]
    Decode { status: u16, message: String },
}

impl ApiError {
    pub fn network(message: impl Into<String>) -> Self {
        ApiError::Network {
            message: message.into(),
        }
    }

    /// Human-readable message, safe to show in a banner.
    pub fn message(&self) -> &str {
        match self {
            ApiError::Status { message, .. }
            | ApiError::Network { message }
            | ApiError::Decode { message, .. } => message,
        }
    }

    /// HTTP status code; 0 means the request never got a response.
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Status { status, .. } | ApiError::Decode { status, .. } => *status,
            ApiError::Network { .. } => 0,
        }
    }

    /// Raw error payload declared by the backend, if any.
    pub fn data(&self) -> Option<&Value> {
        match self {
            ApiError::Status { data, .. } => data.as_ref(),
            _ => None,
        }
    }

    /// Build the error for a non-2xx response from its raw body.
    ///
    /// A JSON body's `detail` becomes the message. FastAPI-style validation
    /// errors (a list of `{msg}` objects) are joined. Anything that is not
    /// JSON falls back to [`GENERIC_ERROR_MESSAGE`].
    pub fn from_error_body(status: u16, body: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(body) {
            Ok(data) => {
                let message = detail_message(&data)
                    .unwrap_or_else(|| REQUEST_FAILED_MESSAGE.to_string());
                ApiError::Status {
                    status,
                    message,
                    data: Some(data),
                }
            }
            Err(_) => ApiError::Status {
                status,
                message: GENERIC_ERROR_MESSAGE.to_string(),
                data: None,
            },
        }
    }
}

fn detail_message(data: &Value) -> Option<String> {
    match data.get("detail")? {
        Value::String(detail) if !detail.trim().is_empty() => Some(detail.clone()),
        Value::Array(items) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            (!msgs.is_empty()).then(|| msgs.join("; "))
        }
        _ => None,
    }
}
