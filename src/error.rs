use thiserror::Error;

/// Failure of a single HTTP round-trip, normalized to the message shown to users.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The transport failed before a response arrived.
    #[error("{0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// A success response whose body could not be decoded.
    #[error("{0}")]
    Decode(String),
}

impl ApiError {
    /// Build the error for a non-success response from its raw body.
    ///
    /// The body's `message` field wins when it is a non-empty string, a non-zero
    /// number or `true`; anything else (empty body, invalid JSON, missing or
    /// falsy field, objects) falls back to the status line.
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        #[derive(serde::Deserialize)]
        struct ErrorBody {
            message: Option<serde_json::Value>,
        }

        let message = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .and_then(|m| match m {
                serde_json::Value::String(s) if !s.is_empty() => Some(s),
                serde_json::Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
                serde_json::Value::Bool(true) => Some("true".to_string()),
                _ => None,
            })
            .unwrap_or_else(|| format!("HTTP error! status: {}", status));

        ApiError::Status { status, message }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Failure of a task operation, carrying the message that was stored and toasted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    /// The resource client reported a failure.
    #[error("{0}")]
    Request(String),

    /// The request succeeded but the envelope carried no payload.
    #[error("{0}")]
    MissingData(String),
}

impl TaskError {
    pub fn message(&self) -> &str {
        match self {
            TaskError::Request(msg) | TaskError::MissingData(msg) => msg,
        }
    }
}
