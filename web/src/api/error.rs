//! Error taxonomy for talking to the lair service.

/// Failures surfaced by the API client.
///
/// `Validation` is raised before a request is composed; the other two map
/// transport failures and non-2xx responses respectively.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    #[error("could not reach the lair service: {0}")]
    Network(String),

    #[error("the lair service rejected the request ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    /// Builds a `Server` error from a non-2xx response, preferring the
    /// `error` field of the documented `{"error": "<text>"}` body.
    pub fn from_response(status: u16, body: &str) -> ApiError {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("error").and_then(|m| m.as_str()).map(str::to_string))
            .unwrap_or_else(|| body.trim().to_string());

        ApiError::Server { status, message }
    }
}
