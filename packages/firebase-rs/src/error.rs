//! Typed errors for the Firebase REST client.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FirebaseError {
    /// HTTP transport failure (DNS, TLS, timeout)
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Firebase returned a non-success status with an error body
    #[error("firebase returned {status}: {message}")]
    Api { status: u16, message: String },

    /// Identity Toolkit refused the sign-up (EMAIL_EXISTS, INVALID_EMAIL, ...)
    #[error("account creation refused: {code}")]
    AccountRefused { code: String },

    /// Response body did not match the expected shape
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// JSON decode failure
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl FirebaseError {
    /// Build an `Api` error from a failed response, preserving any error
    /// message Firebase put in the body.
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| {
                v.pointer("/error/message")
                    .and_then(|m| m.as_str())
                    .map(String::from)
            })
            .unwrap_or(body);
        FirebaseError::Api { status, message }
    }
}
