//! Identity Toolkit client — email/password account creation.

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::{FirebaseError, FirebaseOptions};

const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";

/// A freshly created Identity Toolkit account.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedUpUser {
    /// Provider-issued account id (the `uid` in Firebase terms)
    pub local_id: String,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct AuthClient {
    options: FirebaseOptions,
    http: Client,
}

impl AuthClient {
    pub fn new(options: FirebaseOptions) -> Self {
        Self {
            options,
            http: Client::new(),
        }
    }

    /// Create an email/password account via `accounts:signUp`.
    ///
    /// Identity Toolkit signals refusals (EMAIL_EXISTS, INVALID_EMAIL,
    /// WEAK_PASSWORD) with a 400 whose error message carries the code; those
    /// surface as [`FirebaseError::AccountRefused`] so callers can branch on
    /// them without string-matching transport errors.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<SignedUpUser, FirebaseError> {
        let url = format!(
            "{}/accounts:signUp?key={}",
            IDENTITY_TOOLKIT_URL, self.options.api_key
        );

        let response = self
            .http
            .post(&url)
            .json(&json!({
                "email": email,
                "password": password,
                "returnSecureToken": true,
            }))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::BAD_REQUEST {
            let err = FirebaseError::from_response(response).await;
            if let FirebaseError::Api { message, .. } = &err {
                // The refusal code is the first token of the message
                // (e.g. "WEAK_PASSWORD : Password should be ...").
                let code = message
                    .split_whitespace()
                    .next()
                    .unwrap_or("UNKNOWN")
                    .to_string();
                return Err(FirebaseError::AccountRefused { code });
            }
            return Err(err);
        }
        if !response.status().is_success() {
            return Err(FirebaseError::from_response(response).await);
        }

        Ok(response.json::<SignedUpUser>().await?)
    }
}
