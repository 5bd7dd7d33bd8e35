//! Cloud Storage client — media upload and token-based download URLs.

use reqwest::Client;
use serde_json::Value;

use crate::{FirebaseError, FirebaseOptions};

const STORAGE_URL: &str = "https://firebasestorage.googleapis.com/v0";

/// Handle to an uploaded object, enough to build its download URL.
#[derive(Debug, Clone)]
pub struct StorageObject {
    pub name: String,
    pub download_token: Option<String>,
}

#[derive(Debug, Clone)]
pub struct StorageClient {
    options: FirebaseOptions,
    http: Client,
}

impl StorageClient {
    pub fn new(options: FirebaseOptions) -> Self {
        Self {
            options,
            http: Client::new(),
        }
    }

    /// Upload raw bytes under the given object key.
    pub async fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<StorageObject, FirebaseError> {
        let url = format!(
            "{}/b/{}/o?uploadType=media&name={}",
            STORAGE_URL,
            self.options.storage_bucket,
            urlencoding::encode(key)
        );

        let response = self
            .http
            .post(&url)
            .header("Content-Type", content_type)
            .body(bytes)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(FirebaseError::from_response(response).await);
        }

        let metadata: Value = response.json().await?;
        let name = metadata
            .get("name")
            .and_then(|n| n.as_str())
            .map(String::from)
            .ok_or_else(|| {
                FirebaseError::UnexpectedResponse("upload metadata has no name".to_string())
            })?;
        let download_token = metadata
            .get("downloadTokens")
            .and_then(|t| t.as_str())
            // Firebase can return a comma-separated token list
            .and_then(|t| t.split(',').next())
            .map(String::from);

        Ok(StorageObject {
            name,
            download_token,
        })
    }

    /// Publicly retrievable URL for an uploaded object.
    pub fn download_url(&self, object: &StorageObject) -> String {
        let base = format!(
            "{}/b/{}/o/{}?alt=media",
            STORAGE_URL,
            self.options.storage_bucket,
            urlencoding::encode(&object.name)
        );
        match &object.download_token {
            Some(token) => format!("{}&token={}", base, token),
            None => base,
        }
    }
}
