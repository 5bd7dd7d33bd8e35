//! Server dependencies (using traits for testability)
//!
//! Central dependency container threaded through all domain activities,
//! plus the adapters that put the Firebase REST clients behind the
//! infrastructure traits.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;

use firebase::{AuthClient, FirebaseError, FirebaseOptions, FirestoreClient, StorageClient};

use crate::config::Config;
use crate::kernel::{
    AccountError, BaseBlobStore, BaseDocumentStore, BaseIdentityProvider, BlobHandle, FieldFilter,
};

// =============================================================================
// Firebase adapters (implement the Base* traits)
// =============================================================================

pub struct FirebaseIdentityAdapter(pub Arc<AuthClient>);

#[async_trait]
impl BaseIdentityProvider for FirebaseIdentityAdapter {
    async fn create_account(&self, email: &str, password: &str) -> Result<String, AccountError> {
        match self.0.sign_up(email, password).await {
            Ok(user) => Ok(user.local_id),
            Err(FirebaseError::AccountRefused { code }) => Err(match code.as_str() {
                "EMAIL_EXISTS" => AccountError::EmailExists,
                "INVALID_EMAIL" | "MISSING_EMAIL" => AccountError::InvalidEmail,
                "WEAK_PASSWORD" => AccountError::WeakPassword,
                other => AccountError::Provider(anyhow::anyhow!("sign-up refused: {}", other)),
            }),
            Err(e) => Err(AccountError::Provider(e.into())),
        }
    }
}

pub struct FirestoreAdapter(pub Arc<FirestoreClient>);

#[async_trait]
impl BaseDocumentStore for FirestoreAdapter {
    async fn query(
        &self,
        collection: &str,
        filter: FieldFilter,
    ) -> Result<Vec<Map<String, Value>>> {
        let documents = self
            .0
            .query_eq(collection, &filter.field, &filter.value)
            .await?;
        Ok(documents.into_iter().map(|doc| doc.fields).collect())
    }

    async fn write(
        &self,
        collection: &str,
        id: &str,
        doc: Map<String, Value>,
        server_timestamp_field: Option<&str>,
    ) -> Result<()> {
        self.0
            .write(collection, id, &doc, server_timestamp_field)
            .await?;
        Ok(())
    }

    async fn add(&self, collection: &str, doc: Map<String, Value>) -> Result<String> {
        Ok(self.0.add(collection, &doc).await?)
    }
}

pub struct FirebaseStorageAdapter(pub Arc<StorageClient>);

#[async_trait]
impl BaseBlobStore for FirebaseStorageAdapter {
    async fn upload(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<BlobHandle> {
        let object = self.0.upload(key, bytes, content_type).await?;
        Ok(BlobHandle {
            key: object.name,
            token: object.download_token,
        })
    }

    async fn download_url(&self, handle: &BlobHandle) -> Result<String> {
        let object = firebase::StorageObject {
            name: handle.key.clone(),
            download_token: handle.token.clone(),
        };
        Ok(self.0.download_url(&object))
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Dependencies accessible to domain activities (traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    pub identity: Arc<dyn BaseIdentityProvider>,
    pub document_store: Arc<dyn BaseDocumentStore>,
    pub blob_store: Arc<dyn BaseBlobStore>,
    /// Sender address stamped on verification mail
    pub mail_from: String,
    pub otp_expiry_minutes: i64,
    pub resend_cooldown_seconds: u32,
}

impl ServerDeps {
    pub fn new(
        identity: Arc<dyn BaseIdentityProvider>,
        document_store: Arc<dyn BaseDocumentStore>,
        blob_store: Arc<dyn BaseBlobStore>,
        mail_from: String,
        otp_expiry_minutes: i64,
        resend_cooldown_seconds: u32,
    ) -> Self {
        Self {
            identity,
            document_store,
            blob_store,
            mail_from,
            otp_expiry_minutes,
            resend_cooldown_seconds,
        }
    }

    /// Wire production dependencies against the hosted Firebase backend.
    pub fn from_config(config: &Config) -> Self {
        let options = FirebaseOptions {
            api_key: config.firebase_api_key.clone(),
            project_id: config.firebase_project_id.clone(),
            storage_bucket: config.firebase_storage_bucket.clone(),
        };

        Self::new(
            Arc::new(FirebaseIdentityAdapter(Arc::new(AuthClient::new(
                options.clone(),
            )))),
            Arc::new(FirestoreAdapter(Arc::new(FirestoreClient::new(
                options.clone(),
            )))),
            Arc::new(FirebaseStorageAdapter(Arc::new(StorageClient::new(
                options,
            )))),
            config.mail_from.clone(),
            config.otp_expiry_minutes,
            config.resend_cooldown_seconds,
        )
    }
}
