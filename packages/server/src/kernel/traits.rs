// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic. They mirror the
// hosted backend-as-a-service contract: an identity provider, a document
// store with a mail-trigger collection, and a blob store.
//
// Naming convention: Base* for trait names (e.g., BaseDocumentStore)

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};

// =============================================================================
// Identity Provider Trait (Infrastructure - account creation)
// =============================================================================

/// Account-creation refusals from the identity provider.
///
/// Anything transport-level (network, 5xx) is `Provider` and should be
/// surfaced as retry-able; the first three are terminal for the given input.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("email is already in use")]
    EmailExists,

    #[error("malformed email address")]
    InvalidEmail,

    #[error("password rejected as too weak")]
    WeakPassword,

    #[error("identity provider error: {0}")]
    Provider(#[source] anyhow::Error),
}

#[async_trait]
pub trait BaseIdentityProvider: Send + Sync {
    /// Create an email/password account; returns the provider-issued account id.
    async fn create_account(&self, email: &str, password: &str) -> Result<String, AccountError>;
}

// =============================================================================
// Document Store Trait (Infrastructure - queries, writes, mail trigger)
// =============================================================================

/// Single-field equality filter, the only query shape this flow needs.
#[derive(Debug, Clone)]
pub struct FieldFilter {
    pub field: String,
    pub value: String,
}

impl FieldFilter {
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

#[async_trait]
pub trait BaseDocumentStore: Send + Sync {
    /// Return documents in `collection` matching the filter.
    async fn query(&self, collection: &str, filter: FieldFilter) -> Result<Vec<Map<String, Value>>>;

    /// Write a document under a caller-chosen id.
    ///
    /// When `server_timestamp_field` is set, the store stamps that field
    /// with its own clock at write time.
    async fn write(
        &self,
        collection: &str,
        id: &str,
        doc: Map<String, Value>,
        server_timestamp_field: Option<&str>,
    ) -> Result<()>;

    /// Insert a document with a store-generated id; returns the id.
    /// Inserting into the mail collection triggers an email send.
    async fn add(&self, collection: &str, doc: Map<String, Value>) -> Result<String>;
}

// =============================================================================
// Blob Store Trait (Infrastructure - attachment upload)
// =============================================================================

/// Opaque handle to an uploaded blob.
#[derive(Debug, Clone)]
pub struct BlobHandle {
    pub key: String,
    pub token: Option<String>,
}

#[async_trait]
pub trait BaseBlobStore: Send + Sync {
    /// Upload bytes under the given key.
    async fn upload(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<BlobHandle>;

    /// Publicly retrievable URL for an uploaded blob.
    async fn download_url(&self, handle: &BlobHandle) -> Result<String>;
}
