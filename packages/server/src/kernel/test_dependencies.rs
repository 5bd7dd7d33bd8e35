// Mock implementations for testing
//
// Provides mock collaborators that can be injected into ServerDeps for
// tests: a recording identity provider, an in-memory document store, and a
// recording blob store. Each supports fail-injection for transient-error
// paths.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::{
    AccountError, BaseBlobStore, BaseDocumentStore, BaseIdentityProvider, BlobHandle, FieldFilter,
    ServerDeps,
};

// =============================================================================
// Mock Identity Provider
// =============================================================================

/// Arguments captured from a create_account call
#[derive(Debug, Clone)]
pub struct CreateAccountCall {
    pub email: String,
    pub password: String,
}

#[derive(Default)]
pub struct MockIdentityProvider {
    calls: Arc<Mutex<Vec<CreateAccountCall>>>,
    fail_next: Arc<Mutex<bool>>,
    refuse_as_existing: Arc<Mutex<bool>>,
    next_id: Arc<Mutex<u64>>,
}

impl MockIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next create_account call fail with a transient error.
    pub fn with_transient_failure(self) -> Self {
        *self.fail_next.lock().unwrap() = true;
        self
    }

    /// Refuse every create_account call as EMAIL_EXISTS.
    pub fn with_email_taken(self) -> Self {
        *self.refuse_as_existing.lock().unwrap() = true;
        self
    }

    pub fn calls(&self) -> Vec<CreateAccountCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn account_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl BaseIdentityProvider for MockIdentityProvider {
    async fn create_account(&self, email: &str, password: &str) -> Result<String, AccountError> {
        if std::mem::take(&mut *self.fail_next.lock().unwrap()) {
            return Err(AccountError::Provider(anyhow::anyhow!(
                "simulated provider outage"
            )));
        }
        if *self.refuse_as_existing.lock().unwrap() {
            return Err(AccountError::EmailExists);
        }

        self.calls.lock().unwrap().push(CreateAccountCall {
            email: email.to_string(),
            password: password.to_string(),
        });

        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        Ok(format!("auth-uid-{}", next))
    }
}

// =============================================================================
// In-memory Document Store
// =============================================================================

type Collections = HashMap<String, Vec<(String, Map<String, Value>)>>;

#[derive(Default)]
pub struct InMemoryDocumentStore {
    collections: Arc<Mutex<Collections>>,
    fail_query: Arc<Mutex<bool>>,
    fail_add: Arc<Mutex<bool>>,
    fail_write: Arc<Mutex<bool>>,
    auto_id: Arc<Mutex<u64>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a document, e.g. an already-registered user.
    pub fn with_document(self, collection: &str, id: &str, doc: Value) -> Self {
        let fields = doc.as_object().cloned().unwrap_or_default();
        self.collections
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .push((id.to_string(), fields));
        self
    }

    pub fn with_failing_queries(self) -> Self {
        *self.fail_query.lock().unwrap() = true;
        self
    }

    pub fn with_failing_adds(self) -> Self {
        *self.fail_add.lock().unwrap() = true;
        self
    }

    pub fn with_failing_writes(self) -> Self {
        *self.fail_write.lock().unwrap() = true;
        self
    }

    /// Seed a document after construction (e.g. to simulate a race between
    /// OTP issuance and submit).
    pub fn insert_document(&self, collection: &str, id: &str, doc: Value) {
        let fields = doc.as_object().cloned().unwrap_or_default();
        self.collections
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .push((id.to_string(), fields));
    }

    /// All documents in a collection, in insertion order.
    pub fn documents(&self, collection: &str) -> Vec<(String, Map<String, Value>)> {
        self.collections
            .lock()
            .unwrap()
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    pub fn document_count(&self, collection: &str) -> usize {
        self.documents(collection).len()
    }
}

#[async_trait]
impl BaseDocumentStore for InMemoryDocumentStore {
    async fn query(
        &self,
        collection: &str,
        filter: FieldFilter,
    ) -> Result<Vec<Map<String, Value>>> {
        if *self.fail_query.lock().unwrap() {
            anyhow::bail!("simulated store outage");
        }
        let matches = self
            .documents(collection)
            .into_iter()
            .filter(|(_, fields)| {
                fields.get(&filter.field).and_then(|v| v.as_str()) == Some(filter.value.as_str())
            })
            .map(|(_, fields)| fields)
            .collect();
        Ok(matches)
    }

    async fn write(
        &self,
        collection: &str,
        id: &str,
        mut doc: Map<String, Value>,
        server_timestamp_field: Option<&str>,
    ) -> Result<()> {
        if *self.fail_write.lock().unwrap() {
            anyhow::bail!("simulated store outage");
        }
        if let Some(field) = server_timestamp_field {
            doc.insert(field.to_string(), Value::String(Utc::now().to_rfc3339()));
        }
        self.collections
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .push((id.to_string(), doc));
        Ok(())
    }

    async fn add(&self, collection: &str, doc: Map<String, Value>) -> Result<String> {
        if *self.fail_add.lock().unwrap() {
            anyhow::bail!("simulated store outage");
        }
        let mut next = self.auto_id.lock().unwrap();
        *next += 1;
        let id = format!("doc-{}", next);
        self.collections
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .push((id.clone(), doc));
        Ok(id)
    }
}

// =============================================================================
// Mock Blob Store
// =============================================================================

/// Arguments captured from an upload call
#[derive(Debug, Clone)]
pub struct UploadCall {
    pub key: String,
    pub byte_len: usize,
    pub content_type: String,
}

#[derive(Default)]
pub struct MockBlobStore {
    uploads: Arc<Mutex<Vec<UploadCall>>>,
    fail_next: Arc<Mutex<bool>>,
}

impl MockBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failing_upload(self) -> Self {
        *self.fail_next.lock().unwrap() = true;
        self
    }

    pub fn uploads(&self) -> Vec<UploadCall> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn was_uploaded(&self, key_prefix: &str) -> bool {
        self.uploads
            .lock()
            .unwrap()
            .iter()
            .any(|u| u.key.starts_with(key_prefix))
    }
}

#[async_trait]
impl BaseBlobStore for MockBlobStore {
    async fn upload(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<BlobHandle> {
        if std::mem::take(&mut *self.fail_next.lock().unwrap()) {
            anyhow::bail!("simulated storage outage");
        }
        self.uploads.lock().unwrap().push(UploadCall {
            key: key.to_string(),
            byte_len: bytes.len(),
            content_type: content_type.to_string(),
        });
        Ok(BlobHandle {
            key: key.to_string(),
            token: None,
        })
    }

    async fn download_url(&self, handle: &BlobHandle) -> Result<String> {
        Ok(format!("https://blobs.test/{}", handle.key))
    }
}

// =============================================================================
// Assembled test deps
// =============================================================================

/// ServerDeps over fresh mocks, plus handles to inspect them afterwards.
pub struct TestDeps {
    pub deps: ServerDeps,
    pub identity: Arc<MockIdentityProvider>,
    pub store: Arc<InMemoryDocumentStore>,
    pub blobs: Arc<MockBlobStore>,
}

impl TestDeps {
    pub fn new() -> Self {
        Self::with_mocks(
            MockIdentityProvider::new(),
            InMemoryDocumentStore::new(),
            MockBlobStore::new(),
        )
    }

    pub fn with_mocks(
        identity: MockIdentityProvider,
        store: InMemoryDocumentStore,
        blobs: MockBlobStore,
    ) -> Self {
        let identity = Arc::new(identity);
        let store = Arc::new(store);
        let blobs = Arc::new(blobs);
        let deps = ServerDeps::new(
            identity.clone(),
            store.clone(),
            blobs.clone(),
            "UEF Trade Summit <noreply@uef.example>".to_string(),
            5,
            60,
        );
        Self {
            deps,
            identity,
            store,
            blobs,
        }
    }
}

impl Default for TestDeps {
    fn default() -> Self {
        Self::new()
    }
}
