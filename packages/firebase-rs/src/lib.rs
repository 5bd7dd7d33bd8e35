//! Minimal REST client for the Firebase services this project consumes:
//! Identity Toolkit (account creation), Firestore (document queries and
//! writes, including the `mail` collection consumed by the Trigger Email
//! extension), and Cloud Storage (media upload + download URLs).
//!
//! Only the handful of endpoints the registration flow needs are covered;
//! this is not a general Firebase SDK.

pub mod auth;
pub mod error;
pub mod firestore;
pub mod storage;
pub mod value;

pub use auth::{AuthClient, SignedUpUser};
pub use error::FirebaseError;
pub use firestore::{FirestoreClient, StoredDocument};
pub use storage::{StorageClient, StorageObject};

/// Connection options shared by all three service clients.
#[derive(Debug, Clone)]
pub struct FirebaseOptions {
    pub api_key: String,
    pub project_id: String,
    pub storage_bucket: String,
}
