//! Kernel module - infrastructure traits and dependency wiring.

pub mod deps;
pub mod test_dependencies;
pub mod traits;

pub use deps::ServerDeps;
pub use traits::{
    AccountError, BaseBlobStore, BaseDocumentStore, BaseIdentityProvider, BlobHandle, FieldFilter,
};

/// Collection holding registration records.
pub const USERS_COLLECTION: &str = "users";

/// Collection watched by the hosted trigger that sends templated email.
pub const MAIL_COLLECTION: &str = "mail";
