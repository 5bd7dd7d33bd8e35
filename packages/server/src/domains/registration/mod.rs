//! Registration domain - the attendee registration workflow
//!
//! Owns the form model, the persisted record, the per-modal session state,
//! and the end-to-end submission activity (duplicate guard → account
//! creation → attachment uploads → record write → session reset).

pub mod activities;
pub mod models;
pub mod session;
pub mod skills;

pub use models::{RegistrationForm, RegistrationRecord, UploadedFile};
pub use session::RegistrationSession;
pub use skills::SkillsList;
