// UEF Trade Summit - Registration Core
//
// This crate implements the conference-registration workflow: email
// ownership verification via emailed one-time passcodes, duplicate-email
// guarding, attachment upload, and persistence of the registration record.
// The hosted backend (identity provider, document store, blob store,
// triggered email) is consumed through the traits in kernel/traits.rs.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;

pub use config::*;
