//! Email existence check.
//!
//! Used twice per registration: optimistically before an OTP is sent, and
//! again immediately before the record write to narrow the race window
//! between issuance and submit.

use anyhow::Result;
use tracing::debug;

use crate::common::utils::normalize_email;
use crate::kernel::{FieldFilter, ServerDeps, USERS_COLLECTION};

/// Whether a registration record already exists for this email.
///
/// The address is normalized before the lookup so callers don't have to
/// be. A store failure propagates — an error is never "does not exist".
pub async fn email_exists(email: &str, deps: &ServerDeps) -> Result<bool> {
    let email = normalize_email(email);
    let matches = deps
        .document_store
        .query(USERS_COLLECTION, FieldFilter::eq("email", email.clone()))
        .await?;

    debug!(email = %email, matches = matches.len(), "Email existence check");
    Ok(!matches.is_empty())
}
