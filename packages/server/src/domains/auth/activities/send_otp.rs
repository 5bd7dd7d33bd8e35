//! Send OTP activity
//!
//! Validates the address, refuses already-registered emails before any mail
//! side effect, issues a code on the session's engine, and delivers it by
//! inserting a templated document into the mail collection. A failed insert
//! rolls the engine back to Idle so no valid-looking but undelivered code
//! stays active.

use tracing::{error, info};

use crate::common::utils::{is_valid_email, normalize_email};
use crate::domains::auth::countdown::ResendGate;
use crate::domains::auth::email::otp_mail_document;
use crate::domains::registration::activities::email_exists;
use crate::domains::registration::session::RegistrationSession;
use crate::kernel::{ServerDeps, MAIL_COLLECTION};

/// Reasons an OTP request is refused or fails.
#[derive(Debug, thiserror::Error)]
pub enum SendOtpError {
    #[error("please enter a valid email address")]
    InvalidEmail,

    #[error("this email is already registered")]
    EmailAlreadyRegistered,

    /// Store unreachable during the existence check or mail insert;
    /// retry-able, and never treated as "email does not exist".
    #[error("unable to send the verification code: {0}")]
    Backend(#[from] anyhow::Error),
}

/// Issue and deliver a verification code for `email`.
///
/// On success the session holds an active challenge and a freshly armed
/// resend gate (any previous gate is replaced and its timer cancelled).
pub async fn send_otp(
    email: &str,
    display_name: &str,
    session: &mut RegistrationSession,
    deps: &ServerDeps,
) -> Result<(), SendOtpError> {
    if !is_valid_email(email) {
        return Err(SendOtpError::InvalidEmail);
    }
    let email = normalize_email(email);

    // Fail fast on an already-registered address; no mail goes out.
    if email_exists(&email, deps).await? {
        info!(email = %email, "OTP refused: email already registered");
        return Err(SendOtpError::EmailAlreadyRegistered);
    }

    let code = session.otp.issue();
    let mail = otp_mail_document(&email, &deps.mail_from, display_name, &code);

    if let Err(e) = deps.document_store.add(MAIL_COLLECTION, mail).await {
        // Hard requirement: a failed send must not leave an active code.
        session.otp.reset();
        error!(email = %email, error = %e, "Failed to deliver OTP mail, challenge cleared");
        return Err(SendOtpError::Backend(e));
    }

    session.resend_gate = Some(ResendGate::start(deps.resend_cooldown_seconds));
    info!(email = %email, "OTP mail queued");
    Ok(())
}
