//! Registration submission workflow.
//!
//! Sequential, non-reentrant orchestration: verified-email gate →
//! duplicate re-check → account creation → attachment uploads → record
//! write → session reset. No record is written unless every earlier step
//! succeeded; the one acknowledged gap is an orphaned identity-provider
//! account when a step after account creation fails, which is logged
//! loudly rather than compensated.

use chrono::Utc;
use tracing::{error, info, warn};

use crate::common::utils::generate_password;
use crate::domains::registration::activities::{email_exists, upload_attachment};
use crate::domains::registration::models::{RegistrationForm, RegistrationRecord, UploadedFile};
use crate::domains::registration::session::RegistrationSession;
use crate::kernel::{AccountError, ServerDeps, USERS_COLLECTION};

/// Storage folder for profile pictures.
pub const PROFILE_PICTURES_FOLDER: &str = "profile-pictures";
/// Storage folder for payment proofs.
pub const PAYMENT_SCREENSHOTS_FOLDER: &str = "payment-screenshots";

/// Field the store stamps with its own clock at write time.
const REGISTERED_AT_FIELD: &str = "registrationDate";

/// Optional attachments collected by the form.
#[derive(Debug, Clone, Default)]
pub struct Attachments {
    pub profile_picture: Option<UploadedFile>,
    pub payment_screenshot: Option<UploadedFile>,
}

/// What the caller gets back after a successful submit.
#[derive(Debug, Clone)]
pub struct RegistrationReceipt {
    pub uid: String,
    pub auth_uid: String,
    pub profile_pic_url: Option<String>,
    pub payment_screenshot_url: Option<String>,
}

/// Submission failures, in the order the workflow can hit them.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("a submission is already in progress")]
    AlreadyInFlight,

    #[error("please verify your email address before submitting")]
    EmailNotVerified,

    #[error("{0}")]
    Validation(String),

    #[error("this email is already registered")]
    EmailAlreadyRegistered,

    #[error("account creation failed: {0}")]
    Account(#[from] AccountError),

    /// Transient backend failure (existence check, upload, or write);
    /// retry-able, the submit control is re-enabled.
    #[error("error submitting registration: {0}")]
    Backend(#[from] anyhow::Error),
}

/// Run the submission workflow end to end.
///
/// On success the session is reset (OTP slot cleared, skills emptied); on
/// any failure the in-flight flag is cleared so the user can retry, and
/// nothing else about the session changes.
pub async fn submit_registration(
    form: &RegistrationForm,
    attachments: &Attachments,
    session: &mut RegistrationSession,
    deps: &ServerDeps,
) -> Result<RegistrationReceipt, SubmitError> {
    if session.submit_in_flight {
        return Err(SubmitError::AlreadyInFlight);
    }
    session.submit_in_flight = true;

    let result = run_submission(form, attachments, session, deps).await;

    match &result {
        Ok(receipt) => {
            info!(uid = %receipt.uid, "Registration submitted, resetting session");
            session.reset();
        }
        Err(e) => {
            error!(error = %e, "Registration submission failed");
            session.submit_in_flight = false;
        }
    }

    result
}

async fn run_submission(
    form: &RegistrationForm,
    attachments: &Attachments,
    session: &RegistrationSession,
    deps: &ServerDeps,
) -> Result<RegistrationReceipt, SubmitError> {
    // Step 1: verified-email gate; nothing leaves the process before this.
    if !session.otp.is_verified() {
        return Err(SubmitError::EmailNotVerified);
    }

    form.validate().map_err(SubmitError::Validation)?;
    let email = form.normalized_email();

    // Step 2: race-guard — re-check uniqueness right before committing.
    // Someone may have registered this address since the OTP went out.
    if email_exists(&email, deps).await? {
        return Err(SubmitError::EmailAlreadyRegistered);
    }

    // Steps 3-4: create the identity-provider account under a throwaway
    // password; the user authenticates by OTP, not by this password.
    let password = generate_password();
    let auth_uid = deps.identity.create_account(&email, &password).await?;
    info!(auth_uid = %auth_uid, "Identity account created");

    // Step 5: uploads. A failure here strands the account created above —
    // known gap, no compensation; the warn! carries the id for manual
    // reconciliation.
    let profile_pic_url = match &attachments.profile_picture {
        Some(file) => Some(
            upload_attachment(PROFILE_PICTURES_FOLDER, file, deps)
                .await
                .map_err(|e| orphaned(&auth_uid, e))?,
        ),
        None => None,
    };
    let payment_screenshot_url = match &attachments.payment_screenshot {
        Some(file) => Some(
            upload_attachment(PAYMENT_SCREENSHOTS_FOLDER, file, deps)
                .await
                .map_err(|e| orphaned(&auth_uid, e))?,
        ),
        None => None,
    };

    // Step 6: persist under the epoch-millis document id.
    let uid = format!("user_{}", Utc::now().timestamp_millis());
    let record = RegistrationRecord::assemble(
        uid.clone(),
        auth_uid.clone(),
        form,
        session.skills.to_vec(),
        profile_pic_url.clone(),
        payment_screenshot_url.clone(),
    );
    deps.document_store
        .write(
            USERS_COLLECTION,
            &uid,
            record.to_document(),
            Some(REGISTERED_AT_FIELD),
        )
        .await
        .map_err(|e| orphaned(&auth_uid, e))?;

    info!(uid = %uid, email = %email, "Registration record written");

    Ok(RegistrationReceipt {
        uid,
        auth_uid,
        profile_pic_url,
        payment_screenshot_url,
    })
}

/// Flag a failure that leaves an account without a record.
fn orphaned(auth_uid: &str, e: anyhow::Error) -> SubmitError {
    warn!(
        auth_uid = %auth_uid,
        error = %e,
        "Step failed after account creation; account is orphaned"
    );
    SubmitError::Backend(e)
}
