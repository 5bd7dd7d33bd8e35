//! Test fixtures: forms, attachments, and helpers for driving the
//! registration flow against the mock backend.

use serde_json::json;

use summit_core::domains::registration::models::{RegistrationForm, UploadedFile};
use summit_core::domains::registration::session::RegistrationSession;
use summit_core::kernel::test_dependencies::{InMemoryDocumentStore, TestDeps};
use summit_core::kernel::{ServerDeps, MAIL_COLLECTION, USERS_COLLECTION};

/// Initialize tracing, respecting RUST_LOG.
/// Run tests with: RUST_LOG=debug cargo test -- --nocapture
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A form that passes validation.
pub fn valid_form(email: &str) -> RegistrationForm {
    RegistrationForm {
        name: "Asha Rao".to_string(),
        email: email.to_string(),
        dob: "1996-02-11".to_string(),
        age: 29,
        gender: "female".to_string(),
        nationality: "India".to_string(),
        state: Some("Tamil Nadu".to_string()),
        occupation: "entrepreneur".to_string(),
        custom_occupation: None,
        success: "Growing my venture into new markets".to_string(),
        meet_people: "Investors and fellow founders".to_string(),
        strengths: "Persistence".to_string(),
        weaknesses: "Impatience".to_string(),
        hobby: "Chess".to_string(),
    }
}

pub fn test_file(name: &str) -> UploadedFile {
    UploadedFile {
        name: name.to_string(),
        bytes: vec![0xFF, 0xD8, 0xFF, 0xE0],
        content_type: "image/jpeg".to_string(),
    }
}

/// Seed a registration record so `email` counts as taken.
pub fn seed_registered_user(store: &InMemoryDocumentStore, email: &str) {
    store.insert_document(
        USERS_COLLECTION,
        "user_1690000000000",
        json!({ "email": email, "approvalStatus": "pending" }),
    );
}

/// Pull the OTP code out of the most recent mail document's text body.
pub fn last_mailed_code(store: &InMemoryDocumentStore) -> String {
    let mails = store.documents(MAIL_COLLECTION);
    let (_, mail) = mails.last().expect("no mail was written");
    let text = mail["message"]["text"].as_str().expect("mail has no text body");
    text.chars()
        .collect::<Vec<_>>()
        .windows(6)
        .map(|w| w.iter().collect::<String>())
        .find(|candidate| candidate.bytes().all(|b| b.is_ascii_digit()))
        .expect("mail text carries no 6-digit code")
}

/// Drive the OTP flow to a verified session without hitting send:
/// issue directly on the engine and verify with the issued code.
pub fn verified_session() -> RegistrationSession {
    let mut session = RegistrationSession::new();
    let code = session.otp.issue();
    session.otp.verify(&code).expect("fresh code must verify");
    session
}

/// Run the real send activity and verify with the mailed code.
pub async fn send_and_verify(
    email: &str,
    session: &mut RegistrationSession,
    deps: &ServerDeps,
    store: &InMemoryDocumentStore,
) {
    summit_core::domains::auth::activities::send_otp(email, "Asha", session, deps)
        .await
        .expect("send_otp failed");
    let code = last_mailed_code(store);
    session.otp.verify(&code).expect("mailed code must verify");
}

pub fn test_deps() -> TestDeps {
    init_tracing();
    TestDeps::new()
}
