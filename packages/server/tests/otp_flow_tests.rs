//! Integration tests for the OTP send/verify flow against the mock backend.

mod common;

use common::*;
use summit_core::domains::auth::activities::{send_otp, SendOtpError};
use summit_core::domains::auth::{OtpError, OtpState};
use summit_core::domains::registration::session::RegistrationSession;
use summit_core::kernel::test_dependencies::{
    InMemoryDocumentStore, MockBlobStore, MockIdentityProvider, TestDeps,
};
use summit_core::kernel::MAIL_COLLECTION;

#[tokio::test]
async fn send_writes_templated_mail_and_arms_the_gate() {
    let t = test_deps();
    let mut session = RegistrationSession::new();

    send_otp(" Asha@Example.com ", "Asha", &mut session, &t.deps)
        .await
        .unwrap();

    assert_eq!(session.otp.state(), OtpState::Issued);

    let mails = t.store.documents(MAIL_COLLECTION);
    assert_eq!(mails.len(), 1);
    let (_, mail) = &mails[0];
    // Normalized recipient, configured sender, both bodies present
    assert_eq!(mail["to"], "asha@example.com");
    assert_eq!(mail["from"], "UEF Trade Summit <noreply@uef.example>");
    assert!(mail["message"]["subject"].as_str().unwrap().contains("OTP"));
    assert!(mail["message"]["html"].as_str().unwrap().contains("Asha"));

    let code = last_mailed_code(&t.store);
    assert_eq!(code.len(), 6);

    // Cooldown armed: no immediate resend
    assert!(!session.can_resend());
    assert_eq!(session.resend_gate.as_ref().unwrap().seconds_remaining(), 60);
}

#[tokio::test]
async fn mailed_code_verifies_the_session() {
    let t = test_deps();
    let mut session = RegistrationSession::new();

    send_and_verify("asha@example.com", &mut session, &t.deps, &t.store).await;

    assert_eq!(session.otp.state(), OtpState::Verified);
    assert!(session.otp.is_verified());
}

#[tokio::test]
async fn registered_email_is_refused_with_no_mail_side_effect() {
    let t = test_deps();
    seed_registered_user(&t.store, "taken@example.com");
    let mut session = RegistrationSession::new();

    let err = send_otp("taken@example.com", "Asha", &mut session, &t.deps)
        .await
        .unwrap_err();

    assert!(matches!(err, SendOtpError::EmailAlreadyRegistered));
    assert_eq!(t.store.document_count(MAIL_COLLECTION), 0);
    assert_eq!(session.otp.state(), OtpState::Idle);
}

#[tokio::test]
async fn existence_check_is_case_and_whitespace_insensitive() {
    let t = test_deps();
    seed_registered_user(&t.store, "taken@example.com");
    let mut session = RegistrationSession::new();

    let err = send_otp("  TAKEN@Example.COM ", "Asha", &mut session, &t.deps)
        .await
        .unwrap_err();
    assert!(matches!(err, SendOtpError::EmailAlreadyRegistered));
}

#[tokio::test]
async fn malformed_email_is_rejected_locally() {
    let t = test_deps();
    let mut session = RegistrationSession::new();

    let err = send_otp("not-an-email", "Asha", &mut session, &t.deps)
        .await
        .unwrap_err();

    assert!(matches!(err, SendOtpError::InvalidEmail));
    assert_eq!(t.store.document_count(MAIL_COLLECTION), 0);
}

#[tokio::test]
async fn store_outage_during_existence_check_is_not_treated_as_unregistered() {
    init_tracing();
    let t = TestDeps::with_mocks(
        MockIdentityProvider::new(),
        InMemoryDocumentStore::new().with_failing_queries(),
        MockBlobStore::new(),
    );
    let mut session = RegistrationSession::new();

    let err = send_otp("asha@example.com", "Asha", &mut session, &t.deps)
        .await
        .unwrap_err();

    assert!(matches!(err, SendOtpError::Backend(_)));
    // No code issued, no mail attempted
    assert_eq!(session.otp.state(), OtpState::Idle);
    assert_eq!(t.store.document_count(MAIL_COLLECTION), 0);
}

#[tokio::test]
async fn failed_mail_insert_rolls_the_engine_back_to_idle() {
    init_tracing();
    let t = TestDeps::with_mocks(
        MockIdentityProvider::new(),
        InMemoryDocumentStore::new().with_failing_adds(),
        MockBlobStore::new(),
    );
    let mut session = RegistrationSession::new();

    let err = send_otp("asha@example.com", "Asha", &mut session, &t.deps)
        .await
        .unwrap_err();

    assert!(matches!(err, SendOtpError::Backend(_)));
    // The undelivered code must not stay active
    assert_eq!(session.otp.state(), OtpState::Idle);
    assert_eq!(session.otp.verify("123456"), Err(OtpError::NotIssued));
    assert!(session.resend_gate.is_none());
}

#[tokio::test]
async fn reissue_replaces_the_previous_challenge() {
    let t = test_deps();
    let mut session = RegistrationSession::new();

    send_otp("asha@example.com", "Asha", &mut session, &t.deps)
        .await
        .unwrap();
    let first_code = last_mailed_code(&t.store);

    send_otp("asha@example.com", "Asha", &mut session, &t.deps)
        .await
        .unwrap();
    let second_code = last_mailed_code(&t.store);

    assert_eq!(t.store.document_count(MAIL_COLLECTION), 2);

    if first_code != second_code {
        assert_eq!(session.otp.verify(&first_code), Err(OtpError::Mismatch));
    }
    assert_eq!(session.otp.verify(&second_code), Ok(()));
}

#[tokio::test]
async fn configured_expiry_window_is_honored() {
    let mut t = test_deps();
    t.deps.otp_expiry_minutes = 1;
    let mut session = RegistrationSession::for_deps(&t.deps);

    send_otp("asha@example.com", "Asha", &mut session, &t.deps)
        .await
        .unwrap();
    let code = last_mailed_code(&t.store);

    // Two minutes elapsed overruns a one-minute window
    session
        .otp
        .backdate_issuance(chrono::Duration::minutes(2));
    assert_eq!(session.otp.verify(&code), Err(OtpError::Expired));
    assert_eq!(session.otp.state(), OtpState::Idle);
}
