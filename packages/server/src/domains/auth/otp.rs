//! Single-slot OTP engine.
//!
//! Holds at most one active challenge in process memory; issuing a new code
//! discards the previous one. This is deliberately NOT an auth boundary:
//! the code lives client-side with no server store or rate limiting. Its
//! threat model is casual duplicate prevention — confirming the attendee
//! can read the mailbox they typed — nothing stronger.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

/// Default challenge lifetime.
pub const DEFAULT_EXPIRY_MINUTES: i64 = 5;

/// Observable engine state, for UI gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpState {
    /// No active challenge
    Idle,
    /// A code has been issued and not yet verified
    Issued,
    /// The challenge was verified; email fields should lock
    Verified,
}

/// Verification failures. `Mismatch` leaves the challenge intact
/// (retry-able); `Expired` clears it.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum OtpError {
    #[error("enter the 6-digit code from your email")]
    InvalidFormat,

    #[error("no code has been requested")]
    NotIssued,

    #[error("the code has expired, request a new one")]
    Expired,

    #[error("incorrect code")]
    Mismatch,
}

#[derive(Debug, Clone)]
struct Challenge {
    code: String,
    issued_at: DateTime<Utc>,
}

/// Generate a uniform 6-digit code in [100000, 999999].
fn generate_code() -> String {
    rand::thread_rng().gen_range(100_000..1_000_000).to_string()
}

#[derive(Debug)]
pub struct OtpEngine {
    challenge: Option<Challenge>,
    verified: bool,
    expiry: Duration,
}

impl OtpEngine {
    pub fn new() -> Self {
        Self::with_expiry_minutes(DEFAULT_EXPIRY_MINUTES)
    }

    pub fn with_expiry_minutes(minutes: i64) -> Self {
        Self {
            challenge: None,
            verified: false,
            expiry: Duration::minutes(minutes),
        }
    }

    /// Issue a fresh challenge, discarding any prior one. Returns the code
    /// so the caller can embed it in the verification mail.
    pub fn issue(&mut self) -> String {
        let code = generate_code();
        self.challenge = Some(Challenge {
            code: code.clone(),
            issued_at: Utc::now(),
        });
        self.verified = false;
        code
    }

    /// Drop the active challenge and verified flag (modal close, send
    /// failure, post-submit reset).
    pub fn reset(&mut self) {
        self.challenge = None;
        self.verified = false;
    }

    pub fn state(&self) -> OtpState {
        if self.verified {
            OtpState::Verified
        } else if self.challenge.is_some() {
            OtpState::Issued
        } else {
            OtpState::Idle
        }
    }

    pub fn is_verified(&self) -> bool {
        self.verified
    }

    /// Check the entered code against the active challenge.
    ///
    /// Expiry is checked before the value: a late attempt clears the slot
    /// and reports `Expired` even if the digits were right. A mismatch
    /// keeps the challenge (same code, same timestamp) so the user can
    /// retry within the window. Verifying after success is a no-op.
    pub fn verify(&mut self, input: &str) -> Result<(), OtpError> {
        self.verify_at(input, Utc::now())
    }

    fn verify_at(&mut self, input: &str, now: DateTime<Utc>) -> Result<(), OtpError> {
        if self.verified {
            return Ok(());
        }

        let input = input.trim();
        if input.len() != 6 || !input.bytes().all(|b| b.is_ascii_digit()) {
            return Err(OtpError::InvalidFormat);
        }

        let challenge = self.challenge.as_ref().ok_or(OtpError::NotIssued)?;

        if now - challenge.issued_at > self.expiry {
            self.challenge = None;
            return Err(OtpError::Expired);
        }

        if input != challenge.code {
            return Err(OtpError::Mismatch);
        }

        self.verified = true;
        Ok(())
    }

    /// Backdate the active challenge; test hook for expiry behavior.
    #[doc(hidden)]
    pub fn backdate_issuance(&mut self, by: Duration) {
        if let Some(challenge) = self.challenge.as_mut() {
            challenge.issued_at = challenge.issued_at - by;
        }
    }
}

impl Default for OtpEngine {
    fn default() -> Self {
        Self::new()
    }
}
