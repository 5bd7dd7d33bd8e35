//! Auth domain - email ownership verification via emailed OTP
//!
//! Responsibilities:
//! - Single-slot OTP engine (issue / verify / expire / reset)
//! - Resend cooldown gate (one cancellable countdown per engine)
//! - Templated verification mail, delivered by inserting into the
//!   store's mail collection

pub mod activities;
pub mod countdown;
pub mod email;
pub mod otp;

pub use countdown::ResendGate;
pub use otp::{OtpEngine, OtpError, OtpState};
