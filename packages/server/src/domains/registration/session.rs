//! Per-modal session state.
//!
//! All mutable state the registration modal owns lives here: the OTP slot,
//! the resend countdown, the skills being collected, and the
//! one-submission-at-a-time flag. `reset()` is the single contract invoked
//! on modal close and after a successful submit.

use crate::domains::auth::countdown::ResendGate;
use crate::domains::auth::otp::OtpEngine;
use crate::domains::registration::skills::SkillsList;
use crate::kernel::ServerDeps;

#[derive(Debug, Default)]
pub struct RegistrationSession {
    pub otp: OtpEngine,
    pub resend_gate: Option<ResendGate>,
    pub skills: SkillsList,
    /// Set while a submission is in flight; second submits are refused.
    pub submit_in_flight: bool,
}

impl RegistrationSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session whose OTP window follows the configured expiry.
    pub fn for_deps(deps: &ServerDeps) -> Self {
        Self {
            otp: OtpEngine::with_expiry_minutes(deps.otp_expiry_minutes),
            ..Self::default()
        }
    }

    /// Whether a new OTP may be requested right now.
    pub fn can_resend(&self) -> bool {
        match &self.resend_gate {
            Some(gate) => gate.can_resend(),
            None => true,
        }
    }

    /// Cancel the countdown without touching the rest of the session
    /// (used when verification succeeds and the resend controls disappear).
    pub fn cancel_countdown(&mut self) {
        if let Some(gate) = self.resend_gate.take() {
            gate.cancel();
        }
    }

    /// Clear everything: OTP slot, countdown, skills, in-flight flag.
    pub fn reset(&mut self) {
        self.otp.reset();
        self.cancel_countdown();
        self.skills.clear();
        self.submit_in_flight = false;
    }
}
