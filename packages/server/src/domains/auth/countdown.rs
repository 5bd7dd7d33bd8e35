//! Resend cooldown gate.
//!
//! One countdown per OTP engine: starting a new gate replaces (and thereby
//! aborts) the old one, and dropping the gate kills its task. UI reads
//! `seconds_remaining` / `can_resend` instead of the timer mutating any
//! display state itself.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

#[derive(Debug)]
pub struct ResendGate {
    seconds: watch::Receiver<u32>,
    task: JoinHandle<()>,
}

impl ResendGate {
    /// Start a countdown with one-second granularity.
    pub fn start(seconds: u32) -> Self {
        Self::start_with_tick(seconds, Duration::from_secs(1))
    }

    /// Tick-injectable constructor so tests don't wait wall-clock seconds.
    pub fn start_with_tick(seconds: u32, tick: Duration) -> Self {
        let (tx, rx) = watch::channel(seconds);
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick);
            // First tick completes immediately
            interval.tick().await;
            let mut remaining = seconds;
            while remaining > 0 {
                interval.tick().await;
                remaining -= 1;
                if tx.send(remaining).is_err() {
                    break;
                }
            }
        });
        Self { seconds: rx, task }
    }

    pub fn seconds_remaining(&self) -> u32 {
        *self.seconds.borrow()
    }

    /// True once the countdown has reached zero.
    pub fn can_resend(&self) -> bool {
        self.seconds_remaining() == 0
    }

    /// Stop the countdown (modal close, successful verification).
    pub fn cancel(&self) {
        self.task.abort();
    }
}

impl Drop for ResendGate {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_counts_down_to_zero_and_opens() {
        let gate = ResendGate::start_with_tick(3, Duration::from_millis(5));
        assert!(!gate.can_resend());
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(gate.seconds_remaining(), 0);
        assert!(gate.can_resend());
    }

    #[tokio::test]
    async fn test_cancel_freezes_the_countdown() {
        let gate = ResendGate::start_with_tick(60, Duration::from_millis(5));
        gate.cancel();
        tokio::time::sleep(Duration::from_millis(40)).await;
        // Task is dead; whatever was published stays put and the gate
        // never opens on its own.
        let frozen = gate.seconds_remaining();
        assert!(frozen > 0);
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(gate.seconds_remaining(), frozen);
    }

    #[tokio::test]
    async fn test_drop_aborts_the_task() {
        let gate = ResendGate::start_with_tick(60, Duration::from_millis(5));
        let handle = gate.task.abort_handle();
        drop(gate);
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(handle.is_finished());
    }
}
