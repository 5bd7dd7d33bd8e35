use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub firebase_api_key: String,
    pub firebase_project_id: String,
    pub firebase_storage_bucket: String,
    /// Sender shown on verification mail, e.g. "UEF Trade Summit <noreply@uef.example>"
    pub mail_from: String,
    pub otp_expiry_minutes: i64,
    pub resend_cooldown_seconds: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            firebase_api_key: env::var("FIREBASE_API_KEY")
                .context("FIREBASE_API_KEY must be set")?,
            firebase_project_id: env::var("FIREBASE_PROJECT_ID")
                .context("FIREBASE_PROJECT_ID must be set")?,
            firebase_storage_bucket: env::var("FIREBASE_STORAGE_BUCKET")
                .context("FIREBASE_STORAGE_BUCKET must be set")?,
            mail_from: env::var("MAIL_FROM").context("MAIL_FROM must be set")?,
            otp_expiry_minutes: env::var("OTP_EXPIRY_MINUTES")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .context("OTP_EXPIRY_MINUTES must be a valid number")?,
            resend_cooldown_seconds: env::var("RESEND_COOLDOWN_SECONDS")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .context("RESEND_COOLDOWN_SECONDS must be a valid number")?,
        })
    }
}
