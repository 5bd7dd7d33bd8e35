// Auth activities - plain async functions over ServerDeps

pub mod send_otp;

pub use send_otp::{send_otp, SendOtpError};
