//! Verification mail template.
//!
//! The backend's trigger extension sends whatever lands in the mail
//! collection, so "sending" an OTP is building this document.

use serde_json::{json, Map, Value};

const SUBJECT: &str = "UEF Trade Summit 2025 - Email Verification OTP";

/// Build the mail document for an OTP challenge: `to`, `from`, and a
/// `message` with subject, plain text, and HTML bodies carrying the code.
pub fn otp_mail_document(to: &str, from: &str, display_name: &str, code: &str) -> Map<String, Value> {
    let name = if display_name.trim().is_empty() {
        "User"
    } else {
        display_name.trim()
    };

    let text = format!(
        "Hello {name},\n\nYour OTP code is: {code}\n\nThis code will expire in 5 minutes.\n\nBest regards,\nUEF Trade Summit Team"
    );

    let doc = json!({
        "to": to,
        "from": from,
        "message": {
            "subject": SUBJECT,
            "text": text,
            "html": otp_mail_html(name, code),
        }
    });
    doc.as_object().cloned().unwrap_or_default()
}

fn otp_mail_html(name: &str, code: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<style>
    body {{ font-family: 'Arial', sans-serif; background-color: #f5f5f5; margin: 0; padding: 0; }}
    .container {{ max-width: 600px; margin: 40px auto; background: white; border-radius: 12px; overflow: hidden; }}
    .header {{ background: linear-gradient(135deg, #c51f84 0%, #e73b9f 100%); padding: 30px; text-align: center; color: white; }}
    .content {{ padding: 40px 30px; }}
    .otp-box {{ background: #f8f9fa; border: 2px dashed #c51f84; border-radius: 8px; padding: 20px; text-align: center; margin: 30px 0; }}
    .otp-code {{ font-size: 36px; font-weight: bold; color: #c51f84; letter-spacing: 8px; font-family: 'Courier New', monospace; }}
    .warning {{ background: #fff3cd; border-left: 4px solid #ffc107; padding: 12px; margin: 20px 0; font-size: 14px; }}
</style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>Email Verification</h1>
            <p style="margin: 10px 0 0 0; opacity: 0.9;">UEF Trade Summit 2025</p>
        </div>
        <div class="content">
            <p>Hello <strong>{name}</strong>,</p>
            <p>Thank you for registering for the UEF Trade Summit 2025! Please use the following One-Time Password (OTP) to verify your email address:</p>
            <div class="otp-box">
                <div style="font-size: 14px; color: #6c757d; margin-bottom: 10px;">Your OTP Code</div>
                <div class="otp-code">{code}</div>
            </div>
            <div class="warning"><strong>Important:</strong> This OTP will expire in 5 minutes. Do not share this code with anyone.</div>
            <p>If you didn't request this OTP, please ignore this email.</p>
            <p style="margin-top: 30px;">Best regards,<br><strong>United Economic Forum Team</strong></p>
        </div>
    </div>
</body>
</html>"#
    )
}
