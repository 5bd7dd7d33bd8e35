use rand::Rng;

/// Character classes for generated account passwords.
const PASSWORD_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*";

/// Length of generated account passwords.
pub const PASSWORD_LENGTH: usize = 16;

/// Generate a random password for identity-provider account creation.
///
/// The password only exists to satisfy the provider's email+password
/// contract: it is never shown to the user, never stored, and is not a
/// security boundary here — the user proves ownership via the emailed OTP.
pub fn generate_password() -> String {
    let mut rng = rand::thread_rng();
    (0..PASSWORD_LENGTH)
        .map(|_| PASSWORD_CHARS[rng.gen_range(0..PASSWORD_CHARS.len())] as char)
        .collect()
}
