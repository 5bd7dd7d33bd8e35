/// Email normalization and shape checks
///
/// Pure functions with no side effects. Every place an email crosses a
/// boundary (existence check, OTP send, account creation, record write) goes
/// through `normalize_email` first so the store only ever sees one spelling.

/// Canonical form used for storage and lookups: trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Minimal structural check: one `@`, non-empty local part, and a domain
/// containing a dot. Deliverability is the mail trigger's problem.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.contains(char::is_whitespace) {
        return false;
    }
    let mut parts = email.splitn(2, '@');
    let (Some(local), Some(domain)) = (parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    domain.split('.').count() >= 2 && !domain.starts_with('.') && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_lowercases() {
        assert_eq!(normalize_email("  Asha@Example.COM "), "asha@example.com");
    }

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("asha@example.com"));
        assert!(is_valid_email(" padded@mail.example.org "));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("a@"));
        assert!(!is_valid_email("a@nodot"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("two words@example.com"));
        assert!(!is_valid_email("a@b@example.com"));
    }
}
