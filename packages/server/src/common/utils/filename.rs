/// Filename sanitization for blob-storage keys
///
/// Pure functions with no side effects. Uploaded files keep a recognizable
/// name but are stripped down to `[a-z0-9_-]` plus a lowercased extension;
/// uniqueness comes from the epoch-millis prefix in the storage key, so even
/// a name that sanitizes to nothing still yields a usable key.

/// Sanitize a user-supplied filename.
///
/// The base name (everything before the last dot) is lowercased, whitespace
/// runs become single hyphens, anything outside `[a-z0-9_-]` is dropped,
/// repeated hyphens collapse, and leading/trailing hyphens are trimmed. The
/// extension is reattached lowercased. Never fails: `"....jpg"` becomes
/// `".jpg"`.
pub fn sanitize_file_name(filename: &str) -> String {
    let (name, extension) = match filename.rfind('.') {
        Some(idx) => (&filename[..idx], &filename[idx..]),
        None => (filename, ""),
    };

    let mut sanitized = String::with_capacity(name.len());
    let mut pending_hyphen = false;
    for c in name.to_lowercase().chars() {
        let mapped = if c.is_whitespace() { '-' } else { c };
        match mapped {
            '-' => pending_hyphen = !sanitized.is_empty(),
            c if c.is_ascii_alphanumeric() || c == '_' => {
                if pending_hyphen {
                    sanitized.push('-');
                    pending_hyphen = false;
                }
                sanitized.push(c);
            }
            _ => {}
        }
    }

    format!("{}{}", sanitized, extension.to_lowercase())
}

/// Storage key for an upload: `<folder>/<epoch-millis>_<sanitized-name>`.
///
/// The millisecond prefix is the collision guard; good enough for a
/// registration form, not a strong uniqueness guarantee.
pub fn storage_key(folder: &str, filename: &str, epoch_millis: i64) -> String {
    format!(
        "{}/{}_{}",
        folder,
        epoch_millis,
        sanitize_file_name(filename)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spaces_become_hyphens_and_specials_drop() {
        assert_eq!(sanitize_file_name("My Photo #1.PNG"), "my-photo-1.png");
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        assert_eq!(sanitize_file_name("a   b\t c.jpg"), "a-b-c.jpg");
    }

    #[test]
    fn test_repeated_hyphens_collapse() {
        assert_eq!(sanitize_file_name("a--b---c.gif"), "a-b-c.gif");
    }

    #[test]
    fn test_leading_and_trailing_hyphens_trimmed() {
        assert_eq!(sanitize_file_name("--photo--.jpg"), "photo.jpg");
        assert_eq!(sanitize_file_name("  photo  .jpg"), "photo.jpg");
    }

    #[test]
    fn test_underscores_survive() {
        assert_eq!(sanitize_file_name("IMG_2024 final.jpeg"), "img_2024-final.jpeg");
    }

    #[test]
    fn test_no_extension() {
        assert_eq!(sanitize_file_name("Pay Proof"), "pay-proof");
    }

    #[test]
    fn test_pathological_name_still_yields_a_key() {
        // Base sanitizes to empty; the epoch prefix keeps the key valid.
        assert_eq!(sanitize_file_name("....jpg"), ".jpg");
        assert_eq!(
            storage_key("payment-screenshots", "....jpg", 1700000000000),
            "payment-screenshots/1700000000000_.jpg"
        );
    }

    #[test]
    fn test_storage_key_shape() {
        assert_eq!(
            storage_key("profile-pictures", "My Photo #1.PNG", 1700000000000),
            "profile-pictures/1700000000000_my-photo-1.png"
        );
    }
}
