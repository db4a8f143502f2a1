/// Normalizes an email the same way accounts are created: trimmed and
/// lowercased, so lookups by email stay case-insensitive.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_lowercases() {
        assert_eq!(
            normalize_email("  Ana.Reyes@Example.COM "),
            "ana.reyes@example.com"
        );
    }

    #[test]
    fn already_normalized_is_unchanged() {
        assert_eq!(normalize_email("admin@school.edu"), "admin@school.edu");
    }
}
