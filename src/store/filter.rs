//! Case-insensitive match helpers for the scan-based search adapter.

/// Substring match, case-insensitive ("smith" matches "Dr. John Smith").
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Whole-value equality, case-insensitive (used for business codes such as
/// a dentist's CRO or an invoice number).
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substring_match_is_case_insensitive() {
        assert!(contains_ignore_case("Dr. John Smith", "smith"));
        assert!(contains_ignore_case("smith, jane", "SMITH"));
        assert!(!contains_ignore_case("Johnson", "smith"));
    }

    #[test]
    fn exact_match_is_case_insensitive() {
        assert!(eq_ignore_case("CRO-123", "cro-123"));
        assert!(!eq_ignore_case("CRO-123", "CRO-12"));
    }
}
