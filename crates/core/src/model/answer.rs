/// Canonical shape of an answer for comparison: surrounding whitespace removed
/// and case folded.
#[must_use]
pub fn normalize_answer(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// True when `submitted` matches `expected` after normalization.
#[must_use]
pub fn answers_match(submitted: &str, expected: &str) -> bool {
    normalize_answer(submitted) == normalize_answer(expected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_case_and_surrounding_whitespace() {
        assert!(answers_match("  Parlo  ", "parlo"));
        assert!(answers_match("È", "è"));
        assert!(answers_match("sto parlando", " Sto Parlando"));
    }

    #[test]
    fn inner_whitespace_still_counts() {
        assert!(!answers_match("ho  parlato", "ho parlato"));
    }
}
