//! Content safety - flags profanity, personal data and overclaiming in drafts,
//! and masks what it can.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

const PROFANITY: [&str; 7] = ["damn", "hell", "shit", "fuck", "bitch", "ass", "bastard"];

const STRONG_CLAIMS: [&str; 4] = ["guarantee", "promise", "definitely will", "always works"];

/// SSN, phone number, email address.
static PII_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\b\d{3}-\d{2}-\d{4}\b",
        r"\b\d{3}-\d{3}-\d{4}\b",
        r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b",
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

static PROFANITY_PATTERNS: LazyLock<Vec<(usize, Regex)>> = LazyLock::new(|| {
    PROFANITY
        .iter()
        .filter_map(|word| {
            Regex::new(&format!(r"(?i)\b{}\b", regex::escape(word)))
                .ok()
                .map(|re| (word.chars().count(), re))
        })
        .collect()
});

/// Outcome of [`ContentSafetyChecker::check_content`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SafetyResult {
    pub safe: bool,
    pub issues: Vec<String>,
}

/// Stateless rule-based checker. Cheap to construct and share.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentSafetyChecker;

impl ContentSafetyChecker {
    pub fn new() -> Self {
        Self
    }

    pub fn check_content(&self, text: &str) -> SafetyResult {
        let mut issues = Vec::new();
        let lower = text.to_lowercase();

        for word in PROFANITY {
            if lower.contains(word) {
                issues.push(format!(
                    "Contains potentially inappropriate language: {}",
                    word
                ));
            }
        }

        // One PII issue at most, whichever category matches first.
        if PII_PATTERNS.iter().any(|re| re.is_match(text)) {
            issues.push("Contains potential personally identifiable information".to_string());
        }

        for claim in STRONG_CLAIMS {
            if lower.contains(claim) {
                issues.push(format!(
                    "Contains strong claim that should be verified: {}",
                    claim
                ));
            }
        }

        SafetyResult {
            safe: issues.is_empty(),
            issues,
        }
    }

    /// Mask profanity with asterisks, then replace personal data with `[REDACTED]`.
    ///
    /// The result is not re-checked; claims are left untouched.
    pub fn sanitize_content(&self, text: &str) -> String {
        let mut sanitized = text.to_string();

        for (len, re) in PROFANITY_PATTERNS.iter() {
            sanitized = re.replace_all(&sanitized, "*".repeat(*len)).into_owned();
        }

        for re in PII_PATTERNS.iter() {
            sanitized = re.replace_all(&sanitized, "[REDACTED]").into_owned();
        }

        sanitized
    }

    /// Pass safe text through unchanged, sanitize anything else.
    pub fn filter(&self, text: &str) -> String {
        let result = self.check_content(text);
        if result.safe {
            text.to_string()
        } else {
            tracing::debug!(issues = ?result.issues, "Sanitizing flagged post");
            self.sanitize_content(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIXED: &str = "Contact me at a@b.com or call 555-123-4567, damn it";

    #[test]
    fn test_sanitize_masks_and_redacts() {
        let checker = ContentSafetyChecker::new();
        let sanitized = checker.sanitize_content(MIXED);
        assert_eq!(
            sanitized,
            "Contact me at [REDACTED] or call [REDACTED], **** it"
        );
    }

    #[test]
    fn test_check_flags_mixed_content() {
        let checker = ContentSafetyChecker::new();
        let result = checker.check_content(MIXED);
        assert!(!result.safe);
        assert!(result.issues.len() >= 2);
        assert!(
            result
                .issues
                .contains(&"Contains potentially inappropriate language: damn".to_string())
        );
        assert!(
            result
                .issues
                .contains(&"Contains potential personally identifiable information".to_string())
        );
    }

    #[test]
    fn test_single_pii_issue_for_multiple_categories() {
        let checker = ContentSafetyChecker::new();
        let result = checker.check_content("SSN 123-45-6789, mail me at x@y.org");
        let pii = result
            .issues
            .iter()
            .filter(|i| i.contains("personally identifiable"))
            .count();
        assert_eq!(pii, 1);
    }

    #[test]
    fn test_claims_are_flagged_but_not_sanitized() {
        let checker = ContentSafetyChecker::new();
        let text = "This always works, I guarantee it.";
        let result = checker.check_content(text);
        assert_eq!(result.issues.len(), 2);
        assert_eq!(checker.sanitize_content(text), text);
    }

    #[test]
    fn test_substring_check_vs_word_boundary_sanitize() {
        let checker = ContentSafetyChecker::new();
        // "class" contains "ass": flagged by the substring check,
        // left alone by the word-boundary mask.
        let text = "A masterclass in hiring";
        assert!(!checker.check_content(text).safe);
        assert_eq!(checker.sanitize_content(text), text);
    }

    #[test]
    fn test_profanity_mask_is_case_insensitive_and_global() {
        let checker = ContentSafetyChecker::new();
        assert_eq!(checker.sanitize_content("Damn. DAMN. damn"), "****. ****. ****");
    }

    #[test]
    fn test_filter_passes_clean_text_through() {
        let checker = ContentSafetyChecker::new();
        let text = "Shipping small changes keeps teams fast.";
        assert_eq!(checker.filter(text), text);
        assert_eq!(checker.filter("call 555-123-4567"), "call [REDACTED]");
    }
}
