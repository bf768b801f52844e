//! Title classification: maps a free-text job title to a `ProfileCategory`.
//!
//! Default: `KeywordClassifier` (ordered substring rules, deterministic).
//! The parser only depends on the `TitleClassifier` trait, so a smarter
//! matcher can replace it without touching CSV handling.

use crate::models::profile::ProfileCategory;

/// Checked first. A hit here wins even if a product keyword also matches.
pub const FOUNDER_KEYWORDS: &[&str] = &[
    "founder",
    "co-founder",
    "cofounder",
    "ceo",
    "cto",
    "coo",
    "cfo",
    "chief of staff",
    "cos",
    "managing director",
    "general partner",
    "partner",
    "owner",
    "president",
];

pub const PRODUCT_KEYWORDS: &[&str] = &[
    "product",
    "pm",
    "product manager",
    "product lead",
    "product director",
    "vp product",
    "vp of product",
    "head of product",
    "group product manager",
    "senior product manager",
    "principal product manager",
    "product owner",
    "product strategy",
];

pub trait TitleClassifier: Send + Sync {
    /// Returns `None` when the title belongs to no category.
    fn classify(&self, title: &str) -> Option<ProfileCategory>;
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordClassifier
// ────────────────────────────────────────────────────────────────────────────

/// Case-insensitive substring match over two ordered keyword lists.
///
/// Ambiguous titles ("Head of Product and Co-Founder") resolve by list
/// priority, not by specificity.
pub struct KeywordClassifier;

impl TitleClassifier for KeywordClassifier {
    fn classify(&self, title: &str) -> Option<ProfileCategory> {
        let lower = title.to_lowercase();

        if FOUNDER_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
            return Some(ProfileCategory::Founders);
        }

        if PRODUCT_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
            return Some(ProfileCategory::Product);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(title: &str) -> Option<ProfileCategory> {
        KeywordClassifier.classify(title)
    }

    #[test]
    fn test_founder_titles() {
        assert_eq!(classify("Co-Founder and CEO"), Some(ProfileCategory::Founders));
        assert_eq!(classify("Chief of Staff"), Some(ProfileCategory::Founders));
        assert_eq!(classify("Managing Director"), Some(ProfileCategory::Founders));
    }

    #[test]
    fn test_product_titles() {
        assert_eq!(
            classify("Senior Product Manager"),
            Some(ProfileCategory::Product)
        );
        assert_eq!(classify("Group PM, Payments"), Some(ProfileCategory::Product));
    }

    #[test]
    fn test_founder_list_wins_on_ambiguous_title() {
        assert_eq!(
            classify("Head of Product and Co-Founder"),
            Some(ProfileCategory::Founders)
        );
    }

    #[test]
    fn test_unrelated_title_has_no_category() {
        assert_eq!(classify("Software Engineer"), None);
        assert_eq!(classify(""), None);
    }

    #[test]
    fn test_match_is_case_insensitive() {
        assert_eq!(classify("FOUNDER"), Some(ProfileCategory::Founders));
        assert_eq!(classify("vp OF product"), Some(ProfileCategory::Product));
    }

    /// Substring rules are deliberately loose: "cos" hits inside other words.
    #[test]
    fn test_substring_match_inside_words() {
        assert_eq!(classify("Costing Analyst"), Some(ProfileCategory::Founders));
    }
}
