//! Labels that mean "unclassified" and never take part in a ranking.

/// Sentinel labels, already trimmed and lowercased
pub const SENTINEL_CATEGORIES: [&str; 6] = [
    "other",
    "other/unknown",
    "other / unknown",
    "unknown",
    "misc",
    "other, misc",
];

/// Whether a category label is a sentinel.
///
/// Comparison is case-insensitive after trimming. A missing label counts as
/// a sentinel: it cannot be ranked or aligned.
pub fn is_sentinel(label: Option<&str>) -> bool {
    match label {
        None => true,
        Some(label) => {
            let normalized = label.trim().to_lowercase();
            normalized.is_empty() || SENTINEL_CATEGORIES.contains(&normalized.as_str())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels_any_casing() {
        for label in ["Other", "  UNKNOWN ", "Misc", "Other / Unknown", "other/unknown", "OTHER, MISC"] {
            assert!(is_sentinel(Some(label)), "{label:?} should be a sentinel");
        }
    }

    #[test]
    fn test_regular_labels() {
        for label in ["Software", "Other Services", "Miscellaneous", "Unknown Soldier Tours"] {
            assert!(!is_sentinel(Some(label)), "{label:?} should not be a sentinel");
        }
    }

    #[test]
    fn test_missing_label() {
        assert!(is_sentinel(None));
        assert!(is_sentinel(Some("   ")));
    }
}
