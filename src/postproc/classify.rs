//! Node classification
//!
//! Pure predicates over node names, plus the fixed vocabulary tables the
//! action resolver and the substitution maps are built from.

use once_cell::sync::Lazy;
use regex::Regex;

/// Word class tags: an optional initial letter, then one or more vowel
/// nuclei joined by `h` (`UI`, `KOhA`, `BAhE`, `NAhE`...).
static SELMAHO_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[IUBCDFGJKLMNPRSTVXZ]?(?:[AEIOUY]|AI|EI|OI|AU)(?:h(?:[AEIOUY]|AI|EI|OI|AU))*$",
    )
    .expect("selmaho pattern is a valid regex")
});

/// Morphology categories whose letter-level structure is collapsed to surface text
pub const MORPHOLOGY_CATEGORIES: &[&str] = &[
    "cmevla",
    "gismu",
    "lujvo",
    "fuhivla",
    "ga_clause",
    "gu_clause",
];

/// Whitespace nodes
pub const SPACE_NODES: &[&str] = &["spaces", "initial_spaces"];

/// Main structural labels kept by the `N` option
pub const MAIN_NODE_LABELS: &[&str] = &["prenex", "sentence", "selbri", "sumti"];

/// Display names used when trimming is on
pub const NODE_DISPLAY_NAMES: &[(&str, &str)] = &[
    ("cmene", "C"),
    ("cmevla", "C"),
    ("gismu", "G"),
    ("lujvo", "L"),
    ("fuhivla", "Z"),
    ("prenex", "PRENEX"),
    ("sentence", "BRIDI"),
    ("selbri", "SELBRI"),
    ("sumti", "SUMTI"),
];

/// Replacement text for shown whitespace
pub const SPACE_PLACEHOLDER: &str = "_";

/// Whether `name` is a word class tag. The whole name must match.
pub fn is_selmaho_name(name: &str) -> bool {
    SELMAHO_PATTERN.is_match(name)
}

pub fn among_names(name: &str, names: &[&str]) -> bool {
    names.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selmaho_names() {
        for name in ["A", "UI", "KOhA", "BAhE", "NAhE", "GOhOI", "IhAU", "Y", "CAI", "ZOI"] {
            assert!(is_selmaho_name(name), "{name} should be a selmaho");
        }
    }

    #[test]
    fn test_non_selmaho_names() {
        for name in [
            "", "gismu", "ui", "KOHA", "KOhAh", "hA", "BB", "BAIh", "QA", "UIx", "sentence",
            "BRIDI", "KOhA ",
        ] {
            assert!(!is_selmaho_name(name), "{name:?} should not be a selmaho");
        }
    }

    #[test]
    fn test_among_names() {
        assert!(among_names("gismu", MORPHOLOGY_CATEGORIES));
        assert!(among_names("initial_spaces", SPACE_NODES));
        assert!(!among_names("Gismu", MORPHOLOGY_CATEGORIES));
        assert!(!among_names("", MAIN_NODE_LABELS));
    }
}
