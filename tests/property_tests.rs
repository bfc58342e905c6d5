//! Property-based tests for escaping and encoding
//! Uses proptest to generate random inputs and verify properties

use cefevent::escape::{escape_extension_field, escape_header_field};
use cefevent::Extensions;
use proptest::prelude::*;

/// Reverse header escaping, for checking that nothing is lost
fn unescape_header(s: &str) -> String {
    let mut out = String::new();
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn unescape_extension(s: &str) -> String {
    let mut out = String::new();
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('r') => out.push('\r'),
                Some(other) => out.push(other),
                None => {}
            }
        } else {
            out.push(c);
        }
    }
    out
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn test_header_escape_identity_on_clean_input(s in "[^|\\\\]*") {
        prop_assert_eq!(escape_header_field(&s), s);
    }

    #[test]
    fn test_extension_escape_identity_on_clean_input(s in "[^=\\\\\r\n]*") {
        prop_assert_eq!(escape_extension_field(&s), s);
    }

    #[test]
    fn test_header_escape_is_reversible(s in any::<String>()) {
        let escaped = escape_header_field(&s);
        prop_assert_eq!(unescape_header(&escaped), s.clone());
        let specials = s.chars().filter(|c| matches!(c, '|' | '\\')).count();
        prop_assert_eq!(escaped.chars().count(), s.chars().count() + specials);
    }

    #[test]
    fn test_extension_escape_is_reversible(s in any::<String>()) {
        let escaped = escape_extension_field(&s);
        prop_assert!(!escaped.contains('\n'));
        prop_assert!(!escaped.contains('\r'));
        prop_assert_eq!(unescape_extension(&escaped), s);
    }

    #[test]
    fn test_custom_tokens_never_padded(
        extras in prop::collection::hash_map("[a-zA-Z][a-zA-Z0-9]{0,10}", "[a-z0-9=\n]{0,10}", 0..8)
    ) {
        let mut ext = Extensions::default();
        ext.custom_extensions = extras.clone();
        let encoded = ext.encode();
        prop_assert!(!encoded.starts_with(' '));
        prop_assert!(!encoded.ends_with(' '));
        prop_assert!(!encoded.contains("  "));
        prop_assert!(!encoded.contains('\n'));
        let token_count = if encoded.is_empty() { 0 } else { encoded.split(' ').count() };
        prop_assert_eq!(token_count, extras.len());
    }
}
