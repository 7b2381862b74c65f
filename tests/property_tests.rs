//! Property-based tests for escaping and symbol naming.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated inputs.

use proptest::prelude::*;

use buildstamp::core::escape::escape;
use buildstamp::core::render::env_name;
use buildstamp::core::types::{Field, SymbolPrefix};

/// Reverse the escaping: `\'` becomes `'` and `\-` becomes `-`.
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next) = chars.peek() {
                if next == '\'' || next == '-' {
                    out.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }

    out
}

/// Strategy for text with no quote or hyphen characters.
fn safe_text() -> impl Strategy<Value = String> {
    "[^'-]*"
}

/// Strategy for text biased towards the escaped characters.
fn risky_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just('\''),
            Just('-'),
            Just('\\'),
            Just(' '),
            Just('\n'),
            prop::char::range('a', 'z'),
            any::<char>(),
        ],
        0..64,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

/// Strategy for well-formed prefixes.
fn valid_prefix() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-zA-Z0-9_/:]{1,12}", 1..4).prop_map(|parts| parts.join("."))
}

proptest! {
    #[test]
    fn escape_leaves_safe_text_unchanged(text in safe_text()) {
        prop_assert_eq!(escape(&text), text);
    }

    #[test]
    fn unescape_recovers_original(text in risky_text()) {
        prop_assert_eq!(unescape(&escape(&text)), text);
    }

    #[test]
    fn every_special_char_has_one_marker(text in risky_text()) {
        let escaped = escape(&text);
        let quotes = text.matches('\'').count();
        let hyphens = text.matches('-').count();

        prop_assert_eq!(escaped.matches("\\'").count(), quotes);
        prop_assert_eq!(escaped.matches("\\-").count(), hyphens);
        prop_assert_eq!(escaped.len(), text.len() + quotes + hyphens);
    }

    #[test]
    fn escape_is_deterministic(text in risky_text()) {
        prop_assert_eq!(escape(&text), escape(&text));
    }

    #[test]
    fn valid_prefixes_build_dotted_keys(prefix in valid_prefix()) {
        let symbol = SymbolPrefix::new(prefix.clone()).unwrap();
        for field in Field::ALL {
            let key = symbol.key(field);
            let expected_prefix = format!("{prefix}.");
            prop_assert!(key.starts_with(&expected_prefix));
            prop_assert!(key.ends_with(field.name()));
        }
    }

    #[test]
    fn prefixes_with_whitespace_rejected(
        left in "[a-z]{1,8}",
        right in "[a-z]{1,8}",
        ws in prop_oneof![Just(' '), Just('\t'), Just('\n')],
    ) {
        let prefix = format!("{left}{ws}{right}");
        prop_assert!(SymbolPrefix::new(prefix).is_err());
    }

    #[test]
    fn env_names_are_shell_safe(prefix in valid_prefix()) {
        let symbol = SymbolPrefix::new(prefix).unwrap();
        for field in Field::ALL {
            let name = env_name(&symbol.key(field));
            prop_assert!(name
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_'));
        }
    }
}
