//! Property-based tests for escaping and literal quoting
//!
//! These tests verify that:
//! - Every reserved character is rewritten and nothing else is touched
//! - Escaped text decodes back to the original
//! - Quoting a scalar is exactly the escaped text between single quotes

use proptest::prelude::*;

use pgdriver::drivers::PostgresDataDriver;
use pgdriver::sql::{escape, ESCAPE_TABLE};
use pgdriver::{DataDriver, Dialect, DriverConfig};

/// The escape sequence at the start of `rest`: the character it stands for
/// and its length in bytes.
fn leading_escape(rest: &str) -> (char, usize) {
    ESCAPE_TABLE
        .iter()
        .find(|(_, good)| rest.starts_with(good))
        .map(|(bad, good)| (*bad, good.len()))
        .expect("unknown escape sequence")
}

/// Reverses the escape table.
fn unescape(escaped: &str) -> String {
    let mut out = String::new();
    let mut rest = escaped;
    while let Some(c) = rest.chars().next() {
        if c == '\\' {
            let (original, len) = leading_escape(rest);
            out.push(original);
            rest = &rest[len..];
        } else {
            out.push(c);
            rest = &rest[c.len_utf8()..];
        }
    }
    out
}

fn is_reserved(c: char) -> bool {
    ESCAPE_TABLE.iter().any(|(bad, _)| *bad == c)
}

fn arb_text_with_reserved() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            3 => any::<char>(),
            1 => prop::sample::select(vec!['\\', '\0', '\n', '\r', '\x1a', '\'', '"']),
        ],
        0..64,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #[test]
    fn escape_round_trips(s in arb_text_with_reserved()) {
        prop_assert_eq!(unescape(&escape(&s)), s);
    }

    #[test]
    fn escaped_text_has_no_bare_reserved_chars(s in arb_text_with_reserved()) {
        let escaped = escape(&s);
        let mut rest = escaped.as_str();
        while let Some(c) = rest.chars().next() {
            if c == '\\' {
                // skip the whole sequence, `\000` and `\x1a` included
                rest = &rest[leading_escape(rest).1..];
                continue;
            }
            prop_assert!(!is_reserved(c));
            rest = &rest[c.len_utf8()..];
        }
    }

    #[test]
    fn unreserved_text_is_unchanged(s in "[^\\\\\\x00\\n\\r\\x1a'\"]*") {
        prop_assert_eq!(escape(&s), s);
    }

    #[test]
    fn quoted_scalar_is_escaped_between_quotes(s in arb_text_with_reserved()) {
        let driver = PostgresDataDriver::default();
        prop_assert_eq!(driver.get_quoted_sql(&s), format!("'{}'", driver.escape(&s)));
    }

    #[test]
    fn escape_ignores_driver_config(s in arb_text_with_reserved(), null_as_empty in any::<bool>()) {
        let config = DriverConfig::default().with_null_as_empty_string(null_as_empty);
        prop_assert_eq!(Dialect::new(config).escape(&s), escape(&s));
    }
}
