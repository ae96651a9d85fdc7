//! Connection-free SQL text helpers.
//!
//! Everything here is a pure string transform so statements can be built and
//! cached before any session exists.

use crate::error::{PgDriverError, Result};

/// Characters rewritten by [`escape`], paired with their replacements.
///
/// NUL and ASCII-26 use fixed-width octal/hex forms: the server reads up to
/// three octal or two hex digits, so a shorter form would absorb digits that
/// follow it.
pub const ESCAPE_TABLE: [(char, &str); 7] = [
    ('\\', "\\\\"),
    ('\0', "\\000"),
    ('\n', "\\n"),
    ('\r', "\\r"),
    ('\x1a', "\\x1a"),
    ('\'', "\\'"),
    ('"', "\\\""),
];

fn replacement(c: char) -> Option<&'static str> {
    ESCAPE_TABLE
        .iter()
        .find(|(bad, _)| *bad == c)
        .map(|(_, good)| *good)
}

/// Replaces every reserved character with its backslash sequence.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match replacement(c) {
            Some(good) => out.push_str(good),
            None => out.push(c),
        }
    }
    out
}

/// Removes MySQL-style backtick identifier quoting.
pub fn strip_backticks(sql: &str) -> String {
    sql.replace('`', "")
}

/// Splits a `;`-separated script into its non-blank statements.
///
/// The split is textual: a `;` inside a string literal also ends a statement.
pub fn split_statements(script: &str) -> Vec<&str> {
    script
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Quotes an identifier with double quotes, doubling any embedded ones.
pub fn quote_identifier(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Splits `host`, `host:port`, `[v6]` or `[v6]:port` into its parts.
/// A bare IPv6 address (more than one `:`) is taken as a host without port.
pub fn split_host(connection_string: &str) -> Result<(&str, Option<u16>)> {
    let invalid = || {
        PgDriverError::connection(format!(
            "invalid host `{}`: expected host, host:port or [ipv6]:port",
            connection_string
        ))
    };

    let (host, port) = if let Some(bracketed) = connection_string.strip_prefix('[') {
        let (host, rest) = bracketed.split_once(']').ok_or_else(invalid)?;
        match rest {
            "" | ":" => (host, None),
            _ => (host, Some(rest.strip_prefix(':').ok_or_else(invalid)?)),
        }
    } else if connection_string.matches(':').count() > 1 {
        (connection_string, None)
    } else {
        match connection_string.rsplit_once(':') {
            None => (connection_string, None),
            Some((host, "")) => (host, None),
            Some((host, port)) => (host, Some(port)),
        }
    };

    match port {
        None => Ok((host, None)),
        Some(port) => port.parse::<u16>().map(|p| (host, Some(p))).map_err(|_| {
            PgDriverError::connection(format!(
                "invalid port `{}` in connection string `{}`",
                port, connection_string
            ))
        }),
    }
}
