use std::sync::LazyLock;

use regex::Regex;

use super::boundary;

pub const ADDRESS_OPEN: &str = "[ADDRESS]";
pub const ADDRESS_CLOSE: &str = "[/ADDRESS]";

/// Door-number style digit groups (`50-17-64`, `12/3`), optionally running on to
/// a later 3+3 digit group such as a PIN code (`500 016`) on the same line.
static ADDRESS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\d{1,4}(?:[-/]\d{1,4}){1,4}\b(?:[^\n]*?\b\d{3}\s?-?\s?\d{3}\b)?").unwrap()
});

/// Wrap every address-like span as `[ADDRESS] <span> [/ADDRESS]`.
/// Text outside the spans is left untouched.
pub fn tag_addresses(line: &str) -> String {
    boundary::replace_all(&ADDRESS_RE, line, |span| {
        format!("{} {} {}", ADDRESS_OPEN, span, ADDRESS_CLOSE)
    })
}

pub fn has_address(line: &str) -> bool {
    line.contains(ADDRESS_OPEN)
}
