use std::sync::LazyLock;

use regex::Regex;

use super::boundary;

/// Anything outside Telugu, ASCII alphanumerics, whitespace and the allowed
/// punctuation: . , ! ? ; : ( ) " ' - / – — … ₹
static DISALLOWED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[^\x{0C00}-\x{0C7F}0-9A-Za-z\s.,!?;:()"'\-/\x{2013}\x{2014}\x{2026}\x{20B9}]+"#)
        .unwrap()
});
static MULTISPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static UI_WORDS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(click|download|pdf|live\s*updates?)\b").unwrap());

/// Replace every disallowed run with a space, then collapse whitespace.
pub fn normalize(raw: &str) -> String {
    let replaced = DISALLOWED_RE.replace_all(raw, " ");
    collapse_whitespace(&replaced)
}

/// Drop interface chrome ("click", "download", "pdf", "live updates").
/// May leave an empty string behind.
pub fn strip_ui_junk(line: &str) -> String {
    let stripped = boundary::replace_all(&UI_WORDS_RE, line, |_| String::new());
    collapse_whitespace(&stripped)
}

fn collapse_whitespace(s: &str) -> String {
    MULTISPACE_RE.replace_all(s, " ").trim().to_string()
}
