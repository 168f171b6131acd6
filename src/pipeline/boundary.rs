//! Word boundaries where only letters, numbers and `_` continue a word.
//!
//! `regex` treats combining marks (Telugu vowel signs, virama, anusvara) as
//! word characters, so `\b` never fires between `నంబర్` and a following digit.
//! Matching runs against a shadow copy of the line in which every character
//! whose word-ness differs is swapped for a filler of the same UTF-8 length.
//! Byte offsets line up, so spans are cut from the original text.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// `\w` in `regex` but not a letter or number: marks, joiners, non-`_` connectors.
static MARK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w&&[^\p{L}\p{N}_]]").unwrap());
/// Numbers outside `\w`, such as vulgar fractions and Telugu fraction digits.
static BARE_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\p{N}&&\W]").unwrap());

// Indexed by UTF-8 length - 1. None of these match `\s`, `\d` or `-`/`/`.
const NON_WORD_FILLER: [&str; 4] = ["#", "\u{00A7}", "\u{2022}", "\u{1D11E}"];
const WORD_FILLER: [&str; 4] = ["x", "\u{00DF}", "\u{0C05}", "\u{1D400}"];

/// Replace every match of `re` in `text`, evaluating `\b` with the boundary
/// described above. `rep` receives the matched slice of the original text.
pub fn replace_all<F>(re: &Regex, text: &str, mut rep: F) -> String
where
    F: FnMut(&str) -> String,
{
    let haystack = shadow(text);
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for m in re.find_iter(&haystack) {
        out.push_str(&text[last..m.start()]);
        out.push_str(&rep(&text[m.range()]));
        last = m.end();
    }
    out.push_str(&text[last..]);
    out
}

fn shadow(text: &str) -> Cow<'_, str> {
    let mut out = MARK_RE.replace_all(text, |caps: &Captures| filler(&caps[0], &NON_WORD_FILLER));
    if BARE_NUMBER_RE.is_match(&out) {
        let renumbered = BARE_NUMBER_RE
            .replace_all(&out, |caps: &Captures| filler(&caps[0], &WORD_FILLER))
            .into_owned();
        out = Cow::Owned(renumbered);
    }
    out
}

fn filler(ch: &str, table: &[&'static str; 4]) -> &'static str {
    table[ch.len() - 1]
}
