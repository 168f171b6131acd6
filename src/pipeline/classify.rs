use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::address;
use crate::settings::Thresholds;

static JUNK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)డౌన్[\s\x{200C}\x{200D}]*లోడ్|ఇక్కడ\s*చూడండి|క్లిక్|click|pdf").unwrap()
});
static DISCLAIMER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^గమనిక[\s:,\-]").unwrap());
static IMPORTANT_NOTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)పరీక్ష|సూచనలు|ప్రకటన|అధికారిక|హెచ్చరిక|జాగ్రత్త|notice|guidelines").unwrap()
});
static DATE_OR_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d{1,4}|\d{1,2}[/-]\d{1,2}[/-]\d{2,4}|\d{4}[/-]\d{1,2}[/-]\d{1,2})$").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    Empty,
    JunkPhrase,
    Disclaimer,
    MostlyEnglish,
    NotRetained,
}

impl DropReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DropReason::Empty => "empty",
            DropReason::JunkPhrase => "junk_phrase",
            DropReason::Disclaimer => "disclaimer",
            DropReason::MostlyEnglish => "mostly_english",
            DropReason::NotRetained => "not_retained",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Candidate line, possibly with `[ADDRESS]` spans inserted.
    Keep(String),
    Drop(DropReason),
}

/// Outcome of a single gate: the line carries on (maybe rewritten) or stops.
enum Step {
    Next(String),
    Drop(DropReason),
}

type Gate = fn(String, &Thresholds) -> Step;

/// Evaluated in order; the first drop wins.
const GATES: &[Gate] = &[
    reject_empty,
    reject_junk_phrases,
    gate_disclaimer,
    wrap_addresses,
    reject_mostly_english,
    retain,
];

/// Run a normalized, UI-stripped line through the retention chain.
pub fn classify(line: String, thresholds: &Thresholds) -> Verdict {
    let mut current = line;
    for gate in GATES {
        match gate(current, thresholds) {
            Step::Next(next) => current = next,
            Step::Drop(reason) => return Verdict::Drop(reason),
        }
    }
    Verdict::Keep(current)
}

fn reject_empty(line: String, _: &Thresholds) -> Step {
    if line.is_empty() {
        Step::Drop(DropReason::Empty)
    } else {
        Step::Next(line)
    }
}

fn reject_junk_phrases(line: String, _: &Thresholds) -> Step {
    if JUNK_RE.is_match(&line) {
        Step::Drop(DropReason::JunkPhrase)
    } else {
        Step::Next(line)
    }
}

/// "గమనిక:" notes are boilerplate unless they carry an official keyword.
fn gate_disclaimer(line: String, _: &Thresholds) -> Step {
    if DISCLAIMER_RE.is_match(&line) && !IMPORTANT_NOTE_RE.is_match(&line) {
        Step::Drop(DropReason::Disclaimer)
    } else {
        Step::Next(line)
    }
}

fn wrap_addresses(line: String, _: &Thresholds) -> Step {
    Step::Next(address::tag_addresses(&line))
}

fn reject_mostly_english(line: String, thresholds: &Thresholds) -> Step {
    if latin_ratio(&line) > thresholds.english_ratio && !address::has_address(&line) {
        Step::Drop(DropReason::MostlyEnglish)
    } else {
        Step::Next(line)
    }
}

fn retain(line: String, thresholds: &Thresholds) -> Step {
    let len = line.chars().count();
    let keep = if len >= thresholds.short_line_len {
        has_telugu(&line)
    } else {
        DATE_OR_NUMBER_RE.is_match(&line)
    };
    if keep {
        Step::Next(line)
    } else {
        Step::Drop(DropReason::NotRetained)
    }
}

pub fn latin_ratio(line: &str) -> f64 {
    let letters = line.chars().filter(|c| c.is_ascii_alphabetic()).count();
    let total = line.chars().count().max(1);
    letters as f64 / total as f64
}

pub fn has_telugu(line: &str) -> bool {
    line.chars().any(|c| ('\u{0C00}'..='\u{0C7F}').contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(line: &str) -> Verdict {
        classify(line.to_string(), &Thresholds::default())
    }

    #[test]
    fn empty_is_dropped() {
        assert_eq!(run(""), Verdict::Drop(DropReason::Empty));
    }

    #[test]
    fn junk_phrases() {
        for line in [
            "ఈ యాప్ డౌన్ లోడ్ చేసుకోండి",
            "ఈ యాప్ డౌన్లోడ్ చేసుకోండి",
            "ఈ యాప్ డౌన్\u{200C}లోడ్ చేసుకోండి",
            "పూర్తి వివరాలకు ఇక్కడ చూడండి",
            "వివరాల కోసం క్లిక్ చేయండి",
            "వివరాల కోసం clicking చేయండి",
            "వివరాలు PDFs లో ఉన్నాయి",
        ] {
            assert_eq!(run(line), Verdict::Drop(DropReason::JunkPhrase), "{}", line);
        }
    }

    #[test]
    fn disclaimer_without_keyword_dropped() {
        assert_eq!(
            run("గమనిక: ఇది ఒక సాధారణ సమాచారం"),
            Verdict::Drop(DropReason::Disclaimer)
        );
        assert_eq!(
            run("గమనిక - ఇది ఒక సాధారణ సమాచారం"),
            Verdict::Drop(DropReason::Disclaimer)
        );
    }

    #[test]
    fn disclaimer_with_keyword_kept() {
        assert_eq!(
            run("గమనిక: ఇది అధికారిక ప్రకటన"),
            Verdict::Keep("గమనిక: ఇది అధికారిక ప్రకటన".into())
        );
        assert!(matches!(run("గమనిక, ఈ NOTICE చదవండి"), Verdict::Keep(_)));
    }

    #[test]
    fn disclaimer_word_mid_line_is_not_gated() {
        assert!(matches!(run("ఈ వార్తకు గమనిక అవసరం లేదు"), Verdict::Keep(_)));
    }

    #[test]
    fn mostly_english_dropped() {
        assert_eq!(run("here to now!!"), Verdict::Drop(DropReason::MostlyEnglish));
        assert_eq!(
            run("Breaking news from Hyderabad today"),
            Verdict::Drop(DropReason::MostlyEnglish)
        );
    }

    #[test]
    fn address_survives_english_gate() {
        let v = run("Road No 12-2-831 Banjara Hills ఆఫీసు");
        assert_eq!(
            v,
            Verdict::Keep("Road No [ADDRESS] 12-2-831 [/ADDRESS] Banjara Hills ఆఫీసు".into())
        );
    }

    #[test]
    fn address_line_kept_with_tag() {
        let v = run("నా చిరునామా 12-34-567 దగ్గర ఉంది 040-123456");
        assert_eq!(
            v,
            Verdict::Keep("నా చిరునామా [ADDRESS] 12-34-567 దగ్గర ఉంది 040-123456 [/ADDRESS]".into())
        );
    }

    #[test]
    fn mixed_line_kept() {
        assert_eq!(
            run("నేను ఇంటికి వెళ్తున్నాను. here"),
            Verdict::Keep("నేను ఇంటికి వెళ్తున్నాను. here".into())
        );
    }

    #[test]
    fn short_number_kept() {
        assert_eq!(run("2024"), Verdict::Keep("2024".into()));
        assert_eq!(run("7"), Verdict::Keep("7".into()));
    }

    #[test]
    fn short_non_numeric_dropped() {
        assert_eq!(run("వార్త"), Verdict::Drop(DropReason::NotRetained));
        assert_eq!(run("12345"), Verdict::Drop(DropReason::NotRetained));
    }

    #[test]
    fn long_line_without_telugu_dropped() {
        assert_eq!(run("1234 5678 9012"), Verdict::Drop(DropReason::NotRetained));
    }

    #[test]
    fn short_date_is_claimed_by_address_tagger() {
        // the tag pushes it past the short-line threshold and it has no Telugu
        assert_eq!(run("26/08/2025"), Verdict::Drop(DropReason::NotRetained));
    }

    #[test]
    fn thresholds_are_overridable() {
        let loose = Thresholds {
            english_ratio: 0.95,
            ..Thresholds::default()
        };
        assert_eq!(
            run("Hyderabad city ఈరోజు"),
            Verdict::Drop(DropReason::MostlyEnglish)
        );
        assert_eq!(
            classify("Hyderabad city ఈరోజు".into(), &loose),
            Verdict::Keep("Hyderabad city ఈరోజు".into())
        );

        let strict = Thresholds {
            short_line_len: 40,
            ..Thresholds::default()
        };
        assert_eq!(
            classify("ఇది ఒక చిన్న వాక్యం".into(), &strict),
            Verdict::Drop(DropReason::NotRetained)
        );
    }

    #[test]
    fn ratio_counts_chars_not_bytes() {
        assert_eq!(latin_ratio("ab"), 1.0);
        assert_eq!(latin_ratio("abతె"), 0.5);
        assert_eq!(latin_ratio(""), 0.0);
    }
}
