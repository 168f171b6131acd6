pub mod address;
mod boundary;
pub mod classify;
pub mod dedup;
pub mod document;
pub mod metrics;
pub mod normalize;
pub mod post_rules;

use rayon::prelude::*;
use tracing::debug;

use crate::settings::Thresholds;
use classify::Verdict;
use dedup::Deduplicator;
use document::Document;
use metrics::StageTracker;

pub struct CleanRun {
    pub document: Document,
    pub tracker: StageTracker,
}

/// Single pass: normalize → strip UI junk → classify → dedup → post rules → cap.
///
/// Per-line work runs on rayon; `collect` keeps input order so deduplication
/// still sees lines in document order.
pub fn clean(paragraphs: &[String], thresholds: &Thresholds) -> CleanRun {
    let mut tracker = StageTracker::new();

    let verdicts: Vec<Verdict> = paragraphs
        .par_iter()
        .map(|raw| classify_raw(raw, thresholds))
        .collect();

    let mut candidates = Vec::with_capacity(verdicts.len());
    for verdict in verdicts {
        match verdict {
            Verdict::Keep(line) => candidates.push(line),
            Verdict::Drop(reason) => {
                debug!(reason = reason.as_str(), "line dropped");
                tracker.count_drop(reason);
            }
        }
    }
    tracker.record("classify", paragraphs.len(), candidates.len());

    let before = candidates.len();
    let mut dedup = Deduplicator::new();
    for line in candidates {
        dedup.push(line);
    }
    tracker.record("dedup", before, dedup.len());

    let unique = dedup.into_lines();
    let before = unique.len();
    let kept = post_rules::apply(unique);
    tracker.record("post_rules", before, kept.len());

    let before = kept.len();
    let document = Document::assemble(kept, thresholds.max_lines);
    tracker.record("cap", before, document.len());

    CleanRun { document, tracker }
}

/// Stages that only look at one line at a time.
pub fn classify_raw(raw: &str, thresholds: &Thresholds) -> Verdict {
    let line = normalize::strip_ui_junk(&normalize::normalize(raw));
    classify::classify(line, thresholds)
}
