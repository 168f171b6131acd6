use std::collections::BTreeMap;

use serde::Serialize;
use tracing::info;

use super::classify::DropReason;

/// Line counts through each stage of one cleaning run.
#[derive(Debug, Default, Serialize)]
pub struct StageTracker {
    stages: Vec<StageMetric>,
    dropped: BTreeMap<DropReason, usize>,
}

#[derive(Debug, Serialize)]
struct StageMetric {
    stage: String,
    before: usize,
    after: usize,
}

impl StageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, stage: &str, before: usize, after: usize) {
        info!(
            stage,
            before,
            after,
            removed = before.saturating_sub(after),
            "pipeline stage"
        );
        self.stages.push(StageMetric {
            stage: stage.to_string(),
            before,
            after,
        });
    }

    pub fn count_drop(&mut self, reason: DropReason) {
        *self.dropped.entry(reason).or_default() += 1;
    }

    #[cfg(test)]
    pub fn dropped(&self, reason: DropReason) -> usize {
        self.dropped.get(&reason).copied().unwrap_or(0)
    }

    #[cfg(test)]
    pub fn after(&self, stage: &str) -> Option<usize> {
        self.stages.iter().find(|m| m.stage == stage).map(|m| m.after)
    }

    pub fn print(&self) {
        for m in &self.stages {
            println!(
                "  lines after {}: {} (removed {})",
                m.stage,
                m.after,
                m.before.saturating_sub(m.after)
            );
        }
        for (reason, n) in &self.dropped {
            println!("    dropped {}: {}", reason.as_str(), n);
        }
    }
}
