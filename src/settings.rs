use config::{Config, Environment};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const ENV_PREFIX: &str = "TELUGU";

/// Tunable cut-offs for the cleaning pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Lines whose share of ASCII letters exceeds this are dropped (unless tagged as an address).
    pub english_ratio: f64,
    /// Lines shorter than this (in chars) only survive as bare numbers or dates.
    pub short_line_len: usize,
    /// Output cap, headline included.
    pub max_lines: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            english_ratio: 0.6,
            short_line_len: 10,
            max_lines: 5000,
        }
    }
}

impl Thresholds {
    /// Defaults overridden by `TELUGU_ENGLISH_RATIO`, `TELUGU_SHORT_LINE_LEN`, `TELUGU_MAX_LINES`.
    pub fn from_env() -> Self {
        Self::load(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
    }

    fn load(source: Environment) -> Self {
        let loaded = Config::builder()
            .add_source(source)
            .build()
            .and_then(|c| c.try_deserialize::<Thresholds>());
        match loaded {
            Ok(t) => t,
            Err(e) => {
                warn!(error = %e, "ignoring invalid threshold overrides");
                Thresholds::default()
            }
        }
    }
}
