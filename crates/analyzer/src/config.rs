use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Analysis thresholds. These tune how findings are labelled, not what the
/// underlying facts are, so all of them are safe to change per input set.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalyzerConfig {
    /// Targets at or above this value count as "high value".
    #[serde(default = "default_high_target")]
    pub high_target: u64,

    /// Counters reachable by at most this many buttons are bottleneck
    /// candidates.
    #[serde(default = "default_bottleneck_tightness")]
    pub bottleneck_tightness: usize,
}

fn default_high_target() -> u64 {
    100
}

fn default_bottleneck_tightness() -> usize {
    2
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            high_target: default_high_target(),
            bottleneck_tightness: default_bottleneck_tightness(),
        }
    }
}

impl AnalyzerConfig {
    /// Loads thresholds from a TOML file, or the defaults when no file is
    /// given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            None => Ok(Self::default()),
            Some(path) => {
                let text = std::fs::read_to_string(path)?;
                Ok(toml::from_str(&text)?)
            }
        }
    }
}
