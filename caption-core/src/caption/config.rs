use serde::{Deserialize, Serialize};

use crate::caption::decoder::normalized_temperature;
use crate::error::CaptionError;

/// Per-request decoding knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptionConfig {
    /// Minimum calibrated top probability required to commit a word.
    pub confidence_threshold: f32,
    /// Values above 1.0 flatten the decoder distribution, below 1.0 sharpen it.
    pub temperature: f32,
    pub top_k: usize,
    pub max_steps: usize,
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.05,
            temperature: 1.2,
            top_k: 5,
            max_steps: 10,
        }
    }
}

impl CaptionConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides("CAPTION_");
        config
    }

    pub fn from_json(json: &str) -> Result<Self, CaptionError> {
        Ok(serde_json::from_str(json)?)
    }

    fn apply_env_overrides(&mut self, prefix: &str) {
        let parse_env = |suffix: &str| std::env::var(format!("{prefix}{suffix}")).ok();
        let apply = |suffix: &str, target: &mut f32| {
            if let Some(v) = parse_env(suffix).and_then(|s| s.trim().parse().ok()) {
                *target = v;
            }
        };

        apply("CONFIDENCE_THRESHOLD", &mut self.confidence_threshold);
        apply("TEMPERATURE", &mut self.temperature);

        if let Some(v) = parse_env("TOP_K").and_then(|s| s.trim().parse().ok()) {
            self.top_k = v;
        }
        if let Some(v) = parse_env("MAX_STEPS").and_then(|s| s.trim().parse().ok()) {
            self.max_steps = v;
        }
    }

    /// Temperature actually applied; non-positive or non-finite values mean no scaling.
    pub fn effective_temperature(&self) -> f32 {
        normalized_temperature(self.temperature)
    }
}
