use serde::{Deserialize, Serialize};

use super::error::ComparatorError;
use crate::processing::timing::ms_to_samples;

/// Extra history, in samples, kept beyond `window + range` so the
/// inter-stream offset can be applied without running out of samples.
pub const MAX_DIFF_SAMPLES: usize = 24000;

/// Sample-count bounds for window and range after ms conversion.
pub const MIN_WINDOW_SAMPLES: usize = 1;
pub const MAX_WINDOW_SAMPLES: usize = 48000;

/// Accepted bounds for `decay_s`.
pub const MIN_DECAY_S: f64 = 0.1;
pub const MAX_DECAY_S: f64 = 100.0;

/// Accepted millisecond range for `window_ms` and `range_ms`.
pub const MIN_WINDOW_MS: i64 = 1;
pub const MAX_WINDOW_MS: i64 = 1000;

/// User-facing comparator settings.
///
/// Stored as JSON by [`crate::storage::settings`]; missing fields take their
/// defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparatorSettings {
    /// Source feeding the left hook.
    pub source1_name: Option<String>,

    /// Source feeding the right hook.
    pub source2_name: Option<String>,

    /// Add each source's own sync offset before comparing timestamps (default: true).
    pub add_sync_offset: bool,

    /// Short-term analysis window (default: 33 ms).
    pub window_ms: i64,

    /// Maximum lag searched in either direction (default: 200 ms).
    pub range_ms: i64,

    /// Time constant of the correlogram's temporal smoothing (default: 1.0 s).
    /// Only forwarded to the correlation sink.
    pub decay_s: f64,
}

impl ComparatorSettings {
    pub fn validate(&self) -> Result<(), ComparatorError> {
        if !(MIN_WINDOW_MS..=MAX_WINDOW_MS).contains(&self.window_ms) {
            return Err(ComparatorError::ConfigurationFailed(format!(
                "window must be {}..={} ms, got {}",
                MIN_WINDOW_MS, MAX_WINDOW_MS, self.window_ms
            )));
        }
        if !(MIN_WINDOW_MS..=MAX_WINDOW_MS).contains(&self.range_ms) {
            return Err(ComparatorError::ConfigurationFailed(format!(
                "range must be {}..={} ms, got {}",
                MIN_WINDOW_MS, MAX_WINDOW_MS, self.range_ms
            )));
        }
        if !(MIN_DECAY_S..=MAX_DECAY_S).contains(&self.decay_s) {
            return Err(ComparatorError::ConfigurationFailed(format!(
                "decay must be {}..={} s, got {}",
                MIN_DECAY_S, MAX_DECAY_S, self.decay_s
            )));
        }
        Ok(())
    }

    /// Analysis window length in samples at `sample_rate`.
    pub fn window_samples(&self, sample_rate: u32) -> usize {
        ms_to_samples(self.window_ms, sample_rate, MIN_WINDOW_SAMPLES, MAX_WINDOW_SAMPLES)
    }

    /// Lag search radius in samples at `sample_rate`.
    pub fn range_samples(&self, sample_rate: u32) -> usize {
        ms_to_samples(self.range_ms, sample_rate, MIN_WINDOW_SAMPLES, MAX_WINDOW_SAMPLES)
    }

    /// Decay time clamped to the accepted range; NaN falls back to 1 s.
    pub fn decay_seconds(&self) -> f32 {
        if self.decay_s.is_nan() {
            return 1.0;
        }
        self.decay_s.clamp(MIN_DECAY_S, MAX_DECAY_S) as f32
    }
}

impl Default for ComparatorSettings {
    fn default() -> Self {
        Self {
            source1_name: None,
            source2_name: None,
            add_sync_offset: true,
            window_ms: 33,
            range_ms: 200,
            decay_s: 1.0,
        }
    }
}
