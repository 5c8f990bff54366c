use std::sync::Arc;

use crate::models::audio_models::{AlignedWindows, CorrelationFrame, HookSide};
use crate::models::config::{ComparatorSettings, MAX_DIFF_SAMPLES};
use crate::models::error::ComparatorError;
use crate::processing::timing::ns_to_samples;
use crate::session::capture_hook::CaptureHook;
use crate::traits::audio_host::AudioHost;
use crate::traits::correlation_sink::CorrelationSink;

/// Decay weight telling the sink to start a fresh correlogram.
const DECAY_RESET: f32 = 2.0;

/// Turns two independently timestamped capture hooks into a pair of windows
/// that end at the same instant, once per render tick.
///
/// ```text
/// [left source]  → [CaptureHook L] ─┐
///                                    ├→ lock L, lock R → offset by timestamp diff → [AlignedWindows] → [CorrelationSink]
/// [right source] → [CaptureHook R] ─┘
/// ```
///
/// Each source's pipeline has its own latency, so raw buffer ends are not
/// comparable. The feed shifts whichever stream is ahead back by the
/// difference of the hooks' trailing timestamps (plus the sources' sync
/// offsets, if enabled), leaving only the true lag for the correlation stage.
pub struct AlignmentFeed {
    host: Arc<dyn AudioHost>,
    left: CaptureHook,
    right: CaptureHook,

    source1_name: Option<String>,
    source2_name: Option<String>,
    add_sync_offset: bool,
    window: usize,
    range: usize,
    decay_s: f32,

    // Scratch windows, reused across ticks
    buf_left: Vec<f32>,
    buf_right: Vec<f32>,

    elapsed_s: f32,
    rendered_width: Option<usize>,
}

impl AlignmentFeed {
    pub fn new(host: Arc<dyn AudioHost>, settings: &ComparatorSettings) -> Result<Self, ComparatorError> {
        let sample_rate = host.sample_rate();
        if sample_rate == 0 {
            return Err(ComparatorError::InvalidSampleRate(sample_rate));
        }

        let mut feed = Self {
            left: CaptureHook::new(HookSide::Left, Arc::clone(&host)),
            right: CaptureHook::new(HookSide::Right, Arc::clone(&host)),
            host,
            source1_name: None,
            source2_name: None,
            add_sync_offset: true,
            window: 0,
            range: 0,
            decay_s: 1.0,
            buf_left: Vec::new(),
            buf_right: Vec::new(),
            elapsed_s: 0.0,
            rendered_width: None,
        };
        feed.update(settings);
        Ok(feed)
    }

    /// Apply new settings. A hook is only rebound when its source name
    /// actually changed; out-of-range sizes are clamped.
    pub fn update(&mut self, settings: &ComparatorSettings) {
        if settings.source1_name != self.source1_name {
            self.source1_name = settings.source1_name.clone();
            self.left.set_source(self.source1_name.as_deref());
        }
        if settings.source2_name != self.source2_name {
            self.source2_name = settings.source2_name.clone();
            self.right.set_source(self.source2_name.as_deref());
        }

        let sample_rate = self.host.sample_rate();
        self.add_sync_offset = settings.add_sync_offset;
        self.window = settings.window_samples(sample_rate);
        self.range = settings.range_samples(sample_rate);
        self.decay_s = settings.decay_seconds();

        log::debug!(
            "alignment feed: window={} range={} samples at {} Hz, sync offset {}",
            self.window,
            self.range,
            sample_rate,
            if self.add_sync_offset { "on" } else { "off" }
        );
    }

    /// Per-frame housekeeping: bound the history, bind late sources, and pick
    /// up the sources' current sync offsets.
    pub fn tick(&mut self, seconds: f32) {
        self.elapsed_s += seconds;

        let keep = self.history_limit();
        self.left.prune(keep);
        self.right.prune(keep);

        // A source may be created after the feed was configured.
        if self.source1_name.is_some() {
            self.left.retry_pending();
        }
        if self.source2_name.is_some() {
            self.right.retry_pending();
        }

        self.left.refresh_sync_offset();
        self.right.refresh_sync_offset();
    }

    /// Extract the aligned window pair, each `window + range` samples long.
    pub fn extract(&mut self) -> AlignedWindows<'_> {
        let width = self.window + self.range;
        self.buf_left.resize(width, 0.0);
        self.buf_right.resize(width, 0.0);

        let sample_rate = self.host.sample_rate();

        // Left before right, always.
        let mut left = self.left.lock();
        let mut right = self.right.lock();

        let mut diff_ts = (left.trailing_timestamp() as i64).saturating_sub(right.trailing_timestamp() as i64);
        if self.add_sync_offset {
            diff_ts = diff_ts
                .saturating_add(self.left.sync_offset())
                .saturating_sub(self.right.sync_offset());
        }
        let diff_samples = ns_to_samples(diff_ts, sample_rate);

        // The stream that is ahead gets shifted back.
        let shift = diff_samples.unsigned_abs() as usize;
        let (left_offset, right_offset) = if diff_samples > 0 { (shift, 0) } else { (0, shift) };

        left.get_window_locked(&mut self.buf_left, left_offset);
        right.get_window_locked(&mut self.buf_right, right_offset);

        drop(right);
        drop(left);

        AlignedWindows {
            left: &self.buf_left,
            right: &self.buf_right,
            range: self.range,
            diff_samples,
        }
    }

    /// Extract the windows and hand them to `sink` with the smoothing weight
    /// for this frame.
    pub fn render<S: CorrelationSink + ?Sized>(&mut self, sink: &mut S) {
        let width = self.output_width();
        let decay = if self.rendered_width != Some(width) {
            DECAY_RESET
        } else {
            self.elapsed_s / (self.decay_s + self.elapsed_s)
        };
        self.rendered_width = Some(width);
        self.elapsed_s = 0.0;

        let windows = self.extract();
        sink.consume(&CorrelationFrame { windows, decay });
    }

    /// Width of the lag axis the correlation stage produces.
    pub fn output_width(&self) -> usize {
        self.range * 2
    }

    /// Most samples either hook keeps between ticks.
    pub fn history_limit(&self) -> usize {
        self.window + self.range + MAX_DIFF_SAMPLES
    }

    pub fn hook(&self, side: HookSide) -> &CaptureHook {
        match side {
            HookSide::Left => &self.left,
            HookSide::Right => &self.right,
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn range(&self) -> usize {
        self.range
    }

    pub fn add_sync_offset(&self) -> bool {
        self.add_sync_offset
    }
}
