/// Maximum number of channel planes in one audio packet.
pub const MAX_AUDIO_PLANES: usize = 8;

/// Which side of the comparison a hook feeds.
///
/// Left is always locked before right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookSide {
    Left,
    Right,
}

impl HookSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl std::fmt::Display for HookSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One planar audio packet delivered by a source.
///
/// Plane slots after the first `None` are treated as inactive. `timestamp` is
/// the host clock time of the first frame, in nanoseconds.
#[derive(Debug, Clone, Copy)]
pub struct AudioFrame<'a> {
    planes: [Option<&'a [f32]>; MAX_AUDIO_PLANES],
    frames: usize,
    timestamp: u64,
}

impl<'a> AudioFrame<'a> {
    /// Build a frame from the active planes. Extra planes beyond
    /// `MAX_AUDIO_PLANES` are ignored; the frame count is the shortest plane.
    pub fn new(planes: &[&'a [f32]], timestamp: u64) -> Self {
        let mut slots = [None; MAX_AUDIO_PLANES];
        for (slot, plane) in slots.iter_mut().zip(planes) {
            *slot = Some(*plane);
        }
        let frames = planes
            .iter()
            .take(MAX_AUDIO_PLANES)
            .map(|p| p.len())
            .min()
            .unwrap_or(0);
        Self {
            planes: slots,
            frames,
            timestamp,
        }
    }

    pub fn planes(&self) -> &[Option<&'a [f32]>] {
        &self.planes
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }
}

/// Per-hook callback counters, for debugging capture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HookDiagnostics {
    pub callback_count: u64,
    pub frames_total: u64,
    /// Packets that arrived with no active channel plane.
    pub empty_packets: u64,
}

/// Two equal-length, chronologically ordered windows whose last samples
/// correspond to the same instant, up to one sample.
#[derive(Debug, Clone, Copy)]
pub struct AlignedWindows<'a> {
    pub left: &'a [f32],
    pub right: &'a [f32],
    /// Maximum lag, in samples, the correlation stage searches either way.
    pub range: usize,
    /// Offset between the streams after sync correction. Positive when the
    /// left stream's newest sample is later than the right's.
    pub diff_samples: i64,
}

/// What a correlation sink receives once per render tick.
#[derive(Debug, Clone, Copy)]
pub struct CorrelationFrame<'a> {
    pub windows: AlignedWindows<'a>,
    /// Blend weight of this frame against the previous correlogram. `2.0`
    /// asks the sink to discard history (first frame or width change).
    pub decay: f32,
}
