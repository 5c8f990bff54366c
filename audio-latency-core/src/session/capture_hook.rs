use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::models::audio_models::{AudioFrame, HookDiagnostics, HookSide};
use crate::models::state::HookState;
use crate::processing::downmix::downmix_planes_into;
use crate::processing::ring_buffer::RingBuffer;
use crate::processing::timing::frames_to_ns;
use crate::session::subscription::Subscription;
use crate::traits::audio_host::{AudioFrameCallback, AudioHost};

/// Mono history of one source plus the host time of its newest sample.
///
/// Both are only reachable through the hook's mutex, so a reader never sees
/// samples without their matching timestamp.
#[derive(Debug, Default)]
pub struct HookBuffer {
    ring: RingBuffer,
    trailing_timestamp: u64,
    diagnostics: HookDiagnostics,
}

impl HookBuffer {
    /// Buffered samples.
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Host time, in ns, just past the newest buffered sample.
    pub fn trailing_timestamp(&self) -> u64 {
        self.trailing_timestamp
    }

    pub fn diagnostics(&self) -> HookDiagnostics {
        self.diagnostics
    }

    /// Append one downmixed packet that started at `timestamp` and lasted
    /// `duration_ns`.
    pub fn push(&mut self, mono: &[f32], timestamp: u64, duration_ns: u64) {
        self.ring.append(mono);
        self.trailing_timestamp = timestamp.saturating_add(duration_ns);
        self.diagnostics.callback_count += 1;
        self.diagnostics.frames_total += mono.len() as u64;
    }

    /// Drop everything but the newest `keep` samples.
    pub fn release_old(&mut self, keep: usize) {
        let len = self.ring.len();
        if len > keep {
            self.ring.drop_front(len - keep);
        }
    }

    /// Fill `dest` with the `dest.len()` samples whose newest one is `offset`
    /// samples before the newest buffered sample, oldest first.
    ///
    /// History older than `dest.len() + offset` is released first. When less
    /// than that is buffered, the missing oldest positions are zero, standing
    /// in for audio from before capture started.
    pub fn get_window_locked(&mut self, dest: &mut [f32], offset: usize) {
        let size = dest.len();
        let needed = size.saturating_add(offset);
        self.release_old(needed);

        let deficit = needed - self.ring.len();
        let zeros = deficit.min(size);
        dest[..zeros].fill(0.0);
        self.ring.peek_front_into(&mut dest[zeros..]);
    }
}

/// State shared with the audio-thread callback.
#[derive(Debug, Default)]
struct HookShared {
    buffer: Mutex<HookBuffer>,
    // Only the callback touches this, and never concurrently with itself.
    scratch: Mutex<Vec<f32>>,
}

impl HookShared {
    fn ingest(&self, frame: &AudioFrame<'_>, sample_rate: u32) {
        if sample_rate == 0 {
            log::trace!("dropping audio packet: host reports a zero sample rate");
            return;
        }

        let mut mono = self.scratch.lock();
        let channels = downmix_planes_into(frame.planes(), frame.frames(), &mut mono);
        if channels == 0 {
            log::trace!("dropping audio packet with no active planes");
            self.buffer.lock().diagnostics.empty_packets += 1;
            return;
        }

        let duration_ns = frames_to_ns(frame.frames(), sample_rate);
        self.buffer.lock().push(&mono, frame.timestamp(), duration_ns);
    }
}

/// Taps one named audio source and keeps its recent mono history.
///
/// ```text
/// [AudioSource] --callback (audio thread)--> downmix --> [HookBuffer] <-- lock() (render thread)
/// ```
///
/// The hook holds the source only weakly through a [`Subscription`].
/// Rebinding or dropping the hook unsubscribes before anything else happens.
pub struct CaptureHook {
    side: HookSide,
    host: Arc<dyn AudioHost>,
    shared: Arc<HookShared>,
    subscription: Option<Subscription>,
    state: HookState,
    sync_offset: AtomicI64,
}

impl CaptureHook {
    pub fn new(side: HookSide, host: Arc<dyn AudioHost>) -> Self {
        Self {
            side,
            host,
            shared: Arc::new(HookShared::default()),
            subscription: None,
            state: HookState::Idle,
            sync_offset: AtomicI64::new(0),
        }
    }

    pub fn side(&self) -> HookSide {
        self.side
    }

    pub fn state(&self) -> &HookState {
        &self.state
    }

    /// Point the hook at a different source, or at none.
    ///
    /// Any existing subscription is removed first. A name that does not
    /// resolve leaves the hook pending; [`retry_pending`](Self::retry_pending)
    /// binds it once the source appears.
    pub fn set_source(&mut self, name: Option<&str>) {
        self.unbind();

        match name {
            Some(name) => self.bind(name),
            None => self.state = HookState::Idle,
        }
    }

    /// Try again to bind a pending hook. Also notices a bound source the host
    /// has since dropped and goes back to pending for it.
    ///
    /// Returns whether the hook is bound afterwards.
    pub fn retry_pending(&mut self) -> bool {
        if self.state.is_bound() && !self.subscription.as_ref().is_some_and(Subscription::is_alive) {
            log::warn!("{} hook: source {:?} disappeared", self.side, self.state.source_name());
            self.subscription = None;
            if let HookState::Bound { name } = std::mem::replace(&mut self.state, HookState::Idle) {
                self.state = HookState::Pending { name };
            }
        }

        if let HookState::Pending { name } = &self.state {
            let name = name.clone();
            self.bind(&name);
        }
        self.state.is_bound()
    }

    /// Feed one packet as the host's callback would. Downmixes, then appends
    /// and advances the trailing timestamp under the lock.
    pub fn ingest(&self, frame: &AudioFrame<'_>) {
        self.shared.ingest(frame, self.host.sample_rate());
    }

    /// Drop all but the newest `keep` samples.
    pub fn prune(&self, keep: usize) {
        self.shared.buffer.lock().release_old(keep);
    }

    /// Lock the buffer and timestamp together.
    ///
    /// When locking both hooks of a feed, always lock the left hook first.
    pub fn lock(&self) -> MutexGuard<'_, HookBuffer> {
        self.shared.buffer.lock()
    }

    pub fn sync_offset(&self) -> i64 {
        self.sync_offset.load(Ordering::Relaxed)
    }

    pub fn set_sync_offset(&self, offset_ns: i64) {
        self.sync_offset.store(offset_ns, Ordering::Relaxed);
    }

    /// Pull the bound source's current sync offset, if it is still alive.
    pub fn refresh_sync_offset(&self) {
        if let Some(source) = self.subscription.as_ref().and_then(Subscription::source) {
            self.set_sync_offset(source.sync_offset());
        }
    }

    pub fn trailing_timestamp(&self) -> u64 {
        self.lock().trailing_timestamp()
    }

    pub fn buffered_len(&self) -> usize {
        self.lock().len()
    }

    pub fn diagnostics(&self) -> HookDiagnostics {
        self.lock().diagnostics()
    }

    fn bind(&mut self, name: &str) {
        let Some(source) = self.host.resolve(name) else {
            log::debug!("{} hook: source {:?} not found, will retry", self.side, name);
            self.state = HookState::Pending { name: name.to_string() };
            return;
        };

        let id = source.subscribe(self.frame_callback());
        self.subscription = Some(Subscription::new(&source, id));
        self.state = HookState::Bound { name: name.to_string() };
        log::info!("{} hook: capturing audio from {:?}", self.side, name);
    }

    fn unbind(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            log::info!("{} hook: released {:?}", self.side, subscription.name());
        }
    }

    fn frame_callback(&self) -> AudioFrameCallback {
        let shared = Arc::clone(&self.shared);
        let host = Arc::clone(&self.host);
        Arc::new(move |frame: &AudioFrame<'_>| shared.ingest(frame, host.sample_rate()))
    }
}

impl std::fmt::Debug for CaptureHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureHook")
            .field("side", &self.side)
            .field("state", &self.state)
            .field("subscription", &self.subscription)
            .field("sync_offset", &self.sync_offset())
            .finish()
    }
}
