use std::sync::Arc;

use crate::models::audio_models::AudioFrame;

/// Callback invoked for every audio packet a subscribed source delivers.
///
/// Fires on the host's audio thread. The host never runs two invocations for
/// the same subscription at once, but they do run concurrently with the
/// render thread, so keep processing minimal.
pub type AudioFrameCallback = Arc<dyn Fn(&AudioFrame<'_>) + Send + Sync + 'static>;

/// Identifies one callback registration on one source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// A live, named audio source owned by the host.
///
/// The core only ever holds sources weakly; the host may drop one at any
/// time.
pub trait AudioSource: Send + Sync {
    fn name(&self) -> &str;

    /// Register `callback` for this source's audio packets.
    fn subscribe(&self, callback: AudioFrameCallback) -> SubscriptionId;

    /// Remove a registration. Once this returns, the callback is not running
    /// and will not be invoked again.
    fn unsubscribe(&self, id: SubscriptionId);

    /// The source's own configured delay in nanoseconds, applied on top of
    /// packet timestamps when sync offsets are enabled.
    fn sync_offset(&self) -> i64 {
        0
    }
}

/// The audio pipeline hosting the sources.
pub trait AudioHost: Send + Sync {
    /// Look up a live source by name.
    fn resolve(&self, name: &str) -> Option<Arc<dyn AudioSource>>;

    /// Pipeline sample rate in Hz, used for every ns/sample conversion.
    fn sample_rate(&self) -> u32;
}
