//! In-process audio host for testing without a real audio pipeline.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::models::audio_models::AudioFrame;
use crate::traits::audio_host::{AudioFrameCallback, AudioHost, AudioSource, SubscriptionId};

/// A named source whose packets are pushed by hand.
///
/// Delivery holds the subscriber list locked for the whole fan-out, so
/// packets reach each callback serially and `unsubscribe` waits for any
/// in-flight delivery before returning.
pub struct InMemorySource {
    name: String,
    sync_offset: AtomicI64,
    next_id: AtomicU64,
    subscribers: Mutex<Vec<(SubscriptionId, AudioFrameCallback)>>,
}

impl InMemorySource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sync_offset: AtomicI64::new(0),
            next_id: AtomicU64::new(1),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    pub fn set_sync_offset(&self, offset_ns: i64) {
        self.sync_offset.store(offset_ns, Ordering::Relaxed);
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }

    /// Deliver one packet to every subscriber.
    pub fn push(&self, frame: &AudioFrame<'_>) {
        let subscribers = self.subscribers.lock();
        for (_, callback) in subscribers.iter() {
            callback(frame);
        }
    }

    /// Deliver a single-plane packet starting at `timestamp` ns.
    pub fn push_mono(&self, samples: &[f32], timestamp: u64) {
        self.push(&AudioFrame::new(&[samples], timestamp));
    }
}

impl AudioSource for InMemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn subscribe(&self, callback: AudioFrameCallback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscribers.lock().push((id, callback));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.lock().retain(|(sub, _)| *sub != id);
    }

    fn sync_offset(&self) -> i64 {
        self.sync_offset.load(Ordering::Relaxed)
    }
}

/// Registry of [`InMemorySource`]s at a fixed sample rate.
pub struct InMemoryHost {
    sample_rate: u32,
    sources: RwLock<HashMap<String, Arc<InMemorySource>>>,
}

impl InMemoryHost {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            sources: RwLock::new(HashMap::new()),
        }
    }

    /// Create and register a source. Replaces any source with the same name.
    pub fn add_source(&self, name: &str) -> Arc<InMemorySource> {
        let source = Arc::new(InMemorySource::new(name));
        self.sources.write().insert(name.to_string(), Arc::clone(&source));
        source
    }

    /// Unregister a source. Hooks holding it weakly see it disappear once the
    /// last strong reference is dropped.
    pub fn remove_source(&self, name: &str) -> Option<Arc<InMemorySource>> {
        self.sources.write().remove(name)
    }
}

impl AudioHost for InMemoryHost {
    fn resolve(&self, name: &str) -> Option<Arc<dyn AudioSource>> {
        let source = self.sources.read().get(name).cloned()?;
        Some(source as Arc<dyn AudioSource>)
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_registered_source() {
        let host = InMemoryHost::new(48000);
        host.add_source("Mic/Aux");

        assert_eq!(host.resolve("Mic/Aux").map(|s| s.name().to_string()), Some("Mic/Aux".to_string()));
        assert!(host.resolve("Desktop Audio").is_none());
        assert_eq!(host.sample_rate(), 48000);
    }

    #[test]
    fn subscribe_push_unsubscribe() {
        let source = InMemorySource::new("Mic/Aux");
        let received = Arc::new(AtomicU64::new(0));

        let counter = Arc::clone(&received);
        let id = source.subscribe(Arc::new(move |frame: &AudioFrame<'_>| {
            counter.fetch_add(frame.frames() as u64, Ordering::SeqCst);
        }));
        source.push_mono(&[0.0; 16], 0);
        source.unsubscribe(id);
        source.push_mono(&[0.0; 16], 0);

        assert_eq!(received.load(Ordering::SeqCst), 16);
        assert_eq!(source.subscriber_count(), 0);
    }

    #[test]
    fn removed_source_no_longer_resolves() {
        let host = InMemoryHost::new(48000);
        host.add_source("Camera");

        let removed = host.remove_source("Camera");

        assert!(removed.is_some());
        assert!(host.resolve("Camera").is_none());
    }

    #[test]
    fn sync_offset_round_trip() {
        let source = InMemorySource::new("Camera");
        source.set_sync_offset(-120_000_000);
        assert_eq!(source.sync_offset(), -120_000_000);
    }
}
