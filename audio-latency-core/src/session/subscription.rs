use std::sync::{Arc, Weak};

use crate::traits::audio_host::{AudioSource, SubscriptionId};

/// A callback registration on a source, held weakly.
///
/// Dropping it unsubscribes the callback if the source is still alive. The
/// host guarantees the callback is not running once `unsubscribe` returns, so
/// after the drop nothing can touch the hook's state from the audio thread.
pub struct Subscription {
    source: Weak<dyn AudioSource>,
    id: SubscriptionId,
    name: String,
}

impl Subscription {
    pub fn new(source: &Arc<dyn AudioSource>, id: SubscriptionId) -> Self {
        Self {
            source: Arc::downgrade(source),
            id,
            name: source.name().to_string(),
        }
    }

    /// The source, if the host still has it.
    pub fn source(&self) -> Option<Arc<dyn AudioSource>> {
        self.source.upgrade()
    }

    pub fn is_alive(&self) -> bool {
        self.source.strong_count() > 0
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(source) = self.source.upgrade() {
            source.unsubscribe(self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("name", &self.name)
            .field("id", &self.id)
            .field("alive", &self.is_alive())
            .finish()
    }
}
