//! # audio-latency-core
//!
//! Core of an audio latency comparator: taps two live audio sources, keeps a
//! bounded mono history of each, and produces time-aligned window pairs for
//! a downstream cross-correlation stage.
//!
//! The host pipeline implements [`AudioHost`] / [`AudioSource`]; the
//! correlation renderer implements [`CorrelationSink`]. Everything in
//! between lives here.
//!
//! ## Architecture
//!
//! ```text
//! audio-latency-core (this crate)
//! ├── traits/       ← AudioHost, AudioSource, AudioFrameCallback, CorrelationSink
//! ├── models/       ← ComparatorError, ComparatorSettings, HookState, AudioFrame, AlignedWindows
//! ├── processing/   ← RingBuffer, downmix, ns/sample conversion
//! ├── session/      ← CaptureHook, Subscription, AlignmentFeed
//! ├── host/         ← InMemoryHost (in-process host for tests and embedding)
//! └── storage/      ← settings JSON
//! ```
//!
//! ## Usage
//! ```
//! use std::sync::Arc;
//! use audio_latency_core::{AlignmentFeed, ComparatorSettings, InMemoryHost};
//!
//! let host = Arc::new(InMemoryHost::new(48000));
//! let camera = host.add_source("Camera");
//! let mic = host.add_source("Mic/Aux");
//!
//! let settings = ComparatorSettings {
//!     source1_name: Some("Camera".into()),
//!     source2_name: Some("Mic/Aux".into()),
//!     add_sync_offset: false,
//!     ..Default::default()
//! };
//! let mut feed = AlignmentFeed::new(host, &settings).unwrap();
//!
//! camera.push_mono(&[1.0; 480], 0);
//! mic.push_mono(&[1.0; 480], 5_000_000);
//!
//! feed.tick(1.0 / 60.0);
//! let windows = feed.extract();
//! assert_eq!(windows.diff_samples, -240);
//! assert_eq!(windows.left.len(), windows.right.len());
//! ```

pub mod host;
pub mod models;
pub mod processing;
pub mod session;
pub mod storage;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use host::in_memory::{InMemoryHost, InMemorySource};
pub use models::audio_models::{
    AlignedWindows, AudioFrame, CorrelationFrame, HookDiagnostics, HookSide, MAX_AUDIO_PLANES,
};
pub use models::config::{ComparatorSettings, MAX_DIFF_SAMPLES};
pub use models::error::ComparatorError;
pub use models::state::HookState;
pub use processing::ring_buffer::RingBuffer;
pub use session::alignment_feed::AlignmentFeed;
pub use session::capture_hook::{CaptureHook, HookBuffer};
pub use session::subscription::Subscription;
pub use traits::audio_host::{AudioFrameCallback, AudioHost, AudioSource, SubscriptionId};
pub use traits::correlation_sink::CorrelationSink;
