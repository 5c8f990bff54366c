use crate::models::audio_models::CorrelationFrame;

/// Consumer of the aligned window pair, e.g. a GPU correlogram renderer.
///
/// Called on the render thread once per `AlignmentFeed::render`. The frame
/// borrows the feed's scratch buffers, so copy out anything kept past the
/// call.
pub trait CorrelationSink {
    fn consume(&mut self, frame: &CorrelationFrame<'_>);
}
