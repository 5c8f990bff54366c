pub mod audio_host;
pub mod correlation_sink;
