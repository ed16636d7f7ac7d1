use async_trait::async_trait;
use bytes::Bytes;

use crate::errors::Result;

/// Converts text to audio waveform bytes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Synthesizer: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<Bytes>;
}

/// Converts audio waveform bytes to text.
///
/// An empty string means the provider heard no speech.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio: Bytes) -> Result<String>;
}
