use std::sync::Arc;

use crate::{
    speech::ports::{Synthesizer, Transcriber},
    storage::AudioStore,
};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub synthesizer: Arc<dyn Synthesizer>,
    pub transcriber: Arc<dyn Transcriber>,
    pub audio_store: Arc<dyn AudioStore>,
}

impl AppState {
    pub fn new(
        synthesizer: Arc<dyn Synthesizer>,
        transcriber: Arc<dyn Transcriber>,
        audio_store: Arc<dyn AudioStore>,
    ) -> Self {
        Self {
            synthesizer,
            transcriber,
            audio_store,
        }
    }
}
