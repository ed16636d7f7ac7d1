use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

/// Inline audio; `content` is base64 encoded.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RecognitionAudio {
    pub content: String,
}

impl RecognitionAudio {
    pub fn from_bytes(audio: &[u8]) -> Self {
        Self {
            content: STANDARD.encode(audio),
        }
    }
}
