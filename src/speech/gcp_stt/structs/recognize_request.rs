use crate::speech::gcp_stt::structs::{
    recognition_audio::RecognitionAudio, recognition_config::RecognitionConfig,
};
use serde::{Deserialize, Serialize};

/// Body of both `speech:recognize` and `speech:longrunningrecognize`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RecognizeRequest {
    pub config: RecognitionConfig,
    pub audio: RecognitionAudio,
}
