use crate::speech::gcp_tts::structs::{
    audio_config::AudioConfig, synthesis_input::SynthesisInput,
    voice_selection_params::VoiceSelectionParams,
};
use serde::{Deserialize, Serialize};

/// Body of `POST /v1/text:synthesize`.
///
/// Example:
/// ```ignore
/// SynthesizeRequest {
///     input: SynthesisInput::text("hello world"),
///     voice: VoiceSelectionParams {
///         languageCode: String::from("en-US"),
///         name: String::from("en-US-Studio-O"),
///         ssmlGender: None,
///     },
///     audioConfig: AudioConfig {
///         audioEncoding: String::from("LINEAR16"),
///         speakingRate: 1.0f32,
///         sampleRateHertz: Some(24000),
///     }
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone)]
#[allow(non_snake_case)]
pub struct SynthesizeRequest {
    pub input: SynthesisInput,
    pub voice: VoiceSelectionParams,
    pub audioConfig: AudioConfig,
}
