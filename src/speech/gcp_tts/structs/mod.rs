pub mod audio_config;
pub mod synthesis_input;
pub mod synthesize_request;
pub mod synthesize_response;
pub mod voice_selection_params;
