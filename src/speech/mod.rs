pub mod auth;
pub mod gcp_stt;
pub mod gcp_tts;
pub mod ports;
