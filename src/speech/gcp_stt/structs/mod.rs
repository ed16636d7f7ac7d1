pub mod operation;
pub mod recognition_audio;
pub mod recognition_config;
pub mod recognize_request;
pub mod recognize_response;
