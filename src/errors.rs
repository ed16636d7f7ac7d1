use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Custom error types for the speech relay
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TTS synthesis error: {0}")]
    TTSSynthesis(String),

    #[error("STT transcription error: {0}")]
    STTTranscription(String),

    #[error("GCP authentication error: {0}")]
    GCPAuth(#[from] gcp_auth::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Base64 decoding error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Telemetry error: {0}")]
    Telemetry(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Text too long (max {max_length} bytes)")]
    TextTooLong { max_length: usize },

    #[error("No audio file provided")]
    MissingAudio,

    #[error("Empty audio file")]
    EmptyAudio,

    #[error("Request body is too large")]
    PayloadTooLarge,

    #[error("Long-running recognition did not finish within {timeout_secs}s")]
    OperationTimeout { timeout_secs: u64 },

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl RelayError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn tts_synthesis(message: impl Into<String>) -> Self {
        Self::TTSSynthesis(message.into())
    }

    pub fn stt_transcription(message: impl Into<String>) -> Self {
        Self::STTTranscription(message.into())
    }

    pub fn telemetry(message: impl Into<String>) -> Self {
        Self::Telemetry(message.into())
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn text_too_long(max_length: usize) -> Self {
        Self::TextTooLong { max_length }
    }

    pub fn operation_timeout(timeout_secs: u64) -> Self {
        Self::OperationTimeout { timeout_secs }
    }

    /// Errors caused by the caller, reported back verbatim.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_)
                | Self::TextTooLong { .. }
                | Self::MissingAudio
                | Self::EmptyAudio
                | Self::PayloadTooLarge
        )
    }

    /// Errors raised while talking to the speech provider.
    pub fn is_upstream_error(&self) -> bool {
        matches!(
            self,
            Self::TTSSynthesis(_)
                | Self::STTTranscription(_)
                | Self::GCPAuth(_)
                | Self::Http(_)
                | Self::Json(_)
                | Self::Base64(_)
                | Self::OperationTimeout { .. }
        )
    }

    pub fn status_code(&self) -> StatusCode {
        if matches!(self, Self::PayloadTooLarge) {
            StatusCode::PAYLOAD_TOO_LARGE
        } else if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else if self.is_upstream_error() {
            StatusCode::BAD_GATEWAY
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, RelayError>;

/// JSON body of every error response produced by the relay.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = if self.is_client_error() {
            self.to_string()
        } else if self.is_upstream_error() {
            tracing::error!(error = %self, "upstream speech service failed");
            String::from(constants::UPSTREAM_ERROR_DETAIL)
        } else {
            tracing::error!(error = %self, "internal error");
            String::from(constants::INTERNAL_ERROR_DETAIL)
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}

/// Input validation functions
pub mod validation {
    use super::*;

    /// Validate TTS text input
    pub fn validate_tts_text(text: &str) -> Result<()> {
        if text.trim().is_empty() {
            return Err(RelayError::invalid_input("Please provide text to convert"));
        }

        if text.len() > constants::MAX_TTS_TEXT_LENGTH {
            return Err(RelayError::text_too_long(constants::MAX_TTS_TEXT_LENGTH));
        }

        Ok(())
    }

    /// Validate uploaded audio before it is sent for recognition
    pub fn validate_audio(audio: &[u8]) -> Result<()> {
        if audio.is_empty() {
            return Err(RelayError::EmptyAudio);
        }

        Ok(())
    }
}

/// Constants used throughout the application
pub mod constants {
    // Configuration constants
    pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
    pub const DEFAULT_CREDENTIALS_PATH: &str = "./credentials.json";
    pub const DEFAULT_HOST: &str = "0.0.0.0";
    pub const DEFAULT_PORT: u16 = 8080;
    pub const DEFAULT_STATIC_DIR: &str = "static";
    pub const DEFAULT_PUBLIC_PREFIX: &str = "/static";
    pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

    // Google endpoints
    pub const GCP_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";
    pub const GCP_TTS_ENDPOINT: &str = "https://texttospeech.googleapis.com";
    pub const GCP_STT_ENDPOINT: &str = "https://speech.googleapis.com";

    // TTS constants
    pub const MAX_TTS_TEXT_LENGTH: usize = 5000;
    pub const TTS_TIMEOUT_SECS: u64 = 30;
    pub const DEFAULT_LANGUAGE_CODE: &str = "en-US";
    pub const DEFAULT_VOICE_NAME: &str = "en-US-Studio-O";
    pub const DEFAULT_AUDIO_ENCODING: &str = "LINEAR16";
    pub const DEFAULT_SPEAKING_RATE: f32 = 1.0;
    pub const AUDIO_SAMPLE_RATE: u32 = 24000;

    // STT constants
    pub const DEFAULT_RECOGNITION_MODEL: &str = "latest_short";
    pub const DEFAULT_AUDIO_CHANNEL_COUNT: u32 = 1;
    pub const LONG_RUNNING_TIMEOUT_SECS: u64 = 90;
    pub const OPERATION_POLL_INTERVAL_MS: u64 = 1000;
    pub const NO_SPEECH_DETECTED: &str = "No speech detected";
    pub const AUDIO_FIELD_NAME: &str = "file";

    // Storage constants
    pub const AUDIO_FILE_PREFIX: &str = "output_";
    pub const AUDIO_FILE_EXTENSION: &str = "wav";
    pub const DEFAULT_RETENTION_SECS: u64 = 3600;
    pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 300;

    // Response messages
    pub const ROOT_MESSAGE: &str = "Text-to-Speech and Speech-to-Text API is running";
    pub const UPSTREAM_ERROR_DETAIL: &str = "Speech service request failed";
    pub const INTERNAL_ERROR_DETAIL: &str = "Internal server error";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relay_error_creation() {
        let config_error = RelayError::config("Test config error");
        assert!(matches!(config_error, RelayError::Config(_)));
        assert_eq!(
            config_error.to_string(),
            "Configuration error: Test config error"
        );

        let tts_error = RelayError::tts_synthesis("quota exceeded");
        assert!(matches!(tts_error, RelayError::TTSSynthesis(_)));
        assert_eq!(tts_error.to_string(), "TTS synthesis error: quota exceeded");
    }

    #[test]
    fn test_text_too_long_error() {
        let error = RelayError::text_too_long(5000);
        assert!(matches!(error, RelayError::TextTooLong { max_length: 5000 }));
        assert_eq!(error.to_string(), "Text too long (max 5000 bytes)");
    }

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            RelayError::invalid_input("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(RelayError::MissingAudio.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(RelayError::EmptyAudio.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            RelayError::PayloadTooLarge.status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            RelayError::stt_transcription("denied").status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            RelayError::operation_timeout(90).status_code(),
            StatusCode::BAD_GATEWAY
        );
        let io = RelayError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only",
        ));
        assert_eq!(io.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_upstream_detail_is_generic() {
        let response = RelayError::tts_synthesis("secret project id 1234").into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    mod validation_tests {
        use super::super::constants;
        use super::super::validation::*;
        use super::super::RelayError;

        #[test]
        fn test_validate_tts_text_valid() {
            assert!(validate_tts_text("Hello world").is_ok());
            assert!(validate_tts_text("こんにちは").is_ok());
            assert!(validate_tts_text("Test with numbers 123").is_ok());
        }

        #[test]
        fn test_validate_tts_text_empty() {
            assert!(validate_tts_text("").is_err());
            assert!(validate_tts_text("   ").is_err());
            assert!(validate_tts_text("\n\t").is_err());

            let err = validate_tts_text("").unwrap_err();
            assert_eq!(err.to_string(), "Please provide text to convert");
        }

        #[test]
        fn test_validate_tts_text_too_long() {
            let long_text = "a".repeat(constants::MAX_TTS_TEXT_LENGTH + 1);
            assert!(matches!(
                validate_tts_text(&long_text),
                Err(RelayError::TextTooLong { .. })
            ));

            let limit_text = "a".repeat(constants::MAX_TTS_TEXT_LENGTH);
            assert!(validate_tts_text(&limit_text).is_ok());
        }

        #[test]
        fn test_validate_audio() {
            assert!(matches!(validate_audio(&[]), Err(RelayError::EmptyAudio)));
            assert!(validate_audio(&[0u8, 1, 2]).is_ok());
        }
    }
}
