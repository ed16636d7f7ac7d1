use std::{env, net::SocketAddr, path::PathBuf, time::Duration};

use serde::Deserialize;

use crate::errors::{constants::*, RelayError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub google: GoogleConfig,
    pub synthesis: SynthesisConfig,
    pub recognition: RecognitionConfig,
    pub retention: RetentionConfig,
    pub log_level: String,
    pub otel_http_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
    pub public_prefix: String,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GoogleConfig {
    pub credentials_path: String,
    pub tts_endpoint: String,
    pub stt_endpoint: String,
    pub request_timeout_secs: u64,
}

/// Voice and audio settings sent with every synthesis call.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    pub language_code: String,
    pub voice_name: String,
    pub audio_encoding: String,
    pub speaking_rate: f32,
    pub sample_rate_hertz: u32,
}

/// Recognition settings sent with every transcription call.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RecognitionConfig {
    pub language_code: String,
    pub encoding: String,
    pub sample_rate_hertz: u32,
    pub model: String,
    pub audio_channel_count: u32,
    pub enable_automatic_punctuation: bool,
    pub long_running_fallback: bool,
    pub long_running_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetentionConfig {
    /// Zero keeps generated audio forever.
    pub max_age_secs: u64,
    pub sweep_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            google: GoogleConfig::default(),
            synthesis: SynthesisConfig::default(),
            recognition: RecognitionConfig::default(),
            retention: RetentionConfig::default(),
            log_level: String::from("info"),
            otel_http_url: None,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from(DEFAULT_HOST),
            port: DEFAULT_PORT,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            public_prefix: String::from(DEFAULT_PUBLIC_PREFIX),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            credentials_path: String::from(DEFAULT_CREDENTIALS_PATH),
            tts_endpoint: String::from(GCP_TTS_ENDPOINT),
            stt_endpoint: String::from(GCP_STT_ENDPOINT),
            request_timeout_secs: TTS_TIMEOUT_SECS,
        }
    }
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            language_code: String::from(DEFAULT_LANGUAGE_CODE),
            voice_name: String::from(DEFAULT_VOICE_NAME),
            audio_encoding: String::from(DEFAULT_AUDIO_ENCODING),
            speaking_rate: DEFAULT_SPEAKING_RATE,
            sample_rate_hertz: AUDIO_SAMPLE_RATE,
        }
    }
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            language_code: String::from(DEFAULT_LANGUAGE_CODE),
            encoding: String::from(DEFAULT_AUDIO_ENCODING),
            sample_rate_hertz: AUDIO_SAMPLE_RATE,
            model: String::from(DEFAULT_RECOGNITION_MODEL),
            audio_channel_count: DEFAULT_AUDIO_CHANNEL_COUNT,
            enable_automatic_punctuation: true,
            long_running_fallback: false,
            long_running_timeout_secs: LONG_RUNNING_TIMEOUT_SECS,
        }
    }
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            max_age_secs: DEFAULT_RETENTION_SECS,
            sweep_interval_secs: DEFAULT_SWEEP_INTERVAL_SECS,
        }
    }
}

impl Config {
    /// Load config from the TOML file named by `SPEECH_RELAY_CONFIG`
    /// (or `config.toml`), falling back to defaults when the file is absent,
    /// then apply environment overrides.
    pub fn load() -> Result<Self> {
        let path = env::var("SPEECH_RELAY_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());

        let mut config = match std::fs::read_to_string(&path) {
            Ok(contents) => Self::from_toml(&contents)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(err) => return Err(err.into()),
        };

        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let prefix = self.server.public_prefix.trim_end_matches('/');
        if !prefix.starts_with('/') || prefix.len() < 2 {
            return Err(RelayError::config(format!(
                "public_prefix must be a non-root path starting with '/': {:?}",
                self.server.public_prefix
            )));
        }

        if self.server.max_upload_bytes == 0 {
            return Err(RelayError::config("max_upload_bytes must be positive"));
        }

        if self.retention.max_age_secs > 0 && self.retention.sweep_interval_secs == 0 {
            return Err(RelayError::config(
                "sweep_interval_secs must be positive when retention is enabled",
            ));
        }

        Ok(())
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str::<Config>(contents)?)
    }

    /// Environment variables win over file values.
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(host) = env::var("HOST") {
            self.server.host = host;
        }

        if let Ok(port) = env::var("PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| RelayError::config(format!("Invalid PORT value: {}", port)))?;
        }

        if let Ok(credentials) = env::var("GOOGLE_APPLICATION_CREDENTIALS") {
            self.google.credentials_path = credentials;
        }

        if let Ok(url) = env::var("OTEL_HTTP_URL") {
            self.otel_http_url = Some(url);
        }

        Ok(())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| RelayError::config(format!("Invalid bind address: {}", e)))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.google.request_timeout_secs)
    }

    pub fn log_level(&self) -> Result<tracing::Level> {
        self.log_level
            .parse()
            .map_err(|_| RelayError::config(format!("Invalid log level: {}", self.log_level)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.public_prefix, "/static");
        assert_eq!(config.synthesis.voice_name, "en-US-Studio-O");
        assert_eq!(config.synthesis.audio_encoding, "LINEAR16");
        assert_eq!(config.recognition.sample_rate_hertz, 24000);
        assert_eq!(config.recognition.model, "latest_short");
        assert!(!config.recognition.long_running_fallback);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            log_level = "debug"

            [server]
            port = 9000
            static_dir = "/tmp/audio"

            [recognition]
            long_running_fallback = true

            [retention]
            max_age_secs = 0
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.static_dir, PathBuf::from("/tmp/audio"));
        assert!(config.recognition.long_running_fallback);
        assert_eq!(config.recognition.long_running_timeout_secs, 90);
        assert_eq!(config.retention.max_age_secs, 0);
        assert_eq!(config.log_level().unwrap(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_example_config_parses() {
        let config = Config::from_toml(include_str!("../config.example.toml")).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.retention.max_age_secs, 3600);
        assert_eq!(config.google.request_timeout_secs, 30);
    }

    #[test]
    fn test_validate_public_prefix() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.server.public_prefix = String::from("/");
        assert!(config.validate().is_err());

        config.server.public_prefix = String::from("static");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_sweep_interval() {
        let mut config = Config::default();
        config.retention.sweep_interval_secs = 0;
        assert!(config.validate().is_err());

        config.retention.max_age_secs = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = Config::from_toml("[server]\nport = \"eighty\"");
        assert!(matches!(result, Err(RelayError::Toml(_))));
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        env::set_var("HOST", "127.0.0.1");
        env::set_var("PORT", "3001");
        env::set_var("GOOGLE_APPLICATION_CREDENTIALS", "/secrets/sa.json");

        let mut config = Config::default();
        let result = config.apply_env();

        env::remove_var("HOST");
        env::remove_var("PORT");
        env::remove_var("GOOGLE_APPLICATION_CREDENTIALS");

        result.unwrap();
        assert_eq!(config.bind_addr().unwrap(), "127.0.0.1:3001".parse().unwrap());
        assert_eq!(config.google.credentials_path, "/secrets/sa.json");
    }

    #[test]
    #[serial]
    fn test_invalid_port_env() {
        env::set_var("PORT", "not-a-port");
        let mut config = Config::default();
        let result = config.apply_env();
        env::remove_var("PORT");

        assert!(matches!(result, Err(RelayError::Config(_))));
    }
}
