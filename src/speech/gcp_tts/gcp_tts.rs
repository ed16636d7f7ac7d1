use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use tracing::info;

use crate::{
    config::SynthesisConfig,
    errors::{RelayError, Result},
    speech::{
        auth::TokenSource,
        gcp_tts::structs::{
            audio_config::AudioConfig, synthesis_input::SynthesisInput,
            synthesize_request::SynthesizeRequest, synthesize_response::SynthesizeResponse,
            voice_selection_params::VoiceSelectionParams,
        },
        ports::Synthesizer,
    },
};

/// Google Cloud Text-to-Speech REST client.
#[derive(Clone, Debug)]
pub struct GCPTTS {
    client: reqwest::Client,
    token_source: Arc<dyn TokenSource>,
    endpoint: String,
    settings: SynthesisConfig,
}

impl GCPTTS {
    pub fn new(
        token_source: Arc<dyn TokenSource>,
        endpoint: impl Into<String>,
        settings: SynthesisConfig,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            token_source,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            settings,
        })
    }

    /// Build the request the relay sends for plain text input.
    pub fn build_request(&self, text: &str) -> SynthesizeRequest {
        SynthesizeRequest {
            input: SynthesisInput::text(text),
            voice: VoiceSelectionParams {
                languageCode: self.settings.language_code.clone(),
                name: self.settings.voice_name.clone(),
                ssmlGender: None,
            },
            audioConfig: AudioConfig {
                audioEncoding: self.settings.audio_encoding.clone(),
                speakingRate: self.settings.speaking_rate,
                sampleRateHertz: Some(self.settings.sample_rate_hertz),
            },
        }
    }

    /// Synthesize text to speech and return the decoded audio data.
    ///
    /// Example:
    /// ```ignore
    /// let audio = tts.synthesize_request(tts.build_request("hello world")).await?;
    /// ```
    #[tracing::instrument(skip(self, request))]
    pub async fn synthesize_request(&self, request: SynthesizeRequest) -> Result<Bytes> {
        let token = self.token_source.token().await?;

        let response = self
            .client
            .post(format!("{}/v1/text:synthesize", self.endpoint))
            .bearer_auth(token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::tts_synthesis(format!("{}: {}", status, body)));
        }

        let response: SynthesizeResponse = serde_json::from_str(&response.text().await?)?;
        let audio = STANDARD.decode(response.audioContent)?;

        if audio.is_empty() {
            return Err(RelayError::tts_synthesis("provider returned no audio"));
        }

        info!(bytes = audio.len(), "synthesized audio");
        Ok(Bytes::from(audio))
    }
}

#[async_trait]
impl Synthesizer for GCPTTS {
    async fn synthesize(&self, text: &str) -> Result<Bytes> {
        self.synthesize_request(self.build_request(text)).await
    }
}
