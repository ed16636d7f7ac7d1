use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::{
    config::RecognitionConfig as RecognitionSettings,
    errors::{constants::OPERATION_POLL_INTERVAL_MS, RelayError, Result},
    speech::{
        auth::TokenSource,
        gcp_stt::structs::{
            operation::Operation, recognition_audio::RecognitionAudio,
            recognition_config::RecognitionConfig, recognize_request::RecognizeRequest,
            recognize_response::RecognizeResponse,
        },
        ports::Transcriber,
    },
};

/// Google Cloud Speech-to-Text REST client.
#[derive(Clone, Debug)]
pub struct GCPSTT {
    client: reqwest::Client,
    token_source: Arc<dyn TokenSource>,
    endpoint: String,
    settings: RecognitionSettings,
    poll_interval: Duration,
}

impl GCPSTT {
    pub fn new(
        token_source: Arc<dyn TokenSource>,
        endpoint: impl Into<String>,
        settings: RecognitionSettings,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            token_source,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            settings,
            poll_interval: Duration::from_millis(OPERATION_POLL_INTERVAL_MS),
        })
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn build_request(&self, audio: &[u8]) -> RecognizeRequest {
        RecognizeRequest {
            config: RecognitionConfig {
                encoding: self.settings.encoding.clone(),
                sampleRateHertz: self.settings.sample_rate_hertz,
                languageCode: self.settings.language_code.clone(),
                model: Some(self.settings.model.clone()).filter(|model| !model.is_empty()),
                audioChannelCount: self.settings.audio_channel_count,
                enableAutomaticPunctuation: self.settings.enable_automatic_punctuation,
            },
            audio: RecognitionAudio::from_bytes(audio),
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let token = self.token_source.token().await?;
        let response = request.bearer_auth(token).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::stt_transcription(format!("{}: {}", status, body)));
        }

        Ok(serde_json::from_str(&response.text().await?)?)
    }

    /// Synchronous recognition, suited to short clips.
    #[tracing::instrument(skip_all)]
    pub async fn recognize(&self, request: &RecognizeRequest) -> Result<RecognizeResponse> {
        self.send(
            self.client
                .post(format!("{}/v1/speech:recognize", self.endpoint))
                .json(request),
        )
        .await
    }

    /// Submit a long-running recognition and poll it until it finishes or
    /// the configured timeout elapses.
    #[tracing::instrument(skip_all)]
    pub async fn long_running_recognize(
        &self,
        request: &RecognizeRequest,
    ) -> Result<RecognizeResponse> {
        let timeout_secs = self.settings.long_running_timeout_secs;

        let operation: Operation = self
            .send(
                self.client
                    .post(format!("{}/v1/speech:longrunningrecognize", self.endpoint))
                    .json(request),
            )
            .await?;

        info!(operation = %operation.name, "submitted long-running recognition");

        tokio::time::timeout(
            Duration::from_secs(timeout_secs),
            self.wait_for_operation(operation),
        )
        .await
        .map_err(|_| RelayError::operation_timeout(timeout_secs))?
    }

    async fn wait_for_operation(&self, mut operation: Operation) -> Result<RecognizeResponse> {
        loop {
            if operation.done {
                if let Some(status) = operation.error {
                    return Err(RelayError::stt_transcription(format!(
                        "operation {} failed ({}): {}",
                        operation.name, status.code, status.message
                    )));
                }

                return Ok(operation.response.unwrap_or_default());
            }

            tokio::time::sleep(self.poll_interval).await;

            operation = self
                .send(
                    self.client
                        .get(format!("{}/v1/operations/{}", self.endpoint, operation.name)),
                )
                .await?;
        }
    }
}

#[async_trait]
impl Transcriber for GCPSTT {
    async fn transcribe(&self, audio: Bytes) -> Result<String> {
        let request = self.build_request(&audio);

        let response = match self.recognize(&request).await {
            Ok(response) => response,
            Err(err) if self.settings.long_running_fallback => {
                warn!(error = %err, "synchronous recognition failed, falling back to long-running");
                self.long_running_recognize(&request).await?
            }
            Err(err) => return Err(err),
        };

        Ok(response.transcript())
    }
}
