use std::time::Instant;

use axum::{
    extract::{
        multipart::{Multipart, MultipartError, MultipartRejection},
        rejection::JsonRejection,
        State,
    },
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use tracing::info;

use crate::{
    data::AppState,
    errors::{
        constants::{AUDIO_FIELD_NAME, NO_SPEECH_DETECTED, ROOT_MESSAGE},
        validation::{validate_audio, validate_tts_text},
        RelayError, Result,
    },
    server::models::{
        round_seconds, HealthResponse, MessageResponse, SynthesisRequest, SynthesisResponse,
        TranscriptionResponse,
    },
};

#[tracing::instrument(name = "root")]
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: String::from(ROOT_MESSAGE),
    })
}

#[tracing::instrument(name = "health_check")]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("healthy"),
    })
}

/// Synthesize the posted text and store the audio under the static directory.
#[tracing::instrument(name = "text_to_speech", skip_all)]
pub async fn text_to_speech(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SynthesisRequest>, JsonRejection>,
) -> Result<Json<SynthesisResponse>> {
    let Json(request) = payload.map_err(json_error)?;

    let preview: String = request.text.chars().take(50).collect();
    info!(%preview, "Received text-to-speech request");

    validate_tts_text(&request.text)?;

    let audio = state.synthesizer.synthesize(&request.text).await?;
    let stored = state.audio_store.persist(audio).await?;

    info!(audio_path = %stored.audio_path, "Generated audio file");

    Ok(Json(SynthesisResponse {
        audio_path: stored.audio_path,
        text: request.text,
    }))
}

/// Transcribe the uploaded audio file.
#[tracing::instrument(name = "speech_to_text", skip_all)]
pub async fn speech_to_text(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<TranscriptionResponse>> {
    let multipart =
        multipart.map_err(|rejection| RelayError::invalid_input(rejection.body_text()))?;

    let audio = read_audio_field(multipart).await?;
    validate_audio(&audio)?;

    info!(bytes = audio.len(), "Received speech-to-text request");

    let started = Instant::now();
    let transcript = state.transcriber.transcribe(audio).await?;
    let processing_time_seconds = round_seconds(started.elapsed().as_secs_f64());

    info!(processing_time_seconds, "Speech-to-text completed");

    let transcript = if transcript.trim().is_empty() {
        String::from(NO_SPEECH_DETECTED)
    } else {
        transcript
    };

    Ok(Json(TranscriptionResponse {
        transcript,
        processing_time_seconds,
    }))
}

/// Take the `file` field, or failing that the first part that carries a file name.
async fn read_audio_field(mut multipart: Multipart) -> Result<Bytes> {
    let mut fallback = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() == Some(AUDIO_FIELD_NAME) {
            return field.bytes().await.map_err(multipart_error);
        }

        if fallback.is_none() && field.file_name().is_some() {
            fallback = Some(field.bytes().await.map_err(multipart_error)?);
        }
    }

    fallback.ok_or(RelayError::MissingAudio)
}

fn json_error(rejection: JsonRejection) -> RelayError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        RelayError::PayloadTooLarge
    } else {
        RelayError::invalid_input(rejection.body_text())
    }
}

fn multipart_error(err: MultipartError) -> RelayError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        RelayError::PayloadTooLarge
    } else {
        RelayError::invalid_input(err.body_text())
    }
}
