use serde::{Deserialize, Serialize};

/// Body of `POST /api/text-to-speech`. A missing `text` is treated as empty.
#[derive(Debug, Clone, Deserialize)]
pub struct SynthesisRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SynthesisResponse {
    pub audio_path: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TranscriptionResponse {
    pub transcript: String,
    pub processing_time_seconds: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
}

/// Round to two decimals, as reported to clients.
pub fn round_seconds(seconds: f64) -> f64 {
    (seconds * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_text_deserializes_as_empty() {
        let request: SynthesisRequest = serde_json::from_str("{}").unwrap();
        assert!(request.text.is_empty());
    }

    #[test]
    fn test_round_seconds() {
        assert_eq!(round_seconds(1.23456), 1.23);
        assert_eq!(round_seconds(0.005), 0.01);
        assert_eq!(round_seconds(0.0), 0.0);
    }
}
