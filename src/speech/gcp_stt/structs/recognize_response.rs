use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct RecognizeResponse {
    #[serde(default)]
    pub results: Vec<SpeechRecognitionResult>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct SpeechRecognitionResult {
    #[serde(default)]
    pub alternatives: Vec<SpeechRecognitionAlternative>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct SpeechRecognitionAlternative {
    #[serde(default)]
    pub transcript: String,
    pub confidence: Option<f32>,
}

impl RecognizeResponse {
    /// Concatenate the top alternative of every result.
    pub fn transcript(&self) -> String {
        self.results
            .iter()
            .filter_map(|result| result.alternatives.first())
            .map(|alternative| alternative.transcript.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_joins_first_alternatives() {
        let response: RecognizeResponse = serde_json::from_str(
            r#"{
                "results": [
                    {"alternatives": [{"transcript": "hello", "confidence": 0.9}, {"transcript": "yellow"}]},
                    {"alternatives": []},
                    {"alternatives": [{"transcript": " world"}]}
                ],
                "totalBilledTime": "1s"
            }"#,
        )
        .unwrap();

        assert_eq!(response.transcript(), "hello world");
    }

    #[test]
    fn test_transcript_without_results() {
        let response: RecognizeResponse = serde_json::from_str("{}").unwrap();
        assert!(response.transcript().is_empty());
    }
}
