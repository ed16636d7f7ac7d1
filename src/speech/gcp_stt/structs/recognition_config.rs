use serde::{Deserialize, Serialize};

/// Example:
/// ```ignore
/// RecognitionConfig {
///     encoding: String::from("LINEAR16"),
///     sampleRateHertz: 24000,
///     languageCode: String::from("en-US"),
///     model: Some(String::from("latest_short")),
///     audioChannelCount: 1,
///     enableAutomaticPunctuation: true,
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[allow(non_snake_case)]
pub struct RecognitionConfig {
    pub encoding: String,
    pub sampleRateHertz: u32,
    pub languageCode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub audioChannelCount: u32,
    pub enableAutomaticPunctuation: bool,
}
