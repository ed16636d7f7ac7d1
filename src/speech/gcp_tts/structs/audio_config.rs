use serde::{Deserialize, Serialize};

/// Example:
/// ```ignore
/// AudioConfig {
///     audioEncoding: String::from("LINEAR16"),
///     speakingRate: 1.0f32,
///     sampleRateHertz: Some(24000),
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[allow(non_snake_case)]
pub struct AudioConfig {
    pub audioEncoding: String,
    pub speakingRate: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sampleRateHertz: Option<u32>,
}
