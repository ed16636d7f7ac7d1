use serde::{Deserialize, Serialize};

/// Example:
/// ```ignore
/// VoiceSelectionParams {
///     languageCode: String::from("en-US"),
///     name: String::from("en-US-Studio-O"),
///     ssmlGender: None,
/// }
/// ```
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[allow(non_snake_case)]
pub struct VoiceSelectionParams {
    pub languageCode: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssmlGender: Option<String>,
}
