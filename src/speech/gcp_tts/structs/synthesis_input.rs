use serde::{Deserialize, Serialize};

/// Exactly one of `text` and `ssml` should be set.
///
/// Example:
/// ```ignore
/// SynthesisInput {
///     text: Some(String::from("hello world")),
///     ssml: None,
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SynthesisInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssml: Option<String>,
}

impl SynthesisInput {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ssml: None,
        }
    }
}
