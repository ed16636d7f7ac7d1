use serde::{Deserialize, Serialize};

use super::recognize_response::RecognizeResponse;

/// Long-running operation returned by `speech:longrunningrecognize` and
/// `operations/{name}`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Operation {
    pub name: String,
    #[serde(default)]
    pub done: bool,
    pub response: Option<RecognizeResponse>,
    pub error: Option<Status>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Status {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}
