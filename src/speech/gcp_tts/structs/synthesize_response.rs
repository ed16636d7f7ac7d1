use serde::{Deserialize, Serialize};

/// `audioContent` is base64 encoded.
#[derive(Serialize, Deserialize, Debug)]
#[allow(non_snake_case)]
pub struct SynthesizeResponse {
    pub audioContent: String,
}
