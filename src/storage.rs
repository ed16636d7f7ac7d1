use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use crate::errors::{
    constants::{AUDIO_FILE_EXTENSION, AUDIO_FILE_PREFIX},
    Result,
};

/// Audio persisted by an [`AudioStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAudio {
    pub file_name: String,
    /// Path the audio can be fetched from over HTTP.
    pub audio_path: String,
    pub location: PathBuf,
}

/// Persists generated audio and hands back a retrievable path.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AudioStore: Send + Sync {
    async fn persist(&self, audio: Bytes) -> Result<StoredAudio>;
}

/// Writes audio into a directory that is served under `public_prefix`.
#[derive(Debug, Clone)]
pub struct LocalAudioStore {
    root: PathBuf,
    public_prefix: String,
}

impl LocalAudioStore {
    pub fn new(root: impl Into<PathBuf>, public_prefix: &str) -> Self {
        Self {
            root: root.into(),
            public_prefix: public_prefix.trim_end_matches('/').to_string(),
        }
    }

    /// Create the backing directory if it does not exist yet.
    pub async fn init(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn public_prefix(&self) -> &str {
        &self.public_prefix
    }
}

/// `output_<unix-seconds>_<uuid>.wav`
pub fn generate_file_name() -> String {
    format!(
        "{}{}_{}.{}",
        AUDIO_FILE_PREFIX,
        chrono::Utc::now().timestamp(),
        Uuid::new_v4().simple(),
        AUDIO_FILE_EXTENSION
    )
}

/// Whether a file name was produced by [`generate_file_name`].
pub fn is_generated_file_name(name: &str) -> bool {
    name.starts_with(AUDIO_FILE_PREFIX)
        && Path::new(name)
            .extension()
            .is_some_and(|ext| ext == AUDIO_FILE_EXTENSION)
}

#[async_trait]
impl AudioStore for LocalAudioStore {
    #[tracing::instrument(skip(self, audio), fields(bytes = audio.len()))]
    async fn persist(&self, audio: Bytes) -> Result<StoredAudio> {
        let file_name = generate_file_name();
        let location = self.root.join(&file_name);

        tokio::fs::write(&location, &audio).await?;

        info!(path = %location.display(), "stored generated audio");

        Ok(StoredAudio {
            audio_path: format!("{}/{}", self.public_prefix, file_name),
            file_name,
            location,
        })
    }
}
