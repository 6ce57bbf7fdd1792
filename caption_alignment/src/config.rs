use std::time::Duration;

use serde::Deserialize;

/// Settings for the caption aligner, passed in at construction time.
///
/// Field names line up with the environment variables the Lambda reads,
/// e.g. `CAPTION_ALIGNMENT_ENABLED` or `OPENAI_MODEL`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AlignmentConfig {
    /// Feature toggle. When off, callers skip alignment entirely.
    #[serde(rename = "caption_alignment_enabled")]
    pub enabled: bool,

    pub openai_model: String,

    pub openai_base_url: String,

    /// ISO-639-1 hint passed to the transcription provider.
    pub transcription_language: Option<String>,

    pub transcription_timeout_secs: u64,
}

impl AlignmentConfig {
    pub const DEFAULT_MODEL: &'static str = "whisper-1";
    pub const DEFAULT_BASE_URL: &'static str = "https://api.openai.com/v1";
    pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

    pub const fn transcription_timeout(&self) -> Duration {
        Duration::from_secs(self.transcription_timeout_secs)
    }
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            openai_model: Self::DEFAULT_MODEL.to_string(),
            openai_base_url: Self::DEFAULT_BASE_URL.to_string(),
            transcription_language: None,
            transcription_timeout_secs: Self::DEFAULT_TIMEOUT_SECS,
        }
    }
}
