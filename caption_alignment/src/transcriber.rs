use thiserror::Error;
use types::Transcript;

#[derive(Error, Debug)]
pub enum TranscriptionError {
    #[error("Failed to fetch narration audio: {0}")]
    AudioFetch(#[source] reqwest::Error),
    #[error("Transcription request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Transcription provider returned {status}: {body}")]
    Provider {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("Failed to parse transcription JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A speech-to-text capability that produces word-level timestamps.
///
/// Implementations report every failure as an error; deciding what an
/// unavailable transcript means is left to the caller.
pub trait Transcriber {
    fn transcribe(
        &self,
        audio_url: &str,
    ) -> impl Future<Output = Result<Transcript, TranscriptionError>> + Send;
}
