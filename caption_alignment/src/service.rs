use types::AlignmentResult;

use crate::config::AlignmentConfig;
use crate::engine;
use crate::transcriber::Transcriber;

/// Entry point for the narration pipeline: transcribe the narration, then
/// align the captions against the transcript.
///
/// The aligner holds no per-request state, so one instance can serve any
/// number of concurrent requests.
#[derive(Debug, Clone)]
pub struct CaptionAligner<T> {
    config: AlignmentConfig,
    transcriber: T,
}

impl<T: Transcriber + Sync> CaptionAligner<T> {
    pub const fn new(config: AlignmentConfig, transcriber: T) -> Self {
        Self {
            config,
            transcriber,
        }
    }

    /// Whether caption alignment is switched on. Callers should skip
    /// alignment entirely when this is false.
    pub const fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub const fn config(&self) -> &AlignmentConfig {
        &self.config
    }

    /// Transcribe the narration and align the captions against it.
    ///
    /// # Parameters
    /// - `captions`: Caption lines in spoken order. May be empty.
    /// - `narration_audio_url`: Where to fetch the narration audio.
    /// - `audio_duration_ms`: Length of the narration, used for captions
    ///   that fall back to an even share of the audio.
    ///
    /// # Returns
    /// `None` when alignment is unavailable: the feature is disabled, the
    /// transcription call failed, or the transcript has no words. Failures
    /// are logged here and never propagated.
    pub async fn align_captions<S: AsRef<str> + Sync>(
        &self,
        captions: &[S],
        narration_audio_url: &str,
        audio_duration_ms: u64,
    ) -> Option<AlignmentResult> {
        if !self.is_enabled() {
            tracing::debug!("Caption alignment is disabled, skipping");
            return None;
        }

        let transcript =
            match self.transcriber.transcribe(narration_audio_url).await {
                Ok(transcript) => transcript,
                Err(e) => {
                    tracing::warn!(
                        "Failed to transcribe narration {}: {}",
                        narration_audio_url,
                        e
                    );
                    return None;
                }
            };

        if transcript.words.is_empty() {
            tracing::warn!(
                "Transcript for {} has no words, alignment unavailable",
                narration_audio_url
            );
            return None;
        }

        let result = engine::align(captions, transcript, audio_duration_ms);

        tracing::info!(
            "Aligned {} of {} captions ({:?})",
            result.aligned_count,
            result.total_count,
            result.status
        );

        Some(result)
    }
}
