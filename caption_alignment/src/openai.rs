/// Transcription through the `OpenAI` audio API.
///
/// The narration is downloaded from its URL and uploaded as multipart form
/// data with word-level timestamp granularity. The verbose JSON response is
/// converted from seconds to whole milliseconds.
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use types::{AlignedWord, Transcript, TranscriptSegment};

use crate::config::AlignmentConfig;
use crate::transcriber::{Transcriber, TranscriptionError};

const PROVIDER: &str = "openai";
const FALLBACK_FILE_NAME: &str = "narration.mp3";

#[derive(Debug, Deserialize)]
struct VerboseTranscription {
    #[serde(default)]
    words: Vec<VerboseWord>,

    #[serde(default)]
    segments: Vec<VerboseSegment>,
}

#[derive(Debug, Deserialize)]
struct VerboseWord {
    word: String,
    start: f64,
    end: f64,
}

#[derive(Debug, Deserialize)]
struct VerboseSegment {
    text: String,
    start: f64,
    end: f64,
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn seconds_to_ms(seconds: f64) -> u64 {
    if seconds.is_finite() && seconds > 0.0 {
        (seconds * 1000.0).round() as u64
    } else {
        0
    }
}

/// Millisecond span with the end raised to the start when a provider
/// reports them out of order.
fn span_ms(start: f64, end: f64) -> (u64, u64) {
    let start_ms = seconds_to_ms(start);
    (start_ms, seconds_to_ms(end).max(start_ms))
}

impl VerboseTranscription {
    fn into_transcript(self, model: &str) -> Transcript {
        Transcript {
            provider: PROVIDER.to_string(),
            model: model.to_string(),
            created_at: chrono::Utc::now(),
            words: self
                .words
                .into_iter()
                .map(|word| {
                    let (start_ms, end_ms) = span_ms(word.start, word.end);
                    AlignedWord {
                        text: word.word.trim().to_string(),
                        start_ms,
                        end_ms,
                    }
                })
                .collect(),
            segments: self
                .segments
                .into_iter()
                .map(|segment| {
                    let (start_ms, end_ms) = span_ms(segment.start, segment.end);
                    TranscriptSegment {
                        text: segment.text.trim().to_string(),
                        start_ms,
                        end_ms,
                    }
                })
                .collect(),
        }
    }
}

/// File name to report for the uploaded audio. The provider uses its
/// extension to detect the format.
fn audio_file_name(audio_url: &str) -> String {
    audio_url
        .split(['?', '#'])
        .next()
        .and_then(|path| path.rsplit('/').next())
        .filter(|name| name.contains('.'))
        .unwrap_or(FALLBACK_FILE_NAME)
        .to_string()
}

#[derive(Debug, Clone)]
pub struct OpenAiTranscriber {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    language: Option<String>,
}

impl OpenAiTranscriber {
    /// Build a transcriber from the alignment settings.
    ///
    /// # Errors
    /// If the HTTP client cannot be constructed.
    pub fn new(
        api_key: String,
        config: &AlignmentConfig,
    ) -> Result<Self, TranscriptionError> {
        let client = reqwest::Client::builder()
            .timeout(config.transcription_timeout())
            .build()?;

        Ok(Self {
            client,
            api_key,
            model: config.openai_model.clone(),
            base_url: config.openai_base_url.trim_end_matches('/').to_string(),
            language: config.transcription_language.clone(),
        })
    }

    async fn fetch_audio(
        &self,
        audio_url: &str,
    ) -> Result<Vec<u8>, TranscriptionError> {
        let response = self
            .client
            .get(audio_url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(TranscriptionError::AudioFetch)?;

        let bytes = response
            .bytes()
            .await
            .map_err(TranscriptionError::AudioFetch)?;

        tracing::debug!(
            "Fetched {} bytes of narration audio from {}",
            bytes.len(),
            audio_url
        );

        Ok(bytes.to_vec())
    }
}

impl Transcriber for OpenAiTranscriber {
    async fn transcribe(
        &self,
        audio_url: &str,
    ) -> Result<Transcript, TranscriptionError> {
        let audio = self.fetch_audio(audio_url).await?;

        let mut form = Form::new()
            .text("model", self.model.clone())
            .text("response_format", "verbose_json")
            .text("timestamp_granularities[]", "word")
            .text("timestamp_granularities[]", "segment")
            .part("file", Part::bytes(audio).file_name(audio_file_name(audio_url)));

        if let Some(language) = &self.language {
            form = form.text("language", language.clone());
        }

        let response = self
            .client
            .post(format!("{}/audio/transcriptions", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(TranscriptionError::Provider { status, body });
        }

        let transcription: VerboseTranscription = serde_json::from_str(&body)?;

        tracing::info!(
            "Transcribed {} words in {} segments",
            transcription.words.len(),
            transcription.segments.len()
        );

        Ok(transcription.into_transcript(&self.model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_verbose_json_to_transcript() {
        let body = r#"{
            "task": "transcribe",
            "language": "english",
            "duration": 2.1,
            "text": "Hello world.",
            "words": [
                {"word": " Hello", "start": 0.0, "end": 0.52},
                {"word": "world.", "start": 0.52, "end": 1.0004}
            ],
            "segments": [
                {"id": 0, "text": " Hello world.", "start": 0.0, "end": 1.0}
            ]
        }"#;

        let transcript = serde_json::from_str::<VerboseTranscription>(body)
            .unwrap()
            .into_transcript("whisper-1");

        assert_eq!(transcript.provider, "openai");
        assert_eq!(transcript.model, "whisper-1");
        assert_eq!(
            transcript.words,
            vec![
                AlignedWord {
                    text: "Hello".to_string(),
                    start_ms: 0,
                    end_ms: 520,
                },
                AlignedWord {
                    text: "world.".to_string(),
                    start_ms: 520,
                    end_ms: 1000,
                },
            ]
        );
        assert_eq!(
            transcript.segments,
            vec![TranscriptSegment {
                text: "Hello world.".to_string(),
                start_ms: 0,
                end_ms: 1000,
            }]
        );
    }

    #[test]
    fn test_missing_words_decode_as_empty() {
        let transcript = serde_json::from_str::<VerboseTranscription>(
            r#"{"text": "", "segments": []}"#,
        )
        .unwrap()
        .into_transcript("whisper-1");

        assert!(transcript.words.is_empty());
    }

    #[test]
    fn test_span_ms_clamps_bad_timestamps() {
        assert_eq!(span_ms(-0.5, 0.25), (0, 250));
        assert_eq!(span_ms(2.0, 1.5), (2000, 2000));
        assert_eq!(span_ms(f64::NAN, 1.0), (0, 1000));
    }

    #[test]
    fn test_audio_file_name() {
        assert_eq!(
            audio_file_name("https://cdn.example.com/audio/card-1.mp3"),
            "card-1.mp3"
        );
        assert_eq!(
            audio_file_name("https://cdn.example.com/card.wav?sig=abc/def"),
            "card.wav"
        );
        assert_eq!(
            audio_file_name("https://cdn.example.com/audio/"),
            "narration.mp3"
        );
    }

    #[test]
    fn test_new_trims_base_url() {
        let config = AlignmentConfig {
            openai_base_url: "http://localhost:8080/v1/".to_string(),
            transcription_language: Some("en".to_string()),
            ..AlignmentConfig::default()
        };

        let transcriber =
            OpenAiTranscriber::new("sk-test".to_string(), &config).unwrap();

        assert_eq!(transcriber.base_url, "http://localhost:8080/v1");
        assert_eq!(transcriber.model, "whisper-1");
        assert_eq!(transcriber.language.as_deref(), Some("en"));
    }
}
