/**
 * This is the main entrypoint for the `caption_alignment_lambda` function.
 *
 * The function is responsible for transcribing a narration track with the
 * `OpenAI` API and aligning the narration's captions against the transcript.
 */
use caption_alignment::{AlignmentConfig, CaptionAligner, OpenAiTranscriber};
use lambda_runtime::{Error, LambdaEvent, service_fn};
use serde::{Deserialize, Serialize};
use types::AlignmentResult;

#[derive(Debug, Deserialize, Clone)]
struct Config {
    openai_secret_arn: String,

    #[serde(flatten)]
    alignment: AlignmentConfig,
}

#[derive(Debug, Clone)]
struct AppContext {
    aligner: CaptionAligner<OpenAiTranscriber>,
}

impl gt_app::ContextProvider<Config> for AppContext {
    async fn new(
        config: Config,
        aws_config: aws_config::SdkConfig,
    ) -> Result<Self, Error> {
        let secrets_manager = aws_sdk_secretsmanager::Client::new(&aws_config);

        let api_key = secrets_manager
            .get_secret_value()
            .secret_id(&config.openai_secret_arn)
            .send()
            .await?
            .secret_string
            .ok_or("OpenAI secret has no string value")?;

        let transcriber = OpenAiTranscriber::new(api_key, &config.alignment)?;

        Ok(Self {
            aligner: CaptionAligner::new(config.alignment, transcriber),
        })
    }
}

#[derive(Debug, Deserialize)]
struct Request {
    captions: Vec<String>,
    narration_audio_url: String,
    audio_duration_ms: u64,
}

#[derive(Debug, Serialize)]
struct Response {
    /// `None` when alignment is disabled or the narration could not be
    /// transcribed.
    alignment: Option<AlignmentResult>,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let context =
        gt_app::create_app_context::<AppContext, Config>().await?;

    tracing::info!(
        "Caption alignment enabled: {}",
        context.aligner.is_enabled()
    );

    lambda_runtime::run(service_fn(|event| {
        let context = context.clone();
        async move { handler(event, context).await }
    }))
    .await
}

async fn handler(
    event: LambdaEvent<Request>,
    context: AppContext,
) -> Result<Response, Error> {
    let request = event.payload;

    if request.audio_duration_ms == 0 {
        return Err("audio_duration_ms must be greater than zero".into());
    }

    if !context.aligner.is_enabled() {
        return Ok(Response { alignment: None });
    }

    tracing::info!(
        "Aligning {} captions against {}",
        request.captions.len(),
        request.narration_audio_url
    );

    let alignment = context
        .aligner
        .align_captions(
            &request.captions,
            &request.narration_audio_url,
            request.audio_duration_ms,
        )
        .await;

    Ok(Response { alignment })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_deserialize() {
        let request: Request = serde_json::from_value(json!({
            "captions": ["Hello world", "Goodbye now"],
            "narration_audio_url": "https://cdn.example.com/card-1.mp3",
            "audio_duration_ms": 2000,
        }))
        .unwrap();

        assert_eq!(request.captions.len(), 2);
        assert_eq!(request.audio_duration_ms, 2000);
    }

    #[test]
    fn test_config_flattens_alignment_settings() {
        let config: Config = serde_json::from_value(json!({
            "openai_secret_arn": "arn:aws:secretsmanager:openai",
            "caption_alignment_enabled": true,
            "transcription_language": "en",
        }))
        .unwrap();

        assert!(config.alignment.enabled);
        assert_eq!(config.alignment.openai_model, "whisper-1");
        assert_eq!(
            config.alignment.transcription_language.as_deref(),
            Some("en")
        );
    }

    #[test]
    fn test_unavailable_response_serializes_null() {
        assert_eq!(
            serde_json::to_value(Response { alignment: None }).unwrap(),
            json!({ "alignment": null })
        );
    }
}
