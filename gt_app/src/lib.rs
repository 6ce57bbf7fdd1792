use aws_config::{BehaviorVersion, meta::region::RegionProviderChain};
use figment::{Figment, providers::Env};
use serde::Deserialize;

pub trait ContextProvider<Config> {
    fn new(
        config: Config,
        aws_config: aws_config::SdkConfig,
    ) -> impl Future<Output = Result<Self, lambda_runtime::Error>>
    where
        Self: Sized;
}

/// Install the JSON log subscriber used by every Lambda in the workspace.
///
/// The level is controlled with `RUST_LOG`.
pub fn init_logging() {
    // https://docs.aws.amazon.com/lambda/latest/dg/rust-logging.html
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        // the span is already part of each event
        .with_current_span(false)
        // CloudWatch does not render ANSI colors
        .with_ansi(false)
        // CloudWatch adds the ingestion time
        .without_time()
        .with_target(false)
        .init();
}

/// Extract a configuration struct from the process environment.
///
/// Variable names are matched case-insensitively against the struct's
/// field names, so `CAPTION_ALIGNMENT_ENABLED` fills
/// `caption_alignment_enabled`.
///
/// # Errors
/// If a required variable is missing or a value cannot be parsed into the
/// field's type.
pub fn load_config<Config: for<'de> Deserialize<'de>>()
-> Result<Config, figment::Error> {
    Figment::new().merge(Env::raw()).extract()
}

/// Initialize logging, configuration and AWS, then build the application
/// context.
///
/// # Errors
/// If the configuration cannot be extracted from the environment or the
/// context fails to build.
pub async fn create_app_context<A, Config>() -> Result<A, lambda_runtime::Error>
where
    Config: for<'de> Deserialize<'de>,
    A: ContextProvider<Config>,
{
    init_logging();

    let config: Config = load_config()?;

    let region_provider =
        RegionProviderChain::default_provider().or_else("us-east-1");
    let aws_config = aws_config::defaults(BehaviorVersion::latest())
        .region(region_provider)
        .load()
        .await;

    A::new(config, aws_config).await
}
