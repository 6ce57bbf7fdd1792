//! Caption-to-audio alignment.
//!
//! Recovers, for each on-screen caption, the span of the narration audio in
//! which it is spoken, by matching caption words against a speech-to-text
//! transcript with word-level timestamps.

pub mod config;
pub mod contractions;
pub mod engine;
pub mod matcher;
pub mod openai;
pub mod service;
pub mod text;
pub mod transcriber;

pub use config::AlignmentConfig;
pub use engine::align;
pub use openai::OpenAiTranscriber;
pub use service::CaptionAligner;
pub use transcriber::{Transcriber, TranscriptionError};
