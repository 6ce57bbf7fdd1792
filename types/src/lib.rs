// Shared wire types for the caption alignment services.
//
// Every type here is created fresh per alignment request and is immutable
// once handed back to the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Version of the caption timing schema and the algorithm that produced
/// it. Stored alongside every timing so callers can tell stale timings
/// apart.
pub const TIMING_VERSION: u32 = 1;

/// Word-level timestamped output of a speech-to-text call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub provider: String,

    pub model: String,

    pub created_at: DateTime<Utc>,

    /// Ordered by index. Providers do not guarantee that one word ends
    /// before the next one starts.
    pub words: Vec<AlignedWord>,

    /// Coarse segments, kept for display only.
    #[serde(default)]
    pub segments: Vec<TranscriptSegment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignedWord {
    pub text: String,

    pub start_ms: u64,

    pub end_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub text: String,

    pub start_ms: u64,

    pub end_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingSource {
    /// Derived from matched transcript words.
    Whisper,

    /// Proportional share of the total audio duration.
    Heuristic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentMethod {
    Word,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionTiming {
    pub start_ms: u64,

    pub end_ms: u64,

    pub timing_source: TimingSource,

    pub timing_version: u32,

    /// Fraction of caption tokens matched, in `[0, 1]`. Absent only when
    /// no match was attempted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_score: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment_method: Option<AlignmentMethod>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentStatus {
    Complete,

    Partial,

    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentResult {
    /// One entry per input caption, in input order.
    pub timings: Vec<CaptionTiming>,

    pub transcript: Transcript,

    pub status: AlignmentStatus,

    pub aligned_count: usize,

    pub total_count: usize,
}

impl CaptionTiming {
    pub const fn whisper(start_ms: u64, end_ms: u64, match_score: f64) -> Self {
        Self {
            start_ms,
            end_ms,
            timing_source: TimingSource::Whisper,
            timing_version: TIMING_VERSION,
            match_score: Some(match_score),
            alignment_method: Some(AlignmentMethod::Word),
        }
    }

    pub const fn heuristic(
        start_ms: u64,
        end_ms: u64,
        match_score: Option<f64>,
    ) -> Self {
        Self {
            start_ms,
            end_ms,
            timing_source: TimingSource::Heuristic,
            timing_version: TIMING_VERSION,
            match_score,
            alignment_method: None,
        }
    }
}
