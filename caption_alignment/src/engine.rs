/// This module aligns human-written captions against a word-level
/// transcript of the narration they accompany.
///
/// The search is greedy. A single pointer moves forward through the
/// transcript, and each caption only looks at a bounded window of start
/// positions after it. Captions are assumed to be spoken in the order
/// they are listed, so no reordering is attempted.
use types::{AlignmentResult, AlignmentStatus, CaptionTiming, Transcript};

use crate::contractions::expand_contractions;
use crate::matcher::{is_filler, normalized_tokens_match};
use crate::text::{normalize, tokenize};

/// Minimum fraction of caption tokens that must match for the caption to
/// take its timing from the transcript.
pub const ACCEPT_SCORE: f64 = 0.75;

/// A candidate at or above this score ends the window scan early.
const EARLY_EXIT_SCORE: f64 = 0.9;

/// Transcript words to look past when a caption token does not match the
/// current word.
const LOOKAHEAD_WORDS: usize = 2;

const WINDOW_WORDS_PER_TOKEN: usize = 3;
const WINDOW_SLACK_WORDS: usize = 10;

/// Below this share of aligned captions (in tenths) a run is `Partial`.
const COMPLETE_SHARE_TENTHS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Candidate {
    start: usize,
    last_matched: Option<usize>,
    score: f64,
}

/// Tokenize a caption and expand its contractions.
fn caption_tokens(caption: &str) -> Vec<String> {
    tokenize(caption)
        .iter()
        .flat_map(|token| expand_contractions(token))
        .collect()
}

/// Walk forward from `start`, matching caption tokens in order.
///
/// Filler words are skipped without consuming a token. A token that does
/// not match the current word may match one of the next
/// `LOOKAHEAD_WORDS` words instead. A token that matches nothing is left
/// unmatched and the walk continues from the same word.
fn score_from(start: usize, tokens: &[String], words: &[String]) -> Candidate {
    let mut position = start;
    let mut matched_tokens = 0_usize;
    let mut last_matched = None;

    for token in tokens {
        while position < words.len() && is_filler(&words[position]) {
            position += 1;
        }

        if position >= words.len() {
            break;
        }

        let lookahead_end = words.len().min(position + LOOKAHEAD_WORDS + 1);
        if let Some(found) = (position..lookahead_end)
            .find(|&index| normalized_tokens_match(token, &words[index]))
        {
            matched_tokens += 1;
            last_matched = Some(found);
            position = found + 1;
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let score = matched_tokens as f64 / tokens.len() as f64;

    Candidate {
        start,
        last_matched,
        score,
    }
}

/// Find the best-scoring start position in the window after `pointer`.
///
/// Ties keep the earliest start. Returns `None` when the pointer has run
/// off the end of the transcript.
fn best_candidate(
    tokens: &[String],
    words: &[String],
    pointer: usize,
) -> Option<Candidate> {
    let remaining = words.len().saturating_sub(pointer);
    let window =
        remaining.min(WINDOW_WORDS_PER_TOKEN * tokens.len() + WINDOW_SLACK_WORDS);

    let mut best: Option<Candidate> = None;

    for start in pointer..pointer + window {
        let candidate = score_from(start, tokens, words);

        match best {
            Some(current) if current.score >= candidate.score => {}
            _ => best = Some(candidate),
        }

        if candidate.score >= EARLY_EXIT_SCORE {
            break;
        }
    }

    best
}

/// Even share of the audio for caption `index` out of `total`.
fn heuristic_span(
    index: usize,
    total: usize,
    audio_duration_ms: u64,
) -> (u64, u64) {
    let share = |position: usize| {
        let scaled =
            u128::from(audio_duration_ms) * position as u128 / total as u128;
        u64::try_from(scaled).unwrap_or(audio_duration_ms)
    };

    (share(index), share(index + 1))
}

/// Overall status of a run from the number of captions that took their
/// timing from the transcript.
pub const fn alignment_status(
    aligned_count: usize,
    total_count: usize,
) -> AlignmentStatus {
    if aligned_count == 0 {
        AlignmentStatus::Failed
    } else if aligned_count * 10 < total_count * COMPLETE_SHARE_TENTHS {
        AlignmentStatus::Partial
    } else {
        AlignmentStatus::Complete
    }
}

/// Assign a time span to every caption.
///
/// # Parameters
/// - `captions`: The caption lines, in the order they are spoken.
/// - `transcript`: Word-level transcript of the narration.
/// - `audio_duration_ms`: Length of the narration. Only used for captions
///   that fall back to an even share of the audio.
///
/// # Returns
/// One timing per caption, in caption order, together with the transcript
/// and an overall status. Captions without comparable words get a
/// zero-length heuristic timing. Captions that match less than
/// `ACCEPT_SCORE` of their tokens get an even share of the audio.
///
/// The function is deterministic and does no I/O.
pub fn align<S: AsRef<str>>(
    captions: &[S],
    transcript: Transcript,
    audio_duration_ms: u64,
) -> AlignmentResult {
    let words: Vec<String> = transcript
        .words
        .iter()
        .map(|word| normalize(&word.text))
        .collect();

    let total_count = captions.len();
    let mut timings = Vec::with_capacity(total_count);
    let mut pointer = 0_usize;
    let mut aligned_count = 0_usize;

    for (index, caption) in captions.iter().enumerate() {
        let tokens = caption_tokens(caption.as_ref());

        if tokens.is_empty() {
            tracing::debug!("Caption {} has no comparable words", index);
            timings.push(CaptionTiming::heuristic(0, 0, None));
            continue;
        }

        let best = best_candidate(&tokens, &words, pointer);

        match best {
            Some(Candidate {
                start,
                last_matched: Some(last_matched),
                score,
            }) if score >= ACCEPT_SCORE => {
                let start_ms = transcript.words[start].start_ms;
                let end_ms = transcript.words[last_matched].end_ms.max(start_ms);

                tracing::debug!(
                    "Caption {} matched words {}..={} with score {:.2}",
                    index,
                    start,
                    last_matched,
                    score
                );

                timings.push(CaptionTiming::whisper(start_ms, end_ms, score));
                pointer = last_matched + 1;
                aligned_count += 1;
            }
            _ => {
                let score = best.map_or(0.0, |candidate| candidate.score);
                let (start_ms, end_ms) =
                    heuristic_span(index, total_count, audio_duration_ms);

                tracing::debug!(
                    "Caption {} fell back to heuristic timing (best score {:.2})",
                    index,
                    score
                );

                timings.push(CaptionTiming::heuristic(
                    start_ms,
                    end_ms,
                    Some(score),
                ));
                // one word, so a bad caption cannot stall the ones after it
                pointer += 1;
            }
        }
    }

    AlignmentResult {
        timings,
        transcript,
        status: alignment_status(aligned_count, total_count),
        aligned_count,
        total_count,
    }
}
