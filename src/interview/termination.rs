//! Termination detection and summary derivation.
//!
//! Classifying a free-form model reply has exactly two outcomes: the
//! interview continues, or it is over. The matching strategy lives behind
//! [`goal_reached`] so it can change (regex, structured output, a stop
//! token) without touching the engine's state machine.

use crate::prompts::TERMINATION_MARKER;

use super::Turn;

/// Whether a model reply signals that the interview goal is satisfied.
///
/// Substring match: models pad the marker with pleasantries often enough
/// that exact-match would miss real terminations.
pub fn goal_reached(reply: &str) -> bool {
    reply.contains(TERMINATION_MARKER)
}

/// Derive the submission summary from a transcript.
///
/// Every turn is rendered as `"{role}: {content}"` and joined with
/// newlines. Assistant questions are kept alongside user answers so the
/// summary reads as the full interview, not a bare answer list.
pub fn summarize(transcript: &[Turn]) -> String {
    transcript
        .iter()
        .map(|turn| format!("{}: {}", turn.role, turn.content))
        .collect::<Vec<_>>()
        .join("\n")
}
