//! Interview engine: the transcript-driven progression state machine.
//!
//! The engine is stateless between calls. Each invocation of
//! [`InterviewEngine::advance`] receives the form and the full transcript so
//! far, asks the language model for the next move, and classifies the reply
//! as either another question or the end of the interview. On termination it
//! derives a summary, persists a submission, and fires a best-effort email
//! notification.
//!
//! Per interview the states are `AwaitingFirstQuestion` (empty transcript) →
//! `InProgress` → `Completed`; the first two are indistinguishable to the
//! engine except by transcript length and route through identical logic.
//! Calling `advance` again after a `Completed` result is undefined behavior:
//! the engine cannot tell a finished interview from an ongoing one.

mod engine;
mod termination;

pub use engine::InterviewEngine;
pub use termination::{goal_reached, summarize};

use serde::{Deserialize, Serialize};

use crate::storage::Submission;

/// One exchanged message in an interview transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    /// Who authored the turn.
    pub role: TurnRole,
    /// The question or answer text.
    pub content: String,
}

/// Author of a transcript turn.
///
/// Transcripts only ever contain the two conversational roles; the system
/// instruction is prepended by the engine and never part of the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    /// The respondent.
    User,
    /// The interviewer (the model).
    Assistant,
}

impl std::fmt::Display for TurnRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnRole::User => write!(f, "user"),
            TurnRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl std::str::FromStr for TurnRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(TurnRole::User),
            "assistant" => Ok(TurnRole::Assistant),
            _ => Err(format!("Unknown turn role: {}", s)),
        }
    }
}

impl Turn {
    /// Create a respondent turn
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
        }
    }

    /// Create an interviewer turn
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            content: content.into(),
        }
    }
}

/// Outcome of one interview step.
#[derive(Debug, Clone, PartialEq)]
pub enum InterviewResult {
    /// The interview goes on; ask the respondent this question next.
    Continue {
        /// The model's question, trimmed but otherwise verbatim.
        next_question: String,
    },
    /// The goal is satisfied and the interview is closed.
    Completed {
        /// Fixed human-readable closing message for the respondent.
        message: String,
        /// The submission that was persisted.
        submission: Submission,
    },
}
