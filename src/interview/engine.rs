use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::notify::EmailNotifier;
use crate::openai::{Message, OpenAiClient};
use crate::prompts::{
    build_interviewer_prompt, COMPLETION_MESSAGE, MAX_QUESTION_TOKENS, QUESTION_TEMPERATURE,
};
use crate::storage::{Form, SqliteStorage, Storage};

use super::{termination, InterviewResult, Turn, TurnRole};

/// Drives interviews: one model call per step, termination on marker.
#[derive(Clone)]
pub struct InterviewEngine {
    storage: SqliteStorage,
    client: OpenAiClient,
    notifier: EmailNotifier,
}

impl InterviewEngine {
    /// Create a new interview engine
    pub fn new(storage: SqliteStorage, client: OpenAiClient, notifier: EmailNotifier) -> Self {
        Self {
            storage,
            client,
            notifier,
        }
    }

    /// Advance an interview by one step.
    ///
    /// The caller supplies the form (already resolved) and the full
    /// transcript so far; an empty transcript requests the opening
    /// question. The reply is classified by
    /// [`termination::goal_reached`]: a marker-free reply becomes the next
    /// question verbatim, a marker-bearing reply closes the interview,
    /// persists a submission, and triggers a best-effort notification.
    ///
    /// Upstream provider failures surface as
    /// [`AppError::Completion`]; nothing is retried. Notification failures
    /// are logged and swallowed.
    pub async fn advance(&self, form: &Form, transcript: &[Turn]) -> AppResult<InterviewResult> {
        // Validate input
        for (index, turn) in transcript.iter().enumerate() {
            if turn.content.trim().is_empty() {
                return Err(AppError::Validation {
                    field: format!("history[{}].content", index),
                    reason: "Turn content cannot be empty".to_string(),
                });
            }
        }

        debug!(
            form_id = form.id,
            turns = transcript.len(),
            "Advancing interview"
        );

        let messages = self.build_messages(form, transcript);

        let raw = self
            .client
            .complete(
                &form.ai_model,
                messages,
                MAX_QUESTION_TOKENS,
                QUESTION_TEMPERATURE,
            )
            .await?;

        let reply = raw.trim();

        if !termination::goal_reached(reply) {
            return Ok(InterviewResult::Continue {
                next_question: reply.to_string(),
            });
        }

        let summary = termination::summarize(transcript);
        let submission = self.storage.create_submission(form.id, &summary).await?;

        info!(
            form_id = form.id,
            submission_id = submission.id,
            turns = transcript.len(),
            "Interview completed"
        );

        // Best effort: a lost email never fails the interview
        self.notifier
            .notify(
                &format!("Conversation Summary for Form ID {}: {}", form.id, form.name),
                &summary,
            )
            .await;

        Ok(InterviewResult::Completed {
            message: COMPLETION_MESSAGE.to_string(),
            submission,
        })
    }

    /// Build the full prompt: system instruction followed by the transcript
    fn build_messages(&self, form: &Form, transcript: &[Turn]) -> Vec<Message> {
        let mut messages = Vec::with_capacity(transcript.len() + 1);

        messages.push(Message::system(build_interviewer_prompt(
            &form.goal,
            &form.ai_tone,
        )));

        for turn in transcript {
            messages.push(match turn.role {
                TurnRole::User => Message::user(turn.content.clone()),
                TurnRole::Assistant => Message::assistant(turn.content.clone()),
            });
        }

        messages
    }
}
