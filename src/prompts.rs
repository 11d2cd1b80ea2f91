//! Interviewer prompt policy.
//!
//! Everything the language model is told about how to run an interview lives
//! here: the system instruction template, the termination marker it must emit
//! when the form's goal is satisfied, and the sampling settings that keep its
//! output short and stable. The interview engine treats this module as the
//! single source of truth for prompt wording.

/// Token the model is instructed to emit once the form's goal is satisfied.
///
/// Detection is a plain substring match (see [`crate::interview`]); the
/// marker is chosen to be unlikely to occur in a genuine question.
pub const TERMINATION_MARKER: &str = "CONVERSATION_END";

/// Fixed message returned to the respondent when the interview closes.
///
/// The raw model output that triggered termination is never shown.
pub const COMPLETION_MESSAGE: &str = "Thank you for your time! The conversation is now complete.";

/// Upper bound on the length of a generated question.
///
/// Questions are one short sentence; the cap also keeps a termination turn
/// from burying the marker in filler text.
pub const MAX_QUESTION_TOKENS: u32 = 60;

/// Sampling temperature for question generation.
///
/// Low but non-zero: deterministic-leaning phrasing that can still adapt
/// wording to the respondent's answers.
pub const QUESTION_TEMPERATURE: f64 = 0.4;

/// Build the system instruction for an interview.
///
/// Interpolates the form's goal and tone into the fixed interviewer policy:
/// one short, grammatically clean question per turn; follow-ups informed by
/// prior answers; the termination marker instead of a question once the goal
/// has been addressed.
pub fn build_interviewer_prompt(goal: &str, tone: &str) -> String {
    format!(
        "You are a flawless AI interviewer. Your goal is to: {goal}.\n\
         Your instructions are strict:\n\
         1. Ask only one, very short, and clear question at a time.\n\
         2. Your English must be absolutely perfect. Double-check for any typos or grammatical errors before responding.\n\
         3. Analyze previous answers to ask relevant follow-up questions.\n\
         4. When the goal is met, you MUST end the conversation by saying '{TERMINATION_MARKER}'.\n\
         Your tone should be: {tone}."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_goal_and_tone() {
        let prompt = build_interviewer_prompt("collect newsletter feedback", "warm and curious");
        assert!(prompt.contains("collect newsletter feedback"));
        assert!(prompt.contains("warm and curious"));
    }

    #[test]
    fn test_prompt_instructs_termination_marker() {
        let prompt = build_interviewer_prompt("any goal", "any tone");
        assert!(prompt.contains(TERMINATION_MARKER));
    }

    #[test]
    fn test_prompt_asks_one_question_at_a_time() {
        let prompt = build_interviewer_prompt("any goal", "any tone");
        assert!(prompt.contains("one, very short, and clear question"));
    }

    #[test]
    fn test_completion_message_does_not_leak_marker() {
        assert!(!COMPLETION_MESSAGE.contains(TERMINATION_MARKER));
    }
}
