use serde::{Deserialize, Serialize};

/// Message in a chat conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Who authored the message.
    pub role: MessageRole,
    /// Message text.
    pub content: String,
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Instructions to the model.
    System,
    /// Respondent input.
    User,
    /// Model output.
    Assistant,
}

/// Request body for the chat completions endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model identifier, e.g. `gpt-4o-mini`.
    pub model: String,
    /// Full conversation, system instruction first.
    pub messages: Vec<Message>,
    /// Upper bound on completion length.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f64,
}

/// Response body from the chat completions endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Candidate completions; the first one is used.
    pub choices: Vec<Choice>,
    /// Token accounting, when the provider reports it.
    pub usage: Option<Usage>,
}

/// A single completion candidate
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    /// The generated message.
    pub message: ChoiceMessage,
}

/// Message payload inside a completion choice
#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    /// Generated text; absent for tool-call style replies.
    pub content: Option<String>,
}

/// Token usage information
#[derive(Debug, Clone, Deserialize)]
pub struct Usage {
    /// Tokens consumed by the prompt.
    pub prompt_tokens: Option<u32>,
    /// Tokens generated.
    pub completion_tokens: Option<u32>,
    /// Sum of the two.
    pub total_tokens: Option<u32>,
}

impl Message {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

impl ChatRequest {
    /// Create a new completion request
    pub fn new(
        model: impl Into<String>,
        messages: Vec<Message>,
        max_tokens: u32,
        temperature: f64,
    ) -> Self {
        Self {
            model: model.into(),
            messages,
            max_tokens,
            temperature,
        }
    }
}

impl ChatResponse {
    /// Text of the first completion choice, if any
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
    }
}
