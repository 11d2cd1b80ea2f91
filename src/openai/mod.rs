//! OpenAI chat-completions client.
//!
//! A stateless request/response bridge: one prompt in, raw completion text
//! out. Transport faults, timeouts, and non-success statuses surface as
//! [`crate::error::CompletionError`] values; nothing is retried here.

mod client;
mod types;


pub use client::OpenAiClient;
pub use types::{ChatRequest, ChatResponse, Message, MessageRole};
