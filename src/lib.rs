//! # FormFlow
//!
//! A conversational form-builder backend. Administrators define forms (a
//! goal, an AI model, a tone); respondents answer a chat-style interview
//! driven by a language model that asks one question at a time until the
//! form's goal is satisfied. Completed interviews are persisted as
//! submissions and optionally emailed to an administrator.
//!
//! ## Architecture
//!
//! ```text
//! Browser → HTTP API (axum) → Interview Engine → OpenAI Chat Completions (HTTP)
//!                  ↓                  ↓
//!              SQLite (forms)    SQLite (submissions) + SMTP (best effort)
//! ```
//!
//! The interview engine is stateless: the caller supplies the full
//! transcript on every call and the engine decides whether to ask another
//! question or close the interview.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use formflow::config::Config;
//! use formflow::interview::InterviewEngine;
//! use formflow::notify::EmailNotifier;
//! use formflow::openai::OpenAiClient;
//! use formflow::server::{create_router, AppState};
//! use formflow::storage::SqliteStorage;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let storage = SqliteStorage::new(&config.database).await?;
//!     let client = OpenAiClient::new(&config.openai, config.request.clone())?;
//!     let notifier = EmailNotifier::new(config.email.clone());
//!     let engine = InterviewEngine::new(storage.clone(), client, notifier);
//!     let state = Arc::new(AppState::new(config, storage, engine));
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;
//!     axum::serve(listener, create_router(state)).await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

/// Configuration management loaded from environment variables.
pub mod config;
/// Error types and result aliases for the application.
pub mod error;
/// Interview engine: the transcript-driven question/completion state machine.
pub mod interview;
/// Best-effort email notification adapter.
pub mod notify;
/// OpenAI chat-completions client and wire types.
pub mod openai;
/// Interviewer prompt template and termination policy constants.
pub mod prompts;
/// HTTP surface: axum router, handlers, and error mapping.
pub mod server;
/// SQLite storage layer for forms and submissions.
pub mod storage;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use server::{AppState, SharedState};
