//! Storage layer for forms and submissions.
//!
//! This module provides SQLite-based CRUD over the two record types the
//! application persists. Identifiers come from SQLite `AUTOINCREMENT`, so
//! they stay monotonic and are never reused after deletion. Submissions are
//! intentionally not cascade-deleted with their form; orphaned submissions
//! are an accepted state.

mod sqlite;

pub use sqlite::SqliteStorage;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StorageResult;

/// Default model for forms that do not specify one.
pub const DEFAULT_AI_MODEL: &str = "gpt-4o-mini";

/// Default tone for forms that do not specify one.
pub const DEFAULT_AI_TONE: &str = "professional and friendly";

/// A reusable definition of an AI-driven interview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Form {
    /// Unique identifier, assigned once, never reused.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Interview goal, used verbatim in the system prompt.
    pub goal: String,
    /// Model identifier passed to the completion provider.
    pub ai_model: String,
    /// Tone injected into the system prompt.
    pub ai_tone: String,
    /// When the form was created. Set at insert, immutable.
    pub created_at: DateTime<Utc>,
}

/// Field values for creating or updating a form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewForm {
    /// Display name.
    pub name: String,
    /// Interview goal.
    pub goal: String,
    /// Model identifier.
    pub ai_model: String,
    /// Prompt tone.
    pub ai_tone: String,
}

impl NewForm {
    /// Create form values with the default model and tone
    pub fn new(name: impl Into<String>, goal: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            goal: goal.into(),
            ai_model: DEFAULT_AI_MODEL.to_string(),
            ai_tone: DEFAULT_AI_TONE.to_string(),
        }
    }

    /// Set the model
    pub fn with_model(mut self, ai_model: impl Into<String>) -> Self {
        self.ai_model = ai_model.into();
        self
    }

    /// Set the tone
    pub fn with_tone(mut self, ai_tone: impl Into<String>) -> Self {
        self.ai_tone = ai_tone.into();
        self
    }
}

/// The persisted outcome of one completed interview against a form.
///
/// Created exactly once at interview completion, never mutated, never
/// deleted through any exposed operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    /// Unique identifier.
    pub id: i64,
    /// Owning form. Not enforced: the form may have been deleted since.
    pub form_id: i64,
    /// Summary derived from the interview transcript.
    pub summary: String,
    /// When the submission was created.
    pub created_at: DateTime<Utc>,
}

/// Storage trait for database operations.
///
/// Every write is flushed before the call returns; concurrent writers are
/// not coordinated beyond row-level atomicity.
#[async_trait]
pub trait Storage: Send + Sync {
    // Form operations

    /// Create a new form. The identifier and creation time are assigned here.
    async fn create_form(&self, new_form: &NewForm) -> StorageResult<Form>;
    /// Get a form by id.
    async fn get_form(&self, id: i64) -> StorageResult<Option<Form>>;
    /// List all forms in insertion order.
    async fn list_forms(&self) -> StorageResult<Vec<Form>>;
    /// Replace a form's fields. Returns the updated form, or `None` if the
    /// id is unknown.
    async fn update_form(&self, id: i64, new_form: &NewForm) -> StorageResult<Option<Form>>;
    /// Delete a form by id. Returns whether a row existed and was removed.
    /// Submissions referencing the form are left in place.
    async fn delete_form(&self, id: i64) -> StorageResult<bool>;

    // Submission operations

    /// Persist a completed interview summary for a form.
    async fn create_submission(&self, form_id: i64, summary: &str) -> StorageResult<Submission>;
    /// List submissions for a form in creation order. Unknown form ids yield
    /// an empty list, not an error.
    async fn list_submissions_by_form(&self, form_id: i64) -> StorageResult<Vec<Submission>>;
}
