use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::interview::{InterviewResult, Turn};
use crate::storage::{Form, NewForm, Storage, Submission};

use super::error::ApiError;
use super::SharedState;

/// Liveness message.
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "FormFlow backend is running with AI, email, and database capabilities."
    }))
}

/// Request body for creating or updating a form.
#[derive(Debug, Deserialize)]
pub struct FormPayload {
    /// Display name; required.
    pub name: Option<String>,
    /// Interview goal; required.
    pub goal: Option<String>,
    /// Model identifier; defaults when omitted.
    pub ai_model: Option<String>,
    /// Prompt tone; defaults when omitted.
    pub ai_tone: Option<String>,
}

impl FormPayload {
    /// Validate required fields and apply defaults
    fn into_new_form(self) -> Result<NewForm, ApiError> {
        let name = self
            .name
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ApiError::Validation("name and goal are required".to_string()))?;
        let goal = self
            .goal
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ApiError::Validation("name and goal are required".to_string()))?;

        let mut new_form = NewForm::new(name, goal);
        if let Some(ai_model) = self.ai_model {
            new_form = new_form.with_model(ai_model);
        }
        if let Some(ai_tone) = self.ai_tone {
            new_form = new_form.with_tone(ai_tone);
        }

        Ok(new_form)
    }
}

/// `POST /forms` — create a form.
pub async fn create_form(
    State(state): State<SharedState>,
    Json(payload): Json<FormPayload>,
) -> Result<(StatusCode, Json<Form>), ApiError> {
    let new_form = payload.into_new_form()?;
    let form = state.storage.create_form(&new_form).await?;

    info!(form_id = form.id, name = %form.name, "Form created");

    Ok((StatusCode::CREATED, Json(form)))
}

/// `GET /forms` — list all forms in insertion order.
pub async fn list_forms(State(state): State<SharedState>) -> Result<Json<Vec<Form>>, ApiError> {
    let forms = state.storage.list_forms().await?;
    Ok(Json(forms))
}

/// `GET /forms/{id}` — fetch one form.
pub async fn get_form(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Form>, ApiError> {
    let form = state
        .storage
        .get_form(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Form not found".to_string()))?;

    Ok(Json(form))
}

/// `PUT /forms/{id}` — replace a form's fields.
pub async fn update_form(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(payload): Json<FormPayload>,
) -> Result<Json<Form>, ApiError> {
    let new_form = payload.into_new_form()?;
    let form = state
        .storage
        .update_form(id, &new_form)
        .await?
        .ok_or_else(|| ApiError::NotFound("Form not found".to_string()))?;

    info!(form_id = form.id, "Form updated");

    Ok(Json(form))
}

/// `DELETE /forms/{id}` — delete a form. Submissions are left in place.
pub async fn delete_form(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let deleted = state.storage.delete_form(id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Form not found".to_string()));
    }

    info!(form_id = id, "Form deleted");

    Ok(Json(json!({ "message": "Form deleted successfully" })))
}

/// `GET /forms/{id}/submissions` — submissions for a form, creation order.
///
/// An unknown form id yields an empty list, not a 404.
pub async fn list_form_submissions(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Submission>>, ApiError> {
    let submissions = state.storage.list_submissions_by_form(id).await?;
    Ok(Json(submissions))
}

/// Request body for one interview step.
#[derive(Debug, Deserialize)]
pub struct GenerateQuestionPayload {
    /// The form being interviewed against; required.
    pub form_id: Option<i64>,
    /// Full transcript so far; required, may be empty.
    pub history: Option<Vec<Turn>>,
}

/// `POST /generate_question` — advance an interview by one step.
///
/// Returns `{ "next_question": ... }` whether the interview continues or
/// completes; on completion the fixed closing message is returned and the
/// submission has already been persisted.
pub async fn generate_question(
    State(state): State<SharedState>,
    Json(payload): Json<GenerateQuestionPayload>,
) -> Result<Json<Value>, ApiError> {
    let form_id = payload
        .form_id
        .ok_or_else(|| ApiError::Validation("form_id and history are required".to_string()))?;
    let history = payload
        .history
        .ok_or_else(|| ApiError::Validation("form_id and history are required".to_string()))?;

    let form = state
        .storage
        .get_form(form_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Form not found".to_string()))?;

    let result = state.engine.advance(&form, &history).await?;

    let next_question = match result {
        InterviewResult::Continue { next_question } => next_question,
        InterviewResult::Completed { message, .. } => message,
    };

    Ok(Json(json!({ "next_question": next_question })))
}
