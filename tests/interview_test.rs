//! Integration tests for the interview engine
//!
//! Drives the engine against a wiremock completion endpoint and an
//! in-memory SQLite database. Notification stays unconfigured (no-op).

use serde_json::json;
use wiremock::{
    matchers::{body_partial_json, method, path},
    Mock, MockServer, ResponseTemplate,
};

use formflow::config::{EmailConfig, OpenAiConfig, RequestConfig};
use formflow::error::AppError;
use formflow::interview::{InterviewEngine, InterviewResult, Turn};
use formflow::notify::EmailNotifier;
use formflow::openai::OpenAiClient;
use formflow::prompts::{COMPLETION_MESSAGE, TERMINATION_MARKER};
use formflow::storage::{Form, NewForm, SqliteStorage, Storage};

/// Engine wired to a mock completion endpoint and fresh in-memory storage
async fn create_test_engine(base_url: &str) -> (InterviewEngine, SqliteStorage) {
    let storage = SqliteStorage::new_in_memory()
        .await
        .expect("Failed to create in-memory storage");

    let config = OpenAiConfig {
        api_key: "test-api-key".to_string(),
        base_url: base_url.to_string(),
    };
    let client = OpenAiClient::new(&config, RequestConfig { timeout_ms: 5000 })
        .expect("Failed to create client");

    let notifier = EmailNotifier::new(EmailConfig::default());

    (
        InterviewEngine::new(storage.clone(), client, notifier),
        storage,
    )
}

async fn create_test_form(storage: &SqliteStorage) -> Form {
    storage
        .create_form(&NewForm::new(
            "Hiking survey",
            "Learn what respondents enjoy about hiking",
        ))
        .await
        .expect("Failed to create form")
}

fn reply_with(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "choices": [{"message": {"role": "assistant", "content": content}}]
    }))
}

#[cfg(test)]
mod continue_tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_transcript_yields_first_question() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(reply_with("What do you enjoy about hiking?"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let (engine, storage) = create_test_engine(&mock_server.uri()).await;
        let form = create_test_form(&storage).await;

        let result = engine.advance(&form, &[]).await.unwrap();

        assert_eq!(
            result,
            InterviewResult::Continue {
                next_question: "What do you enjoy about hiking?".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_marker_free_reply_is_returned_verbatim_trimmed() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(reply_with("  Which trail was your favorite?  \n"))
            .mount(&mock_server)
            .await;

        let (engine, storage) = create_test_engine(&mock_server.uri()).await;
        let form = create_test_form(&storage).await;

        let transcript = vec![
            Turn::assistant("What do you enjoy about hiking?"),
            Turn::user("The views"),
        ];
        let result = engine.advance(&form, &transcript).await.unwrap();

        match result {
            InterviewResult::Continue { next_question } => {
                assert_eq!(next_question, "Which trail was your favorite?");
            }
            other => panic!("Expected Continue, got {:?}", other),
        }

        // No submission is persisted while the interview continues
        let submissions = storage.list_submissions_by_form(form.id).await.unwrap();
        assert!(submissions.is_empty());
    }

    #[tokio::test]
    async fn test_prompt_interpolates_goal_and_tone() {
        let mock_server = MockServer::start().await;

        // The system message must carry the form's goal verbatim
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_partial_json(json!({
                "messages": [{
                    "role": "system",
                    "content": formflow::prompts::build_interviewer_prompt(
                        "Learn what respondents enjoy about hiking",
                        "professional and friendly",
                    )
                }]
            })))
            .respond_with(reply_with("First question?"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let (engine, storage) = create_test_engine(&mock_server.uri()).await;
        let form = create_test_form(&storage).await;

        let result = engine.advance(&form, &[]).await;
        assert!(result.is_ok());
    }
}

#[cfg(test)]
mod completion_tests {
    use super::*;

    #[tokio::test]
    async fn test_marker_reply_completes_and_persists_submission() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(reply_with(TERMINATION_MARKER))
            .mount(&mock_server)
            .await;

        let (engine, storage) = create_test_engine(&mock_server.uri()).await;
        let form = create_test_form(&storage).await;

        let transcript = vec![Turn::user("I like hiking")];
        let result = engine.advance(&form, &transcript).await.unwrap();

        match &result {
            InterviewResult::Completed {
                message,
                submission,
            } => {
                assert_eq!(message, COMPLETION_MESSAGE);
                assert_eq!(submission.form_id, form.id);
                // Summary policy pinned: every turn as "{role}: {content}"
                assert_eq!(submission.summary, "user: I like hiking");
            }
            other => panic!("Expected Completed, got {:?}", other),
        }

        // Exactly one submission was created
        let submissions = storage.list_submissions_by_form(form.id).await.unwrap();
        assert_eq!(submissions.len(), 1);
        assert_eq!(submissions[0].summary, "user: I like hiking");
    }

    #[tokio::test]
    async fn test_marker_embedded_in_pleasantries_still_completes() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(reply_with(&format!(
                "Thanks, that is all I needed! {TERMINATION_MARKER}"
            )))
            .mount(&mock_server)
            .await;

        let (engine, storage) = create_test_engine(&mock_server.uri()).await;
        let form = create_test_form(&storage).await;

        let result = engine
            .advance(&form, &[Turn::user("Done now")])
            .await
            .unwrap();

        assert!(matches!(result, InterviewResult::Completed { .. }));
    }

    #[tokio::test]
    async fn test_completed_summary_spans_full_transcript() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(reply_with(TERMINATION_MARKER))
            .mount(&mock_server)
            .await;

        let (engine, storage) = create_test_engine(&mock_server.uri()).await;
        let form = create_test_form(&storage).await;

        let transcript = vec![
            Turn::assistant("What do you enjoy about hiking?"),
            Turn::user("The quiet"),
            Turn::assistant("Where do you usually go?"),
            Turn::user("The coastal path"),
        ];
        let result = engine.advance(&form, &transcript).await.unwrap();

        match result {
            InterviewResult::Completed { submission, .. } => {
                assert_eq!(
                    submission.summary,
                    "assistant: What do you enjoy about hiking?\n\
                     user: The quiet\n\
                     assistant: Where do you usually go?\n\
                     user: The coastal path"
                );
            }
            other => panic!("Expected Completed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_raw_model_text_is_not_shown_to_respondent() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(reply_with(&format!("{TERMINATION_MARKER} see you!")))
            .mount(&mock_server)
            .await;

        let (engine, storage) = create_test_engine(&mock_server.uri()).await;
        let form = create_test_form(&storage).await;

        let result = engine
            .advance(&form, &[Turn::user("bye")])
            .await
            .unwrap();

        match result {
            InterviewResult::Completed { message, .. } => {
                assert!(!message.contains(TERMINATION_MARKER));
                assert_eq!(message, COMPLETION_MESSAGE);
            }
            other => panic!("Expected Completed, got {:?}", other),
        }
    }
}

#[cfg(test)]
mod failure_tests {
    use super::*;

    #[tokio::test]
    async fn test_upstream_error_surfaces_and_persists_nothing() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "error": {"message": "Internal server error"}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let (engine, storage) = create_test_engine(&mock_server.uri()).await;
        let form = create_test_form(&storage).await;

        let result = engine.advance(&form, &[Turn::user("hello")]).await;

        assert!(matches!(result, Err(AppError::Completion(_))));

        let submissions = storage.list_submissions_by_form(form.id).await.unwrap();
        assert!(submissions.is_empty());
    }

    #[tokio::test]
    async fn test_empty_turn_content_is_rejected_before_any_call() {
        let mock_server = MockServer::start().await;
        // No mock mounted: a request would 404 and fail differently

        let (engine, storage) = create_test_engine(&mock_server.uri()).await;
        let form = create_test_form(&storage).await;

        let transcript = vec![Turn::user("fine"), Turn::assistant("   ")];
        let result = engine.advance(&form, &transcript).await;

        match result {
            Err(AppError::Validation { field, .. }) => {
                assert_eq!(field, "history[1].content");
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }
}
