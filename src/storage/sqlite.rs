use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::info;

use super::{Form, NewForm, Storage, Submission};
use crate::config::DatabaseConfig;
use crate::error::{StorageError, StorageResult};

/// Static migrator that embeds migrations at compile time
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// SQLite-backed storage implementation
#[derive(Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Create a new SQLite storage instance
    pub async fn new(config: &DatabaseConfig) -> StorageResult<Self> {
        // Ensure parent directory exists
        if let Some(parent) = config.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::Connection {
                message: format!("Failed to create database directory: {}", e),
            })?;
        }

        let database_url = format!("sqlite://{}?mode=rwc", config.path.display());

        let options = SqliteConnectOptions::from_str(&database_url)
            .map_err(|e| StorageError::Connection {
                message: format!("Invalid database URL: {}", e),
            })?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await
            .map_err(|e| StorageError::Connection {
                message: format!("Failed to connect to database: {}", e),
            })?;

        let storage = Self { pool };
        storage.run_migrations().await?;

        Ok(storage)
    }

    /// Create an in-memory storage instance for testing
    pub async fn new_in_memory() -> StorageResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:").map_err(|e| {
            StorageError::Connection {
                message: format!("Invalid database URL: {}", e),
            }
        })?;

        // A single connection keeps every query on the same in-memory database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| StorageError::Connection {
                message: format!("Failed to connect to database: {}", e),
            })?;

        let storage = Self { pool };
        storage.run_migrations().await?;

        Ok(storage)
    }

    /// Run database migrations using embedded sqlx migrations
    async fn run_migrations(&self) -> StorageResult<()> {
        info!("Running database migrations...");

        MIGRATOR
            .run(&self.pool)
            .await
            .map_err(|e| StorageError::Migration {
                message: format!("Failed to run migrations: {}", e),
            })?;

        info!("Database migrations completed successfully");
        Ok(())
    }

    /// Get the underlying pool for advanced queries
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl Storage for SqliteStorage {
    async fn create_form(&self, new_form: &NewForm) -> StorageResult<Form> {
        let created_at = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO forms (name, goal, ai_model, ai_tone, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&new_form.name)
        .bind(&new_form.goal)
        .bind(&new_form.ai_model)
        .bind(&new_form.ai_tone)
        .bind(created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(Form {
            id: result.last_insert_rowid(),
            name: new_form.name.clone(),
            goal: new_form.goal.clone(),
            ai_model: new_form.ai_model.clone(),
            ai_tone: new_form.ai_tone.clone(),
            created_at,
        })
    }

    async fn get_form(&self, id: i64) -> StorageResult<Option<Form>> {
        let row: Option<FormRow> = sqlx::query_as(
            r#"
            SELECT id, name, goal, ai_model, ai_tone, created_at
            FROM forms
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into()))
    }

    async fn list_forms(&self) -> StorageResult<Vec<Form>> {
        let rows: Vec<FormRow> = sqlx::query_as(
            r#"
            SELECT id, name, goal, ai_model, ai_tone, created_at
            FROM forms
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn update_form(&self, id: i64, new_form: &NewForm) -> StorageResult<Option<Form>> {
        let result = sqlx::query(
            r#"
            UPDATE forms
            SET name = ?, goal = ?, ai_model = ?, ai_tone = ?
            WHERE id = ?
            "#,
        )
        .bind(&new_form.name)
        .bind(&new_form.goal)
        .bind(&new_form.ai_model)
        .bind(&new_form.ai_tone)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_form(id).await
    }

    async fn delete_form(&self, id: i64) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM forms WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn create_submission(&self, form_id: i64, summary: &str) -> StorageResult<Submission> {
        let created_at = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO submissions (form_id, summary, created_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(form_id)
        .bind(summary)
        .bind(created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(Submission {
            id: result.last_insert_rowid(),
            form_id,
            summary: summary.to_string(),
            created_at,
        })
    }

    async fn list_submissions_by_form(&self, form_id: i64) -> StorageResult<Vec<Submission>> {
        let rows: Vec<SubmissionRow> = sqlx::query_as(
            r#"
            SELECT id, form_id, summary, created_at
            FROM submissions
            WHERE form_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(form_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }
}

// Internal row types for SQLx mapping

#[derive(sqlx::FromRow)]
struct FormRow {
    id: i64,
    name: String,
    goal: String,
    ai_model: String,
    ai_tone: String,
    created_at: String,
}

impl From<FormRow> for Form {
    fn from(row: FormRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            goal: row.goal,
            ai_model: row.ai_model,
            ai_tone: row.ai_tone,
            created_at: parse_timestamp(&row.created_at),
        }
    }
}

#[derive(sqlx::FromRow)]
struct SubmissionRow {
    id: i64,
    form_id: i64,
    summary: String,
    created_at: String,
}

impl From<SubmissionRow> for Submission {
    fn from(row: SubmissionRow) -> Self {
        Self {
            id: row.id,
            form_id: row.form_id,
            summary: row.summary,
            created_at: parse_timestamp(&row.created_at),
        }
    }
}

fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}
