use thiserror::Error;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed configuration.
    #[error("Configuration error: {message}")]
    Config {
        /// What was wrong.
        message: String,
    },

    /// Failure in the storage layer.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Failure talking to the completion provider.
    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),

    /// A required input field was missing or empty.
    #[error("Validation failed: {field} - {reason}")]
    Validation {
        /// The offending field.
        field: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Anything that does not fit the other variants.
    #[error("Internal error: {message}")]
    Internal {
        /// Human-readable detail.
        message: String,
    },
}

/// Storage layer errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Could not open or create the database.
    #[error("Database connection failed: {message}")]
    Connection {
        /// Driver-level detail.
        message: String,
    },

    /// A query failed to execute.
    #[error("Query failed: {message}")]
    Query {
        /// Driver-level detail.
        message: String,
    },

    /// Schema migration failed.
    #[error("Migration failed: {message}")]
    Migration {
        /// Driver-level detail.
        message: String,
    },

    /// Any other SQLx failure.
    #[error("SQLx error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Completion provider errors
#[derive(Debug, Error)]
pub enum CompletionError {
    /// No API key was configured.
    #[error("OpenAI API key is not configured")]
    MissingApiKey,

    /// Non-success status from the provider.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code returned by the provider.
        status: u16,
        /// Provider error body.
        message: String,
    },

    /// The provider replied with a body we could not use.
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// What failed to parse.
        message: String,
    },

    /// The provider did not answer within the timeout.
    #[error("Request timeout after {timeout_ms}ms")]
    Timeout {
        /// Configured timeout in milliseconds.
        timeout_ms: u64,
    },

    /// Lower-level transport failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Result type alias for completion operations
pub type CompletionResult<T> = Result<T, CompletionError>;
