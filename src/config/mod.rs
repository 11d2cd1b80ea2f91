use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::AppError;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenAI API credentials and endpoint.
    pub openai: OpenAiConfig,
    /// SQLite database settings.
    pub database: DatabaseConfig,
    /// Email notification settings.
    pub email: EmailConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Outbound HTTP request settings.
    pub request: RequestConfig,
    /// HTTP server settings.
    pub server: ServerConfig,
}

/// OpenAI API configuration
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// Bearer credential for the completions endpoint.
    pub api_key: String,
    /// Base URL of the API, without a trailing slash.
    pub base_url: String,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path of the SQLite database file.
    pub path: PathBuf,
    /// Connection pool size.
    pub max_connections: u32,
}

/// Email notification configuration.
///
/// All four of sender, receiver, password, and smtp_host must be present for
/// delivery to be attempted; otherwise notification is a silent no-op.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// Sender address, also used as the SMTP username.
    pub sender: Option<String>,
    /// Receiver address for interview summaries.
    pub receiver: Option<String>,
    /// SMTP password for the sender account.
    pub password: Option<String>,
    /// SMTP relay hostname.
    pub smtp_host: Option<String>,
    /// SMTP relay port.
    pub smtp_port: u16,
}

impl EmailConfig {
    /// Whether enough configuration is present to attempt delivery.
    pub fn is_complete(&self) -> bool {
        self.sender.is_some()
            && self.receiver.is_some()
            && self.password.is_some()
            && self.smtp_host.is_some()
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Default filter directive when RUST_LOG is not set.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    /// Human-readable console output.
    Pretty,
    /// Line-delimited JSON.
    Json,
}

/// Outbound HTTP request configuration
#[derive(Debug, Clone)]
pub struct RequestConfig {
    /// Timeout for a single completion call, in milliseconds.
    pub timeout_ms: u64,
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the server binds to.
    pub bind_addr: SocketAddr,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let openai = OpenAiConfig {
            api_key: env::var("OPENAI_API_KEY").map_err(|_| AppError::Config {
                message: "OPENAI_API_KEY is required".to_string(),
            })?,
            base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com".to_string()),
        };

        let database = DatabaseConfig {
            path: PathBuf::from(
                env::var("DATABASE_PATH").unwrap_or_else(|_| "./data/forms.db".to_string()),
            ),
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),
        };

        let email = EmailConfig {
            sender: env::var("EMAIL_SENDER").ok(),
            receiver: env::var("EMAIL_RECEIVER").ok(),
            password: env::var("EMAIL_PASSWORD").ok(),
            smtp_host: env::var("SMTP_SERVER").ok(),
            smtp_port: env::var("SMTP_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(587),
        };

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .to_lowercase()
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        };

        let request = RequestConfig {
            timeout_ms: env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30000),
        };

        let server = ServerConfig {
            bind_addr: env::var("SERVER_ADDR")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 8000))),
        };

        Ok(Config {
            openai,
            database,
            email,
            logging,
            request,
            server,
        })
    }
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self { timeout_ms: 30000 }
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            sender: None,
            receiver: None,
            password: None,
            smtp_host: None,
            smtp_port: 587,
        }
    }
}
