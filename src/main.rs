use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use formflow::{
    config::Config,
    interview::InterviewEngine,
    notify::EmailNotifier,
    openai::OpenAiClient,
    server::{create_router, AppState},
    storage::SqliteStorage,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    init_logging(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "FormFlow backend starting..."
    );

    // Initialize storage
    let storage = match SqliteStorage::new(&config.database).await {
        Ok(s) => {
            info!(path = %config.database.path.display(), "Database initialized");
            s
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize database");
            return Err(e.into());
        }
    };

    // Initialize OpenAI client
    let client = match OpenAiClient::new(&config.openai, config.request.clone()) {
        Ok(c) => {
            info!(base_url = %config.openai.base_url, "OpenAI client initialized");
            c
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize OpenAI client");
            return Err(e.into());
        }
    };

    // Notification is optional; log whether it is active
    let notifier = EmailNotifier::new(config.email.clone());
    if config.email.is_complete() {
        info!("Email notification enabled");
    } else {
        info!("Email configuration incomplete, notifications disabled");
    }

    let engine = InterviewEngine::new(storage.clone(), client, notifier);

    let bind_addr = config.server.bind_addr;
    let state = Arc::new(AppState::new(config, storage, engine));
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!(addr = %bind_addr, "Server listening");

    axum::serve(listener, router).await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize tracing/logging
fn init_logging(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        formflow::config::LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        formflow::config::LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
