use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, app};
use triage_core::{CoreConfig, TriageService, constants::DEFAULT_DATA_DIR, rules_file_from_env_value};

/// Main entry point for the triage service
///
/// Loads the rule catalog once and serves the REST API with Swagger UI.
///
/// # Environment Variables
/// - `TRIAGE_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `TRIAGE_DATA_DIR`: Directory for symptom log storage (default: "triage_data")
/// - `TRIAGE_RULES_FILE`: YAML rule catalog (default: the standard catalog)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the data directory cannot be created,
/// - the rules file cannot be loaded or fails validation,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("triage_run=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("triage_core=info".parse()?)
                .add_directive("triage_rules=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("TRIAGE_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let data_dir = std::env::var("TRIAGE_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.into());
    let data_dir = PathBuf::from(data_dir);
    std::fs::create_dir_all(&data_dir)?;

    let rules_file = rules_file_from_env_value(std::env::var("TRIAGE_RULES_FILE").ok());
    let cfg = CoreConfig::new(data_dir, rules_file)?;
    let catalog = cfg.load_catalog()?;

    tracing::info!("++ Storing symptom logs under {}", cfg.data_dir().display());
    tracing::info!("++ Starting triage REST on {}", rest_addr);

    let service = TriageService::new(Arc::new(cfg), Arc::new(catalog));
    let rest_app = app(AppState::new(service));

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, rest_app).await?;

    Ok(())
}
