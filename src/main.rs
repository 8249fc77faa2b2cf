use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, build_router};
use pms_core::{CoreConfig, PatientService, config::patients_file_from_env_value};

/// Main entry point for the patient management service
///
/// Serves the REST API (with Swagger UI at `/swagger-ui`) until Ctrl-C.
///
/// # Environment Variables
/// - `PMS_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `PATIENTS_FILE`: JSON file holding every patient (default: "patients.json"); created empty
///   if missing, but its directory must exist
/// - `RUST_LOG`: extra tracing directives
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the patients file cannot be created or its directory is missing,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pms_run=info".parse()?)
                .add_directive("pms_core=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("PMS_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let patients_file = patients_file_from_env_value(std::env::var("PATIENTS_FILE").ok());

    let cfg = Arc::new(CoreConfig::new(patients_file)?);
    let patient_service = PatientService::new(cfg.clone());
    if patient_service.store().ensure_exists()? {
        tracing::info!(
            "initialised empty patient store at {}",
            cfg.patients_file().display()
        );
    }

    tracing::info!("++ Starting PMS REST on {}", rest_addr);
    tracing::info!("++ Patient store: {}", cfg.patients_file().display());

    let app = build_router(AppState { patient_service });

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::warn!("shutting down server");
        })
        .await?;

    Ok(())
}
