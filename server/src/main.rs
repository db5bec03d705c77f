mod api;
mod config;
mod db;
mod models;
mod schema;
mod telemetry;

use config::Config;
use rezeptbuch_core::{SortPolicy, Taxonomy};
use std::env;
use std::process::ExitCode;
use std::sync::Arc;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<db::DbPool>,
    pub taxonomy: Arc<Taxonomy>,
    pub sort_policy: SortPolicy,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Check for --openapi flag to dump spec and exit
    if env::args().any(|arg| arg == "--openapi") {
        return match api::openapi().to_pretty_json() {
            Ok(spec) => {
                println!("{}", spec);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Failed to render OpenAPI spec: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    telemetry::init(&config.telemetry);

    let pool = match db::create_pool(
        &config.database_url,
        config.pool_size,
        config.busy_timeout_ms,
    ) {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let state = AppState {
        pool: Arc::new(pool),
        taxonomy: Arc::new(Taxonomy::standard()),
        sort_policy: config.sort_policy,
    };

    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api::openapi());

    let app = api::router()
        .merge(swagger_ui)
        .with_state(state)
        .layer(telemetry::trace_layer());

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", config.bind_addr, e);
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        "Server listening on {} (sort policy: {})",
        config.bind_addr,
        config.sort_policy
    );
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", config.bind_addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
