use axum::http::HeaderValue;
use axum::routing::get;
use axum::Router;
use std::panic;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use smartassist_backend::clients::{ai_client, speech_client};
use smartassist_backend::config::{self, Config};
use smartassist_backend::db::dbstore;
use smartassist_backend::docs::ApiDoc;
use smartassist_backend::routes::api::create_api_routes;
use smartassist_backend::state::AppState;
use smartassist_backend::websocket::handler::websocket_handler;

#[tokio::main]
async fn main() {
    // Set panic hook for better error messages
    panic::set_hook(Box::new(|info| {
        eprintln!("PANIC: {info}");
    }));

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            // Default to info level, but allow debug for our app
            "smartassist_backend=debug,tower_http=debug,axum::rejection=trace,info".into()
        }))
        .init();

    info!("Starting server...");

    // Load configuration
    let config = Config::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        warn!("Using default configuration");
        Config::default()
    });
    config::init_config(config.clone());

    // Initialize the database; every document and auth endpoint depends on it
    if let Err(e) = dbstore::init_db(&config.database_url).await {
        error!("Failed to initialize database: {}", e);
        std::process::exit(1);
    }
    info!("Database initialized successfully");

    // Ensure the upload directory exists
    if let Err(e) = tokio::fs::create_dir_all(&config.upload_dir).await {
        error!("Failed to create upload directory '{}': {}", config.upload_dir, e);
        std::process::exit(1);
    }

    // Initialize the AI client if configured
    match &config.openai_api_key {
        Some(api_key) => {
            if let Err(e) = ai_client::init_ai_client(
                config.openai_api_base.clone(),
                api_key.clone(),
                config.openai_model.clone(),
            ) {
                error!("Failed to initialize AI client: {}", e);
            }
        }
        None => warn!("No language-model API key configured - AI endpoints will not be available"),
    }

    // Initialize the speech client if configured
    match (&config.speech_api_url, &config.speech_api_key) {
        (Some(url), Some(api_key)) => {
            if let Err(e) = speech_client::init_speech_client(url.clone(), api_key.clone()) {
                error!("Failed to initialize speech client: {}", e);
            }
        }
        _ => warn!("No speech API configured - speech endpoints will not be available"),
    }

    // Shared registries for the live collaboration subsystem
    let state = Arc::new(AppState::new());

    // Create API routes
    let api_routes = create_api_routes(state.clone());

    // WebSocket transport, addressed by client id
    let ws_routes = Router::new()
        .route("/ws/:client_id", get(websocket_handler))
        .with_state(state);

    // CORS: the original backend allows every origin by default
    let cors = match &config.cors_origins {
        Some(origins) => {
            let origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|o| o.trim().parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        }
        None => CorsLayer::permissive(),
    };

    // Combine all routes
    let app_routes = Router::new()
        // Mount API routes
        .nest("/api", api_routes)
        // Mount the WebSocket endpoint
        .merge(ws_routes)
        // Mount Swagger UI
        .merge(SwaggerUi::new("/swagger").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add tracing layer
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start the server
    let listener = tokio::net::TcpListener::bind(config.server_address())
        .await
        .unwrap_or_else(|_| panic!("Failed to bind to {}", config.server_address()));

    info!("🚀 Server running on http://{}", config.server_address());
    info!("📡 WebSocket available at ws://{}/ws/{{client_id}}", config.server_address());
    info!("📚 Swagger UI available at http://{}/swagger", config.server_address());

    axum::serve(listener, app_routes)
        .await
        .expect("Server failed to start");
}
