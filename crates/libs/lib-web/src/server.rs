//! # Server Setup
//!
//! Builds the shared [`AppState`], registers every route, applies the
//! middleware stack and serves HTTP plus the relay WebSocket.

// region: --- Imports
use axum::{
    extract::FromRef,
    http::{header, HeaderValue, Method},
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use lib_auth::{IdentityProvider, LocalIdentityProvider};
use lib_core::{AppError, Config, DocumentStore, MemDocumentStore, RecordStore};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::ai::AiGateway;
use crate::handlers;
use crate::middleware::{log_requests, map_res, require_auth, stamp_req, RequestStamp};
use crate::relay::{relay_websocket, Relay};
// endregion: --- Imports

// region: --- AppState

/// Everything a handler can reach. Built once at startup; cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<RecordStore>,
    pub relay: Arc<Relay>,
    pub ai: Arc<AiGateway>,
    pub identity: Arc<dyn IdentityProvider>,
    pub documents: Arc<dyn DocumentStore>,
}

impl AppState {
    /// Empty store, local identity provider and the gateway `config` selects.
    pub fn new(config: Config) -> Self {
        let ai = AiGateway::from_config(&config);
        let identity = LocalIdentityProvider::new(config.jwt_secret.clone(), config.jwt_expiration_hours);

        Self {
            config,
            store: Arc::new(RecordStore::new()),
            relay: Arc::new(Relay::new()),
            ai: Arc::new(ai),
            identity: Arc::new(identity),
            documents: Arc::new(MemDocumentStore::new()),
        }
    }

    pub fn with_ai(mut self, ai: AiGateway) -> Self {
        self.ai = Arc::new(ai);
        self
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for Arc<RecordStore> {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for Arc<Relay> {
    fn from_ref(state: &AppState) -> Self {
        state.relay.clone()
    }
}

impl FromRef<AppState> for Arc<AiGateway> {
    fn from_ref(state: &AppState) -> Self {
        state.ai.clone()
    }
}

impl FromRef<AppState> for Arc<dyn IdentityProvider> {
    fn from_ref(state: &AppState) -> Self {
        state.identity.clone()
    }
}

impl FromRef<AppState> for Arc<dyn DocumentStore> {
    fn from_ref(state: &AppState) -> Self {
        state.documents.clone()
    }
}
// endregion: --- AppState

// region: --- Server Configuration
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:5000")
    pub bind_address: String,
    pub allowed_origins: Vec<String>,
    /// Insert the sample news articles at startup
    pub seed_sample_news: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".to_string(),
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
                "http://localhost:5000".to_string(),
                "http://127.0.0.1:5000".to_string(),
            ],
            seed_sample_news: true,
        }
    }
}
// endregion: --- Server Configuration

// region: --- Server Setup

/// Install logging, load configuration, build state and serve until shutdown.
///
/// # Errors
///
/// - `.env` / environment configuration is missing or invalid
/// - a tracing subscriber is already installed
/// - the bind address cannot be bound
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    let log_level = init_tracing()?;

    info!(" CLINIC BACKEND STARTING");
    info!(" Log level: {}", log_level);

    info!("Loading configuration...");
    let app_config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    app_config.validate().map_err(|e| anyhow::anyhow!(e))?;

    if app_config.ai_enabled() {
        info!("[AI] Completion provider: {}", app_config.ai_model);
    } else {
        info!("[AI] OPENAI_API_KEY not set - AI endpoints will report failures");
    }

    let state = AppState::new(app_config);
    if config.seed_sample_news {
        state.store.seed_sample_news().await?;
    }

    let app = create_router(state, &config.allowed_origins);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!(" SERVER READY: http://{}", config.bind_address);
    log_server_info();

    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing() -> anyhow::Result<String> {
    let log_level = std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase();

    let filter = match log_level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {
            tracing_subscriber::EnvFilter::new(log_level.as_str())
        }
        _ => tracing_subscriber::EnvFilter::new("info"),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global tracing subscriber: {}", e))?;

    Ok(log_level)
}

/// The full application router.
pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    info!("[ROUTE SETUP] Registering HTTP routes...");

    let protected: Router<AppState> = Router::new()
        .route("/api/auth/profile", get(handlers::auth::profile))
        .route_layer(from_fn_with_state(state.identity.clone(), require_auth));

    Router::new()
        // Users
        .route("/api/users", post(handlers::users::create_user))
        .route("/api/users/{id}", get(handlers::users::get_user))
        // Doctors and clinics
        .route("/api/doctors", get(handlers::doctors::list_doctors).post(handlers::doctors::create_doctor))
        .route("/api/doctors/clinic/{id}", get(handlers::doctors::doctors_by_clinic))
        .route("/api/clinics", post(handlers::doctors::create_clinic))
        .route("/api/clinics/{id}", get(handlers::doctors::get_clinic))
        // Appointments
        .route("/api/appointments", post(handlers::appointments::create_appointment))
        .route(
            "/api/appointments/{id}",
            get(handlers::appointments::get_appointment).patch(handlers::appointments::update_appointment),
        )
        .route("/api/appointments/patient/{id}", get(handlers::appointments::appointments_by_patient))
        .route("/api/appointments/doctor/{id}", get(handlers::appointments::appointments_by_doctor))
        // Telemedicine
        .route("/api/telemedicine/session", post(handlers::telemedicine::create_session))
        .route(
            "/api/telemedicine/session/{id}",
            get(handlers::telemedicine::get_session).patch(handlers::telemedicine::update_session),
        )
        .route("/api/chat/messages", post(handlers::telemedicine::create_chat_message))
        .route("/api/chat/session/{id}", get(handlers::telemedicine::chat_messages_by_session))
        // News
        .route("/api/news", get(handlers::news::list_news).post(handlers::news::create_news))
        // AI assistant
        .route("/api/ai/chat", post(handlers::ai::chat))
        .route("/api/ai/sentiment", post(handlers::ai::analyze_sentiment))
        .route("/api/ai/summarize", post(handlers::ai::summarize))
        .route("/api/ai/conversations", post(handlers::ai::create_conversation))
        .route("/api/ai/conversations/user/{id}", get(handlers::ai::conversations_by_user))
        // Auth
        .route("/api/auth/signup", post(handlers::auth::signup))
        .route("/api/auth/login", post(handlers::auth::login))
        .merge(protected)
        // Relay
        .route("/ws", get(relay_websocket))
        .route("/health", get(|| async { "OK" }))
        .fallback(|| async {
            info!("[404 HANDLER] Unmatched route - returning 404");
            AppError::NotFound("Route not found".to_string())
        })
        .with_state(state)
        .layer(from_fn(map_res))
        .layer(from_fn(log_requests))
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    let request_id = request
                        .extensions()
                        .get::<RequestStamp>()
                        .map(|s| s.id.clone())
                        .unwrap_or_else(|| "unknown".to_string());
                    tracing::info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                })
                .on_failure(
                    |error: tower_http::classify::ServerErrorsFailureClass,
                     latency: std::time::Duration,
                     _span: &tracing::Span| {
                        tracing::error!(
                            error = ?error,
                            latency_ms = latency.as_millis(),
                            "[HTTP FAILURE] Error: {:?}, Latency: {}ms",
                            error,
                            latency.as_millis()
                        );
                    },
                ),
        )
        // Outermost so every layer above sees the request id
        .layer(from_fn(stamp_req))
        .layer(cors)
}

fn log_server_info() {
    info!(" RECORDS:");
    info!("   • POST /api/users, GET /api/users/{{id}}");
    info!("   • GET|POST /api/doctors, GET /api/doctors/clinic/{{id}}");
    info!("   • POST /api/clinics, GET /api/clinics/{{id}}");
    info!("   • POST /api/appointments, GET|PATCH /api/appointments/{{id}}");
    info!("   • GET  /api/appointments/patient/{{id}}, GET /api/appointments/doctor/{{id}}");
    info!("   • POST /api/telemedicine/session, GET|PATCH /api/telemedicine/session/{{id}}");
    info!("   • POST /api/chat/messages, GET /api/chat/session/{{id}}");
    info!("   • GET|POST /api/news");
    info!(" AI:");
    info!("   • POST /api/ai/chat, /api/ai/sentiment, /api/ai/summarize");
    info!("   • POST /api/ai/conversations, GET /api/ai/conversations/user/{{id}}");
    info!(" AUTH:");
    info!("   • POST /api/auth/signup, POST /api/auth/login, GET /api/auth/profile");
    info!(" RELAY:");
    info!("   • GET  /ws (WebSocket)");
    info!(" HEALTH:");
    info!("   • GET  /health");
}
// endregion: --- Server Setup
