//! HTTP API for the mehandi backend.
//!
//! Thin axum layer over the domain services: public gallery and booking
//! routes, admin routes gated by the shared token, and media serving.

pub(crate) mod audit;
pub(crate) mod auth;
pub(crate) mod handlers;
pub(crate) mod metrics;
pub(crate) mod types;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::Json;
use axum::http::{HeaderName, HeaderValue, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Router, extract::DefaultBodyLimit};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tracing::{error, info, warn};

use crate::config::Settings;
use crate::constants::{DEFAULT_ADMIN_EMAIL, MAX_UPLOAD_BYTES};
use crate::error::Error;
use crate::janitor::Janitor;
use crate::media::MediaStore;
use crate::model::{IdClock, SystemIdClock};
use crate::service::{BookingService, DesignService};
use crate::store::{self, ConfigStore, StorageLayout};
use types::ErrorResponse;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub designs: DesignService,
    pub bookings: BookingService,
    pub config: Arc<ConfigStore>,
    pub media: MediaStore,
    /// Environment override for the booking notification recipient.
    pub admin_email_override: Option<String>,
}

impl AppState {
    pub fn new(layout: &StorageLayout, admin_email_override: Option<String>) -> Self {
        Self::with_clock(layout, admin_email_override, Arc::new(SystemIdClock))
    }

    /// State with an injected id/clock source, for deterministic tests.
    pub fn with_clock(
        layout: &StorageLayout,
        admin_email_override: Option<String>,
        clock: Arc<dyn IdClock>,
    ) -> Self {
        let janitor = Janitor::spawn();
        Self {
            designs: DesignService::new(layout, janitor, Arc::clone(&clock)),
            bookings: BookingService::new(layout, clock),
            config: Arc::new(ConfigStore::new(layout)),
            media: MediaStore::new(layout),
            admin_email_override,
        }
    }
}

/// Errors surfaced at the HTTP boundary as `{ "error": ... }` JSON.
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            Self::Unauthorized(message) => (StatusCode::UNAUTHORIZED, message),
            Self::NotFound(message) => (StatusCode::NOT_FOUND, message),
            Self::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        match &err {
            Error::NotFound { kind, .. } => Self::NotFound(format!("{} not found.", capitalize(kind))),
            Error::InvalidToken { min } => Self::BadRequest(format!(
                "New access token must be at least {min} characters."
            )),
            Error::UnsupportedMedia { .. } => Self::BadRequest("Unsupported file type.".to_string()),
            Error::StorageUnavailable { .. } | Error::ConfigUnavailable { .. } => {
                error!(%err, "storage failure");
                Self::Internal("Internal Server Error".to_string())
            }
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Build the API router over the given state.
pub fn router(state: AppState, client_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/api/types", get(handlers::list_types))
        .route("/api/designs", get(handlers::list_designs))
        .route("/api/admin/designs", post(handlers::create_design))
        .route("/api/admin/designs/{id}", delete(handlers::delete_design))
        .route("/api/bookings", post(handlers::create_booking))
        .route(
            "/api/admin/bookings",
            get(handlers::list_bookings).delete(handlers::clear_bookings),
        )
        .route("/api/admin/bookings/{id}", delete(handlers::delete_booking))
        .route("/api/admin/token", post(handlers::rotate_token))
        .route("/uploads/{filename}", get(handlers::serve_upload))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors_layer(client_origins))
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .with_state(state)
}

fn cors_layer(client_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = client_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(auth::ADMIN_TOKEN_HEADER),
        ])
        .allow_credentials(true)
}

/// Bootstrap storage, then serve the API until shutdown.
pub async fn serve(settings: Settings) -> anyhow::Result<()> {
    let layout = StorageLayout::resolve(&settings.base_dir, settings.ephemeral);
    store::bootstrap(
        &layout,
        settings.admin_token_hint.as_deref(),
        DEFAULT_ADMIN_EMAIL,
    )
    .await
    .context("failed to initialize storage")?;

    if let Some(port) = settings.metrics_port {
        install_metrics(port)?;
    }

    let state = AppState::new(&layout, settings.admin_email.clone());
    let app = router(state, &settings.client_origins);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", settings.port))
        .await
        .with_context(|| format!("failed to bind port {}", settings.port))?;
    info!(port = settings.port, "mehandi backend listening");
    axum::serve(listener, app).await.context("server error")
}

fn install_metrics(port: u16) -> anyhow::Result<()> {
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(([0, 0, 0, 0], port))
        .install()
        .context("failed to install Prometheus exporter")?;
    info!(port, "metrics exporter listening");
    Ok(())
}
