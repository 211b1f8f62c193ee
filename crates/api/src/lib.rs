//! # Barbershop API
//!
//! HTTP front for the appointment availability calculator. Handlers fetch a
//! barber's shift and appointments from the upstream booking backend, run the
//! calculator, and return the open start times as JSON.
//!
//! ## Architecture
//!
//! - **Routes**: endpoint paths and which middleware guards them
//! - **Handlers**: request processing on top of `barbershop-core`
//! - **Middleware**: the session gate and the error to response mapping
//! - **Config**: environment driven settings
//!
//! The upstream backend is reached through the
//! [`BookingBackend`](barbershop_backend::BookingBackend) trait so handlers can
//! be tested against a mock.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Middleware for authentication and error handling
pub mod middleware;
/// Route definitions
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    error_handling::HandleErrorLayer,
    http::{header, HeaderValue, Method},
    Router,
};
use barbershop_backend::BookingBackend;
use eyre::Result;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use crate::middleware::error_handling::handle_timeout_error;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Client for the upstream booking backend
    pub backend: Arc<dyn BookingBackend>,
}

impl ApiState {
    pub fn new(backend: Arc<dyn BookingBackend>) -> Self {
        Self { backend }
    }
}

/// Builds the router with every route and the shared state attached.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use barbershop_api::{app, ApiState};
///
/// # fn main() -> eyre::Result<()> {
/// let backend = barbershop_backend::create_client("http://localhost:8080", 10)?;
/// let router = app(Arc::new(ApiState::new(Arc::new(backend))));
/// # let _ = router;
/// # Ok(())
/// # }
/// ```
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Slot computation endpoints
        .merge(routes::availability::routes())
        // Session-gated appointment changes
        .merge(routes::appointments::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_origin(origins)
        .allow_credentials(true)
}

/// Starts the API server with the provided configuration
///
/// Installs the tracing subscriber, builds the backend client, applies CORS
/// and the request timeout, and serves until the process exits.
pub async fn start_server(config: config::ApiConfig) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let backend = barbershop_backend::create_client(&config.backend_url, config.backend_timeout)?;
    info!("Using booking backend at {}", backend.base_url());

    let state = Arc::new(ApiState::new(Arc::new(backend)));
    let app = app(state);

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)),
        None => app,
    };

    // Add request timeout middleware
    let app = app.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_timeout_error))
            .timeout(Duration::from_secs(config.request_timeout)),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
