use axum::{middleware::from_fn, routing::put, Router};
use std::sync::Arc;

use crate::{handlers, middleware::auth::require_session, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/appointments/:id/time",
            put(handlers::appointments::reschedule),
        )
        .route_layer(from_fn(require_session))
}
