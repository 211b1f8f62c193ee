use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/availability/compute",
            post(handlers::availability::compute),
        )
        .route(
            "/api/availability/:date",
            get(handlers::availability::list_availability),
        )
        .route(
            "/api/availability/:date/:barber_id",
            get(handlers::availability::barber_availability),
        )
}
