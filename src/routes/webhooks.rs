//! Webhook route configuration
//!
//! Event Grid (subscription validation, incoming calls) and Call Automation
//! (in-call events) share one dispatcher. Two paths are exposed so the two
//! subscriptions can point at distinct URLs:
//!
//! - `POST /api/callbacks` - Call Automation callback URL
//! - `POST /api/incomingCall` - Event Grid subscription endpoint
//!
//! Both accept `OPTIONS` for endpoint probing.

use axum::{Router, routing::post};
use tower_http::trace::TraceLayer;

use crate::handlers::callbacks::callback_handler;
use crate::state::AppState;
use std::sync::Arc;

pub fn create_webhook_router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/callbacks",
            post(callback_handler).options(callback_handler),
        )
        .route(
            "/api/incomingCall",
            post(callback_handler).options(callback_handler),
        )
        .layer(TraceLayer::new_for_http())
}
