//! Karam Bolis delivery panel library.
//!
//! Server-rendered screens for registering stores, recording deliveries,
//! reviewing the latest delivery per store and computing the day's total.
//! Every read and write goes through a [`db::Backend`], so the screens can
//! be exercised against an in-memory backend in tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::Router;
use tower_http::services::ServeDir;

use state::AppState;

/// Directory holding the stylesheet and the confirmation script.
pub const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Build the panel application: routes, static assets and security headers.
///
/// Tracing and Sentry layers are added by the binary.
pub fn app(state: AppState) -> Router {
    routes::routes()
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .with_state(state)
}
