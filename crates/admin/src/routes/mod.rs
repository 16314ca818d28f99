//! HTTP route handlers for the panel.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Liveness check
//! GET  /health/ready                - Readiness check (backend ping)
//!
//! # Panel
//! GET  /                            - Stores, latest delivery per store, creation forms
//! POST /stores                      - Create store
//! POST /stores/{id}/delete          - Delete store (and its deliveries)
//! POST /deliveries/new              - Record delivery
//! POST /deliveries/{id}/delete      - Delete delivery
//! GET  /daily-total                 - Panel plus today's aggregate
//!
//! # Store deliveries
//! GET  /deliveries?storeId=N        - One store's deliveries, editable per row
//! POST /deliveries?storeId=N        - Save or delete one row
//!
//! # Edit store
//! GET  /edit-store?storeId=N        - Store form
//! POST /edit-store?storeId=N        - Update store
//! ```

pub mod deliveries;
pub mod edit_store;
pub mod health;
pub mod notice;
pub mod panel;

use askama::Template;
use axum::{Router, response::Html};
use serde::Deserialize;

use crate::state::AppState;

pub use notice::{Notice, NoticeKind, NoticeParams};

/// Build the panel router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(panel::router())
        .merge(deliveries::router())
        .merge(edit_store::router())
}

/// The `storeId` navigation parameter, kept raw so the screen can tell a
/// missing value from a malformed one.
#[derive(Debug, Default, Deserialize)]
pub struct StoreQuery {
    #[serde(rename = "storeId")]
    pub store_id: Option<String>,
}

/// Render a template, falling back to a plain error body.
pub(crate) fn render<T: Template>(template: &T) -> Html<String> {
    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }))
}
