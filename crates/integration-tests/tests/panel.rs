//! Panel screen: store list, latest delivery per store, creation forms and
//! the daily total, driven through the full router.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::http::StatusCode;
use chrono::NaiveDate;

use karam_admin::services::today_in;
use karam_integration_tests::{MemoryBackend, get, memory_state, post_form};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

// =============================================================================
// Latest Delivery Per Store
// =============================================================================

#[tokio::test]
async fn test_summary_shows_latest_delivery_per_store() {
    let backend = Arc::new(MemoryBackend::new());
    let store = backend.seed_store("A");
    backend.seed_delivery(store, Some(5), date("2024-01-01"));
    backend.seed_delivery(store, Some(8), date("2024-01-02"));

    let page = get(memory_state(&backend), "/").await;

    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("<td>8</td>"));
    assert!(page.body.contains("<td>2024-01-02</td>"));
    assert!(!page.body.contains("<td>2024-01-01</td>"));
    assert!(page.body.contains("/deliveries/2/delete"));
    assert!(!page.body.contains("/deliveries/1/delete"));
}

#[tokio::test]
async fn test_panel_lists_stores_with_fallbacks() {
    let backend = Arc::new(MemoryBackend::new());
    backend.seed_store("Abarrotes Lupita");

    let page = get(memory_state(&backend), "/").await;

    assert!(page.body.contains("Abarrotes Lupita"));
    assert!(page.body.contains("<td>N/A</td>"));
    assert!(page.body.contains("/edit-store?storeId=1"));
    assert!(page.body.contains("No hay entregas registradas."));
}

#[tokio::test]
async fn test_panel_load_failure_shows_error_page() {
    let backend = Arc::new(MemoryBackend::new());
    backend.fail_on("list_deliveries");

    let page = get(memory_state(&backend), "/").await;

    assert_eq!(page.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(page.body.contains("list_deliveries unavailable"));
    assert!(page.body.contains("Volver al Panel"));
}

// =============================================================================
// Store Creation
// =============================================================================

#[tokio::test]
async fn test_create_store_redirects_with_notice() {
    let backend = Arc::new(MemoryBackend::new());
    let state = memory_state(&backend);

    let page = post_form(
        state.clone(),
        "/stores",
        &[
            ("apodo", "Lupita"),
            ("nombre_tienda", "Abarrotes Lupita"),
            ("domicilio", "Calle 2"),
            ("atiende", "Lupe"),
            ("fecha", "2024-03-01"),
        ],
    )
    .await;

    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert_eq!(page.location.as_deref(), Some("/?notice=store_created"));
    assert_eq!(backend.count("create_store"), 1);

    let page = get(state, "/?notice=store_created").await;
    assert!(page.body.contains("Tienda agregada correctamente."));
    assert!(page.body.contains("Abarrotes Lupita"));
}

#[tokio::test]
async fn test_create_store_requires_every_field() {
    let backend = Arc::new(MemoryBackend::new());

    let page = post_form(
        memory_state(&backend),
        "/stores",
        &[
            ("apodo", "Lupita"),
            ("nombre_tienda", "Abarrotes Lupita"),
            ("domicilio", "   "),
            ("atiende", "Lupe"),
            ("fecha", "2024-03-01"),
        ],
    )
    .await;

    assert_eq!(page.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(page.body.contains("Por favor, completa todos los campos."));
    // Typed values survive the re-render
    assert!(page.body.contains("value=\"Abarrotes Lupita\""));
    assert_eq!(backend.count("create_store"), 0);
}

// =============================================================================
// Delivery Creation
// =============================================================================

#[tokio::test]
async fn test_create_delivery_requires_store_and_date() {
    let backend = Arc::new(MemoryBackend::new());
    backend.seed_store("A");

    let page = post_form(
        memory_state(&backend),
        "/deliveries/new",
        &[("tienda", ""), ("dejados", "5"), ("fecha", "2024-01-01")],
    )
    .await;

    assert_eq!(page.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(
        page.body
            .contains("Por favor, completa todos los campos obligatorios.")
    );
    assert_eq!(backend.count("create_delivery"), 0);
}

#[tokio::test]
async fn test_create_delivery_for_missing_store_shows_conflict() {
    let backend = Arc::new(MemoryBackend::new());

    let page = post_form(
        memory_state(&backend),
        "/deliveries/new",
        &[
            ("tienda", "42"),
            ("dejados", "5"),
            ("deben", "0"),
            ("fecha", "2024-01-01"),
        ],
    )
    .await;

    assert!(page.body.contains("La tienda seleccionada no existe."));
    assert_eq!(backend.delivery_count(), 0);
}

#[tokio::test]
async fn test_create_delivery_keeps_zero_and_drops_garbage() {
    let backend = Arc::new(MemoryBackend::new());
    let store = backend.seed_store("A").to_string();

    let page = post_form(
        memory_state(&backend),
        "/deliveries/new",
        &[
            ("tienda", store.as_str()),
            ("dejados", "0"),
            ("deben", "mucho"),
            ("fecha", "2024-01-01"),
            ("observaciones", ""),
        ],
    )
    .await;

    assert_eq!(page.location.as_deref(), Some("/?notice=delivery_created"));
    let delivery = backend.delivery(karam_core::DeliveryId::new(1)).unwrap();
    assert_eq!(delivery.quantity_left, Some(0));
    assert_eq!(delivery.amount_owed, None);
    assert_eq!(delivery.notes, None);
}

// =============================================================================
// Deletion
// =============================================================================

#[tokio::test]
async fn test_delete_store_cascades_to_deliveries() {
    let backend = Arc::new(MemoryBackend::new());
    let a = backend.seed_store("A");
    let b = backend.seed_store("B");
    backend.seed_delivery(a, Some(5), date("2024-01-01"));
    backend.seed_delivery(b, Some(3), date("2024-01-01"));
    let state = memory_state(&backend);

    let page = post_form(state.clone(), &format!("/stores/{a}/delete"), &[]).await;
    assert_eq!(page.location.as_deref(), Some("/?notice=store_deleted"));
    assert_eq!(backend.delivery_count(), 1);

    let page = get(state, "/?notice=store_deleted").await;
    assert!(page.body.contains("/deliveries?storeId=2"));
    assert!(!page.body.contains("/deliveries?storeId=1"));
}

#[tokio::test]
async fn test_delete_missing_delivery_reports_error() {
    let backend = Arc::new(MemoryBackend::new());

    let page = post_form(memory_state(&backend), "/deliveries/99/delete", &[]).await;

    assert_eq!(
        page.location.as_deref(),
        Some("/?error=delivery_delete_failed")
    );
}

// =============================================================================
// Daily Total
// =============================================================================

#[tokio::test]
async fn test_daily_total_sums_today_only() {
    let backend = Arc::new(MemoryBackend::new());
    let a = backend.seed_store("Tienda Uno");
    let b = backend.seed_store("Tienda Dos");
    let today = today_in(chrono_tz::UTC);
    backend.seed_delivery(a, Some(5), today);
    backend.seed_delivery(a, None, today);
    backend.seed_delivery(b, Some(7), today);
    backend.seed_delivery(b, Some(100), date("2000-01-01"));

    let page = get(memory_state(&backend), "/daily-total").await;

    assert_eq!(page.status, StatusCode::OK);
    assert_eq!(backend.count("deliveries_on"), 1);
    assert!(page.body.contains("<td>Tienda Uno</td>"));
    assert!(page.body.contains("<th>12</th>"));
}

#[tokio::test]
async fn test_daily_total_empty_day_is_informational() {
    let backend = Arc::new(MemoryBackend::new());
    backend.seed_store("A");

    let page = get(memory_state(&backend), "/daily-total").await;

    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("notice notice-info"));
    assert!(page.body.contains(&format!(
        "No hay entregas registradas para el {}.",
        today_in(chrono_tz::UTC)
    )));
}

#[tokio::test]
async fn test_daily_total_failure_keeps_panel() {
    let backend = Arc::new(MemoryBackend::new());
    backend.seed_store("A");
    backend.fail_on("deliveries_on");

    let page = get(memory_state(&backend), "/daily-total").await;

    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Error al calcular el total del día."));
    assert!(page.body.contains("Tiendas Registradas"));
}
