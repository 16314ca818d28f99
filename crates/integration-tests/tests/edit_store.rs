//! Edit store screen.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::http::StatusCode;

use karam_core::StoreId;
use karam_integration_tests::{MemoryBackend, get, memory_state, post_form};

fn full_form(name: &str) -> Vec<(&'static str, String)> {
    vec![
        ("apodo", "Lupita".to_string()),
        ("nombre_tienda", name.to_string()),
        ("domicilio", "Calle 2 #10".to_string()),
        ("atiende", "Doña Lupe".to_string()),
        ("fecha", "2024-03-01".to_string()),
    ]
}

fn borrowed<'a>(form: &'a [(&'static str, String)]) -> Vec<(&'static str, &'a str)> {
    form.iter().map(|(k, v)| (*k, v.as_str())).collect()
}

#[tokio::test]
async fn test_invalid_store_id_makes_no_backend_call() {
    let backend = Arc::new(MemoryBackend::new());

    let page = get(memory_state(&backend), "/edit-store?storeId=abc").await;

    assert_eq!(page.status, StatusCode::BAD_REQUEST);
    assert!(page.body.contains("ID de tienda inválido"));
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_unknown_store_is_not_found() {
    let backend = Arc::new(MemoryBackend::new());

    let page = get(memory_state(&backend), "/edit-store?storeId=9").await;

    assert_eq!(page.status, StatusCode::NOT_FOUND);
    assert!(page.body.contains("No se encontró la tienda con ID 9."));
}

#[tokio::test]
async fn test_form_prefilled_from_store() {
    let backend = Arc::new(MemoryBackend::new());
    backend.seed_store("Abarrotes Lupita");

    let page = get(memory_state(&backend), "/edit-store?storeId=1").await;

    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Editar Tienda: Abarrotes Lupita"));
    assert!(page.body.contains("value=\"Abarrotes Lupita\""));
}

#[tokio::test]
async fn test_update_overwrites_every_field() {
    let backend = Arc::new(MemoryBackend::new());
    let id = backend.seed_store("Abarrotes Lupita");
    let form = full_form("Abarrotes Lupita II");

    let page = post_form(
        memory_state(&backend),
        "/edit-store?storeId=1",
        &borrowed(&form),
    )
    .await;

    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Tienda actualizada correctamente."));
    assert!(page.body.contains("Editar Tienda: Abarrotes Lupita II"));

    let store = backend.store(id).unwrap();
    assert_eq!(store.id, StoreId::new(1));
    assert_eq!(store.name, "Abarrotes Lupita II");
    assert_eq!(store.contact.as_deref(), Some("Doña Lupe"));
    assert_eq!(store.visit_date.unwrap().to_string(), "2024-03-01");
}

#[tokio::test]
async fn test_update_with_blank_field_is_rejected() {
    let backend = Arc::new(MemoryBackend::new());
    backend.seed_store("Abarrotes Lupita");
    let mut form = full_form("Nuevo Nombre");
    form.retain(|(k, _)| *k != "atiende");

    let page = post_form(
        memory_state(&backend),
        "/edit-store?storeId=1",
        &borrowed(&form),
    )
    .await;

    assert_eq!(page.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(backend.count("update_store"), 0);
    // Heading keeps the stored name; the form keeps what was typed
    assert!(page.body.contains("Editar Tienda: Abarrotes Lupita"));
    assert!(page.body.contains("value=\"Nuevo Nombre\""));
}

#[tokio::test]
async fn test_update_failure_keeps_typed_values() {
    let backend = Arc::new(MemoryBackend::new());
    backend.seed_store("Abarrotes Lupita");
    backend.fail_on("update_store");
    let form = full_form("Nuevo Nombre");

    let page = post_form(
        memory_state(&backend),
        "/edit-store?storeId=1",
        &borrowed(&form),
    )
    .await;

    assert_eq!(page.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(page.body.contains("Error al actualizar la tienda."));
    assert!(page.body.contains("value=\"Nuevo Nombre\""));
}
