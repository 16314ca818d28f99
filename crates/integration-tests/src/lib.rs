//! Integration test support for the Karam panel.
//!
//! The screens only talk to a [`Backend`], so the tests drive the real
//! router against [`MemoryBackend`]: an in-memory store/delivery table pair
//! with the same semantics as the `PostgreSQL` schema (generated IDs, the
//! store foreign key, cascade deletes, `entregas_del_dia`).
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p karam-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::NaiveDate;
use chrono_tz::Tz;
use tower::ServiceExt;

use karam_admin::db::{Backend, RepositoryError};
use karam_admin::models::{Delivery, DeliveryChanges, NewDelivery, Store, StoreInput};
use karam_admin::state::AppState;
use karam_core::{DeliveryId, StoreId};

#[derive(Default)]
struct Tables {
    stores: Vec<Store>,
    deliveries: Vec<Delivery>,
    next_store_id: i32,
    next_delivery_id: i32,
    calls: Vec<&'static str>,
    failing: Vec<&'static str>,
}

/// In-memory backend that records every call it receives.
#[derive(Default)]
pub struct MemoryBackend {
    tables: Mutex<Tables>,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Log `method` and fail it if it was marked with [`Self::fail_on`].
    fn enter(&self, method: &'static str) -> Result<MutexGuard<'_, Tables>, RepositoryError> {
        let mut tables = self.lock();
        tables.calls.push(method);
        if tables.failing.contains(&method) {
            return Err(RepositoryError::DataCorruption(format!(
                "{method} unavailable"
            )));
        }
        Ok(tables)
    }

    /// Make every later call to `method` fail.
    pub fn fail_on(&self, method: &'static str) {
        self.lock().failing.push(method);
    }

    /// Insert a store directly, bypassing the call log.
    pub fn seed_store(&self, name: &str) -> StoreId {
        let mut tables = self.lock();
        tables.next_store_id += 1;
        let id = StoreId::new(tables.next_store_id);
        tables.stores.push(Store {
            id,
            nickname: name.to_string(),
            name: name.to_string(),
            address: "Centro".to_string(),
            contact: None,
            visit_date: None,
        });
        id
    }

    /// Insert a delivery directly, bypassing the call log.
    pub fn seed_delivery(
        &self,
        store_id: StoreId,
        quantity_left: Option<i32>,
        date: NaiveDate,
    ) -> DeliveryId {
        let mut tables = self.lock();
        tables.next_delivery_id += 1;
        let id = DeliveryId::new(tables.next_delivery_id);
        tables.deliveries.push(Delivery {
            id,
            store_id,
            quantity_left,
            amount_owed: None,
            date,
            notes: None,
        });
        id
    }

    /// Every call received so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<&'static str> {
        self.lock().calls.clone()
    }

    /// Number of calls to `method`.
    #[must_use]
    pub fn count(&self, method: &str) -> usize {
        self.lock().calls.iter().filter(|c| **c == method).count()
    }

    #[must_use]
    pub fn store(&self, id: StoreId) -> Option<Store> {
        self.lock().stores.iter().find(|s| s.id == id).cloned()
    }

    #[must_use]
    pub fn delivery(&self, id: DeliveryId) -> Option<Delivery> {
        self.lock().deliveries.iter().find(|d| d.id == id).cloned()
    }

    #[must_use]
    pub fn delivery_count(&self) -> usize {
        self.lock().deliveries.len()
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn ping(&self) -> Result<(), RepositoryError> {
        self.enter("ping").map(drop)
    }

    async fn list_stores(&self) -> Result<Vec<Store>, RepositoryError> {
        Ok(self.enter("list_stores")?.stores.clone())
    }

    async fn get_store(&self, id: StoreId) -> Result<Option<Store>, RepositoryError> {
        let tables = self.enter("get_store")?;
        Ok(tables.stores.iter().find(|s| s.id == id).cloned())
    }

    async fn create_store(&self, input: &StoreInput) -> Result<Store, RepositoryError> {
        let mut tables = self.enter("create_store")?;
        tables.next_store_id += 1;
        let mut store = Store {
            id: StoreId::new(tables.next_store_id),
            nickname: String::new(),
            name: String::new(),
            address: String::new(),
            contact: None,
            visit_date: None,
        };
        store.apply(input);
        tables.stores.push(store.clone());
        Ok(store)
    }

    async fn update_store(&self, id: StoreId, input: &StoreInput) -> Result<(), RepositoryError> {
        let mut tables = self.enter("update_store")?;
        let store = tables
            .stores
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(RepositoryError::NotFound)?;
        store.apply(input);
        Ok(())
    }

    async fn delete_store(&self, id: StoreId) -> Result<bool, RepositoryError> {
        let mut tables = self.enter("delete_store")?;
        let before = tables.stores.len();
        tables.stores.retain(|s| s.id != id);
        let deleted = tables.stores.len() < before;
        if deleted {
            tables.deliveries.retain(|d| d.store_id != id);
        }
        Ok(deleted)
    }

    async fn list_deliveries(&self) -> Result<Vec<Delivery>, RepositoryError> {
        Ok(self.enter("list_deliveries")?.deliveries.clone())
    }

    async fn list_store_deliveries(
        &self,
        store_id: StoreId,
    ) -> Result<Vec<Delivery>, RepositoryError> {
        let tables = self.enter("list_store_deliveries")?;
        Ok(tables
            .deliveries
            .iter()
            .filter(|d| d.store_id == store_id)
            .cloned()
            .collect())
    }

    async fn create_delivery(&self, input: &NewDelivery) -> Result<Delivery, RepositoryError> {
        let mut tables = self.enter("create_delivery")?;
        if !tables.stores.iter().any(|s| s.id == input.store_id) {
            return Err(RepositoryError::Conflict(
                "La tienda seleccionada no existe.".to_string(),
            ));
        }
        tables.next_delivery_id += 1;
        let delivery = Delivery {
            id: DeliveryId::new(tables.next_delivery_id),
            store_id: input.store_id,
            quantity_left: input.quantity_left,
            amount_owed: input.amount_owed,
            date: input.date,
            notes: input.notes.clone(),
        };
        tables.deliveries.push(delivery.clone());
        Ok(delivery)
    }

    async fn update_delivery(
        &self,
        id: DeliveryId,
        changes: &DeliveryChanges,
    ) -> Result<(), RepositoryError> {
        let mut tables = self.enter("update_delivery")?;
        let delivery = tables
            .deliveries
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or(RepositoryError::NotFound)?;
        delivery.apply(changes);
        Ok(())
    }

    async fn delete_delivery(&self, id: DeliveryId) -> Result<bool, RepositoryError> {
        let mut tables = self.enter("delete_delivery")?;
        let before = tables.deliveries.len();
        tables.deliveries.retain(|d| d.id != id);
        Ok(tables.deliveries.len() < before)
    }

    async fn deliveries_on(&self, day: NaiveDate) -> Result<Vec<Delivery>, RepositoryError> {
        let tables = self.enter("deliveries_on")?;
        Ok(tables
            .deliveries
            .iter()
            .filter(|d| d.date == day)
            .cloned()
            .collect())
    }
}

/// Application state over a shared in-memory backend, in UTC.
#[must_use]
pub fn memory_state(backend: &Arc<MemoryBackend>) -> AppState {
    memory_state_in(backend, chrono_tz::UTC)
}

/// Application state over a shared in-memory backend, in `tz`.
#[must_use]
pub fn memory_state_in(backend: &Arc<MemoryBackend>, tz: Tz) -> AppState {
    let backend: Arc<dyn Backend> = backend.clone();
    AppState::new(backend, tz)
}

// =============================================================================
// HTTP helpers
// =============================================================================

/// A response reduced to what the tests assert on.
#[derive(Debug)]
pub struct Page {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

async fn send(state: AppState, request: Request<Body>) -> Page {
    let response = karam_admin::app(state)
        .oneshot(request)
        .await
        .unwrap_or_else(|never| match never {});
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap_or_default();
    Page {
        status,
        location,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    }
}

/// GET `uri` through the full panel router.
///
/// # Panics
///
/// Panics if `uri` is not a valid request target.
pub async fn get(state: AppState, uri: &str) -> Page {
    let request = Request::get(uri)
        .body(Body::empty())
        .unwrap_or_else(|e| panic!("invalid request {uri}: {e}"));
    send(state, request).await
}

/// POST a url-encoded form to `uri` through the full panel router.
///
/// # Panics
///
/// Panics if `uri` is not a valid request target.
pub async fn post_form(state: AppState, uri: &str, fields: &[(&str, &str)]) -> Page {
    let body = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields)
        .finish();
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap_or_else(|e| panic!("invalid request {uri}: {e}"));
    send(state, request).await
}
