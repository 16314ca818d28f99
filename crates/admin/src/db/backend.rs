//! The backend capability handed to every screen.
//!
//! Handlers never talk to the pool directly; they go through [`Backend`],
//! which `AppState` owns for the life of the process. [`PgBackend`] is the
//! production implementation; tests swap in an in-memory one.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use karam_core::{DeliveryId, StoreId};

use super::{DeliveryRepository, RepositoryError, StoreRepository};
use crate::models::{Delivery, DeliveryChanges, NewDelivery, Store, StoreInput};

/// Everything the panel needs from its relational backend.
///
/// Each method is a single round trip. Referential integrity, cascade
/// deletes and the "deliveries of a day" filter are the backend's job.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Cheap connectivity probe.
    async fn ping(&self) -> Result<(), RepositoryError>;

    async fn list_stores(&self) -> Result<Vec<Store>, RepositoryError>;

    async fn get_store(&self, id: StoreId) -> Result<Option<Store>, RepositoryError>;

    async fn create_store(&self, input: &StoreInput) -> Result<Store, RepositoryError>;

    /// Overwrite every editable field of a store.
    ///
    /// Fails with `NotFound` when no row matches.
    async fn update_store(&self, id: StoreId, input: &StoreInput) -> Result<(), RepositoryError>;

    /// Delete a store and, through the cascade, its deliveries.
    async fn delete_store(&self, id: StoreId) -> Result<bool, RepositoryError>;

    async fn list_deliveries(&self) -> Result<Vec<Delivery>, RepositoryError>;

    async fn list_store_deliveries(
        &self,
        store_id: StoreId,
    ) -> Result<Vec<Delivery>, RepositoryError>;

    /// Fails with `Conflict` when the store does not exist.
    async fn create_delivery(&self, input: &NewDelivery) -> Result<Delivery, RepositoryError>;

    async fn update_delivery(
        &self,
        id: DeliveryId,
        changes: &DeliveryChanges,
    ) -> Result<(), RepositoryError>;

    async fn delete_delivery(&self, id: DeliveryId) -> Result<bool, RepositoryError>;

    /// Deliveries whose date equals `day`.
    async fn deliveries_on(&self, day: NaiveDate) -> Result<Vec<Delivery>, RepositoryError>;
}

/// `PostgreSQL` implementation of [`Backend`].
#[derive(Clone)]
pub struct PgBackend {
    pool: PgPool,
}

impl PgBackend {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    const fn stores(&self) -> StoreRepository<'_> {
        StoreRepository::new(&self.pool)
    }

    const fn deliveries(&self) -> DeliveryRepository<'_> {
        DeliveryRepository::new(&self.pool)
    }
}

#[async_trait]
impl Backend for PgBackend {
    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_stores(&self) -> Result<Vec<Store>, RepositoryError> {
        self.stores().list_all().await
    }

    async fn get_store(&self, id: StoreId) -> Result<Option<Store>, RepositoryError> {
        self.stores().get_by_id(id).await
    }

    async fn create_store(&self, input: &StoreInput) -> Result<Store, RepositoryError> {
        self.stores().create(input).await
    }

    async fn update_store(&self, id: StoreId, input: &StoreInput) -> Result<(), RepositoryError> {
        self.stores().update(id, input).await
    }

    async fn delete_store(&self, id: StoreId) -> Result<bool, RepositoryError> {
        self.stores().delete(id).await
    }

    async fn list_deliveries(&self) -> Result<Vec<Delivery>, RepositoryError> {
        self.deliveries().list_all().await
    }

    async fn list_store_deliveries(
        &self,
        store_id: StoreId,
    ) -> Result<Vec<Delivery>, RepositoryError> {
        self.deliveries().list_for_store(store_id).await
    }

    async fn create_delivery(&self, input: &NewDelivery) -> Result<Delivery, RepositoryError> {
        self.deliveries().create(input).await
    }

    async fn update_delivery(
        &self,
        id: DeliveryId,
        changes: &DeliveryChanges,
    ) -> Result<(), RepositoryError> {
        self.deliveries().update(id, changes).await
    }

    async fn delete_delivery(&self, id: DeliveryId) -> Result<bool, RepositoryError> {
        self.deliveries().delete(id).await
    }

    async fn deliveries_on(&self, day: NaiveDate) -> Result<Vec<Delivery>, RepositoryError> {
        self.deliveries().list_on(day).await
    }
}
