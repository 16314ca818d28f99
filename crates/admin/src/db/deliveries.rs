//! Database operations for deliveries (`entregas`).

use chrono::NaiveDate;
use sqlx::PgPool;

use karam_core::{DeliveryId, StoreId};

use super::{RepositoryError, map_fk_violation};
use crate::models::{Delivery, DeliveryChanges, NewDelivery};

const UNKNOWN_STORE_MESSAGE: &str = "La tienda seleccionada no existe.";

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for delivery queries.
#[derive(Debug, sqlx::FromRow)]
struct DeliveryRow {
    id: i32,
    tienda: i32,
    dejados: Option<i32>,
    deben: Option<i32>,
    fecha: NaiveDate,
    observaciones: Option<String>,
}

impl From<DeliveryRow> for Delivery {
    fn from(row: DeliveryRow) -> Self {
        Self {
            id: DeliveryId::new(row.id),
            store_id: StoreId::new(row.tienda),
            quantity_left: row.dejados,
            amount_owed: row.deben,
            date: row.fecha,
            notes: row.observaciones,
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for delivery database operations.
pub struct DeliveryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> DeliveryRepository<'a> {
    /// Create a new delivery repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every delivery of every store, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Delivery>, RepositoryError> {
        let rows = sqlx::query_as::<_, DeliveryRow>(
            r"
            SELECT id, tienda, dejados, deben, fecha, observaciones
            FROM entregas
            ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List the deliveries of one store, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_store(&self, store_id: StoreId) -> Result<Vec<Delivery>, RepositoryError> {
        let rows = sqlx::query_as::<_, DeliveryRow>(
            r"
            SELECT id, tienda, dejados, deben, fecha, observaciones
            FROM entregas
            WHERE tienda = $1
            ORDER BY id
            ",
        )
        .bind(store_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Deliveries recorded on `day`, through the `entregas_del_dia` function.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the call fails.
    pub async fn list_on(&self, day: NaiveDate) -> Result<Vec<Delivery>, RepositoryError> {
        let rows = sqlx::query_as::<_, DeliveryRow>(
            r"
            SELECT id, tienda, dejados, deben, fecha, observaciones
            FROM entregas_del_dia($1)
            ",
        )
        .bind(day)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Record a new delivery.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the store doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, input: &NewDelivery) -> Result<Delivery, RepositoryError> {
        let row = sqlx::query_as::<_, DeliveryRow>(
            r"
            INSERT INTO entregas (tienda, dejados, deben, fecha, observaciones)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, tienda, dejados, deben, fecha, observaciones
            ",
        )
        .bind(input.store_id)
        .bind(input.quantity_left)
        .bind(input.amount_owed)
        .bind(input.date)
        .bind(input.notes.as_deref())
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_fk_violation(e, UNKNOWN_STORE_MESSAGE))?;

        Ok(row.into())
    }

    /// Overwrite the editable fields of one delivery.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the delivery doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: DeliveryId,
        changes: &DeliveryChanges,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE entregas
            SET dejados = $2, deben = $3, fecha = $4, observaciones = $5
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(changes.quantity_left)
        .bind(changes.amount_owed)
        .bind(changes.date)
        .bind(changes.notes.as_deref())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Delete a delivery.
    ///
    /// # Returns
    ///
    /// Returns `true` if the delivery was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: DeliveryId) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM entregas
            WHERE id = $1
            ",
        )
        .bind(id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
