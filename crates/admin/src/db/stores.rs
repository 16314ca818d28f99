//! Database operations for stores (`tiendas`).

use chrono::NaiveDate;
use sqlx::PgPool;

use karam_core::StoreId;

use super::RepositoryError;
use crate::models::{Store, StoreInput};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for store queries.
#[derive(Debug, sqlx::FromRow)]
struct StoreRow {
    id: i32,
    apodo: String,
    nombre_tienda: String,
    domicilio: String,
    atiende: Option<String>,
    fecha: Option<NaiveDate>,
}

impl From<StoreRow> for Store {
    fn from(row: StoreRow) -> Self {
        Self {
            id: StoreId::new(row.id),
            nickname: row.apodo,
            name: row.nombre_tienda,
            address: row.domicilio,
            contact: row.atiende,
            visit_date: row.fecha,
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for store database operations.
pub struct StoreRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StoreRepository<'a> {
    /// Create a new store repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every store, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Store>, RepositoryError> {
        let rows = sqlx::query_as::<_, StoreRow>(
            r"
            SELECT id, apodo, nombre_tienda, domicilio, atiende, fecha
            FROM tiendas
            ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a store by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: StoreId) -> Result<Option<Store>, RepositoryError> {
        let row = sqlx::query_as::<_, StoreRow>(
            r"
            SELECT id, apodo, nombre_tienda, domicilio, atiende, fecha
            FROM tiendas
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Create a new store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, input: &StoreInput) -> Result<Store, RepositoryError> {
        let row = sqlx::query_as::<_, StoreRow>(
            r"
            INSERT INTO tiendas (apodo, nombre_tienda, domicilio, atiende, fecha)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, apodo, nombre_tienda, domicilio, atiende, fecha
            ",
        )
        .bind(&input.nickname)
        .bind(&input.name)
        .bind(&input.address)
        .bind(input.contact.as_deref())
        .bind(input.visit_date)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Overwrite every editable field of a store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the store doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(&self, id: StoreId, input: &StoreInput) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE tiendas
            SET apodo = $2, nombre_tienda = $3, domicilio = $4, atiende = $5, fecha = $6
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(&input.nickname)
        .bind(&input.name)
        .bind(&input.address)
        .bind(input.contact.as_deref())
        .bind(input.visit_date)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Delete a store.
    ///
    /// Its deliveries go with it (`ON DELETE CASCADE`).
    ///
    /// # Returns
    ///
    /// Returns `true` if the store was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: StoreId) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM tiendas
            WHERE id = $1
            ",
        )
        .bind(id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
