//! Database migration command.
//!
//! Applies `crates/admin/migrations/`: the `tiendas` and `entregas` tables
//! and the `entregas_del_dia` function.

use super::{CommandError, connect};

/// Run the panel's migrations.
///
/// # Errors
///
/// Returns an error if the configuration is incomplete, the database is
/// unreachable or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let (_, pool) = connect().await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../admin/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
