//! Seed the database with sample stores and deliveries.
//!
//! Deliveries are dated relative to today in the panel's zone, so the daily
//! total has something to show right after seeding.

use chrono::{Days, NaiveDate};

use karam_admin::db::{Backend, PgBackend};
use karam_admin::models::{NewDelivery, StoreInput};

use super::{CommandError, connect};

struct SampleStore {
    nickname: &'static str,
    name: &'static str,
    address: &'static str,
    contact: &'static str,
    /// (days ago, left, owed, notes)
    deliveries: &'static [(u64, i32, i32, &'static str)],
}

const SAMPLES: &[SampleStore] = &[
    SampleStore {
        nickname: "La Esquina",
        name: "Abarrotes La Esquina",
        address: "Av. Juárez 120, Centro",
        contact: "Doña Lupe",
        deliveries: &[(7, 20, 150, "Pagó completo"), (0, 24, 80, "")],
    },
    SampleStore {
        nickname: "Don Chuy",
        name: "Miscelánea Don Chuy",
        address: "Calle Hidalgo 45",
        contact: "Jesús",
        deliveries: &[(3, 15, 0, "Pidió más de fresa"), (0, 12, 60, "")],
    },
    SampleStore {
        nickname: "Escuela",
        name: "Cooperativa Escuela Benito Juárez",
        address: "Calle Morelos 8",
        contact: "Maestra Rosa",
        deliveries: &[(1, 30, 200, "Vacaciones la próxima semana")],
    },
];

fn days_before(today: NaiveDate, days: u64) -> NaiveDate {
    today.checked_sub_days(Days::new(days)).unwrap_or(today)
}

/// Insert the sample data through the panel's backend.
///
/// # Errors
///
/// Returns an error if the database is unreachable or an insert fails.
pub async fn run() -> Result<(), CommandError> {
    let (config, pool) = connect().await?;
    let backend = PgBackend::new(pool);
    let today = karam_admin::services::today_in(config.timezone);

    let mut deliveries = 0_usize;
    for sample in SAMPLES {
        let store = backend
            .create_store(&StoreInput {
                nickname: sample.nickname.to_string(),
                name: sample.name.to_string(),
                address: sample.address.to_string(),
                contact: Some(sample.contact.to_string()),
                visit_date: Some(today),
            })
            .await?;
        tracing::info!(store_id = %store.id, name = %store.name, "Store created");

        for &(ago, left, owed, notes) in sample.deliveries {
            backend
                .create_delivery(&NewDelivery {
                    store_id: store.id,
                    quantity_left: Some(left),
                    amount_owed: Some(owed),
                    date: days_before(today, ago),
                    notes: (!notes.is_empty()).then(|| notes.to_string()),
                })
                .await?;
            deliveries += 1;
        }
    }

    tracing::info!(stores = SAMPLES.len(), deliveries, "Seeding complete!");
    Ok(())
}
