//! Daily aggregate: units left today, per store and overall.
//!
//! "Today" is the civil date in the configured zone, not the host's. The
//! filtering by date happens in the backend (`entregas_del_dia`); grouping
//! and summing happen here.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use karam_core::StoreId;

use crate::db::{Backend, RepositoryError};
use crate::models::{Delivery, Store};

/// Civil date of `now` in `tz`.
#[must_use]
pub fn today_at(now: DateTime<Utc>, tz: Tz) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

/// Current civil date in `tz`.
#[must_use]
pub fn today_in(tz: Tz) -> NaiveDate {
    today_at(Utc::now(), tz)
}

/// Label for a group whose store isn't in the loaded list.
#[must_use]
pub fn fallback_store_label(id: StoreId) -> String {
    format!("Tienda #{id}")
}

/// Totals for one store on one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreTotal {
    pub store_id: StoreId,
    pub store_name: String,
    /// Deliveries recorded that day, with or without a quantity.
    pub deliveries: usize,
    /// Deliveries that carried a quantity.
    pub reported: usize,
    /// Sum of the quantities that were reported.
    pub units: i64,
}

/// The aggregate for one date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyReport {
    pub date: NaiveDate,
    /// One entry per store, in order of first appearance.
    pub groups: Vec<StoreTotal>,
    pub grand_total: i64,
}

impl DailyReport {
    /// Group `deliveries` by store and sum their quantities.
    #[must_use]
    pub fn build(date: NaiveDate, stores: &[Store], deliveries: &[Delivery]) -> Self {
        let names: HashMap<StoreId, &str> =
            stores.iter().map(|s| (s.id, s.name.as_str())).collect();
        let mut slots: HashMap<StoreId, usize> = HashMap::new();
        let mut groups: Vec<StoreTotal> = Vec::new();

        for delivery in deliveries {
            let slot = *slots.entry(delivery.store_id).or_insert_with(|| {
                groups.push(StoreTotal {
                    store_id: delivery.store_id,
                    store_name: names.get(&delivery.store_id).map_or_else(
                        || fallback_store_label(delivery.store_id),
                        |name| (*name).to_string(),
                    ),
                    deliveries: 0,
                    reported: 0,
                    units: 0,
                });
                groups.len() - 1
            });

            let Some(group) = groups.get_mut(slot) else {
                continue;
            };
            group.deliveries += 1;
            if let Some(quantity) = delivery.quantity_left {
                group.reported += 1;
                group.units += i64::from(quantity);
            }
        }

        let grand_total = groups.iter().map(|g| g.units).sum();

        Self {
            date,
            groups,
            grand_total,
        }
    }

    /// `true` when nothing was delivered that day.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Informational notice shown instead of an empty table.
    #[must_use]
    pub fn empty_message(&self) -> String {
        format!(
            "No hay entregas registradas para el {}.",
            self.date.format(karam_core::FORM_DATE_FORMAT)
        )
    }
}

/// Fetch the deliveries of `date` from the backend and aggregate them.
///
/// # Errors
///
/// Returns `RepositoryError` if the backend call fails.
pub async fn daily_report(
    backend: &dyn Backend,
    date: NaiveDate,
    stores: &[Store],
) -> Result<DailyReport, RepositoryError> {
    let deliveries = backend.deliveries_on(date).await?;
    tracing::debug!(%date, count = deliveries.len(), "Loaded deliveries of the day");
    Ok(DailyReport::build(date, stores, &deliveries))
}
