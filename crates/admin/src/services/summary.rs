//! Latest delivery per store, for the panel's summary table.

use std::collections::HashMap;

use karam_core::{StoreId, newest_first};

use crate::models::{Delivery, Store};

/// Label for a delivery whose store isn't in the loaded list.
pub const UNKNOWN_STORE: &str = "Desconocido";

/// One summary row: a store and its most recent delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSummary {
    pub store_id: StoreId,
    pub store_name: String,
    pub latest: Delivery,
}

/// Pick the most recent delivery of every store that has one.
///
/// Rows come out in order of each store's first appearance. Among deliveries
/// sharing the maximal date, the earliest in `deliveries` wins.
#[must_use]
pub fn latest_per_store(deliveries: &[Delivery]) -> Vec<&Delivery> {
    let mut slots: HashMap<StoreId, usize> = HashMap::new();
    let mut latest: Vec<&Delivery> = Vec::new();

    for delivery in deliveries {
        match slots.get(&delivery.store_id) {
            Some(&slot) => {
                if let Some(current) = latest.get_mut(slot)
                    && newest_first(&delivery.date, &current.date).is_lt()
                {
                    *current = delivery;
                }
            }
            None => {
                slots.insert(delivery.store_id, latest.len());
                latest.push(delivery);
            }
        }
    }

    latest
}

/// Build the summary rows, resolving each store's display name.
#[must_use]
pub fn summarize(stores: &[Store], deliveries: &[Delivery]) -> Vec<StoreSummary> {
    let names: HashMap<StoreId, &str> = stores.iter().map(|s| (s.id, s.name.as_str())).collect();

    latest_per_store(deliveries)
        .into_iter()
        .map(|delivery| StoreSummary {
            store_id: delivery.store_id,
            store_name: names
                .get(&delivery.store_id)
                .map_or_else(|| UNKNOWN_STORE.to_string(), |name| (*name).to_string()),
            latest: delivery.clone(),
        })
        .collect()
}
