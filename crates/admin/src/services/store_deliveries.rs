//! The store-deliveries screen: one store's deliveries, newest first, each
//! with its own edit buffer.

use karam_core::{DeliveryId, newest_first};

use super::drafts::{DeliveryDraft, DraftBook};
use super::summary::UNKNOWN_STORE;
use crate::models::{Delivery, DeliveryChanges, Store};

/// Shown when there is no previous quantity.
pub const NOT_APPLICABLE: &str = "N/A";

/// In-memory state of the screen for one request.
#[derive(Debug, Clone)]
pub struct StoreDeliveries {
    store: Option<Store>,
    deliveries: Vec<Delivery>,
    drafts: DraftBook,
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryRow {
    pub id: DeliveryId,
    /// Quantity of the next-older delivery.
    pub previous_quantity: Option<i32>,
    pub draft: DeliveryDraft,
}

impl DeliveryRow {
    #[must_use]
    pub fn previous_label(&self) -> String {
        self.previous_quantity
            .map_or_else(|| NOT_APPLICABLE.to_string(), |n| n.to_string())
    }
}

/// Quantity of the row right after each row, in the given order.
#[must_use]
pub fn previous_quantities(rows: &[Delivery]) -> Vec<Option<i32>> {
    (0..rows.len())
        .map(|i| rows.get(i + 1).and_then(|next| next.quantity_left))
        .collect()
}

impl StoreDeliveries {
    /// Build the screen from freshly loaded data, seeding every buffer.
    #[must_use]
    pub fn new(store: Option<Store>, mut deliveries: Vec<Delivery>) -> Self {
        deliveries.sort_by(|a, b| newest_first(&a.date, &b.date));
        let drafts = DraftBook::from_deliveries(&deliveries);
        Self {
            store,
            deliveries,
            drafts,
        }
    }

    /// Store display name, or the unknown-store label.
    #[must_use]
    pub fn store_name(&self) -> &str {
        self.store.as_ref().map_or(UNKNOWN_STORE, |s| s.name.as_str())
    }

    /// Deliveries, newest first.
    #[must_use]
    pub fn deliveries(&self) -> &[Delivery] {
        &self.deliveries
    }

    #[must_use]
    pub const fn drafts(&self) -> &DraftBook {
        &self.drafts
    }

    #[must_use]
    pub fn contains(&self, id: DeliveryId) -> bool {
        self.deliveries.iter().any(|d| d.id == id)
    }

    /// Take over submitted buffers for rows that still exist.
    ///
    /// Rows with no submitted buffer keep their stored values.
    pub fn adopt_drafts(&mut self, submitted: &DraftBook) {
        for delivery in &self.deliveries {
            if let Some(draft) = submitted.get(delivery.id) {
                self.drafts.replace(delivery.id, draft.clone());
            }
        }
    }

    /// Buffer of one row.
    #[must_use]
    pub fn draft(&self, id: DeliveryId) -> Option<&DeliveryDraft> {
        self.drafts.get(id)
    }

    /// Reflect a persisted update: patch the row, restore date order and
    /// reseed only that row's buffer from what was stored.
    pub fn mirror_saved(&mut self, id: DeliveryId, changes: &DeliveryChanges) {
        let Some(delivery) = self.deliveries.iter_mut().find(|d| d.id == id) else {
            return;
        };
        delivery.apply(changes);
        let saved = delivery.clone();
        self.deliveries.sort_by(|a, b| newest_first(&a.date, &b.date));
        self.drafts.reseed(&saved);
    }

    /// Reflect a persisted delete: drop the row and its buffer.
    pub fn forget(&mut self, id: DeliveryId) {
        self.deliveries.retain(|d| d.id != id);
        self.drafts.remove(id);
    }

    /// Rows to render, with the derived previous quantity.
    #[must_use]
    pub fn rows(&self) -> Vec<DeliveryRow> {
        previous_quantities(&self.deliveries)
            .into_iter()
            .zip(&self.deliveries)
            .map(|(previous_quantity, delivery)| DeliveryRow {
                id: delivery.id,
                previous_quantity,
                draft: self
                    .drafts
                    .get(delivery.id)
                    .cloned()
                    .unwrap_or_else(|| DeliveryDraft::from(delivery)),
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use chrono::NaiveDate;
    use karam_core::StoreId;

    use super::super::drafts::DraftField;
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn delivery(id: i32, left: Option<i32>, day: &str) -> Delivery {
        Delivery {
            id: DeliveryId::new(id),
            store_id: StoreId::new(1),
            quantity_left: left,
            amount_owed: Some(0),
            date: date(day),
            notes: None,
        }
    }

    fn screen() -> StoreDeliveries {
        StoreDeliveries::new(
            None,
            vec![
                delivery(10, Some(5), "2024-01-01"),
                delivery(11, Some(8), "2024-01-02"),
            ],
        )
    }

    #[test]
    fn test_rows_newest_first_with_previous() {
        let rows = screen().rows();
        assert_eq!(rows[0].id, DeliveryId::new(11));
        assert_eq!(rows[0].previous_label(), "5");
        assert_eq!(rows[1].id, DeliveryId::new(10));
        assert_eq!(rows[1].previous_label(), NOT_APPLICABLE);
    }

    #[test]
    fn test_unknown_store_name() {
        assert_eq!(screen().store_name(), UNKNOWN_STORE);
    }

    #[test]
    fn test_mirror_saved_touches_one_row() {
        let mut screen = screen();
        let mut submitted = DraftBook::from_deliveries(screen.deliveries());
        submitted.edit(DeliveryId::new(10), DraftField::Notes, "sin cambio");
        screen.adopt_drafts(&submitted);

        let changes = DeliveryChanges {
            quantity_left: Some(9),
            amount_owed: Some(1),
            date: date("2023-12-31"),
            notes: None,
        };
        screen.mirror_saved(DeliveryId::new(11), &changes);

        let rows = screen.rows();
        assert_eq!(rows[0].id, DeliveryId::new(10));
        assert_eq!(rows[0].draft.notes, "sin cambio");
        assert_eq!(rows[0].previous_label(), "9");
        assert_eq!(rows[1].draft.quantity_left, "9");
    }

    #[test]
    fn test_forget_removes_row_and_buffer() {
        let mut screen = screen();
        screen.forget(DeliveryId::new(11));
        assert!(!screen.contains(DeliveryId::new(11)));
        assert!(screen.draft(DeliveryId::new(11)).is_none());
        assert_eq!(screen.rows().len(), 1);
    }

    #[test]
    fn test_previous_quantities_missing_value() {
        let rows = vec![
            delivery(1, Some(3), "2024-01-03"),
            delivery(2, None, "2024-01-02"),
            delivery(3, Some(1), "2024-01-01"),
        ];
        assert_eq!(previous_quantities(&rows), vec![None, Some(1), None]);
    }
}
