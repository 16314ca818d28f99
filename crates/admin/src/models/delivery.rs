//! Delivery domain models.

use chrono::NaiveDate;

use karam_core::{DeliveryId, StoreId};

/// One recorded visit to a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    /// Storage-generated delivery ID.
    pub id: DeliveryId,
    /// Store this delivery belongs to.
    pub store_id: StoreId,
    /// Units left at the store on this visit.
    pub quantity_left: Option<i32>,
    /// Amount the store owes after this visit.
    pub amount_owed: Option<i32>,
    /// Date of the visit.
    pub date: NaiveDate,
    /// Free-text notes.
    pub notes: Option<String>,
}

impl Delivery {
    /// Overwrite the editable fields with `changes`.
    pub fn apply(&mut self, changes: &DeliveryChanges) {
        self.quantity_left = changes.quantity_left;
        self.amount_owed = changes.amount_owed;
        self.date = changes.date;
        self.notes.clone_from(&changes.notes);
    }
}

/// Input for recording a new delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDelivery {
    pub store_id: StoreId,
    pub quantity_left: Option<i32>,
    pub amount_owed: Option<i32>,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

/// Input for updating a delivery in place.
///
/// Every field is written; `None` clears the column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryChanges {
    pub quantity_left: Option<i32>,
    pub amount_owed: Option<i32>,
    pub date: NaiveDate,
    pub notes: Option<String>,
}
