//! Store domain models.

use chrono::NaiveDate;

use karam_core::StoreId;

/// A delivery destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    /// Storage-generated store ID.
    pub id: StoreId,
    /// Short name the drivers use.
    pub nickname: String,
    /// Display name of the store.
    pub name: String,
    /// Street address.
    pub address: String,
    /// Person who usually receives the delivery.
    pub contact: Option<String>,
    /// Date of the last visit.
    pub visit_date: Option<NaiveDate>,
}

impl Store {
    /// Overwrite every editable field with `input`, keeping the ID.
    pub fn apply(&mut self, input: &StoreInput) {
        self.nickname.clone_from(&input.nickname);
        self.name.clone_from(&input.name);
        self.address.clone_from(&input.address);
        self.contact.clone_from(&input.contact);
        self.visit_date = input.visit_date;
    }
}

/// Editable store fields, used both to create and to update a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreInput {
    pub nickname: String,
    pub name: String,
    pub address: String,
    pub contact: Option<String>,
    pub visit_date: Option<NaiveDate>,
}
