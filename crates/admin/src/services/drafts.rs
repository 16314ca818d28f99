//! Per-row edit buffers for the store-deliveries screen.
//!
//! Each delivery row has its own [`DeliveryDraft`], keyed by delivery ID.
//! Buffers hold raw text so partial or empty input survives a round trip;
//! nothing is parsed until the row is saved.

use std::collections::HashMap;

use karam_core::{DeliveryId, FORM_DATE_FORMAT, parse_form_date};

use super::forms::{FormError, parse_lenient_int};
use crate::models::{Delivery, DeliveryChanges};

/// Uncommitted values of one delivery row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryDraft {
    pub quantity_left: String,
    pub amount_owed: String,
    pub date: String,
    pub notes: String,
}

impl From<&Delivery> for DeliveryDraft {
    fn from(delivery: &Delivery) -> Self {
        Self {
            quantity_left: delivery
                .quantity_left
                .map(|n| n.to_string())
                .unwrap_or_default(),
            amount_owed: delivery
                .amount_owed
                .map(|n| n.to_string())
                .unwrap_or_default(),
            date: delivery.date.format(FORM_DATE_FORMAT).to_string(),
            notes: delivery.notes.clone().unwrap_or_default(),
        }
    }
}

impl DeliveryDraft {
    /// Turn the buffer into an update.
    ///
    /// Quantity, amount and date must be filled in. Quantity and amount that
    /// are not integers become `None`; empty notes become `None`.
    ///
    /// # Errors
    ///
    /// Returns `FormError::Incomplete` if a required field is blank and
    /// `FormError::InvalidDate` if the date doesn't parse.
    pub fn to_changes(&self) -> Result<DeliveryChanges, FormError> {
        let required = [&self.quantity_left, &self.amount_owed, &self.date];
        if required.iter().any(|f| f.trim().is_empty()) {
            return Err(FormError::Incomplete);
        }

        let date = parse_form_date(&self.date).map_err(|_| FormError::InvalidDate)?;
        let notes = self.notes.trim();

        Ok(DeliveryChanges {
            quantity_left: parse_lenient_int(&self.quantity_left),
            amount_owed: parse_lenient_int(&self.amount_owed),
            date,
            notes: (!notes.is_empty()).then(|| notes.to_string()),
        })
    }

    /// Overwrite one field.
    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::QuantityLeft => self.quantity_left = value,
            DraftField::AmountOwed => self.amount_owed = value,
            DraftField::Date => self.date = value,
            DraftField::Notes => self.notes = value,
        }
    }
}

/// An editable column of a delivery row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    QuantityLeft,
    AmountOwed,
    Date,
    Notes,
}

impl DraftField {
    /// Form name prefix of this field.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::QuantityLeft => "dejados",
            Self::AmountOwed => "deben",
            Self::Date => "fecha",
            Self::Notes => "observaciones",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "dejados" => Some(Self::QuantityLeft),
            "deben" => Some(Self::AmountOwed),
            "fecha" => Some(Self::Date),
            "observaciones" => Some(Self::Notes),
            _ => None,
        }
    }

    /// Form name of this field for one row, e.g. `dejados-11`.
    #[must_use]
    pub fn input_name(self, id: DeliveryId) -> String {
        format!("{}-{id}", self.name())
    }
}

/// Every row's buffer, keyed by delivery ID.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftBook(HashMap<DeliveryId, DeliveryDraft>);

impl DraftBook {
    /// Seed one buffer per delivery from its stored values.
    #[must_use]
    pub fn from_deliveries(deliveries: &[Delivery]) -> Self {
        Self(
            deliveries
                .iter()
                .map(|d| (d.id, DeliveryDraft::from(d)))
                .collect(),
        )
    }

    /// Rebuild buffers from submitted `<field>-<id>` pairs.
    ///
    /// Pairs that don't follow that shape (buttons, unknown fields) are
    /// skipped.
    #[must_use]
    pub fn from_form(pairs: &[(String, String)]) -> Self {
        let mut book = Self::default();
        for (key, value) in pairs {
            let Some((name, id)) = key.rsplit_once('-') else {
                continue;
            };
            let (Some(field), Ok(id)) = (DraftField::from_name(name), id.parse::<i32>()) else {
                continue;
            };
            book.edit(DeliveryId::new(id), field, value.clone());
        }
        book
    }

    #[must_use]
    pub fn get(&self, id: DeliveryId) -> Option<&DeliveryDraft> {
        self.0.get(&id)
    }

    /// Change one field of one row's buffer. No other buffer is touched.
    pub fn edit(&mut self, id: DeliveryId, field: DraftField, value: impl Into<String>) {
        self.0.entry(id).or_default().set(field, value);
    }

    /// Replace a row's buffer with the stored values of `delivery`.
    pub fn reseed(&mut self, delivery: &Delivery) {
        self.0.insert(delivery.id, DeliveryDraft::from(delivery));
    }

    /// Swap in a whole buffer for one row.
    pub fn replace(&mut self, id: DeliveryId, draft: DeliveryDraft) {
        self.0.insert(id, draft);
    }

    pub fn remove(&mut self, id: DeliveryId) -> Option<DeliveryDraft> {
        self.0.remove(&id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use chrono::NaiveDate;
    use karam_core::StoreId;

    use super::*;

    fn delivery(id: i32, left: Option<i32>, notes: Option<&str>) -> Delivery {
        Delivery {
            id: DeliveryId::new(id),
            store_id: StoreId::new(1),
            quantity_left: left,
            amount_owed: Some(20),
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            notes: notes.map(ToString::to_string),
        }
    }

    #[test]
    fn test_draft_seeded_as_text() {
        let draft = DeliveryDraft::from(&delivery(1, None, None));
        assert_eq!(draft.quantity_left, "");
        assert_eq!(draft.amount_owed, "20");
        assert_eq!(draft.date, "2024-01-02");
        assert_eq!(draft.notes, "");
    }

    #[test]
    fn test_to_changes_requires_fields() {
        let mut draft = DeliveryDraft::from(&delivery(1, Some(5), None));
        draft.quantity_left = String::new();
        assert_eq!(draft.to_changes(), Err(FormError::Incomplete));
    }

    #[test]
    fn test_to_changes_lenient_numbers() {
        let draft = DeliveryDraft {
            quantity_left: "abc".to_string(),
            amount_owed: "0".to_string(),
            date: "2024-02-01".to_string(),
            notes: "  ".to_string(),
        };
        let changes = draft.to_changes().unwrap();
        assert_eq!(changes.quantity_left, None);
        assert_eq!(changes.amount_owed, Some(0));
        assert_eq!(changes.notes, None);
    }

    #[test]
    fn test_edit_isolated_per_row() {
        let deliveries = vec![delivery(1, Some(5), None), delivery(2, Some(8), Some("ok"))];
        let mut book = DraftBook::from_deliveries(&deliveries);
        let before = book.get(DeliveryId::new(2)).cloned();

        book.edit(DeliveryId::new(1), DraftField::QuantityLeft, "99");
        book.edit(DeliveryId::new(1), DraftField::Notes, "cambió");

        assert_eq!(book.get(DeliveryId::new(1)).unwrap().quantity_left, "99");
        assert_eq!(book.get(DeliveryId::new(2)).cloned(), before);
    }

    #[test]
    fn test_from_form_parses_suffixes() {
        let pairs = vec![
            ("dejados-11".to_string(), "8".to_string()),
            ("deben-11".to_string(), "".to_string()),
            ("fecha-11".to_string(), "2024-01-02".to_string()),
            ("observaciones-11".to_string(), "a-b".to_string()),
            ("dejados-10".to_string(), "5".to_string()),
            ("save".to_string(), "11".to_string()),
            ("bogus-x".to_string(), "1".to_string()),
        ];
        let book = DraftBook::from_form(&pairs);

        assert!(book.get(DeliveryId::new(1)).is_none());
        let row = book.get(DeliveryId::new(11)).unwrap();
        assert_eq!(row.quantity_left, "8");
        assert_eq!(row.amount_owed, "");
        assert_eq!(row.notes, "a-b");
        assert_eq!(book.get(DeliveryId::new(10)).unwrap().quantity_left, "5");
    }

    #[test]
    fn test_input_name() {
        assert_eq!(
            DraftField::Date.input_name(DeliveryId::new(7)),
            "fecha-7"
        );
    }

    #[test]
    fn test_remove_and_reseed() {
        let deliveries = vec![delivery(1, Some(5), None)];
        let mut book = DraftBook::from_deliveries(&deliveries);
        book.edit(DeliveryId::new(1), DraftField::QuantityLeft, "6");
        book.reseed(&deliveries[0]);
        assert_eq!(book.get(DeliveryId::new(1)).unwrap().quantity_left, "5");
        assert!(book.remove(DeliveryId::new(1)).is_some());
        assert!(book.get(DeliveryId::new(1)).is_none());
    }
}
