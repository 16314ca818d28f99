//! Form payloads and their validation.
//!
//! Validation runs before any backend call. A blank field is one that is
//! empty after trimming. Quantities are parsed leniently: anything that is
//! not an integer silently becomes "no value".

use serde::Deserialize;
use thiserror::Error;

use karam_core::{FORM_DATE_FORMAT, StoreId, parse_form_date};

use crate::models::{NewDelivery, Store, StoreInput};

/// Validation failures, worded as the notice the user sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    /// A field of the store creation form is blank.
    #[error("Por favor, completa todos los campos.")]
    IncompleteStore,

    /// A required field is blank.
    #[error("Por favor, completa todos los campos obligatorios.")]
    Incomplete,

    /// A date field is filled but is not a calendar date.
    #[error("La fecha no es válida.")]
    InvalidDate,
}

/// Parse a quantity field.
///
/// `None` for blank or non-numeric input. Zero is a real value.
#[must_use]
pub fn parse_lenient_int(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// =============================================================================
// Store Form
// =============================================================================

/// The store form, shared by the panel (create) and the edit screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StoreForm {
    #[serde(default)]
    pub apodo: String,
    #[serde(default)]
    pub nombre_tienda: String,
    #[serde(default)]
    pub domicilio: String,
    #[serde(default)]
    pub atiende: String,
    #[serde(default)]
    pub fecha: String,
}

impl StoreForm {
    /// Validate the creation form. Every field is required.
    ///
    /// # Errors
    ///
    /// Returns `FormError::IncompleteStore` if any field is blank and
    /// `FormError::InvalidDate` if the date doesn't parse.
    pub fn validate_new(&self) -> Result<StoreInput, FormError> {
        self.validate(FormError::IncompleteStore)
    }

    /// Validate the edit form. Every field is required.
    ///
    /// # Errors
    ///
    /// Returns `FormError::Incomplete` if any field is blank and
    /// `FormError::InvalidDate` if the date doesn't parse.
    pub fn validate_edit(&self) -> Result<StoreInput, FormError> {
        self.validate(FormError::Incomplete)
    }

    fn validate(&self, incomplete: FormError) -> Result<StoreInput, FormError> {
        let fields = [
            &self.apodo,
            &self.nombre_tienda,
            &self.domicilio,
            &self.atiende,
            &self.fecha,
        ];
        if fields.iter().any(|f| is_blank(f)) {
            return Err(incomplete);
        }

        let visit_date = parse_form_date(&self.fecha).map_err(|_| FormError::InvalidDate)?;

        Ok(StoreInput {
            nickname: self.apodo.trim().to_string(),
            name: self.nombre_tienda.trim().to_string(),
            address: self.domicilio.trim().to_string(),
            contact: non_blank(&self.atiende),
            visit_date: Some(visit_date),
        })
    }
}

impl From<&Store> for StoreForm {
    fn from(store: &Store) -> Self {
        Self {
            apodo: store.nickname.clone(),
            nombre_tienda: store.name.clone(),
            domicilio: store.address.clone(),
            atiende: store.contact.clone().unwrap_or_default(),
            fecha: store
                .visit_date
                .map(|d| d.format(FORM_DATE_FORMAT).to_string())
                .unwrap_or_default(),
        }
    }
}

// =============================================================================
// Delivery Form
// =============================================================================

/// The panel's "record a delivery" form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DeliveryForm {
    #[serde(default)]
    pub tienda: String,
    #[serde(default)]
    pub dejados: String,
    #[serde(default)]
    pub deben: String,
    #[serde(default)]
    pub fecha: String,
    #[serde(default)]
    pub observaciones: String,
}

impl DeliveryForm {
    /// Validate the form. Store, quantity, amount and date are required;
    /// notes are optional.
    ///
    /// # Errors
    ///
    /// Returns `FormError::Incomplete` if a required field is blank or no
    /// store is selected, and `FormError::InvalidDate` if the date doesn't
    /// parse.
    pub fn validate(&self) -> Result<NewDelivery, FormError> {
        let required = [&self.tienda, &self.dejados, &self.deben, &self.fecha];
        if required.iter().any(|f| is_blank(f)) {
            return Err(FormError::Incomplete);
        }

        let store_id = self
            .tienda
            .trim()
            .parse::<i32>()
            .map(StoreId::new)
            .map_err(|_| FormError::Incomplete)?;
        let date = parse_form_date(&self.fecha).map_err(|_| FormError::InvalidDate)?;

        Ok(NewDelivery {
            store_id,
            quantity_left: parse_lenient_int(&self.dejados),
            amount_owed: parse_lenient_int(&self.deben),
            date,
            notes: non_blank(&self.observaciones),
        })
    }
}
