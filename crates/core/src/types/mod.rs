//! Core types for the panel.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod date;
pub mod id;
pub mod store_param;

pub use date::{DateError, FORM_DATE_FORMAT, newest_first, parse_form_date};
pub use id::*;
pub use store_param::{StoreIdError, parse_store_id};
