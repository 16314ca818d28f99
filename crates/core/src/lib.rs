//! Karam Core - Shared types library.
//!
//! This crate provides common types used across all panel components:
//! - `admin` - The delivery administration panel (stores, deliveries, daily totals)
//! - `cli` - Command-line tools for migrations, seeding and reports
//!
//! # Architecture
//!
//! The core crate contains only types and parsing rules - no I/O, no database
//! access, no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, the `storeId` navigation parameter and form dates

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
