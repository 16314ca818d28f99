//! Domain models for the panel.

pub mod delivery;
pub mod store;

pub use delivery::{Delivery, DeliveryChanges, NewDelivery};
pub use store::{Store, StoreInput};
