//! Panel logic that sits between the routes and the backend.
//!
//! # Services
//!
//! - `daily` - Daily aggregate of units left, in the configured time zone
//! - `drafts` - Per-row edit buffers for delivery rows
//! - `forms` - Form payloads and validation
//! - `load` - Screen load lifecycle
//! - `store_deliveries` - The store-deliveries screen model
//! - `summary` - Latest delivery per store

pub mod daily;
pub mod drafts;
pub mod forms;
pub mod load;
pub mod store_deliveries;
pub mod summary;

pub use daily::{DailyReport, StoreTotal, daily_report, today_in};
pub use drafts::{DeliveryDraft, DraftBook, DraftField};
pub use forms::{DeliveryForm, FormError, StoreForm, parse_lenient_int};
pub use load::LoadState;
pub use store_deliveries::{DeliveryRow, StoreDeliveries};
pub use summary::{StoreSummary, summarize};
