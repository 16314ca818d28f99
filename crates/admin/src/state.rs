//! Application state shared across handlers.

use std::sync::Arc;

use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::db::Backend;
use crate::services::daily;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The backend is built once at
/// startup and lives as long as the process.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    backend: Arc<dyn Backend>,
    timezone: Tz,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `backend` - Backend capability every screen reads and writes through
    /// * `timezone` - Zone whose civil date is "today"
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>, timezone: Tz) -> Self {
        Self {
            inner: Arc::new(AppStateInner { backend, timezone }),
        }
    }

    /// Get a reference to the backend.
    #[must_use]
    pub fn backend(&self) -> &dyn Backend {
        self.inner.backend.as_ref()
    }

    /// Get the configured time zone.
    #[must_use]
    pub fn timezone(&self) -> Tz {
        self.inner.timezone
    }

    /// Current civil date in the configured time zone.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        daily::today_in(self.inner.timezone)
    }
}
