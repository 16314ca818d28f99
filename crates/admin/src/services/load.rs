//! Screen load lifecycle: `Idle -> Loading -> Ready | Failed`.
//!
//! A screen walks this machine once per request. `Ready` and `Failed` are
//! terminal; the only way to retry is to load the page again.

use std::future::Future;

use crate::error::AppError;

/// Where a screen is in its load.
#[derive(Debug, Default)]
pub enum LoadState<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    Failed(AppError),
}

impl<T> LoadState<T> {
    /// A screen that failed before any fetch was attempted.
    #[must_use]
    pub const fn failed(err: AppError) -> Self {
        Self::Failed(err)
    }

    /// `Idle -> Loading`. Any other state is left as is.
    #[must_use]
    pub fn begin(self) -> Self {
        match self {
            Self::Idle => Self::Loading,
            other => other,
        }
    }

    /// `Loading -> Ready | Failed`. Terminal states are left as is.
    #[must_use]
    pub fn settle(self, result: Result<T, AppError>) -> Self {
        match self {
            Self::Loading => match result {
                Ok(value) => Self::Ready(value),
                Err(err) => Self::Failed(err),
            },
            other => other,
        }
    }

    /// Run `load` through the whole lifecycle.
    pub async fn run<F>(load: F) -> Self
    where
        F: Future<Output = Result<T, AppError>>,
    {
        let state = Self::Idle.begin();
        let result = load.await;
        state.settle(result)
    }

    /// The loaded value or the failure.
    ///
    /// # Errors
    ///
    /// Returns the load error, or `AppError::Internal` if the load never
    /// finished.
    pub fn into_result(self) -> Result<T, AppError> {
        match self {
            Self::Ready(value) => Ok(value),
            Self::Failed(err) => Err(err),
            Self::Idle | Self::Loading => Err(AppError::Internal("Cargando...".to_string())),
        }
    }
}
