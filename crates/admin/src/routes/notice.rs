//! Transient notices shown at the top of a screen.
//!
//! After a redirect, mutations report their outcome through a short code in
//! the query string (`?notice=store_created`, `?error=store_delete_failed`).
//! Only known codes map to a message.

use serde::Deserialize;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    /// CSS class used by the stylesheet.
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self.kind {
            NoticeKind::Success => "notice notice-success",
            NoticeKind::Error => "notice notice-error",
            NoticeKind::Info => "notice notice-info",
        }
    }

    /// Resolve redirect codes. An error code wins over a notice code.
    #[must_use]
    pub fn from_codes(notice: Option<&str>, error: Option<&str>) -> Option<Self> {
        error
            .and_then(error_message)
            .map(Self::error)
            .or_else(|| notice.and_then(notice_message).map(Self::success))
    }
}

/// Query parameters carrying a redirect outcome.
#[derive(Debug, Default, Deserialize)]
pub struct NoticeParams {
    pub notice: Option<String>,
    pub error: Option<String>,
}

impl NoticeParams {
    #[must_use]
    pub fn resolve(&self) -> Option<Notice> {
        Notice::from_codes(self.notice.as_deref(), self.error.as_deref())
    }
}

fn notice_message(code: &str) -> Option<&'static str> {
    match code {
        "store_created" => Some("Tienda agregada correctamente."),
        "store_deleted" => Some("Tienda eliminada correctamente."),
        "delivery_created" => Some("Entrega registrada correctamente."),
        "delivery_deleted" => Some("Entrega eliminada correctamente."),
        _ => None,
    }
}

fn error_message(code: &str) -> Option<&'static str> {
    match code {
        "store_delete_failed" => Some("Error al eliminar la tienda. Por favor, intenta de nuevo."),
        "delivery_delete_failed" => {
            Some("Error al eliminar la entrega. Por favor, intenta de nuevo.")
        }
        _ => None,
    }
}
