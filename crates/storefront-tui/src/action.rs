//! Every state change in the app flows through an [`Action`].

use secrecy::SecretString;
use storefront_api::{Error as ApiError, Product};
use storefront_core::view::Ticket;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

/// Transient message shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Info,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }
}

#[derive(Debug)]
pub enum Action {
    // ── Lifecycle ─────────────────────────────────────────────────
    Quit,
    Tick,
    Render,

    // ── Request results ───────────────────────────────────────────
    LoginFinished {
        ticket: Ticket,
        result: Result<SecretString, ApiError>,
    },
    ProductsFinished {
        ticket: Ticket,
        result: Result<Vec<Product>, ApiError>,
    },

    // ── Notifications ─────────────────────────────────────────────
    Notify(Notification),
    DismissNotification,
}
