//! Routes and the navigation capability views redirect through.

use std::sync::{Mutex, PoisonError};

use strum::{AsRefStr, Display, EnumString};

/// Application routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, AsRefStr, EnumString)]
pub enum Route {
    /// The products list.
    #[default]
    #[strum(serialize = "/")]
    Home,
    /// The login form.
    #[strum(serialize = "/login")]
    Login,
}

/// "Go to path" capability.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Navigator that records requests for the owner to act on.
///
/// The TUI drains it after every action; tests inspect the history.
#[derive(Debug, Default)]
pub struct RouteQueue {
    pending: Mutex<Vec<Route>>,
}

impl RouteQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every route requested since the last call, oldest first.
    pub fn drain(&self) -> Vec<Route> {
        std::mem::take(&mut *self.pending.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Whether nothing has been requested since the last drain.
    pub fn is_empty(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}

impl Navigator for RouteQueue {
    fn navigate(&self, route: Route) {
        tracing::debug!(route = %route, "navigation requested");
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(route);
    }
}
