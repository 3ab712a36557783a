//! Navigation bar with a title, an optional logout control and caller-supplied content.
//!
//! The bar only *signals* logout; whoever embeds it owns the logic.

use tracing::trace;

use super::decorate::{Decorate, TooltipTarget, TooltipTrigger};

pub const DEFAULT_TITLE: &str = "Navbar";
pub const NAV_LABEL: &str = "Main Navigation";
pub const LOGOUT_ID: &str = "logout";
pub const LOGOUT_TEXT: &str = "Logout";
pub const LOGOUT_LABEL: &str = "Log out of your account";

/// Signals emitted by the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    Logout,
}

#[derive(Debug, Clone)]
pub struct NavBar {
    title: String,
    show_logout: bool,
    slot: Vec<String>,
    mounted: bool,
}

impl Default for NavBar {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_owned(),
            show_logout: true,
            slot: Vec::new(),
            mounted: false,
        }
    }
}

impl NavBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_logout(mut self, show_logout: bool) -> Self {
        self.show_logout = show_logout;
        self
    }

    /// Content rendered between the title and the logout control.
    pub fn with_slot<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.slot = lines.into_iter().map(Into::into).collect();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn show_logout(&self) -> bool {
        self.show_logout
    }

    pub fn slot(&self) -> &[String] {
        &self.slot
    }

    /// The logout control was activated. `None` when the control is hidden.
    pub fn activate_logout(&self) -> Option<NavEvent> {
        self.show_logout.then_some(NavEvent::Logout)
    }

    /// Elements that carry a tooltip.
    pub fn tooltip_targets(&self) -> Vec<TooltipTarget> {
        if self.show_logout {
            vec![TooltipTarget {
                id: LOGOUT_ID,
                text: LOGOUT_TEXT.to_owned(),
                trigger: TooltipTrigger::Hover,
            }]
        } else {
            Vec::new()
        }
    }

    /// Run the one-shot decoration pass. Returns `false` if already mounted.
    pub fn mount(&mut self, decorator: &mut dyn Decorate) -> bool {
        if self.mounted {
            return false;
        }
        let targets = self.tooltip_targets();
        trace!(count = targets.len(), "decorating navbar");
        decorator.decorate(&targets);
        self.mounted = true;
        true
    }

    pub fn unmount(&mut self) {
        self.mounted = false;
    }
}
