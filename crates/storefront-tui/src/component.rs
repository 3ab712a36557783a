//! Component trait, implemented by every screen.

use color_eyre::eyre::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{Frame, layout::Rect};
use tokio::sync::mpsc::UnboundedSender;

use crate::action::Action;

/// Lifecycle: `init` → (`enter` → (`handle_*` | `update` | `render`)* → `leave`)*
pub trait Component: Send {
    /// Called once at startup with the app's action sender.
    fn init(&mut self, _action_tx: UnboundedSender<Action>) -> Result<()> {
        Ok(())
    }

    /// The screen became active (its route was navigated to).
    fn enter(&mut self) -> Result<()> {
        Ok(())
    }

    /// The screen is being replaced. In-flight work must be abandoned.
    fn leave(&mut self) {}

    fn handle_key_event(&mut self, _key: KeyEvent) -> Result<Option<Action>> {
        Ok(None)
    }

    fn handle_mouse_event(&mut self, _mouse: MouseEvent) -> Result<Option<Action>> {
        Ok(None)
    }

    /// Process a dispatched action. May return a follow-up action.
    fn update(&mut self, _action: Action) -> Result<Option<Action>> {
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect);

    /// Key hints for the status bar.
    fn key_hints(&self) -> &'static str {
        ""
    }
}
