//! Application core: event loop, route-driven screen switching, action dispatch.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};
use storefront_core::{Backend, Navigator, Route, RouteQueue, TokenStore};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::action::{Action, Notification, NotificationLevel};
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screen::ScreenId;
use crate::screens::{LoginScreen, ProductsScreen};
use crate::theme;
use crate::tui::Tui;

/// How long a status-bar notification stays up.
const NOTIFICATION_TTL: Duration = Duration::from_secs(4);

/// Upper bound on chained redirects handled in one pass.
const MAX_REDIRECTS: usize = 4;

pub struct App {
    screens: HashMap<ScreenId, Box<dyn Component>>,
    active: Option<ScreenId>,
    routes: Arc<RouteQueue>,
    running: bool,
    notification: Option<(Notification, Instant)>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new<B: Backend + 'static>(backend: B, tokens: TokenStore, title: String) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let backend = Arc::new(backend);
        let routes = Arc::new(RouteQueue::new());

        let mut screens: HashMap<ScreenId, Box<dyn Component>> = HashMap::new();
        screens.insert(
            ScreenId::Login,
            Box::new(LoginScreen::new(
                Arc::clone(&backend),
                tokens.clone(),
                routes.clone(),
            )),
        );
        screens.insert(
            ScreenId::Products,
            Box::new(ProductsScreen::new(backend, tokens, routes.clone(), title)),
        );

        Self {
            screens,
            active: None,
            routes,
            running: true,
            notification: None,
            action_tx,
            action_rx,
        }
    }

    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        Ok(())
    }

    /// Land on the home route; its guard decides where we end up.
    fn start(&mut self) -> Result<()> {
        self.init_screens()?;
        self.routes.navigate(Route::default());
        self.apply_navigation()
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.start()?;

        let mut events = EventReader::new(
            Duration::from_millis(100), // throbber frames
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(action) = self.handle_mouse_event(mouse)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render | Event::Resize => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                if matches!(action, Action::Render) {
                    tui.draw(|frame| self.render(frame))?;
                } else {
                    self.process_action(action)?;
                }
                self.apply_navigation()?;
            }
        }

        events.stop();
        if let Some(screen) = self.active.and_then(|id| self.screens.get_mut(&id)) {
            screen.leave();
        }
        info!("event loop ended");
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }
        match self.active_screen_mut() {
            Some(screen) => screen.handle_key_event(key),
            None => Ok(None),
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        match self.active_screen_mut() {
            Some(screen) => screen.handle_mouse_event(mouse),
            None => Ok(None),
        }
    }

    fn active_screen_mut(&mut self) -> Option<&mut Box<dyn Component>> {
        let id = self.active?;
        self.screens.get_mut(&id)
    }

    fn process_action(&mut self, action: Action) -> Result<()> {
        let follow_up = match action {
            Action::Quit => {
                self.running = false;
                None
            }
            Action::Notify(notification) => {
                self.notification = Some((notification, Instant::now()));
                None
            }
            Action::DismissNotification => {
                self.notification = None;
                None
            }
            Action::Tick => {
                if self
                    .notification
                    .as_ref()
                    .is_some_and(|(_, shown)| shown.elapsed() >= NOTIFICATION_TTL)
                {
                    self.action_tx.send(Action::DismissNotification)?;
                }
                match self.active_screen_mut() {
                    Some(screen) => screen.update(Action::Tick)?,
                    None => None,
                }
            }
            // Results go to the screen that asked, active or not; a screen
            // that has been left drops them.
            result @ Action::LoginFinished { .. } => self.dispatch(ScreenId::Login, result)?,
            result @ Action::ProductsFinished { .. } => {
                self.dispatch(ScreenId::Products, result)?
            }
            Action::Render => None,
        };

        if let Some(action) = follow_up {
            self.action_tx.send(action)?;
        }
        Ok(())
    }

    fn dispatch(&mut self, target: ScreenId, action: Action) -> Result<Option<Action>> {
        match self.screens.get_mut(&target) {
            Some(screen) => screen.update(action),
            None => Ok(None),
        }
    }

    /// Act on routes the views asked for. The last request wins.
    fn apply_navigation(&mut self) -> Result<()> {
        for _ in 0..MAX_REDIRECTS {
            let Some(route) = self.routes.drain().pop() else {
                return Ok(());
            };
            self.switch_to(ScreenId::from(route))?;
        }
        Ok(())
    }

    fn switch_to(&mut self, target: ScreenId) -> Result<()> {
        if self.active == Some(target) {
            return Ok(());
        }
        debug!(
            from = %self.active.map_or("none", ScreenId::label),
            to = %target,
            "switching screen"
        );
        if let Some(screen) = self.active_screen_mut() {
            screen.leave();
        }
        self.active = Some(target);
        if let Some(screen) = self.screens.get_mut(&target) {
            screen.enter()?;
        }
        Ok(())
    }

    fn render(&self, frame: &mut Frame) {
        let [content, status] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());

        let screen = self.active.and_then(|id| self.screens.get(&id));
        if let Some(screen) = screen {
            screen.render(frame, content);
        }
        self.render_status_bar(frame, status, screen.map_or("", |s| s.key_hints()));
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect, hints: &str) {
        let label = self.active.map_or("", ScreenId::label);
        let mut spans = vec![
            Span::styled(format!(" {label} "), theme::title_style()),
            Span::styled("\u{2502} ", theme::key_hint()),
        ];
        match &self.notification {
            Some((notification, _)) => {
                let style = match notification.level {
                    NotificationLevel::Info => theme::text(),
                    NotificationLevel::Error => theme::error(),
                };
                spans.push(Span::styled(notification.message.clone(), style));
            }
            None => spans.push(Span::styled(format!("{hints}  Ctrl+C quit"), theme::key_hint())),
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use ratatui::{Terminal, backend::TestBackend};
    use secrecy::SecretString;
    use storefront_api::Product;

    use super::*;
    use crate::screens::testing::CannedBackend;

    fn app(signed_in: bool) -> App {
        let tokens = TokenStore::in_memory();
        if signed_in {
            tokens
                .set_token(&SecretString::from("fake-token"))
                .expect("writable");
        }
        let backend = CannedBackend {
            login: Ok("fresh-token"),
            products: Ok(vec![Product::new(1, "Product 1", 100.0)]),
        };
        App::new(backend, tokens, "Shop".into())
    }

    fn status_line(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).expect("terminal");
        terminal.draw(|frame| app.render(frame)).expect("draw");
        let buffer = terminal.backend().buffer();
        (0..80u16)
            .map(|x| buffer[(x, 23u16)].symbol().to_owned())
            .collect()
    }

    #[tokio::test]
    async fn signed_out_start_lands_on_login() {
        let mut app = app(false);
        app.start().expect("start");
        assert_eq!(app.active, Some(ScreenId::Login));
    }

    #[tokio::test]
    async fn signed_in_start_lands_on_products() {
        let mut app = app(true);
        app.start().expect("start");
        assert_eq!(app.active, Some(ScreenId::Products));
        assert!(status_line(&app).contains("Products"));
    }

    #[tokio::test]
    async fn ctrl_c_quits_from_any_screen() {
        let mut app = app(false);
        app.start().expect("start");

        let action = app
            .handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .expect("handled");
        app.process_action(action.expect("quit action")).expect("processed");

        assert!(!app.running);
    }

    #[tokio::test]
    async fn notifications_replace_hints_until_dismissed() {
        let mut app = app(false);
        app.start().expect("start");

        app.process_action(Action::Notify(Notification::info("Signed out.")))
            .expect("notify");
        assert!(status_line(&app).contains("Signed out."));

        app.process_action(Action::DismissNotification)
            .expect("dismiss");
        assert!(status_line(&app).contains("Ctrl+C quit"));
    }

    #[tokio::test]
    async fn logout_returns_to_login() {
        let mut app = app(true);
        app.start().expect("start");

        let action = app
            .handle_key_event(KeyEvent::new(KeyCode::Char('l'), KeyModifiers::NONE))
            .expect("handled");
        if let Some(action) = action {
            app.process_action(action).expect("processed");
        }
        app.apply_navigation().expect("navigate");

        assert_eq!(app.active, Some(ScreenId::Login));
    }
}
