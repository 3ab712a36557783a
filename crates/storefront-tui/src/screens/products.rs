//! Products screen: nav bar, catalog list with favorite markers, logout.

use std::cell::Cell;
use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, Wrap},
};
use storefront_core::view::navbar::LOGOUT_ID;
use storefront_core::view::products::{HEADING, LOADING_TEXT, NO_PRODUCTS_TEXT, item_label};
use storefront_core::{
    Backend, FetchRequest, MountOutcome, NavBar, NavEvent, Navigator, ProductEvent, ProductsPhase,
    ProductsView, TokenStore,
};
use throbber_widgets_tui::{Throbber, ThrobberState};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use crate::action::{Action, Notification};
use crate::component::Component;
use crate::theme;
use crate::widgets::navbar::{self, NavbarLayout};
use crate::widgets::tooltip::HoverTooltips;

const FAVORITE_MARK: &str = "\u{2605}";
const PLAIN_MARK: &str = "\u{2606}";

pub struct ProductsScreen<B> {
    backend: Arc<B>,
    tokens: TokenStore,
    navigator: Arc<dyn Navigator>,
    action_tx: Option<UnboundedSender<Action>>,
    view: ProductsView,
    navbar: NavBar,
    tooltips: HoverTooltips,
    selected: usize,
    throbber: ThrobberState,
    /// Area of the last render, for mouse hit-testing.
    last_area: Cell<Rect>,
}

impl<B: Backend + 'static> ProductsScreen<B> {
    pub fn new(
        backend: Arc<B>,
        tokens: TokenStore,
        navigator: Arc<dyn Navigator>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            tokens,
            navigator,
            action_tx: None,
            view: ProductsView::new(),
            navbar: NavBar::new()
                .with_title(title)
                .with_slot(["\u{2191}\u{2193} select", "f favorite", "l logout"]),
            tooltips: HoverTooltips::default(),
            selected: 0,
            throbber: ThrobberState::default(),
            last_area: Cell::new(Rect::default()),
        }
    }

    /// Run the guard and, with a session, start fetching.
    fn load(&mut self) {
        self.selected = 0;
        match self.view.mount(&self.tokens, self.navigator.as_ref()) {
            MountOutcome::Fetch(request) => self.spawn_fetch(request),
            MountOutcome::Redirected => debug!("products guarded; leaving for login"),
        }
    }

    fn spawn_fetch(&self, request: FetchRequest) {
        let Some(tx) = self.action_tx.clone() else {
            return;
        };
        let backend = Arc::clone(&self.backend);

        tokio::spawn(async move {
            let FetchRequest { ticket, token } = request;
            let cancel = ticket.cancellation().clone();
            tokio::select! {
                biased;
                () = cancel.cancelled() => debug!("product fetch abandoned"),
                result = backend.list_products(&token) => {
                    let _ = tx.send(Action::ProductsFinished { ticket, result });
                }
            }
        });
    }

    fn toggle_selected(&mut self) {
        if let Some(id) = self.view.products().get(self.selected).map(|p| p.id) {
            self.view.handle_event(ProductEvent::FavoriteClicked(id));
        }
    }

    fn move_selection(&mut self, down: bool) {
        let len = self.view.products().len();
        if len == 0 {
            return;
        }
        self.selected = if down {
            (self.selected + 1).min(len - 1)
        } else {
            self.selected.saturating_sub(1)
        };
    }

    fn logout(&mut self) -> Option<Action> {
        match self.navbar.activate_logout()? {
            NavEvent::Logout => match self.view.logout(&self.tokens, self.navigator.as_ref()) {
                Ok(()) => Some(Action::Notify(Notification::info("Signed out."))),
                Err(e) => {
                    warn!(error = %e, "logout could not clear the session");
                    Some(Action::Notify(Notification::error(
                        "Signed out, but the saved session could not be removed.",
                    )))
                }
            },
        }
    }

    fn navbar_layout(&self) -> NavbarLayout {
        let [bar, _] = split(self.last_area.get());
        NavbarLayout::compute(&self.navbar, bar)
    }

    // ── Rendering helpers ───────────────────────────────────────────

    fn render_body(&self, frame: &mut Frame, area: Rect) {
        let [heading, content] =
            Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(area);

        frame.render_widget(
            Paragraph::new(Span::styled(HEADING, theme::title_style())),
            heading,
        );

        match self.view.phase() {
            ProductsPhase::Loading => {
                let throbber = Throbber::default()
                    .label(LOADING_TEXT)
                    .style(theme::text())
                    .throbber_style(Style::default().fg(theme::ACCENT));
                frame.render_stateful_widget(throbber, content, &mut self.throbber.clone());
            }
            ProductsPhase::Errored => {
                let message = self.view.error().unwrap_or_default();
                frame.render_widget(
                    Paragraph::new(Span::styled(format!("\u{2716} {message}"), theme::error()))
                        .wrap(Wrap { trim: true }),
                    content,
                );
            }
            ProductsPhase::Empty => {
                frame.render_widget(
                    Paragraph::new(Span::styled(NO_PRODUCTS_TEXT, theme::muted()))
                        .alignment(Alignment::Center),
                    content,
                );
            }
            ProductsPhase::Loaded => self.render_list(frame, content),
            ProductsPhase::Guarding | ProductsPhase::Redirected => {}
        }
    }

    fn render_list(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .view
            .products()
            .iter()
            .map(|product| {
                let mark = if product.favorite {
                    Span::styled(FAVORITE_MARK, theme::favorite())
                } else {
                    Span::styled(PLAIN_MARK, theme::muted())
                };
                ListItem::new(Line::from(vec![
                    mark,
                    Span::raw(" "),
                    Span::styled(item_label(product), theme::text()),
                ]))
            })
            .collect();

        let list = List::new(items)
            .highlight_style(theme::selected())
            .highlight_symbol("\u{25b8} ");
        let mut state = ListState::default().with_selected(Some(self.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }
}

/// Nav bar on top, body below.
fn split(area: Rect) -> [Rect; 2] {
    Layout::vertical([Constraint::Length(navbar::HEIGHT), Constraint::Min(0)]).areas(area)
}

impl<B: Backend + 'static> Component for ProductsScreen<B> {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn enter(&mut self) -> Result<()> {
        self.navbar.mount(&mut self.tooltips);
        self.load();
        Ok(())
    }

    fn leave(&mut self) {
        self.view.teardown();
        self.navbar.unmount();
        self.tooltips.clear();
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_selection(false);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_selection(true);
                None
            }
            KeyCode::Enter | KeyCode::Char('f' | ' ') => {
                self.toggle_selected();
                None
            }
            KeyCode::Char('r') => {
                self.load();
                None
            }
            KeyCode::Char('l') => self.logout(),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let on_logout = self.navbar_layout().hits_logout(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved => {
                self.tooltips.hover(on_logout.then_some(LOGOUT_ID));
                Ok(None)
            }
            MouseEventKind::Down(MouseButton::Left) if on_logout => Ok(self.logout()),
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::ProductsFinished { ticket, result } => {
                let was_loading = self.view.loading();
                self.view.finish(&ticket, result);
                if was_loading && !self.view.loading() {
                    self.selected = 0;
                }
            }
            Action::Tick if self.view.loading() => self.throbber.calc_next(),
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        self.last_area.set(area);
        let [bar, body] = split(area);

        let hovered = self.tooltips.active().is_some();
        let layout = navbar::render(frame, &self.navbar, bar, hovered);
        self.render_body(frame, body);

        if let Some(anchor) = layout.logout {
            self.tooltips.render(frame, anchor, area);
        }
    }

    fn key_hints(&self) -> &'static str {
        "j/k move  f favorite  r reload  l logout  q quit"
    }
}
