//! Login screen: the username/password form over [`LoginView`].

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};
use storefront_core::view::login::{
    INSTRUCTIONS, LOGO_ALT, PASSWORD_LABEL, SUBMIT_LABEL, TITLE, USERNAME_LABEL,
};
use storefront_core::{
    Backend, LoginAttempt, LoginPhase, LoginView, Navigator, SubmitOutcome, TokenStore,
};
use throbber_widgets_tui::{Throbber, ThrobberState};
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;
use tui_input::{Input, InputRequest};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::{centered, text_width};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Username,
    Password,
    Submit,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Self::Username => Self::Password,
            Self::Password => Self::Submit,
            Self::Submit => Self::Username,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Username => Self::Submit,
            Self::Password => Self::Username,
            Self::Submit => Self::Password,
        }
    }
}

pub struct LoginScreen<B> {
    backend: Arc<B>,
    tokens: TokenStore,
    navigator: Arc<dyn Navigator>,
    action_tx: Option<UnboundedSender<Action>>,
    view: LoginView,
    username: Input,
    password: Input,
    focus: Focus,
    throbber: ThrobberState,
}

impl<B: Backend + 'static> LoginScreen<B> {
    pub fn new(backend: Arc<B>, tokens: TokenStore, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            backend,
            tokens,
            navigator,
            action_tx: None,
            view: LoginView::new(),
            username: Input::default(),
            password: Input::default(),
            focus: Focus::Username,
            throbber: ThrobberState::default(),
        }
    }

    fn focused_input(&mut self) -> Option<&mut Input> {
        match self.focus {
            Focus::Username => Some(&mut self.username),
            Focus::Password => Some(&mut self.password),
            Focus::Submit => None,
        }
    }

    fn edit(&mut self, request: InputRequest) {
        let Some(input) = self.focused_input() else {
            return;
        };
        if input.handle(request).is_none() {
            return;
        }
        self.view.set_username(self.username.value());
        self.view.set_password(self.password.value());
    }

    fn submit(&mut self) {
        match self.view.begin_submit() {
            SubmitOutcome::Submit(attempt) => self.spawn_login(attempt),
            SubmitOutcome::Invalid(fields) => {
                debug!(missing = fields.len(), "login form incomplete");
            }
            SubmitOutcome::Busy => {}
        }
    }

    fn spawn_login(&self, attempt: LoginAttempt) {
        let Some(tx) = self.action_tx.clone() else {
            return;
        };
        let backend = Arc::clone(&self.backend);

        tokio::spawn(async move {
            let LoginAttempt {
                ticket,
                credentials,
            } = attempt;
            let cancel = ticket.cancellation().clone();
            tokio::select! {
                biased;
                () = cancel.cancelled() => debug!("login abandoned"),
                result = backend.login(&credentials) => {
                    let _ = tx.send(Action::LoginFinished { ticket, result });
                }
            }
        });
    }

    // ── Rendering helpers ───────────────────────────────────────────

    fn render_field(&self, frame: &mut Frame, area: Rect, field: Focus) {
        let (label, input, masked) = match field {
            Focus::Username => (USERNAME_LABEL, &self.username, false),
            Focus::Password => (PASSWORD_LABEL, &self.password, true),
            Focus::Submit => return,
        };
        let active = self.focus == field;

        let block = Block::default()
            .title(format!(" {label} "))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if active {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let shown = if masked {
            "\u{2022}".repeat(input.value().chars().count())
        } else {
            input.value().to_owned()
        };
        frame.render_widget(Paragraph::new(Span::styled(shown, theme::text())), inner);

        if active {
            let offset = u16::try_from(input.visual_cursor()).unwrap_or(u16::MAX);
            frame.set_cursor_position(Position::new(
                inner.x.saturating_add(offset).min(inner.right().saturating_sub(1)),
                inner.y,
            ));
        }
    }

    fn render_submit(&self, frame: &mut Frame, area: Rect) {
        if self.view.loading() {
            let throbber = Throbber::default()
                .label("Signing in...")
                .style(theme::text())
                .throbber_style(Style::default().fg(theme::ACCENT));
            frame.render_stateful_widget(throbber, area, &mut self.throbber.clone());
            return;
        }

        let label = format!("[ {SUBMIT_LABEL} ]");
        let style = theme::button(self.view.submit_enabled(), self.focus == Focus::Submit);
        frame.render_widget(
            Paragraph::new(Span::styled(label, style)).alignment(Alignment::Center),
            area,
        );
    }
}

/// Map a key to a text edit, if it is one.
fn input_request(key: KeyEvent) -> Option<InputRequest> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('u') if ctrl => Some(InputRequest::DeleteLine),
        KeyCode::Char('w') if ctrl => Some(InputRequest::DeletePrevWord),
        KeyCode::Char(c) if !ctrl => Some(InputRequest::InsertChar(c)),
        KeyCode::Backspace => Some(InputRequest::DeletePrevChar),
        KeyCode::Delete => Some(InputRequest::DeleteNextChar),
        KeyCode::Left => Some(InputRequest::GoToPrevChar),
        KeyCode::Right => Some(InputRequest::GoToNextChar),
        KeyCode::Home => Some(InputRequest::GoToStart),
        KeyCode::End => Some(InputRequest::GoToEnd),
        _ => None,
    }
}

impl<B: Backend + 'static> Component for LoginScreen<B> {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn enter(&mut self) -> Result<()> {
        self.focus = Focus::Username;
        Ok(())
    }

    fn leave(&mut self) {
        self.view.teardown();
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.prev(),
            KeyCode::Enter => self.submit(),
            KeyCode::Esc => return Ok(Some(Action::Quit)),
            _ => {
                if let Some(request) = input_request(key) {
                    self.edit(request);
                }
            }
        }
        Ok(None)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::LoginFinished { ticket, result } => {
                let was_submitting = self.view.phase() == LoginPhase::Submitting;
                let phase = self
                    .view
                    .finish(&ticket, result, &self.tokens, self.navigator.as_ref());
                if was_submitting && phase == LoginPhase::Success {
                    self.password.reset();
                    self.view.set_password("");
                }
            }
            Action::Tick if self.view.loading() => self.throbber.calc_next(),
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let panel = centered(area, 64, 20);
        frame.render_widget(Clear, panel);

        let block = Block::default()
            .title(Line::from(Span::styled(format!(" {TITLE} "), theme::title_style())))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(panel);
        frame.render_widget(block, panel);

        let [logo, heading, instructions, _, username, password, _, submit, error] =
            Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .horizontal_margin(2)
            .areas(inner);

        let logo_text = format!("[ {LOGO_ALT} ]");
        frame.render_widget(
            Paragraph::new(Span::styled(logo_text, theme::muted())).alignment(Alignment::Center),
            centered(logo, text_width(LOGO_ALT) + 4, 1),
        );
        frame.render_widget(
            Paragraph::new(Span::styled(
                TITLE,
                theme::title_style().add_modifier(Modifier::UNDERLINED),
            ))
            .alignment(Alignment::Center),
            heading,
        );
        frame.render_widget(
            Paragraph::new(Span::styled(INSTRUCTIONS, theme::text()))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            instructions,
        );

        self.render_field(frame, username, Focus::Username);
        self.render_field(frame, password, Focus::Password);
        self.render_submit(frame, submit);

        if let Some(message) = self.view.error() {
            frame.render_widget(
                Paragraph::new(Span::styled(format!("\u{2716} {message}"), theme::error()))
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true }),
                error,
            );
        }
    }

    fn key_hints(&self) -> &'static str {
        "Tab next field  Enter sign in  Esc quit"
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;
    use secrecy::SecretString;
    use storefront_core::{Route, RouteQueue};
    use tokio::sync::mpsc;

    use super::*;
    use crate::screens::testing::{CannedBackend, render_to_string};

    fn press(screen: &mut LoginScreen<CannedBackend>, code: KeyCode) {
        screen
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .expect("key handled");
    }

    fn type_text(screen: &mut LoginScreen<CannedBackend>, text: &str) {
        for c in text.chars() {
            press(screen, KeyCode::Char(c));
        }
    }

    fn screen(
        login: Result<&'static str, u16>,
    ) -> (
        LoginScreen<CannedBackend>,
        TokenStore,
        Arc<RouteQueue>,
        mpsc::UnboundedReceiver<Action>,
    ) {
        let backend = Arc::new(CannedBackend {
            login,
            products: Ok(Vec::new()),
        });
        let tokens = TokenStore::in_memory();
        let routes = Arc::new(RouteQueue::new());
        let mut screen = LoginScreen::new(backend, tokens.clone(), routes.clone());
        let (tx, rx) = mpsc::unbounded_channel();
        screen.init(tx).expect("init");
        screen.enter().expect("enter");
        (screen, tokens, routes, rx)
    }

    #[tokio::test]
    async fn successful_sign_in_stores_token_and_goes_home() {
        let (mut screen, tokens, routes, mut rx) = screen(Ok("fake-token"));

        type_text(&mut screen, "user");
        press(&mut screen, KeyCode::Tab);
        type_text(&mut screen, "pass");
        press(&mut screen, KeyCode::Enter);
        assert!(screen.view.loading());

        let action = rx.recv().await.expect("login result");
        screen.update(action).expect("update");

        assert_eq!(screen.view.phase(), LoginPhase::Success);
        assert_eq!(
            tokens.get_token().expect("readable").expect("stored").expose_secret(),
            "fake-token"
        );
        assert_eq!(routes.drain(), vec![Route::Home]);
        assert_eq!(screen.password.value(), "");
    }

    #[tokio::test]
    async fn rejected_sign_in_shows_message() {
        let (mut screen, tokens, routes, mut rx) = screen(Err(401));

        type_text(&mut screen, "user");
        press(&mut screen, KeyCode::Tab);
        type_text(&mut screen, "wrong");
        press(&mut screen, KeyCode::Enter);

        let action = rx.recv().await.expect("login result");
        screen.update(action).expect("update");

        assert_eq!(
            screen.view.error(),
            Some("Invalid credentials. Please try again.")
        );
        assert!(tokens.get_token().expect("readable").is_none());
        assert!(routes.is_empty());

        let text = render_to_string(&screen, 80, 24);
        assert!(text.contains("Invalid credentials. Please try again."));
    }

    #[test]
    fn late_result_after_leaving_keeps_the_form() {
        let (mut screen, tokens, routes, _rx) = screen(Ok("unused"));
        type_text(&mut screen, "user");
        press(&mut screen, KeyCode::Tab);
        type_text(&mut screen, "pass");

        let SubmitOutcome::Submit(attempt) = screen.view.begin_submit() else {
            panic!("expected a request");
        };
        screen.leave();
        screen
            .update(Action::LoginFinished {
                ticket: attempt.ticket,
                result: Ok(SecretString::from("late")),
            })
            .expect("update");

        assert_eq!(screen.password.value(), "pass");
        assert_eq!(screen.view.password().expose_secret(), "pass");
        assert!(tokens.get_token().expect("readable").is_none());
        assert!(routes.is_empty());
    }

    #[test]
    fn blank_form_is_blocked_locally() {
        let (mut screen, _tokens, _routes, mut rx) = screen(Ok("unused"));

        press(&mut screen, KeyCode::Enter);

        assert_eq!(screen.view.error(), Some("Please fill all required fields."));
        assert!(!screen.view.loading());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn password_is_masked_on_screen() {
        let (mut screen, _tokens, _routes, _rx) = screen(Ok("unused"));

        type_text(&mut screen, "alice");
        press(&mut screen, KeyCode::Down);
        type_text(&mut screen, "hunter2");

        let text = render_to_string(&screen, 80, 24);
        assert!(text.contains("Please sign in"));
        assert!(text.contains("alice"));
        assert!(!text.contains("hunter2"));
        assert!(text.contains("[ Sign in ]"));
        assert!(text.contains("[ Company Logo ]"));
    }

    #[test]
    fn editing_keys_update_the_view() {
        let (mut screen, _tokens, _routes, _rx) = screen(Ok("unused"));

        type_text(&mut screen, "bobx");
        press(&mut screen, KeyCode::Backspace);

        assert_eq!(screen.view.username(), "bob");
    }

    #[test]
    fn focus_cycles_through_form() {
        assert_eq!(Focus::Username.next().next().next(), Focus::Username);
        assert_eq!(Focus::Username.prev(), Focus::Submit);
    }
}
