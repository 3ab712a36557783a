//! Login view: validation, credential exchange and token persistence.
//!
//! Flow: `Idle → (Invalid | Submitting) → (Success | Failed)`
//!
//! `Invalid` and `Failed` are terminal until the next submit. `Success`
//! navigates to [`Route::Home`]; the owner tears the view down afterwards.

use secrecy::{ExposeSecret, SecretString};
use storefront_api::Error as ApiError;
use tracing::{debug, info, warn};

use super::{RequestTracker, Ticket};
use crate::backend::{Backend, Credentials};
use crate::error::ViewError;
use crate::navigation::{Navigator, Route};
use crate::store::TokenStore;
use crate::validate::{ErrorMap, validate_fields};

pub const TITLE: &str = "Please sign in";
pub const INSTRUCTIONS: &str = "Enter your username and password to access your account.";
pub const LOGO_ALT: &str = "Company Logo";
pub const USERNAME_LABEL: &str = "Username";
pub const PASSWORD_LABEL: &str = "Password";
pub const SUBMIT_LABEL: &str = "Sign in";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginPhase {
    #[default]
    Idle,
    /// Blank fields; nothing was sent.
    Invalid,
    /// Waiting for the login endpoint.
    Submitting,
    /// Token stored, redirected home.
    Success,
    /// The endpoint rejected the credentials, or the token could not be stored.
    Failed,
}

/// A login request the owner must run and hand back to [`LoginView::finish`].
#[derive(Debug)]
pub struct LoginAttempt {
    pub ticket: Ticket,
    pub credentials: Credentials,
}

/// Result of [`LoginView::begin_submit`].
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Validation failed; the per-field errors are attached.
    Invalid(ErrorMap),
    /// A request is already in flight; the submit was ignored.
    Busy,
    /// Send this request.
    Submit(LoginAttempt),
}

pub struct LoginView {
    username: String,
    password: SecretString,
    loading: bool,
    error: Option<String>,
    field_errors: ErrorMap,
    phase: LoginPhase,
    requests: RequestTracker,
}

impl Default for LoginView {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginView {
    pub fn new() -> Self {
        Self {
            username: String::new(),
            password: SecretString::from(String::new()),
            loading: false,
            error: None,
            field_errors: ErrorMap::new(),
            phase: LoginPhase::Idle,
            requests: RequestTracker::default(),
        }
    }

    // ── Form fields ──────────────────────────────────────────────────

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
    }

    pub fn password(&self) -> &SecretString {
        &self.password
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = SecretString::from(password.into());
    }

    // ── State accessors ──────────────────────────────────────────────

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn phase(&self) -> LoginPhase {
        self.phase
    }

    /// Per-field errors from the last validation. The view itself only
    /// shows the collapsed message from [`error`](Self::error).
    pub fn field_errors(&self) -> &ErrorMap {
        &self.field_errors
    }

    /// The submit control is disabled while a request is in flight.
    pub fn submit_enabled(&self) -> bool {
        !self.loading
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// Validate the form and, if complete, enter `Submitting`.
    pub fn begin_submit(&mut self) -> SubmitOutcome {
        if self.phase == LoginPhase::Submitting {
            debug!("submit ignored: login already in flight");
            return SubmitOutcome::Busy;
        }

        let errors = validate_fields([
            ("username", self.username.as_str()),
            ("password", self.password.expose_secret()),
        ]);

        if !errors.is_empty() {
            let err = ViewError::Validation {
                fields: errors.keys().cloned().collect(),
            };
            debug!(error = %err, "login form incomplete");
            self.error = Some(err.user_message().to_owned());
            self.loading = false;
            self.phase = LoginPhase::Invalid;
            self.field_errors = errors.clone();
            return SubmitOutcome::Invalid(errors);
        }

        self.field_errors.clear();
        self.error = None;
        self.loading = true;
        self.phase = LoginPhase::Submitting;

        SubmitOutcome::Submit(LoginAttempt {
            ticket: self.requests.issue(),
            credentials: Credentials {
                username: self.username.clone(),
                password: self.password.clone(),
            },
        })
    }

    /// Apply the outcome of a login request.
    ///
    /// Stale tickets are ignored and leave the view untouched.
    pub fn finish(
        &mut self,
        ticket: &Ticket,
        result: Result<SecretString, ApiError>,
        tokens: &TokenStore,
        navigator: &dyn Navigator,
    ) -> LoginPhase {
        if !self.requests.accepts(ticket) {
            debug!(generation = ticket.generation(), "dropping stale login response");
            return self.phase;
        }

        self.loading = false;

        let outcome = result
            .map_err(ViewError::Auth)
            .and_then(|token| {
                if token.expose_secret().trim().is_empty() {
                    Err(ViewError::EmptyToken)
                } else {
                    Ok(token)
                }
            })
            .and_then(|token| tokens.set_token(&token).map_err(ViewError::Persist));

        match outcome {
            Ok(()) => {
                info!(username = %self.username, "login succeeded");
                self.error = None;
                self.phase = LoginPhase::Success;
                navigator.navigate(Route::Home);
            }
            Err(err) => {
                warn!(error = %err, "login failed");
                self.error = Some(err.user_message().to_owned());
                self.phase = LoginPhase::Failed;
            }
        }

        self.phase
    }

    /// Validate, call the backend, and apply the result.
    ///
    /// Returns early without touching state if the view is torn down
    /// while the request is pending.
    pub async fn submit<B: Backend>(
        &mut self,
        backend: &B,
        tokens: &TokenStore,
        navigator: &dyn Navigator,
    ) -> LoginPhase {
        let attempt = match self.begin_submit() {
            SubmitOutcome::Submit(attempt) => attempt,
            SubmitOutcome::Invalid(_) | SubmitOutcome::Busy => return self.phase,
        };

        let cancel = attempt.ticket.cancellation().clone();
        let result = tokio::select! {
            () = cancel.cancelled() => {
                debug!("login abandoned: view torn down");
                return self.phase;
            }
            result = backend.login(&attempt.credentials) => result,
        };

        self.finish(&attempt.ticket, result, tokens, navigator)
    }

    /// Abandon any in-flight request. Late results are dropped.
    pub fn teardown(&mut self) {
        self.requests.cancel_all();
        self.loading = false;
        if self.phase == LoginPhase::Submitting {
            self.phase = LoginPhase::Idle;
        }
    }
}

impl std::fmt::Debug for LoginView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginView")
            .field("username", &self.username)
            .field("loading", &self.loading)
            .field("error", &self.error)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}
