//! Products list view: auth guard, catalog fetch, favorites and logout.
//!
//! Flow: `Guarding → (Redirected | Loading) → (Loaded | Empty | Errored)`

use secrecy::SecretString;
use storefront_api::{Error as ApiError, Product, ProductId};
use tracing::{debug, warn};

use super::{RequestTracker, Ticket};
use crate::backend::Backend;
use crate::error::{StoreError, ViewError};
use crate::favorites::toggle_favorite;
use crate::navigation::{Navigator, Route};
use crate::store::TokenStore;

pub const HEADING: &str = "Products";
pub const LOADING_TEXT: &str = "Loading...";
pub const NO_PRODUCTS_TEXT: &str = "No products available.";

/// Accessible label of one product item.
pub fn item_label(product: &Product) -> String {
    format!("Product: {}, Price: {}", product.title, product.price)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductsPhase {
    /// Not mounted yet.
    #[default]
    Guarding,
    /// No session; sent to the login route.
    Redirected,
    Loading,
    Loaded,
    /// Fetched successfully, nothing to show.
    Empty,
    Errored,
}

/// Events a product item sends up to the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductEvent {
    FavoriteClicked(ProductId),
}

/// A catalog fetch the owner must run and hand back to [`ProductsView::finish`].
#[derive(Debug)]
pub struct FetchRequest {
    pub ticket: Ticket,
    pub token: SecretString,
}

/// Result of [`ProductsView::mount`].
#[derive(Debug)]
pub enum MountOutcome {
    /// No token; navigation to the login route was requested.
    Redirected,
    Fetch(FetchRequest),
}

#[derive(Debug, Default)]
pub struct ProductsView {
    products: Vec<Product>,
    loading: bool,
    error: Option<String>,
    phase: ProductsPhase,
    requests: RequestTracker,
}

impl ProductsView {
    pub fn new() -> Self {
        Self::default()
    }

    // ── State accessors ──────────────────────────────────────────────

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn phase(&self) -> ProductsPhase {
        self.phase
    }

    /// Whether the "no products" notice replaces the list.
    pub fn shows_empty_notice(&self) -> bool {
        self.phase == ProductsPhase::Empty
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// Run the auth guard and, with a session, enter `Loading`.
    ///
    /// An unreadable token store counts as "no session".
    pub fn mount(&mut self, tokens: &TokenStore, navigator: &dyn Navigator) -> MountOutcome {
        let token = tokens.get_token().unwrap_or_else(|e| {
            warn!(error = %e, "token store unreadable; treating as logged out");
            None
        });

        let Some(token) = token else {
            debug!("no session token, redirecting to login");
            self.phase = ProductsPhase::Redirected;
            navigator.navigate(Route::Login);
            return MountOutcome::Redirected;
        };

        self.products.clear();
        self.loading = true;
        self.error = None;
        self.phase = ProductsPhase::Loading;

        MountOutcome::Fetch(FetchRequest {
            ticket: self.requests.issue(),
            token,
        })
    }

    /// Apply the outcome of a catalog fetch. Stale tickets are ignored.
    pub fn finish(&mut self, ticket: &Ticket, result: Result<Vec<Product>, ApiError>) -> ProductsPhase {
        if !self.requests.accepts(ticket) {
            debug!(generation = ticket.generation(), "dropping stale product response");
            return self.phase;
        }

        self.loading = false;
        match result {
            Ok(products) => {
                debug!(count = products.len(), "products loaded");
                self.error = None;
                self.phase = if products.is_empty() {
                    ProductsPhase::Empty
                } else {
                    ProductsPhase::Loaded
                };
                self.products = products;
            }
            Err(e) => {
                if e.is_unauthorized() {
                    warn!("products endpoint rejected the session token");
                }
                let transient = e.is_transient();
                let err = ViewError::Fetch(e);
                warn!(error = %err, transient, "product fetch failed");
                self.error = Some(err.user_message().to_owned());
                self.phase = ProductsPhase::Errored;
            }
        }
        self.phase
    }

    /// Guard, fetch, and apply the result.
    pub async fn load<B: Backend>(
        &mut self,
        backend: &B,
        tokens: &TokenStore,
        navigator: &dyn Navigator,
    ) -> ProductsPhase {
        let request = match self.mount(tokens, navigator) {
            MountOutcome::Fetch(request) => request,
            MountOutcome::Redirected => return self.phase,
        };

        let cancel = request.ticket.cancellation().clone();
        let result = tokio::select! {
            () = cancel.cancelled() => {
                debug!("product fetch abandoned: view torn down");
                return self.phase;
            }
            result = backend.list_products(&request.token) => result,
        };

        self.finish(&request.ticket, result)
    }

    /// Flip the favorite flag of `id`, replacing the list wholesale.
    pub fn toggle_product_favorite(&mut self, id: ProductId) {
        self.products = toggle_favorite(&self.products, id);
    }

    /// React to an event from a product item.
    pub fn handle_event(&mut self, event: ProductEvent) {
        match event {
            ProductEvent::FavoriteClicked(id) => self.toggle_product_favorite(id),
        }
    }

    /// Drop the session and go to the login route.
    ///
    /// Safe to call without a session. The redirect happens even if the
    /// store could not be cleared; the error is returned for reporting.
    pub fn logout(&mut self, tokens: &TokenStore, navigator: &dyn Navigator) -> Result<(), StoreError> {
        let cleared = tokens.clear_token();
        if let Err(ref e) = cleared {
            warn!(error = %e, "failed to clear session token");
        }
        self.teardown();
        navigator.navigate(Route::Login);
        cleared
    }

    /// Abandon any in-flight fetch. Late results are dropped.
    pub fn teardown(&mut self) {
        self.requests.cancel_all();
        self.loading = false;
        if self.phase == ProductsPhase::Loading {
            self.phase = ProductsPhase::Guarding;
        }
    }
}
