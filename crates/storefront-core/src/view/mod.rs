//! View state machines.
//!
//! Each view owns its state exclusively and is driven from one task.
//! Network calls are split into a *begin* step that hands out a
//! [`Ticket`] and a *finish* step that applies the result, so a renderer
//! can run the request elsewhere and feed the outcome back. Every view
//! also offers an `async` convenience that does both.
//!
//! A ticket is only honored if it is the newest one the view issued and
//! the view has not been torn down since; anything else is a stale
//! response and is dropped.

pub mod decorate;
pub mod login;
pub mod navbar;
pub mod products;

use tokio_util::sync::CancellationToken;

pub use decorate::{Decorate, TooltipTarget, TooltipTrigger};
pub use login::{LoginAttempt, LoginPhase, LoginView, SubmitOutcome};
pub use navbar::{NavBar, NavEvent};
pub use products::{FetchRequest, MountOutcome, ProductEvent, ProductsPhase, ProductsView};

/// Handle for one in-flight request.
#[derive(Debug, Clone)]
pub struct Ticket {
    generation: u64,
    cancel: CancellationToken,
}

impl Ticket {
    /// Request generation; strictly increasing per view.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Cancelled when the issuing view is torn down.
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Whether the issuing view has been torn down.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Issues tickets and decides which results are still wanted.
#[derive(Debug, Default)]
pub(crate) struct RequestTracker {
    generation: u64,
    lifetime: CancellationToken,
}

impl RequestTracker {
    /// Start a new request, superseding any earlier one.
    pub(crate) fn issue(&mut self) -> Ticket {
        if self.lifetime.is_cancelled() {
            self.lifetime = CancellationToken::new();
        }
        self.generation += 1;
        Ticket {
            generation: self.generation,
            cancel: self.lifetime.child_token(),
        }
    }

    /// Whether a result for `ticket` should still be applied.
    pub(crate) fn accepts(&self, ticket: &Ticket) -> bool {
        !ticket.is_cancelled() && ticket.generation == self.generation
    }

    /// Cancel everything in flight.
    pub(crate) fn cancel_all(&self) {
        self.lifetime.cancel();
    }
}
