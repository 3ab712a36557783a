//! Session logic and view state machines for the Storefront client.
//!
//! Everything here is renderer-agnostic: views expose plain state and
//! transitions, and a front end (see `storefront-tui`) draws them.
//!
//! - [`store`]: persistent session token behind [`TokenStore`]
//! - [`validate`]: required-field checks
//! - [`favorites`]: pure favorite toggling
//! - [`view`]: login, products, and navbar state machines

pub mod backend;
pub mod error;
pub mod favorites;
pub mod navigation;
pub mod store;
pub mod validate;
pub mod view;

pub use backend::{Backend, Credentials};
pub use error::{StoreError, ViewError};
pub use favorites::toggle_favorite;
pub use navigation::{Navigator, Route, RouteQueue};
pub use store::{JsonFileStore, KeyValueStore, KeyringStore, MemoryStore, TOKEN_KEY, TokenStore};
pub use validate::{ErrorMap, validate_fields};
pub use view::{
    Decorate, FetchRequest, LoginAttempt, LoginPhase, LoginView, MountOutcome, NavBar, NavEvent,
    ProductEvent, ProductsPhase, ProductsView, SubmitOutcome, Ticket, TooltipTarget,
    TooltipTrigger,
};

pub use storefront_api::{Product, ProductId};
