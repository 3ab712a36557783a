// storefront-api: Async Rust client for the Storefront REST API

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::{Endpoints, StorefrontClient};
pub use error::Error;
pub use models::{Product, ProductId};
pub use transport::{TlsMode, TransportConfig};
