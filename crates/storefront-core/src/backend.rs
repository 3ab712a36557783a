// ── Backend seam ──
//
// The two remote operations the views depend on. `StorefrontClient`
// implements it for real traffic; tests plug in scripted doubles.

use std::future::Future;

use secrecy::SecretString;
use storefront_api::{Error as ApiError, Product, StorefrontClient};

/// Username and password as typed by the user.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

/// Remote operations used by the views.
pub trait Backend: Send + Sync {
    /// Exchange credentials for a session token.
    fn login(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<SecretString, ApiError>> + Send;

    /// Fetch the product catalog for the session `token`.
    fn list_products(
        &self,
        token: &SecretString,
    ) -> impl Future<Output = Result<Vec<Product>, ApiError>> + Send;
}

impl Backend for StorefrontClient {
    async fn login(&self, credentials: &Credentials) -> Result<SecretString, ApiError> {
        StorefrontClient::login(self, &credentials.username, &credentials.password).await
    }

    async fn list_products(&self, token: &SecretString) -> Result<Vec<Product>, ApiError> {
        StorefrontClient::list_products(self, Some(token)).await
    }
}
