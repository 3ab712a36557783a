// Storefront REST client
//
// Wraps `reqwest::Client` with endpoint URL construction, bearer-token
// injection, and uniform response decoding. Every non-2xx status and every
// undecodable body is surfaced as an `Error`; callers decide how coarse
// their user-facing messages are.

use reqwest::Response;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::models::{LoginRequest, LoginResponse, Product};
use crate::transport::TransportConfig;

/// Endpoint paths, relative to the API base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// `POST` target for `{username, password}` → `{token}`.
    pub login: String,
    /// `GET` target returning the product list.
    pub products: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            login: "/auth/login".into(),
            products: "/products".into(),
        }
    }
}

/// HTTP client for the Storefront API.
#[derive(Debug, Clone)]
pub struct StorefrontClient {
    http: reqwest::Client,
    base_url: Url,
    endpoints: Endpoints,
}

impl StorefrontClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// `base_url` is the API root (e.g. `https://shop.example.com/api`);
    /// endpoint paths are appended to it verbatim.
    pub fn new(
        base_url: Url,
        endpoints: Endpoints,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url, endpoints))
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url, endpoints: Endpoints) -> Self {
        Self {
            http,
            base_url,
            endpoints,
        }
    }

    /// The API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The configured endpoint paths.
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for an endpoint path: `{base}{path}`.
    pub(crate) fn endpoint_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// Exchange credentials for a session token.
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<SecretString, Error> {
        let url = self.endpoint_url(&self.endpoints.login)?;
        debug!("POST {}", url);

        let resp = self
            .http
            .post(url)
            .json(&LoginRequest::new(username, password))
            .send()
            .await?;

        let body: LoginResponse = Self::decode(resp).await?;
        debug!("login accepted");
        Ok(SecretString::from(body.token))
    }

    /// Fetch the product catalog.
    ///
    /// The token, when given, is sent as a bearer credential.
    pub async fn list_products(&self, token: Option<&SecretString>) -> Result<Vec<Product>, Error> {
        let url = self.endpoint_url(&self.endpoints.products)?;
        debug!("GET {}", url);

        let mut req = self.http.get(url);
        if let Some(token) = token {
            req = req.bearer_auth(token.expose_secret());
        }

        let products: Vec<Product> = Self::decode(req.send().await?).await?;
        debug!(count = products.len(), "products received");
        Ok(products)
    }

    // ── Response helpers ─────────────────────────────────────────────

    /// Check the status, then decode the JSON body.
    async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, Error> {
        let status = resp.status();
        let body = resp.text().await?;
        trace!(%status, len = body.len(), "response body received");

        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> StorefrontClient {
        StorefrontClient::with_client(
            reqwest::Client::new(),
            Url::parse(base).expect("valid base"),
            Endpoints::default(),
        )
    }

    #[test]
    fn endpoint_url_keeps_base_path() {
        let c = client("https://shop.example.com/api/");
        let url = c.endpoint_url("/products").expect("valid url");
        assert_eq!(url.as_str(), "https://shop.example.com/api/products");
    }

    #[test]
    fn endpoint_url_without_leading_slash() {
        let c = client("http://localhost:8080");
        let url = c.endpoint_url("auth/login").expect("valid url");
        assert_eq!(url.as_str(), "http://localhost:8080/auth/login");
    }
}
