// Wire types for the Storefront REST API.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Stable numeric product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A catalog entry as returned by the products endpoint.
///
/// `favorite` is client-side state; the server may omit it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub favorite: bool,
}

impl Product {
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price,
            favorite: false,
        }
    }
}

/// Body of `POST {login_path}`.
#[derive(Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

impl<'a> LoginRequest<'a> {
    pub(crate) fn new(username: &'a str, password: &'a SecretString) -> Self {
        Self {
            username,
            password: password.expose_secret(),
        }
    }
}

/// Success body of the login endpoint.
#[derive(Deserialize)]
pub(crate) struct LoginResponse {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_favorite_defaults_to_false() {
        let product: Product =
            serde_json::from_str(r#"{"id": 7, "title": "Lamp", "price": 19.5}"#)
                .expect("valid product");
        assert_eq!(product.id, ProductId(7));
        assert!(!product.favorite);
    }

    #[test]
    fn login_request_serializes_plain_credentials() {
        let password = SecretString::from("hunter2");
        let body = serde_json::to_value(LoginRequest::new("alice", &password))
            .expect("serializable");
        assert_eq!(
            body,
            serde_json::json!({ "username": "alice", "password": "hunter2" })
        );
    }
}
