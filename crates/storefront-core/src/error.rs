// ── Core error types ──
//
// Errors raised inside storefront-core. None of these reach the user
// verbatim: views catch them at their boundary and keep a fixed,
// human-readable message in view state. The typed error is only logged.

use thiserror::Error;

/// Failure of a key-value persistence backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("store file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("keyring access failed: {0}")]
    Keyring(#[from] keyring::Error),
}

/// Everything a view can catch at its boundary.
///
/// The auth guard is deliberately absent: a missing token is a redirect,
/// not an error.
#[derive(Debug, Error)]
pub enum ViewError {
    /// Client-side validation blocked the submit.
    #[error("missing required fields: {}", fields.join(", "))]
    Validation { fields: Vec<String> },

    /// The login endpoint rejected the request.
    #[error("login rejected: {0}")]
    Auth(#[source] storefront_api::Error),

    /// The login endpoint answered without a usable token.
    #[error("login response carried an empty token")]
    EmptyToken,

    /// The products endpoint failed.
    #[error("product fetch failed: {0}")]
    Fetch(#[source] storefront_api::Error),

    /// The session token could not be persisted.
    #[error("could not persist session token: {0}")]
    Persist(#[source] StoreError),
}

impl ViewError {
    /// The message a view shows for this error.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "Please fill all required fields.",
            Self::Auth(_) | Self::EmptyToken => "Invalid credentials. Please try again.",
            Self::Fetch(_) => "Failed to load products.",
            Self::Persist(_) => "Could not save your session. Please try again.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_lists_fields() {
        let err = ViewError::Validation {
            fields: vec!["username".into(), "password".into()],
        };
        assert_eq!(err.to_string(), "missing required fields: username, password");
        assert_eq!(err.user_message(), "Please fill all required fields.");
    }

    #[test]
    fn api_failures_collapse_to_generic_messages() {
        let auth = ViewError::Auth(storefront_api::Error::Status {
            status: 404,
            body: "unknown user".into(),
        });
        let fetch = ViewError::Fetch(storefront_api::Error::Status {
            status: 500,
            body: String::new(),
        });
        assert_eq!(auth.user_message(), "Invalid credentials. Please try again.");
        assert_eq!(fetch.user_message(), "Failed to load products.");
        assert_eq!(
            ViewError::EmptyToken.user_message(),
            "Invalid credentials. Please try again."
        );
    }
}
