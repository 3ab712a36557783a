//! Top-level screens, one per route.

pub mod login;
pub mod products;

pub use login::LoginScreen;
pub use products::ProductsScreen;

#[cfg(test)]
pub(crate) mod testing {
    //! Canned backend and buffer helpers for screen tests.

    use ratatui::{Terminal, backend::TestBackend};
    use secrecy::SecretString;
    use storefront_api::{Error as ApiError, Product};
    use storefront_core::{Backend, Credentials};

    use crate::component::Component;

    /// Answers every call the same way. Errors are HTTP status codes.
    pub(crate) struct CannedBackend {
        pub(crate) login: Result<&'static str, u16>,
        pub(crate) products: Result<Vec<Product>, u16>,
    }

    fn status(code: u16) -> ApiError {
        ApiError::Status {
            status: code,
            body: String::new(),
        }
    }

    impl Backend for CannedBackend {
        async fn login(&self, _credentials: &Credentials) -> Result<SecretString, ApiError> {
            self.login.map(SecretString::from).map_err(status)
        }

        async fn list_products(&self, _token: &SecretString) -> Result<Vec<Product>, ApiError> {
            self.products.clone().map_err(status)
        }
    }

    /// Render `component` into an off-screen buffer and return its text.
    pub(crate) fn render_to_string(component: &dyn Component, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("test terminal");
        terminal
            .draw(|frame| component.render(frame, frame.area()))
            .expect("draw");
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(usize::from(width))
            .map(|row| row.iter().map(ratatui::buffer::Cell::symbol).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
