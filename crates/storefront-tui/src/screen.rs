//! Screen identifiers and their routes.

use std::fmt;

use storefront_core::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenId {
    Login,
    Products,
}

impl ScreenId {
    pub fn label(self) -> &'static str {
        match self {
            Self::Login => "Sign in",
            Self::Products => "Products",
        }
    }
}

impl From<Route> for ScreenId {
    fn from(route: Route) -> Self {
        match route {
            Route::Home => Self::Products,
            Route::Login => Self::Login,
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_map_to_screens() {
        assert_eq!(ScreenId::from(Route::Home), ScreenId::Products);
        assert_eq!(ScreenId::from(Route::Login), ScreenId::Login);
    }
}
