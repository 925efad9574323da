//! Session cookie handling and per-request tenancy resolution.

mod extract;
mod middleware;
pub mod resolver;
pub mod token;

use axum_extra::extract::cookie::{Cookie, SameSite};

pub use extract::AuthenticatedScope;
pub use middleware::resolve_session;
pub use resolver::{RequestScope, ScopeDirectory};
pub use token::SessionToken;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "sessionId";

/// The only page reachable without a session.
pub const LOGIN_PATH: &str = "/login";

/// Where signed-in users land.
pub const HOME_PATH: &str = "/";

pub fn session_cookie(token: impl Into<String>) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token.into()))
        .http_only(true)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(time::Duration::weeks(1))
        .build()
}

pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .removal()
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_cookie_attributes() {
        let cookie = session_cookie("token");
        assert_eq!(cookie.name(), "sessionId");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.max_age(), Some(time::Duration::days(7)));
    }

    #[test]
    fn clearing_cookie_expires_it() {
        let cookie = clear_session_cookie();
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
    }
}
