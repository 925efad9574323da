use axum::{response::Redirect, routing::get, Router};
use axum_extra::extract::cookie::CookieJar;

use crate::app::{
    session::{clear_session_cookie, LOGIN_PATH},
    AppState,
};

/// GET|POST /logout — Drop the session cookie. Sessions are stateless, so
/// there is nothing to delete server-side.
pub async fn submit(jar: CookieJar) -> (CookieJar, Redirect) {
    (jar.add(clear_session_cookie()), Redirect::to(LOGIN_PATH))
}

/// Logout routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/logout", get(submit).post(submit))
}
