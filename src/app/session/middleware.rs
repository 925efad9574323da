use axum::{
    extract::{Request, State},
    http::header::SET_COOKIE,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use super::{
    clear_session_cookie,
    resolver::{self, CookieDirective},
    session_cookie, SESSION_COOKIE,
};
use crate::app::AppState;

/// Resolve the caller's scope, enforce login redirects, and attach the scope
/// to the request for handlers.
pub async fn resolve_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let raw = jar.get(SESSION_COOKIE).map(|cookie| cookie.value().to_string());
    let resolution = resolver::resolve(&state.db, raw.as_deref()).await;

    let jar = match resolution.cookie {
        CookieDirective::Keep => jar,
        CookieDirective::Clear => jar.add(clear_session_cookie()),
        CookieDirective::Reissue(token) => jar.add(session_cookie(token)),
    };

    let routing = resolver::route(&resolution.scope, request.uri().path());
    if let Some(target) = resolver::redirect_target(routing) {
        return (jar, Redirect::to(target)).into_response();
    }

    request.extensions_mut().insert(resolution.scope);
    let response = next.run(request).await;

    // Login and logout write the session cookie themselves; theirs wins.
    if sets_session_cookie(&response) {
        return response;
    }
    (jar, response).into_response()
}

fn sets_session_cookie(response: &Response) -> bool {
    let prefix = format!("{SESSION_COOKIE}=");
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .any(|value| value.starts_with(&prefix))
}
