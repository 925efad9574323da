#![allow(dead_code)]

use axum::body::Body;
use http::StatusCode;
use http_body_util::BodyExt;
use perftrack::app::{
    config::Config,
    db::{self, organizations::NewOrganization, NewUser},
    domain::{HashedPassword, OrgCode, Password, UserId, Username},
    session::SessionToken,
};
use perftrack::create_router;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tower::ServiceExt;

pub async fn test_pool() -> SqlitePool {
    // One connection keeps every query on the same in-memory database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(&Config::for_tests().database_url)
        .await
        .unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    pool
}

pub fn test_router(pool: SqlitePool) -> axum::Router {
    create_router(pool)
}

pub fn login_form_body(username: &str, password: &str, organization: &str) -> String {
    form_body(&[
        ("username", username),
        ("password", password),
        ("organization", organization),
    ])
}

pub fn form_body(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// `sessionId=<value>` from a Set-Cookie header, ready to send back.
pub fn session_cookie_from(set_cookie_header: &str) -> Option<String> {
    let pair = set_cookie_header.split(';').next()?;
    pair.starts_with("sessionId=").then(|| pair.to_string())
}

/// Cookie header carrying a structured token.
pub fn structured_cookie(user_id: &str, org_code: Option<&str>) -> String {
    let token = SessionToken::encode(user_id, org_code);
    format!("sessionId={}", urlencoding::encode(&token))
}

/// Insert a user directly. Returns the user ID.
pub async fn create_user(
    pool: &SqlitePool,
    username: &str,
    password: Option<&str>,
    organization_code: Option<&str>,
) -> String {
    let password_hash = password.map(|p| {
        let password = Password::new(p.to_string()).unwrap();
        HashedPassword::from_password(&password).unwrap()
    });
    let user = NewUser {
        id: UserId::new(),
        username: Username::new(username.to_string()).unwrap(),
        password_hash,
        organization_code: organization_code.map(|c| OrgCode::new(c.to_string()).unwrap()),
    };
    db::users::insert(pool, &user).await.unwrap();
    user.id.as_str()
}

pub async fn create_organization(pool: &SqlitePool, code: &str, admin: &str) {
    let organization = NewOrganization {
        code: OrgCode::new(code.to_string()).unwrap(),
        name: code.to_string(),
        admin: Username::new(admin.to_string()).unwrap(),
    };
    db::organizations::insert(pool, &organization).await.unwrap();
}

/// Log in through the form and return the cookie header for later requests.
pub async fn login(app: &axum::Router, username: &str, password: &str, organization: &str) -> String {
    let response = post_form(app, "/login", None, &login_form_body(username, password, organization)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let set_cookie = response
        .headers()
        .get("set-cookie")
        .expect("login should set the session cookie")
        .to_str()
        .unwrap();
    session_cookie_from(set_cookie).expect("cookie must be sessionId")
}

pub async fn get(app: &axum::Router, uri: &str, cookie: Option<&str>) -> axum::response::Response {
    let mut builder = http::Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header("cookie", cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_form(
    app: &axum::Router,
    uri: &str,
    cookie: Option<&str>,
    body: &str,
) -> axum::response::Response {
    let mut builder = http::Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header("cookie", cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

pub fn location(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get("location")
        .map(|v| v.to_str().unwrap())
        .unwrap_or_default()
}

pub fn set_cookie(response: &axum::response::Response) -> Option<&str> {
    response
        .headers()
        .get("set-cookie")
        .map(|v| v.to_str().unwrap())
}

pub async fn body_string(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&bytes).to_string()
}
