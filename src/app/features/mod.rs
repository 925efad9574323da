pub mod auth;
pub mod dashboard;
pub mod employees;
pub mod positions;
pub mod profile;
pub mod tags;

use axum::response::Redirect;
use serde::Deserialize;

use crate::app::{session::AuthenticatedScope, APP_NAME};

/// Header data every signed-in page renders.
pub struct Chrome {
    pub app_name: &'static str,
    pub username: String,
    pub org_code: Option<String>,
    pub is_admin: bool,
}

impl Chrome {
    pub fn new(scope: &AuthenticatedScope) -> Self {
        Self {
            app_name: APP_NAME,
            username: scope.user.username.clone(),
            org_code: scope.org_code.clone(),
            is_admin: scope.is_admin,
        }
    }
}

/// Query parameters carrying error/success feedback after a redirect.
#[derive(Debug, Default, Deserialize)]
pub struct Feedback {
    pub error: Option<String>,
    pub success: Option<String>,
}

pub(crate) fn redirect_with_error(path: &str, msg: &str) -> Redirect {
    Redirect::to(&format!("{}?error={}", path, urlencoding::encode(msg)))
}

pub(crate) fn redirect_with_success(path: &str, msg: &str) -> Redirect {
    Redirect::to(&format!("{}?success={}", path, urlencoding::encode(msg)))
}

/// Trimmed value, or `None` when blank.
pub(crate) fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// `YYYY-MM-DD` for a unix timestamp.
pub(crate) fn format_date(unix: i64) -> String {
    time::OffsetDateTime::from_unix_timestamp(unix)
        .map(|dt| dt.date().to_string())
        .unwrap_or_default()
}

pub(crate) fn format_rating(rating: Option<f64>) -> String {
    rating
        .map(|r| format!("{:.1}", r))
        .unwrap_or_else(|| "–".to_string())
}
