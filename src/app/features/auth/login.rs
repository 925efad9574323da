use askama::Template;
use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect},
    routing::get,
    Form, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use validator::Validate;

use crate::app::{
    domain::{OrgCode, Username},
    error::AppError,
    features::{auth::service, non_blank},
    session::{session_cookie, HOME_PATH, LOGIN_PATH},
    AppState, APP_NAME,
};

/// Login form data from HTTP request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1, max = 64))]
    pub username: String,

    #[serde(default)]
    #[validate(length(max = 128))]
    pub password: String,

    /// Organization code; only used when the account is created.
    #[serde(default)]
    #[validate(length(max = 64))]
    pub organization: String,
}

/// Login page template.
#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub app_name: &'static str,
    pub username: String,
    pub organization: String,
    pub error: String,
}

impl LoginTemplate {
    fn with_error(form: &LoginForm, error: impl Into<String>) -> Html<String> {
        let template = Self {
            app_name: APP_NAME,
            username: form.username.clone(),
            organization: form.organization.clone(),
            error: error.into(),
        };
        Html(template.render().unwrap_or_else(|_| "Template error".to_string()))
    }
}

/// GET /login — Show login form.
pub async fn show() -> LoginTemplate {
    LoginTemplate {
        app_name: APP_NAME,
        username: String::new(),
        organization: String::new(),
        error: String::new(),
    }
}

/// POST /login — Sign in (or sign up on first use) and set the session cookie.
pub async fn submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<impl IntoResponse, Html<String>> {
    if form.validate().is_err() {
        return Err(LoginTemplate::with_error(&form, "Username is required."));
    }

    let username = Username::new(form.username.clone()).map_err(|e| {
        LoginTemplate::with_error(
            &form,
            e.message.map(|m| m.into_owned()).unwrap_or_else(|| "Invalid username.".to_string()),
        )
    })?;

    let organization = match non_blank(&form.organization) {
        Some(code) => Some(OrgCode::new(code).map_err(|e| {
            LoginTemplate::with_error(
                &form,
                e.message
                    .map(|m| m.into_owned())
                    .unwrap_or_else(|| "Invalid organization code.".to_string()),
            )
        })?),
        None => None,
    };

    match service::login(&state.db, &username, form.password.clone(), organization.as_ref()).await {
        Ok(token) => Ok((jar.add(session_cookie(token)), Redirect::to(HOME_PATH))),
        Err(AppError::Auth(msg)) | Err(AppError::Validation(msg)) => {
            Err(LoginTemplate::with_error(&form, msg))
        }
        Err(err) => {
            tracing::error!(%err, "login failed");
            Err(LoginTemplate::with_error(&form, "An unexpected error occurred."))
        }
    }
}

/// Login routes.
pub fn routes() -> Router<AppState> {
    Router::new().route(LOGIN_PATH, get(show).post(submit))
}
