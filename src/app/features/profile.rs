use askama::Template;
use axum::{
    extract::{Query, State},
    response::Redirect,
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use validator::Validate;

use crate::app::{
    db::{self, users::ProfileUpdate},
    domain::{credentials_match, HashedPassword, Password, PasswordChange, UserId, Username},
    error::AppError,
    features::{non_blank, redirect_with_error, redirect_with_success, Chrome, Feedback},
    session::AuthenticatedScope,
    AppState,
};

const PROFILE_PATH: &str = "/profile";

#[derive(Template)]
#[template(path = "profile.html")]
pub struct ProfileTemplate {
    pub chrome: Chrome,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub has_password: bool,
    pub error: String,
    pub success: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ProfileForm {
    #[serde(default)]
    pub username: String,

    #[serde(default)]
    #[validate(length(max = 100))]
    pub first_name: String,

    #[serde(default)]
    #[validate(length(max = 100))]
    pub last_name: String,
}

#[derive(Debug, Deserialize)]
pub struct PasswordForm {
    #[serde(default)]
    pub old_password: String,
    #[serde(default)]
    pub new_password: String,
    #[serde(default)]
    pub repeat_password: String,
}

/// GET /profile
pub async fn show(scope: AuthenticatedScope, Query(query): Query<Feedback>) -> ProfileTemplate {
    ProfileTemplate {
        chrome: Chrome::new(&scope),
        username: scope.user.username.clone(),
        first_name: scope.user.first_name.clone().unwrap_or_default(),
        last_name: scope.user.last_name.clone().unwrap_or_default(),
        has_password: scope.user.password_hash.is_some(),
        error: query.error.unwrap_or_default(),
        success: query.success.unwrap_or_default(),
    }
}

/// POST /profile — Update username and names. A rename carries ownership along.
pub async fn update(
    scope: AuthenticatedScope,
    State(state): State<AppState>,
    Form(form): Form<ProfileForm>,
) -> Result<Redirect, AppError> {
    if form.validate().is_err() {
        return Ok(redirect_with_error(PROFILE_PATH, "Names must be at most 100 characters."));
    }
    let username = match Username::new(form.username.clone()) {
        Ok(username) => username,
        Err(e) => return Ok(redirect_with_error(PROFILE_PATH, &e.to_string())),
    };

    if username.as_str() != scope.user.username {
        if let Some(other) = db::find_by_username(&state.db, username.as_str()).await? {
            if other.id != scope.user.id {
                return Ok(redirect_with_error(PROFILE_PATH, "That username is taken."));
            }
        }
    }

    let first_name = non_blank(&form.first_name);
    let last_name = non_blank(&form.last_name);
    let update = ProfileUpdate {
        username: &username,
        first_name: first_name.as_deref(),
        last_name: last_name.as_deref(),
    };

    let mut tx = state.db.begin().await?;
    match db::users::update_profile(&mut *tx, &scope.user, &update).await {
        Ok(()) => tx.commit().await?,
        // Claimed by someone else after the check above.
        Err(e) if db::is_unique_violation(&e) => {
            return Ok(redirect_with_error(PROFILE_PATH, "That username is taken."));
        }
        Err(e) => return Err(e.into()),
    }

    if username.as_str() != scope.user.username {
        tracing::info!(from = %scope.user.username, to = %username.as_str(), "username changed");
    }

    Ok(redirect_with_success(PROFILE_PATH, "Profile updated successfully."))
}

/// POST /profile/password — Create, change or remove the account password.
pub async fn change_password(
    scope: AuthenticatedScope,
    State(state): State<AppState>,
    Form(form): Form<PasswordForm>,
) -> Result<Redirect, AppError> {
    if form.new_password != form.repeat_password {
        return Ok(redirect_with_error(PROFILE_PATH, "New passwords do not match."));
    }

    let had_password = scope.user.password_hash.is_some();
    let old = Password::for_verification(form.old_password);
    if !credentials_match(scope.user.password_hash.as_deref(), &old) {
        return Ok(redirect_with_error(PROFILE_PATH, "Invalid old password."));
    }

    let new_hash = if form.new_password.is_empty() {
        None
    } else {
        let password = match Password::new(form.new_password) {
            Ok(password) => password,
            Err(e) => return Ok(redirect_with_error(PROFILE_PATH, &e.to_string())),
        };
        Some(HashedPassword::from_password(&password).map_err(|_| AppError::Internal)?)
    };

    let Some(change) = PasswordChange::classify(had_password, new_hash.is_some()) else {
        return Ok(redirect_with_success(PROFILE_PATH, "Password unchanged."));
    };

    let user_id = UserId::from_string(&scope.user.id).map_err(|_| AppError::Internal)?;
    db::users::update_password(&state.db, &user_id, new_hash.as_ref()).await?;

    Ok(redirect_with_success(PROFILE_PATH, change.message()))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(PROFILE_PATH, get(show).post(update))
        .route("/profile/password", post(change_password))
}
