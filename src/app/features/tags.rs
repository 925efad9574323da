use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use validator::Validate;

use crate::app::{
    db::{self, tags::{Tag, TagFields}},
    domain::{BadgeStyle, HexColor, RecordId},
    error::AppError,
    features::{non_blank, redirect_with_error, redirect_with_success, Chrome, Feedback},
    session::AuthenticatedScope,
    AppState,
};

const TAGS_PATH: &str = "/tags";

/// Tag form data (create and update).
#[derive(Debug, Deserialize, Validate)]
pub struct TagForm {
    #[serde(default)]
    #[validate(length(max = 100))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 500))]
    pub description: String,

    #[serde(default)]
    pub color: String,
}

impl TagForm {
    fn into_fields(self) -> Result<TagFields, String> {
        if self.validate().is_err() {
            return Err("Name or description is too long.".to_string());
        }
        let name = non_blank(&self.name).ok_or("Name is required.")?;
        let color = HexColor::optional(Some(&self.color)).map_err(|e| e.to_string())?;
        Ok(TagFields {
            name,
            description: non_blank(&self.description),
            color: color.map(|c| c.as_str().to_string()),
        })
    }
}

pub struct TagRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub color: String,
    pub badge: BadgeStyle,
}

impl From<Tag> for TagRow {
    fn from(t: Tag) -> Self {
        Self {
            badge: BadgeStyle::for_color(t.color.as_deref()),
            id: t.id,
            name: t.name,
            description: t.description.unwrap_or_default(),
            color: t.color.unwrap_or_default(),
        }
    }
}

#[derive(Template)]
#[template(path = "tags.html")]
pub struct TagsTemplate {
    pub chrome: Chrome,
    pub tags: Vec<TagRow>,
    pub error: String,
    pub success: String,
}

/// GET /tags
pub async fn list(
    scope: AuthenticatedScope,
    State(state): State<AppState>,
    Query(query): Query<Feedback>,
) -> Result<impl IntoResponse, AppError> {
    let tags = db::tags::list_for_tenant(&state.db, &scope.tenant()).await?;
    Ok(TagsTemplate {
        chrome: Chrome::new(&scope),
        tags: tags.into_iter().map(TagRow::from).collect(),
        error: query.error.unwrap_or_default(),
        success: query.success.unwrap_or_default(),
    })
}

/// POST /tags — Admin only.
pub async fn create(
    scope: AuthenticatedScope,
    State(state): State<AppState>,
    Form(form): Form<TagForm>,
) -> Result<Redirect, AppError> {
    scope.require_admin()?;
    let fields = match form.into_fields() {
        Ok(fields) => fields,
        Err(msg) => return Ok(redirect_with_error(TAGS_PATH, &msg)),
    };
    db::tags::insert(&state.db, &scope.tenant(), scope.username(), &fields).await?;
    Ok(redirect_with_success(TAGS_PATH, "Tag created."))
}

/// POST /tags/:id/update — Admin only.
pub async fn update(
    scope: AuthenticatedScope,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<TagForm>,
) -> Result<Redirect, AppError> {
    scope.require_admin()?;
    let id = RecordId::from_string(&id).map_err(|_| AppError::not_found())?;
    let fields = match form.into_fields() {
        Ok(fields) => fields,
        Err(msg) => return Ok(redirect_with_error(TAGS_PATH, &msg)),
    };
    if !db::tags::update(&state.db, &scope.tenant(), &id, &fields).await? {
        return Err(AppError::not_found());
    }
    Ok(redirect_with_success(TAGS_PATH, "Tag updated."))
}

/// POST /tags/:id/delete — Admin only.
pub async fn delete(
    scope: AuthenticatedScope,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    scope.require_admin()?;
    let id = RecordId::from_string(&id).map_err(|_| AppError::not_found())?;
    if !db::tags::delete(&state.db, &scope.tenant(), &id).await? {
        return Err(AppError::not_found());
    }
    Ok(redirect_with_success(TAGS_PATH, "Tag deleted."))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(TAGS_PATH, get(list).post(create))
        .route("/tags/:id/update", post(update))
        .route("/tags/:id/delete", post(delete))
}
