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
    db::{self, positions::{Position, PositionFields}},
    domain::{BadgeStyle, HexColor, RecordId},
    error::AppError,
    features::{non_blank, redirect_with_error, redirect_with_success, Chrome, Feedback},
    session::AuthenticatedScope,
    AppState,
};

const POSITIONS_PATH: &str = "/positions";

/// Position form data (create and update).
#[derive(Debug, Deserialize, Validate)]
pub struct PositionForm {
    #[serde(default)]
    #[validate(length(max = 100))]
    pub title: String,

    #[serde(default)]
    #[validate(length(max = 500))]
    pub description: String,

    #[serde(default)]
    pub color: String,
}

impl PositionForm {
    fn into_fields(self) -> Result<PositionFields, String> {
        if self.validate().is_err() {
            return Err("Title or description is too long.".to_string());
        }
        let title = non_blank(&self.title).ok_or("Title is required.")?;
        let color = HexColor::optional(Some(&self.color)).map_err(|e| e.to_string())?;
        Ok(PositionFields {
            title,
            description: non_blank(&self.description),
            color: color.map(|c| c.as_str().to_string()),
        })
    }
}

pub struct PositionRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub color: String,
    pub badge: BadgeStyle,
}

impl From<Position> for PositionRow {
    fn from(p: Position) -> Self {
        Self {
            badge: BadgeStyle::for_color(p.color.as_deref()),
            id: p.id,
            title: p.title,
            description: p.description.unwrap_or_default(),
            color: p.color.unwrap_or_default(),
        }
    }
}

#[derive(Template)]
#[template(path = "positions.html")]
pub struct PositionsTemplate {
    pub chrome: Chrome,
    pub positions: Vec<PositionRow>,
    pub error: String,
    pub success: String,
}

/// GET /positions
pub async fn list(
    scope: AuthenticatedScope,
    State(state): State<AppState>,
    Query(query): Query<Feedback>,
) -> Result<impl IntoResponse, AppError> {
    let positions = db::positions::list_for_tenant(&state.db, &scope.tenant()).await?;
    Ok(PositionsTemplate {
        chrome: Chrome::new(&scope),
        positions: positions.into_iter().map(PositionRow::from).collect(),
        error: query.error.unwrap_or_default(),
        success: query.success.unwrap_or_default(),
    })
}

/// POST /positions — Admin only.
pub async fn create(
    scope: AuthenticatedScope,
    State(state): State<AppState>,
    Form(form): Form<PositionForm>,
) -> Result<Redirect, AppError> {
    scope.require_admin()?;
    let fields = match form.into_fields() {
        Ok(fields) => fields,
        Err(msg) => return Ok(redirect_with_error(POSITIONS_PATH, &msg)),
    };
    db::positions::insert(&state.db, &scope.tenant(), scope.username(), &fields).await?;
    Ok(redirect_with_success(POSITIONS_PATH, "Position created."))
}

/// POST /positions/:id/update — Admin only.
pub async fn update(
    scope: AuthenticatedScope,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<PositionForm>,
) -> Result<Redirect, AppError> {
    scope.require_admin()?;
    let id = RecordId::from_string(&id).map_err(|_| AppError::not_found())?;
    let fields = match form.into_fields() {
        Ok(fields) => fields,
        Err(msg) => return Ok(redirect_with_error(POSITIONS_PATH, &msg)),
    };
    if !db::positions::update(&state.db, &scope.tenant(), &id, &fields).await? {
        return Err(AppError::not_found());
    }
    Ok(redirect_with_success(POSITIONS_PATH, "Position updated."))
}

/// POST /positions/:id/delete — Admin only.
pub async fn delete(
    scope: AuthenticatedScope,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    scope.require_admin()?;
    let id = RecordId::from_string(&id).map_err(|_| AppError::not_found())?;
    if !db::positions::delete(&state.db, &scope.tenant(), &id).await? {
        return Err(AppError::not_found());
    }
    Ok(redirect_with_success(POSITIONS_PATH, "Position deleted."))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(POSITIONS_PATH, get(list).post(create))
        .route("/positions/:id/update", post(update))
        .route("/positions/:id/delete", post(delete))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(title: &str, color: &str) -> PositionForm {
        PositionForm {
            title: title.to_string(),
            description: "  ".to_string(),
            color: color.to_string(),
        }
    }

    #[test]
    fn blank_title_is_rejected() {
        assert_eq!(form("   ", "").into_fields().unwrap_err(), "Title is required.");
    }

    #[test]
    fn fields_are_trimmed_and_color_normalized() {
        let fields = form(" Developer ", "#AABBCC").into_fields().unwrap();
        assert_eq!(fields.title, "Developer");
        assert_eq!(fields.description, None);
        assert_eq!(fields.color.as_deref(), Some("#aabbcc"));
    }

    #[test]
    fn empty_color_is_none() {
        assert_eq!(form("Designer", "").into_fields().unwrap().color, None);
    }

    #[test]
    fn bad_color_is_rejected() {
        assert!(form("Designer", "blue").into_fields().is_err());
    }
}
