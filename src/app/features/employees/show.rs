use std::collections::HashMap;

use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect},
    routing::{get, post},
    Router,
};
use axum_extra::extract::Form;
use serde::Deserialize;
use validator::Validate;

use super::{parse_id, EmployeeRow};
use crate::app::{
    db::{self, entries::NewEntry},
    domain::{rating, Rating},
    error::AppError,
    features::{
        format_date, format_rating, non_blank, redirect_with_error, redirect_with_success, Chrome,
        Feedback,
    },
    session::AuthenticatedScope,
    AppState,
};

pub struct EntryRow {
    pub note: String,
    pub rating: String,
    pub author: String,
    pub created: String,
    pub tags: Vec<String>,
}

pub struct TagOption {
    pub id: String,
    pub name: String,
}

/// Employee detail template.
#[derive(Template)]
#[template(path = "employee_show.html")]
pub struct EmployeeShowTemplate {
    pub chrome: Chrome,
    pub employee: EmployeeRow,
    pub archived: bool,
    pub entries: Vec<EntryRow>,
    pub entry_count: usize,
    pub average_rating: String,
    pub tags: Vec<TagOption>,
    pub error: String,
    pub success: String,
}

/// New performance entry form data. `tags` repeats once per checked tag.
#[derive(Debug, Deserialize, Validate)]
pub struct EntryForm {
    #[serde(default)]
    #[validate(length(max = 5000))]
    pub note: String,

    #[serde(default)]
    pub rating: String,

    #[serde(default)]
    pub tags: Vec<String>,
}

/// GET /employees/:id — Employee with entries (newest first) and rating summary.
pub async fn show(
    scope: AuthenticatedScope,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<Feedback>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    let tenant = scope.tenant();

    let employee = db::employees::find_in_tenant(&state.db, &tenant, &id)
        .await?
        .ok_or_else(AppError::not_found)?;
    let positions = db::positions::list_for_tenant(&state.db, &tenant).await?;
    let entries = db::entries::list_for_employee(&state.db, &tenant, &id).await?;
    let tags = db::tags::list_for_tenant(&state.db, &tenant).await?;

    let mut tags_by_entry: HashMap<String, Vec<String>> = HashMap::new();
    for (entry_id, name) in db::entries::tag_names_for_employee(&state.db, &tenant, &id).await? {
        tags_by_entry.entry(entry_id).or_default().push(name);
    }

    let ratings: Vec<f64> = entries.iter().map(|e| e.rating).collect();
    let archived = employee.archived;

    Ok(EmployeeShowTemplate {
        chrome: Chrome::new(&scope),
        employee: EmployeeRow::new(employee, &positions),
        archived,
        entry_count: entries.len(),
        average_rating: format_rating(rating::average(&ratings)),
        entries: entries
            .into_iter()
            .map(|e| EntryRow {
                tags: tags_by_entry.remove(&e.id).unwrap_or_default(),
                note: e.note,
                rating: format_rating(Some(e.rating)),
                author: e.owner_username,
                created: format_date(e.created_at),
            })
            .collect(),
        tags: tags
            .into_iter()
            .map(|t| TagOption { id: t.id, name: t.name })
            .collect(),
        error: query.error.unwrap_or_default(),
        success: query.success.unwrap_or_default(),
    })
}

/// POST /employees/:id/entries — Record a performance entry.
pub async fn add_entry(
    scope: AuthenticatedScope,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<EntryForm>,
) -> Result<Redirect, AppError> {
    let record_id = parse_id(&id)?;
    let back = format!("/employees/{}", record_id);
    let tenant = scope.tenant();

    if db::employees::find_in_tenant(&state.db, &tenant, &record_id)
        .await?
        .is_none()
    {
        return Err(AppError::not_found());
    }

    let Some(note) = non_blank(&form.note) else {
        return Ok(redirect_with_error(&back, "A note is required."));
    };
    if form.validate().is_err() {
        return Ok(redirect_with_error(&back, "Notes must be at most 5000 characters."));
    }
    let rating = match Rating::parse(&form.rating) {
        Ok(rating) => rating,
        Err(_) => return Ok(redirect_with_error(&back, "Rating must be a number between 0 and 5.")),
    };

    let tag_ids = db::tags::retain_in_tenant(&state.db, &tenant, &form.tags).await?;

    let entry = NewEntry {
        employee_id: &record_id,
        note: &note,
        rating,
        author: scope.username(),
        tag_ids: &tag_ids,
    };

    let mut tx = state.db.begin().await?;
    db::entries::insert(&mut *tx, &tenant, &entry).await?;
    tx.commit().await?;

    Ok(redirect_with_success(&back, "Entry added."))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/employees/:id", get(show))
        .route("/employees/:id/entries", post(add_entry))
}
