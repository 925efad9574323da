use askama::Template;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use serde::Deserialize;

use crate::app::{
    db::{self, employees::EmployeeFields},
    domain::roster::parse_roster,
    error::AppError,
    features::Chrome,
    session::AuthenticatedScope,
    AppState,
};

/// Bulk import form data.
#[derive(Debug, Deserialize)]
pub struct BulkImportForm {
    #[serde(default)]
    pub csv_data: String,
}

/// Bulk import template.
#[derive(Template)]
#[template(path = "employees_bulk.html")]
pub struct BulkImportTemplate {
    pub chrome: Chrome,
    pub positions: Vec<String>,
    pub csv_data: String,
    pub errors: Vec<String>,
}

/// GET /employees/bulk — Show the import form.
pub async fn show_form(
    scope: AuthenticatedScope,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let positions = db::positions::titles_for_tenant(&state.db, &scope.tenant()).await?;
    Ok(BulkImportTemplate {
        chrome: Chrome::new(&scope),
        positions,
        csv_data: String::new(),
        errors: Vec::new(),
    })
}

/// POST /employees/bulk — Import `first_name,last_name,position` rows.
/// Nothing is written unless every row is valid.
pub async fn import(
    scope: AuthenticatedScope,
    State(state): State<AppState>,
    Form(form): Form<BulkImportForm>,
) -> Result<Response, AppError> {
    let tenant = scope.tenant();
    let positions = db::positions::titles_for_tenant(&state.db, &tenant).await?;

    let rows = match parse_roster(&form.csv_data, &positions) {
        Ok(rows) => rows,
        Err(errors) => {
            return Ok(BulkImportTemplate {
                chrome: Chrome::new(&scope),
                positions,
                csv_data: form.csv_data,
                errors,
            }
            .into_response())
        }
    };

    let mut tx = state.db.begin().await?;
    for row in &rows {
        let fields = EmployeeFields {
            first_name: row.first_name.clone(),
            last_name: Some(row.last_name.clone()),
            nickname: None,
            position: row.position.clone(),
        };
        db::employees::insert(&mut *tx, &tenant, scope.username(), &fields).await?;
    }
    tx.commit().await?;

    tracing::info!(count = rows.len(), username = %scope.username(), "employees imported");
    Ok(Redirect::to("/employees").into_response())
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/employees/bulk", get(show_form).post(import))
}
