use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect},
    routing::{get, post},
    Router,
};

use super::{parse_id, EmployeeRow};
use crate::app::{
    db,
    error::AppError,
    features::{redirect_with_success, Chrome, Feedback},
    session::AuthenticatedScope,
    AppState,
};

/// Archived employees template.
#[derive(Template)]
#[template(path = "employees_archived.html")]
pub struct ArchivedEmployeesTemplate {
    pub chrome: Chrome,
    pub employees: Vec<EmployeeRow>,
    pub success: String,
}

/// GET /employees/archived
pub async fn list(
    scope: AuthenticatedScope,
    State(state): State<AppState>,
    Query(query): Query<Feedback>,
) -> Result<impl IntoResponse, AppError> {
    let tenant = scope.tenant();
    let positions = db::positions::list_for_tenant(&state.db, &tenant).await?;
    let employees = db::employees::list_for_tenant(&state.db, &tenant, true).await?;

    Ok(ArchivedEmployeesTemplate {
        chrome: Chrome::new(&scope),
        employees: employees
            .into_iter()
            .map(|e| EmployeeRow::new(e, &positions))
            .collect(),
        success: query.success.unwrap_or_default(),
    })
}

/// POST /employees/:id/reinstate — Bring an archived employee back.
pub async fn reinstate(
    scope: AuthenticatedScope,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let id = parse_id(&id)?;

    if !db::employees::set_archived(&state.db, &scope.tenant(), &id, false).await? {
        return Err(AppError::not_found());
    }

    Ok(redirect_with_success("/employees/archived", "Employee reinstated."))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/employees/archived", get(list))
        .route("/employees/:id/reinstate", post(reinstate))
}
