use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};

use super::{parse_id, EmployeeForm, EmployeeRow};
use crate::app::{
    db,
    error::AppError,
    features::{redirect_with_error, redirect_with_success, Chrome, Feedback},
    session::AuthenticatedScope,
    AppState,
};

/// Active employees template.
#[derive(Template)]
#[template(path = "employees_list.html")]
pub struct EmployeesTemplate {
    pub chrome: Chrome,
    pub employees: Vec<EmployeeRow>,
    pub positions: Vec<String>,
    pub error: String,
    pub success: String,
}

/// GET /employees — Active employees in the tenant.
pub async fn list(
    scope: AuthenticatedScope,
    State(state): State<AppState>,
    Query(query): Query<Feedback>,
) -> Result<impl IntoResponse, AppError> {
    let tenant = scope.tenant();
    let positions = db::positions::list_for_tenant(&state.db, &tenant).await?;
    let employees = db::employees::list_for_tenant(&state.db, &tenant, false).await?;

    Ok(EmployeesTemplate {
        chrome: Chrome::new(&scope),
        employees: employees
            .into_iter()
            .map(|e| EmployeeRow::new(e, &positions))
            .collect(),
        positions: positions.into_iter().map(|p| p.title).collect(),
        error: query.error.unwrap_or_default(),
        success: query.success.unwrap_or_default(),
    })
}

/// POST /employees/:id/update — Edit an employee.
pub async fn update(
    scope: AuthenticatedScope,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<EmployeeForm>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;
    let tenant = scope.tenant();
    let titles = db::positions::titles_for_tenant(&state.db, &tenant).await?;

    let fields = match form.into_fields(&titles) {
        Ok(fields) => fields,
        Err(msg) => return Ok(redirect_with_error("/employees", &msg).into_response()),
    };

    if !db::employees::update(&state.db, &tenant, &id, &fields).await? {
        return Err(AppError::not_found());
    }

    Ok(redirect_with_success("/employees", "Employee updated.").into_response())
}

/// POST /employees/:id/archive — Move an employee to the archive.
pub async fn archive(
    scope: AuthenticatedScope,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let id = parse_id(&id)?;

    if !db::employees::set_archived(&state.db, &scope.tenant(), &id, true).await? {
        return Err(AppError::not_found());
    }

    Ok(redirect_with_success("/employees", "Employee archived."))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/employees", get(list))
        .route("/employees/:id/update", post(update))
        .route("/employees/:id/archive", post(archive))
}
