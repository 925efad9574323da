use askama::Template;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};

use super::EmployeeForm;
use crate::app::{
    db,
    error::AppError,
    features::{redirect_with_error, Chrome, Feedback},
    session::AuthenticatedScope,
    AppState,
};

/// New employee form template.
#[derive(Template)]
#[template(path = "employees_new.html")]
pub struct NewEmployeeTemplate {
    pub chrome: Chrome,
    pub positions: Vec<String>,
    pub error: String,
}

/// GET /employees/new — Show the creation form.
pub async fn show_form(
    scope: AuthenticatedScope,
    State(state): State<AppState>,
    Query(query): Query<Feedback>,
) -> Result<impl IntoResponse, AppError> {
    let positions = db::positions::titles_for_tenant(&state.db, &scope.tenant()).await?;
    Ok(NewEmployeeTemplate {
        chrome: Chrome::new(&scope),
        positions,
        error: query.error.unwrap_or_default(),
    })
}

/// POST /employees — Create an employee, redirect to the list.
pub async fn create(
    scope: AuthenticatedScope,
    State(state): State<AppState>,
    Form(form): Form<EmployeeForm>,
) -> Result<Response, AppError> {
    let tenant = scope.tenant();
    let titles = db::positions::titles_for_tenant(&state.db, &tenant).await?;

    let fields = match form.into_fields(&titles) {
        Ok(fields) => fields,
        Err(msg) => return Ok(redirect_with_error("/employees/new", &msg).into_response()),
    };

    db::employees::insert(&state.db, &tenant, scope.username(), &fields).await?;

    Ok(Redirect::to("/employees").into_response())
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/employees/new", get(show_form))
        .route("/employees", post(create))
}
