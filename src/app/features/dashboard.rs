use askama::Template;
use axum::{extract::State, response::IntoResponse, routing::get, Router};

use crate::app::{
    db::{self, entries::EntryWithEmployee},
    error::AppError,
    features::{format_date, format_rating, Chrome},
    session::{AuthenticatedScope, HOME_PATH},
    AppState,
};

/// How many entries the dashboard lists.
const RECENT_ENTRIES: i64 = 20;

pub struct DashboardEntry {
    pub employee_id: String,
    pub employee_name: String,
    pub note: String,
    pub rating: String,
    pub author: String,
    pub created: String,
}

impl From<EntryWithEmployee> for DashboardEntry {
    fn from(entry: EntryWithEmployee) -> Self {
        let employee_name = match entry.employee_last_name.as_deref() {
            Some(last) if !last.is_empty() => format!("{} {}", entry.employee_first_name, last),
            _ => entry.employee_first_name,
        };
        Self {
            employee_id: entry.employee_id,
            employee_name,
            note: entry.note,
            rating: format_rating(Some(entry.rating)),
            author: entry.owner_username,
            created: format_date(entry.created_at),
        }
    }
}

/// Dashboard page template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub chrome: Chrome,
    pub entries: Vec<DashboardEntry>,
    pub entry_count: i64,
    pub average_rating: String,
    pub active_employees: i64,
}

/// GET / — Recent performance entries and tenant totals.
pub async fn show(
    scope: AuthenticatedScope,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let tenant = scope.tenant();

    let entries = db::entries::recent_for_tenant(&state.db, &tenant, RECENT_ENTRIES).await?;
    let stats = db::entries::stats_for_tenant(&state.db, &tenant).await?;
    let active_employees = db::employees::count_active(&state.db, &tenant).await?;

    Ok(DashboardTemplate {
        chrome: Chrome::new(&scope),
        entries: entries.into_iter().map(DashboardEntry::from).collect(),
        entry_count: stats.count,
        average_rating: format_rating(stats.average),
        active_employees,
    })
}

/// Dashboard routes.
pub fn routes() -> Router<AppState> {
    Router::new().route(HOME_PATH, get(show))
}
