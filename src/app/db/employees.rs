use sqlx::{FromRow, SqliteExecutor};

use crate::app::{domain::RecordId, tenant::Tenant};

/// Database row for employees table.
#[derive(Debug, Clone, FromRow)]
pub struct Employee {
    pub id: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub nickname: Option<String>,
    /// Position title.
    pub position: String,
    pub archived: bool,
    pub owner_username: String,
    pub org_code: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Employee {
    /// "First Last", falling back to just the first name.
    pub fn full_name(&self) -> String {
        match self.last_name.as_deref() {
            Some(last) if !last.is_empty() => format!("{} {}", self.first_name, last),
            _ => self.first_name.clone(),
        }
    }
}

/// Editable employee fields.
#[derive(Debug, Clone)]
pub struct EmployeeFields {
    pub first_name: String,
    pub last_name: Option<String>,
    pub nickname: Option<String>,
    pub position: String,
}

const EMPLOYEE_COLUMNS: &str = "employees.id, employees.first_name, employees.last_name, employees.nickname, employees.position, employees.archived, employees.owner_username, employees.org_code, employees.created_at, employees.updated_at";

/// Employees in the tenant with the given archived state, ordered by name.
pub async fn list_for_tenant<'e, E>(
    executor: E,
    tenant: &Tenant,
    archived: bool,
) -> Result<Vec<Employee>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!(
        "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE employees.archived = ? AND {} ORDER BY employees.first_name COLLATE NOCASE, employees.last_name COLLATE NOCASE",
        tenant.scope_clause("employees")
    );
    sqlx::query_as::<_, Employee>(&sql)
        .bind(archived)
        .bind(tenant.scope_value())
        .fetch_all(executor)
        .await
}

/// Find an employee by ID, only if it belongs to the tenant.
pub async fn find_in_tenant<'e, E>(
    executor: E,
    tenant: &Tenant,
    id: &RecordId,
) -> Result<Option<Employee>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!(
        "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE employees.id = ? AND {}",
        tenant.scope_clause("employees")
    );
    sqlx::query_as::<_, Employee>(&sql)
        .bind(id.as_str())
        .bind(tenant.scope_value())
        .fetch_optional(executor)
        .await
}

/// Number of active (non-archived) employees in the tenant.
pub async fn count_active<'e, E>(executor: E, tenant: &Tenant) -> Result<i64, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!(
        "SELECT count(*) FROM employees WHERE employees.archived = 0 AND {}",
        tenant.scope_clause("employees")
    );
    sqlx::query_scalar::<_, i64>(&sql)
        .bind(tenant.scope_value())
        .fetch_one(executor)
        .await
}

/// Create an active employee owned by `owner` in `tenant`. Returns the new ID.
pub async fn insert<'e, E>(
    executor: E,
    tenant: &Tenant,
    owner: &str,
    fields: &EmployeeFields,
) -> Result<RecordId, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let id = RecordId::new();
    let now = super::now();
    sqlx::query(
        "INSERT INTO employees (id, first_name, last_name, nickname, position, archived, owner_username, org_code, created_at, updated_at) VALUES (?, ?, ?, ?, ?, 0, ?, ?, ?, ?)",
    )
    .bind(id.as_str())
    .bind(&fields.first_name)
    .bind(&fields.last_name)
    .bind(&fields.nickname)
    .bind(&fields.position)
    .bind(owner)
    .bind(tenant.org_code())
    .bind(now)
    .bind(now)
    .execute(executor)
    .await?;
    Ok(id)
}

/// Update an employee within the tenant. Returns false if no such employee.
pub async fn update<'e, E>(
    executor: E,
    tenant: &Tenant,
    id: &RecordId,
    fields: &EmployeeFields,
) -> Result<bool, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!(
        "UPDATE employees SET first_name = ?, last_name = ?, nickname = ?, position = ?, updated_at = ? WHERE employees.id = ? AND {}",
        tenant.scope_clause("employees")
    );
    let result = sqlx::query(&sql)
        .bind(&fields.first_name)
        .bind(&fields.last_name)
        .bind(&fields.nickname)
        .bind(&fields.position)
        .bind(super::now())
        .bind(id.as_str())
        .bind(tenant.scope_value())
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Archive or reinstate an employee within the tenant. Returns false if no such employee.
pub async fn set_archived<'e, E>(
    executor: E,
    tenant: &Tenant,
    id: &RecordId,
    archived: bool,
) -> Result<bool, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!(
        "UPDATE employees SET archived = ?, updated_at = ? WHERE employees.id = ? AND {}",
        tenant.scope_clause("employees")
    );
    let result = sqlx::query(&sql)
        .bind(archived)
        .bind(super::now())
        .bind(id.as_str())
        .bind(tenant.scope_value())
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}
