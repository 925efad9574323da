use sqlx::{FromRow, SqliteExecutor};

use crate::app::{domain::RecordId, tenant::Tenant};

/// Database row for positions table.
#[derive(Debug, Clone, FromRow)]
pub struct Position {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub owner_username: String,
    pub org_code: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Editable position fields.
#[derive(Debug, Clone)]
pub struct PositionFields {
    pub title: String,
    pub description: Option<String>,
    pub color: Option<String>,
}

const POSITION_COLUMNS: &str = "positions.id, positions.title, positions.description, positions.color, positions.owner_username, positions.org_code, positions.created_at, positions.updated_at";

/// All positions in the tenant, ordered by title.
pub async fn list_for_tenant<'e, E>(executor: E, tenant: &Tenant) -> Result<Vec<Position>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!(
        "SELECT {POSITION_COLUMNS} FROM positions WHERE {} ORDER BY positions.title COLLATE NOCASE",
        tenant.scope_clause("positions")
    );
    sqlx::query_as::<_, Position>(&sql)
        .bind(tenant.scope_value())
        .fetch_all(executor)
        .await
}

/// Position titles in the tenant.
pub async fn titles_for_tenant<'e, E>(executor: E, tenant: &Tenant) -> Result<Vec<String>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!(
        "SELECT positions.title FROM positions WHERE {} ORDER BY positions.title COLLATE NOCASE",
        tenant.scope_clause("positions")
    );
    sqlx::query_scalar::<_, String>(&sql)
        .bind(tenant.scope_value())
        .fetch_all(executor)
        .await
}

/// Create a position owned by `owner` in `tenant`. Returns the new ID.
pub async fn insert<'e, E>(
    executor: E,
    tenant: &Tenant,
    owner: &str,
    fields: &PositionFields,
) -> Result<RecordId, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let id = RecordId::new();
    let now = super::now();
    sqlx::query(
        "INSERT INTO positions (id, title, description, color, owner_username, org_code, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id.as_str())
    .bind(&fields.title)
    .bind(&fields.description)
    .bind(&fields.color)
    .bind(owner)
    .bind(tenant.org_code())
    .bind(now)
    .bind(now)
    .execute(executor)
    .await?;
    Ok(id)
}

/// Update a position within the tenant. Returns false if no such position.
pub async fn update<'e, E>(
    executor: E,
    tenant: &Tenant,
    id: &RecordId,
    fields: &PositionFields,
) -> Result<bool, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!(
        "UPDATE positions SET title = ?, description = ?, color = ?, updated_at = ? WHERE positions.id = ? AND {}",
        tenant.scope_clause("positions")
    );
    let result = sqlx::query(&sql)
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(&fields.color)
        .bind(super::now())
        .bind(id.as_str())
        .bind(tenant.scope_value())
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Delete a position within the tenant. Returns false if no such position.
pub async fn delete<'e, E>(executor: E, tenant: &Tenant, id: &RecordId) -> Result<bool, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!(
        "DELETE FROM positions WHERE positions.id = ? AND {}",
        tenant.scope_clause("positions")
    );
    let result = sqlx::query(&sql)
        .bind(id.as_str())
        .bind(tenant.scope_value())
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}
