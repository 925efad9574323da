use sqlx::{FromRow, SqliteExecutor};

use crate::app::{domain::RecordId, tenant::Tenant};

/// Database row for tags table.
#[derive(Debug, Clone, FromRow)]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub owner_username: String,
    pub org_code: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Editable tag fields.
#[derive(Debug, Clone)]
pub struct TagFields {
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
}

const TAG_COLUMNS: &str = "tags.id, tags.name, tags.description, tags.color, tags.owner_username, tags.org_code, tags.created_at, tags.updated_at";

/// All tags in the tenant, ordered by name.
pub async fn list_for_tenant<'e, E>(executor: E, tenant: &Tenant) -> Result<Vec<Tag>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!(
        "SELECT {TAG_COLUMNS} FROM tags WHERE {} ORDER BY tags.name COLLATE NOCASE",
        tenant.scope_clause("tags")
    );
    sqlx::query_as::<_, Tag>(&sql)
        .bind(tenant.scope_value())
        .fetch_all(executor)
        .await
}

/// Keep only the IDs that name tags in the tenant.
pub async fn retain_in_tenant<'e, E>(
    executor: E,
    tenant: &Tenant,
    candidates: &[String],
) -> Result<Vec<String>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    if candidates.is_empty() {
        return Ok(Vec::new());
    }
    let placeholders = vec!["?"; candidates.len()].join(", ");
    let sql = format!(
        "SELECT tags.id FROM tags WHERE tags.id IN ({placeholders}) AND {}",
        tenant.scope_clause("tags")
    );
    let mut query = sqlx::query_scalar::<_, String>(&sql);
    for id in candidates {
        query = query.bind(id);
    }
    query.bind(tenant.scope_value()).fetch_all(executor).await
}

/// Create a tag owned by `owner` in `tenant`. Returns the new ID.
pub async fn insert<'e, E>(
    executor: E,
    tenant: &Tenant,
    owner: &str,
    fields: &TagFields,
) -> Result<RecordId, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let id = RecordId::new();
    let now = super::now();
    sqlx::query(
        "INSERT INTO tags (id, name, description, color, owner_username, org_code, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id.as_str())
    .bind(&fields.name)
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

/// Update a tag within the tenant. Returns false if no such tag.
pub async fn update<'e, E>(
    executor: E,
    tenant: &Tenant,
    id: &RecordId,
    fields: &TagFields,
) -> Result<bool, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!(
        "UPDATE tags SET name = ?, description = ?, color = ?, updated_at = ? WHERE tags.id = ? AND {}",
        tenant.scope_clause("tags")
    );
    let result = sqlx::query(&sql)
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(&fields.color)
        .bind(super::now())
        .bind(id.as_str())
        .bind(tenant.scope_value())
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Delete a tag within the tenant. Returns false if no such tag.
pub async fn delete<'e, E>(executor: E, tenant: &Tenant, id: &RecordId) -> Result<bool, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!(
        "DELETE FROM tags WHERE tags.id = ? AND {}",
        tenant.scope_clause("tags")
    );
    let result = sqlx::query(&sql)
        .bind(id.as_str())
        .bind(tenant.scope_value())
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}
