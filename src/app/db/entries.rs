use sqlx::{FromRow, SqliteConnection, SqliteExecutor};

use crate::app::{
    domain::{Rating, RecordId},
    tenant::Tenant,
};

/// Database row for entries table.
#[derive(Debug, Clone, FromRow)]
pub struct Entry {
    pub id: String,
    pub employee_id: String,
    pub note: String,
    pub rating: f64,
    pub owner_username: String,
    pub org_code: Option<String>,
    pub created_at: i64,
}

/// Entry joined with the name of the employee it is about.
#[derive(Debug, Clone, FromRow)]
pub struct EntryWithEmployee {
    pub id: String,
    pub employee_id: String,
    pub employee_first_name: String,
    pub employee_last_name: Option<String>,
    pub note: String,
    pub rating: f64,
    pub owner_username: String,
    pub created_at: i64,
}

/// Data structure for inserting a new entry.
pub struct NewEntry<'a> {
    pub employee_id: &'a RecordId,
    pub note: &'a str,
    pub rating: Rating,
    pub author: &'a str,
    /// Tag IDs, already checked to belong to the tenant.
    pub tag_ids: &'a [String],
}

/// Entry count and mean rating.
#[derive(Debug, Clone, Copy, Default, PartialEq, FromRow)]
pub struct EntryStats {
    pub count: i64,
    pub average: Option<f64>,
}

const ENTRY_COLUMNS: &str = "entries.id, entries.employee_id, entries.note, entries.rating, entries.owner_username, entries.org_code, entries.created_at";

/// Entries about one employee in the tenant, newest first.
pub async fn list_for_employee<'e, E>(
    executor: E,
    tenant: &Tenant,
    employee_id: &RecordId,
) -> Result<Vec<Entry>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!(
        "SELECT {ENTRY_COLUMNS} FROM entries WHERE entries.employee_id = ? AND {} ORDER BY entries.created_at DESC, entries.id DESC",
        tenant.scope_clause("entries")
    );
    sqlx::query_as::<_, Entry>(&sql)
        .bind(employee_id.as_str())
        .bind(tenant.scope_value())
        .fetch_all(executor)
        .await
}

/// Most recent entries in the tenant with employee names.
pub async fn recent_for_tenant<'e, E>(
    executor: E,
    tenant: &Tenant,
    limit: i64,
) -> Result<Vec<EntryWithEmployee>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!(
        "SELECT entries.id, entries.employee_id, employees.first_name AS employee_first_name, employees.last_name AS employee_last_name, entries.note, entries.rating, entries.owner_username, entries.created_at \
         FROM entries JOIN employees ON employees.id = entries.employee_id \
         WHERE {} ORDER BY entries.created_at DESC, entries.id DESC LIMIT ?",
        tenant.scope_clause("entries")
    );
    sqlx::query_as::<_, EntryWithEmployee>(&sql)
        .bind(tenant.scope_value())
        .bind(limit)
        .fetch_all(executor)
        .await
}

/// Count and average rating over every entry in the tenant.
pub async fn stats_for_tenant<'e, E>(executor: E, tenant: &Tenant) -> Result<EntryStats, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!(
        "SELECT count(*) AS count, avg(entries.rating) AS average FROM entries WHERE {}",
        tenant.scope_clause("entries")
    );
    sqlx::query_as::<_, EntryStats>(&sql)
        .bind(tenant.scope_value())
        .fetch_one(executor)
        .await
}

/// `(entry_id, tag_name)` pairs for every tagged entry about an employee.
pub async fn tag_names_for_employee<'e, E>(
    executor: E,
    tenant: &Tenant,
    employee_id: &RecordId,
) -> Result<Vec<(String, String)>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!(
        "SELECT entry_tags.entry_id, tags.name FROM entry_tags \
         JOIN entries ON entries.id = entry_tags.entry_id \
         JOIN tags ON tags.id = entry_tags.tag_id \
         WHERE entries.employee_id = ? AND {} ORDER BY tags.name COLLATE NOCASE",
        tenant.scope_clause("entries")
    );
    sqlx::query_as::<_, (String, String)>(&sql)
        .bind(employee_id.as_str())
        .bind(tenant.scope_value())
        .fetch_all(executor)
        .await
}

/// Insert an entry and its tag links. Run inside a transaction.
pub async fn insert(
    conn: &mut SqliteConnection,
    tenant: &Tenant,
    entry: &NewEntry<'_>,
) -> Result<RecordId, sqlx::Error> {
    let id = RecordId::new();
    sqlx::query(
        "INSERT INTO entries (id, employee_id, note, rating, owner_username, org_code, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id.as_str())
    .bind(entry.employee_id.as_str())
    .bind(entry.note)
    .bind(entry.rating.value())
    .bind(entry.author)
    .bind(tenant.org_code())
    .bind(super::now())
    .execute(&mut *conn)
    .await?;

    for tag_id in entry.tag_ids {
        sqlx::query("INSERT OR IGNORE INTO entry_tags (entry_id, tag_id) VALUES (?, ?)")
            .bind(id.as_str())
            .bind(tag_id)
            .execute(&mut *conn)
            .await?;
    }

    Ok(id)
}
