use sqlx::{FromRow, SqliteExecutor};

use crate::app::domain::{OrgCode, Username};

/// Database row for organizations table.
#[derive(Debug, Clone, FromRow)]
pub struct Organization {
    pub code: String,
    pub name: String,
    /// Username of the organization's administrator.
    pub admin: String,
    pub created_at: i64,
}

/// Data structure for inserting a new organization.
pub struct NewOrganization {
    pub code: OrgCode,
    pub name: String,
    pub admin: Username,
}

/// Find an organization by code.
pub async fn find_by_code<'e, E>(
    executor: E,
    code: &str,
) -> Result<Option<Organization>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, Organization>(
        "SELECT code, name, admin, created_at FROM organizations WHERE code = ?",
    )
    .bind(code)
    .fetch_optional(executor)
    .await
}

/// Insert a new organization.
pub async fn insert<'e, E>(executor: E, organization: &NewOrganization) -> Result<(), sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query("INSERT INTO organizations (code, name, admin, created_at) VALUES (?, ?, ?, ?)")
        .bind(organization.code.as_str())
        .bind(&organization.name)
        .bind(organization.admin.as_str())
        .bind(super::now())
        .execute(executor)
        .await?;
    Ok(())
}
