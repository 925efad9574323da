use sqlx::{FromRow, SqliteConnection, SqliteExecutor};

use crate::app::domain::{HashedPassword, OrgCode, UserId, Username};

/// Database row for users table.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: String,
    pub username: String,
    pub password_hash: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub organization_code: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Data structure for inserting a new user.
pub struct NewUser {
    pub id: UserId,
    pub username: Username,
    pub password_hash: Option<HashedPassword>,
    pub organization_code: Option<OrgCode>,
}

const USER_COLUMNS: &str =
    "id, username, password_hash, first_name, last_name, organization_code, created_at, updated_at";

/// Find a user by ID. Session tokens carry IDs as opaque strings, so
/// anything that is not a stored ID simply finds nobody.
pub async fn find_by_id<'e, E>(executor: E, user_id: &str) -> Result<Option<User>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
        .bind(user_id)
        .fetch_optional(executor)
        .await
}

/// Find a user by username (exact match).
pub async fn find_by_username<'e, E>(
    executor: E,
    username: &str,
) -> Result<Option<User>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?"))
        .bind(username)
        .fetch_optional(executor)
        .await
}

/// Insert a new user into the database.
pub async fn insert<'e, E>(executor: E, user: &NewUser) -> Result<(), sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let now = super::now();
    sqlx::query(
        "INSERT INTO users (id, username, password_hash, organization_code, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(user.id.as_str())
    .bind(user.username.as_str())
    .bind(user.password_hash.as_ref().map(HashedPassword::as_str))
    .bind(user.organization_code.as_ref().map(OrgCode::as_str))
    .bind(now)
    .bind(now)
    .execute(executor)
    .await?;
    Ok(())
}

/// Replace (or clear) a user's password hash.
pub async fn update_password<'e, E>(
    executor: E,
    user_id: &UserId,
    password_hash: Option<&HashedPassword>,
) -> Result<(), sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query("UPDATE users SET password_hash = ?, updated_at = ? WHERE id = ?")
        .bind(password_hash.map(HashedPassword::as_str))
        .bind(super::now())
        .bind(user_id.as_str())
        .execute(executor)
        .await?;
    Ok(())
}

/// Profile fields editable by the user.
pub struct ProfileUpdate<'a> {
    pub username: &'a Username,
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
}

/// Update profile fields. When the username changes, every record that names
/// the old username (ownership, authorship, organization admin) follows it.
/// Run inside a transaction.
pub async fn update_profile(
    conn: &mut SqliteConnection,
    user: &User,
    update: &ProfileUpdate<'_>,
) -> Result<(), sqlx::Error> {
    let new_username = update.username.as_str();

    sqlx::query(
        "UPDATE users SET username = ?, first_name = ?, last_name = ?, updated_at = ? WHERE id = ?",
    )
    .bind(new_username)
    .bind(update.first_name)
    .bind(update.last_name)
    .bind(super::now())
    .bind(&user.id)
    .execute(&mut *conn)
    .await?;

    if new_username == user.username {
        return Ok(());
    }

    for table in ["positions", "employees", "tags", "entries"] {
        sqlx::query(&format!(
            "UPDATE {table} SET owner_username = ? WHERE owner_username = ?"
        ))
        .bind(new_username)
        .bind(&user.username)
        .execute(&mut *conn)
        .await?;
    }

    sqlx::query("UPDATE organizations SET admin = ? WHERE admin = ?")
        .bind(new_username)
        .bind(&user.username)
        .execute(&mut *conn)
        .await?;

    Ok(())
}
