pub mod employees;
pub mod entries;
pub mod organizations;
pub mod positions;
pub mod tags;
pub mod users;

pub use users::{find_by_id, find_by_username, NewUser, User};

/// Current unix timestamp in seconds, as stored in `created_at`/`updated_at`.
pub(crate) fn now() -> i64 {
    time::OffsetDateTime::now_utc().unix_timestamp()
}

/// True when a write hit a UNIQUE constraint.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
