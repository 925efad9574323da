use sqlx::SqlitePool;

/// Applied-seed bookkeeping in `_perftrack_seeds`.
pub struct SeedLedger<'p> {
    pool: &'p SqlitePool,
}

impl<'p> SeedLedger<'p> {
    /// Creates the ledger table on first use.
    pub async fn open(pool: &'p SqlitePool) -> Result<Self, sqlx::Error> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS _perftrack_seeds (
                version INTEGER PRIMARY KEY NOT NULL,
                name TEXT NOT NULL,
                applied_at INTEGER NOT NULL DEFAULT (unixepoch())
            )",
        )
        .execute(pool)
        .await?;
        Ok(Self { pool })
    }

    pub async fn applied(&self) -> Result<Vec<i64>, sqlx::Error> {
        sqlx::query_scalar("SELECT version FROM _perftrack_seeds ORDER BY version")
            .fetch_all(self.pool)
            .await
    }

    pub async fn record(&self, version: i64, name: &str) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT OR REPLACE INTO _perftrack_seeds (version, name) VALUES (?, ?)")
            .bind(version)
            .bind(name)
            .execute(self.pool)
            .await?;
        Ok(())
    }

    /// Forget one version, or every version for `None`, so it runs again.
    pub async fn forget(&self, version: Option<i64>) -> Result<u64, sqlx::Error> {
        let result = match version {
            Some(version) => {
                sqlx::query("DELETE FROM _perftrack_seeds WHERE version = ?")
                    .bind(version)
                    .execute(self.pool)
                    .await?
            }
            None => sqlx::query("DELETE FROM _perftrack_seeds").execute(self.pool).await?,
        };
        Ok(result.rows_affected())
    }
}
