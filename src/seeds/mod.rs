//! Versioned data seeds.
//!
//! A seed runs at most once per database: applied versions are kept in the
//! `_perftrack_seeds` ledger. A seed that opts out (for example because its
//! env var is unset) is not recorded and gets another chance next start.

mod demo_workspace;
mod ledger;

use async_trait::async_trait;
use sqlx::SqlitePool;

pub use ledger::SeedLedger;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Applied,
    Skipped,
}

#[async_trait]
pub trait Seed: Send + Sync {
    /// `YYYYMMDDHHMMSS`; seeds run in ascending order.
    fn version(&self) -> i64;

    fn name(&self) -> &'static str;

    async fn run(&self, pool: &SqlitePool) -> Result<SeedOutcome, sqlx::Error>;
}

pub fn all_seeds() -> Vec<Box<dyn Seed>> {
    let mut seeds: Vec<Box<dyn Seed>> = vec![Box::new(demo_workspace::DemoWorkspace)];
    seeds.sort_by_key(|s| s.version());
    seeds
}

/// Run every seed the ledger has not seen. Returns what each pending seed did.
pub async fn run_seeds(
    pool: &SqlitePool,
) -> Result<Vec<(&'static str, SeedOutcome)>, sqlx::Error> {
    let ledger = SeedLedger::open(pool).await?;
    let applied = ledger.applied().await?;

    let mut report = Vec::new();
    for seed in all_seeds().into_iter().filter(|s| !applied.contains(&s.version())) {
        let outcome = seed.run(pool).await?;
        if outcome == SeedOutcome::Applied {
            ledger.record(seed.version(), seed.name()).await?;
        }
        tracing::debug!(seed = seed.name(), ?outcome, "seed finished");
        report.push((seed.name(), outcome));
    }
    Ok(report)
}
