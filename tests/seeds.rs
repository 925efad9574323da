mod common;

use common::*;
use perftrack::app::{db, tenant::Tenant};
use perftrack::seeds;

#[tokio::test]
async fn demo_workspace_runs_once() {
    let pool = test_pool().await;
    std::env::set_var("SEED_DEMO_USERNAME", "demo");

    seeds::run_seeds(&pool).await.unwrap();
    seeds::run_seeds(&pool).await.unwrap();

    let tenant = Tenant::new("demo", None);
    let titles = db::positions::titles_for_tenant(&pool, &tenant).await.unwrap();
    assert_eq!(titles.len(), 2);
    let employees = db::employees::list_for_tenant(&pool, &tenant, false).await.unwrap();
    let names: Vec<String> = employees.iter().map(|e| e.full_name()).collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"John Doe".to_string()));
    assert!(names.contains(&"Jane Smith".to_string()));

    let user = db::find_by_username(&pool, "demo").await.unwrap().unwrap();
    assert!(user.password_hash.is_none());
}

#[tokio::test]
async fn ledger_forgets_versions_so_they_run_again() {
    let pool = test_pool().await;
    let ledger = seeds::SeedLedger::open(&pool).await.unwrap();
    let versions: Vec<i64> = seeds::all_seeds().iter().map(|s| s.version()).collect();

    for seed in seeds::all_seeds() {
        ledger.record(seed.version(), seed.name()).await.unwrap();
    }
    assert_eq!(ledger.applied().await.unwrap(), versions);
    assert!(seeds::run_seeds(&pool).await.unwrap().is_empty());

    assert_eq!(ledger.forget(Some(versions[0])).await.unwrap(), 1);
    assert!(!ledger.applied().await.unwrap().contains(&versions[0]));
    let report = seeds::run_seeds(&pool).await.unwrap();
    assert_eq!(report.len(), 1);

    ledger.record(versions[0], "again").await.unwrap();
    assert_eq!(ledger.forget(None).await.unwrap(), versions.len() as u64);
    assert!(ledger.applied().await.unwrap().is_empty());
}
