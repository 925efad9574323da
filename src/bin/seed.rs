use perftrack::app;
use perftrack::seeds;
use dotenvy::dotenv;
use sqlx::sqlite::SqlitePoolOptions;
use std::env;
use std::time::Duration;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let config = app::config::Config::from_env()
        .expect("Failed to load config (check DATABASE_URL and other env vars)");

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(3))
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    sqlx::query("PRAGMA busy_timeout=5000")
        .execute(&pool)
        .await
        .expect("Failed to set busy timeout");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    let args: Vec<String> = env::args().collect();
    let force_all = args.iter().any(|a| a == "--force-all");
    let force_version = args
        .iter()
        .position(|a| a == "--force")
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse::<i64>().ok());

    if force_all || force_version.is_some() {
        let version = if force_all { None } else { force_version };
        let ledger = seeds::SeedLedger::open(&pool)
            .await
            .expect("Failed to open seed ledger");
        let forgotten = ledger
            .forget(version)
            .await
            .expect("Failed to reset seed tracking");
        eprintln!("Forgot {} applied seed(s)", forgotten);
    }

    match seeds::run_seeds(&pool).await {
        Ok(report) if report.is_empty() => eprintln!("Nothing to seed"),
        Ok(report) => {
            for (name, outcome) in report {
                eprintln!("Seed {}: {:?}", name, outcome);
            }
        }
        Err(e) => {
            eprintln!("Seeding failed: {}", e);
            std::process::exit(1);
        }
    }
}
