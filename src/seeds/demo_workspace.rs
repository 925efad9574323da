use std::env;

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::app::{
    db::{self, employees::EmployeeFields, positions::PositionFields, NewUser},
    domain::{UserId, Username},
    tenant::Tenant,
};
use crate::seeds::{Seed, SeedOutcome};

const POSITIONS: &[(&str, &str, &str)] = &[
    ("Developer", "Builds and maintains software.", "#3b82f6"),
    ("Designer", "Owns visual and interaction design.", "#ec4899"),
];

const EMPLOYEES: &[(&str, &str, &str)] = &[("John", "Doe", "Developer"), ("Jane", "Smith", "Designer")];

/// Sample positions and employees for `SEED_DEMO_USERNAME`.
pub struct DemoWorkspace;

#[async_trait]
impl Seed for DemoWorkspace {
    fn version(&self) -> i64 {
        20250301120000
    }

    fn name(&self) -> &'static str {
        "demo_workspace"
    }

    async fn run(&self, pool: &SqlitePool) -> Result<SeedOutcome, sqlx::Error> {
        let username = match env::var("SEED_DEMO_USERNAME").map(Username::new) {
            Ok(Ok(username)) => username,
            _ => return Ok(SeedOutcome::Skipped),
        };

        let mut tx = pool.begin().await?;

        let org_code = match db::find_by_username(&mut *tx, username.as_str()).await? {
            Some(user) => user.organization_code,
            None => {
                let user = NewUser {
                    id: UserId::new(),
                    username: username.clone(),
                    password_hash: None,
                    organization_code: None,
                };
                db::users::insert(&mut *tx, &user).await?;
                None
            }
        };
        let tenant = Tenant::new(username.as_str(), org_code.as_deref());

        let existing = db::positions::titles_for_tenant(&mut *tx, &tenant).await?;
        for (title, description, color) in POSITIONS {
            if existing.iter().any(|t| t.eq_ignore_ascii_case(title)) {
                continue;
            }
            let fields = PositionFields {
                title: title.to_string(),
                description: Some(description.to_string()),
                color: Some(color.to_string()),
            };
            db::positions::insert(&mut *tx, &tenant, username.as_str(), &fields).await?;
        }

        for (first_name, last_name, position) in EMPLOYEES {
            let fields = EmployeeFields {
                first_name: first_name.to_string(),
                last_name: Some(last_name.to_string()),
                nickname: None,
                position: position.to_string(),
            };
            db::employees::insert(&mut *tx, &tenant, username.as_str(), &fields).await?;
        }

        tx.commit().await?;
        tracing::info!(username = %username.as_str(), "demo workspace seeded");
        Ok(SeedOutcome::Applied)
    }
}
