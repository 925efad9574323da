use sqlx::SqlitePool;

use crate::app::{
    db::{self, organizations::NewOrganization, NewUser},
    domain::{credentials_match, HashedPassword, OrgCode, Password, UserId, Username},
    error::AppError,
    session::SessionToken,
};

/// Sign in, creating the account on first use. Returns the session token.
///
/// Existing accounts keep their organization; `organization` only applies when
/// the account is created. An unknown organization code creates that
/// organization with the new user as its admin.
pub async fn login(
    pool: &SqlitePool,
    username: &Username,
    password: String,
    organization: Option<&OrgCode>,
) -> Result<String, AppError> {
    if let Some(user) = db::find_by_username(pool, username.as_str()).await? {
        let given = Password::for_verification(password);
        if !credentials_match(user.password_hash.as_deref(), &given) {
            return Err(AppError::Auth("Invalid password.".to_string()));
        }

        return Ok(SessionToken::encode(&user.id, user.organization_code.as_deref()));
    }

    let password_hash = if password.is_empty() {
        None
    } else {
        let password = Password::new(password).map_err(|e| {
            AppError::Validation(
                e.message
                    .map(|m| m.into_owned())
                    .unwrap_or_else(|| "Invalid password.".to_string()),
            )
        })?;
        Some(HashedPassword::from_password(&password).map_err(|_| AppError::Internal)?)
    };

    let new_user = NewUser {
        id: UserId::new(),
        username: username.clone(),
        password_hash,
        organization_code: organization.cloned(),
    };

    let mut tx = pool.begin().await?;

    if let Some(code) = organization {
        if db::organizations::find_by_code(&mut *tx, code.as_str()).await?.is_none() {
            let new_organization = NewOrganization {
                code: code.clone(),
                name: code.to_string(),
                admin: username.clone(),
            };
            db::organizations::insert(&mut *tx, &new_organization).await?;
            tracing::info!(org_code = %code, admin = %username.as_str(), "organization created");
        }
    }

    db::users::insert(&mut *tx, &new_user).await?;
    tx.commit().await?;

    tracing::info!(username = %username.as_str(), "account created on first login");
    Ok(SessionToken::encode(
        &new_user.id.as_str(),
        organization.map(OrgCode::as_str),
    ))
}
