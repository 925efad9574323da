use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    response::Redirect,
};

use super::{resolver::RequestScope, LOGIN_PATH};
use crate::app::{db::User, error::AppError, tenant::Tenant};

/// Scope of a signed-in caller. Rejects with a redirect to the login page
/// when the request carries no resolved user.
#[derive(Debug, Clone)]
pub struct AuthenticatedScope {
    pub user: User,
    pub org_code: Option<String>,
    pub is_admin: bool,
}

impl AuthenticatedScope {
    pub fn tenant(&self) -> Tenant {
        Tenant::new(&self.user.username, self.org_code.as_deref())
    }

    pub fn username(&self) -> &str {
        &self.user.username
    }

    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin {
            Ok(())
        } else {
            Err(AppError::admin_only())
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedScope
where
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let scope = parts
            .extensions
            .get::<RequestScope>()
            .cloned()
            .unwrap_or_default();

        match scope.user {
            Some(user) => Ok(Self {
                user,
                org_code: scope.org_code,
                is_admin: scope.is_admin,
            }),
            None => Err(Redirect::to(LOGIN_PATH)),
        }
    }
}
