//! Session & tenancy resolution.
//!
//! Runs once per request: decodes the session cookie, loads the acting user
//! and their tenant, decides admin status and where the request may go. Every
//! failure resolves to "not signed in"; nothing here produces a 5xx.

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::{token::SessionToken, HOME_PATH, LOGIN_PATH};
use crate::app::{
    db::{self, organizations::Organization, User},
    tenant::Tenant,
};

/// Identity and tenancy attached to a request.
#[derive(Debug, Clone, Default)]
pub struct RequestScope {
    pub user: Option<User>,
    pub org_code: Option<String>,
    pub is_admin: bool,
}

impl RequestScope {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn tenant(&self) -> Option<Tenant> {
        self.user
            .as_ref()
            .map(|user| Tenant::new(&user.username, self.org_code.as_deref()))
    }
}

/// What to do with the session cookie after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CookieDirective {
    Keep,
    Clear,
    /// Replace the cookie with this value (legacy tokens are upgraded).
    Reissue(String),
}

#[derive(Debug, Clone)]
pub struct Resolution {
    pub scope: RequestScope,
    pub cookie: CookieDirective,
}

impl Resolution {
    fn anonymous(cookie: CookieDirective) -> Self {
        Self {
            scope: RequestScope::default(),
            cookie,
        }
    }
}

/// Where the request goes once its scope is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routing {
    Proceed,
    RedirectToLogin,
    RedirectToHome,
}

/// Lookups the resolver needs. Implemented by the database pool; tests
/// substitute in-memory directories.
#[async_trait]
pub trait ScopeDirectory: Send + Sync {
    async fn user(&self, id: &str) -> Result<Option<User>, sqlx::Error>;
    async fn organization(&self, code: &str) -> Result<Option<Organization>, sqlx::Error>;
}

#[async_trait]
impl ScopeDirectory for SqlitePool {
    async fn user(&self, id: &str) -> Result<Option<User>, sqlx::Error> {
        db::users::find_by_id(self, id).await
    }

    async fn organization(&self, code: &str) -> Result<Option<Organization>, sqlx::Error> {
        db::organizations::find_by_code(self, code).await
    }
}

/// Where the session says the organization comes from.
enum OrgClaim {
    /// Structured token: the org named in the token (or none).
    Named(Option<String>),
    /// Legacy token: whatever organization the account is linked to.
    FromAccount,
}

/// Resolve the scope for a raw `sessionId` cookie value.
pub async fn resolve<D>(directory: &D, raw: Option<&str>) -> Resolution
where
    D: ScopeDirectory + ?Sized,
{
    let Some(raw) = raw else {
        return Resolution::anonymous(CookieDirective::Keep);
    };

    let (user_id, claim) = match SessionToken::parse(raw) {
        SessionToken::Structured { user_id, org_code } => (user_id, OrgClaim::Named(org_code)),
        SessionToken::Legacy(user_id) => (user_id, OrgClaim::FromAccount),
        SessionToken::Invalid => {
            tracing::debug!("discarding malformed session cookie");
            return Resolution::anonymous(CookieDirective::Clear);
        }
    };

    match lookup(directory, &user_id, &claim).await {
        Ok(Some(scope)) => {
            let cookie = match claim {
                OrgClaim::Named(_) => CookieDirective::Keep,
                OrgClaim::FromAccount => {
                    CookieDirective::Reissue(SessionToken::encode(&user_id, scope.org_code.as_deref()))
                }
            };
            Resolution { scope, cookie }
        }
        Ok(None) => {
            tracing::debug!(%user_id, "session references an unknown user or organization");
            Resolution::anonymous(CookieDirective::Clear)
        }
        Err(err) => {
            tracing::warn!(%err, %user_id, "session lookup failed; treating request as signed out");
            Resolution::anonymous(CookieDirective::Keep)
        }
    }
}

/// `Ok(None)` when the session names a user or organization that cannot be
/// resolved, including an organization the user does not belong to.
async fn lookup<D>(
    directory: &D,
    user_id: &str,
    claim: &OrgClaim,
) -> Result<Option<RequestScope>, sqlx::Error>
where
    D: ScopeDirectory + ?Sized,
{
    let Some(user) = directory.user(user_id).await? else {
        return Ok(None);
    };

    let org_code = match claim {
        OrgClaim::FromAccount => user.organization_code.clone(),
        OrgClaim::Named(None) => None,
        OrgClaim::Named(Some(code)) if user.organization_code.as_deref() == Some(code.as_str()) => {
            Some(code.clone())
        }
        OrgClaim::Named(Some(_)) => return Ok(None),
    };

    let is_admin = match org_code.as_deref() {
        None => true,
        Some(code) => match directory.organization(code).await? {
            Some(organization) => organization.admin == user.username,
            None => return Ok(None),
        },
    };

    Ok(Some(RequestScope {
        user: Some(user),
        org_code,
        is_admin,
    }))
}

/// Signed-in users are kept off the login page; everyone else is kept on it.
pub fn route(scope: &RequestScope, path: &str) -> Routing {
    let on_login = path == LOGIN_PATH;
    match (scope.is_authenticated(), on_login) {
        (true, true) => Routing::RedirectToHome,
        (false, false) => Routing::RedirectToLogin,
        _ => Routing::Proceed,
    }
}

/// Path the redirect in `routing` points to.
pub fn redirect_target(routing: Routing) -> Option<&'static str> {
    match routing {
        Routing::Proceed => None,
        Routing::RedirectToLogin => Some(LOGIN_PATH),
        Routing::RedirectToHome => Some(HOME_PATH),
    }
}
