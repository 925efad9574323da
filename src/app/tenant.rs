//! Tenant isolation.
//!
//! **Rule**: organization data is filtered by `org_code`; personal data by
//! `owner_username` *and* `org_code IS NULL`. The two regimes never mix.

/// The data partition a request operates in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tenant {
    /// A solo user's own records.
    Personal { username: String },
    /// Records shared by everyone in an organization.
    Organization { code: String },
}

impl Tenant {
    pub fn new(username: &str, org_code: Option<&str>) -> Self {
        match org_code {
            Some(code) => Self::Organization {
                code: code.to_string(),
            },
            None => Self::Personal {
                username: username.to_string(),
            },
        }
    }

    /// Org code stamped on records created in this tenant.
    pub fn org_code(&self) -> Option<&str> {
        match self {
            Self::Organization { code } => Some(code),
            Self::Personal { .. } => None,
        }
    }

    /// SQL predicate restricting `table` to this tenant. Binds exactly one
    /// parameter: [`Tenant::scope_value`].
    pub fn scope_clause(&self, table: &str) -> String {
        match self {
            Self::Organization { .. } => format!("{table}.org_code = ?"),
            Self::Personal { .. } => {
                format!("{table}.owner_username = ? AND {table}.org_code IS NULL")
            }
        }
    }

    pub fn scope_value(&self) -> &str {
        match self {
            Self::Organization { code } => code,
            Self::Personal { username } => username,
        }
    }
}
