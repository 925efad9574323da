use validator::ValidationError;

/// Organization code: the tenancy key for organization-scoped data.
///
/// Normalised to lowercase; letters, digits, `-` and `_` only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrgCode(String);

impl OrgCode {
    pub fn new(code: String) -> Result<Self, ValidationError> {
        let normalized = code.trim().to_lowercase();

        if normalized.is_empty() || normalized.len() > 64 {
            let mut error = ValidationError::new("invalid_org_code_length");
            error.message = Some("Organization code must be 1–64 characters.".into());
            return Err(error);
        }

        let allowed = |c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_';
        if !normalized.chars().all(allowed) {
            let mut error = ValidationError::new("invalid_org_code");
            error.message =
                Some("Organization code may only contain letters, digits, '-' and '_'.".into());
            return Err(error);
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OrgCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalises_case_and_whitespace() {
        let code = OrgCode::new("  ACME ".to_string()).unwrap();
        assert_eq!(code.as_str(), "acme");
    }

    #[test]
    fn accepts_dashes_and_underscores() {
        assert!(OrgCode::new("acme-corp_eu".to_string()).is_ok());
    }

    #[test]
    fn rejects_punctuation() {
        assert!(OrgCode::new("acme corp".to_string()).is_err());
        assert!(OrgCode::new("acme!".to_string()).is_err());
    }

    #[test]
    fn rejects_empty() {
        assert!(OrgCode::new("".to_string()).is_err());
    }
}
