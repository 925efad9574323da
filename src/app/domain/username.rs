use validator::ValidationError;

/// Username domain type. Trimmed, 1–64 characters, no whitespace.
///
/// Case is preserved: organization admin checks compare usernames exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    pub fn new(username: String) -> Result<Self, ValidationError> {
        let trimmed = username.trim();

        if trimmed.is_empty() {
            let mut error = ValidationError::new("username_required");
            error.message = Some("Username is required.".into());
            return Err(error);
        }

        if trimmed.chars().count() > 64 {
            let mut error = ValidationError::new("username_too_long");
            error.message = Some("Username must be at most 64 characters.".into());
            return Err(error);
        }

        if trimmed.chars().any(char::is_whitespace) {
            let mut error = ValidationError::new("username_whitespace");
            error.message = Some("Username must not contain spaces.".into());
            return Err(error);
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
