use argon2::{
    password_hash::SaltString,
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use rand_core::OsRng;
use validator::ValidationError;

/// Password domain type. Once constructed with [`Password::new`], guaranteed to
/// meet strength requirements.
#[derive(Debug, Clone)]
pub struct Password(String);

impl Password {
    /// Wrap plaintext for verification only. No strength check: accounts may
    /// predate the current rules.
    pub fn for_verification(plaintext: String) -> Self {
        Self(plaintext)
    }

    /// Create a new Password from a string. Validates strength requirements.
    pub fn new(password: String) -> Result<Self, ValidationError> {
        if password.len() < 8 {
            let mut error = ValidationError::new("password_too_short");
            error.message = Some("Password must be at least 8 characters".into());
            return Err(error);
        }

        if password.len() > 128 {
            let mut error = ValidationError::new("password_too_long");
            error.message = Some("Password must be at most 128 characters".into());
            return Err(error);
        }

        let has_uppercase = password.chars().any(|c| c.is_uppercase());
        let has_lowercase = password.chars().any(|c| c.is_lowercase());
        let has_digit = password.chars().any(|c| c.is_numeric());

        if !(has_uppercase && has_lowercase && has_digit) {
            let mut error = ValidationError::new("weak_password");
            error.message = Some("Password must contain uppercase, lowercase, and digit".into());
            return Err(error);
        }

        Ok(Self(password))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

/// Argon2id hash as stored in `users.password_hash`.
#[derive(Debug, Clone)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Hash a password using Argon2id with random salt.
    pub fn from_password(password: &Password) -> Result<Self, argon2::password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
        Ok(Self(hash.to_string()))
    }

    pub fn verify(&self, password: &Password) -> Result<(), argon2::password_hash::Error> {
        let parsed_hash = PasswordHash::new(&self.0)?;
        Argon2::default().verify_password(password.as_bytes(), &parsed_hash)
    }

    /// Create from existing hash string (e.g., from database).
    pub fn from_string(s: String) -> Self {
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Check a submitted password against an account's stored credential.
///
/// Accounts may have no password at all; those only accept an empty one.
pub fn credentials_match(stored: Option<&str>, given: &Password) -> bool {
    match stored {
        None => given.is_empty(),
        Some(_) if given.is_empty() => false,
        Some(hash) => HashedPassword::from_string(hash.to_string())
            .verify(given)
            .is_ok(),
    }
}

/// What a password change did to the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordChange {
    Created,
    Changed,
    Removed,
}

impl PasswordChange {
    /// Classify a change from whether a password existed before and after.
    /// `None` when the account had no password and still has none.
    pub fn classify(had_password: bool, has_password: bool) -> Option<Self> {
        match (had_password, has_password) {
            (false, true) => Some(Self::Created),
            (true, true) => Some(Self::Changed),
            (true, false) => Some(Self::Removed),
            (false, false) => None,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Created => "Password created successfully.",
            Self::Changed => "Password changed successfully.",
            Self::Removed => "Password removed successfully.",
        }
    }
}
