/// Identifier for tenant-scoped records (employees, positions, tags, entries).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordId(ulid::Ulid);

impl RecordId {
    pub fn new() -> Self {
        Self(ulid::Ulid::new())
    }

    pub fn as_str(&self) -> String {
        self.0.to_string()
    }

    /// Parse a path segment. Anything that is not a ULID cannot name a record.
    pub fn from_string(s: &str) -> Result<Self, ulid::DecodeError> {
        Ok(Self(ulid::Ulid::from_string(s)?))
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
