use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identity of a persisted study record.
///
/// Opaque to the domain: the local store mints a UUID on insert, the
/// document store hands back its row id.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Creates a `RecordId` from an already-assigned identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mints a fresh client-side identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wraps a numeric row id assigned by a database.
    #[must_use]
    pub fn from_row(row_id: i64) -> Self {
        Self(row_id.to_string())
    }

    /// Returns the numeric row id, if this id came from a database row.
    #[must_use]
    pub fn as_row(&self) -> Option<i64> {
        self.0.parse().ok()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error type for parsing ID from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError;

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("record id cannot be empty")
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for RecordId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseIdError);
        }
        Ok(Self::new(trimmed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_distinct() {
        assert_ne!(RecordId::generate(), RecordId::generate());
    }

    #[test]
    fn row_ids_round_trip() {
        let id = RecordId::from_row(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(id.as_row(), Some(42));
    }

    #[test]
    fn uuid_ids_have_no_row() {
        assert_eq!(RecordId::generate().as_row(), None);
    }

    #[test]
    fn empty_id_does_not_parse() {
        assert!("  ".parse::<RecordId>().is_err());
        assert_eq!("abc".parse::<RecordId>().unwrap(), RecordId::new("abc"));
    }
}
