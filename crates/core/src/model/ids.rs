use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Validated category name (trimmed, non-empty, no `-`).
///
/// The hyphen is the structural separator in card-list lines, so a category
/// name may never contain one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Category(String);

impl Category {
    /// Create a validated category name.
    ///
    /// # Errors
    ///
    /// Returns `IdError::EmptyCategory` if the name is empty after trimming,
    /// or `IdError::CategoryWithSeparator` if it contains a `-`.
    pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(IdError::EmptyCategory);
        }
        if trimmed.contains('-') {
            return Err(IdError::CategoryWithSeparator(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Stable identifier for one card, derived from its catalog fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CardId(String);

impl CardId {
    /// Create a validated card id.
    ///
    /// # Errors
    ///
    /// Returns `IdError::EmptyCardId` if the id is empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(IdError::EmptyCardId);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CardId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CardId> for String {
    fn from(id: CardId) -> Self {
        id.0
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── FromStr Implementations ───────────────────────────────────────────────────

impl FromStr for Category {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl FromStr for CardId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Error type for invalid category names and card ids.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IdError {
    #[error("category name cannot be empty")]
    EmptyCategory,

    #[error("category name cannot contain '-': {0}")]
    CategoryWithSeparator(String),

    #[error("card id cannot be empty")]
    EmptyCardId,
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_trims_and_displays() {
        let category = Category::new("  colors ").unwrap();
        assert_eq!(category.as_str(), "colors");
        assert_eq!(category.to_string(), "colors");
    }

    #[test]
    fn test_category_rejects_empty() {
        let err = Category::new("   ").unwrap_err();
        assert_eq!(err, IdError::EmptyCategory);
    }

    #[test]
    fn test_category_rejects_separator() {
        let err = Category::new("two-part").unwrap_err();
        assert!(matches!(err, IdError::CategoryWithSeparator(_)));
    }

    #[test]
    fn test_category_from_str() {
        let category: Category = "animals".parse().unwrap();
        assert_eq!(category, Category::new("animals").unwrap());
    }

    #[test]
    fn test_card_id_keeps_hyphens() {
        let id = CardId::new("animals-03-red-breasted-goose").unwrap();
        assert_eq!(id.as_str(), "animals-03-red-breasted-goose");
    }

    #[test]
    fn test_card_id_rejects_empty() {
        let err = CardId::new("").unwrap_err();
        assert_eq!(err, IdError::EmptyCardId);
    }

    #[test]
    fn test_card_id_from_str_roundtrip() {
        let original = CardId::new("colors-01").unwrap();
        let parsed: CardId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }
}
