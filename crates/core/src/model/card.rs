use thiserror::Error;

use crate::model::ids::{CardId, Category, IdError};

//
// ─── CARD RECORD ───────────────────────────────────────────────────────────────
//

/// One card definition from the card list.
///
/// A card-list line has the form `category-subNumber` or
/// `category-subNumber-alias`. Only the first two hyphens are structural;
/// everything after the second hyphen is the alias verbatim, so aliases may
/// themselves contain hyphens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRecord {
    category: Category,
    sub_number: String,
    alias: Option<String>,
    id: CardId,
}

impl CardRecord {
    /// Parse a single card-list line.
    ///
    /// The line is trimmed first; fields are trimmed individually. An alias
    /// that is empty after trimming behaves as if it were absent.
    ///
    /// # Errors
    ///
    /// Returns `CardParseError::EmptyLine` for blank input,
    /// `CardParseError::MissingSubNumber` when the second field is absent or
    /// empty, and `CardParseError::Id` when the category field is invalid.
    pub fn parse(line: &str) -> Result<Self, CardParseError> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Err(CardParseError::EmptyLine);
        }

        let mut parts = trimmed.splitn(3, '-');
        let category = Category::new(parts.next().unwrap_or_default())?;
        let sub_number = parts.next().map(str::trim).unwrap_or_default();
        if sub_number.is_empty() {
            return Err(CardParseError::MissingSubNumber(trimmed.to_string()));
        }
        let alias = parts
            .next()
            .map(str::trim)
            .filter(|alias| !alias.is_empty())
            .map(str::to_string);

        let id = match &alias {
            Some(alias) => CardId::new(format!("{category}-{sub_number}-{alias}"))?,
            None => CardId::new(format!("{category}-{sub_number}"))?,
        };

        Ok(Self {
            category,
            sub_number: sub_number.to_string(),
            alias,
            id,
        })
    }

    #[must_use]
    pub fn category(&self) -> &Category {
        &self.category
    }

    #[must_use]
    pub fn sub_number(&self) -> &str {
        &self.sub_number
    }

    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// The derived card id, unique within a catalog.
    #[must_use]
    pub fn id(&self) -> &CardId {
        &self.id
    }
}

//
// ─── CARD PARSE ERRORS ─────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardParseError {
    #[error("card line cannot be empty")]
    EmptyLine,

    #[error("card line is missing a sub number: {0}")]
    MissingSubNumber(String),

    #[error(transparent)]
    Id(#[from] IdError),
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
