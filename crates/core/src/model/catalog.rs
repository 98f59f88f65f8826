use std::collections::HashSet;
use thiserror::Error;

use crate::model::card::{CardParseError, CardRecord};
use crate::model::ids::{CardId, Category};

/// Parsed card list, grouped by category.
///
/// Groups keep the order in which each category first appears in the card
/// list; card ids within a group keep catalog order. That order is what the
/// per-category default sequences are generated from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    cards: Vec<CardRecord>,
    groups: Vec<(Category, Vec<CardId>)>,
}

impl Catalog {
    /// Parse the full card-list text.
    ///
    /// Lines are trimmed; blank lines are skipped.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Line` when a line fails to parse and
    /// `CatalogError::DuplicateCardId` when two lines derive the same id.
    pub fn parse(text: &str) -> Result<Self, CatalogError> {
        let mut cards = Vec::new();
        let mut groups: Vec<(Category, Vec<CardId>)> = Vec::new();
        let mut seen: HashSet<CardId> = HashSet::new();

        for (index, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let card = CardRecord::parse(line).map_err(|source| CatalogError::Line {
                line: index + 1,
                source,
            })?;

            if !seen.insert(card.id().clone()) {
                return Err(CatalogError::DuplicateCardId(card.id().clone()));
            }

            match groups.iter_mut().find(|(category, _)| category == card.category()) {
                Some((_, ids)) => ids.push(card.id().clone()),
                None => groups.push((card.category().clone(), vec![card.id().clone()])),
            }
            cards.push(card);
        }

        Ok(Self { cards, groups })
    }

    #[must_use]
    pub fn cards(&self) -> &[CardRecord] {
        &self.cards
    }

    /// Category groups in first-seen order.
    #[must_use]
    pub fn groups(&self) -> &[(Category, Vec<CardId>)] {
        &self.groups
    }

    /// All categories, sorted lexicographically.
    ///
    /// This is the order the persisted category index uses.
    #[must_use]
    pub fn sorted_categories(&self) -> Vec<Category> {
        let mut categories: Vec<Category> = self
            .groups
            .iter()
            .map(|(category, _)| category.clone())
            .collect();
        categories.sort();
        categories
    }

    /// Card ids for one category, in catalog order.
    #[must_use]
    pub fn card_ids(&self, category: &Category) -> Option<&[CardId]> {
        self.groups
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, ids)| ids.as_slice())
    }

    /// Total number of cards in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("card list line {line}: {source}")]
    Line { line: usize, source: CardParseError },

    #[error("duplicate card id: {0}")]
    DuplicateCardId(CardId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_keep_first_seen_order() {
        let catalog = Catalog::parse("birds-01\nanimals-01\nbirds-02\n").unwrap();

        let groups = catalog.groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0.as_str(), "birds");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0.as_str(), "animals");
    }

    #[test]
    fn sorted_categories_are_lexicographic() {
        let catalog = Catalog::parse("birds-01\nanimals-01\ncolors-01\n").unwrap();

        let sorted = catalog.sorted_categories();
        let names: Vec<&str> = sorted.iter().map(Category::as_str).collect();
        assert_eq!(names, vec!["animals", "birds", "colors"]);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let catalog = Catalog::parse("colors-01\n\n   \ncolors-02\n").unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn duplicate_id_fails() {
        let err = Catalog::parse("colors-01\ncolors-01\n").unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateCardId(_)));
    }

    #[test]
    fn line_error_carries_line_number() {
        let err = Catalog::parse("colors-01\nbroken\n").unwrap_err();
        match err {
            CatalogError::Line { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn card_ids_follow_catalog_order() {
        let catalog = Catalog::parse("colors-02\ncolors-01\n").unwrap();
        let category = Category::new("colors").unwrap();

        let ids: Vec<&str> = catalog
            .card_ids(&category)
            .unwrap()
            .iter()
            .map(CardId::as_str)
            .collect();
        assert_eq!(ids, vec!["colors-02", "colors-01"]);
    }
}
