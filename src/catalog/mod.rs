//! Creator Catalog
//!
//! The fixed list of personas offered on the creator-selection page.
//! The built-in catalog mirrors the shipped photo set; a config file may
//! replace it with its own `[[creators]]` list.

mod creator;

pub use creator::{Creator, CreatorId};

use std::collections::HashSet;
use thiserror::Error;

/// Errors raised while building a catalog
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CatalogError {
    /// Two records share the same id
    #[error("Duplicate creator id: {0}")]
    DuplicateId(CreatorId),

    /// No records were provided
    #[error("Creator catalog is empty")]
    Empty,
}

/// Ordered, id-unique collection of creators
#[derive(Debug, Clone)]
pub struct Catalog {
    creators: Vec<Creator>,
}

impl Catalog {
    /// Build a catalog from records, rejecting duplicate ids
    pub fn new(creators: Vec<Creator>) -> Result<Self, CatalogError> {
        if creators.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::with_capacity(creators.len());
        for creator in &creators {
            if !seen.insert(creator.id) {
                return Err(CatalogError::DuplicateId(creator.id));
            }
        }

        Ok(Self { creators })
    }

    /// The built-in persona list
    pub fn builtin() -> Self {
        Self {
            creators: builtin_creators(),
        }
    }

    /// Look up a creator by id
    pub fn get(&self, id: CreatorId) -> Option<&Creator> {
        self.creators.iter().find(|c| c.id == id)
    }

    /// Iterate over all creators in display order
    pub fn iter(&self) -> std::slice::Iter<'_, Creator> {
        self.creators.iter()
    }

    pub fn len(&self) -> usize {
        self.creators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creators.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Creator;
    type IntoIter = std::slice::Iter<'a, Creator>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn builtin_creators() -> Vec<Creator> {
    vec![
        Creator::new(1, "Marques Brownlee", "\"MKBHD\"", "photos/Marques_Brownlee.jpg")
            .description("Tech reviewer and YouTuber known for in-depth smartphone and gadget reviews."),
        Creator::new(2, "Austin Evans", "\"Austin Evans\"", "photos/AustinEvans.jpeg")
            .description("Tech YouTuber specializing in PC builds, gaming hardware, and tech reviews."),
        Creator::new(3, "Justine Ezarik", "\"iJustine\"", "photos/justine-ezarik.jpg")
            .description("Tech YouTuber and Apple enthusiast known for unboxing videos and tech reviews."),
        Creator::new(4, "Zack Nelson", "\"JerryRigEverything\"", "photos/Zack Nelson.jpeg")
            .description("Tech YouTuber famous for durability tests and smartphone teardowns."),
        Creator::new(
            5,
            "Lewis George Hilsenteger",
            "\"Unbox Therapy\"",
            "photos/Lewis George Hilsenteger.jpg",
        )
        .description("Tech YouTuber known for unboxing videos and tech product reviews."),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_ids_unique() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 5);

        let rebuilt = Catalog::new(catalog.iter().cloned().collect());
        assert!(rebuilt.is_ok());
    }

    #[test]
    fn test_get() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.get(3).map(|c| c.name.as_str()), Some("Justine Ezarik"));
        assert!(catalog.get(42).is_none());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = Catalog::new(vec![
            Creator::new(7, "A", "a", "a.jpg"),
            Creator::new(7, "B", "b", "b.jpg"),
        ]);
        assert_eq!(result.unwrap_err(), CatalogError::DuplicateId(7));
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(Catalog::new(Vec::new()).unwrap_err(), CatalogError::Empty);
    }
}
