//! The content store: normalized, shuffled, read-only.

use std::collections::HashSet;

use thiserror::Error;
use tracing::debug;

use super::dataset;
use super::item::{Item, ItemType};
use super::shuffle::{shuffle, Lcg};

/// Errors raised while building the content collection
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Duplicate item id: {0}")]
    DuplicateId(String),

    #[error("Invalid datetime for item {id}: {value}")]
    InvalidDatetime {
        id: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Immutable item collection in presentation order
#[derive(Debug, Clone)]
pub struct ContentStore {
    items: Vec<Item>,
    seed: u64,
}

impl ContentStore {
    /// Build a store from authored items
    ///
    /// Ids must be unique. Keywords are normalized, then the collection is
    /// shuffled with a generator seeded by `seed`.
    pub fn from_items(items: Vec<Item>, seed: u64) -> Result<Self, ContentError> {
        let mut seen = HashSet::new();
        for item in &items {
            if !seen.insert(item.id.as_str()) {
                return Err(ContentError::DuplicateId(item.id.clone()));
            }
        }

        let mut items: Vec<Item> = items.into_iter().map(Item::normalized).collect();
        shuffle(&mut items, &mut Lcg::new(seed));

        debug!("Content store built: {} items, seed {}", items.len(), seed);

        Ok(Self { items, seed })
    }

    /// Build the store from the compiled-in dataset
    pub fn builtin(seed: u64) -> Result<Self, ContentError> {
        Self::from_items(dataset::authored()?, seed)
    }

    /// All items in presentation order
    pub fn get_all_items(&self) -> &[Item] {
        &self.items
    }

    /// Seed the presentation order was computed with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Get an item by ID
    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Search by name and keywords (case-insensitive substring match)
    pub fn search(&self, query: &str) -> Vec<&Item> {
        self.items.iter().filter(|item| item.matches(query)).collect()
    }

    /// Filter items by type
    pub fn filter_by_type(&self, item_type: ItemType) -> Vec<&Item> {
        self.items
            .iter()
            .filter(|item| item.item_type() == item_type)
            .collect()
    }

    /// Items ordered by descending priority, ties in presentation order
    pub fn by_priority(&self) -> Vec<&Item> {
        let mut items: Vec<_> = self.items.iter().collect();
        items.sort_by(|a, b| b.priority.cmp(&a.priority));
        items
    }

    /// Get the number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
