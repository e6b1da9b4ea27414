//! Ordered, keyed catalog of entities
//!
//! Keeps entries in response order while allowing lookup by identity key.
//! Inserting an existing key replaces the entry in place.

use std::collections::HashMap;

use crate::error::DictionaryError;

/// Outcome of one catalog fetch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchReport {
    /// Records loaded into the catalog
    pub loaded: usize,
    /// Schema errors for records that were skipped
    pub skipped: Vec<DictionaryError>,
}

impl FetchReport {
    /// Check if every record was loaded
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Insertion-ordered map from identity key to entity
#[derive(Debug, Clone)]
pub struct Catalog<T> {
    entries: Vec<(String, T)>,
    index: HashMap<String, usize>,
}

impl<T> Default for Catalog<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T> Catalog<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, returning the replaced value if the key was present
    pub fn insert(&mut self, key: impl Into<String>, value: T) -> Option<T> {
        let key = key.into();
        match self.index.get(&key) {
            Some(&pos) => Some(std::mem::replace(&mut self.entries[pos].1, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.index.get(key).map(|&pos| &self.entries[pos].1)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut T> {
        self.index.get(key).map(|&pos| &mut self.entries[pos].1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Values in insertion order
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entries.iter_mut().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut T)> {
        self.entries.iter_mut().map(|(k, v)| (k.as_str(), v))
    }
}

impl<T: PartialEq> PartialEq for Catalog<T> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}
