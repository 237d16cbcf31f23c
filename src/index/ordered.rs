//! Sorted, immutable index storage
//!
//! An `OrderedIndex` holds (key, payload) entries sorted ascending by key in a
//! single vector. It is bulk-loaded once and never mutated afterwards, so any
//! number of traversals may run against it without coordination.
//!
//! Traversals are positioned by binary search and then walk a borrowed slice
//! of the storage. Nothing is copied.

use std::iter::Rev;
use std::slice;

use super::key::IndexKey;

/// A single (key, payload) pair
#[derive(Debug, Clone, PartialEq)]
pub struct IndexEntry<P> {
    pub key: IndexKey,
    pub payload: P,
}

/// Traversal direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Ascending key order
    #[default]
    Forward,
    /// Descending key order
    Backward,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Backward => "backward",
        }
    }
}

/// Key-sorted entries built once by bulk load
#[derive(Debug, Clone)]
pub struct OrderedIndex<P> {
    name: String,
    entries: Vec<IndexEntry<P>>,
}

impl<P> OrderedIndex<P> {
    /// Build an index from an unordered collection of entries.
    ///
    /// Entries are sorted ascending by key. The sort is stable, so entries
    /// with equal keys keep their input order; callers that need a
    /// deterministic order independent of input should make keys unique.
    pub fn bulk_load<I>(name: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (IndexKey, P)>,
    {
        let mut entries: Vec<IndexEntry<P>> = entries
            .into_iter()
            .map(|(key, payload)| IndexEntry { key, payload })
            .collect();
        entries.sort_by(|a, b| a.key.cmp(&b.key));
        debug_assert!(entries.windows(2).all(|w| w[0].key <= w[1].key));

        Self {
            name: name.into(),
            entries,
        }
    }

    /// Index name, used in explain output and logs
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in storage order (ascending by key)
    pub fn entries(&self) -> &[IndexEntry<P>] {
        &self.entries
    }

    /// Entries with `key >= start`, ascending.
    ///
    /// With no start key every entry is yielded. Each call is an independent
    /// traversal.
    pub fn iter(&self, start: Option<&IndexKey>) -> slice::Iter<'_, IndexEntry<P>> {
        match start {
            None => self.entries.iter(),
            Some(start) => self.entries[self.lower_bound(start)..].iter(),
        }
    }

    /// Entries with `key <= start`, descending.
    ///
    /// With no start key every entry is yielded, last first.
    pub fn rev(&self, start: Option<&IndexKey>) -> Rev<slice::Iter<'_, IndexEntry<P>>> {
        match start {
            None => self.entries.iter().rev(),
            Some(start) => self.entries[..self.upper_bound(start)].iter().rev(),
        }
    }

    /// Traverse in either direction from an optional start key
    pub fn scan(&self, direction: Direction, start: Option<&IndexKey>) -> Traversal<'_, P> {
        match direction {
            Direction::Forward => Traversal::Forward(self.iter(start)),
            Direction::Backward => Traversal::Backward(self.rev(start)),
        }
    }

    /// Point lookup: the payload of the first entry of `iter(key)` if its key
    /// is equal to `key`.
    pub fn get(&self, key: &IndexKey) -> Option<&P> {
        self.iter(Some(key))
            .next()
            .filter(|entry| entry.key == *key)
            .map(|entry| &entry.payload)
    }

    /// First position whose key is `>= start`
    fn lower_bound(&self, start: &IndexKey) -> usize {
        self.entries.partition_point(|entry| entry.key < *start)
    }

    /// One past the last position whose key is `<= start`
    fn upper_bound(&self, start: &IndexKey) -> usize {
        self.entries.partition_point(|entry| entry.key <= *start)
    }
}

/// A positioned traversal in either direction
#[derive(Debug, Clone)]
pub enum Traversal<'a, P> {
    Forward(slice::Iter<'a, IndexEntry<P>>),
    Backward(Rev<slice::Iter<'a, IndexEntry<P>>>),
}

impl<'a, P> Iterator for Traversal<'a, P> {
    type Item = &'a IndexEntry<P>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Traversal::Forward(it) => it.next(),
            Traversal::Backward(it) => it.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Traversal::Forward(it) => it.size_hint(),
            Traversal::Backward(it) => it.size_hint(),
        }
    }
}
