//! Ordered key-value store abstraction and the bundled in-memory backend.

use std::collections::BTreeMap;
use std::ops::Bound;

/// Iteration order for [`KvStore::iterate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IterDirection {
    /// Ascending keys starting at `start` (inclusive).
    Forward,
    /// Descending keys strictly below `start` (exclusive end).
    Reverse,
}

type KvPair = (Vec<u8>, Vec<u8>);

/// A byte-ordered key-value store.
///
/// Keys compare lexicographically. Implementations must iterate in that
/// order; the tick index relies on it to walk ticks numerically.
pub trait KvStore {
    /// Reads a value.
    fn get(&self, key: &[u8]) -> Option<Vec<u8>>;

    /// Writes a value, replacing any previous one.
    fn set(&mut self, key: Vec<u8>, value: Vec<u8>);

    /// Removes a key. Removing a missing key is a no-op.
    fn delete(&mut self, key: &[u8]);

    /// Iterates the keys under `prefix`, yielding them with the prefix
    /// stripped.
    ///
    /// `start` is relative to the prefix. [`IterDirection::Forward`]
    /// begins at `prefix ‖ start` inclusive; [`IterDirection::Reverse`]
    /// yields keys strictly below `prefix ‖ start` in descending order. An
    /// empty `start` leaves that side unbounded within the prefix.
    fn iterate<'a>(
        &'a self,
        prefix: &[u8],
        start: &[u8],
        direction: IterDirection,
    ) -> Box<dyn Iterator<Item = KvPair> + 'a>;

    /// Applies every staged operation of `batch`.
    fn write(&mut self, batch: WriteBatch) {
        for (key, op) in batch.ops {
            match op {
                Some(value) => self.set(key, value),
                None => self.delete(&key),
            }
        }
    }
}

/// Writes staged for a single atomic commit.
///
/// Later operations on the same key replace earlier ones. Dropping the
/// batch discards everything it staged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteBatch {
    ops: BTreeMap<Vec<u8>, Option<Vec<u8>>>,
}

impl WriteBatch {
    /// Creates an empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages a write.
    pub fn set(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.ops.insert(key, Some(value));
    }

    /// Stages a deletion.
    pub fn delete(&mut self, key: Vec<u8>) {
        self.ops.insert(key, None);
    }

    /// Returns the staged operation for `key`: `Some(Some(v))` for a write,
    /// `Some(None)` for a deletion, `None` if the key is untouched.
    #[must_use]
    pub fn staged(&self, key: &[u8]) -> Option<Option<&[u8]>> {
        self.ops.get(key).map(Option::as_deref)
    }

    /// Number of staged keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Returns `true` if nothing is staged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// In-memory [`KvStore`] over a [`BTreeMap`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemStore {
    entries: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl MemStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the store holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Smallest key greater than every key starting with `prefix`, or `None`
/// when the prefix is all `0xff`.
fn prefix_end(prefix: &[u8]) -> Option<Vec<u8>> {
    let mut end = prefix.to_vec();
    while let Some(last) = end.pop() {
        if last < u8::MAX {
            end.push(last + 1);
            return Some(end);
        }
    }
    None
}

impl KvStore for MemStore {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.entries.insert(key, value);
    }

    fn delete(&mut self, key: &[u8]) {
        self.entries.remove(key);
    }

    fn iterate<'a>(
        &'a self,
        prefix: &[u8],
        start: &[u8],
        direction: IterDirection,
    ) -> Box<dyn Iterator<Item = KvPair> + 'a> {
        let owned_prefix = prefix.to_vec();
        let mut bound_key = owned_prefix.clone();
        bound_key.extend_from_slice(start);

        let lower = Bound::Included(owned_prefix.clone());
        let upper = match prefix_end(prefix) {
            Some(end) => Bound::Excluded(end),
            None => Bound::Unbounded,
        };
        let strip = move |(key, value): (&Vec<u8>, &Vec<u8>)| {
            key.strip_prefix(owned_prefix.as_slice())
                .map(|rest| (rest.to_vec(), value.clone()))
        };

        match direction {
            IterDirection::Forward => {
                Box::new(self.entries.range((Bound::Included(bound_key), upper)).filter_map(strip))
            }
            IterDirection::Reverse if start.is_empty() => {
                Box::new(self.entries.range((lower, upper)).rev().filter_map(strip))
            }
            IterDirection::Reverse => Box::new(
                self.entries
                    .range((lower, Bound::Excluded(bound_key)))
                    .rev()
                    .filter_map(strip),
            ),
        }
    }
}
