//! Identifier encoding: sparse raw ids to dense matrix positions and back.
//!
//! User ids and movie ids are arbitrary sparse integers. The factor
//! matrices need contiguous row indices, so each id space gets its own
//! encoder. The two encoders never share an index space.

use crate::error::{FactorizationError, Result};
use data_loader::{MovieId, UserId};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt::Display;
use std::hash::Hash;

/// Bidirectional map between raw identifiers and indices in `[0, len)`.
///
/// Indices are assigned in first-seen order, so the same input order
/// always yields the same encoding.
#[derive(Debug, Clone)]
pub struct IdEncoder<T> {
    to_index: HashMap<T, usize>,
    ids: Vec<T>,
}

/// Encoder for user identifiers
pub type UserEncoder = IdEncoder<UserId>;

/// Encoder for movie identifiers
pub type ItemEncoder = IdEncoder<MovieId>;

impl<T> IdEncoder<T>
where
    T: Copy + Eq + Hash + Display,
{
    /// Build an encoder from a sequence of raw ids (duplicates allowed)
    pub fn fit<I: IntoIterator<Item = T>>(raw_ids: I) -> Self {
        let mut encoder = IdEncoder {
            to_index: HashMap::new(),
            ids: Vec::new(),
        };
        for id in raw_ids {
            // Entry API: only the first occurrence assigns an index
            if let Entry::Vacant(slot) = encoder.to_index.entry(id) {
                slot.insert(encoder.ids.len());
                encoder.ids.push(id);
            }
        }
        encoder
    }

    /// Dense index of `id`, or `UnknownIdentifier` if it was never seen
    pub fn encode(&self, id: T) -> Result<usize> {
        self.get(id).ok_or_else(|| FactorizationError::UnknownIdentifier {
            id: id.to_string(),
        })
    }

    /// Like [`encode`](Self::encode) but returns `None` instead of an error
    pub fn get(&self, id: T) -> Option<usize> {
        self.to_index.get(&id).copied()
    }

    /// Raw id at `index`, or `IndexOutOfRange` if `index >= len`
    pub fn decode(&self, index: usize) -> Result<T> {
        self.ids
            .get(index)
            .copied()
            .ok_or(FactorizationError::IndexOutOfRange {
                index,
                len: self.ids.len(),
            })
    }

    pub fn contains(&self, id: T) -> bool {
        self.to_index.contains_key(&id)
    }

    /// Raw ids in index order
    pub fn ids(&self) -> &[T] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
