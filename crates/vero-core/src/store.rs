//! In-memory record store.
//!
//! One store per view, exclusively owned by it. Records keep insertion
//! order, which is the default display order. There is no persistence and
//! no soft-delete: a deleted record is gone for the life of the process.
//!
//! Update and delete against an unknown id leave the store untouched and
//! return `false`. The miss is logged at `warn` so a stale id in a caller
//! cannot fail invisibly.

use crate::id::{IdGenerator, RecordId};
use std::collections::HashSet;
use thiserror::Error;
use tracing::warn;

/// A domain record with an immutable identity.
pub trait Record {
    fn id(&self) -> RecordId;
}

/// Errors from bulk-loading seed rows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("duplicate record id {0}")]
    DuplicateId(RecordId),
}

/// Ordered collection of records with create/update/delete.
#[derive(Debug, Clone)]
pub struct RecordStore<T> {
    records: Vec<T>,
}

impl<T> Default for RecordStore<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T: Record> RecordStore<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from hardcoded seed rows, rejecting duplicate ids.
    pub fn seeded(records: Vec<T>) -> Result<Self, StoreError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id()) {
                return Err(StoreError::DuplicateId(record.id()));
            }
        }
        Ok(Self { records })
    }

    /// Create a record from a validated draft: allocate a fresh id, build
    /// the record, append at the end. Callers validate before calling.
    pub fn create_with(&mut self, ids: &IdGenerator, build: impl FnOnce(RecordId) -> T) -> RecordId {
        let id = ids.next_id();
        self.records.push(build(id));
        id
    }

    /// Apply `patch` to the record matching `id` in place.
    ///
    /// Returns `false` without touching the store when no record matches.
    pub fn update(&mut self, id: RecordId, patch: impl FnOnce(&mut T)) -> bool {
        match self.records.iter_mut().find(|r| r.id() == id) {
            Some(record) => {
                patch(record);
                true
            }
            None => {
                warn!(%id, "update miss: no record with this id");
                false
            }
        }
    }

    /// Remove the record matching `id`, preserving the order of the rest.
    ///
    /// Idempotent: a second call for the same id returns `false`.
    pub fn delete(&mut self, id: RecordId) -> bool {
        match self.records.iter().position(|r| r.id() == id) {
            Some(at) => {
                self.records.remove(at);
                true
            }
            None => {
                warn!(%id, "delete miss: no record with this id");
                false
            }
        }
    }

    #[must_use]
    pub fn get(&self, id: RecordId) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    #[must_use]
    pub fn records(&self) -> &[T] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
