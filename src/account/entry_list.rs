//! Growable list of form rows that always keeps at least one row.

use std::ops::{Deref, DerefMut};

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryListError {
    #[error("At least one entry must remain")]
    LastEntry,

    #[error("No entry at index {0}")]
    OutOfRange(usize),
}

/// Repeatable form rows (medications, allergies, family history).
///
/// Derefs to a slice so rows can be edited in place, but the row count only
/// changes through [`add`](Self::add) and [`remove`](Self::remove).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryList<T> {
    entries: Vec<T>,
}

impl<T: Default> EntryList<T> {
    /// A list holding one empty row.
    pub fn new() -> Self {
        Self {
            entries: vec![T::default()],
        }
    }

    /// Append an empty row and return it.
    pub fn add(&mut self) -> &mut T {
        self.entries.push(T::default());
        let last = self.entries.len() - 1;
        &mut self.entries[last]
    }
}

impl<T> EntryList<T> {
    /// Remove the row at `index`. The final row can never be removed.
    pub fn remove(&mut self, index: usize) -> Result<T, EntryListError> {
        if index >= self.entries.len() {
            return Err(EntryListError::OutOfRange(index));
        }
        if self.entries.len() == 1 {
            return Err(EntryListError::LastEntry);
        }
        Ok(self.entries.remove(index))
    }

    /// Whether the remove control should be shown.
    pub fn can_remove(&self) -> bool {
        self.entries.len() > 1
    }
}

impl<T: Default> Default for EntryList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for EntryList<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.entries
    }
}

impl<T> DerefMut for EntryList<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.entries
    }
}
