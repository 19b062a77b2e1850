use std::collections::HashMap;
use std::hash::Hash;

use estrella_core::Keyed;

/// Deduplicates dimension values, handing out surrogate keys `1..=N` in
/// order of first occurrence.
#[derive(Debug)]
pub struct DimensionBuilder<T> {
    keys: HashMap<T, i64>,
    rows: Vec<Keyed<T>>,
}

impl<T> Default for DimensionBuilder<T> {
    fn default() -> Self {
        Self {
            keys: HashMap::new(),
            rows: Vec::new(),
        }
    }
}

impl<T: Eq + Hash + Clone> DimensionBuilder<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Surrogate key for `value`, inserting it as a new row if unseen.
    pub fn key_for(&mut self, value: T) -> i64 {
        if let Some(&id) = self.keys.get(&value) {
            return id;
        }
        let id = i64::try_from(self.rows.len()).map_or(i64::MAX, |n| n + 1);
        self.keys.insert(value.clone(), id);
        self.rows.push(Keyed { id, value });
        id
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn into_rows(self) -> Vec<Keyed<T>> {
        self.rows
    }
}
