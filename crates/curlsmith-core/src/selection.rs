//! Order-preserving field selection

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// The user-curated subset of predicted response field paths to retain
/// in generated filtering logic.
///
/// Insertion order is preserved for display, but only membership is
/// semantic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionSet {
    fields: IndexSet<String>,
}

impl SelectionSet {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle membership of a field: present is removed, absent is added.
    /// Returns true if the field is selected after the toggle.
    pub fn toggle(&mut self, field: &str) -> bool {
        if self.fields.shift_remove(field) {
            false
        } else {
            self.fields.insert(field.to_string());
            true
        }
    }

    /// Add a field to the selection
    pub fn insert(&mut self, field: &str) {
        self.fields.insert(field.to_string());
    }

    /// Whether a field is selected
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains(field)
    }

    /// Number of selected fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the selection is empty (the "no filtering" sentinel)
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Drop all selected fields
    pub fn clear(&mut self) {
        self.fields.clear();
    }

    /// Selected fields in insertion order
    pub fn to_vec(&self) -> Vec<String> {
        self.fields.iter().cloned().collect()
    }
}
