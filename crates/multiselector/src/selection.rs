//! Sparse position-keyed selection storage.

use std::collections::BTreeMap;

use crate::holder::Position;

/// Sparse map from position to its selected flag.
///
/// A position that is absent is not selected. Deselecting removes the entry,
/// so only selected positions are ever stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    selections: BTreeMap<Position, bool>,
}

impl SelectionSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `position` is selected.
    pub fn get(&self, position: Position) -> bool {
        self.selections.get(&position).copied().unwrap_or(false)
    }

    /// Sets the selected flag for `position`, returning `true` if it changed.
    pub fn set(&mut self, position: Position, selected: bool) -> bool {
        if selected {
            self.selections.insert(position, true).is_none()
        } else {
            self.selections.remove(&position).is_some()
        }
    }

    /// Removes every entry, returning the positions that were selected.
    pub fn clear(&mut self) -> Vec<Position> {
        std::mem::take(&mut self.selections)
            .into_iter()
            .filter_map(|(position, selected)| selected.then_some(position))
            .collect()
    }

    /// Selected positions in ascending order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.selections
            .iter()
            .filter_map(|(&position, &selected)| selected.then_some(position))
    }

    /// Number of selected positions.
    pub fn len(&self) -> usize {
        self.positions().count()
    }

    /// Returns true if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.positions().next().is_none()
    }
}

impl FromIterator<Position> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        Self {
            selections: iter.into_iter().map(|position| (position, true)).collect(),
        }
    }
}
