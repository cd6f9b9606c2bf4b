//! Selection policies.
//!
//! A [`SelectionPolicy`] decides which existing selections must be cleared
//! before a selection request is applied. [`MultiSelector`] owns one policy
//! and runs every `set_selected` call through it, so single selection is
//! just a different policy rather than a different selector type.
//!
//! [`MultiSelector`]: crate::MultiSelector

use serde::{Deserialize, Serialize};

use crate::holder::Position;
use crate::selection::SelectionSet;

/// Decides how a selection request interacts with the current selection.
pub trait SelectionPolicy {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Positions that must be deselected before `position` is set to
    /// `selected`.
    ///
    /// Each returned position is cleared individually (pushing to its bound
    /// holder) and then the request itself is applied.
    fn conflicting_positions(
        &self,
        position: Position,
        selected: bool,
        current: &SelectionSet,
    ) -> Vec<Position>;

    /// Whether more than one position may be selected at a time.
    fn allows_multiple(&self) -> bool {
        true
    }
}

/// Any number of positions may be selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MultiSelection;

impl SelectionPolicy for MultiSelection {
    fn name(&self) -> &'static str {
        "multiple"
    }

    fn conflicting_positions(&self, _: Position, _: bool, _: &SelectionSet) -> Vec<Position> {
        Vec::new()
    }
}

/// At most one position is selected; selecting a position deselects every
/// other one first. Deselecting is applied unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SingleSelection;

impl SelectionPolicy for SingleSelection {
    fn name(&self) -> &'static str {
        "single"
    }

    fn conflicting_positions(
        &self,
        position: Position,
        selected: bool,
        current: &SelectionSet,
    ) -> Vec<Position> {
        if !selected {
            return Vec::new();
        }
        current.positions().filter(|&p| p != position).collect()
    }

    fn allows_multiple(&self) -> bool {
        false
    }
}

/// Serializable name of a built-in policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// [`MultiSelection`].
    #[default]
    Multiple,
    /// [`SingleSelection`].
    Single,
}

impl SelectionMode {
    /// Builds the policy this mode names.
    pub fn into_policy(self) -> Box<dyn SelectionPolicy> {
        match self {
            Self::Multiple => Box::new(MultiSelection),
            Self::Single => Box::new(SingleSelection),
        }
    }
}
