//! Persisted selection state.
//!
//! [`SavedSelection`] is the blob a host stores across process restarts or
//! configuration changes. It carries exactly two logical fields: the
//! selected positions and the selectable flag. It is serde-serializable so
//! hosts can use any encoding; a JSON codec is provided for convenience.
//!
//! ```
//! use multiselector::{MultiSelector, SavedSelection, BindingHolder};
//!
//! let mut selector = MultiSelector::<BindingHolder>::new();
//! selector.set_selectable(true);
//! selector.set_selected(2, 0, true);
//!
//! let json = selector.save_selection_states().to_json().unwrap();
//!
//! let mut restored = MultiSelector::<BindingHolder>::new();
//! restored.restore_selection_states(SavedSelection::decode(&json).unwrap().as_ref());
//! assert_eq!(restored.selected_positions(), vec![2]);
//! assert!(restored.is_selectable());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{SelectorError, SelectorResult};
use crate::holder::Position;

/// Snapshot of a selector's selected positions and selection mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SavedSelection {
    /// Positions that were selected.
    pub selected_positions: Vec<Position>,
    /// Whether selection mode was on.
    pub selectable: bool,
}

impl SavedSelection {
    /// Creates a snapshot from its parts.
    pub fn new(selected_positions: Vec<Position>, selectable: bool) -> Self {
        Self {
            selected_positions,
            selectable,
        }
    }

    /// Encodes the snapshot as JSON.
    pub fn to_json(&self) -> SelectorResult<String> {
        serde_json::to_string(self).map_err(SelectorError::JsonEncode)
    }

    /// Decodes a snapshot from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> SelectorResult<Self> {
        serde_json::from_str(json).map_err(SelectorError::JsonParse)
    }

    /// Decodes a stored blob that may be empty.
    ///
    /// Blank input means nothing was saved and yields `None`, which
    /// [`restore_selection_states`](crate::MultiSelector::restore_selection_states)
    /// treats as a no-op.
    pub fn decode(blob: &str) -> SelectorResult<Option<Self>> {
        if blob.trim().is_empty() {
            return Ok(None);
        }
        Self::from_json(blob).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_field_names() {
        let json = SavedSelection::new(vec![1, 5], true).to_json().unwrap();
        assert_eq!(json, r#"{"selectedPositions":[1,5],"selectable":true}"#);
    }

    #[test]
    fn test_json_round_trip() {
        let saved = SavedSelection::new(vec![0, 3, 8], false);
        let decoded = SavedSelection::from_json(&saved.to_json().unwrap()).unwrap();
        assert_eq!(decoded, saved);
    }

    #[test]
    fn test_missing_fields_default() {
        let decoded = SavedSelection::from_json("{}").unwrap();
        assert_eq!(decoded, SavedSelection::default());

        let decoded = SavedSelection::from_json(r#"{"selectable":true}"#).unwrap();
        assert!(decoded.selected_positions.is_empty());
        assert!(decoded.selectable);
    }

    #[test]
    fn test_decode_blank_is_none() {
        assert_eq!(SavedSelection::decode("").unwrap(), None);
        assert_eq!(SavedSelection::decode("  \n").unwrap(), None);
        assert!(SavedSelection::decode("[1,2").is_err());
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = SavedSelection::from_json("not json").unwrap_err();
        assert!(matches!(err, SelectorError::JsonParse(_)));
    }
}
