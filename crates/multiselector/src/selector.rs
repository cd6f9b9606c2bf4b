//! The selection engine.
//!
//! [`MultiSelector`] owns the set of selected positions and keeps every
//! holder the host has bound to it in sync with that set. It works with any
//! holder type through the [`SelectableHolder`] trait.
//!
//! # Example
//!
//! ```
//! use multiselector::{BindingHolder, MultiSelector, SelectableHolder};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let mut selector = MultiSelector::<BindingHolder>::new();
//!
//! // The host binds a holder to position 1.
//! let holder = Rc::new(RefCell::new(BindingHolder::at(1, 11)));
//! selector.bind_holder(&holder, 1, 11);
//!
//! // Outside selection mode a tap is an ordinary click.
//! assert!(!selector.tap_selection(1, 11));
//!
//! selector.set_selectable(true);
//! assert!(selector.tap_selection(1, 11));
//! assert!(holder.borrow().is_activated());
//!
//! // Listen for changes
//! selector.selection_changed.connect(|(selected, deselected)| {
//!     println!("selection changed: +{} -{}", selected.len(), deselected.len());
//! });
//! selector.clear_selections();
//! assert!(!holder.borrow().is_activated());
//! ```

use std::fmt;

use multiselector_core::logging::{span_names, targets};
use multiselector_core::{PerfSpan, Property, Signal};

use crate::config::SelectorConfig;
use crate::holder::{HolderRef, ItemId, Position, SelectableHolder};
use crate::policy::{MultiSelection, SelectionPolicy, SingleSelection};
use crate::selection::SelectionSet;
use crate::state::SavedSelection;
use crate::tracker::WeakHolderTracker;

/// Tracks selected positions and pushes selection state to bound holders.
///
/// State is two orthogonal flags: a global *selectable* flag (selection mode
/// on or off) and a per-position *selected* flag. Every mutating call has
/// pushed the new state to the affected holders before it returns.
///
/// Selection is keyed by position, not by item identity. When the host
/// inserts, removes or moves items ahead of a selected position it must
/// re-key or clear the selection itself; otherwise the selection sticks to
/// whatever item now occupies the old position.
///
/// # Signals
///
/// - `selection_changed`: Emitted when the selected set changes, with
///   (newly selected, newly deselected) positions
/// - `selectable_changed`: Emitted when selection mode is turned on or off
pub struct MultiSelector<H: ?Sized = dyn SelectableHolder> {
    /// Selected positions.
    selections: SelectionSet,

    /// Holders currently bound, held weakly.
    tracker: WeakHolderTracker<H>,

    /// Whether selection mode is on.
    selectable: Property<bool>,

    /// Decides which selections a request displaces.
    policy: Box<dyn SelectionPolicy>,

    /// Emitted when selection changes. Args: (selected, deselected)
    pub selection_changed: Signal<(Vec<Position>, Vec<Position>)>,

    /// Emitted when selection mode changes.
    pub selectable_changed: Signal<bool>,
}

impl<H: SelectableHolder + ?Sized> Default for MultiSelector<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: SelectableHolder + ?Sized> MultiSelector<H> {
    /// Creates a selector that allows any number of selected positions.
    pub fn new() -> Self {
        Self::with_policy(MultiSelection)
    }

    /// Creates a selector that keeps at most one position selected.
    pub fn single() -> Self {
        Self::with_policy(SingleSelection)
    }

    /// Creates a selector driven by a custom policy.
    pub fn with_policy(policy: impl SelectionPolicy + 'static) -> Self {
        Self::with_boxed_policy(Box::new(policy))
    }

    /// Creates a selector from configuration.
    pub fn from_config(config: &SelectorConfig) -> Self {
        Self::with_boxed_policy(config.mode.into_policy())
    }

    fn with_boxed_policy(policy: Box<dyn SelectionPolicy>) -> Self {
        Self {
            selections: SelectionSet::new(),
            tracker: WeakHolderTracker::new(),
            selectable: Property::new(false),
            policy,
            selection_changed: Signal::new(),
            selectable_changed: Signal::new(),
        }
    }

    /// Name of the active policy.
    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    // =========================================================================
    // Selection Mode
    // =========================================================================

    /// Whether selection mode is on.
    pub fn is_selectable(&self) -> bool {
        self.selectable.get()
    }

    /// Turns selection mode on or off and refreshes every bound holder.
    pub fn set_selectable(&mut self, selectable: bool) {
        let changed = self.selectable.set(selectable);
        self.refresh_all_holders();

        if changed {
            tracing::debug!(target: targets::SELECTOR, selectable, "selection mode changed");
            self.selectable_changed.emit(selectable);
        }
    }

    // =========================================================================
    // Selection Queries
    // =========================================================================

    /// Whether `position` is selected.
    ///
    /// `id` is accepted for identity-aware policies and ignored here.
    pub fn is_selected(&self, position: Position, _id: ItemId) -> bool {
        self.selections.get(position)
    }

    /// Selected positions in ascending order.
    pub fn selected_positions(&self) -> Vec<Position> {
        self.selections.positions().collect()
    }

    /// Number of selected positions.
    pub fn selected_count(&self) -> usize {
        self.selections.len()
    }

    /// Returns true if any position is selected.
    pub fn has_selection(&self) -> bool {
        !self.selections.is_empty()
    }

    // =========================================================================
    // Selection Operations
    // =========================================================================

    /// Selects or deselects `position`.
    ///
    /// Positions the policy reports as conflicting are deselected first, one
    /// at a time. If a live holder is bound at any affected position it is
    /// updated immediately; otherwise the change is applied on its next bind.
    /// `id` is ignored by the built-in policies.
    pub fn set_selected(&mut self, position: Position, _id: ItemId, selected: bool) {
        let conflicts = self
            .policy
            .conflicting_positions(position, selected, &self.selections);

        let mut deselected = Vec::new();
        if !conflicts.is_empty() {
            tracing::debug!(
                target: targets::SELECTOR,
                policy = self.policy.name(),
                position,
                conflicts = conflicts.len(),
                "clearing conflicting selections"
            );
        }
        for conflict in conflicts {
            if self.apply_selected(conflict, false) {
                deselected.push(conflict);
            }
        }

        let mut newly_selected = Vec::new();
        if self.apply_selected(position, selected) {
            if selected {
                newly_selected.push(position);
            } else {
                deselected.push(position);
            }
        }

        self.notify_selection(newly_selected, deselected);
    }

    /// Selects or deselects whatever position `holder` currently reports.
    ///
    /// Does nothing for a detached holder, or for a holder that is mutably
    /// borrowed elsewhere, since its position cannot be read.
    pub fn set_holder_selected(&mut self, holder: &HolderRef<H>, selected: bool) {
        if let Some((position, id)) = Self::holder_binding(holder) {
            self.set_selected(position, id, selected);
        }
    }

    /// Toggles `position` if selection mode is on.
    ///
    /// Returns `false` without touching the selection when selection mode is
    /// off, so the caller can treat the tap as an ordinary click.
    pub fn tap_selection(&mut self, position: Position, id: ItemId) -> bool {
        if !self.is_selectable() {
            return false;
        }

        let selected = self.is_selected(position, id);
        self.set_selected(position, id, !selected);
        true
    }

    /// Toggles the position `holder` currently reports, if selection mode is
    /// on.
    ///
    /// Returns `false` without touching the selection when selection mode is
    /// off, when the holder is detached, and when the holder is mutably
    /// borrowed elsewhere so its position cannot be read. Check
    /// [`is_selectable`](Self::is_selectable) to tell the first case apart.
    pub fn tap_holder(&mut self, holder: &HolderRef<H>) -> bool {
        match Self::holder_binding(holder) {
            Some((position, id)) => self.tap_selection(position, id),
            None => false,
        }
    }

    /// Selects positions `0..item_count`.
    ///
    /// Does nothing when the policy allows only one selection.
    pub fn select_all(&mut self, item_count: usize) {
        if !self.policy.allows_multiple() {
            tracing::debug!(
                target: targets::SELECTOR,
                policy = self.policy.name(),
                "select all ignored by policy"
            );
            return;
        }

        let _span = PerfSpan::new(span_names::SELECT_ALL);
        let newly_selected: Vec<Position> = (0..item_count)
            .filter(|&position| self.selections.set(position, true))
            .collect();
        tracing::debug!(
            target: targets::SELECTOR,
            item_count,
            added = newly_selected.len(),
            "select all"
        );

        self.refresh_all_holders();
        self.notify_selection(newly_selected, Vec::new());
    }

    /// Deselects every position and refreshes every bound holder.
    pub fn clear_selections(&mut self) {
        let deselected = self.selections.clear();
        tracing::debug!(
            target: targets::SELECTOR,
            cleared = deselected.len(),
            "selections cleared"
        );

        self.refresh_all_holders();
        self.notify_selection(Vec::new(), deselected);
    }

    // =========================================================================
    // Holder Binding
    // =========================================================================

    /// Registers `holder` as showing `position` and pushes the current state
    /// to it.
    ///
    /// The host must call this every time it assigns a holder to a position:
    /// on first bind, on reuse for another position, and on any reindex.
    /// Rebinding at the same position is harmless. `id` is ignored by the
    /// built-in policies.
    ///
    /// If `holder` is mutably borrowed elsewhere when this is called, it is
    /// still registered but the push is skipped (a `warn` event is logged)
    /// and the holder keeps its previous `selectable` and `activated` state.
    /// Call [`refresh_all_holders`](Self::refresh_all_holders) or bind again
    /// once the borrow ends to bring it up to date.
    pub fn bind_holder(&mut self, holder: &HolderRef<H>, position: Position, _id: ItemId) {
        self.tracker.bind(holder, position);
        self.push_state(holder, Some(position));
    }

    /// Pushes the current state to every live bound holder.
    pub fn refresh_all_holders(&mut self) {
        let _span = PerfSpan::new(span_names::REFRESH);
        for holder in self.tracker.tracked_holders() {
            self.push_state(&holder, None);
        }
    }

    /// The holder tracker, for inspection.
    pub fn tracker(&self) -> &WeakHolderTracker<H> {
        &self.tracker
    }

    /// Evicts every stale holder association, returning how many were
    /// removed.
    pub fn prune_holders(&mut self) -> usize {
        self.tracker.prune()
    }

    // =========================================================================
    // Saved State
    // =========================================================================

    /// Captures the selected positions and the selection mode.
    pub fn save_selection_states(&self) -> SavedSelection {
        SavedSelection::new(self.selected_positions(), self.is_selectable())
    }

    /// Replaces the selection and selection mode with a saved snapshot, then
    /// refreshes every bound holder.
    ///
    /// Positions not in the snapshot end up deselected. `None` is a no-op.
    pub fn restore_selection_states(&mut self, saved: Option<&SavedSelection>) {
        let Some(saved) = saved else {
            return;
        };

        let _span = PerfSpan::new(span_names::RESTORE);
        let previous = SelectionSet::from_iter(self.selections.clear());
        self.selections = saved.selected_positions.iter().copied().collect();
        let mode_changed = self.selectable.set(saved.selectable);

        tracing::debug!(
            target: targets::SELECTOR,
            restored = self.selections.len(),
            selectable = saved.selectable,
            "restored selection state"
        );

        self.refresh_all_holders();

        let newly_selected = self
            .selections
            .positions()
            .filter(|&position| !previous.get(position))
            .collect();
        let deselected = previous
            .positions()
            .filter(|&position| !self.selections.get(position))
            .collect();
        self.notify_selection(newly_selected, deselected);

        if mode_changed {
            self.selectable_changed.emit(saved.selectable);
        }
    }

    // =========================================================================
    // Internal Helpers
    // =========================================================================

    /// Writes one entry and pushes it to the holder bound there, if any.
    fn apply_selected(&mut self, position: Position, selected: bool) -> bool {
        let changed = self.selections.set(position, selected);
        if let Some(holder) = self.tracker.get_holder(position) {
            self.push_state(&holder, Some(position));
        }
        changed
    }

    /// Pushes selectable and activated state to one holder.
    ///
    /// `position` overrides the position the holder reports; `None` uses the
    /// holder's own.
    fn push_state(&self, holder: &HolderRef<H>, position: Option<Position>) {
        let Ok(mut holder) = holder.try_borrow_mut() else {
            tracing::warn!(
                target: targets::SELECTOR,
                ?position,
                "holder already borrowed, skipping state push"
            );
            return;
        };

        let position = position.or_else(|| holder.position());
        let activated = position.is_some_and(|p| self.selections.get(p));
        let selectable = self.is_selectable();

        tracing::trace!(
            target: targets::SELECTOR,
            ?position,
            selectable,
            activated,
            "pushing holder state"
        );
        holder.set_selectable(selectable);
        holder.set_activated(activated);
    }

    fn holder_binding(holder: &HolderRef<H>) -> Option<(Position, ItemId)> {
        let holder = holder.try_borrow().ok()?;
        let position = holder.position()?;
        Some((position, holder.item_id()))
    }

    fn notify_selection(&self, selected: Vec<Position>, deselected: Vec<Position>) {
        if !selected.is_empty() || !deselected.is_empty() {
            self.selection_changed.emit((selected, deselected));
        }
    }
}

impl<H: SelectableHolder + ?Sized> fmt::Debug for MultiSelector<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiSelector")
            .field("policy", &self.policy.name())
            .field("selectable", &self.is_selectable())
            .field("selected", &self.selected_positions())
            .field("tracked", &self.tracker.len())
            .finish()
    }
}

static_assertions::assert_not_impl_any!(MultiSelector: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::holder::BindingHolder;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn bound(
        selector: &mut MultiSelector<BindingHolder>,
        position: Position,
    ) -> HolderRef<BindingHolder> {
        let holder = Rc::new(RefCell::new(BindingHolder::at(position, position as u64)));
        selector.bind_holder(&holder, position, position as u64);
        holder
    }

    #[test]
    fn test_selector_creation() {
        let selector = MultiSelector::<BindingHolder>::new();
        assert!(!selector.is_selectable());
        assert!(!selector.has_selection());
        assert_eq!(selector.policy_name(), "multiple");
        assert_eq!(MultiSelector::<BindingHolder>::single().policy_name(), "single");
    }

    #[test]
    fn test_unset_positions_are_unselected() {
        let selector = MultiSelector::<BindingHolder>::new();
        for position in [0, 1, 17, 10_000] {
            assert!(!selector.is_selected(position, 0));
        }
    }

    #[test]
    fn test_toggle_round_trip() {
        let mut selector = MultiSelector::<BindingHolder>::new();

        selector.set_selected(3, 0, true);
        assert!(selector.is_selected(3, 0));

        selector.set_selected(3, 0, false);
        assert!(!selector.is_selected(3, 0));
        assert!(selector.selected_positions().is_empty());
    }

    #[test]
    fn test_id_is_ignored() {
        let mut selector = MultiSelector::<BindingHolder>::new();
        selector.set_selected(2, 100, true);
        assert!(selector.is_selected(2, 999));
    }

    #[test]
    fn test_set_selected_pushes_to_bound_holder() {
        let mut selector = MultiSelector::<BindingHolder>::new();
        let holder = bound(&mut selector, 4);

        selector.set_selected(4, 4, true);
        assert!(holder.borrow().is_activated());

        selector.set_selected(4, 4, false);
        assert!(!holder.borrow().is_activated());
    }

    #[test]
    fn test_latent_selection_applied_on_bind() {
        let mut selector = MultiSelector::<BindingHolder>::new();
        selector.set_selectable(true);
        selector.set_selected(7, 0, true);

        let holder = bound(&mut selector, 7);
        assert!(holder.borrow().is_selectable());
        assert!(holder.borrow().is_activated());
    }

    #[test]
    fn test_rebind_to_other_position_refreshes_holder() {
        let mut selector = MultiSelector::<BindingHolder>::new();
        selector.set_selected(1, 0, true);
        let holder = bound(&mut selector, 1);
        assert!(holder.borrow().is_activated());

        holder.borrow_mut().assign(2, 2);
        selector.bind_holder(&holder, 2, 2);
        assert!(!holder.borrow().is_activated());

        // Position 1 no longer resolves to the recycled holder.
        selector.set_selected(1, 0, false);
        selector.set_selected(1, 0, true);
        assert!(!holder.borrow().is_activated());
    }

    #[test]
    fn test_tap_outside_selection_mode() {
        let mut selector = MultiSelector::<BindingHolder>::new();
        assert!(!selector.tap_selection(2, 0));
        assert!(!selector.is_selected(2, 0));
    }

    #[test]
    fn test_tap_in_selection_mode_toggles() {
        let mut selector = MultiSelector::<BindingHolder>::new();
        selector.set_selectable(true);

        assert!(selector.tap_selection(2, 0));
        assert!(selector.is_selected(2, 0));
        assert!(selector.tap_selection(2, 0));
        assert!(!selector.is_selected(2, 0));
    }

    #[test]
    fn test_tap_holder() {
        let mut selector = MultiSelector::<BindingHolder>::new();
        let holder = bound(&mut selector, 5);
        selector.set_selectable(true);

        assert!(selector.tap_holder(&holder));
        assert!(selector.is_selected(5, 5));
        assert!(holder.borrow().is_activated());

        holder.borrow_mut().detach();
        assert!(!selector.tap_holder(&holder));
        assert!(selector.is_selected(5, 5));
    }

    #[test]
    fn test_set_holder_selected() {
        let mut selector = MultiSelector::<BindingHolder>::new();
        let holder = bound(&mut selector, 3);

        selector.set_holder_selected(&holder, true);
        assert_eq!(selector.selected_positions(), vec![3]);
        assert!(holder.borrow().is_activated());
    }

    #[test]
    fn test_set_selectable_broadcasts() {
        let mut selector = MultiSelector::<BindingHolder>::new();
        let holders: Vec<_> = (0..3).map(|p| bound(&mut selector, p)).collect();

        selector.set_selectable(true);
        assert!(holders.iter().all(|h| h.borrow().is_selectable()));

        selector.set_selectable(false);
        assert!(holders.iter().all(|h| !h.borrow().is_selectable()));
    }

    #[test]
    fn test_clear_selections() {
        let mut selector = MultiSelector::<BindingHolder>::new();
        let holder = bound(&mut selector, 1);
        selector.set_selected(1, 0, true);
        selector.set_selected(6, 0, true);

        selector.clear_selections();
        assert!(selector.selected_positions().is_empty());
        assert!(!holder.borrow().is_activated());
    }

    #[test]
    fn test_select_all() {
        let mut selector = MultiSelector::<BindingHolder>::new();
        let holder = bound(&mut selector, 2);

        selector.select_all(5);
        assert_eq!(selector.selected_positions(), vec![0, 1, 2, 3, 4]);
        assert!(holder.borrow().is_activated());
    }

    #[test]
    fn test_select_all_ignored_by_single_policy() {
        let mut selector = MultiSelector::<BindingHolder>::single();
        selector.set_selected(1, 0, true);

        selector.select_all(5);
        assert_eq!(selector.selected_positions(), vec![1]);
    }

    #[test]
    fn test_single_policy_replaces_selection() {
        let mut selector = MultiSelector::<BindingHolder>::single();
        let first = bound(&mut selector, 1);
        let second = bound(&mut selector, 3);

        selector.set_selected(1, 0, true);
        selector.set_selected(3, 0, true);

        assert_eq!(selector.selected_positions(), vec![3]);
        assert!(!first.borrow().is_activated());
        assert!(second.borrow().is_activated());

        selector.set_selected(3, 0, false);
        assert!(selector.selected_positions().is_empty());
    }

    #[test]
    fn test_selection_signal() {
        let mut selector = MultiSelector::<BindingHolder>::single();
        let events = Rc::new(RefCell::new(Vec::new()));

        let events_clone = events.clone();
        selector.selection_changed.connect(move |change| {
            events_clone.borrow_mut().push(change.clone());
        });

        selector.set_selected(1, 0, true);
        selector.set_selected(3, 0, true);
        selector.set_selected(3, 0, true);

        assert_eq!(*events.borrow(), vec![(vec![1], vec![]), (vec![3], vec![1])]);
    }

    #[test]
    fn test_selectable_signal_only_on_change() {
        let mut selector = MultiSelector::<BindingHolder>::new();
        let count = Rc::new(Cell::new(0));

        let count_clone = count.clone();
        selector.selectable_changed.connect(move |_| {
            count_clone.set(count_clone.get() + 1);
        });

        selector.set_selectable(true);
        selector.set_selectable(true);
        selector.set_selectable(false);

        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_save_restore_round_trip() {
        let mut selector = MultiSelector::<BindingHolder>::new();
        selector.set_selectable(true);
        selector.set_selected(2, 0, true);
        selector.set_selected(9, 0, true);

        let saved = selector.save_selection_states();
        assert_eq!(saved, SavedSelection::new(vec![2, 9], true));

        let mut restored = MultiSelector::<BindingHolder>::new();
        restored.restore_selection_states(Some(&saved));
        assert_eq!(restored.selected_positions(), selector.selected_positions());
        assert_eq!(restored.is_selectable(), selector.is_selectable());
    }

    #[test]
    fn test_restore_replaces_selection_and_refreshes() {
        let mut selector = MultiSelector::<BindingHolder>::new();
        let old = bound(&mut selector, 1);
        let new = bound(&mut selector, 4);
        selector.set_selected(1, 0, true);

        selector.restore_selection_states(Some(&SavedSelection::new(vec![4], true)));

        assert_eq!(selector.selected_positions(), vec![4]);
        assert!(!old.borrow().is_activated());
        assert!(new.borrow().is_activated());
        assert!(new.borrow().is_selectable());
    }

    #[test]
    fn test_restore_none_is_noop() {
        let mut selector = MultiSelector::<BindingHolder>::new();
        selector.set_selectable(true);
        selector.set_selected(5, 0, true);

        selector.restore_selection_states(None);
        assert_eq!(selector.selected_positions(), vec![5]);
        assert!(selector.is_selectable());
    }

    #[test]
    fn test_busy_holder_does_not_panic() {
        let mut selector = MultiSelector::<BindingHolder>::new();
        let holder = bound(&mut selector, 0);

        let guard = holder.borrow_mut();
        selector.set_selectable(true);
        selector.set_selected(0, 0, true);
        drop(guard);

        assert!(selector.is_selected(0, 0));
        // The push was skipped; the next refresh catches the holder up.
        selector.refresh_all_holders();
        assert!(holder.borrow().is_activated());
        assert!(holder.borrow().is_selectable());
    }

    #[test]
    fn test_bind_busy_holder_skips_push() {
        let mut selector = MultiSelector::<BindingHolder>::new();
        selector.set_selectable(true);
        selector.set_selected(4, 4, true);

        let holder = Rc::new(RefCell::new(BindingHolder::at(4, 4)));
        let guard = holder.borrow_mut();
        selector.bind_holder(&holder, 4, 4);
        drop(guard);

        // Registered, but still showing its previous state.
        assert_eq!(selector.tracker().len(), 1);
        assert!(!holder.borrow().is_selectable());
        assert!(!holder.borrow().is_activated());

        selector.refresh_all_holders();
        assert!(holder.borrow().is_selectable());
        assert!(holder.borrow().is_activated());
    }

    #[test]
    fn test_tap_busy_holder_is_rejected() {
        let mut selector = MultiSelector::<BindingHolder>::new();
        let holder = bound(&mut selector, 2);
        selector.set_selectable(true);

        let guard = holder.borrow_mut();
        assert!(!selector.tap_holder(&holder));
        drop(guard);

        assert!(selector.is_selectable());
        assert!(!selector.is_selected(2, 2));
        assert!(selector.tap_holder(&holder));
        assert!(selector.is_selected(2, 2));
    }

    #[test]
    fn test_dropped_holders_are_pruned() {
        let mut selector = MultiSelector::<BindingHolder>::new();
        let kept = bound(&mut selector, 0);
        drop(bound(&mut selector, 1));

        assert_eq!(selector.tracker().len(), 2);
        assert_eq!(selector.prune_holders(), 1);
        assert_eq!(selector.tracker().len(), 1);
        drop(kept);
    }
}
