//! Weak position-to-holder tracking.
//!
//! [`WeakHolderTracker`] answers "which live holder, if any, is showing
//! position P right now?" without keeping holders alive. Associations are
//! never removed eagerly: a holder may be dropped, or recycled onto another
//! position, without telling the tracker. Instead every read re-validates the
//! association and evicts it when it has gone stale.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use multiselector_core::logging::targets;

use crate::holder::{HolderRef, Position, SelectableHolder};

/// Non-owning map from position to the holder bound there.
///
/// A lookup only returns a holder that is still alive *and* still reports
/// the looked-up position as its own. Anything else is evicted on the spot.
pub struct WeakHolderTracker<H: ?Sized> {
    holders_by_position: BTreeMap<Position, Weak<RefCell<H>>>,
}

/// Outcome of validating a single association.
enum Validity<H: ?Sized> {
    Live(HolderRef<H>),
    Stale,
    /// The holder is mutably borrowed, so its position cannot be read.
    Busy,
}

impl<H: ?Sized> Default for WeakHolderTracker<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: ?Sized> WeakHolderTracker<H> {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self {
            holders_by_position: BTreeMap::new(),
        }
    }

    /// Number of recorded associations, including ones not yet found stale.
    pub fn len(&self) -> usize {
        self.holders_by_position.len()
    }

    /// Returns true if no associations are recorded.
    pub fn is_empty(&self) -> bool {
        self.holders_by_position.is_empty()
    }

    /// Forgets every association.
    pub fn clear(&mut self) {
        self.holders_by_position.clear();
    }
}

impl<H: SelectableHolder + ?Sized> WeakHolderTracker<H> {
    /// Records that `holder` now shows `position`.
    ///
    /// Any previous association for `position` is replaced. The previous
    /// holder is not notified.
    pub fn bind(&mut self, holder: &HolderRef<H>, position: Position) {
        self.holders_by_position
            .insert(position, Rc::downgrade(holder));
    }

    /// Returns the holder bound to `position`, if it is alive and still
    /// reports `position` as its own.
    ///
    /// A stale association is removed as a side effect. A holder that is
    /// mutably borrowed elsewhere is not returned but stays tracked.
    pub fn get_holder(&mut self, position: Position) -> Option<HolderRef<H>> {
        match self.validate(position)? {
            Validity::Live(holder) => Some(holder),
            Validity::Stale => {
                self.holders_by_position.remove(&position);
                tracing::trace!(target: targets::TRACKER, position, "evicted stale holder");
                None
            }
            Validity::Busy => {
                tracing::trace!(target: targets::TRACKER, position, "holder busy, skipped");
                None
            }
        }
    }

    /// Snapshot of every holder that currently passes validation.
    ///
    /// Stale associations found along the way are evicted. Ordering follows
    /// bound position but callers should not depend on it.
    pub fn tracked_holders(&mut self) -> Vec<HolderRef<H>> {
        let positions: Vec<Position> = self.holders_by_position.keys().copied().collect();
        positions
            .into_iter()
            .filter_map(|position| self.get_holder(position))
            .collect()
    }

    /// Evicts every stale association, returning how many were removed.
    pub fn prune(&mut self) -> usize {
        let before = self.holders_by_position.len();
        self.holders_by_position.retain(|&position, weak| {
            !matches!(Self::check(position, weak), Validity::Stale)
        });
        let removed = before - self.holders_by_position.len();
        if removed > 0 {
            tracing::trace!(target: targets::TRACKER, removed, "pruned stale holders");
        }
        removed
    }

    fn validate(&self, position: Position) -> Option<Validity<H>> {
        self.holders_by_position
            .get(&position)
            .map(|weak| Self::check(position, weak))
    }

    fn check(position: Position, weak: &Weak<RefCell<H>>) -> Validity<H> {
        let Some(holder) = weak.upgrade() else {
            return Validity::Stale;
        };

        let reported = match holder.try_borrow() {
            Ok(borrowed) => borrowed.position(),
            Err(_) => return Validity::Busy,
        };

        if reported == Some(position) {
            Validity::Live(holder)
        } else {
            Validity::Stale
        }
    }
}

static_assertions::assert_not_impl_any!(WeakHolderTracker<dyn SelectableHolder>: Send, Sync);
