//! Change-detecting properties.
//!
//! A [`Property<T>`] wraps a value and reports whether a write actually
//! changed it, so owners emit their change signals only on real changes.
//!
//! # Example
//!
//! ```
//! use multiselector_core::{Property, Signal};
//!
//! struct Mode {
//!     selectable: Property<bool>,
//!     selectable_changed: Signal<bool>,
//! }
//!
//! impl Mode {
//!     fn set_selectable(&self, selectable: bool) {
//!         if self.selectable.set(selectable) {
//!             self.selectable_changed.emit(selectable);
//!         }
//!     }
//! }
//!
//! let mode = Mode {
//!     selectable: Property::new(false),
//!     selectable_changed: Signal::new(),
//! };
//! mode.set_selectable(true);
//! assert!(mode.selectable.get());
//! ```

use std::cell::Cell;

use crate::logging::targets;

/// A property holding a small `Copy` value that tracks changes.
///
/// `set()` compares the new value with the current one and returns whether
/// the value actually changed.
#[derive(Debug, Default)]
pub struct Property<T: Copy> {
    value: Cell<T>,
}

impl<T: Copy + PartialEq> Property<T> {
    /// Create a new property with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value: Cell::new(value),
        }
    }

    /// Get the current value.
    pub fn get(&self) -> T {
        self.value.get()
    }

    /// Set the value, returning `true` if the value changed.
    pub fn set(&self, value: T) -> bool {
        if self.value.replace(value) == value {
            return false;
        }
        tracing::trace!(target: targets::PROPERTY, "property changed");
        true
    }
}

static_assertions::assert_not_impl_any!(Property<bool>: Sync);
