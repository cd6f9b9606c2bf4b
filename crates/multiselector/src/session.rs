//! Contextual selection sessions.
//!
//! A [`SelectionSession`] ties selection mode to the lifetime of some
//! contextual UI, such as an action bar that appears after a long press.
//! Starting the session turns selection mode on and finishing it turns
//! selection mode off again.
//!
//! ```
//! use multiselector::{BindingHolder, MultiSelector, SelectionSession};
//!
//! let mut selector = MultiSelector::<BindingHolder>::new();
//! let mut session = SelectionSession::new();
//!
//! selector.set_selected(4, 0, true);
//! session.start(&mut selector);
//! assert!(selector.is_selectable());
//! assert!(!selector.has_selection());
//!
//! selector.tap_selection(2, 0);
//! session.finish(&mut selector);
//! assert!(!selector.is_selectable());
//! assert_eq!(selector.selected_positions(), vec![2]);
//! ```

use multiselector_core::logging::targets;

use crate::config::SessionConfig;
use crate::holder::SelectableHolder;
use crate::selector::MultiSelector;

/// Turns selection mode on for the duration of a contextual session.
#[derive(Debug, Clone, Default)]
pub struct SelectionSession {
    config: SessionConfig,
    active: bool,
}

impl SelectionSession {
    /// Creates a session with default behavior: clear on start, keep the
    /// selection on finish.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session from configuration.
    pub fn from_config(config: SessionConfig) -> Self {
        Self {
            config,
            active: false,
        }
    }

    /// Whether the session has been started and not yet finished.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether starting clears the existing selection.
    pub fn clear_on_start(&self) -> bool {
        self.config.clear_on_start
    }

    /// Sets whether starting clears the existing selection.
    pub fn set_clear_on_start(&mut self, clear: bool) {
        self.config.clear_on_start = clear;
    }

    /// Whether finishing clears the selection.
    pub fn clear_on_finish(&self) -> bool {
        self.config.clear_on_finish
    }

    /// Sets whether finishing clears the selection.
    pub fn set_clear_on_finish(&mut self, clear: bool) {
        self.config.clear_on_finish = clear;
    }

    /// Starts the session: optionally clears the selection, then turns
    /// selection mode on.
    ///
    /// Returns `false` and does nothing if the session is already active.
    pub fn start<H: SelectableHolder + ?Sized>(&mut self, selector: &mut MultiSelector<H>) -> bool {
        if self.active {
            tracing::debug!(target: targets::SESSION, "session already active");
            return false;
        }

        if self.config.clear_on_start {
            selector.clear_selections();
        }
        selector.set_selectable(true);
        self.active = true;

        tracing::debug!(
            target: targets::SESSION,
            cleared = self.config.clear_on_start,
            "selection session started"
        );
        true
    }

    /// Finishes the session: turns selection mode off, then optionally
    /// clears the selection.
    ///
    /// Returns `false` and does nothing if the session is not active.
    pub fn finish<H: SelectableHolder + ?Sized>(
        &mut self,
        selector: &mut MultiSelector<H>,
    ) -> bool {
        if !self.active {
            tracing::debug!(target: targets::SESSION, "no active session to finish");
            return false;
        }

        selector.set_selectable(false);
        if self.config.clear_on_finish {
            selector.clear_selections();
        }
        self.active = false;

        tracing::debug!(
            target: targets::SESSION,
            cleared = self.config.clear_on_finish,
            remaining = selector.selected_count(),
            "selection session finished"
        );
        true
    }
}
