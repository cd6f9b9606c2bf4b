//! Multiselector - selection state for recycling list views.
//!
//! A recycling list reuses a small pool of display holders for a long list
//! of items, so a holder shows a different position every time it is
//! rebound. This crate keeps the logical selection (which positions are
//! selected, and whether selection mode is on) separate from the holders,
//! and pushes that state into whichever holder currently shows a position.
//!
//! # Components
//!
//! - [`MultiSelector`]: the selection engine
//! - [`WeakHolderTracker`]: position to holder associations that never keep a
//!   holder alive
//! - [`SelectionPolicy`]: multiple or single selection
//! - [`SelectableHolder`]: what a holder must expose to be driven
//! - [`SelectionSession`]: selection mode scoped to a contextual UI
//! - [`SavedSelection`]: state to persist across restarts
//! - [`SelectorConfig`]: TOML or JSON configuration
//!
//! # Example
//!
//! ```
//! use multiselector::{BindingHolder, MultiSelector, SelectableHolder};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let mut selector = MultiSelector::<BindingHolder>::new();
//! let pool: Vec<_> = (0..2)
//!     .map(|_| Rc::new(RefCell::new(BindingHolder::new())))
//!     .collect();
//!
//! // Show positions 0 and 1.
//! for (position, holder) in pool.iter().enumerate() {
//!     holder.borrow_mut().assign(position, position as u64);
//!     selector.bind_holder(holder, position, position as u64);
//! }
//!
//! selector.set_selectable(true);
//! selector.set_selected(0, 0, true);
//!
//! // Scroll: the first holder is recycled for position 2.
//! pool[0].borrow_mut().assign(2, 2);
//! selector.bind_holder(&pool[0], 2, 2);
//! assert!(!pool[0].borrow().is_activated());
//!
//! // Position 0 stays selected while off screen.
//! assert!(selector.is_selected(0, 0));
//! ```

pub mod config;
pub mod error;
pub mod holder;
pub mod policy;
pub mod selection;
pub mod selector;
pub mod session;
pub mod state;
pub mod tracker;

pub use config::{SelectorConfig, SessionConfig};
pub use error::{SelectorError, SelectorResult};
pub use holder::{
    BindingHolder, HolderRef, ItemId, NO_ID, Position, SelectableHolder, SwappingHolder,
};
pub use policy::{MultiSelection, SelectionMode, SelectionPolicy, SingleSelection};
pub use selection::SelectionSet;
pub use selector::MultiSelector;
pub use session::SelectionSession;
pub use state::SavedSelection;
pub use tracker::WeakHolderTracker;

pub use multiselector_core::{ConnectionId, Signal};

/// Convenient imports for hosts.
pub mod prelude {
    pub use crate::{
        BindingHolder, HolderRef, MultiSelector, SavedSelection, SelectableHolder,
        SelectionSession, SelectorConfig,
    };
}
