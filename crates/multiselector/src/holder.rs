//! The holder-binding protocol.
//!
//! A *holder* is a reusable display object that a recycling list assigns to
//! one position at a time. The selection engine never owns holders: the host
//! list does, through [`HolderRef`], and the engine only keeps weak
//! references to them.
//!
//! Every time the host assigns a holder to a position (first bind, reuse for
//! another position, or a structural reindex) it must call
//! [`MultiSelector::bind_holder`](crate::MultiSelector::bind_holder). That
//! call is the only synchronization point between the logical selection and
//! the holder showing it.
//!
//! # Example
//!
//! ```
//! use multiselector::{BindingHolder, MultiSelector, SelectableHolder};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let mut selector = MultiSelector::<BindingHolder>::new();
//! let holder = Rc::new(RefCell::new(BindingHolder::new()));
//!
//! // The host recycles the holder onto position 3.
//! holder.borrow_mut().assign(3, 42);
//! selector.bind_holder(&holder, 3, 42);
//!
//! selector.set_selectable(true);
//! selector.set_selected(3, 42, true);
//! assert!(holder.borrow().is_activated());
//! ```

use std::cell::RefCell;
use std::rc::Rc;

/// Index into the currently displayed list ordering.
pub type Position = usize;

/// Stable identifier of a list item, independent of its position.
pub type ItemId = u64;

/// Item id used when the host has no stable ids.
pub const NO_ID: ItemId = u64::MAX;

/// Shared handle to a holder, owned by the host list.
pub type HolderRef<H> = Rc<RefCell<H>>;

/// Contract a display holder must satisfy to be driven by a
/// [`MultiSelector`](crate::MultiSelector).
pub trait SelectableHolder {
    /// The position this holder is currently bound to, or `None` while it is
    /// detached (scrapped, pooled, or not yet bound).
    ///
    /// This value changes as the host recycles the holder; whenever it does,
    /// the host must call `bind_holder` again.
    fn position(&self) -> Option<Position>;

    /// The item id this holder is currently bound to.
    fn item_id(&self) -> ItemId;

    /// Whether selection mode is currently on for this holder.
    fn is_selectable(&self) -> bool;

    /// Turn selection mode on or off for this holder.
    fn set_selectable(&mut self, selectable: bool);

    /// Whether the holder currently shows its item as selected.
    fn is_activated(&self) -> bool;

    /// Show the item as selected (activated) or not.
    fn set_activated(&mut self, activated: bool);
}

/// A plain holder that records its binding and selection state.
///
/// Use it directly when rendering reads the state back each frame, or embed
/// it in a richer holder and delegate the trait to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingHolder {
    position: Option<Position>,
    item_id: Option<ItemId>,
    selectable: bool,
    activated: bool,
}

impl BindingHolder {
    /// Creates a detached holder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a holder already assigned to `position`.
    pub fn at(position: Position, item_id: ItemId) -> Self {
        let mut holder = Self::new();
        holder.assign(position, item_id);
        holder
    }

    /// Records that the host assigned this holder to `position`.
    ///
    /// This only updates what the holder reports; the host still has to call
    /// `bind_holder` on the selector.
    pub fn assign(&mut self, position: Position, item_id: ItemId) {
        self.position = Some(position);
        self.item_id = Some(item_id);
    }

    /// Records that the host detached this holder from any position.
    pub fn detach(&mut self) {
        self.position = None;
        self.item_id = None;
    }
}

impl SelectableHolder for BindingHolder {
    fn position(&self) -> Option<Position> {
        self.position
    }

    fn item_id(&self) -> ItemId {
        self.item_id.unwrap_or(NO_ID)
    }

    fn is_selectable(&self) -> bool {
        self.selectable
    }

    fn set_selectable(&mut self, selectable: bool) {
        self.selectable = selectable;
    }

    fn is_activated(&self) -> bool {
        self.activated
    }

    fn set_activated(&mut self, activated: bool) {
        self.activated = activated;
    }
}

/// A holder that swaps its chrome when selection mode toggles.
///
/// `C` is whatever the host renders as the holder's mode-dependent
/// decoration: a background style, a color token, an animator id. In
/// selection mode the holder applies its *selection-mode* chrome, otherwise
/// its *default-mode* chrome. The activated state is tracked separately so
/// the selection-mode chrome can render it (for example as a highlighted
/// background).
#[derive(Debug, Clone)]
pub struct SwappingHolder<C> {
    binding: BindingHolder,
    selection_mode_chrome: C,
    default_mode_chrome: C,
    applied: C,
}

impl<C: Clone> SwappingHolder<C> {
    /// Creates a detached holder showing `default_mode_chrome`.
    pub fn new(default_mode_chrome: C, selection_mode_chrome: C) -> Self {
        Self {
            binding: BindingHolder::new(),
            applied: default_mode_chrome.clone(),
            selection_mode_chrome,
            default_mode_chrome,
        }
    }

    /// Records that the host assigned this holder to `position`.
    pub fn assign(&mut self, position: Position, item_id: ItemId) {
        self.binding.assign(position, item_id);
    }

    /// Records that the host detached this holder.
    pub fn detach(&mut self) {
        self.binding.detach();
    }

    /// The chrome that should currently be rendered.
    pub fn chrome(&self) -> &C {
        &self.applied
    }

    /// Chrome used while in selection mode.
    pub fn selection_mode_chrome(&self) -> &C {
        &self.selection_mode_chrome
    }

    /// Sets the chrome used in selection mode, applying it right away if the
    /// holder is in selection mode.
    pub fn set_selection_mode_chrome(&mut self, chrome: C) {
        self.selection_mode_chrome = chrome;
        if self.binding.is_selectable() {
            self.refresh_chrome();
        }
    }

    /// Chrome used outside selection mode.
    pub fn default_mode_chrome(&self) -> &C {
        &self.default_mode_chrome
    }

    /// Sets the chrome used outside selection mode, applying it right away if
    /// the holder is not in selection mode.
    pub fn set_default_mode_chrome(&mut self, chrome: C) {
        self.default_mode_chrome = chrome;
        if !self.binding.is_selectable() {
            self.refresh_chrome();
        }
    }

    fn refresh_chrome(&mut self) {
        self.applied = if self.binding.is_selectable() {
            self.selection_mode_chrome.clone()
        } else {
            self.default_mode_chrome.clone()
        };
    }
}

impl<C: Clone> SelectableHolder for SwappingHolder<C> {
    fn position(&self) -> Option<Position> {
        self.binding.position()
    }

    fn item_id(&self) -> ItemId {
        self.binding.item_id()
    }

    fn is_selectable(&self) -> bool {
        self.binding.is_selectable()
    }

    fn set_selectable(&mut self, selectable: bool) {
        let changed = selectable != self.binding.is_selectable();
        self.binding.set_selectable(selectable);

        if changed {
            self.refresh_chrome();
        }
    }

    fn is_activated(&self) -> bool {
        self.binding.is_activated()
    }

    fn set_activated(&mut self, activated: bool) {
        self.binding.set_activated(activated);
    }
}
