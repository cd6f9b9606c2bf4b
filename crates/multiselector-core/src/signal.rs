//! Signal/slot notifications for multiselector.
//!
//! A [`Signal<Args>`] holds any number of connected slots (closures) and
//! invokes all of them, synchronously and in the calling thread, every time
//! it is emitted. The selection engine uses signals to report selection and
//! mode changes to the host without coupling it to a particular UI toolkit.
//!
//! Signals live on the thread that owns the list, so slots may capture
//! `Rc` state such as the host's own holders.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - The signal type
//! - [`ConnectionId`] - Identifier returned when connecting a slot
//!
//! # Example
//!
//! ```
//! use multiselector_core::Signal;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let selectable_changed = Signal::<bool>::new();
//! let toggles = Rc::new(Cell::new(0));
//!
//! let toggles_clone = toggles.clone();
//! let conn_id = selectable_changed.connect(move |_| {
//!     toggles_clone.set(toggles_clone.get() + 1);
//! });
//!
//! selectable_changed.emit(true);
//! selectable_changed.disconnect(conn_id);
//! selectable_changed.emit(false);
//! assert_eq!(toggles.get(), 1);
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use slotmap::{SlotMap, new_key_type};

use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via [`Signal::disconnect`].
    /// The ID stays valid until the connection is disconnected or the signal
    /// is dropped.
    pub struct ConnectionId;
}

type Slot<Args> = Rc<dyn Fn(&Args)>;

/// A type-safe signal that can have multiple connected slots.
///
/// Emission is always direct: every slot runs before [`emit`](Self::emit)
/// returns. Slots are snapshotted before they run, so a slot may connect or
/// disconnect slots on the same signal; such changes take effect from the
/// next emission.
///
/// # Type Parameter
///
/// - `Args`: The argument type passed to slots. Use `()` for signals without
///   arguments, or a tuple for several values.
pub struct Signal<Args> {
    /// All active connections.
    connections: RefCell<SlotMap<ConnectionId, Slot<Args>>>,
    /// Whether emission is temporarily blocked.
    blocked: Cell<bool>,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: RefCell::new(SlotMap::with_key()),
            blocked: Cell::new(false),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a `ConnectionId` that can be used to disconnect the slot later.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + 'static,
    {
        self.connections.borrow_mut().insert(Rc::new(slot))
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.borrow_mut().remove(id).is_some()
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.connections.borrow_mut().clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.borrow().len()
    }

    /// Block signal emission temporarily.
    ///
    /// While blocked, calls to `emit()` do nothing. Useful during batch
    /// updates to suppress intermediate notifications.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.set(blocked);
    }

    /// Check if signal emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.get()
    }

    /// Emit the signal, invoking all connected slots in connection order.
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: targets::SIGNAL, "signal blocked, skipping emit");
            return;
        }

        let slots: Vec<Slot<Args>> = self.connections.borrow().values().cloned().collect();
        tracing::trace!(target: targets::SIGNAL, connection_count = slots.len(), "emitting signal");

        for slot in slots {
            slot(&args);
        }
    }
}

static_assertions::assert_not_impl_any!(Signal<(Vec<usize>, Vec<usize>)>: Send, Sync);
