//! Core primitives for multiselector.
//!
//! This crate provides the small reactive building blocks the selection
//! engine is built on:
//!
//! - **Signal/Slot System**: Synchronous, type-safe change notification
//! - **Property System**: Values that report whether a write changed them
//! - **Logging**: `tracing` targets, span names and a span guard
//!
//! # Example
//!
//! ```
//! use multiselector_core::{Property, Signal};
//!
//! let selectable = Property::new(false);
//! let selectable_changed = Signal::<bool>::new();
//!
//! selectable_changed.connect(|on| println!("selection mode: {on}"));
//!
//! if selectable.set(true) {
//!     selectable_changed.emit(true);
//! }
//! ```

pub mod logging;
pub mod property;
pub mod signal;

pub use logging::PerfSpan;
pub use property::Property;
pub use signal::{ConnectionId, Signal};
