//! Logging facilities for multiselector.
//!
//! multiselector uses the `tracing` crate for instrumentation. Library code
//! never installs a subscriber; to see logs, install one in the host:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("multiselector=debug")
//!     .init();
//! ```
//!
//! Use the constants in [`targets`] to filter by subsystem.

/// Span names used throughout multiselector.
pub mod span_names {
    /// Bulk holder refresh span.
    pub const REFRESH: &str = "multiselector::refresh";
    /// Saved state restore span.
    pub const RESTORE: &str = "multiselector::restore";
    /// Select-all span.
    pub const SELECT_ALL: &str = "multiselector::select_all";
}

/// Target names for log filtering.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "multiselector_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "multiselector_core::signal";
    /// Property system target.
    pub const PROPERTY: &str = "multiselector_core::property";
    /// Holder tracker target.
    pub const TRACKER: &str = "multiselector::tracker";
    /// Selection engine target.
    pub const SELECTOR: &str = "multiselector::selector";
    /// Selection session target.
    pub const SESSION: &str = "multiselector::session";
    /// Configuration loading target.
    pub const CONFIG: &str = "multiselector::config";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Wraps bulk operations so their duration shows up in span-aware
/// subscribers.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: "multiselector::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}
