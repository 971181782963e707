//! Logging and tracing facilities.
//!
//! The active label crates use the `tracing` crate for instrumentation. To see
//! logs, install a subscriber in the host application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("active_label::selection=debug")
//!     .init();
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Entity registry target.
    pub const REGISTRY: &str = "active_label::registry";
    /// Selection state machine target.
    pub const SELECTION: &str = "active_label::selection";
    /// Styled text composition target.
    pub const COMPOSE: &str = "active_label::compose";
    /// Point and index hit testing target.
    pub const HIT_TEST: &str = "active_label::hit_test";
    /// Timer system target.
    pub const TIMER: &str = "active_label::timer";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "active_label::signal";
    /// Configuration loading target.
    pub const CONFIG: &str = "active_label::config";
}

/// A performance tracing span guard.
///
/// Creates a tracing span that is entered for the guard's lifetime, useful
/// for timing recomposition with a span-aware subscriber.
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: "active_label::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}
