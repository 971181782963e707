//! Core systems for the active label widget.
//!
//! This crate provides the foundational pieces the widget is built on:
//!
//! - **Signal/Slot System**: observer registration for tap notifications
//! - **Timers**: one-shot timers driven by an explicit clock
//! - **Errors**: the shared [`LabelError`] type
//! - **Logging**: `tracing` targets and performance spans
//!
//! # Signal/Slot Example
//!
//! ```
//! use active_label_core::Signal;
//!
//! let selected = Signal::<String>::new();
//! let conn_id = selected.connect(|text| println!("selected {text}"));
//! selected.emit("#news".to_string());
//! selected.disconnect(conn_id);
//! ```
//!
//! # Timer Example
//!
//! ```
//! use active_label_core::TimerManager;
//! use std::time::{Duration, Instant};
//!
//! let now = Instant::now();
//! let mut timers = TimerManager::new();
//! let id = timers.start_one_shot(now, Duration::from_millis(250), "revert");
//!
//! let fired = timers.process_expired(now + Duration::from_millis(250));
//! assert_eq!(fired, vec![(id, "revert")]);
//! ```

mod error;
pub mod logging;
pub mod signal;
mod timer;

pub use error::{LabelError, Result};
pub use logging::PerfSpan;
pub use signal::{ConnectionId, Signal};
pub use timer::{TimerId, TimerManager};
