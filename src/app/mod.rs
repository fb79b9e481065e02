//! Application layer: the State Store and everything that drives it.
//!
//! # Architecture
//!
//! ```text
//! Host command → handler → StateStore mutation → persist
//!                                   │
//!                                   ├─→ exclusions (recompute + write)
//!                                   └─→ notify → DecorationProvider → host refresh
//! ```
//!
//! # Modules
//!
//! - [`exclusions`]: the two-phase exclusion computation
//! - [`handler`]: host command ids and dispatch
//! - [`modes`]: hide/focus mode flags
//! - [`notify`]: change notifications
//! - [`state`]: the State Store

pub mod exclusions;
pub mod handler;
pub mod modes;
pub mod notify;
pub mod state;

pub use exclusions::Recomputation;
pub use handler::{handle_command, Command};
pub use modes::{Mode, Modes};
pub use notify::{Notification, Notifier};
pub use state::{Outcome, StateStore};
