//! Presentation layer: tree decorations and the status view.
//!
//! ```text
//! StateStore → DecorationProvider → (badge, tooltip) per path
//! StateStore → StatusViewModel → render_status → text
//! ```
//!
//! # Modules
//!
//! - [`decoration`]: the Decoration Adapter
//! - [`viewmodel`]: status view model
//! - [`renderer`]: plain-text rendering

pub mod decoration;
pub mod renderer;
pub mod viewmodel;

pub use decoration::{DecorationProvider, RefreshScope};
pub use renderer::render_status;
pub use viewmodel::{MarkedItem, StatusViewModel};
