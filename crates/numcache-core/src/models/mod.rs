//! Data models for the number windows.
//!
//! - `Category`: the four number kinds and their request codes
//! - `Window`: the bounded, deduplicated sequence kept per category
//! - `WindowSnapshot`: what one update reports back to the caller

pub mod category;
pub mod window;

pub use category::Category;
pub use window::{average, Window, WindowSnapshot};
