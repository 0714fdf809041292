//! In-memory sliding-window cache.
//!
//! This module provides the `WindowCache`, which keeps one bounded,
//! deduplicated window of numbers per category and refreshes it from the
//! upstream number endpoints. Nothing is persisted across restarts.

pub mod manager;

pub use manager::WindowCache;
