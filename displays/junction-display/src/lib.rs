//! Character display abstraction for the Junction controller
//!
//! This crate provides:
//! - `DisplayBackend` trait for character displays (HD44780 and friends)
//! - `Screen` buffer holding the two status rows
//! - `render_status` that formats the controller snapshot onto the screen
//!
//! # Architecture
//!
//! The firmware renders into a `Screen` at the display cadence and pushes
//! only the rows that changed to whichever `DisplayBackend` was found at
//! boot. Display drivers live in `junction-drivers`.

#![no_std]

pub mod backend;
pub mod screen;
pub mod status;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError};
pub use screen::{Screen, SCREEN_COLS, SCREEN_ROWS};
pub use status::render_status;
