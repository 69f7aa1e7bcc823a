//! SPI port expanders

pub mod mcp23s17;

pub use mcp23s17::{ExpanderError, Mcp23s17};
