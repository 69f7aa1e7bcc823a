//! Controller configuration
//!
//! `controller.toml` is validated and postcard-encoded by the build script;
//! the encoded blob is linked into the image and decoded at boot.

mod loader;

pub use loader::{load_config, LoadError};
