//! Embedded configuration loader

use defmt::*;

use junction_core::config::{ConfigError, ControllerConfig};

/// Configuration encoded by build.rs from controller.toml
static EMBEDDED_CONFIG: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/controller.bin"));

/// Configuration load errors
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoadError {
    /// Blob is not a valid postcard encoding
    Deserialize,
    /// Decoded config failed validation
    Invalid(ConfigError),
}

impl From<ConfigError> for LoadError {
    fn from(e: ConfigError) -> Self {
        LoadError::Invalid(e)
    }
}

fn decode(bytes: &[u8]) -> Result<ControllerConfig, LoadError> {
    let config: ControllerConfig =
        postcard::from_bytes(bytes).map_err(|_| LoadError::Deserialize)?;
    config.validate()?;
    Ok(config)
}

/// Load the embedded configuration, falling back to defaults
pub fn load_config() -> ControllerConfig {
    match decode(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Loaded embedded configuration ({} bytes)", EMBEDDED_CONFIG.len());
            config
        }
        Err(e) => {
            error!("Embedded configuration rejected: {:?}", e);
            error!("Using default configuration");
            ControllerConfig::default()
        }
    }
}
