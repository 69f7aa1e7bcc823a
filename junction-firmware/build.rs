//! Build script for junction-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates controller.toml and encodes it for the firmware image

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use junction_core::config::{ConfigError, ControllerConfig};

fn main() {
    setup_linker();
    encode_config();
}

/// Set up linker search paths and scripts
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Parse, validate and postcard-encode controller.toml
fn encode_config() {
    println!("cargo:rerun-if-changed=controller.toml");

    let config_path = Path::new("controller.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: controller.toml not found!                               ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a controller.toml configuration file.     ║\n\
            ║  Please create one in the junction-firmware directory.           ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read controller.toml                           ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: ControllerConfig = match toml::from_str(&config_content) {
        Ok(config) => config,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid controller.toml                                  ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    if let Err(e) = config.validate() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid controller configuration                         ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            format_error_lines(&describe(e))
        );
    }

    let bytes = match postcard::to_allocvec(&config) {
        Ok(bytes) => bytes,
        Err(e) => panic!("Failed to encode controller config: {}", e),
    };

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("controller.bin"), bytes).unwrap();

    println!("cargo:warning=controller.toml validated successfully");
}

/// Human-readable message for a validation failure
fn describe(error: ConfigError) -> String {
    match error {
        ConfigError::VersionMismatch(found) => {
            format!("version = {} is not supported by this firmware", found)
        }
        ConfigError::InvalidPhaseLimits(phase) => format!(
            "{:?}: min_green_periods must be at least 1 and not exceed max_green_periods",
            phase
        ),
        ConfigError::InvalidPeriodRange => {
            "[timing.period] needs 0 < min_ms <= max_ms and a non-zero adc_max".to_string()
        }
        ConfigError::InvalidHazardHold => "[timing] hazard_hold_ms must be non-zero".to_string(),
        ConfigError::ZeroInterval => "[tasks] intervals must all be non-zero".to_string(),
        ConfigError::NoDisplayAddress => "[display] needs at least one address".to_string(),
    }
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
