//! Junction Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits the signal controller
//! drivers are written against. Chip-specific HALs (currently RP2040)
//! implement them, so the same driver code runs on any supported board.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  junction-drivers / junction-firmware   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  junction-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ junction-hal- │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Lamp outputs, sensor and hazard inputs
//! - [`i2c::I2cBus`] - Status LCD backpack
//! - [`spi::SpiBus`] - Port expander carrying sensors and lamp banks
//! - [`delay::DelayUs`] - Settle times during LCD initialisation

#![no_std]
#![deny(unsafe_code)]

pub mod delay;
pub mod gpio;
pub mod i2c;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use delay::DelayUs;
pub use gpio::{ActiveLevel, InputPin, OutputPin};
pub use i2c::I2cBus;
pub use spi::SpiBus;
