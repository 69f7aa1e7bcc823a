//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in junction-core and junction-display for the controller board:
//!
//! - MCP23S17 SPI port expander (sensor inputs, lamp banks)
//! - Expander-backed sensor bus and lamp output
//! - HD44780 character LCD behind a PCF8574 I2C backpack
//! - GPIO buzzer

#![no_std]
#![deny(unsafe_code)]

pub mod buzzer;
pub mod expander;
pub mod io;
pub mod lcd;
