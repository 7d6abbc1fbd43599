//! Bus-agnostic core of the AW9523 driver
//!
//! Everything here is pure: no I/O and no bus types.
//!
//! - Register map and LED dimming address arithmetic
//! - Pin, port and mode types
//! - Bit-field views and active-low helpers
//! - Device configuration

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod field;
pub mod pin;
pub mod registers;

pub use config::{Aw9523Config, ConfigError, PinConfig};
pub use field::{active_low, BitField, RegisterDef};
pub use pin::{DriveMode, LedCurrent, Pin, PinError, PinMask, PinMode, Port};
