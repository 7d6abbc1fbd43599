//! AW9523 GPIO expander driver
//!
//! The AW9523 is a 16-pin I2C GPIO expander whose pins can also sink a
//! 256-step constant current for driving LEDs. Every operation maps onto
//! one register access (or one read-modify-write of a bit field):
//!
//! - [`Aw9523`] - blocking driver over any `embedded-hal` I2C bus
//! - [`Aw9523Async`] - async driver over any `embedded-hal-async` I2C bus
//! - [`ExpanderPin`], [`LedChannel`] - single-pin handles implementing the
//!   `embedded-hal` digital and PWM traits
//!
//! ```ignore
//! use aw9523_driver::{Aw9523, PinMode};
//!
//! let mut gpio = Aw9523::new_default(i2c);
//! gpio.begin()?;
//! gpio.pin_mode(0, PinMode::Output)?;
//! gpio.digital_write(0, true)?;
//! gpio.pin_mode(8, PinMode::Led)?;
//! gpio.analog_write(8, 128)?;
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod asynch;
pub mod blocking;
pub mod error;
pub mod pin;
pub mod register;

#[cfg(test)]
mod mock;

pub use asynch::Aw9523Async;
pub use blocking::Aw9523;
pub use error::Aw9523Error;
pub use pin::{ExpanderPin, LedChannel};

pub use aw9523_core::registers::{CHIP_ID, DEFAULT_ADDRESS};
pub use aw9523_core::{
    Aw9523Config, DriveMode, LedCurrent, Pin, PinConfig, PinMask, PinMode, Port,
};
pub use aw9523_hal::{AsyncRegisterBus, RegisterBus};
