//! Device configuration
//!
//! An [`Aw9523Config`] describes a whole expander: bus address, port 0
//! output stage, LED current range and the function of every used pin.
//! With the `serde` feature it can be stored as postcard binary data.

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::pin::{DriveMode, LedCurrent, Pin, PinError, PinMask, PinMode};
use crate::registers::{ADDRESS_RANGE, DEFAULT_ADDRESS};

/// Maximum pin entries per config
pub const MAX_PINS: usize = Pin::COUNT as usize;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Address outside 0x58-0x5B
    InvalidAddress(u8),
    /// Bad pin index
    Pin(PinError),
    /// Same pin listed twice
    DuplicatePin(u8),
    /// More than 16 pin entries
    TooManyPins,
    /// Interrupt requested on a pin that is not an input
    InterruptOnNonInput(u8),
    /// Postcard encode/decode failure
    Encoding,
}

impl From<PinError> for ConfigError {
    fn from(e: PinError) -> Self {
        ConfigError::Pin(e)
    }
}

/// Function and initial state of one pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// Pin (0-15)
    pub pin: Pin,
    /// Input, output or LED
    pub mode: PinMode,
    /// Initial output level (outputs only)
    pub initial_high: bool,
    /// Enable the change interrupt (inputs only)
    pub interrupt: bool,
}

impl PinConfig {
    /// Plain input
    pub const fn input(pin: Pin) -> Self {
        Self {
            pin,
            mode: PinMode::Input,
            initial_high: false,
            interrupt: false,
        }
    }

    /// Output starting at the given level
    pub const fn output(pin: Pin, initial_high: bool) -> Self {
        Self {
            pin,
            mode: PinMode::Output,
            initial_high,
            interrupt: false,
        }
    }

    /// Constant-current LED pin
    pub const fn led(pin: Pin) -> Self {
        Self {
            pin,
            mode: PinMode::Led,
            initial_high: false,
            interrupt: false,
        }
    }

    /// Same pin with its change interrupt enabled
    pub const fn with_interrupt(mut self) -> Self {
        self.interrupt = true;
        self
    }
}

/// Pin list folded into register-shaped masks
///
/// All masks use 1 = "on"; inversion for the active-low registers happens
/// when they are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigMasks {
    /// Pins driven by the chip (outputs and LEDs)
    pub outputs: PinMask,
    /// Pins in LED mode
    pub leds: PinMask,
    /// Output latch levels
    pub levels: PinMask,
    /// Pins with the change interrupt enabled
    pub interrupts: PinMask,
}

/// Full expander configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aw9523Config {
    /// 7-bit I2C address (0x58-0x5B)
    pub address: u8,
    /// Port 0 output stage
    pub port0_drive: DriveMode,
    /// LED current range
    pub led_current: LedCurrent,
    /// Configured pins; unlisted pins stay GPIO inputs with interrupts off
    pub pins: Vec<PinConfig, MAX_PINS>,
}

impl Default for Aw9523Config {
    fn default() -> Self {
        Self::new(DEFAULT_ADDRESS)
    }
}

impl Aw9523Config {
    /// Empty configuration at `address`
    pub const fn new(address: u8) -> Self {
        Self {
            address,
            port0_drive: DriveMode::PushPull,
            led_current: LedCurrent::Max,
            pins: Vec::new(),
        }
    }

    /// Add a pin entry
    pub fn with_pin(mut self, pin: PinConfig) -> Result<Self, ConfigError> {
        self.add_pin(pin)?;
        Ok(self)
    }

    /// Add a pin entry in place
    pub fn add_pin(&mut self, pin: PinConfig) -> Result<(), ConfigError> {
        if self.find(pin.pin).is_some() {
            return Err(ConfigError::DuplicatePin(pin.pin.index()));
        }
        self.pins.push(pin).map_err(|_| ConfigError::TooManyPins)
    }

    /// Look up the entry for a pin
    pub fn find(&self, pin: Pin) -> Option<&PinConfig> {
        self.pins.iter().find(|p| p.pin == pin)
    }

    /// Check the configuration for consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !ADDRESS_RANGE.contains(&self.address) {
            return Err(ConfigError::InvalidAddress(self.address));
        }

        let mut seen = PinMask::EMPTY;
        for entry in &self.pins {
            if seen.contains(entry.pin) {
                return Err(ConfigError::DuplicatePin(entry.pin.index()));
            }
            seen = seen.with(entry.pin);

            if entry.interrupt && entry.mode != PinMode::Input {
                return Err(ConfigError::InterruptOnNonInput(entry.pin.index()));
            }
        }

        Ok(())
    }

    /// Fold the pin list into register masks
    pub fn masks(&self) -> ConfigMasks {
        self.pins
            .iter()
            .fold(ConfigMasks::default(), |mut masks, entry| {
                match entry.mode {
                    PinMode::Input => {}
                    PinMode::Output => masks.outputs = masks.outputs.with(entry.pin),
                    PinMode::Led => {
                        masks.outputs = masks.outputs.with(entry.pin);
                        masks.leds = masks.leds.with(entry.pin);
                    }
                }
                if entry.initial_high {
                    masks.levels = masks.levels.with(entry.pin);
                }
                if entry.interrupt {
                    masks.interrupts = masks.interrupts.with(entry.pin);
                }
                masks
            })
    }

    /// Serialize to postcard bytes, returning the used part of `buf`
    #[cfg(feature = "serde")]
    pub fn to_bytes<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        postcard::to_slice(self, buf).map_err(|_| ConfigError::Encoding)
    }

    /// Deserialize from postcard bytes and validate
    #[cfg(feature = "serde")]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = postcard::from_bytes(bytes).map_err(|_| ConfigError::Encoding)?;
        config.validate()?;
        Ok(config)
    }
}
