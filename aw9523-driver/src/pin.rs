//! Single-pin handles
//!
//! Borrow the driver for one pin so expander pins can be handed to code
//! written against the `embedded-hal` traits.

use embedded_hal::digital::{self, InputPin, OutputPin, StatefulOutputPin};
use embedded_hal::pwm::{self, SetDutyCycle};

use aw9523_core::{Pin, PinMode};
use aw9523_hal::RegisterBus;

use crate::blocking::Aw9523;
use crate::error::Aw9523Error;

/// One GPIO pin of the expander
pub struct ExpanderPin<'a, B> {
    driver: &'a mut Aw9523<B>,
    pin: Pin,
}

impl<'a, B: RegisterBus> ExpanderPin<'a, B> {
    pub(crate) fn new(driver: &'a mut Aw9523<B>, pin: Pin) -> Self {
        Self { driver, pin }
    }

    /// Pin this handle controls
    pub fn pin(&self) -> Pin {
        self.pin
    }

    /// Change the pin's mode
    pub fn set_mode(&mut self, mode: PinMode) -> Result<(), Aw9523Error<B::Error>> {
        self.driver.pin_mode(self.pin.index(), mode)
    }

    /// Enable or disable the change interrupt
    pub fn set_interrupt(&mut self, enabled: bool) -> Result<(), Aw9523Error<B::Error>> {
        self.driver.enable_interrupt(self.pin.index(), enabled)
    }
}

impl<B> digital::ErrorType for ExpanderPin<'_, B>
where
    B: RegisterBus,
    B::Error: core::fmt::Debug,
{
    type Error = Aw9523Error<B::Error>;
}

impl<B> OutputPin for ExpanderPin<'_, B>
where
    B: RegisterBus,
    B::Error: core::fmt::Debug,
{
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.driver.digital_write(self.pin.index(), false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.driver.digital_write(self.pin.index(), true)
    }
}

impl<B> StatefulOutputPin for ExpanderPin<'_, B>
where
    B: RegisterBus,
    B::Error: core::fmt::Debug,
{
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        self.driver.output_level(self.pin.index())
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        self.is_set_high().map(|high| !high)
    }

    fn toggle(&mut self) -> Result<(), Self::Error> {
        self.driver.toggle(self.pin.index())
    }
}

impl<B> InputPin for ExpanderPin<'_, B>
where
    B: RegisterBus,
    B::Error: core::fmt::Debug,
{
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.driver.digital_read(self.pin.index())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

/// One constant-current LED channel
///
/// The duty cycle is the pin's 8-bit DIM value. The pin must already be
/// in LED mode.
pub struct LedChannel<'a, B> {
    driver: &'a mut Aw9523<B>,
    pin: Pin,
}

impl<'a, B: RegisterBus> LedChannel<'a, B> {
    pub(crate) fn new(driver: &'a mut Aw9523<B>, pin: Pin) -> Self {
        Self { driver, pin }
    }

    /// Pin this channel drives
    pub fn pin(&self) -> Pin {
        self.pin
    }

    /// Switch the pin into LED mode
    pub fn enable(&mut self) -> Result<(), Aw9523Error<B::Error>> {
        self.driver.pin_mode(self.pin.index(), PinMode::Led)
    }

    /// Set the raw 8-bit current step
    pub fn set_brightness(&mut self, value: u8) -> Result<(), Aw9523Error<B::Error>> {
        self.driver.analog_write(self.pin.index(), value)
    }
}

impl<B> pwm::ErrorType for LedChannel<'_, B>
where
    B: RegisterBus,
    B::Error: core::fmt::Debug,
{
    type Error = Aw9523Error<B::Error>;
}

impl<B> SetDutyCycle for LedChannel<'_, B>
where
    B: RegisterBus,
    B::Error: core::fmt::Debug,
{
    fn max_duty_cycle(&self) -> u16 {
        u8::MAX as u16
    }

    /// Values above 255 are clamped
    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.set_brightness(duty.min(u8::MAX as u16) as u8)
    }
}
