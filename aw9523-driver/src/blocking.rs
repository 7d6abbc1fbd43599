//! Blocking AW9523 driver
//!
//! Pin-level operations validate the pin number before touching the bus
//! and only access the 8-bit register of the pin's port. Port-wide
//! operations move all 16 pins in one two-byte transfer.

use aw9523_core::registers::{
    dim, CHIP_ID, CHIPID, CONFIG, DEFAULT_ADDRESS, GCR, GCR_ISEL, GCR_PORT0_PUSH_PULL,
    INPUT, INTENABLE, LEDMODE, OUTPUT, SOFTRESET, SOFTRESET_VALUE,
};
use aw9523_core::{
    active_low, Aw9523Config, BitField, DriveMode, LedCurrent, Pin, PinMode, Port, RegisterDef,
};
use aw9523_hal::RegisterBus;

use crate::error::Aw9523Error;
use crate::pin::{ExpanderPin, LedChannel};
use crate::register::{Register, RegisterBits};

/// Blocking AW9523 driver
///
/// Owns the bus; use [`release`](Self::release) to get it back.
pub struct Aw9523<B> {
    bus: B,
    address: u8,
}

impl<B: RegisterBus> Aw9523<B> {
    /// Create a driver for the chip at `address` (0x58-0x5B)
    ///
    /// No bus traffic happens until the first operation.
    pub fn new(bus: B, address: u8) -> Self {
        Self { bus, address }
    }

    /// Create a driver at the default address (0x58)
    pub fn new_default(bus: B) -> Self {
        Self::new(bus, DEFAULT_ADDRESS)
    }

    /// Create a driver from a configuration and program it
    pub fn from_config(bus: B, config: &Aw9523Config) -> Result<Self, Aw9523Error<B::Error>> {
        let mut driver = Self::new(bus, config.address);
        driver.apply_config(config)?;
        Ok(driver)
    }

    /// I2C address of the chip
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Consume the driver and return the bus
    pub fn release(self) -> B {
        self.bus
    }

    fn register(&mut self, def: RegisterDef) -> Register<'_, B> {
        Register::new(&mut self.bus, self.address, def)
    }

    fn pin_bit(&mut self, def: RegisterDef, pin: Pin) -> RegisterBits<'_, B> {
        self.register(def.for_pin(pin)).bits(BitField::bit(pin.bit()))
    }

    /// Reset the chip and bring it to a known state
    ///
    /// Soft-resets, checks the chip ID, makes every pin an input and puts
    /// port 0 in push-pull mode.
    ///
    /// # Errors
    /// `WrongChipId` if something other than an AW9523 answers.
    pub fn begin(&mut self) -> Result<(), Aw9523Error<B::Error>> {
        self.reset()?;

        let id = self.chip_id()?;
        if id != CHIP_ID {
            #[cfg(feature = "defmt")]
            defmt::warn!("AW9523 at {=u8:#x}: unexpected chip id {=u8:#x}", self.address, id);
            return Err(Aw9523Error::WrongChipId(id));
        }

        self.configure_direction(0)?;
        self.open_drain_port0(false)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("AW9523 at {=u8:#x} ready", self.address);
        Ok(())
    }

    /// Soft reset: every register returns to its power-on value
    pub fn reset(&mut self) -> Result<(), Aw9523Error<B::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("AW9523 at {=u8:#x}: soft reset", self.address);
        self.register(SOFTRESET).write(SOFTRESET_VALUE as u16)
    }

    /// Read the CHIPID register (0x23 on a genuine part)
    pub fn chip_id(&mut self) -> Result<u8, Aw9523Error<B::Error>> {
        Ok(self.register(CHIPID).read()? as u8)
    }

    /// Set the output latch of all 16 pins (bit n = pin n)
    pub fn output_gpio(&mut self, pins: u16) -> Result<(), Aw9523Error<B::Error>> {
        self.register(OUTPUT).write(pins)
    }

    /// Read back the output latch of all 16 pins
    pub fn output_state(&mut self) -> Result<u16, Aw9523Error<B::Error>> {
        self.register(OUTPUT).read()
    }

    /// Read the level of all 16 pins
    ///
    /// Reading the input registers also clears a pending interrupt.
    pub fn input_gpio(&mut self) -> Result<u16, Aw9523Error<B::Error>> {
        self.register(INPUT).read()
    }

    /// Set the direction of all pins; bit = 1 makes the pin an output
    pub fn configure_direction(&mut self, pins: u16) -> Result<(), Aw9523Error<B::Error>> {
        self.register(CONFIG).write(active_low(pins))
    }

    /// Select LED mode for all pins; bit = 1 routes the pin to its DIM register
    pub fn configure_led_mode(&mut self, pins: u16) -> Result<(), Aw9523Error<B::Error>> {
        self.register(LEDMODE).write(active_low(pins))
    }

    /// Enable change interrupts for all pins; bit = 1 enables
    pub fn interrupt_enable_gpio(&mut self, pins: u16) -> Result<(), Aw9523Error<B::Error>> {
        self.register(INTENABLE).write(active_low(pins))
    }

    /// Configure one pin as input, output or LED driver
    pub fn pin_mode(&mut self, pin: u8, mode: PinMode) -> Result<(), Aw9523Error<B::Error>> {
        let pin = Pin::new(pin)?;
        self.pin_bit(CONFIG, pin).write(mode.config_bit())?;
        self.pin_bit(LEDMODE, pin).write(mode.ledmode_bit())
    }

    /// Drive one output pin high or low
    pub fn digital_write(&mut self, pin: u8, high: bool) -> Result<(), Aw9523Error<B::Error>> {
        let pin = Pin::new(pin)?;
        self.pin_bit(OUTPUT, pin).write(high as u16)
    }

    /// Read the level of one pin
    pub fn digital_read(&mut self, pin: u8) -> Result<bool, Aw9523Error<B::Error>> {
        let pin = Pin::new(pin)?;
        Ok(self.pin_bit(INPUT, pin).read()? != 0)
    }

    /// Read the output latch of one pin
    pub fn output_level(&mut self, pin: u8) -> Result<bool, Aw9523Error<B::Error>> {
        let pin = Pin::new(pin)?;
        Ok(self.pin_bit(OUTPUT, pin).read()? != 0)
    }

    /// Invert the output latch of one pin
    pub fn toggle(&mut self, pin: u8) -> Result<(), Aw9523Error<B::Error>> {
        let pin = Pin::new(pin)?;
        self.pin_bit(OUTPUT, pin).toggle()
    }

    /// Set the constant current of an LED-mode pin (0 = off, 255 = I_max)
    pub fn analog_write(&mut self, pin: u8, value: u8) -> Result<(), Aw9523Error<B::Error>> {
        let pin = Pin::new(pin)?;
        self.register(dim(pin)).write(value as u16)
    }

    /// Enable or disable the change interrupt of one pin
    pub fn enable_interrupt(
        &mut self,
        pin: u8,
        enabled: bool,
    ) -> Result<(), Aw9523Error<B::Error>> {
        let pin = Pin::new(pin)?;
        self.pin_bit(INTENABLE, pin).write(!enabled as u16)
    }

    /// Switch port 0 between open-drain and push-pull
    ///
    /// Port 1 is always push-pull.
    pub fn open_drain_port0(&mut self, open_drain: bool) -> Result<(), Aw9523Error<B::Error>> {
        self.register(GCR)
            .bits(GCR_PORT0_PUSH_PULL)
            .write(!open_drain as u16)
    }

    /// Select the LED current range
    pub fn set_led_current(&mut self, range: LedCurrent) -> Result<(), Aw9523Error<B::Error>> {
        self.register(GCR).bits(GCR_ISEL).write(range.isel() as u16)
    }

    /// Read the LED current range
    pub fn led_current(&mut self) -> Result<LedCurrent, Aw9523Error<B::Error>> {
        let isel = self.register(GCR).bits(GCR_ISEL).read()?;
        Ok(LedCurrent::from_isel(isel as u8))
    }

    /// Set the output latch of one port
    pub fn write_port(&mut self, port: Port, value: u8) -> Result<(), Aw9523Error<B::Error>> {
        self.register(OUTPUT.port(port)).write(value as u16)
    }

    /// Read the pin levels of one port
    pub fn read_port(&mut self, port: Port) -> Result<u8, Aw9523Error<B::Error>> {
        Ok(self.register(INPUT.port(port)).read()? as u8)
    }

    /// Program a whole configuration
    ///
    /// The driver keeps its own address; `config.address` is only used by
    /// [`from_config`](Self::from_config). Writes GCR, LEDMODE, OUTPUT,
    /// CONFIG and INTENABLE in that order so outputs come up at their
    /// initial level.
    pub fn apply_config(&mut self, config: &Aw9523Config) -> Result<(), Aw9523Error<B::Error>> {
        config.validate()?;
        let masks = config.masks();

        let push_pull = (config.port0_drive == DriveMode::PushPull) as u16;
        let gcr = GCR_ISEL.insert(
            GCR_PORT0_PUSH_PULL.insert(0, push_pull),
            config.led_current.isel() as u16,
        );
        self.register(GCR).write(gcr)?;
        self.configure_led_mode(masks.leds.bits())?;
        self.output_gpio(masks.levels.bits())?;
        self.configure_direction(masks.outputs.bits())?;
        self.interrupt_enable_gpio(masks.interrupts.bits())?;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "AW9523 at {=u8:#x}: {} pins configured",
            self.address,
            config.pins.len()
        );
        Ok(())
    }

    /// Handle for one pin implementing the `embedded-hal` digital traits
    pub fn pin(&mut self, pin: u8) -> Result<ExpanderPin<'_, B>, Aw9523Error<B::Error>> {
        Ok(ExpanderPin::new(self, Pin::new(pin)?))
    }

    /// Handle for one LED pin implementing `embedded-hal` `SetDutyCycle`
    pub fn led(&mut self, pin: u8) -> Result<LedChannel<'_, B>, Aw9523Error<B::Error>> {
        Ok(LedChannel::new(self, Pin::new(pin)?))
    }

    /// Raw access to any register, for parts of the chip without a method
    pub fn register_raw(&mut self, address: u8) -> Register<'_, B> {
        self.register(RegisterDef::byte(address))
    }
}
