//! Async AW9523 driver
//!
//! Same operations as [`Aw9523`](crate::Aw9523), over an
//! `embedded-hal-async` bus. Every method must be `.await`ed.
//!
//! ```ignore
//! use aw9523_driver::{Aw9523Async, PinMode};
//!
//! let mut gpio = Aw9523Async::new_default(i2c);
//! gpio.begin().await?;
//! gpio.pin_mode(0, PinMode::Output).await?;
//! gpio.digital_write(0, true).await?;
//! ```

use aw9523_core::registers::{
    dim, CHIP_ID, CHIPID, CONFIG, DEFAULT_ADDRESS, GCR, GCR_ISEL, GCR_PORT0_PUSH_PULL, INPUT,
    INTENABLE, LEDMODE, OUTPUT, SOFTRESET, SOFTRESET_VALUE,
};
use aw9523_core::{
    active_low, Aw9523Config, BitField, DriveMode, LedCurrent, Pin, PinMode, Port, RegisterDef,
};
use aw9523_hal::AsyncRegisterBus;

use crate::error::Aw9523Error;
use crate::register::{AsyncRegister, AsyncRegisterBits};

/// Async AW9523 driver
pub struct Aw9523Async<B> {
    bus: B,
    address: u8,
}

impl<B: AsyncRegisterBus> Aw9523Async<B> {
    /// Create a driver for the chip at `address` (0x58-0x5B)
    pub fn new(bus: B, address: u8) -> Self {
        Self { bus, address }
    }

    /// Create a driver at the default address (0x58)
    pub fn new_default(bus: B) -> Self {
        Self::new(bus, DEFAULT_ADDRESS)
    }

    /// Create a driver from a configuration and program it
    pub async fn from_config(
        bus: B,
        config: &Aw9523Config,
    ) -> Result<Self, Aw9523Error<B::Error>> {
        let mut driver = Self::new(bus, config.address);
        driver.apply_config(config).await?;
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

    fn register(&mut self, def: RegisterDef) -> AsyncRegister<'_, B> {
        AsyncRegister::new(&mut self.bus, self.address, def)
    }

    fn pin_bit(&mut self, def: RegisterDef, pin: Pin) -> AsyncRegisterBits<'_, B> {
        self.register(def.for_pin(pin)).bits(BitField::bit(pin.bit()))
    }

    /// Reset the chip and bring it to a known state
    ///
    /// See [`Aw9523::begin`](crate::Aw9523::begin).
    pub async fn begin(&mut self) -> Result<(), Aw9523Error<B::Error>> {
        self.reset().await?;

        let id = self.chip_id().await?;
        if id != CHIP_ID {
            #[cfg(feature = "defmt")]
            defmt::warn!("AW9523 at {=u8:#x}: unexpected chip id {=u8:#x}", self.address, id);
            return Err(Aw9523Error::WrongChipId(id));
        }

        self.configure_direction(0).await?;
        self.open_drain_port0(false).await?;

        #[cfg(feature = "defmt")]
        defmt::debug!("AW9523 at {=u8:#x} ready", self.address);
        Ok(())
    }

    /// Soft reset
    pub async fn reset(&mut self) -> Result<(), Aw9523Error<B::Error>> {
        self.register(SOFTRESET)
            .write(SOFTRESET_VALUE as u16)
            .await
    }

    /// Read the CHIPID register
    pub async fn chip_id(&mut self) -> Result<u8, Aw9523Error<B::Error>> {
        Ok(self.register(CHIPID).read().await? as u8)
    }

    /// Set the output latch of all 16 pins
    pub async fn output_gpio(&mut self, pins: u16) -> Result<(), Aw9523Error<B::Error>> {
        self.register(OUTPUT).write(pins).await
    }

    /// Read back the output latch of all 16 pins
    pub async fn output_state(&mut self) -> Result<u16, Aw9523Error<B::Error>> {
        self.register(OUTPUT).read().await
    }

    /// Read the level of all 16 pins
    pub async fn input_gpio(&mut self) -> Result<u16, Aw9523Error<B::Error>> {
        self.register(INPUT).read().await
    }

    /// Set the direction of all pins; bit = 1 makes the pin an output
    pub async fn configure_direction(&mut self, pins: u16) -> Result<(), Aw9523Error<B::Error>> {
        self.register(CONFIG).write(active_low(pins)).await
    }

    /// Select LED mode for all pins; bit = 1 selects LED mode
    pub async fn configure_led_mode(&mut self, pins: u16) -> Result<(), Aw9523Error<B::Error>> {
        self.register(LEDMODE).write(active_low(pins)).await
    }

    /// Enable change interrupts for all pins; bit = 1 enables
    pub async fn interrupt_enable_gpio(
        &mut self,
        pins: u16,
    ) -> Result<(), Aw9523Error<B::Error>> {
        self.register(INTENABLE).write(active_low(pins)).await
    }

    /// Configure one pin as input, output or LED driver
    pub async fn pin_mode(&mut self, pin: u8, mode: PinMode) -> Result<(), Aw9523Error<B::Error>> {
        let pin = Pin::new(pin)?;
        self.pin_bit(CONFIG, pin).write(mode.config_bit()).await?;
        self.pin_bit(LEDMODE, pin).write(mode.ledmode_bit()).await
    }

    /// Drive one output pin high or low
    pub async fn digital_write(
        &mut self,
        pin: u8,
        high: bool,
    ) -> Result<(), Aw9523Error<B::Error>> {
        let pin = Pin::new(pin)?;
        self.pin_bit(OUTPUT, pin).write(high as u16).await
    }

    /// Read the level of one pin
    pub async fn digital_read(&mut self, pin: u8) -> Result<bool, Aw9523Error<B::Error>> {
        let pin = Pin::new(pin)?;
        Ok(self.pin_bit(INPUT, pin).read().await? != 0)
    }

    /// Read the output latch of one pin
    pub async fn output_level(&mut self, pin: u8) -> Result<bool, Aw9523Error<B::Error>> {
        let pin = Pin::new(pin)?;
        Ok(self.pin_bit(OUTPUT, pin).read().await? != 0)
    }

    /// Invert the output latch of one pin
    pub async fn toggle(&mut self, pin: u8) -> Result<(), Aw9523Error<B::Error>> {
        let pin = Pin::new(pin)?;
        self.pin_bit(OUTPUT, pin).toggle().await
    }

    /// Set the constant current of an LED-mode pin
    pub async fn analog_write(&mut self, pin: u8, value: u8) -> Result<(), Aw9523Error<B::Error>> {
        let pin = Pin::new(pin)?;
        self.register(dim(pin)).write(value as u16).await
    }

    /// Enable or disable the change interrupt of one pin
    pub async fn enable_interrupt(
        &mut self,
        pin: u8,
        enabled: bool,
    ) -> Result<(), Aw9523Error<B::Error>> {
        let pin = Pin::new(pin)?;
        self.pin_bit(INTENABLE, pin).write(!enabled as u16).await
    }

    /// Switch port 0 between open-drain and push-pull
    pub async fn open_drain_port0(
        &mut self,
        open_drain: bool,
    ) -> Result<(), Aw9523Error<B::Error>> {
        self.register(GCR)
            .bits(GCR_PORT0_PUSH_PULL)
            .write(!open_drain as u16)
            .await
    }

    /// Select the LED current range
    pub async fn set_led_current(
        &mut self,
        range: LedCurrent,
    ) -> Result<(), Aw9523Error<B::Error>> {
        self.register(GCR)
            .bits(GCR_ISEL)
            .write(range.isel() as u16)
            .await
    }

    /// Read the LED current range
    pub async fn led_current(&mut self) -> Result<LedCurrent, Aw9523Error<B::Error>> {
        let isel = self.register(GCR).bits(GCR_ISEL).read().await?;
        Ok(LedCurrent::from_isel(isel as u8))
    }

    /// Set the output latch of one port
    pub async fn write_port(&mut self, port: Port, value: u8) -> Result<(), Aw9523Error<B::Error>> {
        self.register(OUTPUT.port(port)).write(value as u16).await
    }

    /// Read the pin levels of one port
    pub async fn read_port(&mut self, port: Port) -> Result<u8, Aw9523Error<B::Error>> {
        Ok(self.register(INPUT.port(port)).read().await? as u8)
    }

    /// Program a whole configuration
    ///
    /// See [`Aw9523::apply_config`](crate::Aw9523::apply_config).
    pub async fn apply_config(
        &mut self,
        config: &Aw9523Config,
    ) -> Result<(), Aw9523Error<B::Error>> {
        config.validate()?;
        let masks = config.masks();

        let push_pull = (config.port0_drive == DriveMode::PushPull) as u16;
        let gcr = GCR_ISEL.insert(
            GCR_PORT0_PUSH_PULL.insert(0, push_pull),
            config.led_current.isel() as u16,
        );
        self.register(GCR).write(gcr).await?;
        self.configure_led_mode(masks.leds.bits()).await?;
        self.output_gpio(masks.levels.bits()).await?;
        self.configure_direction(masks.outputs.bits()).await?;
        self.interrupt_enable_gpio(masks.interrupts.bits()).await?;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "AW9523 at {=u8:#x}: {} pins configured",
            self.address,
            config.pins.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{SimulatedAw9523, Write};
    use aw9523_core::PinConfig;
    use embassy_futures::block_on;

    fn driver() -> Aw9523Async<SimulatedAw9523> {
        Aw9523Async::new_default(SimulatedAw9523::new())
    }

    #[test]
    fn test_begin() {
        let mut dev = driver();
        block_on(dev.begin()).unwrap();

        assert_eq!(dev.bus.writes[0], Write::new(0x7F, 0x00));
        assert_eq!(dev.bus.word(0x04), 0xFFFF);
        assert_eq!(dev.bus.reg(0x11), 0x10);
    }

    #[test]
    fn test_begin_wrong_chip() {
        let mut sim = SimulatedAw9523::new();
        sim.set_reg(0x10, 0x00);
        let mut dev = Aw9523Async::new_default(sim);

        assert_eq!(block_on(dev.begin()), Err(Aw9523Error::WrongChipId(0x00)));
    }

    #[test]
    fn test_output_and_input() {
        let mut dev = driver();
        dev.bus.inputs = 0x1234;

        block_on(dev.output_gpio(0xBEEF)).unwrap();
        assert_eq!(dev.bus.word(0x02), 0xBEEF);
        assert_eq!(block_on(dev.output_state()).unwrap(), 0xBEEF);
        assert_eq!(block_on(dev.input_gpio()).unwrap(), 0x1234);
        assert_eq!(block_on(dev.read_port(Port::Port1)).unwrap(), 0x12);
    }

    #[test]
    fn test_pin_mode_and_digital_io() {
        let mut dev = driver();
        dev.bus.set_word(0x04, 0xFFFF);

        block_on(dev.pin_mode(2, PinMode::Output)).unwrap();
        block_on(dev.digital_write(2, true)).unwrap();

        assert_eq!(dev.bus.word(0x04), 0xFFFB);
        assert_eq!(dev.bus.reg(0x02), 0b0000_0100);
        assert!(block_on(dev.output_level(2)).unwrap());

        block_on(dev.toggle(2)).unwrap();
        assert_eq!(dev.bus.reg(0x02), 0);

        dev.bus.inputs = 1 << 13;
        assert!(block_on(dev.digital_read(13)).unwrap());
    }

    #[test]
    fn test_led_dimming() {
        let mut dev = driver();

        block_on(dev.pin_mode(11, PinMode::Led)).unwrap();
        block_on(dev.analog_write(11, 200)).unwrap();
        block_on(dev.set_led_current(LedCurrent::Half)).unwrap();

        assert_eq!(dev.bus.word(0x12) & (1 << 11), 0);
        assert_eq!(dev.bus.reg(0x23), 200);
        assert_eq!(block_on(dev.led_current()).unwrap(), LedCurrent::Half);
    }

    #[test]
    fn test_interrupts_and_open_drain() {
        let mut dev = driver();
        dev.bus.set_word(0x06, 0xFFFF);

        block_on(dev.enable_interrupt(15, true)).unwrap();
        block_on(dev.interrupt_enable_gpio(0x0003)).unwrap();
        assert_eq!(dev.bus.word(0x06), 0xFFFC);

        dev.bus.set_reg(0x11, 0x10);
        block_on(dev.open_drain_port0(true)).unwrap();
        assert_eq!(dev.bus.reg(0x11), 0x00);
    }

    #[test]
    fn test_invalid_pin() {
        let mut dev = driver();
        assert_eq!(
            block_on(dev.digital_write(16, true)),
            Err(Aw9523Error::InvalidPin(16))
        );
        assert_eq!(block_on(dev.analog_write(20, 0)), Err(Aw9523Error::InvalidPin(20)));
        assert_eq!(dev.bus.transactions, 0);
    }

    #[test]
    fn test_from_config() {
        let config = Aw9523Config::new(0x58)
            .with_pin(PinConfig::output(Pin::new(4).unwrap(), true))
            .unwrap();

        let dev = block_on(Aw9523Async::from_config(SimulatedAw9523::new(), &config)).unwrap();

        assert_eq!(dev.bus.word(0x02), 0x0010);
        assert_eq!(dev.bus.word(0x04), !0x0010);
        assert_eq!(dev.bus.word(0x12), 0xFFFF);
        let sim = dev.release();
        assert_eq!(sim.writes.len(), 9);
    }
}
