//! Short-lived register accessors
//!
//! A driver method builds a [`Register`] for one fixed address, optionally
//! narrows it to a [`RegisterBits`] view, and performs a single access. The
//! accessor only borrows the bus; nothing is cached between calls.

use aw9523_core::{BitField, RegisterDef};
use aw9523_hal::{AsyncRegisterBus, RegisterBus};

use crate::error::Aw9523Error;

/// Blocking accessor for one register
pub struct Register<'a, B> {
    bus: &'a mut B,
    device: u8,
    def: RegisterDef,
}

impl<'a, B: RegisterBus> Register<'a, B> {
    /// Accessor for `def` on the device at `device`
    pub fn new(bus: &'a mut B, device: u8, def: RegisterDef) -> Self {
        Self { bus, device, def }
    }

    /// Read the whole register
    pub fn read(&mut self) -> Result<u16, Aw9523Error<B::Error>> {
        let mut buf = [0u8; 2];
        let buf = &mut buf[..self.def.size()];
        self.bus
            .read_registers(self.device, self.def.address, buf)
            .map_err(Aw9523Error::Bus)?;
        Ok(self.def.from_bytes(buf))
    }

    /// Write the whole register
    pub fn write(&mut self, value: u16) -> Result<(), Aw9523Error<B::Error>> {
        let bytes = self.def.to_bytes(value);
        self.bus
            .write_registers(self.device, self.def.address, &bytes[..self.def.size()])
            .map_err(Aw9523Error::Bus)
    }

    /// Narrow to a bit field
    pub fn bits(self, field: BitField) -> RegisterBits<'a, B> {
        RegisterBits {
            register: self,
            field,
        }
    }
}

/// Blocking view of a bit field inside one register
pub struct RegisterBits<'a, B> {
    register: Register<'a, B>,
    field: BitField,
}

impl<B: RegisterBus> RegisterBits<'_, B> {
    /// Read the field
    pub fn read(&mut self) -> Result<u16, Aw9523Error<B::Error>> {
        let value = self.register.read()?;
        Ok(self.field.extract(value))
    }

    /// Replace the field, keeping the other bits of the register
    pub fn write(&mut self, field_value: u16) -> Result<(), Aw9523Error<B::Error>> {
        let current = self.register.read()?;
        self.register.write(self.field.insert(current, field_value))
    }

    /// Invert every bit of the field
    pub fn toggle(&mut self) -> Result<(), Aw9523Error<B::Error>> {
        let current = self.register.read()?;
        self.register.write(current ^ self.field.mask())
    }
}

/// Async accessor for one register
pub struct AsyncRegister<'a, B> {
    bus: &'a mut B,
    device: u8,
    def: RegisterDef,
}

impl<'a, B: AsyncRegisterBus> AsyncRegister<'a, B> {
    /// Accessor for `def` on the device at `device`
    pub fn new(bus: &'a mut B, device: u8, def: RegisterDef) -> Self {
        Self { bus, device, def }
    }

    /// Read the whole register
    pub async fn read(&mut self) -> Result<u16, Aw9523Error<B::Error>> {
        let mut buf = [0u8; 2];
        let buf = &mut buf[..self.def.size()];
        self.bus
            .read_registers(self.device, self.def.address, buf)
            .await
            .map_err(Aw9523Error::Bus)?;
        Ok(self.def.from_bytes(buf))
    }

    /// Write the whole register
    pub async fn write(&mut self, value: u16) -> Result<(), Aw9523Error<B::Error>> {
        let bytes = self.def.to_bytes(value);
        self.bus
            .write_registers(self.device, self.def.address, &bytes[..self.def.size()])
            .await
            .map_err(Aw9523Error::Bus)
    }

    /// Narrow to a bit field
    pub fn bits(self, field: BitField) -> AsyncRegisterBits<'a, B> {
        AsyncRegisterBits {
            register: self,
            field,
        }
    }
}

/// Async view of a bit field inside one register
pub struct AsyncRegisterBits<'a, B> {
    register: AsyncRegister<'a, B>,
    field: BitField,
}

impl<B: AsyncRegisterBus> AsyncRegisterBits<'_, B> {
    /// Read the field
    pub async fn read(&mut self) -> Result<u16, Aw9523Error<B::Error>> {
        let value = self.register.read().await?;
        Ok(self.field.extract(value))
    }

    /// Replace the field, keeping the other bits of the register
    pub async fn write(&mut self, field_value: u16) -> Result<(), Aw9523Error<B::Error>> {
        let current = self.register.read().await?;
        self.register
            .write(self.field.insert(current, field_value))
            .await
    }

    /// Invert every bit of the field
    pub async fn toggle(&mut self) -> Result<(), Aw9523Error<B::Error>> {
        let current = self.register.read().await?;
        self.register.write(current ^ self.field.mask()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{SimulatedAw9523, Write};
    use aw9523_core::registers;

    #[test]
    fn test_word_register_write_is_one_transfer() {
        let mut sim = SimulatedAw9523::new();
        Register::new(&mut sim, 0x58, registers::OUTPUT)
            .write(0xA55A)
            .unwrap();

        assert_eq!(sim.transactions, 1);
        assert_eq!(
            sim.writes.as_slice(),
            &[Write::new(0x02, 0x5A), Write::new(0x03, 0xA5)]
        );
    }

    #[test]
    fn test_byte_register_read() {
        let mut sim = SimulatedAw9523::new();
        let id = Register::new(&mut sim, 0x58, registers::CHIPID)
            .read()
            .unwrap();
        assert_eq!(id, 0x23);
    }

    #[test]
    fn test_bits_write_preserves_neighbours() {
        let mut sim = SimulatedAw9523::new();
        sim.set_reg(0x11, 0b0000_0011);

        Register::new(&mut sim, 0x58, registers::GCR)
            .bits(registers::GCR_PORT0_PUSH_PULL)
            .write(1)
            .unwrap();

        assert_eq!(sim.reg(0x11), 0b0001_0011);
    }

    #[test]
    fn test_bits_toggle() {
        let mut sim = SimulatedAw9523::new();
        sim.set_reg(0x02, 0b1000_0001);

        let mut bits = Register::new(&mut sim, 0x58, registers::OUTPUT.port(aw9523_core::Port::Port0))
            .bits(BitField::bit(0));
        bits.toggle().unwrap();
        assert_eq!(bits.read().unwrap(), 0);

        assert_eq!(sim.reg(0x02), 0b1000_0000);
    }

    #[test]
    fn test_bus_error_wrapped() {
        let mut sim = SimulatedAw9523::new();
        let result = Register::new(&mut sim, 0x20, registers::CHIPID).read();
        assert!(matches!(result, Err(Aw9523Error::Bus(_))));
    }

    #[test]
    fn test_async_bits_write() {
        let mut sim = SimulatedAw9523::new();
        sim.set_reg(0x11, 0b0001_0000);

        embassy_futures::block_on(
            AsyncRegister::new(&mut sim, 0x58, registers::GCR)
                .bits(registers::GCR_ISEL)
                .write(0b11),
        )
        .unwrap();

        assert_eq!(sim.reg(0x11), 0b0001_0011);
    }
}
