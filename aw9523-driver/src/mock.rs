//! Simulated AW9523 for tests
//!
//! Models the register file behind an I2C address: pointer auto-increment,
//! read-only input/ID registers, soft reset and the power-on defaults.
//! Every byte written to a register is logged in order.

use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};
use heapless::Vec;

/// One byte written to one register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Write {
    pub register: u8,
    pub value: u8,
}

impl Write {
    pub const fn new(register: u8, value: u8) -> Self {
        Self { register, value }
    }
}

pub struct SimulatedAw9523 {
    /// Address the chip answers on
    pub address: u8,
    regs: [u8; 256],
    /// Pin levels seen by INPUT0/INPUT1
    pub inputs: u16,
    /// Register writes in bus order
    pub writes: Vec<Write, 64>,
    /// Completed transactions
    pub transactions: usize,
    /// Fail every transfer with a bus error
    pub fail: bool,
}

impl SimulatedAw9523 {
    pub fn new() -> Self {
        Self {
            address: 0x58,
            regs: Self::power_on(),
            inputs: 0,
            writes: Vec::new(),
            transactions: 0,
            fail: false,
        }
    }

    fn power_on() -> [u8; 256] {
        let mut regs = [0u8; 256];
        regs[0x10] = 0x23;
        // All pins GPIO, everything else zero
        regs[0x12] = 0xFF;
        regs[0x13] = 0xFF;
        regs
    }

    pub fn reg(&self, register: u8) -> u8 {
        self.regs[register as usize]
    }

    pub fn word(&self, register: u8) -> u16 {
        u16::from_le_bytes([self.reg(register), self.reg(register.wrapping_add(1))])
    }

    pub fn set_reg(&mut self, register: u8, value: u8) {
        self.regs[register as usize] = value;
    }

    pub fn set_word(&mut self, register: u8, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.set_reg(register, lo);
        self.set_reg(register.wrapping_add(1), hi);
    }

    /// Forget logged writes and the transaction count
    pub fn clear_log(&mut self) {
        self.writes.clear();
        self.transactions = 0;
    }

    fn read_reg(&self, register: u8) -> u8 {
        match register {
            0x00 => self.inputs as u8,
            0x01 => (self.inputs >> 8) as u8,
            _ => self.reg(register),
        }
    }

    fn write_reg(&mut self, register: u8, value: u8) {
        let _ = self.writes.push(Write::new(register, value));
        match register {
            0x00 | 0x01 | 0x10 => {}
            0x7F if value == 0x00 => {
                let id = self.regs[0x10];
                self.regs = Self::power_on();
                self.regs[0x10] = id;
            }
            _ => self.set_reg(register, value),
        }
    }

    fn process(&mut self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), ErrorKind> {
        if self.fail {
            return Err(ErrorKind::Bus);
        }
        if address != self.address {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }

        let mut pointer: Option<u8> = None;
        for op in operations.iter_mut() {
            match op {
                Operation::Write(bytes) => {
                    for &b in bytes.iter() {
                        match pointer {
                            None => pointer = Some(b),
                            Some(p) => {
                                self.write_reg(p, b);
                                pointer = Some(p.wrapping_add(1));
                            }
                        }
                    }
                }
                Operation::Read(buf) => {
                    let mut p = pointer.unwrap_or(0);
                    for b in buf.iter_mut() {
                        *b = self.read_reg(p);
                        p = p.wrapping_add(1);
                    }
                    pointer = Some(p);
                }
            }
        }

        self.transactions += 1;
        Ok(())
    }
}

impl ErrorType for SimulatedAw9523 {
    type Error = ErrorKind;
}

impl I2c for SimulatedAw9523 {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.process(address, operations)
    }
}

impl embedded_hal_async::i2c::I2c for SimulatedAw9523 {
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.process(address, operations)
    }
}
