//! I2C register bus abstractions
//!
//! The AW9523 speaks the usual "register pointer" dialect: a write starts
//! with the register address followed by data bytes, and a read is a
//! register-address write followed by a repeated-start read. The chip
//! auto-increments the pointer, so 16-bit port pairs travel as two bytes,
//! LSB (port 0) first.

use embedded_hal::i2c::{I2c, Operation};

/// Blocking register access
pub trait RegisterBus {
    /// Error type for bus operations
    type Error;

    /// Write `data` starting at `register`
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `register` - First register to write
    /// * `data` - Bytes written to consecutive registers
    fn write_registers(&mut self, address: u8, register: u8, data: &[u8])
        -> Result<(), Self::Error>;

    /// Read `buf.len()` bytes starting at `register`
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `register` - First register to read
    /// * `buf` - Buffer filled from consecutive registers
    fn read_registers(&mut self, address: u8, register: u8, buf: &mut [u8])
        -> Result<(), Self::Error>;
}

/// Async register access
///
/// Same contract as [`RegisterBus`], for `embedded-hal-async` buses.
#[allow(async_fn_in_trait)]
pub trait AsyncRegisterBus {
    /// Error type for bus operations
    type Error;

    /// Write `data` starting at `register`
    async fn write_registers(
        &mut self,
        address: u8,
        register: u8,
        data: &[u8],
    ) -> Result<(), Self::Error>;

    /// Read `buf.len()` bytes starting at `register`
    async fn read_registers(
        &mut self,
        address: u8,
        register: u8,
        buf: &mut [u8],
    ) -> Result<(), Self::Error>;
}

// Adjacent write operations are merged on the wire, so the register byte and
// the payload go out as a single write with no repeated start in between.
impl<T: I2c> RegisterBus for T {
    type Error = T::Error;

    fn write_registers(
        &mut self,
        address: u8,
        register: u8,
        data: &[u8],
    ) -> Result<(), Self::Error> {
        I2c::transaction(
            self,
            address,
            &mut [Operation::Write(&[register]), Operation::Write(data)],
        )
    }

    fn read_registers(
        &mut self,
        address: u8,
        register: u8,
        buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        I2c::write_read(self, address, &[register], buf)
    }
}

impl<T: embedded_hal_async::i2c::I2c> AsyncRegisterBus for T {
    type Error = T::Error;

    async fn write_registers(
        &mut self,
        address: u8,
        register: u8,
        data: &[u8],
    ) -> Result<(), Self::Error> {
        embedded_hal_async::i2c::I2c::transaction(
            self,
            address,
            &mut [Operation::Write(&[register]), Operation::Write(data)],
        )
        .await
    }

    async fn read_registers(
        &mut self,
        address: u8,
        register: u8,
        buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        embedded_hal_async::i2c::I2c::write_read(self, address, &[register], buf).await
    }
}

/// I2C configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::FAST
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode (400 kHz), the fastest clock the AW9523 accepts
    pub const FAST: Self = Self { frequency: 400_000 };
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, ErrorType};

    /// Records the bytes of the last transaction and answers reads
    /// with a fixed pattern.
    struct RecordingBus {
        address: u8,
        written: [u8; 8],
        written_len: usize,
        transactions: usize,
        reply: [u8; 2],
    }

    impl RecordingBus {
        fn new(reply: [u8; 2]) -> Self {
            Self {
                address: 0,
                written: [0; 8],
                written_len: 0,
                transactions: 0,
                reply,
            }
        }

        fn written(&self) -> &[u8] {
            &self.written[..self.written_len]
        }

        fn record(&mut self, address: u8, operations: &mut [Operation<'_>]) {
            self.address = address;
            self.written_len = 0;
            self.transactions += 1;
            for op in operations.iter_mut() {
                match op {
                    Operation::Write(bytes) => {
                        for &b in bytes.iter() {
                            self.written[self.written_len] = b;
                            self.written_len += 1;
                        }
                    }
                    Operation::Read(buf) => {
                        for (i, b) in buf.iter_mut().enumerate() {
                            *b = self.reply[i % self.reply.len()];
                        }
                    }
                }
            }
        }
    }

    impl ErrorType for RecordingBus {
        type Error = ErrorKind;
    }

    impl I2c for RecordingBus {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            self.record(address, operations);
            Ok(())
        }
    }

    impl embedded_hal_async::i2c::I2c for RecordingBus {
        async fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            self.record(address, operations);
            Ok(())
        }
    }

    /// Bus that NAKs every transfer
    struct NakBus;

    impl ErrorType for NakBus {
        type Error = ErrorKind;
    }

    impl I2c for NakBus {
        fn transaction(
            &mut self,
            _address: u8,
            _operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            Err(ErrorKind::NoAcknowledge(
                embedded_hal::i2c::NoAcknowledgeSource::Address,
            ))
        }
    }

    #[test]
    fn test_write_sends_register_then_data() {
        let mut bus = RecordingBus::new([0, 0]);
        RegisterBus::write_registers(&mut bus, 0x58, 0x02, &[0xAA, 0x55]).unwrap();

        assert_eq!(bus.address, 0x58);
        assert_eq!(bus.written(), &[0x02, 0xAA, 0x55]);
        assert_eq!(bus.transactions, 1);
    }

    #[test]
    fn test_read_writes_pointer_and_fills_buffer() {
        let mut bus = RecordingBus::new([0x12, 0x34]);
        let mut buf = [0u8; 2];
        RegisterBus::read_registers(&mut bus, 0x59, 0x00, &mut buf).unwrap();

        assert_eq!(bus.address, 0x59);
        assert_eq!(bus.written(), &[0x00]);
        assert_eq!(buf, [0x12, 0x34]);
    }

    #[test]
    fn test_bus_error_is_passed_through() {
        let mut bus = NakBus;
        let result = RegisterBus::write_registers(&mut bus, 0x58, 0x7F, &[0x00]);
        assert!(matches!(result, Err(ErrorKind::NoAcknowledge(_))));
    }

    #[test]
    fn test_async_write_matches_blocking() {
        let mut bus = RecordingBus::new([0, 0]);
        embassy_futures::block_on(AsyncRegisterBus::write_registers(
            &mut bus,
            0x5A,
            0x11,
            &[0x10],
        ))
        .unwrap();

        assert_eq!(bus.address, 0x5A);
        assert_eq!(bus.written(), &[0x11, 0x10]);
    }

    #[test]
    fn test_async_read() {
        let mut bus = RecordingBus::new([0x23, 0x23]);
        let mut buf = [0u8; 1];
        embassy_futures::block_on(AsyncRegisterBus::read_registers(
            &mut bus, 0x58, 0x10, &mut buf,
        ))
        .unwrap();

        assert_eq!(buf, [0x23]);
        assert_eq!(bus.written(), &[0x10]);
    }

    #[test]
    fn test_default_is_fast_mode() {
        assert_eq!(I2cConfig::default(), I2cConfig::FAST);
        assert_eq!(I2cConfig::STANDARD.frequency, 100_000);
    }
}
