//! Driver errors

use aw9523_core::{ConfigError, PinError};

/// Errors from AW9523 operations
///
/// `E` is the error type of the underlying bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Aw9523Error<E> {
    /// I2C transfer failed
    Bus(E),
    /// Pin number above 15
    InvalidPin(u8),
    /// CHIPID did not read 0x23
    WrongChipId(u8),
    /// Rejected configuration
    Config(ConfigError),
}

impl<E> From<PinError> for Aw9523Error<E> {
    fn from(e: PinError) -> Self {
        match e {
            PinError::OutOfRange(n) => Aw9523Error::InvalidPin(n),
        }
    }
}

impl<E> From<ConfigError> for Aw9523Error<E> {
    fn from(e: ConfigError) -> Self {
        Aw9523Error::Config(e)
    }
}

impl<E: core::fmt::Debug> embedded_hal::digital::Error for Aw9523Error<E> {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

impl<E: core::fmt::Debug> embedded_hal::pwm::Error for Aw9523Error<E> {
    fn kind(&self) -> embedded_hal::pwm::ErrorKind {
        embedded_hal::pwm::ErrorKind::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::ErrorKind;

    #[test]
    fn test_pin_error_conversion() {
        let err: Aw9523Error<ErrorKind> = PinError::OutOfRange(16).into();
        assert_eq!(err, Aw9523Error::InvalidPin(16));
    }

    #[test]
    fn test_config_error_conversion() {
        let err: Aw9523Error<ErrorKind> = ConfigError::TooManyPins.into();
        assert_eq!(err, Aw9523Error::Config(ConfigError::TooManyPins));
    }

    #[test]
    fn test_digital_error_kind() {
        use embedded_hal::digital::Error;
        let err: Aw9523Error<ErrorKind> = Aw9523Error::Bus(ErrorKind::Bus);
        assert_eq!(err.kind(), embedded_hal::digital::ErrorKind::Other);
    }
}
