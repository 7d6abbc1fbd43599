//! Pin, port and mode types
//!
//! The AW9523 has 16 pins split into two 8-bit ports. Port 0 holds pins
//! 0-7 (the low byte of every 16-bit register pair), port 1 holds pins
//! 8-15 (the high byte).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Pin index errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin index above 15
    OutOfRange(u8),
}

impl core::fmt::Display for PinError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PinError::OutOfRange(n) => write!(f, "pin {} out of range (0-15)", n),
        }
    }
}

/// A validated expander pin (0-15)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "u8", into = "u8")
)]
pub struct Pin(u8);

impl Pin {
    /// Number of pins on the chip
    pub const COUNT: u8 = 16;

    /// Create a pin, rejecting indices above 15
    pub const fn new(index: u8) -> Result<Self, PinError> {
        if index < Self::COUNT {
            Ok(Self(index))
        } else {
            Err(PinError::OutOfRange(index))
        }
    }

    /// Pin number (0-15)
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Port this pin belongs to
    pub const fn port(self) -> Port {
        if self.0 < 8 {
            Port::Port0
        } else {
            Port::Port1
        }
    }

    /// Bit position within the pin's 8-bit port register
    pub const fn bit(self) -> u8 {
        self.0 % 8
    }

    /// Bit of this pin within a 16-bit register pair
    pub const fn mask(self) -> u16 {
        1 << self.0
    }

    /// All 16 pins in ascending order
    pub fn all() -> impl Iterator<Item = Pin> {
        (0..Self::COUNT).map(Pin)
    }
}

impl TryFrom<u8> for Pin {
    type Error = PinError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Pin::new(index)
    }
}

impl From<Pin> for u8 {
    fn from(pin: Pin) -> Self {
        pin.0
    }
}

/// One of the two 8-bit ports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Port {
    /// Pins 0-7, the only port that supports open-drain output
    Port0,
    /// Pins 8-15, always push-pull
    Port1,
}

impl Port {
    /// Register offset from the port 0 register of a pair
    pub const fn offset(self) -> u8 {
        match self {
            Port::Port0 => 0,
            Port::Port1 => 1,
        }
    }

    /// Shift of this port's byte within a 16-bit pin word
    pub const fn shift(self) -> u8 {
        self.offset() * 8
    }

    /// Pins of this port as a mask
    pub const fn mask(self) -> PinMask {
        PinMask(0x00FF << self.shift())
    }

    /// Extract this port's byte from a 16-bit pin word
    pub const fn byte_of(self, word: u16) -> u8 {
        (word >> self.shift()) as u8
    }
}

/// Set of pins, bit n = pin n
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinMask(pub u16);

impl PinMask {
    /// No pins
    pub const EMPTY: Self = Self(0);
    /// All 16 pins
    pub const ALL: Self = Self(0xFFFF);

    /// Raw 16-bit value
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// This mask with `pin` added
    pub const fn with(self, pin: Pin) -> Self {
        Self(self.0 | pin.mask())
    }

    /// This mask with `pin` removed
    pub const fn without(self, pin: Pin) -> Self {
        Self(self.0 & !pin.mask())
    }

    /// Check whether `pin` is in the set
    pub const fn contains(self, pin: Pin) -> bool {
        self.0 & pin.mask() != 0
    }

    /// Number of pins in the set
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Iterate over the pins in the set, lowest first
    pub fn iter(self) -> impl Iterator<Item = Pin> {
        Pin::all().filter(move |p| self.contains(*p))
    }
}

impl From<u16> for PinMask {
    fn from(bits: u16) -> Self {
        Self(bits)
    }
}

impl From<PinMask> for u16 {
    fn from(mask: PinMask) -> Self {
        mask.0
    }
}

impl FromIterator<Pin> for PinMask {
    fn from_iter<I: IntoIterator<Item = Pin>>(iter: I) -> Self {
        iter.into_iter().fold(PinMask::EMPTY, PinMask::with)
    }
}

/// Per-pin function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PinMode {
    /// Digital input (reset state)
    #[default]
    Input,
    /// Digital output
    Output,
    /// Constant-current LED driver, brightness set by the pin's DIM register
    Led,
}

impl PinMode {
    /// CONFIG bit for this mode (1 = input)
    pub const fn config_bit(self) -> u16 {
        match self {
            PinMode::Input => 1,
            PinMode::Output | PinMode::Led => 0,
        }
    }

    /// LEDMODE bit for this mode (0 = LED, 1 = GPIO)
    pub const fn ledmode_bit(self) -> u16 {
        match self {
            PinMode::Led => 0,
            PinMode::Input | PinMode::Output => 1,
        }
    }
}

/// Output stage of port 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DriveMode {
    /// Push-pull outputs
    #[default]
    PushPull,
    /// Open-drain outputs (external pull-up required)
    OpenDrain,
}

/// LED current range (GCR ISEL bits)
///
/// Scales the maximum constant current (37 mA) applied to every LED pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LedCurrent {
    /// Full I_max (reset state)
    #[default]
    Max,
    /// 3/4 of I_max
    ThreeQuarters,
    /// 1/2 of I_max
    Half,
    /// 1/4 of I_max
    Quarter,
}

impl LedCurrent {
    /// ISEL field value
    pub const fn isel(self) -> u8 {
        match self {
            LedCurrent::Max => 0b00,
            LedCurrent::ThreeQuarters => 0b01,
            LedCurrent::Half => 0b10,
            LedCurrent::Quarter => 0b11,
        }
    }

    /// Decode an ISEL field value (only the low two bits are used)
    pub const fn from_isel(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => LedCurrent::Max,
            0b01 => LedCurrent::ThreeQuarters,
            0b10 => LedCurrent::Half,
            _ => LedCurrent::Quarter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_range() {
        assert_eq!(Pin::new(0).unwrap().index(), 0);
        assert_eq!(Pin::new(15).unwrap().index(), 15);
        assert_eq!(Pin::new(16), Err(PinError::OutOfRange(16)));
        assert_eq!(Pin::try_from(255u8), Err(PinError::OutOfRange(255)));
    }

    #[test]
    fn test_pin_port_and_bit() {
        let p7 = Pin::new(7).unwrap();
        assert_eq!(p7.port(), Port::Port0);
        assert_eq!(p7.bit(), 7);
        assert_eq!(p7.mask(), 0x0080);

        let p8 = Pin::new(8).unwrap();
        assert_eq!(p8.port(), Port::Port1);
        assert_eq!(p8.bit(), 0);
        assert_eq!(p8.mask(), 0x0100);
    }

    #[test]
    fn test_port_bytes() {
        assert_eq!(Port::Port0.byte_of(0xA55A), 0x5A);
        assert_eq!(Port::Port1.byte_of(0xA55A), 0xA5);
        assert_eq!(Port::Port0.mask(), PinMask(0x00FF));
        assert_eq!(Port::Port1.mask(), PinMask(0xFF00));
    }

    #[test]
    fn test_mask_set_operations() {
        let p3 = Pin::new(3).unwrap();
        let p12 = Pin::new(12).unwrap();

        let mask = PinMask::EMPTY.with(p3).with(p12);
        assert_eq!(mask.bits(), 0x1008);
        assert!(mask.contains(p3));
        assert_eq!(mask.count(), 2);
        assert_eq!(mask.without(p3).bits(), 0x1000);

        let mut pins = mask.iter();
        assert_eq!(pins.next(), Some(p3));
        assert_eq!(pins.next(), Some(p12));
        assert_eq!(pins.next(), None);

        let collected: PinMask = [p12, p3].into_iter().collect();
        assert_eq!(collected, mask);
    }

    #[test]
    fn test_led_current_isel() {
        for current in [
            LedCurrent::Max,
            LedCurrent::ThreeQuarters,
            LedCurrent::Half,
            LedCurrent::Quarter,
        ] {
            assert_eq!(LedCurrent::from_isel(current.isel()), current);
        }
        // Upper bits are ignored
        assert_eq!(LedCurrent::from_isel(0b1111_1110), LedCurrent::Half);
    }

    #[test]
    fn test_mode_bits() {
        assert_eq!((PinMode::Output.config_bit(), PinMode::Output.ledmode_bit()), (0, 1));
        assert_eq!((PinMode::Input.config_bit(), PinMode::Input.ledmode_bit()), (1, 1));
        assert_eq!((PinMode::Led.config_bit(), PinMode::Led.ledmode_bit()), (0, 0));
    }

    #[test]
    fn test_defaults_match_reset_state() {
        assert_eq!(PinMode::default(), PinMode::Input);
        assert_eq!(DriveMode::default(), DriveMode::PushPull);
        assert_eq!(LedCurrent::default(), LedCurrent::Max);
    }
}
