//! Register and bit-field descriptors
//!
//! A [`RegisterDef`] names a fixed register and how many bytes it spans.
//! The 16-bit pin registers are pairs of adjacent 8-bit registers that the
//! chip auto-increments through, so a word travels LSB (port 0) first.
//!
//! A [`BitField`] is a view into a register value. Writing a field is a
//! read-modify-write that leaves every other bit untouched.

use crate::pin::{Pin, Port};

/// A fixed-address register, one or two bytes wide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterDef {
    /// Address of the first (low) byte
    pub address: u8,
    /// Width in bytes (1 or 2)
    pub width: u8,
}

impl RegisterDef {
    /// 8-bit register
    pub const fn byte(address: u8) -> Self {
        Self { address, width: 1 }
    }

    /// 16-bit register pair, port 0 at `address`, port 1 at `address + 1`
    pub const fn word(address: u8) -> Self {
        Self { address, width: 2 }
    }

    /// The 8-bit half of a register pair belonging to `port`
    pub const fn port(self, port: Port) -> Self {
        Self::byte(self.address + port.offset())
    }

    /// The 8-bit half of a register pair holding `pin`
    pub const fn for_pin(self, pin: Pin) -> Self {
        self.port(pin.port())
    }

    /// Width in bytes as a slice length
    pub const fn size(self) -> usize {
        self.width as usize
    }

    /// Serialize a value for the wire (LSB first); only `size()` bytes are used
    pub const fn to_bytes(self, value: u16) -> [u8; 2] {
        value.to_le_bytes()
    }

    /// Deserialize wire bytes (LSB first)
    pub fn from_bytes(self, bytes: &[u8]) -> u16 {
        bytes
            .iter()
            .take(self.size())
            .rev()
            .fold(0u16, |acc, &b| (acc << 8) | b as u16)
    }
}

/// A contiguous run of bits inside a register value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitField {
    /// Position of the lowest bit
    pub shift: u8,
    /// Number of bits (1-16)
    pub bits: u8,
}

impl BitField {
    /// Field of `bits` bits starting at `shift`
    pub const fn new(shift: u8, bits: u8) -> Self {
        Self { shift, bits }
    }

    /// Single-bit field
    pub const fn bit(shift: u8) -> Self {
        Self::new(shift, 1)
    }

    /// Mask of the field in register position
    pub const fn mask(self) -> u16 {
        (((1u32 << self.bits) - 1) << self.shift) as u16
    }

    /// Read the field out of a register value
    pub const fn extract(self, value: u16) -> u16 {
        (value & self.mask()) >> self.shift
    }

    /// Replace the field inside a register value
    ///
    /// `field` is truncated to the field width; other bits are preserved.
    pub const fn insert(self, value: u16, field: u16) -> u16 {
        let placed = (((field as u32) << self.shift) as u16) & self.mask();
        (value & !self.mask()) | placed
    }
}

/// Invert a pin mask for the chip's active-low registers
///
/// CONFIG, INTENABLE and LEDMODE all use 0 for "on". The public API takes
/// 1 = on and flips it at the register boundary.
pub const fn active_low(mask: u16) -> u16 {
    !mask
}
