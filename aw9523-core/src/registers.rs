//! AW9523 register map

use core::ops::RangeInclusive;

use crate::field::{BitField, RegisterDef};
use crate::pin::Pin;

/// Default I2C address (AD0 = AD1 = low)
pub const DEFAULT_ADDRESS: u8 = 0x58;

/// Addresses selectable with the AD0/AD1 straps
pub const ADDRESS_RANGE: RangeInclusive<u8> = 0x58..=0x5B;

/// Value of the CHIPID register
pub const CHIP_ID: u8 = 0x23;

/// Raw register addresses
pub mod addr {
    /// Input state, port 0
    pub const INPUT0: u8 = 0x00;
    /// Input state, port 1
    pub const INPUT1: u8 = 0x01;
    /// Output latch, port 0
    pub const OUTPUT0: u8 = 0x02;
    /// Output latch, port 1
    pub const OUTPUT1: u8 = 0x03;
    /// Direction, port 0 (1 = input)
    pub const CONFIG0: u8 = 0x04;
    /// Direction, port 1 (1 = input)
    pub const CONFIG1: u8 = 0x05;
    /// Interrupt enable, port 0 (0 = enabled)
    pub const INTENABLE0: u8 = 0x06;
    /// Interrupt enable, port 1 (0 = enabled)
    pub const INTENABLE1: u8 = 0x07;
    /// Chip ID
    pub const CHIPID: u8 = 0x10;
    /// Global control
    pub const GCR: u8 = 0x11;
    /// LED mode, port 0 (0 = LED)
    pub const LEDMODE0: u8 = 0x12;
    /// LED mode, port 1 (0 = LED)
    pub const LEDMODE1: u8 = 0x13;
    /// First constant-current dimming register
    pub const DIM_FIRST: u8 = 0x20;
    /// Last constant-current dimming register
    pub const DIM_LAST: u8 = 0x2F;
    /// Software reset
    pub const SOFTRESET: u8 = 0x7F;
}

/// Input state of all pins
pub const INPUT: RegisterDef = RegisterDef::word(addr::INPUT0);
/// Output latch of all pins
pub const OUTPUT: RegisterDef = RegisterDef::word(addr::OUTPUT0);
/// Direction of all pins (active-low: 0 = output)
pub const CONFIG: RegisterDef = RegisterDef::word(addr::CONFIG0);
/// Interrupt enable of all pins (active-low: 0 = enabled)
pub const INTENABLE: RegisterDef = RegisterDef::word(addr::INTENABLE0);
/// GPIO/LED selection of all pins (active-low: 0 = LED)
pub const LEDMODE: RegisterDef = RegisterDef::word(addr::LEDMODE0);
/// Chip ID
pub const CHIPID: RegisterDef = RegisterDef::byte(addr::CHIPID);
/// Global control
pub const GCR: RegisterDef = RegisterDef::byte(addr::GCR);
/// Software reset
pub const SOFTRESET: RegisterDef = RegisterDef::byte(addr::SOFTRESET);

/// GCR bit 4: 1 = port 0 push-pull, 0 = open-drain
pub const GCR_PORT0_PUSH_PULL: BitField = BitField::bit(4);
/// GCR bits 1:0: LED current range
pub const GCR_ISEL: BitField = BitField::new(0, 2);

/// Value that triggers a soft reset when written to SOFTRESET
pub const SOFTRESET_VALUE: u8 = 0x00;

/// Dimming register for a pin
///
/// The DIM registers are not in pin order: 0x20-0x23 drive P1_0-P1_3,
/// 0x24-0x2B drive P0_0-P0_7 and 0x2C-0x2F drive P1_4-P1_7.
pub const fn dim_register(pin: Pin) -> u8 {
    let n = pin.index();
    match n {
        0..=7 => 0x24 + n,
        8..=11 => 0x20 + (n - 8),
        _ => 0x2C + (n - 12),
    }
}

/// Dimming register for a pin as a descriptor
pub const fn dim(pin: Pin) -> RegisterDef {
    RegisterDef::byte(dim_register(pin))
}
