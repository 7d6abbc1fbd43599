//! AW9523 register bus layer
//!
//! The expander is driven purely through byte-wide register reads and
//! writes. This crate defines that contract so the driver does not depend
//! on a particular I2C implementation:
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  aw9523-driver (Aw9523, Aw9523Async)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  aw9523-hal (this crate - bus traits)   │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────────┐
//! │ embedded-hal  │       │ embedded-hal-async │
//! │   i2c::I2c    │       │     i2c::I2c       │
//! └───────────────┘       └───────────────────┘
//! ```
//!
//! Any `embedded-hal` 1.0 I2C master gets [`RegisterBus`] for free, and any
//! `embedded-hal-async` master gets [`AsyncRegisterBus`].

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;

pub use i2c::{AsyncRegisterBus, I2cConfig, RegisterBus};
