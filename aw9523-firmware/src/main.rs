//! AW9523 demo firmware
//!
//! Drives an AW9523 breakout from an RP2040 over I2C0 using the async
//! driver. Pin functions come from expander.toml, compiled in at build
//! time.
//!
//! Wiring: SDA = GPIO4, SCL = GPIO5, INT = GPIO6.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{self, I2c, InterruptHandler as I2cInterruptHandler};
use embassy_rp::peripherals::I2C0;
use {defmt_rtt as _, panic_probe as _};

use aw9523_driver::{Aw9523Async, CHIP_ID};
use aw9523_hal::I2cConfig;

mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    I2C0_IRQ => I2cInterruptHandler<I2C0>;
});

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("AW9523 firmware starting...");

    let p = embassy_rp::init(Default::default());

    let expander_config = match config::expander_config() {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid expander configuration: {:?}", e);
            return;
        }
    };
    info!(
        "Expander config: addr={=u8:#x}, {} pins",
        expander_config.address,
        expander_config.pins.len()
    );

    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2cConfig::FAST.frequency;
    let bus = I2c::new_async(p.I2C0, p.PIN_5, p.PIN_4, Irqs, i2c_config);

    // Open-drain, active low
    let int_pin = Input::new(p.PIN_6, Pull::Up);

    let mut expander = Aw9523Async::new(bus, expander_config.address);
    if let Err(e) = expander.begin().await {
        error!("Expander not found (expected chip id {=u8:#x}): {:?}", CHIP_ID, e);
        return;
    }
    if let Err(e) = expander.apply_config(&expander_config).await {
        error!("Failed to configure expander: {:?}", e);
        return;
    }
    info!("Expander configured");

    spawner
        .spawn(tasks::expander_task(expander, expander_config.masks(), int_pin))
        .unwrap();

    info!("All tasks spawned, firmware running");
}
