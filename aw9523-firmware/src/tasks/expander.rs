//! Expander demo task
//!
//! Blinks the configured outputs, breathes the LED pins and logs input
//! changes. Inputs are read when the chip pulls INT low, and on a slow
//! poll in case the line is not wired.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::gpio::Input;
use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Duration, Ticker};

use aw9523_core::config::ConfigMasks;
use aw9523_driver::Aw9523Async;

/// Driver type on the board's I2C0
pub type Expander = Aw9523Async<I2c<'static, I2C0, Async>>;

/// Animation step
const STEP_MS: u64 = 20;

/// Steps between output toggles (500 ms)
const BLINK_STEPS: u32 = 25;

/// Steps between input polls (1 s)
const POLL_STEPS: u32 = 50;

/// Triangle wave 0 -> 255 -> 0 over 510 steps
fn breathe(step: u32) -> u8 {
    let phase = (step % 510) as u16;
    if phase < 255 {
        phase as u8
    } else {
        (510 - phase) as u8
    }
}

#[embassy_executor::task]
pub async fn expander_task(mut expander: Expander, masks: ConfigMasks, mut int_pin: Input<'static>) {
    info!("Expander task started at {=u8:#x}", expander.address());

    let blink = masks.outputs.bits() & !masks.leds.bits();
    let mut ticker = Ticker::every(Duration::from_millis(STEP_MS));
    let mut step: u32 = 0;
    let mut last_inputs = match expander.input_gpio().await {
        Ok(levels) => levels,
        Err(e) => {
            error!("Initial input read failed: {:?}", e);
            0
        }
    };

    loop {
        let poll = match select(ticker.next(), int_pin.wait_for_falling_edge()).await {
            Either::First(()) => {
                step = step.wrapping_add(1);

                let level = breathe(step);
                for pin in masks.leds.iter() {
                    if let Err(e) = expander.analog_write(pin.index(), level).await {
                        warn!("LED {} write failed: {:?}", pin.index(), e);
                    }
                }

                if blink != 0 && step % BLINK_STEPS == 0 {
                    match expander.output_state().await {
                        Ok(state) => {
                            if let Err(e) = expander.output_gpio(state ^ blink).await {
                                warn!("Output write failed: {:?}", e);
                            }
                        }
                        Err(e) => warn!("Output read failed: {:?}", e),
                    }
                }

                step % POLL_STEPS == 0
            }
            Either::Second(()) => true,
        };

        if !poll {
            continue;
        }

        // Reading INPUT also releases INT
        match expander.input_gpio().await {
            Ok(levels) if levels != last_inputs => {
                let changed = levels ^ last_inputs;
                info!("Inputs {=u16:#06x} (changed {=u16:#06x})", levels, changed);
                if changed & masks.interrupts.bits() != 0 {
                    debug!("Change on an interrupt-enabled pin");
                }
                last_inputs = levels;
            }
            Ok(_) => {}
            Err(e) => warn!("Input read failed: {:?}", e),
        }
    }
}
