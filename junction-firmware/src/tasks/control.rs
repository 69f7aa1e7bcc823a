//! Control task
//!
//! Wakes every millisecond, or early on a demand edge, and runs the
//! controller jobs that are due.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::peripherals::{I2C0, SPI0};
use embassy_time::{Duration, Instant, Ticker};
use portable_atomic::Ordering;

use junction_core::clock::Millis;
use junction_core::traits::Clock;
use junction_drivers::buzzer::GpioBuzzer;
use junction_drivers::io::ExpanderIo;
use junction_drivers::lcd::Hd44780;
use junction_hal_rp2040::{EmbassyDelay, RpI2c, RpInput, RpOutput, RpSpi};

use crate::channels::{DEMAND_EDGE, TIME_PERIOD_MS};
use crate::controller::Controller;

/// Expander-backed sensors and lamps
pub type BoardIo =
    ExpanderIo<RpSpi<'static, SPI0>, RpOutput<'static>, RpInput<'static>, RpOutput<'static>>;

/// Status LCD
pub type BoardLcd = Hd44780<RpI2c<'static, I2C0>, EmbassyDelay>;

/// Hazard buzzer
pub type BoardBuzzer = GpioBuzzer<RpOutput<'static>>;

/// Millisecond clock on the embassy time driver
///
/// Truncated to 32 bits so it wraps like the controller timestamps.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now(&self) -> Millis {
        Millis(Instant::now().as_millis() as u32)
    }
}

/// Control task - cooperative loop over the controller jobs
#[embassy_executor::task]
pub async fn control_task(
    mut controller: Controller,
    mut io: BoardIo,
    mut buzzer: BoardBuzzer,
    mut lcd: BoardLcd,
) {
    info!("Control task started");

    let clock = EmbassyClock;
    let mut ticker = Ticker::every(Duration::from_millis(1));

    loop {
        if let Either::Second(()) = select(ticker.next(), DEMAND_EDGE.wait()).await {
            trace!("Demand edge");
            controller.request_sample(clock.now());
        }

        let period_ms = TIME_PERIOD_MS.load(Ordering::Relaxed);
        controller.poll(clock.now(), period_ms, &mut io, &mut buzzer, &mut lcd);
    }
}
