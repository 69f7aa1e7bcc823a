//! Time-period sampler
//!
//! Reads the potentiometer on ADC0 and publishes the scaled period for
//! the control loop.

use defmt::*;
use embassy_rp::adc::{Adc, Async, Channel};
use embassy_time::{Duration, Ticker};
use portable_atomic::Ordering;

use junction_core::config::TimePeriodConfig;

use crate::channels::TIME_PERIOD_MS;

/// Sampling interval in milliseconds
const SAMPLE_INTERVAL_MS: u64 = 50;

/// Period task - ADC sampling loop
#[embassy_executor::task]
pub async fn period_task(
    mut adc: Adc<'static, Async>,
    mut pot: Channel<'static>,
    config: TimePeriodConfig,
) {
    info!("Period task started ({}-{} ms)", config.min_ms, config.max_ms);

    let mut ticker = Ticker::every(Duration::from_millis(SAMPLE_INTERVAL_MS));
    let mut last_ms = TIME_PERIOD_MS.load(Ordering::Relaxed);

    loop {
        ticker.next().await;

        match adc.read(&mut pot).await {
            Ok(raw) => {
                let period_ms = config.scale(raw);
                TIME_PERIOD_MS.store(period_ms, Ordering::Relaxed);
                if period_ms.abs_diff(last_ms) >= 10 {
                    debug!("Time period {} ms", period_ms);
                    last_ms = period_ms;
                }
            }
            Err(e) => warn!("ADC read failed: {:?}", e),
        }
    }
}
