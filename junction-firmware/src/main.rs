//! Junction - Traffic Signal Controller Firmware
//!
//! Main firmware binary for an RP2040-based fixed-intersection controller.
//! Five signal groups on a port expander and direct GPIO, demand sensors
//! with a 50 ms glitch filter, a hazard flash override and a 16x2 status
//! LCD.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{self, Adc, Channel, InterruptHandler as AdcInterruptHandler};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::spi::{self, Spi};
use embassy_time::Timer;
use portable_atomic::Ordering;
use {defmt_rtt as _, panic_probe as _};

use junction_core::traits::Clock;
use junction_drivers::buzzer::GpioBuzzer;
use junction_drivers::expander::Mcp23s17;
use junction_drivers::io::ExpanderIo;
use junction_drivers::lcd::Hd44780;
use junction_hal_rp2040::{EmbassyDelay, RpI2c, RpInput, RpOutput, RpSpi};

use crate::channels::TIME_PERIOD_MS;
use crate::controller::Controller;
use crate::tasks::EmbassyClock;

mod channels;
mod config;
mod controller;
mod tasks;

bind_interrupts!(struct Irqs {
    ADC_IRQ_FIFO => AdcInterruptHandler;
});

/// Expander SPI clock
const SPI_FREQUENCY_HZ: u32 = 1_000_000;

/// Status LED half-period in the diagnostic state
const DIAGNOSTIC_BLINK_MS: u64 = 250;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Junction firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load_config();
    TIME_PERIOD_MS.store(config.timing.period.initial_ms, Ordering::Relaxed);

    let mut led = Output::new(p.PIN_25, Level::Low);

    // Port expander on SPI0: SCK=GPIO18, MOSI=GPIO19, MISO=GPIO16, CS=GPIO17
    let mut spi_config = spi::Config::default();
    spi_config.frequency = SPI_FREQUENCY_HZ;
    let spi = Spi::new_blocking(p.SPI0, p.PIN_18, p.PIN_19, p.PIN_16, spi_config);
    let cs = RpOutput::new(Output::new(p.PIN_17, Level::High));
    let expander = Mcp23s17::new(RpSpi::new(spi), cs);

    // Sensors 4 and 5 and the hazard switch are active-low on direct GPIO
    let direct_sensors = [
        RpInput::new(Input::new(p.PIN_6, Pull::Up)),
        RpInput::new(Input::new(p.PIN_7, Pull::Up)),
    ];
    let hazard = RpInput::new(Input::new(p.PIN_8, Pull::Up));
    let aux_lamps = [
        RpOutput::new(Output::new(p.PIN_10, Level::Low)),
        RpOutput::new(Output::new(p.PIN_11, Level::Low)),
        RpOutput::new(Output::new(p.PIN_12, Level::Low)),
    ];

    let mut io = ExpanderIo::new(expander, direct_sensors, hazard, aux_lamps);
    match io.init() {
        Ok(()) => info!("Port expander initialized"),
        Err(e) => error!("Port expander init failed: {:?}", e),
    }

    let expander_int = Input::new(p.PIN_9, Pull::Up);
    let buzzer = GpioBuzzer::new_active_high(RpOutput::new(Output::new(p.PIN_13, Level::Low)));

    // Status LCD on I2C0: SDA=GPIO4, SCL=GPIO5
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c::Config::default());
    let mut lcd = Hd44780::new(RpI2c::new(i2c), EmbassyDelay);
    match lcd.probe(&config.display.probe_order()) {
        Ok(address) => info!("Status LCD found at {=u8:#x}", address),
        Err(e) => {
            // Terminal diagnostic state: nothing else runs, the LED pulses until reset
            error!("Status LCD not found: {:?}", e);
            loop {
                led.toggle();
                Timer::after_millis(DIAGNOSTIC_BLINK_MS).await;
            }
        }
    }

    // Time-period potentiometer on ADC0 (GPIO26)
    let adc = Adc::new(p.ADC, Irqs, adc::Config::default());
    let pot = Channel::new_pin(p.PIN_26, Pull::None);

    let controller = Controller::new(&config, EmbassyClock.now());

    spawner.spawn(tasks::demand_edge_task(expander_int)).unwrap();
    spawner
        .spawn(tasks::period_task(adc, pot, config.timing.period))
        .unwrap();
    spawner
        .spawn(tasks::control_task(controller, io, buzzer, lcd))
        .unwrap();

    info!("All tasks spawned, controller running");

    // Status LED shows the controller is alive
    loop {
        led.toggle();
        Timer::after_secs(1).await;
        trace!("Main loop heartbeat");
    }
}
