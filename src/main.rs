//! GNSS + RTC Demo Application
//!
//! Brings the module up on I2C1 of an STM32G474 board, sets the clock once
//! and then logs the RTC time and the GNSS fix every few seconds.

#![no_std]
#![no_main]

use defmt::{error, info, warn};
use embassy_executor::Spawner;
use embassy_stm32::i2c::I2c;
use embassy_stm32::time::Hertz;
use embassy_time::{Delay, Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use gnss_rtc::prelude::*;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("GNSS RTC demo v{}", env!("CARGO_PKG_VERSION"));

    let p = embassy_stm32::init(embassy_stm32::Config::default());

    // PB8 = SCL, PB9 = SDA for I2C1 on STM32G474
    let i2c = I2c::new_blocking(
        p.I2C1,
        p.PB8,
        p.PB9,
        Hertz(I2C_FREQUENCY_HZ),
        Default::default(),
    );
    let mut module = GnssRtc::new_i2c(i2c, Delay);

    while let Err(e) = module.begin() {
        error!("module not responding: {}", e);
        Timer::after(Duration::from_secs(1)).await;
    }
    info!("module up at {}", I2cAddress::MODULE);

    if let Err(e) = module.set_gnss_mode(GnssMode::GpsBeiDouGlonass) {
        warn!("gnss mode: {}", e);
    }
    if let Err(e) = module.set_hour_format(HourFormat::Hour24) {
        warn!("hour format: {}", e);
    }
    if let Some(start) = DateTime::new(2024, 3, 15, 14, 30, 0) {
        if let Err(e) = module.set_time(&start) {
            warn!("set time: {}", e);
        }
    }
    // Sync the RTC to GNSS every 6 hours
    if let Err(e) = module.set_calibration_interval(6) {
        warn!("calibration interval: {}", e);
    }

    loop {
        Timer::after(Duration::from_secs(5)).await;

        match module.rtc_time() {
            Ok(now) => info!("rtc {}", now),
            Err(e) => warn!("rtc read: {}", e),
        }

        match (module.latitude(), module.longitude(), module.satellites_in_use()) {
            (Ok(lat), Ok(lon), Ok(sats)) => info!("fix {} / {} ({} sats)", lat, lon, sats),
            _ => warn!("gnss read failed"),
        }

        if let Ok(CalibrationStatus::Complete) = module.calibration_status() {
            info!("rtc calibrated from gnss");
        }

        if let Err(e) = module.read_all_sentences(|chunk| {
            if let Ok(text) = core::str::from_utf8(chunk) {
                info!("{=str}", text);
            }
        }) {
            warn!("sentences: {}", e);
        }
    }
}
