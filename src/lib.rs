//! GNSS + RTC Module Driver
//!
//! Blocking driver for a combined GNSS receiver (L76K) and battery-backed
//! RTC (SD3031) module. A small MCU on the module fronts both chips as a
//! flat register file reachable over I2C or UART.
//!
//! # Architecture
//!
//! ```text
//! +-------------------------------------------------------------+
//! |                        DRIVER LAYER                         |
//! |   GnssRtc: GNSS fields | RTC time/alarms | calibration      |
//! +-------------------------------------------------------------+
//! |                        CODEC LAYER                          |
//! |   rtc: BCD, hour flags, weekday | gnss: fix fields, chunks  |
//! +-------------------------------------------------------------+
//! |                   REGISTER ACCESS LAYER                     |
//! |   RegisterInterface: settle delay, RTC staging              |
//! |   I2cInterface (embedded-hal) | UartInterface (embedded-io) |
//! +-------------------------------------------------------------+
//! ```
//!
//! The codec layer is pure and host-testable; only the register access
//! layer touches the bus.
//!
//! # Example
//!
//! ```ignore
//! let mut module = GnssRtc::new_i2c(i2c, delay);
//! module.begin()?;
//! module.set_time(&DateTime::new(2024, 3, 15, 14, 30, 0).unwrap())?;
//! let now = module.rtc_time()?;
//! let lat = module.latitude()?.signed_degrees();
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// must stay first so the logging macros are visible to every module
mod fmt;

/// Register Access Layer
///
/// Transport backends behind one register read/write contract.
pub mod hal;

/// Module driver
///
/// GNSS, RTC and calibration operations on [`GnssRtc`].
pub mod drivers;

/// RTC register codec
pub mod rtc;

/// GNSS register decoders
pub mod gnss;

/// Register map
pub mod registers;

/// Driver error type
pub mod error;

/// Shared types used across modules
pub mod types;

/// Protocol configuration and constants
pub mod config;

pub use drivers::GnssRtc;
pub use error::Error;
pub use hal::i2c::{I2cAddress, I2cInterface};
pub use hal::uart::UartInterface;
pub use hal::{RegResult, RegisterInterface};

/// Prelude module for common imports
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::config::*;
    pub use crate::types::*;

    pub use crate::drivers::GnssRtc;
    pub use crate::error::Error;
    pub use crate::hal::i2c::{I2cAddress, I2cInterface};
    pub use crate::hal::uart::UartInterface;
    pub use crate::hal::{RegResult, RegisterInterface};

    // Common traits
    pub use embedded_hal::delay::DelayNs;
    pub use embedded_hal::i2c::I2c;
}
