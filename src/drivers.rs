//! Peripheral Drivers
//!
//! The [`GnssRtc`] facade owns one register interface and exposes the
//! GNSS receiver, the RTC and the calibration handshake between them.
//! Each peripheral's operations live in their own module as separate
//! `impl` blocks on the same type.

pub mod calibration;
pub mod gnss;
pub mod module;
pub mod rtc;

pub use module::GnssRtc;
