//! GNSS-to-RTC calibration
//!
//! The module firmware does the actual sync; the driver only triggers it,
//! schedules it and watches the shared status register.

use super::GnssRtc;
use crate::error::Error;
use crate::hal::{RegResult, RegisterInterface};
use crate::registers::module as reg;
use crate::types::CalibrationStatus;

impl<IF: RegisterInterface> GnssRtc<IF> {
    /// Sync the RTC to GNSS time once
    ///
    /// Fire-and-forget: poll [`Self::calibration_status`] for the outcome.
    /// A weak GNSS signal can keep the sync from completing.
    pub fn calibrate_rtc(&mut self) -> RegResult<(), IF::BusError> {
        self.write_byte(reg::CALIB_STATUS, CalibrationStatus::InProgress.as_raw())
    }

    /// Sync the RTC every `hours` hours; 0 disables periodic sync
    ///
    /// A non-zero interval also triggers an immediate sync.
    pub fn set_calibration_interval(&mut self, hours: u8) -> RegResult<(), IF::BusError> {
        self.write_byte(reg::CALIB_INTERVAL, hours)
    }

    /// Current calibration state
    ///
    /// Reading [`CalibrationStatus::Complete`] resets the register, so a
    /// completion is observed exactly once.
    pub fn calibration_status(&mut self) -> RegResult<CalibrationStatus, IF::BusError> {
        let raw = self.read_byte(reg::CALIB_STATUS)?;
        CalibrationStatus::from_raw(raw).ok_or(Error::InvalidRegisterValue {
            register: reg::CALIB_STATUS,
            value: raw,
        })
    }

    /// Abort a sync that is not completing
    pub fn cancel_calibration(&mut self) -> RegResult<(), IF::BusError> {
        self.write_byte(reg::CALIB_STATUS, CalibrationStatus::NotCalibrated.as_raw())
    }
}
