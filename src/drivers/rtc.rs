//! RTC operations
//!
//! The RTC only accepts the 7 time registers as one block, so hour-format
//! changes rewrite the whole block.

use super::GnssRtc;
use crate::config::{CLOCK_OUTPUT_SETTLE_MS, SRAM_END, SRAM_ERASED, SRAM_START};
use crate::error::Error;
use crate::hal::{RegResult, RegisterInterface};
use crate::registers::rtc as reg;
use crate::rtc;
use crate::types::{
    is_valid_date, is_valid_time, DateTime, HourFormat, Meridiem, RtcTime, WeekdayMask,
};

impl<IF: RegisterInterface> GnssRtc<IF> {
    /// Current RTC time
    ///
    /// The hour is interpreted with the format flag stored alongside it.
    pub fn rtc_time(&mut self) -> RegResult<RtcTime, IF::BusError> {
        let raw = self.read_block::<7>(reg::SECONDS)?;
        let time = rtc::decode_time(&raw);
        self.hour_format = Some(time.format());
        Ok(time)
    }

    /// Hour format the RTC is running in
    ///
    /// Read from the device the first time, cached afterwards.
    pub fn hour_format(&mut self) -> RegResult<HourFormat, IF::BusError> {
        if let Some(format) = self.hour_format {
            return Ok(format);
        }
        let raw = self.read_block::<7>(reg::SECONDS)?;
        let format = HourFormat::from_hour_register(raw[2]);
        self.hour_format = Some(format);
        Ok(format)
    }

    /// Switch the RTC between 12- and 24-hour mode
    ///
    /// The stored hour is converted so the time of day is preserved.
    pub fn set_hour_format(&mut self, format: HourFormat) -> RegResult<(), IF::BusError> {
        let mut raw = self.read_block_exact::<7>(reg::SECONDS)?;
        if HourFormat::from_hour_register(raw[2]) != format {
            debug!("converting hour register 0x{:02X}", raw[2]);
            raw[2] = rtc::convert_hour_register(raw[2], format);
            self.interface.write_register(reg::SECONDS, &raw)?;
        }
        self.hour_format = Some(format);
        Ok(())
    }

    /// Set date and time; the weekday is derived from the date
    pub fn set_time(&mut self, time: &DateTime) -> RegResult<(), IF::BusError> {
        let format = self.hour_format()?;
        let raw = rtc::encode_time(time, format);
        self.interface.write_register(reg::SECONDS, &raw)
    }

    /// AM/PM flag of the current hour (meaningful in 12-hour mode)
    pub fn meridiem(&mut self) -> RegResult<Meridiem, IF::BusError> {
        let raw = self.read_block::<7>(reg::SECONDS)?;
        Ok(if raw[2] & reg::HOUR_PM != 0 {
            Meridiem::Pm
        } else {
            Meridiem::Am
        })
    }

    /// Alarm on a calendar date
    pub fn set_date_alarm(&mut self, year: u16, month: u8, day: u8) -> RegResult<(), IF::BusError> {
        if !is_valid_date(year, month, day) {
            return Err(Error::InvalidArgument);
        }
        self.arm_alarm()?;
        let raw = rtc::encode_date_alarm(year, month, day);
        self.interface.write_register(reg::ALARM_SECONDS, &raw)
    }

    /// Alarm at a time of day on the given weekdays
    pub fn set_weekly_alarm(
        &mut self,
        days: WeekdayMask,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> RegResult<(), IF::BusError> {
        if !is_valid_time(hour, minute, second) {
            return Err(Error::InvalidArgument);
        }
        let format = self.hour_format()?;
        self.arm_alarm()?;
        let raw = rtc::encode_weekly_alarm(days, hour, minute, second, format);
        self.interface.write_register(reg::ALARM_SECONDS, &raw)
    }

    /// Acknowledge a fired alarm or countdown
    ///
    /// Reading control register 1 clears the interrupt flags.
    pub fn clear_alarm(&mut self) -> RegResult<(), IF::BusError> {
        self.read_byte(reg::CTR1)?;
        Ok(())
    }

    /// Start a countdown interrupt, clamped to 24 bits of seconds
    pub fn countdown(&mut self, seconds: u32) -> RegResult<(), IF::BusError> {
        self.clear_alarm()?;
        self.write_byte(reg::CTR2, reg::CTR2_WRITE_LATCH)?;
        self.write_byte(reg::CTR2, reg::CTR2_COUNTDOWN_INT)?;
        self.write_byte(reg::CTR3, reg::CTR3_COUNTDOWN_1HZ)?;
        let raw = rtc::encode_countdown(seconds);
        self.interface.write_register(reg::COUNTDOWN, &raw)
    }

    /// Die temperature in degrees Celsius
    pub fn temperature_c(&mut self) -> RegResult<i8, IF::BusError> {
        let raw = self.read_byte(reg::TEMPERATURE)?;
        Ok(i8::from_ne_bytes([raw]))
    }

    /// Backup battery voltage in volts
    pub fn battery_voltage(&mut self) -> RegResult<f32, IF::BusError> {
        let raw = self.read_block::<2>(reg::BATTERY)?;
        Ok(rtc::decode_battery_voltage(raw))
    }

    /// Turn the 32.768 kHz clock output on
    pub fn enable_32k(&mut self) -> RegResult<(), IF::BusError> {
        let [ctr3] = self.read_block_exact::<1>(reg::CTR3)?;
        self.write_byte(reg::CTR3, ctr3 & !reg::CTR3_CLKOUT_DISABLE)?;
        self.interface.delay_ms(CLOCK_OUTPUT_SETTLE_MS);
        Ok(())
    }

    /// Turn the 32.768 kHz clock output off
    pub fn disable_32k(&mut self) -> RegResult<(), IF::BusError> {
        let [ctr3] = self.read_block_exact::<1>(reg::CTR3)?;
        self.write_byte(reg::CTR3, ctr3 | reg::CTR3_CLKOUT_DISABLE)?;
        self.interface.delay_ms(CLOCK_OUTPUT_SETTLE_MS);
        Ok(())
    }

    /// Store a byte in the RTC's battery-backed SRAM
    pub fn write_sram(&mut self, addr: u8, value: u8) -> RegResult<(), IF::BusError> {
        check_sram(addr)?;
        self.write_byte(addr, value)
    }

    /// Read a byte from SRAM
    pub fn read_sram(&mut self, addr: u8) -> RegResult<u8, IF::BusError> {
        check_sram(addr)?;
        self.read_byte(addr)
    }

    /// Erase a byte of SRAM
    pub fn clear_sram(&mut self, addr: u8) -> RegResult<(), IF::BusError> {
        check_sram(addr)?;
        self.write_byte(addr, SRAM_ERASED)
    }

    /// Route the alarm to the interrupt pin; must precede the alarm block
    fn arm_alarm(&mut self) -> RegResult<(), IF::BusError> {
        self.write_byte(reg::CTR3, reg::CTR3_ALARM_ARM)?;
        self.write_byte(reg::CTR2, reg::CTR2_ALARM_INT)
    }
}

fn check_sram<E>(addr: u8) -> RegResult<(), E> {
    if (SRAM_START..=SRAM_END).contains(&addr) {
        Ok(())
    } else {
        Err(Error::InvalidSramAddress(addr))
    }
}
