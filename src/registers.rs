//! Register map of the module
//!
//! GNSS and RTC share one 8-bit address space on the module:
//!
//! ```text
//! 0x00..=0x29  GNSS receiver (date, time, position, bulk sentences)
//! 0x2A..=0x2F  module functions (calibration, RTC staging)
//! 0x30..=0x79  RTC, offset by 0x30 from the chip's own register map
//! 0xAA..=0xAF  identity (UART only)
//! ```
//!
//! The RTC sits behind the module MCU. A read in its window must first be
//! staged by writing `[reg, len]` to [`module::RTC_READ_REQUEST`].

/// GNSS receiver registers
pub mod gnss {
    /// Year, big-endian high byte
    pub const YEAR_H: u8 = 0x00;
    /// Year, low byte
    pub const YEAR_L: u8 = 0x01;
    /// Month 1-12
    pub const MONTH: u8 = 0x02;
    /// Day of month 1-31
    pub const DATE: u8 = 0x03;
    /// UTC hour
    pub const HOUR: u8 = 0x04;
    /// UTC minute
    pub const MINUTE: u8 = 0x05;
    /// UTC second
    pub const SECOND: u8 = 0x06;

    /// Latitude whole degrees, followed by minutes, fraction and direction
    pub const LAT_DEGREES: u8 = 0x07;
    /// Latitude whole minutes
    pub const LAT_MINUTES: u8 = 0x08;
    /// Latitude fractional minute, bits 23..16
    pub const LAT_FRACTION_H: u8 = 0x09;
    /// Latitude hemisphere character
    pub const LAT_DIRECTION: u8 = 0x0C;

    /// Longitude whole degrees, followed by minutes, fraction and direction
    pub const LON_DEGREES: u8 = 0x0D;
    /// Longitude whole minutes
    pub const LON_MINUTES: u8 = 0x0E;
    /// Longitude fractional minute, bits 23..16
    pub const LON_FRACTION_H: u8 = 0x0F;
    /// Longitude hemisphere character
    pub const LON_DIRECTION: u8 = 0x12;

    /// Satellites used in the fix
    pub const SATELLITES_USED: u8 = 0x13;

    /// Altitude: flag/high byte, low byte, hundredths
    pub const ALTITUDE: u8 = 0x14;
    /// Speed over ground: flag/high byte, low byte, hundredths
    pub const SPEED_OVER_GROUND: u8 = 0x17;
    /// Course over ground: flag/high byte, low byte, hundredths
    pub const COURSE_OVER_GROUND: u8 = 0x1A;

    /// Writing [`START_SNAPSHOT`] freezes a sentence snapshot for bulk reads
    pub const START_GET: u8 = 0x1D;
    /// Module I2C address register
    pub const I2C_ADDR: u8 = 0x1E;
    /// Snapshot length, big-endian high byte
    pub const DATA_LEN_H: u8 = 0x1F;
    /// Snapshot length, low byte
    pub const DATA_LEN_L: u8 = 0x20;
    /// Streaming window over the snapshot
    pub const ALL_DATA: u8 = 0x21;

    /// Constellation selection
    pub const GNSS_MODE: u8 = 0x22;
    /// Receiver power: 0 on, 1 off
    pub const SLEEP_MODE: u8 = 0x23;

    /// Magic value written to [`START_GET`]
    pub const START_SNAPSHOT: u8 = 0x55;
    /// Receiver powered
    pub const POWER_ON: u8 = 0;
    /// Receiver asleep
    pub const POWER_OFF: u8 = 1;
}

/// Module function registers
pub mod module {
    /// Calibration status (read consumes "complete")
    pub const CALIB_STATUS: u8 = 0x2A;
    /// Automatic calibration interval in hours, 0 disables
    pub const CALIB_INTERVAL: u8 = 0x2B;
    /// RTC staging request: `[reg, len]`
    pub const RTC_READ_REQUEST: u8 = 0x2E;
    /// Second byte of the staging request
    pub const RTC_READ_LEN: u8 = 0x2F;

    /// Product ID, little-endian u16
    pub const PRODUCT_ID: u8 = 0xAA;
    /// Vendor ID, little-endian u16
    pub const VENDOR_ID: u8 = 0xAC;
    /// Firmware version, little-endian u16
    pub const VERSION: u8 = 0xAE;
}

/// RTC registers as seen through the module (chip address + 0x30)
pub mod rtc {
    /// Offset of the RTC window in the module address space
    pub const OFFSET: u8 = 0x30;

    /// Seconds, BCD. Time block is 7 registers starting here
    pub const SECONDS: u8 = OFFSET;
    /// Minutes, BCD
    pub const MINUTES: u8 = OFFSET + 0x01;
    /// Hours, BCD with format flags
    pub const HOURS: u8 = OFFSET + 0x02;
    /// Weekday 0-6, Sunday = 0
    pub const WEEKDAY: u8 = OFFSET + 0x03;
    /// Day of month, BCD
    pub const DAY: u8 = OFFSET + 0x04;
    /// Month, BCD
    pub const MONTH: u8 = OFFSET + 0x05;
    /// Year since 2000, BCD
    pub const YEAR: u8 = OFFSET + 0x06;

    /// Alarm block is 8 registers starting here (7 time + enable)
    pub const ALARM_SECONDS: u8 = OFFSET + 0x07;
    /// Alarm enable register
    pub const ALARM_CONTROL: u8 = OFFSET + 0x0E;
    /// Control register 1 (interrupt flags, read clears)
    pub const CTR1: u8 = OFFSET + 0x0F;
    /// Control register 2 (interrupt source selection)
    pub const CTR2: u8 = OFFSET + 0x10;
    /// Control register 3 (clock output, countdown source)
    pub const CTR3: u8 = OFFSET + 0x11;
    /// Countdown value, 3 bytes little-endian
    pub const COUNTDOWN: u8 = OFFSET + 0x13;
    /// Die temperature, signed degrees Celsius
    pub const TEMPERATURE: u8 = OFFSET + 0x16;
    /// I2C control
    pub const I2C_CONTROL: u8 = OFFSET + 0x17;
    /// Backup battery level, 2 bytes
    pub const BATTERY: u8 = OFFSET + 0x1A;

    /// Hour register bit 7: 24-hour mode
    pub const HOUR_24: u8 = 0x80;
    /// Hour register bit 5: PM in 12-hour mode
    pub const HOUR_PM: u8 = 0x20;

    /// CTR3 value arming an alarm
    pub const CTR3_ALARM_ARM: u8 = 0x80;
    /// CTR2 value routing the alarm to the interrupt pin
    pub const CTR2_ALARM_INT: u8 = 0x92;
    /// Alarm enable: year, month and day
    pub const ALARM_ENABLE_DATE: u8 = 0x70;
    /// Alarm enable: weekday, hour, minute and second
    pub const ALARM_ENABLE_WEEKLY: u8 = 0x0F;

    /// CTR2 write latch preceding a countdown setup
    pub const CTR2_WRITE_LATCH: u8 = 0x80;
    /// CTR2 value routing the countdown to the interrupt pin
    pub const CTR2_COUNTDOWN_INT: u8 = 0xB4;
    /// CTR3 value selecting the 1 Hz countdown source
    pub const CTR3_COUNTDOWN_1HZ: u8 = 0x20;
    /// CTR3 bit 6 disables the 32.768 kHz output
    pub const CTR3_CLKOUT_DISABLE: u8 = 0x40;

    /// I2C control value enabling host access
    pub const I2C_CONTROL_ENABLE: u8 = 0x80;

    /// Inclusive start of the staging window
    pub const WINDOW_START: u8 = 0x30;
    /// Inclusive end of the staging window
    pub const WINDOW_END: u8 = 0x79;
}

/// Whether a read of `len` bytes at `reg` must be staged first
#[must_use]
pub const fn requires_staging(reg: u8, len: usize) -> bool {
    reg >= rtc::WINDOW_START && reg <= rtc::WINDOW_END && len != 0
}
