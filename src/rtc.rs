//! RTC register codec
//!
//! Pure conversions between the RTC's BCD register images and the
//! driver's value types. Nothing here touches the bus.
//!
//! Hour register layout:
//!
//! ```text
//! bit 7     1 = 24-hour mode
//! bit 5     PM flag (12-hour mode only)
//! bits 5..0 BCD hour (24-hour mode)
//! bits 4..0 BCD hour (12-hour mode)
//! ```

use crate::config::{MAX_COUNTDOWN_SECONDS, RTC_BASE_YEAR};
use crate::registers::rtc::{ALARM_ENABLE_DATE, ALARM_ENABLE_WEEKLY, HOUR_24, HOUR_PM};
use crate::types::{
    is_valid_date, DateTime, Hour, HourFormat, Meridiem, RtcTime, Weekday, WeekdayMask,
};

const DAYS_IN_MONTH: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// BCD byte to binary
///
/// Raw value is `16*hi + lo`, the decimal value is `10*hi + lo`.
#[must_use]
pub const fn bcd2bin(value: u8) -> u8 {
    value - 6 * (value >> 4)
}

/// Binary (0-99) to BCD byte
#[must_use]
pub const fn bin2bcd(value: u8) -> u8 {
    value.wrapping_add(6 * (value / 10))
}

/// Encode a 0-23 hour into the hour register for `format`
#[must_use]
pub const fn encode_hour(hour: u8, format: HourFormat) -> u8 {
    match Hour::from_24h(hour, format) {
        Hour::TwentyFour(h) => bin2bcd(h) | HOUR_24,
        Hour::Twelve { hour: h, meridiem: Meridiem::Am } => bin2bcd(h),
        Hour::Twelve { hour: h, meridiem: Meridiem::Pm } => bin2bcd(h) | HOUR_PM,
    }
}

/// Decode an hour register using its own format flag
#[must_use]
pub const fn decode_hour(raw: u8) -> Hour {
    if raw & HOUR_24 != 0 {
        Hour::TwentyFour(bcd2bin(raw & 0x7F))
    } else {
        let meridiem = if raw & HOUR_PM != 0 { Meridiem::Pm } else { Meridiem::Am };
        Hour::Twelve {
            hour: bcd2bin(raw & 0x1F),
            meridiem,
        }
    }
}

/// Rewrite an hour register into `target` format, unchanged if it already is
#[must_use]
pub const fn convert_hour_register(raw: u8, target: HourFormat) -> u8 {
    let current = HourFormat::from_hour_register(raw);
    if matches!(
        (current, target),
        (HourFormat::Hour12, HourFormat::Hour12) | (HourFormat::Hour24, HourFormat::Hour24)
    ) {
        return raw;
    }
    encode_hour(decode_hour(raw).as_24h(), target)
}

fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Days in `month` of `year`, 0 for an invalid month
#[must_use]
pub fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        1..=12 => DAYS_IN_MONTH[usize::from(month - 1)],
        _ => 0,
    }
}

/// Days since 2000-01-01, `None` for a date the RTC cannot hold
#[must_use]
pub fn date_to_days(year: u16, month: u8, day: u8) -> Option<u16> {
    is_valid_date(year, month, day).then(|| day_number(year, month, day))
}

/// Weekday of a date, 2000-01-01 being a Saturday
#[must_use]
pub fn weekday(year: u16, month: u8, day: u8) -> Option<Weekday> {
    date_to_days(year, month, day).map(weekday_from_days)
}

/// Weekday of an already validated date
pub(crate) fn weekday_of(time: &DateTime) -> Weekday {
    weekday_from_days(day_number(time.year(), time.month(), time.day()))
}

fn weekday_from_days(days: u16) -> Weekday {
    Weekday::ALL[usize::from((days + 6) % 7)]
}

// callers validate 2000..=2099 and a calendar day
fn day_number(year: u16, month: u8, day: u8) -> u16 {
    let y = year - RTC_BASE_YEAR;
    let mut days = u16::from(day);
    for m in 1..month {
        days += u16::from(DAYS_IN_MONTH[usize::from(m - 1)]);
    }
    if month > 2 && y % 4 == 0 {
        days += 1;
    }
    days + 365 * y + (y + 3) / 4 - 1
}

/// Encode the 7-register time block
#[must_use]
pub fn encode_time(time: &DateTime, format: HourFormat) -> [u8; 7] {
    [
        bin2bcd(time.second()),
        bin2bcd(time.minute()),
        encode_hour(time.hour(), format),
        bin2bcd(time.weekday().index()),
        bin2bcd(time.day()),
        bin2bcd(time.month()),
        bin2bcd(year_register(time.year())),
    ]
}

/// Decode the 7-register time block
#[must_use]
pub fn decode_time(raw: &[u8; 7]) -> RtcTime {
    RtcTime {
        year: RTC_BASE_YEAR + u16::from(bcd2bin(raw[6])),
        month: bcd2bin(raw[5]),
        day: bcd2bin(raw[4]),
        weekday: Weekday::from_index(bcd2bin(raw[3])),
        hour: decode_hour(raw[2]),
        minute: bcd2bin(raw[1]),
        second: bcd2bin(raw[0]),
    }
}

/// Encode the 8-register alarm block for a one-shot date alarm
#[must_use]
pub fn encode_date_alarm(year: u16, month: u8, day: u8) -> [u8; 8] {
    [
        0,
        0,
        0,
        0,
        bin2bcd(day),
        bin2bcd(month),
        bin2bcd(year_register(year)),
        ALARM_ENABLE_DATE,
    ]
}

/// Encode the 8-register alarm block for a weekly alarm
#[must_use]
pub fn encode_weekly_alarm(
    days: WeekdayMask,
    hour: u8,
    minute: u8,
    second: u8,
    format: HourFormat,
) -> [u8; 8] {
    [
        bin2bcd(second),
        bin2bcd(minute),
        encode_hour(hour, format),
        days.bits(),
        0,
        0,
        0,
        ALARM_ENABLE_WEEKLY,
    ]
}

/// Countdown register image, clamped to 24 bits, little-endian
#[must_use]
pub fn encode_countdown(seconds: u32) -> [u8; 3] {
    let [b0, b1, b2, _] = seconds.min(MAX_COUNTDOWN_SECONDS).to_le_bytes();
    [b0, b1, b2]
}

/// Backup battery voltage from the 2-byte battery register
///
/// Bit 7 of the first byte is bit 8 of a value in units of 10 mV.
#[must_use]
pub fn decode_battery_voltage(raw: [u8; 2]) -> f32 {
    let centivolts = (u16::from(raw[0] & 0x80) << 1) | u16::from(raw[1]);
    f32::from(centivolts) / 100.0
}

fn year_register(year: u16) -> u8 {
    u8::try_from(year.saturating_sub(RTC_BASE_YEAR) % 100).unwrap_or(0)
}
