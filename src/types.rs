//! Shared types used across the driver
//!
//! Values decoded from or encoded into the module's registers. Types that
//! carry user input validate in their constructors so encoders never see
//! out-of-range fields.

use core::fmt;
use core::ops::BitOr;

use crate::config::{RTC_BASE_YEAR, RTC_MAX_YEAR};
use crate::rtc;

/// Physical link to the module
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transport {
    /// I2C at [`crate::config::I2C_ADDRESS`]
    I2c,
    /// UART with the `0xBB`/`0xCC` framing
    Uart,
}

/// Hour system the RTC is running in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HourFormat {
    /// 1-12 with AM/PM flag
    Hour12,
    /// 0-23
    Hour24,
}

impl HourFormat {
    /// Read the format flag out of a raw hour register
    #[must_use]
    pub const fn from_hour_register(raw: u8) -> Self {
        if raw & crate::registers::rtc::HOUR_24 != 0 {
            Self::Hour24
        } else {
            Self::Hour12
        }
    }
}

/// Half of the day in 12-hour mode
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Meridiem {
    /// Midnight to noon
    Am,
    /// Noon to midnight
    Pm,
}

impl Meridiem {
    /// "AM" or "PM"
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Am => "AM",
            Self::Pm => "PM",
        }
    }
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hour as stored by the RTC, tagged with its format
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hour {
    /// 24-hour clock, 0-23
    TwentyFour(u8),
    /// 12-hour clock, 1-12
    Twelve {
        /// Clock-face hour
        hour: u8,
        /// AM or PM
        meridiem: Meridiem,
    },
}

impl Hour {
    /// Express a 0-23 hour in the given format
    ///
    /// Midnight maps to 12 AM and noon to 12 PM.
    #[must_use]
    pub const fn from_24h(hour: u8, format: HourFormat) -> Self {
        match format {
            HourFormat::Hour24 => Self::TwentyFour(hour),
            HourFormat::Hour12 => match hour {
                0 => Self::Twelve { hour: 12, meridiem: Meridiem::Am },
                1..=11 => Self::Twelve { hour, meridiem: Meridiem::Am },
                12 => Self::Twelve { hour: 12, meridiem: Meridiem::Pm },
                _ => Self::Twelve { hour: hour - 12, meridiem: Meridiem::Pm },
            },
        }
    }

    /// Hour on the 24-hour clock
    #[must_use]
    pub const fn as_24h(self) -> u8 {
        match self {
            Self::TwentyFour(hour) => hour,
            Self::Twelve { hour: 12, meridiem: Meridiem::Am } => 0,
            Self::Twelve { hour: 12, meridiem: Meridiem::Pm } => 12,
            Self::Twelve { hour, meridiem: Meridiem::Am } => hour,
            Self::Twelve { hour, meridiem: Meridiem::Pm } => hour + 12,
        }
    }

    /// Clock-face value in this hour's own format
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Self::TwentyFour(hour) | Self::Twelve { hour, .. } => hour,
        }
    }

    /// The format this hour is expressed in
    #[must_use]
    pub const fn format(self) -> HourFormat {
        match self {
            Self::TwentyFour(_) => HourFormat::Hour24,
            Self::Twelve { .. } => HourFormat::Hour12,
        }
    }

    /// AM/PM, `None` on the 24-hour clock
    #[must_use]
    pub const fn meridiem(self) -> Option<Meridiem> {
        match self {
            Self::TwentyFour(_) => None,
            Self::Twelve { meridiem, .. } => Some(meridiem),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Hour {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::TwentyFour(hour) => defmt::write!(f, "{:02}", hour),
            Self::Twelve { hour, meridiem } => defmt::write!(f, "{:02} {}", hour, meridiem.as_str()),
        }
    }
}

/// Day of the week, numbered as the RTC stores it
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Weekday {
    /// 0
    Sunday = 0,
    /// 1
    Monday = 1,
    /// 2
    Tuesday = 2,
    /// 3
    Wednesday = 3,
    /// 4
    Thursday = 4,
    /// 5
    Friday = 5,
    /// 6
    Saturday = 6,
}

impl Weekday {
    /// All days, Sunday first
    pub const ALL: [Self; 7] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    /// Day for a register index, `None` above 6
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 7 {
            Some(Self::ALL[index as usize])
        } else {
            None
        }
    }

    /// Register index, Sunday = 0
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// English name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sunday => "Sunday",
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
        }
    }

    /// Single-day alarm mask
    #[must_use]
    pub const fn mask(self) -> WeekdayMask {
        WeekdayMask(1 << self.index())
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Set of weekdays a weekly alarm fires on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WeekdayMask(u8);

impl WeekdayMask {
    /// Sunday only
    pub const SUNDAY: Self = Self(0x01);
    /// Monday only
    pub const MONDAY: Self = Self(0x02);
    /// Tuesday only
    pub const TUESDAY: Self = Self(0x04);
    /// Wednesday only
    pub const WEDNESDAY: Self = Self(0x08);
    /// Thursday only
    pub const THURSDAY: Self = Self(0x10);
    /// Friday only
    pub const FRIDAY: Self = Self(0x20);
    /// Saturday only
    pub const SATURDAY: Self = Self(0x40);
    /// Every day
    pub const EVERY_DAY: Self = Self(0x7F);
    /// Monday to Friday
    pub const WORKDAYS: Self = Self(0x3E);

    /// Mask from raw register bits (bit 7 ignored)
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & 0x7F)
    }

    /// Raw register bits
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether `day` is in the set
    #[must_use]
    pub const fn contains(self, day: Weekday) -> bool {
        self.0 & day.mask().0 != 0
    }
}

impl BitOr for WeekdayMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl From<Weekday> for WeekdayMask {
    fn from(day: Weekday) -> Self {
        day.mask()
    }
}

/// Calendar date and 24-hour time to program into the RTC
///
/// Construction validates every field; the RTC can only hold years
/// 2000 through 2099.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateTime {
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
}

impl DateTime {
    /// Create a date-time, `None` if any field is out of range
    #[must_use]
    pub fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Option<Self> {
        if !is_valid_date(year, month, day) || !is_valid_time(hour, minute, second) {
            return None;
        }
        Some(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        })
    }

    /// Full year
    #[must_use]
    pub const fn year(&self) -> u16 {
        self.year
    }

    /// Month 1-12
    #[must_use]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Day of month
    #[must_use]
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Hour 0-23
    #[must_use]
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    /// Minute 0-59
    #[must_use]
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    /// Second 0-59
    #[must_use]
    pub const fn second(&self) -> u8 {
        self.second
    }

    /// Day of the week this date falls on
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        rtc::weekday_of(self)
    }
}

/// Whether a date is representable by the RTC
#[must_use]
pub fn is_valid_date(year: u16, month: u8, day: u8) -> bool {
    (RTC_BASE_YEAR..=RTC_MAX_YEAR).contains(&year)
        && (1..=12).contains(&month)
        && day >= 1
        && day <= rtc::days_in_month(year, month)
}

/// Whether a 24-hour time is valid
#[must_use]
pub const fn is_valid_time(hour: u8, minute: u8, second: u8) -> bool {
    hour < 24 && minute < 60 && second < 60
}

/// Time sample read back from the RTC
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RtcTime {
    /// Full year
    pub year: u16,
    /// Month 1-12
    pub month: u8,
    /// Day of month
    pub day: u8,
    /// Weekday register as written by `set_time`, `None` if out of range
    pub weekday: Option<Weekday>,
    /// Hour in the format the RTC reported
    pub hour: Hour,
    /// Minute
    pub minute: u8,
    /// Second
    pub second: u8,
}

impl RtcTime {
    /// Hour on the 24-hour clock regardless of the RTC format
    #[must_use]
    pub const fn hour_24(&self) -> u8 {
        self.hour.as_24h()
    }

    /// Hour format the sample was stored in
    #[must_use]
    pub const fn format(&self) -> HourFormat {
        self.hour.format()
    }
}

impl fmt::Display for RtcTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year,
            self.month,
            self.day,
            self.hour.value(),
            self.minute,
            self.second
        )?;
        if let Some(meridiem) = self.hour.meridiem() {
            write!(f, " {meridiem}")?;
        }
        Ok(())
    }
}

/// UTC date reported by the GNSS receiver
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GnssDate {
    /// Full year
    pub year: u16,
    /// Month 1-12
    pub month: u8,
    /// Day of month
    pub day: u8,
}

/// UTC time of day reported by the GNSS receiver
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GnssUtc {
    /// Hour 0-23
    pub hour: u8,
    /// Minute
    pub minute: u8,
    /// Second
    pub second: u8,
}

/// Hemisphere of a coordinate
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Hemisphere {
    /// 'N'
    North,
    /// 'S'
    South,
    /// 'E'
    East,
    /// 'W'
    West,
}

impl Hemisphere {
    /// Parse the NMEA direction character
    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'N' => Some(Self::North),
            b'S' => Some(Self::South),
            b'E' => Some(Self::East),
            b'W' => Some(Self::West),
            _ => None,
        }
    }

    /// Sign applied to decimal degrees
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::North | Self::East => 1.0,
            Self::South | Self::West => -1.0,
        }
    }
}

/// Latitude or longitude as the receiver reports it
///
/// Both derived forms come from the same three raw fields:
/// `ddmm()` gives DDMM.MMMMM and `decimal_degrees()` gives D.DDDDDD.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct GeoCoordinate {
    /// Whole degrees
    pub degrees: u8,
    /// Whole minutes
    pub minutes: u8,
    /// Fractional minute in units of 1e-5 minute
    pub minute_fraction: u32,
    /// Direction character, `N`/`S`/`E`/`W` (0 without a fix)
    pub direction: u8,
}

impl GeoCoordinate {
    /// Scale of [`Self::minute_fraction`]
    pub const FRACTION_SCALE: f64 = 100_000.0;

    /// Fractional part of the minute, 5 decimal digits
    #[must_use]
    pub fn fractional_minutes(&self) -> f64 {
        f64::from(self.minute_fraction) / Self::FRACTION_SCALE
    }

    /// DDMM.MMMMM form
    #[must_use]
    pub fn ddmm(&self) -> f64 {
        f64::from(self.degrees) * 100.0 + f64::from(self.minutes) + self.fractional_minutes()
    }

    /// Unsigned decimal degrees
    #[must_use]
    pub fn decimal_degrees(&self) -> f64 {
        f64::from(self.degrees)
            + f64::from(self.minutes) / 60.0
            + self.fractional_minutes() / 60.0
    }

    /// Decimal degrees, negative in the southern and western hemispheres
    #[must_use]
    pub fn signed_degrees(&self) -> f64 {
        let sign = self.hemisphere().map_or(1.0, Hemisphere::sign);
        sign * self.decimal_degrees()
    }

    /// Parsed direction character
    #[must_use]
    pub const fn hemisphere(&self) -> Option<Hemisphere> {
        Hemisphere::from_byte(self.direction)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for GeoCoordinate {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "{} deg {}.{:05} min {}",
            self.degrees,
            self.minutes,
            self.minute_fraction,
            self.direction as char
        );
    }
}

/// Constellations the receiver tracks
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum GnssMode {
    /// GPS
    Gps = 1,
    /// BeiDou
    BeiDou = 2,
    /// GPS + BeiDou
    GpsBeiDou = 3,
    /// GLONASS
    Glonass = 4,
    /// GPS + GLONASS
    GpsGlonass = 5,
    /// BeiDou + GLONASS
    BeiDouGlonass = 6,
    /// GPS + BeiDou + GLONASS
    GpsBeiDouGlonass = 7,
}

impl GnssMode {
    /// Decode the mode register
    #[must_use]
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            1 => Some(Self::Gps),
            2 => Some(Self::BeiDou),
            3 => Some(Self::GpsBeiDou),
            4 => Some(Self::Glonass),
            5 => Some(Self::GpsGlonass),
            6 => Some(Self::BeiDouGlonass),
            7 => Some(Self::GpsBeiDouGlonass),
            _ => None,
        }
    }

    /// Register value
    #[must_use]
    pub const fn as_raw(self) -> u8 {
        self as u8
    }
}

/// State of the GNSS-to-RTC time sync
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum CalibrationStatus {
    /// No calibration pending or reported
    NotCalibrated = 0x00,
    /// Sync finished; reading this clears it back to `NotCalibrated`
    Complete = 0x01,
    /// Sync in progress
    InProgress = 0x02,
}

impl CalibrationStatus {
    /// Decode the status register
    #[must_use]
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0x00 => Some(Self::NotCalibrated),
            0x01 => Some(Self::Complete),
            0x02 => Some(Self::InProgress),
            _ => None,
        }
    }

    /// Register value
    #[must_use]
    pub const fn as_raw(self) -> u8 {
        self as u8
    }
}

/// Identity registers read when a UART link is brought up
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceIdentity {
    /// Product ID, must be [`crate::config::PRODUCT_ID`]
    pub product_id: u16,
    /// Vendor ID
    pub vendor_id: u16,
    /// Firmware version
    pub version: u16,
}
