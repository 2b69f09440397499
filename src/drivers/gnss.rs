//! GNSS receiver operations

use super::GnssRtc;
use crate::config::{MAX_SENTENCE_LEN, POWER_SWITCH_DELAY_MS, SENTENCE_PREPARE_DELAY_MS, UART_MAX_READ_LEN};
use crate::error::Error;
use crate::gnss::{self, ChunkPlan};
use crate::hal::{RegResult, RegisterInterface};
use crate::registers::gnss as reg;
use crate::types::{GeoCoordinate, GnssDate, GnssMode, GnssUtc};

impl<IF: RegisterInterface> GnssRtc<IF> {
    /// UTC date of the last fix
    pub fn gnss_date(&mut self) -> RegResult<GnssDate, IF::BusError> {
        let raw = self.read_block::<4>(reg::YEAR_H)?;
        Ok(gnss::decode_date(&raw))
    }

    /// UTC time of the last fix
    pub fn gnss_utc(&mut self) -> RegResult<GnssUtc, IF::BusError> {
        let raw = self.read_block::<3>(reg::HOUR)?;
        Ok(gnss::decode_utc(&raw))
    }

    /// Latitude of the last fix
    pub fn latitude(&mut self) -> RegResult<GeoCoordinate, IF::BusError> {
        let raw = self.read_block::<6>(reg::LAT_DEGREES)?;
        Ok(gnss::decode_coordinate(&raw))
    }

    /// Longitude of the last fix
    pub fn longitude(&mut self) -> RegResult<GeoCoordinate, IF::BusError> {
        let raw = self.read_block::<6>(reg::LON_DEGREES)?;
        Ok(gnss::decode_coordinate(&raw))
    }

    /// Number of satellites used in the fix
    pub fn satellites_in_use(&mut self) -> RegResult<u8, IF::BusError> {
        self.read_byte(reg::SATELLITES_USED)
    }

    /// Altitude in meters
    pub fn altitude(&mut self) -> RegResult<f64, IF::BusError> {
        let raw = self.read_block::<3>(reg::ALTITUDE)?;
        Ok(gnss::decode_fixed_point(&raw))
    }

    /// Speed over ground in knots
    pub fn speed_over_ground(&mut self) -> RegResult<f64, IF::BusError> {
        let raw = self.read_block::<3>(reg::SPEED_OVER_GROUND)?;
        Ok(gnss::decode_fixed_point(&raw))
    }

    /// Course over ground in degrees
    pub fn course_over_ground(&mut self) -> RegResult<f64, IF::BusError> {
        let raw = self.read_block::<3>(reg::COURSE_OVER_GROUND)?;
        Ok(gnss::decode_fixed_point(&raw))
    }

    /// Select the constellations the receiver tracks
    pub fn set_gnss_mode(&mut self, mode: GnssMode) -> RegResult<(), IF::BusError> {
        self.write_byte(reg::GNSS_MODE, mode.as_raw())
    }

    /// Constellations the receiver is tracking
    pub fn gnss_mode(&mut self) -> RegResult<GnssMode, IF::BusError> {
        let raw = self.read_byte(reg::GNSS_MODE)?;
        GnssMode::from_raw(raw).ok_or(Error::InvalidRegisterValue {
            register: reg::GNSS_MODE,
            value: raw,
        })
    }

    /// Wake the receiver
    pub fn enable_power(&mut self) -> RegResult<(), IF::BusError> {
        self.write_byte(reg::SLEEP_MODE, reg::POWER_ON)?;
        self.interface.delay_ms(POWER_SWITCH_DELAY_MS);
        Ok(())
    }

    /// Put the receiver to sleep
    pub fn disable_power(&mut self) -> RegResult<(), IF::BusError> {
        self.write_byte(reg::SLEEP_MODE, reg::POWER_OFF)?;
        self.interface.delay_ms(POWER_SWITCH_DELAY_MS);
        Ok(())
    }

    /// Freeze a sentence snapshot and return its length in bytes
    pub fn sentence_length(&mut self) -> RegResult<u16, IF::BusError> {
        self.write_byte(reg::START_GET, reg::START_SNAPSHOT)?;
        self.interface.delay_ms(SENTENCE_PREPARE_DELAY_MS);
        let raw = self.read_block::<2>(reg::DATA_LEN_H)?;
        Ok(u16::from_be_bytes(raw))
    }

    /// Stream the raw NMEA sentences of a fresh snapshot into `sink`
    ///
    /// The snapshot is read in chunks of at most the transport's maximum
    /// read size. NUL separators are replaced with newlines before each
    /// chunk is handed to `sink`. Returns the number of bytes delivered.
    ///
    /// An empty snapshot delivers nothing. A length above
    /// [`MAX_SENTENCE_LEN`] fails with [`Error::SentenceLength`] before
    /// any sentence data is read.
    pub fn read_all_sentences<F>(&mut self, mut sink: F) -> RegResult<usize, IF::BusError>
    where
        F: FnMut(&[u8]),
    {
        let len = self.sentence_length()?;
        if len == 0 {
            return Ok(0);
        }
        if len > MAX_SENTENCE_LEN {
            warn!("implausible sentence length {}", len);
            return Err(Error::SentenceLength(len));
        }

        let mut buf = [0u8; UART_MAX_READ_LEN];
        let max = IF::MAX_READ_LEN.min(buf.len());
        let mut delivered = 0;
        for size in ChunkPlan::new(usize::from(len), max) {
            let chunk = &mut buf[..size];
            chunk.fill(0);
            let received = self.interface.read_register(reg::ALL_DATA, chunk)?;
            let chunk = &mut chunk[..received];
            gnss::separate_sentences(chunk);
            sink(chunk);
            delivered += received;
        }
        Ok(delivered)
    }
}
