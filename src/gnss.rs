//! GNSS register decoders
//!
//! The receiver firmware parses NMEA itself and exposes the fields as
//! plain binary registers. These functions turn register images into
//! typed values and plan the chunked bulk read of raw sentences.

use crate::types::{GeoCoordinate, GnssDate, GnssUtc};

/// Decode the 4-byte date block (year big-endian, month, day)
#[must_use]
pub fn decode_date(raw: &[u8; 4]) -> GnssDate {
    GnssDate {
        year: u16::from_be_bytes([raw[0], raw[1]]),
        month: raw[2],
        day: raw[3],
    }
}

/// Decode the 3-byte UTC block
#[must_use]
pub fn decode_utc(raw: &[u8; 3]) -> GnssUtc {
    GnssUtc {
        hour: raw[0],
        minute: raw[1],
        second: raw[2],
    }
}

/// Decode a 6-byte coordinate block
///
/// Layout: whole degrees, whole minutes, 24-bit big-endian fractional
/// minute (units of 1e-5 minute), direction character.
#[must_use]
pub fn decode_coordinate(raw: &[u8; 6]) -> GeoCoordinate {
    GeoCoordinate {
        degrees: raw[0],
        minutes: raw[1],
        minute_fraction: u32::from_be_bytes([0, raw[2], raw[3], raw[4]]),
        direction: raw[5],
    }
}

/// Decode a 3-byte altitude/speed/course block
///
/// Bit 7 of the first byte is a sign flag. The module firmware documents
/// no negative encoding, so the flag is masked off and the value is
/// always returned as positive.
#[must_use]
pub fn decode_fixed_point(raw: &[u8; 3]) -> f64 {
    let whole = u16::from_be_bytes([raw[0] & 0x7F, raw[1]]);
    f64::from(whole) + f64::from(raw[2]) / 100.0
}

/// Whether the sign flag of a fixed-point block is set
#[must_use]
pub const fn fixed_point_flag(raw: &[u8; 3]) -> bool {
    raw[0] & 0x80 != 0
}

/// Replace the NUL separators of a sentence chunk with newlines
pub fn separate_sentences(chunk: &mut [u8]) {
    for byte in chunk.iter_mut().filter(|b| **b == 0) {
        *byte = b'\n';
    }
}

/// Sizes of the reads needed to drain `total` bytes in `max`-byte chunks
///
/// Every chunk is full except possibly the last; an exact multiple yields
/// no empty trailing chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkPlan {
    remaining: usize,
    max: usize,
}

impl ChunkPlan {
    /// Plan reads of `total` bytes with at most `max` per read
    #[must_use]
    pub const fn new(total: usize, max: usize) -> Self {
        Self {
            remaining: if max == 0 { 0 } else { total },
            max,
        }
    }
}

impl Iterator for ChunkPlan {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let size = self.remaining.min(self.max);
        self.remaining -= size;
        Some(size)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = if self.max == 0 {
            0
        } else {
            self.remaining.div_ceil(self.max)
        };
        (n, Some(n))
    }
}

impl ExactSizeIterator for ChunkPlan {}
