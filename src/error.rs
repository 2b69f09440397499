//! Driver error type

use core::fmt;

/// Errors returned by the driver
///
/// `E` is the error type of the underlying bus or serial port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// The bus or serial port reported a failure
    Interface(E),
    /// A strict UART read timed out before the full response arrived
    Timeout {
        /// Bytes requested
        expected: usize,
        /// Bytes collected before the timeout
        received: usize,
    },
    /// The attached module reported an unexpected product ID
    DeviceMismatch {
        /// Product ID read from the module
        product_id: u16,
    },
    /// A register frame cannot carry this many bytes
    PayloadTooLong(usize),
    /// The reported sentence snapshot length is implausible
    SentenceLength(u16),
    /// A register held a value outside its defined encoding
    InvalidRegisterValue {
        /// Register address
        register: u8,
        /// Raw value
        value: u8,
    },
    /// An argument was outside the range the RTC can store
    InvalidArgument,
    /// SRAM address outside the user window
    InvalidSramAddress(u8),
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Interface(error)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interface(e) => write!(f, "interface error: {e:?}"),
            Self::Timeout { expected, received } => {
                write!(f, "read timed out after {received} of {expected} bytes")
            }
            Self::DeviceMismatch { product_id } => {
                write!(f, "unexpected product id 0x{product_id:04X}")
            }
            Self::PayloadTooLong(len) => write!(f, "payload of {len} bytes does not fit one frame"),
            Self::SentenceLength(len) => write!(f, "implausible sentence length {len}"),
            Self::InvalidRegisterValue { register, value } => {
                write!(f, "register 0x{register:02X} holds invalid value 0x{value:02X}")
            }
            Self::InvalidArgument => f.write_str("argument out of range"),
            Self::InvalidSramAddress(addr) => write!(f, "SRAM address 0x{addr:02X} out of range"),
        }
    }
}

#[cfg(feature = "std")]
impl<E: fmt::Debug> std::error::Error for Error<E> {}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for Error<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Interface(e) => defmt::write!(f, "interface error: {}", e),
            Self::Timeout { expected, received } => {
                defmt::write!(f, "read timed out after {} of {} bytes", received, expected);
            }
            Self::DeviceMismatch { product_id } => {
                defmt::write!(f, "unexpected product id 0x{:04X}", product_id);
            }
            Self::PayloadTooLong(len) => defmt::write!(f, "payload of {} bytes does not fit one frame", len),
            Self::SentenceLength(len) => defmt::write!(f, "implausible sentence length {}", len),
            Self::InvalidRegisterValue { register, value } => {
                defmt::write!(f, "register 0x{:02X} holds invalid value 0x{:02X}", register, value);
            }
            Self::InvalidArgument => defmt::write!(f, "argument out of range"),
            Self::InvalidSramAddress(addr) => defmt::write!(f, "SRAM address 0x{:02X} out of range", addr),
        }
    }
}
