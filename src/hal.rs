//! Register Access Layer
//!
//! Both transports expose the module as one flat register file. Each
//! backend implements the raw exchange ([`RegisterInterface::transmit`] and
//! [`RegisterInterface::receive`]); the settle delay after writes and the
//! RTC staging handshake before reads are shared provided methods so the
//! two backends cannot drift apart.

pub mod i2c;
pub mod uart;

use crate::config::{RTC_STAGE_DELAY_MS, WRITE_SETTLE_MS};
use crate::error::Error;
use crate::registers::{self, module};
use crate::types::{DeviceIdentity, Transport};

/// Register operation result
pub type RegResult<T, E> = Result<T, Error<E>>;

/// Uniform register read/write contract implemented per transport
pub trait RegisterInterface {
    /// Error of the underlying bus or serial port
    type BusError;

    /// Which transport this is
    const TRANSPORT: Transport;

    /// Largest read the transport can deliver in one request
    const MAX_READ_LEN: usize;

    /// Send one register write frame, no settle delay
    fn transmit(&mut self, reg: u8, data: &[u8]) -> RegResult<(), Self::BusError>;

    /// Perform one register read exchange, no staging
    ///
    /// Returns the number of bytes actually received into `buf`.
    fn receive(&mut self, reg: u8, buf: &mut [u8]) -> RegResult<usize, Self::BusError>;

    /// Block for `ms` milliseconds
    fn delay_ms(&mut self, ms: u32);

    /// Check the attached hardware
    ///
    /// Returns the identity registers when the transport can read them.
    fn identify(&mut self) -> RegResult<Option<DeviceIdentity>, Self::BusError>;

    /// Write `data` starting at `reg`, then let the module MCU settle
    fn write_register(&mut self, reg: u8, data: &[u8]) -> RegResult<(), Self::BusError> {
        self.transmit(reg, data)?;
        self.delay_ms(WRITE_SETTLE_MS);
        Ok(())
    }

    /// Read `buf.len()` bytes starting at `reg`
    ///
    /// Reads in the RTC window are staged first. Returns the number of
    /// bytes received, which a lenient UART link may report short.
    fn read_register(&mut self, reg: u8, buf: &mut [u8]) -> RegResult<usize, Self::BusError> {
        if registers::requires_staging(reg, buf.len()) {
            let len = frame_len(buf.len())?;
            trace!("staging RTC read 0x{:02X} len {}", reg, len);
            self.write_register(module::RTC_READ_REQUEST, &[reg, len])?;
            self.delay_ms(RTC_STAGE_DELAY_MS);
        }
        self.receive(reg, buf)
    }
}

/// Length byte of a frame, rejecting lengths one byte cannot carry
pub(crate) fn frame_len<E>(len: usize) -> RegResult<u8, E> {
    u8::try_from(len).map_err(|_| Error::PayloadTooLong(len))
}
