//! UART Register Backend
//!
//! Write frame: `[0xCC, reg, len, data...]`, no acknowledgement.
//! Read frame: `[0xBB, reg, len]`, answered by exactly `len` raw bytes
//! with no framing or checksum. The answer is polled for up to
//! [`UART_READ_TIMEOUT_MS`].
//!
//! By default a timeout yields whatever arrived, so the caller sees a
//! short count rather than an error. [`UartInterface::strict_timeouts`]
//! turns a short read into [`Error::Timeout`].

use embedded_hal::delay::DelayNs;
use embedded_io::{Read, ReadReady, Write};
use heapless::Vec;

use super::{frame_len, RegResult, RegisterInterface};
use crate::config::{
    MAX_PAYLOAD_LEN, PRODUCT_ID, UART_MAX_READ_LEN, UART_POLL_INTERVAL_MS, UART_READ_OPCODE,
    UART_READ_TIMEOUT_MS, UART_WRITE_OPCODE,
};
use crate::error::Error;
use crate::registers::module;
use crate::types::{DeviceIdentity, Transport};

/// Module reached over a serial port
///
/// The port must already run at [`crate::config::UART_BAUDRATE`], 8N1.
pub struct UartInterface<S, D> {
    serial: S,
    delay: D,
    timeout_ms: u32,
    strict: bool,
}

impl<S, D> UartInterface<S, D>
where
    S: Read + Write + ReadReady,
    D: DelayNs,
{
    /// Create a lenient interface with the default read timeout
    #[must_use]
    pub fn new(serial: S, delay: D) -> Self {
        Self {
            serial,
            delay,
            timeout_ms: UART_READ_TIMEOUT_MS,
            strict: false,
        }
    }

    /// Fail reads that time out instead of returning a short count
    #[must_use]
    pub fn strict_timeouts(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Override the read timeout
    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Whether short reads are reported as errors
    #[must_use]
    pub const fn is_strict(&self) -> bool {
        self.strict
    }

    /// Give back the serial port and delay
    pub fn release(self) -> (S, D) {
        (self.serial, self.delay)
    }

    fn read_u16_le(&mut self, reg: u8) -> RegResult<u16, S::Error> {
        let mut raw = [0u8; 2];
        self.read_register(reg, &mut raw)?;
        Ok(u16::from_le_bytes(raw))
    }

    /// Collect up to `buf.len()` bytes before the timeout runs out
    fn collect(&mut self, buf: &mut [u8]) -> RegResult<usize, S::Error> {
        let mut received = 0;
        let mut waited = 0;
        while received < buf.len() {
            if self.serial.read_ready()? {
                let n = self.serial.read(&mut buf[received..])?;
                if n > 0 {
                    received += n;
                    continue;
                }
            }
            if waited >= self.timeout_ms {
                break;
            }
            self.delay.delay_ms(UART_POLL_INTERVAL_MS);
            waited += UART_POLL_INTERVAL_MS;
        }
        Ok(received)
    }
}

impl<S, D> RegisterInterface for UartInterface<S, D>
where
    S: Read + Write + ReadReady,
    D: DelayNs,
{
    type BusError = S::Error;

    const TRANSPORT: Transport = Transport::Uart;
    const MAX_READ_LEN: usize = UART_MAX_READ_LEN;

    fn transmit(&mut self, reg: u8, data: &[u8]) -> RegResult<(), S::Error> {
        let len = frame_len::<S::Error>(data.len())?;
        let mut frame: Vec<u8, { MAX_PAYLOAD_LEN + 3 }> = Vec::new();
        // capacity checked by frame_len
        let _ = frame.extend_from_slice(&[UART_WRITE_OPCODE, reg, len]);
        let _ = frame.extend_from_slice(data);

        self.serial.write_all(&frame)?;
        self.serial.flush()?;
        Ok(())
    }

    fn receive(&mut self, reg: u8, buf: &mut [u8]) -> RegResult<usize, S::Error> {
        let len = frame_len::<S::Error>(buf.len())?;
        self.serial.write_all(&[UART_READ_OPCODE, reg, len])?;
        self.serial.flush()?;

        let received = self.collect(buf)?;
        if received < buf.len() {
            debug!(
                "register 0x{:02X}: {} of {} bytes before timeout",
                reg,
                received,
                buf.len()
            );
            if self.strict {
                return Err(Error::Timeout {
                    expected: buf.len(),
                    received,
                });
            }
        }
        Ok(received)
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    fn identify(&mut self) -> RegResult<Option<DeviceIdentity>, S::Error> {
        let product_id = self.read_u16_le(module::PRODUCT_ID)?;
        if product_id != PRODUCT_ID {
            error!("unexpected product id 0x{:04X}", product_id);
            return Err(Error::DeviceMismatch { product_id });
        }
        let vendor_id = self.read_u16_le(module::VENDOR_ID)?;
        let version = self.read_u16_le(module::VERSION)?;
        Ok(Some(DeviceIdentity {
            product_id,
            vendor_id,
            version,
        }))
    }
}
