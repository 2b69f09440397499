//! Module facade
//!
//! Construction, bring-up and raw register passthrough.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use embedded_io::{Read, ReadReady, Write};

use crate::hal::i2c::I2cInterface;
use crate::error::Error;
use crate::hal::uart::UartInterface;
use crate::hal::{RegResult, RegisterInterface};
use crate::registers::rtc;
use crate::types::{DeviceIdentity, HourFormat, Transport};

/// Combined GNSS receiver and RTC module
pub struct GnssRtc<IF> {
    pub(crate) interface: IF,
    /// Hour format last seen on or written to the RTC
    pub(crate) hour_format: Option<HourFormat>,
}

impl<I2C, D> GnssRtc<I2cInterface<I2C, D>>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Module on an I2C bus at the factory address
    #[must_use]
    pub fn new_i2c(i2c: I2C, delay: D) -> Self {
        Self::new(I2cInterface::new(i2c, delay))
    }
}

impl<S, D> GnssRtc<UartInterface<S, D>>
where
    S: Read + Write + ReadReady,
    D: DelayNs,
{
    /// Module on a serial port with lenient read timeouts
    #[must_use]
    pub fn new_uart(serial: S, delay: D) -> Self {
        Self::new(UartInterface::new(serial, delay))
    }
}

impl<IF: RegisterInterface> GnssRtc<IF> {
    /// Wrap an already configured interface
    #[must_use]
    pub fn new(interface: IF) -> Self {
        Self {
            interface,
            hour_format: None,
        }
    }

    /// Bring the module up
    ///
    /// Checks the hardware (I2C probe, or UART identity registers) and
    /// enables host access to the RTC. Returns the identity when the
    /// transport exposes it.
    pub fn begin(&mut self) -> RegResult<Option<DeviceIdentity>, IF::BusError> {
        let identity = self.interface.identify()?;
        self.interface
            .write_register(rtc::I2C_CONTROL, &[rtc::I2C_CONTROL_ENABLE])?;
        Ok(identity)
    }

    /// Transport in use
    #[must_use]
    pub const fn transport(&self) -> Transport {
        IF::TRANSPORT
    }

    /// Borrow the interface
    pub fn interface_mut(&mut self) -> &mut IF {
        &mut self.interface
    }

    /// Give back the interface
    pub fn release(self) -> IF {
        self.interface
    }

    /// Write raw bytes starting at `reg`
    pub fn write_register(&mut self, reg: u8, data: &[u8]) -> RegResult<(), IF::BusError> {
        self.interface.write_register(reg, data)
    }

    /// Read raw bytes starting at `reg`, staging RTC reads
    ///
    /// Returns the number of bytes received.
    pub fn read_register(&mut self, reg: u8, buf: &mut [u8]) -> RegResult<usize, IF::BusError> {
        self.interface.read_register(reg, buf)
    }

    /// Read a fixed-size block; bytes a short read left out stay zero
    pub(crate) fn read_block<const N: usize>(
        &mut self,
        reg: u8,
    ) -> RegResult<[u8; N], IF::BusError> {
        let mut raw = [0u8; N];
        self.interface.read_register(reg, &mut raw)?;
        Ok(raw)
    }

    /// Read a fixed-size block that is about to be written back
    ///
    /// A short read fails here instead of leaving zeros in the image.
    pub(crate) fn read_block_exact<const N: usize>(
        &mut self,
        reg: u8,
    ) -> RegResult<[u8; N], IF::BusError> {
        let mut raw = [0u8; N];
        let received = self.interface.read_register(reg, &mut raw)?;
        if received < N {
            warn!("short read of 0x{:02X}: {} of {} bytes", reg, received, N);
            return Err(Error::Timeout {
                expected: N,
                received,
            });
        }
        Ok(raw)
    }

    pub(crate) fn read_byte(&mut self, reg: u8) -> RegResult<u8, IF::BusError> {
        let [value] = self.read_block::<1>(reg)?;
        Ok(value)
    }

    pub(crate) fn write_byte(&mut self, reg: u8, value: u8) -> RegResult<(), IF::BusError> {
        self.interface.write_register(reg, &[value])
    }
}
