//! I2C Register Backend
//!
//! Write frame: `[reg, data...]`. Read: write `[reg]`, then read `len`
//! bytes in a separate transaction.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use heapless::Vec;

use super::{frame_len, RegResult, RegisterInterface};
use crate::config::{I2C_ADDRESS, I2C_MAX_READ_LEN, MAX_PAYLOAD_LEN};
use crate::error::Error;
use crate::types::{DeviceIdentity, Transport};

/// I2C device address wrapper
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct I2cAddress(u8);

impl I2cAddress {
    /// Factory address of the module
    pub const MODULE: Self = Self(I2C_ADDRESS);

    /// Create from 7-bit address
    #[must_use]
    pub const fn new(addr: u8) -> Self {
        Self(addr & 0x7F)
    }

    /// Get the 7-bit address
    #[must_use]
    pub const fn addr(self) -> u8 {
        self.0
    }
}

impl Default for I2cAddress {
    fn default() -> Self {
        Self::MODULE
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for I2cAddress {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "0x{:02X}", self.0);
    }
}

/// Module reached over I2C
///
/// Pass `&mut bus` instead of the bus itself to keep ownership of a
/// shared bus in the application.
pub struct I2cInterface<I2C, D> {
    i2c: I2C,
    delay: D,
    address: I2cAddress,
}

impl<I2C, D> I2cInterface<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Create an interface at the factory address
    #[must_use]
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self {
            i2c,
            delay,
            address: I2cAddress::MODULE,
        }
    }

    /// Use a different device address
    #[must_use]
    pub fn with_address(mut self, address: I2cAddress) -> Self {
        self.address = address;
        self
    }

    /// Device address in use
    #[must_use]
    pub const fn address(&self) -> I2cAddress {
        self.address
    }

    /// Give back the bus and delay
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    /// Address the device with an empty write, `Ok` if it acknowledges
    pub fn probe(&mut self) -> RegResult<(), I2C::Error> {
        self.i2c.write(self.address.addr(), &[]).map_err(|e| {
            warn!("no acknowledge from 0x{:02X}", self.address.addr());
            Error::Interface(e)
        })
    }
}

impl<I2C, D> RegisterInterface for I2cInterface<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    type BusError = I2C::Error;

    const TRANSPORT: Transport = Transport::I2c;
    const MAX_READ_LEN: usize = I2C_MAX_READ_LEN;

    fn transmit(&mut self, reg: u8, data: &[u8]) -> RegResult<(), I2C::Error> {
        let mut frame: Vec<u8, { MAX_PAYLOAD_LEN + 1 }> = Vec::new();
        frame_len::<I2C::Error>(data.len())?;
        // capacity checked by frame_len
        let _ = frame.push(reg);
        let _ = frame.extend_from_slice(data);

        self.i2c.write(self.address.addr(), &frame).map_err(|e| {
            warn!("write to register 0x{:02X} failed", reg);
            Error::Interface(e)
        })
    }

    fn receive(&mut self, reg: u8, buf: &mut [u8]) -> RegResult<usize, I2C::Error> {
        frame_len::<I2C::Error>(buf.len())?;
        self.i2c.write(self.address.addr(), &[reg]).map_err(|e| {
            warn!("address phase for register 0x{:02X} failed", reg);
            Error::Interface(e)
        })?;
        if buf.is_empty() {
            return Ok(0);
        }
        self.i2c.read(self.address.addr(), buf)?;
        Ok(buf.len())
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    fn identify(&mut self) -> RegResult<Option<DeviceIdentity>, I2C::Error> {
        self.probe()?;
        Ok(None)
    }
}
