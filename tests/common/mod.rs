//! Simulated module for host tests
//!
//! `SimDevice` models the module's register file; `SimI2c` and `SimSerial`
//! put it behind the two transports. Pass them to the driver by `&mut` so
//! the test can inspect the device afterwards.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{self, ErrorKind, NoAcknowledgeSource, Operation, SevenBitAddress};

use gnss_rtc::config::I2C_ADDRESS;
use gnss_rtc::registers::{gnss, module};

// =============================================================================
// Register File
// =============================================================================

/// Register file with the module's side effects
pub struct SimDevice {
    pub regs: [u8; 256],
    /// Every register write as (start register, data)
    pub writes: Vec<(u8, Vec<u8>)>,
    /// Every register read as (start register, requested length)
    pub reads: Vec<(u8, usize)>,
    sentences: Vec<u8>,
    sentence_pos: usize,
    forced_len: Option<u16>,
}

impl SimDevice {
    pub fn new() -> Self {
        let mut regs = [0u8; 256];
        // identity, little-endian
        regs[0xAA] = 0x4F;
        regs[0xAB] = 0x44;
        regs[0xAC] = 0x43;
        regs[0xAD] = 0x33;
        regs[0xAE] = 0x00;
        regs[0xAF] = 0x01;
        Self {
            regs,
            writes: Vec::new(),
            reads: Vec::new(),
            sentences: Vec::new(),
            sentence_pos: 0,
            forced_len: None,
        }
    }

    /// Sentence data served by the next snapshot
    pub fn load_sentences(&mut self, data: &[u8]) {
        self.sentences = data.to_vec();
        self.sentence_pos = 0;
    }

    /// Report this snapshot length regardless of the loaded data
    pub fn force_sentence_len(&mut self, len: u16) {
        self.forced_len = Some(len);
    }

    pub fn set(&mut self, reg: u8, data: &[u8]) {
        let start = usize::from(reg);
        self.regs[start..start + data.len()].copy_from_slice(data);
    }

    pub fn get(&self, reg: u8, len: usize) -> &[u8] {
        let start = usize::from(reg);
        &self.regs[start..start + len]
    }

    pub fn write(&mut self, reg: u8, data: &[u8]) {
        self.writes.push((reg, data.to_vec()));
        self.set(reg, data);
        if reg == gnss::START_GET && data.first() == Some(&gnss::START_SNAPSHOT) {
            let len = self
                .forced_len
                .unwrap_or(u16::try_from(self.sentences.len()).unwrap());
            self.set(gnss::DATA_LEN_H, &len.to_be_bytes());
            self.sentence_pos = 0;
        }
    }

    pub fn read(&mut self, reg: u8, buf: &mut [u8]) {
        self.reads.push((reg, buf.len()));
        if reg == gnss::ALL_DATA {
            for byte in buf.iter_mut() {
                *byte = self.sentences.get(self.sentence_pos).copied().unwrap_or(0);
                self.sentence_pos += 1;
            }
            return;
        }
        let start = usize::from(reg);
        buf.copy_from_slice(&self.regs[start..start + buf.len()]);

        // a completed calibration is reported once
        let calib = usize::from(module::CALIB_STATUS);
        if (start..start + buf.len()).contains(&calib) && self.regs[calib] == 0x01 {
            self.regs[calib] = 0x00;
        }
    }

    /// Writes to one register, in order
    pub fn writes_to(&self, reg: u8) -> Vec<Vec<u8>> {
        self.writes
            .iter()
            .filter(|(r, _)| *r == reg)
            .map(|(_, d)| d.clone())
            .collect()
    }

    /// Staging requests, as (register, length)
    pub fn staged(&self) -> Vec<(u8, u8)> {
        self.writes_to(module::RTC_READ_REQUEST)
            .into_iter()
            .map(|d| (d[0], d[1]))
            .collect()
    }
}

// =============================================================================
// I2C Bus
// =============================================================================

/// I2C bus with the module attached at its factory address
pub struct SimI2c {
    pub device: SimDevice,
    pointer: u8,
    /// Fail every transaction as if the module were unplugged
    pub unplugged: bool,
    /// Fail data writes to this register with a bus error
    pub reject_writes_to: Option<u8>,
    /// Raw write payloads as seen on the wire
    pub wire_writes: Vec<Vec<u8>>,
}

impl SimI2c {
    pub fn new() -> Self {
        Self {
            device: SimDevice::new(),
            pointer: 0,
            unplugged: false,
            reject_writes_to: None,
            wire_writes: Vec::new(),
        }
    }
}

impl i2c::ErrorType for SimI2c {
    type Error = ErrorKind;
}

impl i2c::I2c<SevenBitAddress> for SimI2c {
    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if self.unplugged || address != I2C_ADDRESS {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }
        for op in operations {
            match op {
                Operation::Write(bytes) => {
                    self.wire_writes.push(bytes.to_vec());
                    if let Some((&reg, data)) = bytes.split_first() {
                        if !data.is_empty() && self.reject_writes_to == Some(reg) {
                            return Err(ErrorKind::Other);
                        }
                        self.pointer = reg;
                        if !data.is_empty() {
                            self.device.write(reg, data);
                        }
                    }
                }
                Operation::Read(buf) => self.device.read(self.pointer, buf),
            }
        }
        Ok(())
    }
}

// =============================================================================
// Serial Port
// =============================================================================

/// Serial port wired to the module's UART
pub struct SimSerial {
    pub device: SimDevice,
    /// Every byte the driver sent
    pub sent: Vec<u8>,
    pending: Vec<u8>,
    rx: VecDeque<u8>,
    /// Answer read frames with at most this many bytes
    pub truncate: Option<usize>,
}

impl SimSerial {
    pub fn new() -> Self {
        Self {
            device: SimDevice::new(),
            sent: Vec::new(),
            pending: Vec::new(),
            rx: VecDeque::new(),
            truncate: None,
        }
    }

    fn parse(&mut self) {
        loop {
            match self.pending.as_slice() {
                [0xCC, reg, len, rest @ ..] if rest.len() >= usize::from(*len) => {
                    let (reg, len) = (*reg, usize::from(*len));
                    let data = rest[..len].to_vec();
                    self.pending.drain(..3 + len);
                    self.device.write(reg, &data);
                }
                [0xBB, reg, len, ..] => {
                    let (reg, len) = (*reg, usize::from(*len));
                    self.pending.drain(..3);
                    let mut answer = vec![0u8; len];
                    self.device.read(reg, &mut answer);
                    let n = self.truncate.map_or(len, |t| t.min(len));
                    self.rx.extend(&answer[..n]);
                }
                [0xCC, ..] | [0xBB, ..] | [] => return,
                [_, ..] => {
                    self.pending.remove(0);
                }
            }
        }
    }
}

impl embedded_io::ErrorType for SimSerial {
    type Error = Infallible;
}

impl embedded_io::Read for SimSerial {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let n = buf.len().min(self.rx.len());
        for (slot, byte) in buf.iter_mut().zip(self.rx.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }
}

impl embedded_io::ReadReady for SimSerial {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.rx.is_empty())
    }
}

impl embedded_io::Write for SimSerial {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.sent.extend_from_slice(buf);
        self.pending.extend_from_slice(buf);
        self.parse();
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

// =============================================================================
// Delay
// =============================================================================

/// Delay that only accumulates the requested time
#[derive(Default)]
pub struct SimDelay {
    pub elapsed_ns: u64,
}

impl SimDelay {
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ns / 1_000_000
    }
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns += u64::from(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.elapsed_ns += u64::from(ms) * 1_000_000;
    }
}
