//! Protocol configuration and hardware constants
//!
//! This module defines compile-time constants for talking to the module.
//! All addresses, opcodes, delays and transfer limits are centralized here.

/// Module I2C address (7-bit)
pub const I2C_ADDRESS: u8 = 0x66;

/// I2C bus frequency used by the demo firmware
pub const I2C_FREQUENCY_HZ: u32 = 100_000;

/// Default UART baud rate of the module
pub const UART_BAUDRATE: u32 = 57_600;

/// UART frame opcode for a register read: `[0xBB, reg, len]`
pub const UART_READ_OPCODE: u8 = 0xBB;

/// UART frame opcode for a register write: `[0xCC, reg, len, data...]`
pub const UART_WRITE_OPCODE: u8 = 0xCC;

/// Time the module MCU needs to process any register write
pub const WRITE_SETTLE_MS: u32 = 50;

/// Wait between the RTC staging request and the actual read
pub const RTC_STAGE_DELAY_MS: u32 = 50;

/// How long a UART read waits for the full response
pub const UART_READ_TIMEOUT_MS: u32 = 200;

/// Polling interval of the UART receive loop
pub const UART_POLL_INTERVAL_MS: u32 = 1;

/// Wait after requesting a sentence snapshot before reading its length
pub const SENTENCE_PREPARE_DELAY_MS: u32 = 100;

/// Extra wait after toggling the GNSS power register
pub const POWER_SWITCH_DELAY_MS: u32 = 50;

/// Wait after toggling the 32.768 kHz clock output
pub const CLOCK_OUTPUT_SETTLE_MS: u32 = 100;

/// Largest chunk read over UART in one request
pub const UART_MAX_READ_LEN: usize = 250;

/// Largest chunk read over I2C in one request
pub const I2C_MAX_READ_LEN: usize = 32;

/// Largest payload a single register frame can carry (length is one byte)
pub const MAX_PAYLOAD_LEN: usize = 255;

/// Largest plausible sentence snapshot (1024 bytes of NMEA plus headroom)
pub const MAX_SENTENCE_LEN: u16 = 1024 + 200;

/// Expected product ID read from the identity registers
pub const PRODUCT_ID: u16 = 0x444F;

/// Vendor ID reported by the module
pub const VENDOR_ID: u16 = 0x3343;

/// Firmware version reported by current modules
pub const FIRMWARE_VERSION: u16 = 0x0100;

/// Year represented by an RTC year register of zero
pub const RTC_BASE_YEAR: u16 = 2000;

/// Last year the two-digit RTC year register can hold
pub const RTC_MAX_YEAR: u16 = 2099;

/// Countdown register width is 24 bits
pub const MAX_COUNTDOWN_SECONDS: u32 = 0x00FF_FFFF;

/// First user SRAM address of the RTC
pub const SRAM_START: u8 = 0x2C;

/// Last user SRAM address of the RTC
pub const SRAM_END: u8 = 0x71;

/// Value written by `clear_sram`
pub const SRAM_ERASED: u8 = 0xFF;
