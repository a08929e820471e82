//! ILI9341 command definitions
//!
//! Opcodes and payload constants for the subset of the ILI9341 command set
//! the driver uses. Commands are sent with the DC line low; any parameter
//! bytes follow with DC high, all inside one chip-select window.
//!
//! ## Command Structure
//!
//! 1. Assert CS (low)
//! 2. Set DC low, send the opcode
//! 3. Set DC high, send the parameter bytes (only when present)
//! 4. Deassert CS (high)
//!
//! ## Example
//!
//! ```rust,no_run
//! use moodpanel::{command, PanelInterface};
//! # use core::convert::Infallible;
//! # use embedded_hal::delay::DelayNs;
//! # struct Recorder;
//! # impl PanelInterface for Recorder {
//! #     type Error = Infallible;
//! #     fn send_command(&mut self, _: u8, _: Option<&[u8]>) -> Result<(), Infallible> { Ok(()) }
//! #     fn write_pixels(&mut self, _: &[u8], _: u16) -> Result<(), Infallible> { Ok(()) }
//! #     fn reset<D: DelayNs>(&mut self, _: &mut D, _: u32) {}
//! # }
//! # let mut interface = Recorder;
//! let _ = interface.send_command(command::SOFTWARE_RESET, None);
//! let _ = interface.send_command(command::PIXEL_FORMAT_SET, Some(&[command::PIXEL_FORMAT_16BPP]));
//! ```

// System control

/// Software reset (0x01)
///
/// Returns every register to its default value. The controller needs a
/// settle delay before the next command.
pub const SOFTWARE_RESET: u8 = 0x01;

/// Sleep out (0x11)
///
/// Turns off sleep mode. The controller needs a settle delay before the
/// display is switched on.
pub const SLEEP_OUT: u8 = 0x11;

/// Display off (0x28)
pub const DISPLAY_OFF: u8 = 0x28;

/// Display on (0x29)
pub const DISPLAY_ON: u8 = 0x29;

// Addressing

/// Column address set (0x2A)
///
/// Requires 4 bytes: [x1_hi, x1_lo, x2_hi, x2_lo]
pub const COLUMN_ADDRESS_SET: u8 = 0x2A;

/// Page (row) address set (0x2B)
///
/// Requires 4 bytes: [y1_hi, y1_lo, y2_hi, y2_lo]
pub const PAGE_ADDRESS_SET: u8 = 0x2B;

/// Memory write (0x2C)
///
/// No parameters. Begins a pixel stream into the current window.
pub const MEMORY_WRITE: u8 = 0x2C;

// Mode

/// Memory access control (0x36)
///
/// Requires 1 byte: scan direction and color order (see the `MADCTL_*` bits).
pub const MEMORY_ACCESS_CONTROL: u8 = 0x36;

/// Pixel format set (0x3A)
///
/// Requires 1 byte: interface pixel format.
pub const PIXEL_FORMAT_SET: u8 = 0x3A;

/// 16 bits per pixel for both the RGB and MCU interfaces
pub const PIXEL_FORMAT_16BPP: u8 = 0x55;

/// MADCTL row address order (MY)
pub const MADCTL_MY: u8 = 0x80;

/// MADCTL column address order (MX)
pub const MADCTL_MX: u8 = 0x40;

/// MADCTL row/column exchange (MV)
pub const MADCTL_MV: u8 = 0x20;

/// MADCTL BGR color filter panel order
pub const MADCTL_BGR: u8 = 0x08;
