//! Core panel operations

use embedded_hal::delay::DelayNs;

use crate::color::Color;
use crate::command::{
    COLUMN_ADDRESS_SET, DISPLAY_OFF, DISPLAY_ON, MEMORY_ACCESS_CONTROL, MEMORY_WRITE,
    PAGE_ADDRESS_SET, PIXEL_FORMAT_16BPP, PIXEL_FORMAT_SET, SLEEP_OUT, SOFTWARE_RESET,
};
use crate::config::{Config, Dimensions};
use crate::error::{Error, MAX_ROW_PIXELS};
use crate::interface::PanelInterface;
use crate::raster::Canvas;

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Bytes in one full-width row
const ROW_BUFFER_LEN: usize = MAX_ROW_PIXELS as usize * 2;

/// Core driver for the ILI9341
///
/// Owns the transport and streams pixels straight to controller memory;
/// there is no framebuffer. Shapes are drawn through the [`Canvas`]
/// implementation, which clips and forwards to [`set_window`](Self::set_window)
/// and [`stream_rect`](Self::stream_rect).
pub struct Ili9341<I>
where
    I: PanelInterface,
{
    /// Hardware interface
    interface: I,
    /// Panel configuration
    config: Config,
}

impl<I> Ili9341<I>
where
    I: PanelInterface,
{
    /// Create a new driver instance
    ///
    /// No bus traffic happens until [`begin`](Self::begin) or
    /// [`reset`](Self::reset) is called.
    pub fn new(interface: I, config: Config) -> Self {
        Self { interface, config }
    }

    /// Hardware reset followed by controller initialization
    pub fn begin<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.reset(delay);
        self.initialize(delay)
    }

    /// Pulse the reset line
    ///
    /// Must complete before any command is issued.
    pub fn reset<D: DelayNs>(&mut self, delay: &mut D) {
        log::debug!("panel reset, {} ms pulse", self.config.reset_pulse_ms);
        self.interface.reset(delay, self.config.reset_pulse_ms);
    }

    /// Run the controller power-up sequence
    ///
    /// The order is fixed by the controller: software reset, display off,
    /// pixel format, memory access control, sleep out, display on.
    pub fn initialize<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        let settle_ms = self.config.settle_ms;

        self.send_command(SOFTWARE_RESET, None)?;
        delay.delay_ms(settle_ms);

        self.send_command(DISPLAY_OFF, None)?;
        self.send_command(PIXEL_FORMAT_SET, Some(&[PIXEL_FORMAT_16BPP]))?;
        self.send_command(MEMORY_ACCESS_CONTROL, Some(&[self.config.madctl()]))?;

        self.send_command(SLEEP_OUT, None)?;
        delay.delay_ms(settle_ms);

        self.send_command(DISPLAY_ON, None)?;
        log::debug!("panel initialized, madctl {:#04x}", self.config.madctl());
        Ok(())
    }

    /// Send a command to the panel controller
    pub fn send_command(&mut self, opcode: u8, payload: Option<&[u8]>) -> DisplayResult<I> {
        self.interface
            .send_command(opcode, payload)
            .map_err(Error::Interface)
    }

    /// Set the destination window for the next pixel stream
    ///
    /// Coordinates are inclusive and are not validated.
    pub fn set_window(&mut self, x1: u16, y1: u16, x2: u16, y2: u16) -> DisplayResult<I> {
        log::trace!("window ({x1},{y1})-({x2},{y2})");
        self.send_command(COLUMN_ADDRESS_SET, Some(&address_range(x1, x2)))?;
        self.send_command(PAGE_ADDRESS_SET, Some(&address_range(y1, y2)))?;
        self.send_command(MEMORY_WRITE, None)
    }

    /// Stream a solid `width` x `height` block into the current window
    ///
    /// One row of pixels is built on the stack and written `height` times
    /// inside a single chip-select.
    ///
    /// # Errors
    ///
    /// Returns `Error::RowTooWide` if `width` exceeds [`MAX_ROW_PIXELS`].
    pub fn stream_rect(&mut self, width: u16, height: u16, color: Color) -> DisplayResult<I> {
        if width > MAX_ROW_PIXELS {
            return Err(Error::RowTooWide {
                width,
                max: MAX_ROW_PIXELS,
            });
        }
        if width == 0 || height == 0 {
            return Ok(());
        }

        let mut row = [0u8; ROW_BUFFER_LEN];
        let len = usize::from(width) * 2;
        let pixel = color.to_be_bytes();
        for chunk in row[..len].chunks_exact_mut(2) {
            chunk.copy_from_slice(&pixel);
        }

        self.interface
            .write_pixels(&row[..len], height)
            .map_err(Error::Interface)
    }

    /// Logical dimensions after rotation
    pub fn dimensions(&self) -> Dimensions {
        self.config.dimensions()
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Give the interface back
    pub fn release(self) -> I {
        self.interface
    }
}

impl<I> Canvas for Ili9341<I>
where
    I: PanelInterface,
{
    type Error = Error<I>;

    fn size(&self) -> Dimensions {
        self.dimensions()
    }

    fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: Color,
    ) -> Result<(), Self::Error> {
        let dims = self.dimensions();
        let x_start = x.max(0);
        let y_start = y.max(0);
        let x_end = x.saturating_add(width).min(i32::from(dims.width));
        let y_end = y.saturating_add(height).min(i32::from(dims.height));
        if x_start >= x_end || y_start >= y_end {
            return Ok(());
        }

        // Clipped to the panel, so every value fits in u16
        let (x1, y1) = (x_start as u16, y_start as u16);
        let (x2, y2) = ((x_end - 1) as u16, (y_end - 1) as u16);
        self.set_window(x1, y1, x2, y2)?;
        self.stream_rect(x2 - x1 + 1, y2 - y1 + 1, color)
    }
}

/// Big-endian start/end pair for the column and page address commands
fn address_range(start: u16, end: u16) -> [u8; 4] {
    let [start_hi, start_lo] = start.to_be_bytes();
    let [end_hi, end_lo] = end.to_be_bytes();
    [start_hi, start_lo, end_hi, end_lo]
}
