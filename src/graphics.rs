//! Graphics support via embedded-graphics
//!
//! Implements [`DrawTarget`] for [`Ili9341`] so text, images and the
//! embedded-graphics primitives can be drawn directly to the panel. There is
//! no framebuffer: every pixel goes straight to controller memory.
//!
//! Solid fills are forwarded to [`Canvas::fill_rect`] and reach the panel as
//! one window plus one streamed block. Individual pixels from
//! [`DrawTarget::draw_iter`] each cost a full window setup, so prefer styled
//! fills over per-pixel drawing where possible.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_graphics::{
//!     pixelcolor::Rgb565,
//!     prelude::*,
//!     primitives::{PrimitiveStyle, Rectangle},
//! };
//! use moodpanel::{Config, Ili9341};
//! # use embedded_hal::delay::DelayNs;
//! # use moodpanel::PanelInterface;
//! # struct MockInterface;
//! # impl PanelInterface for MockInterface {
//! #     type Error = core::convert::Infallible;
//! #     fn send_command(&mut self, _: u8, _: Option<&[u8]>) -> Result<(), Self::Error> { Ok(()) }
//! #     fn write_pixels(&mut self, _: &[u8], _: u16) -> Result<(), Self::Error> { Ok(()) }
//! #     fn reset<D: DelayNs>(&mut self, _: &mut D, _: u32) {}
//! # }
//! let mut display = Ili9341::new(MockInterface, Config::default());
//!
//! let _ = display.clear(Rgb565::BLACK);
//! let _ = Rectangle::new(Point::new(10, 10), Size::new(50, 30))
//!     .into_styled(PrimitiveStyle::with_fill(Rgb565::RED))
//!     .draw(&mut display);
//! ```

use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::Rgb565,
    prelude::Pixel,
    primitives::Rectangle,
};

use crate::color::Color;
use crate::display::Ili9341;
use crate::error::Error;
use crate::interface::PanelInterface;
use crate::raster::Canvas;

impl<I> DrawTarget for Ili9341<I>
where
    I: PanelInterface,
{
    type Color = Rgb565;
    type Error = Error<I>;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let dims = self.dimensions();

        for Pixel(Point { x, y }, color) in pixels {
            if x < 0 || y < 0 || x >= i32::from(dims.width) || y >= i32::from(dims.height) {
                continue;
            }
            Canvas::fill_rect(self, x, y, 1, 1, Color::from(color))?;
        }

        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let Rectangle { top_left, size } = *area;
        let width = size.width.min(i32::MAX as u32) as i32;
        let height = size.height.min(i32::MAX as u32) as i32;
        Canvas::fill_rect(self, top_left.x, top_left.y, width, height, color.into())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        Canvas::fill_screen(self, color.into())
    }
}

impl<I> OriginDimensions for Ili9341<I>
where
    I: PanelInterface,
{
    fn size(&self) -> Size {
        let dims = self.dimensions();
        Size::new(u32::from(dims.width), u32::from(dims.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{COLUMN_ADDRESS_SET, MEMORY_WRITE, PAGE_ADDRESS_SET};
    use crate::config::{Builder, Rotation};
    use alloc::vec::Vec;
    use embedded_graphics_core::pixelcolor::RgbColor;
    use embedded_hal::delay::DelayNs;

    #[derive(Debug, Default)]
    struct MockInterface {
        commands: Vec<(u8, Vec<u8>)>,
        pixels: Vec<(Vec<u8>, u16)>,
    }

    impl PanelInterface for MockInterface {
        type Error = core::convert::Infallible;

        fn send_command(&mut self, opcode: u8, payload: Option<&[u8]>) -> Result<(), Self::Error> {
            self.commands
                .push((opcode, payload.unwrap_or_default().to_vec()));
            Ok(())
        }

        fn write_pixels(&mut self, row: &[u8], rows: u16) -> Result<(), Self::Error> {
            self.pixels.push((row.to_vec(), rows));
            Ok(())
        }

        fn reset<D: DelayNs>(&mut self, _delay: &mut D, _pulse_ms: u32) {}
    }

    fn test_display(rotation: Rotation) -> Ili9341<MockInterface> {
        let config = Builder::new().rotation(rotation).build().unwrap();
        Ili9341::new(MockInterface::default(), config)
    }

    #[test]
    fn test_size_follows_rotation() {
        assert_eq!(
            OriginDimensions::size(&test_display(Rotation::Rotate0)),
            Size::new(240, 320)
        );
        assert_eq!(
            OriginDimensions::size(&test_display(Rotation::Rotate90)),
            Size::new(320, 240)
        );
    }

    #[test]
    fn test_draw_iter_skips_out_of_bounds() {
        let mut display = test_display(Rotation::Rotate0);
        let pixels = [
            Pixel(Point::new(-1, 0), Rgb565::RED),
            Pixel(Point::new(3, 4), Rgb565::RED),
            Pixel(Point::new(240, 0), Rgb565::RED),
            Pixel(Point::new(0, 320), Rgb565::RED),
        ];
        display.draw_iter(pixels).unwrap();

        let interface = display.release();
        assert_eq!(interface.pixels, alloc::vec![(alloc::vec![0xF8, 0x00], 1)]);
        assert_eq!(
            interface.commands,
            alloc::vec![
                (COLUMN_ADDRESS_SET, alloc::vec![0, 3, 0, 3]),
                (PAGE_ADDRESS_SET, alloc::vec![0, 4, 0, 4]),
                (MEMORY_WRITE, Vec::new()),
            ]
        );
    }

    #[test]
    fn test_fill_solid_is_one_block() {
        let mut display = test_display(Rotation::Rotate0);
        let area = Rectangle::new(Point::new(10, 20), Size::new(4, 3));
        display.fill_solid(&area, Rgb565::BLUE).unwrap();

        let interface = display.release();
        assert_eq!(interface.pixels.len(), 1);
        let (row, rows) = &interface.pixels[0];
        assert_eq!(row.len(), 8);
        assert_eq!(*rows, 3);
        assert!(row.chunks(2).all(|px| *px == [0x00, 0x1F]));
    }

    #[test]
    fn test_clear_fills_rotated_screen() {
        let mut display = test_display(Rotation::Rotate270);
        display.clear(Rgb565::WHITE).unwrap();

        let interface = display.release();
        assert_eq!(interface.commands[0], (COLUMN_ADDRESS_SET, alloc::vec![0, 0, 0x01, 0x3F]));
        assert_eq!(interface.commands[1], (PAGE_ADDRESS_SET, alloc::vec![0, 0, 0, 0xEF]));
        let (row, rows) = &interface.pixels[0];
        assert_eq!(row.len(), 640);
        assert_eq!(*rows, 240);
    }
}
