//! RGB565 colors for 16-bit TFT panels
//!
//! The ILI9341 is driven in 16 bits per pixel. [`Color`] holds the packed
//! RGB565 word; [`Rgb`] is the 8-bit-per-channel form used to describe
//! colors before packing.
//!
//! ## Packing
//!
//! | Channel | Bits kept | Position |
//! |---------|-----------|----------|
//! | Red     | top 5     | 15..11   |
//! | Green   | top 6     | 10..5    |
//! | Blue    | top 5     | 4..0     |
//!
//! Packing is lossy and one-way. Pixels go out on the wire MSB first.
//!
//! ## Example
//!
//! ```
//! use moodpanel::{Color, Rgb};
//!
//! let purple = Color::from_rgb(98, 35, 204);
//! assert_eq!(purple.raw(), 0x6119);
//! assert_eq!(purple.to_be_bytes(), [0x61, 0x19]);
//!
//! let dimmed = Rgb::new(98, 35, 204).scale(27, 30);
//! assert_eq!(dimmed, Rgb::new(88, 31, 183));
//! ```

/// A packed RGB565 pixel value
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash)]
pub struct Color(u16);

impl Color {
    /// All channels off
    pub const BLACK: Self = Self(0x0000);
    /// All channels full
    pub const WHITE: Self = Self(0xFFFF);

    /// Wrap an already-packed RGB565 word
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    /// Pack 8-bit channels into RGB565
    ///
    /// Red keeps its top 5 bits, green its top 6, blue its top 5.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3))
    }

    /// The packed RGB565 word
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Wire encoding: big-endian, high byte first
    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }
}

/// An 8-bit-per-channel color
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Create a color from its channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale every channel by `num / den`, truncating
    ///
    /// A zero denominator yields black. Ratios above one saturate at 255.
    pub const fn scale(self, num: u32, den: u32) -> Self {
        if den == 0 {
            return Self::new(0, 0, 0);
        }
        Self {
            r: scale_channel(self.r, num, den),
            g: scale_channel(self.g, num, den),
            b: scale_channel(self.b, num, den),
        }
    }

    /// Pack into RGB565
    pub const fn to_color(self) -> Color {
        Color::from_rgb(self.r, self.g, self.b)
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        rgb.to_color()
    }
}

const fn scale_channel(channel: u8, num: u32, den: u32) -> u8 {
    let scaled = channel as u32 * num / den;
    if scaled > 255 { 255 } else { scaled as u8 }
}

#[cfg(feature = "graphics")]
impl From<Color> for embedded_graphics_core::pixelcolor::Rgb565 {
    fn from(color: Color) -> Self {
        use embedded_graphics_core::pixelcolor::raw::RawU16;
        Self::from(RawU16::new(color.raw()))
    }
}

#[cfg(feature = "graphics")]
impl From<embedded_graphics_core::pixelcolor::Rgb565> for Color {
    fn from(color: embedded_graphics_core::pixelcolor::Rgb565) -> Self {
        use embedded_graphics_core::pixelcolor::IntoStorage;
        Self(color.into_storage())
    }
}
