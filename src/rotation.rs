//! Orientation utilities
//!
//! The ILI9341 rotates in hardware: the memory access control register
//! (MADCTL, `0x36`) selects the scan direction, so no coordinate remapping
//! happens on the host. This module turns a [`Rotation`] and [`ColorOrder`]
//! into that register value and reports the resulting logical size.
//!
//! ## Rotation Modes
//!
//! - **Rotate0**: native portrait, 240 wide by 320 tall
//! - **Rotate90**: landscape, rows and columns exchanged (MV) and mirrored in X
//! - **Rotate180**: portrait, both axes mirrored
//! - **Rotate270**: landscape, rows and columns exchanged and mirrored in Y
//!
//! ## Example
//!
//! ```
//! use moodpanel::{rotation::madctl, ColorOrder, Rotation};
//!
//! assert_eq!(madctl(Rotation::Rotate0, ColorOrder::Bgr), 0x08);
//! assert_eq!(madctl(Rotation::Rotate90, ColorOrder::Rgb), 0x60);
//! ```

use crate::command::{MADCTL_BGR, MADCTL_MV, MADCTL_MX, MADCTL_MY};
use crate::config::{ColorOrder, Dimensions, Rotation};

/// Compute the MADCTL parameter byte
///
/// # Arguments
///
/// * `rotation` - Logical orientation
/// * `order` - Color filter order of the panel
pub const fn madctl(rotation: Rotation, order: ColorOrder) -> u8 {
    let scan = match rotation {
        Rotation::Rotate0 => 0x00,
        Rotation::Rotate90 => MADCTL_MV | MADCTL_MX,
        Rotation::Rotate180 => MADCTL_MX | MADCTL_MY,
        Rotation::Rotate270 => MADCTL_MV | MADCTL_MY,
    };
    let color = match order {
        ColorOrder::Rgb => 0x00,
        ColorOrder::Bgr => MADCTL_BGR,
    };
    scan | color
}

/// Logical dimensions of a panel with the given native size and rotation
pub const fn rotated(native: Dimensions, rotation: Rotation) -> Dimensions {
    match rotation {
        Rotation::Rotate0 | Rotation::Rotate180 => native,
        Rotation::Rotate90 | Rotation::Rotate270 => Dimensions {
            width: native.height,
            height: native.width,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NATIVE_DIMENSIONS;

    #[test]
    fn test_default_orientation_is_plain_bgr() {
        assert_eq!(madctl(Rotation::Rotate0, ColorOrder::Bgr), 0x08);
        assert_eq!(madctl(Rotation::Rotate0, ColorOrder::Rgb), 0x00);
    }

    #[test]
    fn test_landscape_sets_exchange_bit() {
        for rotation in [Rotation::Rotate90, Rotation::Rotate270] {
            assert_ne!(madctl(rotation, ColorOrder::Rgb) & MADCTL_MV, 0);
        }
        for rotation in [Rotation::Rotate0, Rotation::Rotate180] {
            assert_eq!(madctl(rotation, ColorOrder::Rgb) & MADCTL_MV, 0);
        }
    }

    #[test]
    fn test_rotate180_mirrors_both_axes() {
        assert_eq!(madctl(Rotation::Rotate180, ColorOrder::Bgr), 0xC8);
    }

    #[test]
    fn test_rotated_dimensions() {
        let portrait = rotated(NATIVE_DIMENSIONS, Rotation::Rotate180);
        assert_eq!((portrait.width, portrait.height), (240, 320));

        let landscape = rotated(NATIVE_DIMENSIONS, Rotation::Rotate270);
        assert_eq!((landscape.width, landscape.height), (320, 240));
    }
}
