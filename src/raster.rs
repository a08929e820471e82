//! Shape rasterization on top of a rectangle fill
//!
//! [`Canvas`] has one required drawing primitive, [`Canvas::fill_rect`]. Every
//! other shape is a provided method that decomposes into calls to it, so
//! anything that can fill a rectangle can draw circles, lines, arcs and
//! triangles. [`Ili9341`](crate::display::Ili9341) implements it by
//! addressing a window and streaming one solid block.
//!
//! The decompositions are deliberately simple and unbatched: circles and
//! lines issue one 1x1 fill per pixel, arcs are a fan of radial lines. The
//! number of fills is the unit of bus work, so callers can reason about
//! drawing time from the shape alone.
//!
//! ## Example
//!
//! ```
//! use moodpanel::{Canvas, Color, Dimensions};
//!
//! struct Count(usize);
//!
//! impl Canvas for Count {
//!     type Error = core::convert::Infallible;
//!     fn size(&self) -> Dimensions {
//!         Dimensions { width: 240, height: 320 }
//!     }
//!     fn fill_rect(&mut self, _: i32, _: i32, _: i32, _: i32, _: Color) -> Result<(), Self::Error> {
//!         self.0 += 1;
//!         Ok(())
//!     }
//! }
//!
//! let mut canvas = Count(0);
//! let _ = canvas.draw_line(0, 0, 3, 1, Color::WHITE);
//! assert_eq!(canvas.0, 4);
//! ```

use core::f64::consts::PI;

use crate::color::Color;
use crate::config::Dimensions;

/// Angular step of [`Canvas::fill_arc`] in degrees
pub const ARC_STEP_DEGREES: usize = 2;

/// A drawing surface built on a rectangle fill
pub trait Canvas {
    /// Error type returned by [`fill_rect`](Self::fill_rect)
    type Error;

    /// Logical size of the surface
    fn size(&self) -> Dimensions;

    /// Fill a `width` x `height` rectangle with its top-left corner at (x, y)
    ///
    /// Empty or negative extents draw nothing.
    fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: Color,
    ) -> Result<(), Self::Error>;

    /// Fill the whole surface
    fn fill_screen(&mut self, color: Color) -> Result<(), Self::Error> {
        let size = self.size();
        self.fill_rect(
            0,
            0,
            i32::from(size.width),
            i32::from(size.height),
            color,
        )
    }

    /// Fill a circle of radius `r` centered at (cx, cy)
    ///
    /// Every lattice point with `dx² + dy² <= r²` gets its own 1x1 fill.
    fn fill_circle(&mut self, cx: i32, cy: i32, r: i32, color: Color) -> Result<(), Self::Error> {
        let r_squared = r * r;
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r_squared {
                    self.fill_rect(cx + dx, cy + dy, 1, 1, color)?;
                }
            }
        }
        Ok(())
    }

    /// Draw a one-pixel line from (x0, y0) to (x1, y1), endpoints included
    ///
    /// Integer Bresenham over all eight octants.
    fn draw_line(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        color: Color,
    ) -> Result<(), Self::Error> {
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx - dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.fill_rect(x, y, 1, 1, color)?;
            if x == x1 && y == y1 {
                return Ok(());
            }
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Draw an annulus sector as radial spokes
    ///
    /// Sweeps `start_deg..end_deg` (half-open) in [`ARC_STEP_DEGREES`] steps
    /// and draws a line from the inner radius to the outer radius at each
    /// angle. 0° points along +x and angles grow toward +y. Wide rings leave
    /// gaps between spokes.
    fn fill_arc(
        &mut self,
        cx: i32,
        cy: i32,
        r_outer: i32,
        r_inner: i32,
        start_deg: i32,
        end_deg: i32,
        color: Color,
    ) -> Result<(), Self::Error> {
        for angle in (start_deg..end_deg).step_by(ARC_STEP_DEGREES) {
            let (inner_x, inner_y) = polar(cx, cy, r_inner, angle);
            let (outer_x, outer_y) = polar(cx, cy, r_outer, angle);
            self.draw_line(inner_x, inner_y, outer_x, outer_y, color)?;
        }
        Ok(())
    }

    /// Fill a triangle one scanline at a time
    ///
    /// Vertices are sorted by y. The long edge (top to bottom vertex) bounds
    /// one side of every scanline and the two short edges bound the other.
    /// Horizontal edges reuse their start vertex's x instead of dividing by
    /// zero.
    fn fill_triangle(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        x3: i32,
        y3: i32,
        color: Color,
    ) -> Result<(), Self::Error> {
        let [(x1, y1), (x2, y2), (x3, y3)] = sort_by_y([(x1, y1), (x2, y2), (x3, y3)]);

        for y in y1..=y3 {
            let xa = if y < y2 {
                edge_x(x1, y1, x2, y2, y)
            } else {
                edge_x(x2, y2, x3, y3, y)
            };
            let xb = edge_x(x1, y1, x3, y3, y);
            let (left, right) = if xa > xb { (xb, xa) } else { (xa, xb) };
            self.fill_rect(left, y, right - left + 1, 1, color)?;
        }
        Ok(())
    }
}

/// Point at `radius` and `angle_deg` from (cx, cy), truncated toward zero
fn polar(cx: i32, cy: i32, radius: i32, angle_deg: i32) -> (i32, i32) {
    let theta = f64::from(angle_deg) * (PI / 180.0);
    let r = f64::from(radius);
    let x = f64::from(cx) + r * libm::cos(theta);
    let y = f64::from(cy) + r * libm::sin(theta);
    (x as i32, y as i32)
}

/// x on the edge (xa, ya)-(xb, yb) at row `y`, truncating division
fn edge_x(xa: i32, ya: i32, xb: i32, yb: i32, y: i32) -> i32 {
    if yb == ya {
        xa
    } else {
        xa + (xb - xa) * (y - ya) / (yb - ya)
    }
}

/// Stable sort of three vertices by ascending y
fn sort_by_y(mut v: [(i32, i32); 3]) -> [(i32, i32); 3] {
    if v[0].1 > v[1].1 {
        v.swap(0, 1);
    }
    if v[1].1 > v[2].1 {
        v.swap(1, 2);
    }
    if v[0].1 > v[1].1 {
        v.swap(0, 1);
    }
    v
}
