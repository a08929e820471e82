//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`]),
//! panel operations ([`Error`]) and face rendering ([`RenderError`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`Error`] - Runtime errors during panel operations
//! - [`RenderError`] - A drawing or audio failure while showing a mood
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level hardware communication errors
//!
//! ## Example
//!
//! ```
//! use moodpanel::{Builder, BuilderError};
//!
//! let result = Builder::new().reset_pulse_ms(5).build();
//! assert!(matches!(result, Err(BuilderError::TimingTooShort { .. })));
//! ```

use crate::interface::PanelInterface;

/// Widest row the driver streams in one call, in pixels
///
/// The ILI9341 is 320 pixels along its long edge, so this covers every
/// rotation.
pub const MAX_ROW_PIXELS: u16 = 320;

/// Shortest reset pulse or settle delay the controller tolerates, in milliseconds
pub const MIN_TIMING_MS: u32 = 100;

/// Errors that can occur when driving the panel
///
/// Generic over the interface type to preserve the specific error type.
pub enum Error<I: PanelInterface> {
    /// Interface error (SPI/GPIO)
    ///
    /// Wraps the underlying hardware error from the [`PanelInterface`] implementation.
    Interface(I::Error),
    /// Row wider than the row buffer
    ///
    /// Rectangles reaching the driver through [`Canvas`](crate::raster::Canvas)
    /// are clipped first and never trigger this.
    RowTooWide {
        /// Requested width in pixels
        width: u16,
        /// Row buffer capacity in pixels
        max: u16,
    },
}

impl<I: PanelInterface> core::fmt::Debug for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(e) => f.debug_tuple("Interface").field(e).finish(),
            Self::RowTooWide { width, max } => f
                .debug_struct("RowTooWide")
                .field("width", width)
                .field("max", max)
                .finish(),
        }
    }
}

impl<I: PanelInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(e) => write!(f, "Interface error: {e:?}"),
            Self::RowTooWide { width, max } => {
                write!(f, "Row too wide: {width} pixels, max {max}")
            }
        }
    }
}

impl<I: PanelInterface> core::error::Error for Error<I> {}

/// Errors that can occur when building configuration
#[derive(Debug, PartialEq, Eq)]
pub enum BuilderError {
    /// A reset or settle delay is shorter than the controller requires
    TimingTooShort {
        /// Which setting was rejected
        name: &'static str,
        /// Requested milliseconds
        ms: u32,
        /// Minimum milliseconds
        min: u32,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::TimingTooShort { name, ms, min } => {
                write!(f, "{name} of {ms} ms is below the {min} ms minimum")
            }
        }
    }
}

impl core::error::Error for BuilderError {}

/// Errors raised while showing a mood
#[derive(Debug, PartialEq, Eq)]
pub enum RenderError<CanvasErr, AudioErr> {
    /// Drawing the face failed
    Canvas(CanvasErr),
    /// Playing the audio cue failed
    Audio(AudioErr),
}

impl<CanvasErr: core::fmt::Debug, AudioErr: core::fmt::Debug> core::fmt::Display
    for RenderError<CanvasErr, AudioErr>
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Canvas(e) => write!(f, "Canvas error: {e:?}"),
            Self::Audio(e) => write!(f, "Audio error: {e:?}"),
        }
    }
}

impl<CanvasErr: core::fmt::Debug, AudioErr: core::fmt::Debug> core::error::Error
    for RenderError<CanvasErr, AudioErr>
{
}
