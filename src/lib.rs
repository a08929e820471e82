//! ILI9341 TFT Driver and Mood Face Renderer
//!
//! A driver for the ILI9341 240x320 TFT controller, a small rasterizer built
//! on its rectangle fill, and a renderer that shows a neutral, happy or sad
//! face with a matching buzzer cue whenever a mood message arrives.
//!
//! ## Features
//!
//! - `no_std` compatible, no allocation
//! - `embedded-hal` v1.0 support (SPI bus, GPIO, delay, PWM)
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Rotation and color order support
//! - Pixels stream straight to the controller; there is no framebuffer
//! - Polling event loop with retry and backoff
//!
//! ## Layers
//!
//! | Layer            | Module         | Entry point                      |
//! |------------------|----------------|----------------------------------|
//! | Transport        | [`interface`]  | [`SpiInterface`]                 |
//! | Panel protocol   | [`display`]    | [`Ili9341`]                      |
//! | Shapes           | [`raster`]     | [`Canvas`]                       |
//! | Faces and sound  | [`face`], [`audio`] | [`MoodRenderer`], [`CuePlayer`] |
//! | Event loop       | [`dispatcher`] | [`Dispatcher`]                   |
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::pwm::{ErrorType, SetDutyCycle};
//! use embedded_hal::spi::SpiBus;
//! use moodpanel::{Buzzer, Builder, Ili9341, Mood, MoodRenderer, Rotation, SpiInterface};
//!
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiBus for MockSpi {
//! #     fn read(&mut self, _: &mut [u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn write(&mut self, _: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn transfer(&mut self, _: &mut [u8], _: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn transfer_in_place(&mut self, _: &mut [u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockPwm;
//! # impl ErrorType for MockPwm { type Error = Infallible; }
//! # impl SetDutyCycle for MockPwm {
//! #     fn max_duty_cycle(&self) -> u16 { 65535 }
//! #     fn set_duty_cycle(&mut self, _: u16) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl Buzzer for MockPwm {
//! #     fn set_frequency(&mut self, _: u32) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let spi = MockSpi;
//! # let dc = MockPin;
//! # let cs = MockPin;
//! # let rst = MockPin;
//! # let buzzer = MockPwm;
//! # let mut delay = MockDelay;
//! let interface = SpiInterface::new(spi, dc, cs, rst);
//! let config = match Builder::new().rotation(Rotation::Rotate0).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut display = Ili9341::new(interface, config);
//! if display.begin(&mut delay).is_err() {
//!     return;
//! }
//!
//! let mut renderer = MoodRenderer::new(display, buzzer);
//! let _ = renderer.show(Mood::from_payload(b"positive"), &mut delay);
//! ```

#![no_std]

#[cfg(test)]
extern crate alloc;

/// Buzzer cue playback
pub mod audio;
/// RGB565 color types
pub mod color;
/// ILI9341 command definitions
pub mod command;
/// Panel and event-loop configuration
pub mod config;
/// Core panel operations
pub mod display;
/// Event loop and its collaborator traits
pub mod dispatcher;
/// Error types for the driver
pub mod error;
/// Mood face scenes
pub mod face;
/// Hardware interface abstraction
pub mod interface;
/// Mood classification
pub mod mood;
/// Shape rasterization
pub mod raster;
/// Rotation to memory access control mapping
pub mod rotation;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

pub use audio::{Buzzer, Cue, CuePlayer, ToneStep, Wobble};
pub use color::{Color, Rgb};
pub use config::{Builder, ColorOrder, Config, Dimensions, DispatcherConfig, Rotation};
pub use dispatcher::{Dispatcher, Link, MAX_PAYLOAD_LEN, MoodSink, MoodSource, Step};
pub use display::Ili9341;
pub use error::{BuilderError, Error, RenderError};
pub use face::{FaceStyle, MoodRenderer};
pub use interface::{InterfaceError, PanelInterface, SpiInterface};
pub use mood::Mood;
pub use raster::Canvas;
