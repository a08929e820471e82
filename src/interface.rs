//! Hardware interface abstraction
//!
//! This module provides the [`PanelInterface`] trait and the [`SpiInterface`]
//! struct for talking to an ILI9341 over a 4-wire SPI bus.
//!
//! ## Hardware Requirements
//!
//! The ILI9341 needs:
//! - SPI bus (SCK + MOSI)
//! - 3 GPIO pins:
//!   - **DC**: Data/Command select (output, low=command, high=data)
//!   - **CS**: Chip select (output, active low)
//!   - **RST**: Reset (output, active low)
//!
//! Chip select is driven by this module rather than by an
//! [`SpiDevice`](embedded_hal::spi::SpiDevice): DC has to change in the middle
//! of a selected command, which a device transaction cannot express.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::SpiBus;
//! use moodpanel::{PanelInterface, SpiInterface};
//! # use core::convert::Infallible;
//! # struct MockBus;
//! # impl embedded_hal::spi::ErrorType for MockBus { type Error = Infallible; }
//! # impl SpiBus for MockBus {
//! #     fn read(&mut self, _: &mut [u8]) -> Result<(), Infallible> { Ok(()) }
//! #     fn write(&mut self, _: &[u8]) -> Result<(), Infallible> { Ok(()) }
//! #     fn transfer(&mut self, _: &mut [u8], _: &[u8]) -> Result<(), Infallible> { Ok(()) }
//! #     fn transfer_in_place(&mut self, _: &mut [u8]) -> Result<(), Infallible> { Ok(()) }
//! #     fn flush(&mut self) -> Result<(), Infallible> { Ok(()) }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let mut delay = MockDelay;
//! let mut interface = SpiInterface::new(MockBus, MockPin, MockPin, MockPin);
//!
//! interface.reset(&mut delay, 100);
//! let _ = interface.send_command(0x01, None); // Software reset
//! let _ = interface.send_command(0x3A, Some(&[0x55])); // 16 bpp
//! ```

use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Trait for the transport to an ILI9341 controller
///
/// This trait abstracts over different hardware implementations,
/// allowing [`Ili9341`](crate::display::Ili9341) to work with any bus.
/// No acknowledgement is read back: every operation is a fire-and-forget
/// write, so a missing panel only shows up as whatever the bus itself reports.
///
/// ## Implementing
///
/// For most cases, use the provided [`SpiInterface`] struct. Implement this
/// trait yourself for parallel buses or for recording test doubles.
pub trait PanelInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Send a command opcode with optional parameter bytes
    ///
    /// The implementation must:
    /// 1. Select the chip for the whole exchange
    /// 2. Send the opcode with DC low
    /// 3. Only if `payload` is present and non-empty, send it with DC high
    /// 4. Release the chip
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication or GPIO fails.
    fn send_command(&mut self, opcode: u8, payload: Option<&[u8]>)
    -> InterfaceResult<(), Self::Error>;

    /// Stream `rows` copies of `row` as pixel data
    ///
    /// DC is high and the chip stays selected for the whole stream.
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication or GPIO fails.
    fn write_pixels(&mut self, row: &[u8], rows: u16) -> InterfaceResult<(), Self::Error>;

    /// Perform hardware reset
    ///
    /// The implementation must, in order:
    /// 1. Set RST high and wait `pulse_ms`
    /// 2. Set RST low and wait `pulse_ms`
    /// 3. Set RST high and wait `pulse_ms`
    ///
    /// # Arguments
    ///
    /// * `delay` - Delay implementation for timing
    /// * `pulse_ms` - Length of each phase in milliseconds
    fn reset<D: DelayNs>(&mut self, delay: &mut D, pulse_ms: u32);
}

/// Errors that can occur at the interface level
///
/// Generic over SPI and GPIO error types.
#[derive(Debug, PartialEq, Eq)]
pub enum InterfaceError<SpiErr, PinErr> {
    /// SPI communication error
    Spi(SpiErr),
    /// GPIO pin error
    Pin(PinErr),
}

impl<SpiErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<SpiErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spi(e) => write!(f, "SPI error: {e:?}"),
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<SpiErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<SpiErr, PinErr> {}

/// 4-wire SPI implementation of [`PanelInterface`]
///
/// ## Type Parameters
///
/// * `SPI` - SPI bus implementing [`SpiBus`]
/// * `DC` - Data/Command pin implementing [`OutputPin`]
/// * `CS` - Chip select pin implementing [`OutputPin`]
/// * `RST` - Reset pin implementing [`OutputPin`]
pub struct SpiInterface<SPI, DC, CS, RST> {
    /// SPI bus for communication
    spi: SPI,
    /// Data/Command select pin (low=command, high=data)
    dc: DC,
    /// Chip select pin (active low)
    cs: CS,
    /// Reset pin (active low)
    rst: RST,
}

impl<SPI, DC, CS, RST> SpiInterface<SPI, DC, CS, RST>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
{
    /// Create a new SpiInterface
    ///
    /// # Arguments
    ///
    /// * `spi` - SPI bus (must implement [`SpiBus`])
    /// * `dc` - Data/Command pin (output, low=command, high=data)
    /// * `cs` - Chip select pin (output, active low)
    /// * `rst` - Reset pin (output, active low)
    pub fn new(spi: SPI, dc: DC, cs: CS, rst: RST) -> Self {
        Self { spi, dc, cs, rst }
    }

    /// Give the bus and pins back
    pub fn release(self) -> (SPI, DC, CS, RST) {
        (self.spi, self.dc, self.cs, self.rst)
    }
}

impl<SPI, DC, CS, RST, PinErr> SpiInterface<SPI, DC, CS, RST>
where
    SPI: SpiBus,
    DC: OutputPin<Error = PinErr>,
    CS: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
{
    /// Run `f` with CS asserted, releasing CS afterwards even if `f` failed
    fn selected<F>(&mut self, f: F) -> InterfaceResult<(), InterfaceError<SPI::Error, PinErr>>
    where
        F: FnOnce(&mut SPI, &mut DC) -> InterfaceResult<(), InterfaceError<SPI::Error, PinErr>>,
    {
        self.cs.set_low().map_err(InterfaceError::Pin)?;
        let result = f(&mut self.spi, &mut self.dc)
            .and_then(|()| self.spi.flush().map_err(InterfaceError::Spi));
        let released = self.cs.set_high().map_err(InterfaceError::Pin);
        result.and(released)
    }
}

impl<SPI, DC, CS, RST, PinErr> PanelInterface for SpiInterface<SPI, DC, CS, RST>
where
    SPI: SpiBus,
    SPI::Error: Debug,
    DC: OutputPin<Error = PinErr>,
    CS: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<SPI::Error, PinErr>;

    fn send_command(
        &mut self,
        opcode: u8,
        payload: Option<&[u8]>,
    ) -> InterfaceResult<(), Self::Error> {
        self.selected(|spi, dc| {
            dc.set_low().map_err(InterfaceError::Pin)?;
            spi.write(&[opcode]).map_err(InterfaceError::Spi)?;
            if let Some(data) = payload.filter(|data| !data.is_empty()) {
                // Opcode bytes must be on the wire before DC flips
                spi.flush().map_err(InterfaceError::Spi)?;
                dc.set_high().map_err(InterfaceError::Pin)?;
                spi.write(data).map_err(InterfaceError::Spi)?;
            }
            Ok(())
        })
    }

    fn write_pixels(&mut self, row: &[u8], rows: u16) -> InterfaceResult<(), Self::Error> {
        self.dc.set_high().map_err(InterfaceError::Pin)?;
        self.selected(|spi, _| {
            for _ in 0..rows {
                spi.write(row).map_err(InterfaceError::Spi)?;
            }
            Ok(())
        })
    }

    fn reset<D: DelayNs>(&mut self, delay: &mut D, pulse_ms: u32) {
        // HIGH -> wait -> LOW -> wait -> HIGH -> wait
        let _ = self.rst.set_high();
        delay.delay_ms(pulse_ms);
        let _ = self.rst.set_low();
        delay.delay_ms(pulse_ms);
        let _ = self.rst.set_high();
        delay.delay_ms(pulse_ms);
    }
}
