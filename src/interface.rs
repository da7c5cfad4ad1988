//! Display transport abstraction
//!
//! This module provides the [`DsiInterface`] trait, through which every panel
//! operation reaches the hardware, and [`DbiInterface`], an implementation for
//! DCS-compatible panels driven over SPI with a data/command line.
//!
//! A MIPI-DSI host driver implements [`DsiInterface`] directly: DCS writes
//! become DCS long/short packets, [`DsiInterface::generic_write`] a generic
//! packet, and the low-power and attach hooks map onto the host's own
//! controls.
//!
//! ## Example
//!
//! ```rust,no_run
//! use dsi_panel::{DbiInterface, DsiInterface};
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::{Operation, SpiDevice};
//! # use core::convert::Infallible;
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiDevice for MockSpi {
//! #     fn transaction(
//! #         &mut self,
//! #         _operations: &mut [Operation<'_, u8>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! let mut interface = DbiInterface::new(MockSpi, MockPin);
//!
//! // Tear scanline 0x0380
//! let _ = interface.write_buffer(&[0x44, 0x03, 0x80]);
//!
//! // Read power mode
//! let mut mode = [0u8; 1];
//! let _ = interface.dcs_read(0x0A, &mut mode);
//! ```

use core::fmt::Debug;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::{Operation, SpiDevice};

use crate::config::DsiSettings;

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Transport to a DCS-speaking display controller
///
/// Only the three packet operations are required. The low-power and
/// attach/detach hooks default to no-ops for transports that have no such
/// notion.
pub trait DsiInterface {
    /// Error type for transport operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Write a raw DCS buffer
    ///
    /// `payload[0]` is the command byte, the rest are its parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport rejects the write.
    #[allow(clippy::type_complexity)]
    fn write_buffer(&mut self, payload: &[u8]) -> InterfaceResult<(), Self::Error>;

    /// Write a manufacturer generic packet
    ///
    /// # Errors
    ///
    /// Returns an error if the transport rejects the write.
    #[allow(clippy::type_complexity)]
    fn generic_write(&mut self, payload: &[u8]) -> InterfaceResult<(), Self::Error>;

    /// Issue a DCS read and fill `buf` with the response
    ///
    /// Returns the number of bytes actually received.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails.
    #[allow(clippy::type_complexity)]
    fn dcs_read(&mut self, command: u8, buf: &mut [u8]) -> InterfaceResult<usize, Self::Error>;

    /// Select low-power (true) or high-speed (false) transmission
    fn set_low_power_mode(&mut self, enabled: bool) {
        let _ = enabled;
    }

    /// Register the peripheral with the host using the given link settings
    ///
    /// # Errors
    ///
    /// Returns an error if the host refuses the settings.
    #[allow(clippy::type_complexity)]
    fn attach(&mut self, settings: &DsiSettings) -> InterfaceResult<(), Self::Error> {
        let _ = settings;
        Ok(())
    }

    /// Unregister the peripheral from the host
    ///
    /// # Errors
    ///
    /// Returns an error if the host fails to detach.
    #[allow(clippy::type_complexity)]
    fn detach(&mut self) -> InterfaceResult<(), Self::Error> {
        Ok(())
    }
}

/// Errors from [`DbiInterface`]
///
/// Generic over SPI and GPIO error types.
#[derive(Debug)]
pub enum InterfaceError<SpiErr, PinErr> {
    /// SPI communication error
    Spi(SpiErr),
    /// Data/command pin error
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

/// DCS over a 4-wire SPI link (MIPI DBI type C, option 3)
///
/// The command byte is clocked out with DC low, its parameters with DC high.
/// Generic packets have no DBI equivalent and are sent the same way.
///
/// ## Type Parameters
///
/// * `SPI` - SPI device implementing [`SpiDevice`]
/// * `DC` - Data/Command pin implementing [`OutputPin`]
pub struct DbiInterface<SPI, DC> {
    /// SPI device for communication
    spi: SPI,
    /// Data/Command select pin (low=command, high=data)
    dc: DC,
}

impl<SPI, DC> DbiInterface<SPI, DC>
where
    SPI: SpiDevice,
    DC: OutputPin,
{
    /// Create a new DBI interface
    pub fn new(spi: SPI, dc: DC) -> Self {
        Self { spi, dc }
    }

    /// Give back the SPI device and DC pin
    pub fn release(self) -> (SPI, DC) {
        (self.spi, self.dc)
    }
}

impl<SPI, DC> DsiInterface for DbiInterface<SPI, DC>
where
    SPI: SpiDevice,
    SPI::Error: Debug,
    DC: OutputPin,
    DC::Error: Debug,
{
    type Error = InterfaceError<SPI::Error, DC::Error>;

    fn write_buffer(&mut self, payload: &[u8]) -> InterfaceResult<(), Self::Error> {
        let Some((command, params)) = payload.split_first() else {
            return Ok(());
        };
        self.dc.set_low().map_err(InterfaceError::Pin)?;
        self.spi
            .write(core::slice::from_ref(command))
            .map_err(InterfaceError::Spi)?;
        if !params.is_empty() {
            self.dc.set_high().map_err(InterfaceError::Pin)?;
            self.spi.write(params).map_err(InterfaceError::Spi)?;
        }
        Ok(())
    }

    fn generic_write(&mut self, payload: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.write_buffer(payload)
    }

    fn dcs_read(&mut self, command: u8, buf: &mut [u8]) -> InterfaceResult<usize, Self::Error> {
        let len = buf.len();
        self.dc.set_low().map_err(InterfaceError::Pin)?;
        self.spi
            .transaction(&mut [Operation::Write(&[command]), Operation::Read(buf)])
            .map_err(InterfaceError::Spi)?;
        Ok(len)
    }
}
