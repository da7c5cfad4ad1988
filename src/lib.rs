//! MIPI-DSI Panel Driver
//!
//! Power sequencing and command-table transmission for video-mode MIPI-DSI
//! panels: JDI OTM1902B, JDI TPM0501010P and Sharp LS050T1SX18 (NT35596).
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - One generic lifecycle state machine driven by per-panel profiles
//! - Failure-tolerant vendor command tables with per-descriptor delays
//! - Standard DCS calls on any transport
//! - Display timing and bus format reporting
//! - DBI (SPI + data/command line) transport included
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use dsi_panel::{Builder, DsiInterface, Panel, panels};
//!
//! # struct MockDsi;
//! # impl DsiInterface for MockDsi {
//! #     type Error = Infallible;
//! #     fn write_buffer(&mut self, _payload: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn generic_write(&mut self, _payload: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn dcs_read(&mut self, _cmd: u8, buf: &mut [u8]) -> Result<usize, Self::Error> {
//! #         Ok(buf.len())
//! #     }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let dsi = MockDsi;
//! # let reset = MockPin;
//! # let tpreset = MockPin;
//! # let mut delay = MockDelay;
//! let Some(profile) = panels::by_compatible("sharp,ls050t1sx18") else {
//!     return;
//! };
//! let config = match Builder::new().lanes(4).video_mode_raw(0).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut panel = match Panel::new(dsi, Some(reset), Some(tpreset), profile, config) {
//!     Ok(panel) => panel,
//!     Err(_) => return,
//! };
//! panel.prepare(&mut delay);
//! let _ = panel.enable(&mut delay);
//! // ...
//! let _ = panel.shutdown(&mut delay);
//! ```

#![no_std]

#[cfg(test)]
extern crate alloc;
#[cfg(test)]
extern crate std;

/// MIPI DCS command definitions
pub mod command;
/// Panel configuration types and builder
pub mod config;
/// Standard DCS calls
pub mod dcs;
/// Error types for the driver
pub mod error;
/// Transport abstraction
pub mod interface;
/// Display timings and mode reporting
pub mod mode;
/// Panel lifecycle
pub mod panel;
/// Built-in panel profiles
pub mod panels;
/// Per-panel behaviour as data
pub mod profile;
/// Command tables and the sequence transmitter
pub mod sequence;

#[cfg(test)]
mod mock;

pub use command::TearMode;
pub use config::{Builder, Config, DsiSettings, ModeFlags, PixelFormat, VideoMode};
pub use dcs::Dcs;
pub use error::{BuilderError, Error};
pub use interface::{DbiInterface, DsiInterface, InterfaceError};
pub use mode::{BusFlags, BusFormat, DisplayFlags, DisplayTiming, ModeInfo, ModeList};
pub use panel::{NoPin, Panel, PowerState};
pub use profile::{DcsOp, PanelProfile, Step};
pub use sequence::{Command, CommandTable, SequenceReport, Wait, transmit};
