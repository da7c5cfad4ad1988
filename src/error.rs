//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`])
//! and panel operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`Error`] - Runtime errors during probe and lifecycle transitions
//! - [`InterfaceError`](crate::interface::InterfaceError) - SPI/GPIO errors of the DBI transport
//!
//! Vendor table writes never produce an [`Error`]; they are logged and
//! counted in a [`SequenceReport`](crate::sequence::SequenceReport).
//!
//! ## Example
//!
//! ```
//! use dsi_panel::{Builder, BuilderError};
//!
//! let result = Builder::new().lanes(8).build();
//! assert!(matches!(result, Err(BuilderError::InvalidLanes(8))));
//! ```

use core::fmt::Debug;

use crate::config::MAX_LANES;
use crate::profile::DcsOp;

/// Errors that can occur when driving a panel
///
/// Generic over the transport error type so callers can inspect it.
#[derive(Debug)]
pub enum Error<E> {
    /// A standard DCS call failed and aborted the transition
    Dcs {
        /// Call that failed
        op: DcsOp,
        /// Transport error
        source: E,
    },
    /// Reading or writing the backlight brightness failed
    Brightness(E),
    /// The host refused to attach the peripheral
    Attach(E),
    /// Enable was called before prepare
    NotPrepared,
    /// Unprepare was called while the panel is enabled
    StillEnabled,
    /// The panel needs a reset line and none was given
    MissingResetLine,
    /// No lane count was configured and the panel does not fix one
    MissingLanes,
    /// Brightness control was used with the backlight disabled
    BacklightDisabled,
}

impl<E: Debug> core::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Dcs { op, source } => write!(f, "DCS {op:?} failed: {source:?}"),
            Self::Brightness(e) => write!(f, "Brightness access failed: {e:?}"),
            Self::Attach(e) => write!(f, "DSI attach failed: {e:?}"),
            Self::NotPrepared => write!(f, "Panel not prepared"),
            Self::StillEnabled => write!(f, "Panel still enabled"),
            Self::MissingResetLine => write!(f, "Reset line required"),
            Self::MissingLanes => write!(f, "DSI lane count not configured"),
            Self::BacklightDisabled => write!(f, "Backlight control disabled"),
        }
    }
}

impl<E: Debug> core::error::Error for Error<E> {}

/// Errors that can occur when building configuration
#[derive(Debug)]
pub enum BuilderError {
    /// Lane count outside 1 to [`MAX_LANES`]
    InvalidLanes(u8),
    /// Timing override without an active area
    InvalidTiming {
        /// Active pixels per line requested
        hactive: u16,
        /// Active lines requested
        vactive: u16,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidLanes(lanes) => {
                write!(f, "Invalid lane count {lanes} (1 to {MAX_LANES})")
            }
            Self::InvalidTiming { hactive, vactive } => {
                write!(f, "Invalid timing {hactive}x{vactive}")
            }
        }
    }
}

impl core::error::Error for BuilderError {}
