//! Per-panel behaviour as data
//!
//! A [`PanelProfile`] describes everything that differs between panels: the
//! reset-line pulse patterns, the ordered steps run on enable and disable,
//! the timings and the physical size. [`crate::Panel`] interprets it, so
//! adding a panel means writing a profile, not a driver.

use embedded_hal::digital::PinState;

use crate::command::TearMode;
use crate::mode::{BusFormat, ModeList};
use crate::sequence::{CommandTable, Wait};

/// Which reset line a [`GpioStep`] drives
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetLine {
    /// Panel (display controller) reset
    Panel,
    /// Touch controller reset
    Touch,
}

/// Drive a reset line to a level, then hold it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GpioStep {
    /// Line to drive
    pub line: ResetLine,
    /// Level to drive it to
    pub state: PinState,
    /// Time to hold before the next step
    pub hold: Wait,
}

impl GpioStep {
    /// Step on the panel reset line
    pub const fn panel(state: PinState, hold: Wait) -> Self {
        Self {
            line: ResetLine::Panel,
            state,
            hold,
        }
    }

    /// Step on the touch reset line
    pub const fn touch(state: PinState, hold: Wait) -> Self {
        Self {
            line: ResetLine::Touch,
            state,
            hold,
        }
    }
}

/// Where a set-pixel-format step takes its value from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormatSource {
    /// A fixed DCS code
    Fixed(u8),
    /// The configured link pixel format
    Link,
}

/// A standard DCS call made by a lifecycle step
///
/// Unlike vendor tables, a failed DCS call aborts the transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DcsOp {
    /// Soft reset
    SoftReset,
    /// Exit sleep mode
    ExitSleepMode,
    /// Enter sleep mode
    EnterSleepMode,
    /// Display on
    SetDisplayOn,
    /// Display off
    SetDisplayOff,
    /// Tearing effect on
    SetTearOn(TearMode),
    /// Tear scanline
    SetTearScanline(u16),
    /// Interface pixel format
    SetPixelFormat(PixelFormatSource),
    /// Display brightness
    SetDisplayBrightness(u16),
    /// Manufacturer generic write
    GenericWrite(&'static [u8]),
}

/// One step of an enable or disable sequence
#[derive(Clone, Copy, Debug)]
pub enum Step {
    /// Send a vendor table; write failures are logged only
    Table(&'static CommandTable),
    /// Make a standard DCS call; failure aborts
    Dcs(DcsOp),
    /// Block for a fixed time
    Sleep(Wait),
    /// Write the cached brightness, if the backlight is DCS controlled
    RestoreBrightness,
    /// Read back brightness, power mode and pixel format into the log
    ReadDiagnostics,
}

/// Static description of one panel model
#[derive(Debug)]
pub struct PanelProfile {
    /// Human-readable name, used as log prefix
    pub name: &'static str,
    /// Device-tree compatible string
    pub compatible: &'static str,
    /// Lane count fixed by the panel; overrides configuration
    pub fixed_lanes: Option<u8>,
    /// Probe fails without a panel reset line
    pub reset_required: bool,
    /// Panel reset level applied at probe
    pub reset_initial: PinState,
    /// Touch reset level applied at probe
    pub touch_reset_initial: PinState,
    /// Prepare pulse pattern
    pub power_on: &'static [GpioStep],
    /// Unprepare pulse pattern
    pub power_off: &'static [GpioStep],
    /// Enable sequence
    pub enable: &'static [Step],
    /// Disable sequence
    pub disable: &'static [Step],
    /// Panel reset level driven when enable fails
    pub fail_safe_reset: Option<PinState>,
    /// Supported timings, index 0 preferred
    pub modes: ModeList,
    /// Media bus formats, preferred first
    pub bus_formats: &'static [BusFormat],
    /// Physical width in millimetres, 0 if unknown
    pub width_mm: u16,
    /// Physical height in millimetres, 0 if unknown
    pub height_mm: u16,
}

impl PanelProfile {
    /// Vendor tables sent during enable, in order
    pub fn enable_tables(&self) -> impl Iterator<Item = &'static CommandTable> + '_ {
        self.enable.iter().filter_map(|step| match step {
            Step::Table(table) => Some(*table),
            _ => None,
        })
    }
}
