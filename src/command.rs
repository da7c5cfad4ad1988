//! MIPI DCS command definitions
//!
//! Standard Display Command Set opcodes used by the lifecycle steps, plus the
//! pixel-format and tear-effect parameters they take. Vendor (manufacturer
//! command set) bytes live in the per-panel tables under [`crate::panels`].
//!
//! ## Example
//!
//! ```
//! use dsi_panel::command::{self, TearMode};
//!
//! assert_eq!(command::SET_TEAR_ON, 0x35);
//! assert_eq!(TearMode::VHBlank as u8, 1);
//! ```

/// Soft reset (0x01)
///
/// No parameters. The panel needs ~5ms before accepting further commands.
pub const SOFT_RESET: u8 = 0x01;

/// Read display power mode (0x0A)
///
/// Returns 1 byte.
pub const GET_POWER_MODE: u8 = 0x0A;

/// Read pixel format (0x0C)
///
/// Returns 1 byte.
pub const GET_PIXEL_FORMAT: u8 = 0x0C;

/// Enter sleep mode (0x10)
pub const ENTER_SLEEP_MODE: u8 = 0x10;

/// Exit sleep mode (0x11)
///
/// The panel needs ~5ms before the next command.
pub const EXIT_SLEEP_MODE: u8 = 0x11;

/// Display off (0x28)
pub const SET_DISPLAY_OFF: u8 = 0x28;

/// Display on (0x29)
pub const SET_DISPLAY_ON: u8 = 0x29;

/// Tearing effect line off (0x34)
pub const SET_TEAR_OFF: u8 = 0x34;

/// Tearing effect line on (0x35)
///
/// 1 byte: [`TearMode`]
pub const SET_TEAR_ON: u8 = 0x35;

/// Interface pixel format (0x3A)
///
/// 1 byte: DBI format in the high nibble, DPI format in the low nibble
pub const SET_PIXEL_FORMAT: u8 = 0x3A;

/// Tear scanline (0x44)
///
/// 2 bytes: scanline, high byte first
pub const SET_TEAR_SCANLINE: u8 = 0x44;

/// Write display brightness (0x51)
///
/// 2 bytes: brightness, low byte first
pub const SET_DISPLAY_BRIGHTNESS: u8 = 0x51;

/// Read display brightness (0x52)
///
/// Returns 2 bytes.
pub const GET_DISPLAY_BRIGHTNESS: u8 = 0x52;

/// Write CTRL display (0x53)
///
/// 1 byte: brightness control block, dimming and backlight enable bits
pub const WRITE_CONTROL_DISPLAY: u8 = 0x53;

/// Write content adaptive brightness control (0x55)
///
/// 1 byte: CABC mode
pub const WRITE_POWER_SAVE: u8 = 0x55;

/// 16 bits per pixel in both nibbles of [`SET_PIXEL_FORMAT`]
pub const PIXEL_FORMAT_16BIT: u8 = 0x55;
/// 18 bits per pixel in both nibbles of [`SET_PIXEL_FORMAT`]
pub const PIXEL_FORMAT_18BIT: u8 = 0x66;
/// 24 bits per pixel in both nibbles of [`SET_PIXEL_FORMAT`]
pub const PIXEL_FORMAT_24BIT: u8 = 0x77;

/// Tearing effect output mode for [`SET_TEAR_ON`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum TearMode {
    /// Signal V-blanking only
    VBlank = 0,
    /// Signal both V-blanking and H-blanking
    VHBlank = 1,
}
