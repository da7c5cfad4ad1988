//! Standard DCS calls on top of any [`DsiInterface`]
//!
//! [`Dcs`] is blanket-implemented, so every transport gets these methods for
//! free once `dsi_panel::Dcs` is in scope.

use crate::command::{self, TearMode};
use crate::interface::DsiInterface;

/// Standard Display Command Set operations
///
/// Reads that return fewer bytes than requested leave the missing bytes as zero.
pub trait Dcs: DsiInterface {
    /// Soft reset (0x01)
    fn soft_reset(&mut self) -> Result<(), Self::Error> {
        self.write_buffer(&[command::SOFT_RESET])
    }

    /// Enter sleep mode (0x10)
    fn enter_sleep_mode(&mut self) -> Result<(), Self::Error> {
        self.write_buffer(&[command::ENTER_SLEEP_MODE])
    }

    /// Exit sleep mode (0x11)
    fn exit_sleep_mode(&mut self) -> Result<(), Self::Error> {
        self.write_buffer(&[command::EXIT_SLEEP_MODE])
    }

    /// Display off (0x28)
    fn set_display_off(&mut self) -> Result<(), Self::Error> {
        self.write_buffer(&[command::SET_DISPLAY_OFF])
    }

    /// Display on (0x29)
    fn set_display_on(&mut self) -> Result<(), Self::Error> {
        self.write_buffer(&[command::SET_DISPLAY_ON])
    }

    /// Tearing effect output off (0x34)
    fn set_tear_off(&mut self) -> Result<(), Self::Error> {
        self.write_buffer(&[command::SET_TEAR_OFF])
    }

    /// Tearing effect output on (0x35)
    fn set_tear_on(&mut self, mode: TearMode) -> Result<(), Self::Error> {
        self.write_buffer(&[command::SET_TEAR_ON, mode as u8])
    }

    /// Scanline at which the tearing effect fires (0x44)
    fn set_tear_scanline(&mut self, scanline: u16) -> Result<(), Self::Error> {
        let [hi, lo] = scanline.to_be_bytes();
        self.write_buffer(&[command::SET_TEAR_SCANLINE, hi, lo])
    }

    /// Interface pixel format (0x3A)
    ///
    /// `format` is the packed DCS code, e.g. [`command::PIXEL_FORMAT_24BIT`].
    fn set_pixel_format(&mut self, format: u8) -> Result<(), Self::Error> {
        self.write_buffer(&[command::SET_PIXEL_FORMAT, format])
    }

    /// Display brightness (0x51)
    fn set_display_brightness(&mut self, brightness: u16) -> Result<(), Self::Error> {
        let [lo, hi] = brightness.to_le_bytes();
        self.write_buffer(&[command::SET_DISPLAY_BRIGHTNESS, lo, hi])
    }

    /// Read display brightness (0x52)
    fn get_display_brightness(&mut self) -> Result<u16, Self::Error> {
        let mut buf = [0u8; 2];
        self.dcs_read(command::GET_DISPLAY_BRIGHTNESS, &mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    /// Read power mode (0x0A)
    fn get_power_mode(&mut self) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        self.dcs_read(command::GET_POWER_MODE, &mut buf)?;
        Ok(buf[0])
    }

    /// Read pixel format (0x0C)
    fn get_pixel_format(&mut self) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        self.dcs_read(command::GET_PIXEL_FORMAT, &mut buf)?;
        Ok(buf[0])
    }
}

impl<T: DsiInterface + ?Sized> Dcs for T {}
