//! Panel configuration types and builder
//!
//! Board-specific properties of a panel instance: lane count, link pixel
//! format, video mode, timing selection and physical-size overrides, and
//! whether the panel's DCS brightness control drives the backlight.

use bitflags::bitflags;
use log::warn;

use crate::command;
pub use crate::error::BuilderError;
use crate::mode::DisplayTiming;

/// Highest lane count a DSI link supports
pub const MAX_LANES: u8 = 4;

/// Default DCS brightness
pub const DEFAULT_BRIGHTNESS: u16 = 255;

/// Pixel format on the DSI link
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PixelFormat {
    /// 24 bits per pixel
    #[default]
    Rgb888,
    /// 18 bits per pixel, loosely packed into 24
    Rgb666,
    /// 18 bits per pixel, tightly packed
    Rgb666Packed,
    /// 16 bits per pixel
    Rgb565,
}

impl PixelFormat {
    /// Packed code for DCS set-pixel-format
    pub const fn dcs_code(self) -> u8 {
        match self {
            Self::Rgb888 => command::PIXEL_FORMAT_24BIT,
            Self::Rgb666 | Self::Rgb666Packed => command::PIXEL_FORMAT_18BIT,
            Self::Rgb565 => command::PIXEL_FORMAT_16BIT,
        }
    }
}

/// Video mode transmission scheme
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VideoMode {
    /// Burst mode
    Burst,
    /// Non-burst with sync events
    #[default]
    NonBurstSyncEvent,
    /// Non-burst with sync pulses
    NonBurstSyncPulse,
}

impl VideoMode {
    /// Map the numeric board property (0, 1, 2) to a mode
    pub const fn from_raw(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Burst),
            1 => Some(Self::NonBurstSyncEvent),
            2 => Some(Self::NonBurstSyncPulse),
            _ => None,
        }
    }
}

bitflags! {
    /// DSI peripheral mode flags handed to the host on attach
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct ModeFlags: u32 {
        /// Video mode
        const VIDEO = 1 << 0;
        /// Video burst mode
        const VIDEO_BURST = 1 << 1;
        /// Video sync pulses
        const VIDEO_SYNC_PULSE = 1 << 2;
        /// Send HSE packets
        const VIDEO_HSE = 1 << 4;
        /// Clock lane may stop between transmissions
        const CLOCK_NON_CONTINUOUS = 1 << 10;
    }
}

impl ModeFlags {
    /// Flags for a video-mode panel using `mode`
    pub fn for_video_mode(mode: VideoMode) -> Self {
        let base = Self::VIDEO | Self::VIDEO_HSE | Self::CLOCK_NON_CONTINUOUS;
        match mode {
            VideoMode::Burst => base | Self::VIDEO_BURST,
            VideoMode::NonBurstSyncEvent => base,
            VideoMode::NonBurstSyncPulse => base | Self::VIDEO_SYNC_PULSE,
        }
    }
}

/// Link parameters resolved at probe
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DsiSettings {
    /// Data lanes in use
    pub lanes: u8,
    /// Pixel format on the link
    pub format: PixelFormat,
    /// Peripheral mode flags
    pub mode_flags: ModeFlags,
}

/// Panel configuration
///
/// Anything left `None` falls back to the panel profile's value.
/// Use `Builder` to create a Config.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Data lanes wired on the board
    pub lanes: Option<u8>,
    /// Pixel format on the link
    pub pixel_format: PixelFormat,
    /// Video mode transmission scheme
    pub video_mode: VideoMode,
    /// Index into the panel's timing list
    pub timing_mode: Option<u32>,
    /// Board-supplied timing that replaces the panel's list
    pub timing_override: Option<DisplayTiming>,
    /// Physical width override in millimetres
    pub width_mm: Option<u16>,
    /// Physical height override in millimetres
    pub height_mm: Option<u16>,
    /// Refresh rate override in Hz
    pub refresh_hz: Option<u16>,
    /// Whether DCS brightness drives the backlight
    pub backlight: bool,
    /// Brightness restored on enable
    pub brightness: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lanes: None,
            pixel_format: PixelFormat::default(),
            video_mode: VideoMode::default(),
            timing_mode: None,
            timing_override: None,
            width_mm: None,
            height_mm: None,
            refresh_hz: None,
            backlight: false,
            brightness: DEFAULT_BRIGHTNESS,
        }
    }
}

impl Config {
    /// Link settings for `lanes` data lanes
    pub fn dsi_settings(&self, lanes: u8) -> DsiSettings {
        DsiSettings {
            lanes,
            format: self.pixel_format,
            mode_flags: ModeFlags::for_video_mode(self.video_mode),
        }
    }
}

/// Builder for constructing panel configuration
///
/// # Example
///
/// ```rust,no_run
/// use dsi_panel::{Builder, PixelFormat};
///
/// let config = match Builder::new()
///     .lanes(4)
///     .pixel_format(PixelFormat::Rgb888)
///     .video_mode_raw(0)
///     .backlight(true)
///     .build()
/// {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// let _ = config;
/// ```
#[must_use]
#[derive(Default)]
pub struct Builder {
    config: Config,
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of data lanes (1 to 4)
    pub fn lanes(mut self, lanes: u8) -> Self {
        self.config.lanes = Some(lanes);
        self
    }

    /// Set the link pixel format
    pub fn pixel_format(mut self, format: PixelFormat) -> Self {
        self.config.pixel_format = format;
        self
    }

    /// Set the video mode
    pub fn video_mode(mut self, mode: VideoMode) -> Self {
        self.config.video_mode = mode;
        self
    }

    /// Set the video mode from its numeric board property
    ///
    /// 0 is burst, 1 non-burst with sync events, 2 non-burst with sync
    /// pulses. Other values are logged and leave the mode unchanged.
    pub fn video_mode_raw(mut self, value: u32) -> Self {
        match VideoMode::from_raw(value) {
            Some(mode) => self.config.video_mode = mode,
            None => warn!("invalid video mode {}", value),
        }
        self
    }

    /// Select a timing from the panel's list
    pub fn timing_mode(mut self, index: u32) -> Self {
        self.config.timing_mode = Some(index);
        self
    }

    /// Use a board-supplied timing instead of the panel's list
    pub fn timing(mut self, timing: DisplayTiming) -> Self {
        self.config.timing_override = Some(timing);
        self
    }

    /// Override the physical size in millimetres
    pub fn physical_size(mut self, width_mm: u16, height_mm: u16) -> Self {
        self.config.width_mm = Some(width_mm);
        self.config.height_mm = Some(height_mm);
        self
    }

    /// Override the reported refresh rate
    pub fn refresh_hz(mut self, hz: u16) -> Self {
        self.config.refresh_hz = Some(hz);
        self
    }

    /// Let DCS brightness drive the backlight
    pub fn backlight(mut self, enabled: bool) -> Self {
        self.config.backlight = enabled;
        self
    }

    /// Brightness restored on enable
    pub fn brightness(mut self, value: u16) -> Self {
        self.config.brightness = value;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidLanes`] for a lane count outside 1 to 4
    /// and [`BuilderError::InvalidTiming`] for an override with no active area.
    pub fn build(self) -> Result<Config, BuilderError> {
        if let Some(lanes) = self.config.lanes {
            if lanes == 0 || lanes > MAX_LANES {
                return Err(BuilderError::InvalidLanes(lanes));
            }
        }
        if let Some(timing) = &self.config.timing_override {
            if timing.hactive == 0 || timing.vactive == 0 {
                return Err(BuilderError::InvalidTiming {
                    hactive: timing.hactive,
                    vactive: timing.vactive,
                });
            }
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Builder::new().build();
        assert!(matches!(
            config,
            Ok(Config {
                lanes: None,
                pixel_format: PixelFormat::Rgb888,
                video_mode: VideoMode::NonBurstSyncEvent,
                backlight: false,
                brightness: DEFAULT_BRIGHTNESS,
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_lanes() {
        assert!(matches!(
            Builder::new().lanes(0).build(),
            Err(BuilderError::InvalidLanes(0))
        ));
        assert!(matches!(
            Builder::new().lanes(5).build(),
            Err(BuilderError::InvalidLanes(5))
        ));
        assert!(Builder::new().lanes(4).build().is_ok());
    }

    #[test]
    fn test_invalid_timing() {
        let result = Builder::new().timing(DisplayTiming::new(0, 1920)).build();
        assert!(matches!(
            result,
            Err(BuilderError::InvalidTiming {
                hactive: 0,
                vactive: 1920
            })
        ));
    }

    #[test]
    fn test_video_mode_raw() {
        let config = Builder::new().video_mode_raw(2).build();
        assert!(matches!(
            config,
            Ok(Config {
                video_mode: VideoMode::NonBurstSyncPulse,
                ..
            })
        ));

        // unknown values keep whatever was set before
        let config = Builder::new().video_mode_raw(0).video_mode_raw(7).build();
        assert!(matches!(
            config,
            Ok(Config {
                video_mode: VideoMode::Burst,
                ..
            })
        ));
    }

    #[test]
    fn test_mode_flags() {
        let base = ModeFlags::VIDEO | ModeFlags::VIDEO_HSE | ModeFlags::CLOCK_NON_CONTINUOUS;
        assert_eq!(
            ModeFlags::for_video_mode(VideoMode::Burst),
            base | ModeFlags::VIDEO_BURST
        );
        assert_eq!(ModeFlags::for_video_mode(VideoMode::NonBurstSyncEvent), base);
        assert_eq!(
            ModeFlags::for_video_mode(VideoMode::NonBurstSyncPulse),
            base | ModeFlags::VIDEO_SYNC_PULSE
        );
    }

    #[test]
    fn test_pixel_format_codes() {
        assert_eq!(PixelFormat::Rgb888.dcs_code(), 0x77);
        assert_eq!(PixelFormat::Rgb666.dcs_code(), 0x66);
        assert_eq!(PixelFormat::Rgb666Packed.dcs_code(), 0x66);
        assert_eq!(PixelFormat::Rgb565.dcs_code(), 0x55);
    }

    #[test]
    fn test_dsi_settings() {
        let config = Config {
            pixel_format: PixelFormat::Rgb565,
            video_mode: VideoMode::Burst,
            ..Config::default()
        };
        let settings = config.dsi_settings(2);
        assert_eq!(settings.lanes, 2);
        assert_eq!(settings.format, PixelFormat::Rgb565);
        assert!(settings.mode_flags.contains(ModeFlags::VIDEO_BURST));
    }
}
