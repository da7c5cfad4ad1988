//! Display timings and the mode reporter
//!
//! Every panel carries a fixed, precomputed list of timings. Nothing here is
//! derived at runtime: [`ModeList::select`] only picks one by index, falling
//! back to the first entry for an unknown index, and [`ModeInfo`] bundles the
//! pick with the physical size and bus formats the display framework needs.
//!
//! ## Example
//!
//! ```
//! use dsi_panel::mode::{DisplayTiming, ModeList};
//!
//! static FAST: [DisplayTiming; 1] = [DisplayTiming::new(1080, 1920)
//!     .pixel_clock_hz(148_500_000)
//!     .refresh_hz(60)];
//! static MODES: ModeList = ModeList::new(
//!     DisplayTiming::new(1080, 1920).pixel_clock_hz(62_000_000).refresh_hz(60),
//!     &FAST,
//! );
//!
//! assert_eq!(MODES.select(Some(1)).pixel_clock_hz, 148_500_000);
//! // unknown selectors fall back to the first timing
//! assert_eq!(MODES.select(Some(99)), MODES.select(None));
//! ```

use bitflags::bitflags;
use log::warn;

bitflags! {
    /// Signal polarities of a [`DisplayTiming`]
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct DisplayFlags: u32 {
        /// Horizontal sync active low
        const HSYNC_LOW = 1 << 0;
        /// Horizontal sync active high
        const HSYNC_HIGH = 1 << 1;
        /// Vertical sync active low
        const VSYNC_LOW = 1 << 2;
        /// Vertical sync active high
        const VSYNC_HIGH = 1 << 3;
        /// Data enable active low
        const DE_LOW = 1 << 4;
        /// Data enable active high
        const DE_HIGH = 1 << 5;
        /// Pixel data driven on the rising edge
        const PIXDATA_POSEDGE = 1 << 6;
        /// Pixel data driven on the falling edge
        const PIXDATA_NEGEDGE = 1 << 7;
    }
}

bitflags! {
    /// Bus signal properties reported next to a mode
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct BusFlags: u32 {
        /// Data enable active low
        const DE_LOW = 1 << 0;
        /// Data enable active high
        const DE_HIGH = 1 << 1;
        /// Data driven on the rising edge
        const PIXDATA_DRIVE_POSEDGE = 1 << 2;
        /// Data driven on the falling edge
        const PIXDATA_DRIVE_NEGEDGE = 1 << 3;
    }
}

impl BusFlags {
    /// Bus flags implied by a timing's polarity flags
    pub fn from_display_flags(flags: DisplayFlags) -> Self {
        let mut bus = Self::empty();
        if flags.contains(DisplayFlags::DE_LOW) {
            bus |= Self::DE_LOW;
        }
        if flags.contains(DisplayFlags::DE_HIGH) {
            bus |= Self::DE_HIGH;
        }
        if flags.contains(DisplayFlags::PIXDATA_POSEDGE) {
            bus |= Self::PIXDATA_DRIVE_POSEDGE;
        }
        if flags.contains(DisplayFlags::PIXDATA_NEGEDGE) {
            bus |= Self::PIXDATA_DRIVE_NEGEDGE;
        }
        bus
    }
}

/// Media bus pixel format
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BusFormat {
    /// RGB888 over a 24-bit bus (`MEDIA_BUS_FMT_RGB888_1X24`)
    Rgb888,
    /// RGB666 over an 18-bit bus (`MEDIA_BUS_FMT_RGB666_1X18`)
    Rgb666,
    /// RGB565 over a 16-bit bus (`MEDIA_BUS_FMT_RGB565_1X16`)
    Rgb565,
}

impl BusFormat {
    /// Media bus format code
    pub const fn code(self) -> u32 {
        match self {
            Self::Rgb888 => 0x100a,
            Self::Rgb666 => 0x1009,
            Self::Rgb565 => 0x1017,
        }
    }
}

/// Video timing of one display mode
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayTiming {
    /// Pixel clock in Hz
    pub pixel_clock_hz: u32,
    /// Active pixels per line
    pub hactive: u16,
    /// Horizontal front porch
    pub hfront_porch: u16,
    /// Horizontal sync length
    pub hsync_len: u16,
    /// Horizontal back porch
    pub hback_porch: u16,
    /// Active lines
    pub vactive: u16,
    /// Vertical front porch
    pub vfront_porch: u16,
    /// Vertical sync length
    pub vsync_len: u16,
    /// Vertical back porch
    pub vback_porch: u16,
    /// Signal polarities
    pub flags: DisplayFlags,
    /// Nominal refresh rate in Hz, 0 if unspecified
    pub refresh_hz: u16,
}

impl DisplayTiming {
    /// Timing with the given active area and everything else zero
    pub const fn new(hactive: u16, vactive: u16) -> Self {
        Self {
            pixel_clock_hz: 0,
            hactive,
            hfront_porch: 0,
            hsync_len: 0,
            hback_porch: 0,
            vactive,
            vfront_porch: 0,
            vsync_len: 0,
            vback_porch: 0,
            flags: DisplayFlags::empty(),
            refresh_hz: 0,
        }
    }

    /// Set the pixel clock
    #[must_use]
    pub const fn pixel_clock_hz(mut self, hz: u32) -> Self {
        self.pixel_clock_hz = hz;
        self
    }

    /// Set front porch, sync length and back porch of a line
    #[must_use]
    pub const fn hporch(mut self, front: u16, sync: u16, back: u16) -> Self {
        self.hfront_porch = front;
        self.hsync_len = sync;
        self.hback_porch = back;
        self
    }

    /// Set front porch, sync length and back porch of a frame
    #[must_use]
    pub const fn vporch(mut self, front: u16, sync: u16, back: u16) -> Self {
        self.vfront_porch = front;
        self.vsync_len = sync;
        self.vback_porch = back;
        self
    }

    /// Set the polarity flags
    #[must_use]
    pub const fn flags(mut self, flags: DisplayFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Set the nominal refresh rate
    #[must_use]
    pub const fn refresh_hz(mut self, hz: u16) -> Self {
        self.refresh_hz = hz;
        self
    }

    /// Pixels per line, blanking included
    pub const fn htotal(&self) -> u32 {
        self.hactive as u32
            + self.hfront_porch as u32
            + self.hsync_len as u32
            + self.hback_porch as u32
    }

    /// Lines per frame, blanking included
    pub const fn vtotal(&self) -> u32 {
        self.vactive as u32
            + self.vfront_porch as u32
            + self.vsync_len as u32
            + self.vback_porch as u32
    }
}

/// A panel's timings, indexed by the timing-mode selector
///
/// Index 0 is always present.
#[derive(Debug)]
pub struct ModeList {
    first: DisplayTiming,
    rest: &'static [DisplayTiming],
}

impl ModeList {
    /// Create a list from its default timing and any alternates
    pub const fn new(first: DisplayTiming, rest: &'static [DisplayTiming]) -> Self {
        Self { first, rest }
    }

    /// Number of timings
    pub const fn len(&self) -> usize {
        self.rest.len() + 1
    }

    /// Always false; a list holds at least its default timing
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Timing at `index`, if any
    pub fn get(&self, index: usize) -> Option<&DisplayTiming> {
        match index {
            0 => Some(&self.first),
            n => self.rest.get(n - 1),
        }
    }

    /// Timing for a selector, falling back to index 0
    ///
    /// An out-of-range selector is logged and treated as 0.
    pub fn select(&self, selector: Option<u32>) -> &DisplayTiming {
        let Some(selector) = selector else {
            return &self.first;
        };
        match usize::try_from(selector).ok().and_then(|index| self.get(index)) {
            Some(timing) => timing,
            None => {
                warn!("invalid timing mode {}, using default", selector);
                &self.first
            }
        }
    }
}

/// One mode as reported to the display framework
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModeInfo {
    /// Video timing
    pub timing: DisplayTiming,
    /// Physical width of the active area in millimetres
    pub width_mm: u16,
    /// Physical height of the active area in millimetres
    pub height_mm: u16,
    /// Supported media bus formats, preferred first
    pub bus_formats: &'static [BusFormat],
    /// Bus signal properties
    pub bus_flags: BusFlags,
    /// Whether this is the preferred mode
    pub preferred: bool,
}
