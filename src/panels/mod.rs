//! Built-in panel profiles
//!
//! Each submodule holds one panel's vendor tables and its [`PanelProfile`].
//! [`by_compatible`] resolves a device-tree compatible string to a profile.

use crate::command::TearMode;
use crate::mode::{BusFormat, DisplayFlags, DisplayTiming};
use crate::profile::{DcsOp, PanelProfile, Step};
use crate::sequence::Wait;

pub mod nt35596;
pub mod otm1902b;
pub mod tpm0501010p;

/// Every built-in profile
pub static ALL: [&PanelProfile; 3] = [&otm1902b::PROFILE, &tpm0501010p::PROFILE, &nt35596::PROFILE];

/// Look up a profile by compatible string
pub fn by_compatible(compatible: &str) -> Option<&'static PanelProfile> {
    ALL.iter()
        .copied()
        .find(|profile| profile.compatible == compatible)
}

/// 1080x1920 at a typical 132 MHz, shared by the NT35596 and TPM0501010P boards
pub(crate) const TIMING_1080X1920: DisplayTiming = DisplayTiming::new(1080, 1920)
    .pixel_clock_hz(132_000_000)
    .hporch(20, 2, 34)
    .vporch(10, 2, 4)
    .flags(
        DisplayFlags::HSYNC_LOW
            .union(DisplayFlags::VSYNC_LOW)
            .union(DisplayFlags::DE_LOW)
            .union(DisplayFlags::PIXDATA_NEGEDGE),
    );

pub(crate) static RGB_BUS_FORMATS: [BusFormat; 3] =
    [BusFormat::Rgb888, BusFormat::Rgb666, BusFormat::Rgb565];

/// Display off, then sleep in, with the settle times the controllers need
pub(crate) static DCS_DISABLE: [Step; 4] = [
    Step::Sleep(Wait::ms(10)),
    Step::Dcs(DcsOp::SetDisplayOff),
    Step::Sleep(Wait::ms(5)),
    Step::Dcs(DcsOp::EnterSleepMode),
];

pub(crate) const TEAR_VBLANK: Step = Step::Dcs(DcsOp::SetTearOn(TearMode::VBlank));
pub(crate) const TEAR_VHBLANK: Step = Step::Dcs(DcsOp::SetTearOn(TearMode::VHBlank));
