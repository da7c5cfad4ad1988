//! Sharp LS050T1SX18 5" 1080x1920 panel on a Novatek NT35596 controller
//!
//! The reset line is mandatory. Enable finishes by reading back brightness,
//! power mode and pixel format for the debug log.

use embedded_hal::digital::PinState;

use super::{DCS_DISABLE, RGB_BUS_FORMATS, TEAR_VHBLANK, TIMING_1080X1920};
use crate::mode::ModeList;
use crate::profile::{DcsOp, GpioStep, PanelProfile, PixelFormatSource, Step};
use crate::sequence::{Command, CommandTable, Wait};

/// Vertical porches and tearing effect
pub static DISPLAY_ON: CommandTable = CommandTable::new(
    "nt35596 display-on",
    &[
        // VBP
        Command::new(Wait::ms(1), &[0xD3, 0x06]),
        // VFP
        Command::new(Wait::ms(1), &[0xD4, 0x04]),
        Command::new(Wait::ms(1), &[0x35, 0x01]),
    ],
);

static POWER_ON_PULSE: [GpioStep; 5] = [
    GpioStep::panel(PinState::High, Wait::ms(20)),
    GpioStep::panel(PinState::Low, Wait::ms(20)),
    GpioStep::panel(PinState::High, Wait::ms(20)),
    GpioStep::touch(PinState::Low, Wait::ms(20)),
    GpioStep::touch(PinState::High, Wait::ms(60)),
];

static POWER_OFF_PULSE: [GpioStep; 2] = [
    GpioStep::panel(PinState::Low, Wait::ms(20)),
    GpioStep::touch(PinState::Low, Wait::ms(20)),
];

static ENABLE: [Step; 11] = [
    Step::Table(&DISPLAY_ON),
    Step::Dcs(DcsOp::SoftReset),
    Step::Sleep(Wait::ms(15)),
    TEAR_VHBLANK,
    Step::Dcs(DcsOp::SetTearScanline(0)),
    Step::Dcs(DcsOp::SetPixelFormat(PixelFormatSource::Link)),
    Step::RestoreBrightness,
    Step::Dcs(DcsOp::ExitSleepMode),
    Step::Sleep(Wait::ms(5)),
    Step::Dcs(DcsOp::SetDisplayOn),
    Step::ReadDiagnostics,
];

/// Profile of the Sharp LS050T1SX18
pub static PROFILE: PanelProfile = PanelProfile {
    name: "nt35596",
    compatible: "sharp,ls050t1sx18",
    fixed_lanes: None,
    reset_required: true,
    reset_initial: PinState::Low,
    touch_reset_initial: PinState::Low,
    power_on: &POWER_ON_PULSE,
    power_off: &POWER_OFF_PULSE,
    enable: &ENABLE,
    disable: &DCS_DISABLE,
    fail_safe_reset: Some(PinState::High),
    modes: ModeList::new(TIMING_1080X1920, &[]),
    bus_formats: &RGB_BUS_FORMATS,
    width_mm: 0,
    height_mm: 0,
};
