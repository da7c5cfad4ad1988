//! JDI TPM0501010P 5" 1080x1920 video-mode panel
//!
//! A single command-2 write precedes the standard DCS bring-up. The panel
//! also needs one manufacturer generic write to select DSI video mode.

use embedded_hal::digital::PinState;

use super::{DCS_DISABLE, RGB_BUS_FORMATS, TEAR_VBLANK, TIMING_1080X1920};
use crate::command;
use crate::mode::ModeList;
use crate::profile::{DcsOp, GpioStep, PanelProfile, PixelFormatSource, Step};
use crate::sequence::{Command, CommandTable, Wait};

/// Command-2 unlock and address window setup, in one packet
pub static POWER_ON: CommandTable = CommandTable::new(
    "tpm0501010p power-on",
    &[Command::new(
        Wait::us(10),
        &[
            0x00, 0xFF, 0x19, 0x02, 0x01, 0x00, 0x80, 0xFF, 0x19, 0x02, 0x00, 0x83, 0xF3, 0xCA,
            0x00, 0x90, 0xC4, 0x00, 0x00, 0xB4, 0xC0, 0xC0, 0x2A, 0x00, 0x00, 0x04, 0x37, 0x2B,
            0x00, 0x00, 0x07, 0x7F,
        ],
    )],
);

static POWER_ON_PULSE: [GpioStep; 5] = [
    GpioStep::panel(PinState::High, Wait::ms(20)),
    GpioStep::panel(PinState::Low, Wait::ms(10)),
    GpioStep::panel(PinState::High, Wait::ms(70)),
    GpioStep::touch(PinState::Low, Wait::ms(10)),
    GpioStep::touch(PinState::High, Wait::ms(50)),
];

static POWER_OFF_PULSE: [GpioStep; 2] = [
    GpioStep::panel(PinState::Low, Wait::ms(15)),
    GpioStep::touch(PinState::Low, Wait::ms(15)),
];

static ENABLE: [Step; 12] = [
    Step::Table(&POWER_ON),
    // MCU and RGB interfaces both at 24bpp until the link format is applied
    Step::Dcs(DcsOp::SetPixelFormat(PixelFormatSource::Fixed(
        command::PIXEL_FORMAT_24BIT,
    ))),
    Step::Dcs(DcsOp::SoftReset),
    Step::Sleep(Wait::ms(15)),
    Step::Dcs(DcsOp::GenericWrite(&[0xC2, 0x0B])),
    TEAR_VBLANK,
    Step::Dcs(DcsOp::SetTearScanline(0x380)),
    Step::Dcs(DcsOp::SetPixelFormat(PixelFormatSource::Link)),
    Step::RestoreBrightness,
    Step::Dcs(DcsOp::ExitSleepMode),
    Step::Sleep(Wait::ms(5)),
    Step::Dcs(DcsOp::SetDisplayOn),
];

/// Profile of the JDI TPM0501010P
pub static PROFILE: PanelProfile = PanelProfile {
    name: "tpm0501010p",
    compatible: "jdi,tpm0501010p",
    fixed_lanes: None,
    reset_required: false,
    reset_initial: PinState::High,
    touch_reset_initial: PinState::High,
    power_on: &POWER_ON_PULSE,
    power_off: &POWER_OFF_PULSE,
    enable: &ENABLE,
    disable: &DCS_DISABLE,
    fail_safe_reset: Some(PinState::Low),
    modes: ModeList::new(TIMING_1080X1920, &[]),
    bus_formats: &RGB_BUS_FORMATS,
    width_mm: 0,
    height_mm: 0,
};
