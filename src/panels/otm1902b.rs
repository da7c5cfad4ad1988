//! JDI OTM1902B 5.5" 1080x1920 video-mode panel
//!
//! The controller is configured entirely through vendor tables; enable makes
//! no standard DCS calls of its own.

use embedded_hal::digital::PinState;

use crate::mode::{BusFormat, DisplayTiming, ModeList};
use crate::profile::{DcsOp, GpioStep, PanelProfile, Step};
use crate::sequence::{Command, CommandTable, Wait};

/// Clever-edge initialisation at 1080p
pub static CLEVER_EDGE_1080P: CommandTable = CommandTable::new(
    "otm1902b clever-edge 1080p",
    &[
        Command::new(Wait::us(100), &[0x00, 0x00]),
        Command::new(Wait::us(100), &[0xFF, 0x19, 0x02, 0x01]),
        Command::new(Wait::us(100), &[0x00, 0x80]),
        Command::new(Wait::us(100), &[0xFF, 0x19, 0x02]),
        Command::new(Wait::us(100), &[0x00, 0x00]),
        Command::new(Wait::us(100), &[0x2A, 0x00, 0x00, 0x04, 0x37]),
        Command::new(Wait::us(100), &[0x00, 0x00]),
        Command::new(Wait::us(100), &[0x2B, 0x00, 0x00, 0x07, 0x7F]),
        Command::new(Wait::us(100), &[0x00, 0x00]),
        Command::new(Wait::us(100), &[0x1C, 0x00]),
        Command::new(Wait::us(10), &[0x00, 0x93]),
        Command::new(Wait::us(10), &[0xD7, 0x00]),
    ],
);

/// Command-2 register setup: colour enhancement, sharpness and CABC curves
pub static POWER_ON: CommandTable = CommandTable::new(
    "otm1902b power-on",
    &[
        // command 2 enable
        Command::new(Wait::us(10), &[0x00, 0x00]),
        Command::new(Wait::us(10), &[0xFF, 0x19, 0x02, 0x01, 0x00]),
        Command::new(Wait::us(10), &[0x00, 0x80]),
        Command::new(Wait::us(10), &[0xFF, 0x19, 0x02]),

        // colour enhancement
        Command::new(Wait::us(10), &[0x00, 0x00]),
        Command::new(Wait::us(10), &[0x59, 0x03]),
        Command::new(Wait::us(10), &[0x00, 0xA0]),
        Command::new(
            Wait::us(10),
            &[
                0xD6, 0x03, 0x01, 0x00, 0x03, 0x03, 0x00, 0xFD, 0x00, 0x03, 0x06, 0x06, 0x02,
            ],
        ),
        Command::new(Wait::us(10), &[0x00, 0xB0]),
        Command::new(
            Wait::us(10),
            &[
                0xD6, 0x00, 0x00, 0x66, 0xB3, 0xCD, 0xB3, 0xCD, 0xB3, 0xA6, 0xB3, 0xCD, 0xB3,
            ],
        ),
        Command::new(Wait::us(10), &[0x00, 0xC0]),
        Command::new(
            Wait::us(10),
            &[
                0xD6, 0x26, 0x00, 0x89, 0x77, 0x89, 0x77, 0x89, 0x77, 0x6F, 0x77, 0x89, 0x77,
            ],
        ),
        Command::new(Wait::us(10), &[0x00, 0xD0]),
        Command::new(
            Wait::us(10),
            &[
                0xD6, 0x26, 0x3C, 0x44, 0x3C, 0x44, 0x3C, 0x44, 0x3C, 0x37, 0x3C, 0x44, 0x3C,
            ],
        ),
        Command::new(Wait::us(10), &[0x00, 0x80]),
        Command::new(Wait::us(10), &[0xD6, 0x3A]),

        // sharpness
        Command::new(Wait::us(10), &[0x00, 0x00]),
        Command::new(Wait::us(10), &[0x59, 0x03]),
        Command::new(Wait::us(10), &[0x00, 0x90]),
        Command::new(Wait::us(10), &[0xD7, 0x83]),
        Command::new(Wait::us(10), &[0x00, 0x92]),
        Command::new(Wait::us(10), &[0xD7, 0xFF]),
        Command::new(Wait::us(10), &[0x00, 0x93]),
        Command::new(Wait::us(10), &[0xD7, 0x00]),

        // CABC gain curve
        Command::new(Wait::us(10), &[0x00, 0x80]),
        Command::new(
            Wait::us(10),
            &[
                0xCA, 0x80, 0x88, 0x90, 0x98, 0xA0, 0xA8, 0xB0, 0xB8, 0xC0, 0xC7, 0xCF, 0xD7, 0xDF,
                0xE7, 0xEF, 0xF7, 0xCC, 0xFF, 0xA5, 0xFF, 0x80, 0xFF, 0x53, 0x53, 0x53,
            ],
        ),

        // CABC gamma groups 1 to 16
        Command::new(Wait::us(10), &[0x00, 0x00]),
        Command::new(Wait::us(10), &[0xC6, 0x10]),
        Command::new(Wait::us(10), &[0x00, 0x00]),
        Command::new(
            Wait::us(10),
            &[
                0xC7, 0xF0, 0x8E, 0xBC, 0x9D, 0xAC, 0x9C, 0xAC, 0x9B, 0xAB, 0x8C, 0x67, 0x55, 0x45,
                0x44, 0x44, 0x44, 0x44, 0x44,
            ],
        ),
        Command::new(Wait::us(10), &[0x00, 0x00]),
        Command::new(Wait::us(10), &[0xC6, 0x11]),
        Command::new(Wait::us(10), &[0x00, 0x00]),
        Command::new(
            Wait::us(10),
            &[
                0xC7, 0xF0, 0xAC, 0xAB, 0xBC, 0xBA, 0x9B, 0xAB, 0xBA, 0xB8, 0xAB, 0x78, 0x56, 0x55,
                0x44, 0x44, 0x44, 0x44, 0x44,
            ],
        ),
        Command::new(Wait::us(10), &[0x00, 0x00]),
        Command::new(Wait::us(10), &[0xC6, 0x12]),
        Command::new(Wait::us(10), &[0x00, 0x00]),
        Command::new(
            Wait::us(10),
            &[
                0xC7, 0xF0, 0xAB, 0xAA, 0xAB, 0xAB, 0xAB, 0xAA, 0xAA, 0xA9, 0x9B, 0x8A, 0x67, 0x55,
                0x45, 0x44, 0x44, 0x44, 0x44,
            ],
        ),
        Command::new(Wait::us(10), &[0x00, 0x00]),
        Command::new(Wait::us(10), &[0xC6, 0x13]),
        Command::new(Wait::us(10), &[0x00, 0x00]),
        Command::new(
            Wait::us(10),
            &[
                0xC7, 0xF0, 0xAA, 0xAA, 0xAB, 0x9B, 0x9B, 0xAA, 0xA9, 0xA9, 0xA9, 0x9A, 0x78, 0x56,
                0x55, 0x44, 0x44, 0x44, 0x44,
            ],
        ),
        Command::new(Wait::us(10), &[0x00, 0x00]),
        Command::new(Wait::us(10), &[0xC6, 0x14]),
        Command::new(Wait::us(10), &[0x00, 0x00]),
        Command::new(
            Wait::us(10),
            &[
                0xC7, 0xF0, 0xA9, 0xAA, 0xAB, 0x9A, 0xAA, 0xA9, 0xA9, 0x8A, 0xA9, 0x99, 0x8A, 0x67,
                0x55, 0x55, 0x44, 0x44, 0x33,
            ],
        ),
        Command::new(Wait::us(10), &[0x00, 0x00]),
        Command::new(Wait::us(10), &[0xC6, 0x15]),
        Command::new(Wait::us(10), &[0x00, 0x00]),
        Command::new(
            Wait::us(10),
            &[
                0xC7, 0xF0, 0xA8, 0xAA, 0xAA, 0x7B, 0xAB, 0x99, 0x9A, 0x99, 0x99, 0x8B, 0xA9, 0x55,
                0x55, 0x55, 0x55, 0x45, 0x44,
            ],
        ),
        Command::new(Wait::us(10), &[0x00, 0x00]),
        Command::new(Wait::us(10), &[0xC6, 0x16]),
        Command::new(Wait::us(10), &[0x00, 0x00]),
        Command::new(
            Wait::us(10),
            &[
                0xC7, 0xE0, 0x99, 0x7B, 0x8D, 0x7C, 0x7B, 0x8C, 0x89, 0x7B, 0x8A, 0x8A, 0x89, 0x68,
                0x55, 0x55, 0x55, 0x55, 0x55,
            ],
        ),
        Command::new(Wait::us(10), &[0x00, 0x00]),
        Command::new(Wait::us(10), &[0xC6, 0x17]),
        Command::new(Wait::us(10), &[0x00, 0x00]),
        Command::new(
            Wait::us(10),
            &[
                0xC7, 0xF0, 0x97, 0xAA, 0xAA, 0x89, 0xAA, 0xA8, 0x88, 0x9A, 0xA7, 0xA8, 0xA7, 0x66,
                0x66, 0x66, 0x56, 0x55, 0x55,
            ],
        ),
        Command::new(Wait::us(10), &[0x00, 0x00]),
        Command::new(Wait::us(10), &[0xC6, 0x18]),
        Command::new(Wait::us(10), &[0x00, 0x00]),
        Command::new(
            Wait::us(10),
            &[
                0xC7, 0xF0, 0x87, 0x9A, 0x9B, 0x8A, 0xA9, 0xA8, 0x88, 0xA9, 0x87, 0x9A, 0x88, 0x89,
                0x67, 0x56, 0x55, 0x55, 0x55,
            ],
        ),
        Command::new(Wait::us(10), &[0x00, 0x00]),
        Command::new(Wait::us(10), &[0xC6, 0x19]),
        Command::new(Wait::us(10), &[0x00, 0x00]),
        Command::new(
            Wait::us(10),
            &[
                0xC7, 0xE0, 0x97, 0x8A, 0x9B, 0x8A, 0x99, 0x99, 0x98, 0xA8, 0x87, 0x8A, 0x79, 0x8A,
                0x67, 0x66, 0x56, 0x55, 0x55,
            ],
        ),
        Command::new(Wait::us(10), &[0x00, 0x00]),
        Command::new(Wait::us(10), &[0xC6, 0x1A]),
        Command::new(Wait::us(10), &[0x00, 0x00]),
        Command::new(
            Wait::us(10),
            &[
                0xC7, 0xE0, 0xA6, 0x89, 0xAA, 0xA9, 0x98, 0x8A, 0x88, 0x89, 0x79, 0x7A, 0x7A, 0x98,
                0x78, 0x66, 0x66, 0x56, 0x45,
            ],
        ),
        Command::new(Wait::us(10), &[0x00, 0x00]),
        Command::new(Wait::us(10), &[0xC6, 0x1B]),
        Command::new(Wait::us(10), &[0x00, 0x00]),
        Command::new(
            Wait::us(10),
            &[
                0xC7, 0xB0, 0x99, 0x99, 0x99, 0x9A, 0x98, 0x88, 0x88, 0x89, 0x88, 0x98, 0x79, 0x88,
                0x8A, 0x67, 0x66, 0x66, 0x55,
            ],
        ),
        Command::new(Wait::us(10), &[0x00, 0x00]),
        Command::new(Wait::us(10), &[0xC6, 0x1C]),
        Command::new(Wait::us(10), &[0x00, 0x00]),
        Command::new(
            Wait::us(10),
            &[
                0xC7, 0xE0, 0x96, 0x89, 0x9A, 0x89, 0xB7, 0x88, 0x88, 0x88, 0x88, 0x88, 0x89, 0x87,
                0xA8, 0x98, 0x58, 0x55, 0x55,
            ],
        ),
        Command::new(Wait::us(10), &[0x00, 0x00]),
        Command::new(Wait::us(10), &[0xC6, 0x1D]),
        Command::new(Wait::us(10), &[0x00, 0x00]),
        Command::new(
            Wait::us(10),
            &[
                0xC7, 0xC0, 0x88, 0x89, 0x99, 0x8A, 0xA7, 0x89, 0x88, 0x88, 0x97, 0x97, 0x97, 0x78,
                0x98, 0x79, 0xA8, 0x48, 0x34,
            ],
        ),
        Command::new(Wait::us(10), &[0x00, 0x00]),
        Command::new(Wait::us(10), &[0xC6, 0x1E]),
        Command::new(Wait::us(10), &[0x00, 0x00]),
        Command::new(
            Wait::us(10),
            &[
                0xC7, 0xC0, 0x88, 0x89, 0x99, 0x8A, 0xA7, 0x89, 0x88, 0x88, 0x97, 0x97, 0x97, 0x78,
                0x98, 0x79, 0xA8, 0x48, 0x34,
            ],
        ),
        Command::new(Wait::us(10), &[0x00, 0x00]),
        Command::new(Wait::us(10), &[0xC6, 0x1F]),
        Command::new(Wait::us(10), &[0x00, 0x00]),
        Command::new(
            Wait::us(10),
            &[
                0xC7, 0xC0, 0x88, 0x89, 0x99, 0x8A, 0xA7, 0x89, 0x88, 0x88, 0x97, 0x97, 0x97, 0x78,
                0x98, 0x79, 0xA8, 0x48, 0x34,
            ],
        ),

        // CABC UI, still and moving gains
        Command::new(Wait::us(10), &[0x00, 0x90]),
        Command::new(Wait::us(10), &[0xCA, 0xE6, 0xFF]),
        Command::new(Wait::us(10), &[0x00, 0x92]),
        Command::new(Wait::us(10), &[0xCA, 0xA5, 0xFF]),
        Command::new(Wait::us(10), &[0x00, 0x94]),
        Command::new(Wait::us(10), &[0xCA, 0x80, 0xFF]),

        // CABC curve off, backlight control on
        Command::new(Wait::us(10), &[0x00, 0x00]),
        Command::new(Wait::us(10), &[0xC6, 0x00]),
        Command::new(Wait::us(10), &[0x00, 0x00]),
        Command::new(Wait::us(10), &[0x59, 0x00]),
        Command::new(Wait::us(10), &[0x53, 0x2C]),

        // power and pixel-eyes settings
        Command::new(Wait::ms(1), &[0x00, 0x83]),
        Command::new(Wait::us(10), &[0xF3, 0xCA]),
        Command::new(Wait::us(10), &[0x00, 0x90]),
        Command::new(Wait::us(10), &[0xC4, 0x00]),
        Command::new(Wait::us(10), &[0x00, 0xB4]),
        Command::new(Wait::us(10), &[0xC0, 0xC0]),
        Command::new(Wait::us(10), &[0x00, 0x87]),
        Command::new(Wait::us(10), &[0xA4, 0x15]),
        Command::new(Wait::us(10), &[0x00, 0x00]),
    ],
);

/// Sleep out and display on, followed by register fixups
pub static DISPLAY_ON: CommandTable = CommandTable::new(
    "otm1902b display-on",
    &[
        // tear on, backlight control, tear scanline 0x780
        Command::new(Wait::us(10), &[0x35, 0x00]),
        Command::new(Wait::us(200), &[0x53, 0x24]),
        Command::new(Wait::us(200), &[0x44, 0x07, 0x80]),

        // clever edge
        Command::new(Wait::us(10), &[0x00, 0x81]),
        Command::new(Wait::us(10), &[0xC0, 0x73]),
        Command::new(Wait::ms(10), &[0x11]),
        Command::new(Wait::ms(100), &[0x29]),

        // B5 disturb workaround
        Command::new(Wait::us(200), &[0x00, 0x82]),
        Command::new(Wait::us(200), &[0xC4, 0x00]),
        Command::new(Wait::us(200), &[0x00, 0x83]),
        Command::new(Wait::us(200), &[0xC4, 0x02]),
        Command::new(Wait::us(200), &[0x00, 0x80]),
        Command::new(Wait::us(200), &[0xA5, 0x0C]),
        Command::new(Wait::us(200), &[0x00, 0x81]),
        Command::new(Wait::us(200), &[0xA5, 0x04]),
        Command::new(Wait::us(200), &[0x00, 0x83]),
        Command::new(Wait::us(200), &[0xA4, 0x20]),
        Command::new(Wait::us(200), &[0x00, 0x89]),
        Command::new(Wait::us(200), &[0xA4, 0x00]),
        Command::new(Wait::us(200), &[0x00, 0xE2]),
        Command::new(Wait::us(200), &[0xF5, 0x02]),
    ],
);

/// CABC tuned for UI content
pub static CABC_UI: CommandTable = CommandTable::new(
    "otm1902b cabc ui",
    &[Command::new(Wait::us(10), &[0x55, 0x91])],
);

/// CABC tuned for moving pictures
pub static CABC_MOVING: CommandTable = CommandTable::new(
    "otm1902b cabc moving",
    &[Command::new(Wait::us(10), &[0x55, 0x93])],
);

/// Display off and sleep in
pub static DISPLAY_OFF: CommandTable = CommandTable::new(
    "otm1902b display-off",
    &[
        Command::new(Wait::ms(60), &[0x28]),
        Command::new(Wait::ms(120), &[0x10]),
    ],
);

static POWER_ON_PULSE: [GpioStep; 5] = [
    GpioStep::touch(PinState::High, Wait::ms(5)),
    GpioStep::touch(PinState::Low, Wait::ms(5)),
    GpioStep::panel(PinState::Low, Wait::ms(20)),
    GpioStep::panel(PinState::High, Wait::ms(1)),
    GpioStep::panel(PinState::Low, Wait::ms(20)),
];

static POWER_OFF_PULSE: [GpioStep; 2] = [
    GpioStep::panel(PinState::High, Wait::NONE),
    GpioStep::touch(PinState::High, Wait::NONE),
];

static ENABLE: [Step; 4] = [
    Step::Table(&CLEVER_EDGE_1080P),
    Step::Table(&POWER_ON),
    Step::Table(&DISPLAY_ON),
    Step::Table(&CABC_UI),
];

static DISABLE: [Step; 2] = [
    Step::Table(&DISPLAY_OFF),
    Step::Dcs(DcsOp::SetDisplayOff),
];

static HIGH_CLOCK: [DisplayTiming; 1] = [DisplayTiming::new(1080, 1920)
    .pixel_clock_hz(148_500_000)
    .hporch(70, 1, 50)
    .vporch(35, 1, 25)
    .refresh_hz(60)];

/// Profile of the JDI OTM1902B
pub static PROFILE: PanelProfile = PanelProfile {
    name: "otm1902b",
    compatible: "jdi,otm1902b",
    fixed_lanes: Some(4),
    reset_required: false,
    reset_initial: PinState::Low,
    touch_reset_initial: PinState::Low,
    power_on: &POWER_ON_PULSE,
    power_off: &POWER_OFF_PULSE,
    enable: &ENABLE,
    disable: &DISABLE,
    fail_safe_reset: None,
    modes: ModeList::new(
        DisplayTiming::new(1080, 1920)
            .pixel_clock_hz(62_000_000)
            .hporch(10, 20, 30)
            .vporch(10, 10, 20)
            .refresh_hz(60),
        &HIGH_CLOCK,
    ),
    bus_formats: &[BusFormat::Rgb888],
    width_mm: 64,
    height_mm: 116,
};
