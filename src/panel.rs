//! Panel lifecycle
//!
//! [`Panel`] owns the transport and reset lines of one panel instance and
//! walks it through `Unprepared → Prepared → Enabled` and back, running the
//! steps its [`PanelProfile`] prescribes at each transition.
//!
//! Transitions are idempotent. Vendor table write failures are logged and
//! never abort a transition; a failed standard DCS call does.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin, PinState};
use log::{debug, error, warn};

use crate::config::{Config, DsiSettings};
use crate::dcs::Dcs;
use crate::error::Error;
use crate::interface::DsiInterface;
use crate::mode::{BusFlags, ModeInfo};
use crate::profile::{DcsOp, GpioStep, PanelProfile, PixelFormatSource, ResetLine, Step};
use crate::sequence::{self, CommandTable, SequenceReport};

type PanelResult<E> = core::result::Result<(), Error<E>>;

/// Power state of a panel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PowerState {
    /// Reset asserted or unpowered
    #[default]
    Unprepared,
    /// Out of reset, display off
    Prepared,
    /// Display on
    Enabled,
}

/// Placeholder for a reset line that is not wired
///
/// ```
/// use dsi_panel::NoPin;
///
/// let _touch_reset: Option<NoPin> = None;
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPin;

impl ErrorType for NoPin {
    type Error = Infallible;
}

impl OutputPin for NoPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// A panel instance
///
/// ## Type Parameters
///
/// * `I` - Transport implementing [`DsiInterface`]
/// * `RST` - Panel reset line
/// * `TP` - Touch controller reset line
///
/// ## Example
///
/// ```rust,no_run
/// use dsi_panel::{Builder, DsiInterface, NoPin, Panel, panels};
/// use embedded_hal::delay::DelayNs;
/// # use core::convert::Infallible;
/// # struct MockDsi;
/// # impl DsiInterface for MockDsi {
/// #     type Error = Infallible;
/// #     fn write_buffer(&mut self, _payload: &[u8]) -> Result<(), Self::Error> { Ok(()) }
/// #     fn generic_write(&mut self, _payload: &[u8]) -> Result<(), Self::Error> { Ok(()) }
/// #     fn dcs_read(&mut self, _cmd: u8, buf: &mut [u8]) -> Result<usize, Self::Error> {
/// #         Ok(buf.len())
/// #     }
/// # }
/// # struct MockDelay;
/// # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
/// # let mut delay = MockDelay;
/// let config = match Builder::new().lanes(4).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// let mut panel = match Panel::new(
///     MockDsi,
///     Some(NoPin),
///     None::<NoPin>,
///     &panels::tpm0501010p::PROFILE,
///     config,
/// ) {
///     Ok(panel) => panel,
///     Err(_) => return,
/// };
///
/// panel.prepare(&mut delay);
/// let _ = panel.enable(&mut delay);
/// let mode = panel.mode();
/// assert_eq!(mode.timing.hactive, 1080);
/// ```
pub struct Panel<I, RST, TP> {
    interface: I,
    reset: Option<RST>,
    touch_reset: Option<TP>,
    profile: &'static PanelProfile,
    config: Config,
    settings: DsiSettings,
    state: PowerState,
    brightness: u16,
}

impl<I, RST, TP> Panel<I, RST, TP>
where
    I: DsiInterface,
    RST: OutputPin,
    TP: OutputPin,
{
    /// Probe a panel: apply initial reset levels and attach to the host
    ///
    /// The lane count comes from the profile if it fixes one, else from
    /// `config`.
    ///
    /// # Errors
    ///
    /// * [`Error::MissingLanes`] if neither supplies a lane count
    /// * [`Error::MissingResetLine`] if the profile requires a reset line and `reset` is `None`
    /// * [`Error::Attach`] if the host refuses the link settings
    pub fn new(
        mut interface: I,
        mut reset: Option<RST>,
        mut touch_reset: Option<TP>,
        profile: &'static PanelProfile,
        config: Config,
    ) -> Result<Self, Error<I::Error>> {
        let name = profile.name;
        let Some(lanes) = profile.fixed_lanes.or(config.lanes) else {
            error!("{}: no DSI lane count configured", name);
            return Err(Error::MissingLanes);
        };

        match reset.as_mut() {
            Some(pin) => {
                if let Err(e) = pin.set_state(profile.reset_initial) {
                    warn!("{}: failed to set reset line: {:?}", name, e);
                }
            }
            None if profile.reset_required => {
                error!("{}: reset line required", name);
                return Err(Error::MissingResetLine);
            }
            None => warn!("{}: no reset line", name),
        }
        match touch_reset.as_mut() {
            Some(pin) => {
                if let Err(e) = pin.set_state(profile.touch_reset_initial) {
                    warn!("{}: failed to set touch reset line: {:?}", name, e);
                }
            }
            None => warn!("{}: no touch reset line", name),
        }

        let settings = config.dsi_settings(lanes);
        interface.attach(&settings).map_err(|e| {
            error!("{}: DSI attach failed: {:?}", name, e);
            Error::Attach(e)
        })?;
        debug!(
            "{}: attached, {} lanes, {:?}, {:?}",
            name, settings.lanes, settings.format, settings.mode_flags
        );

        Ok(Self {
            interface,
            reset,
            touch_reset,
            profile,
            brightness: config.brightness,
            config,
            settings,
            state: PowerState::Unprepared,
        })
    }

    /// Take the panel out of reset
    ///
    /// Runs the profile's reset pulse pattern. Absent lines are skipped and
    /// line errors are logged; neither stops the transition. No-op unless
    /// unprepared.
    pub fn prepare<D: DelayNs>(&mut self, delay: &mut D) {
        if self.state != PowerState::Unprepared {
            return;
        }
        debug!("{}: prepare", self.profile.name);
        self.run_gpio(self.profile.power_on, delay);
        self.state = PowerState::Prepared;
    }

    /// Turn the display on
    ///
    /// Switches the link to low-power mode and runs the profile's enable
    /// steps. No-op if already enabled. If a DCS call fails, the remaining
    /// steps are skipped, the reset line is driven to the profile's
    /// fail-safe level and the panel stays prepared.
    ///
    /// # Errors
    ///
    /// * [`Error::NotPrepared`] before [`Panel::prepare`]; nothing is sent
    /// * [`Error::Dcs`] if a standard DCS call fails
    pub fn enable<D: DelayNs>(&mut self, delay: &mut D) -> PanelResult<I::Error> {
        match self.state {
            PowerState::Enabled => return Ok(()),
            PowerState::Unprepared => {
                error!("{}: panel not prepared", self.profile.name);
                return Err(Error::NotPrepared);
            }
            PowerState::Prepared => {}
        }

        debug!("{}: enable", self.profile.name);
        self.interface.set_low_power_mode(true);
        if let Err(e) = self.run_steps(self.profile.enable, delay) {
            error!("{}: enable failed: {}", self.profile.name, e);
            if let Some(level) = self.profile.fail_safe_reset {
                self.drive(ResetLine::Panel, level);
            }
            return Err(e);
        }

        self.state = PowerState::Enabled;
        Ok(())
    }

    /// Turn the display off
    ///
    /// No-op unless enabled.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Dcs`] for the first failed DCS call; the panel stays enabled.
    pub fn disable<D: DelayNs>(&mut self, delay: &mut D) -> PanelResult<I::Error> {
        if self.state != PowerState::Enabled {
            return Ok(());
        }

        debug!("{}: disable", self.profile.name);
        self.interface.set_low_power_mode(true);
        self.run_steps(self.profile.disable, delay)?;
        self.state = PowerState::Prepared;
        Ok(())
    }

    /// Put the panel back into reset
    ///
    /// Sends enter-sleep-mode, then runs the profile's power-off levels. A
    /// failed sleep command is logged only. No-op when unprepared.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StillEnabled`] while enabled, without touching any line.
    pub fn unprepare<D: DelayNs>(&mut self, delay: &mut D) -> PanelResult<I::Error> {
        match self.state {
            PowerState::Unprepared => return Ok(()),
            PowerState::Enabled => {
                error!("{}: panel still enabled", self.profile.name);
                return Err(Error::StillEnabled);
            }
            PowerState::Prepared => {}
        }

        debug!("{}: unprepare", self.profile.name);
        if let Err(e) = self.interface.enter_sleep_mode() {
            warn!("{}: failed to enter sleep mode: {:?}", self.profile.name, e);
        }
        self.run_gpio(self.profile.power_off, delay);
        self.state = PowerState::Unprepared;
        Ok(())
    }

    /// Disable, then unprepare
    ///
    /// # Errors
    ///
    /// Returns the first error; each is also logged.
    pub fn shutdown<D: DelayNs>(&mut self, delay: &mut D) -> PanelResult<I::Error> {
        let disabled = self.disable(delay);
        if let Err(e) = &disabled {
            error!("{}: failed to disable panel: {}", self.profile.name, e);
        }
        let unprepared = self.unprepare(delay);
        if let Err(e) = &unprepared {
            error!("{}: failed to unprepare panel: {}", self.profile.name, e);
        }
        disabled.and(unprepared)
    }

    /// Send an extra vendor table, e.g. another CABC mode
    pub fn send_table<D: DelayNs>(
        &mut self,
        table: &CommandTable,
        delay: &mut D,
    ) -> SequenceReport<I::Error> {
        sequence::transmit(&mut self.interface, table, delay)
    }

    /// Read the display brightness
    ///
    /// Returns 0 without bus traffic while unprepared.
    ///
    /// # Errors
    ///
    /// * [`Error::BacklightDisabled`] if the backlight is not DCS controlled
    /// * [`Error::Brightness`] if the read fails
    pub fn brightness(&mut self) -> Result<u16, Error<I::Error>> {
        if !self.config.backlight {
            return Err(Error::BacklightDisabled);
        }
        if !self.is_prepared() {
            return Ok(0);
        }
        self.interface.set_low_power_mode(false);
        let value = self
            .interface
            .get_display_brightness()
            .map_err(Error::Brightness)?;
        Ok(value & 0xff)
    }

    /// Set the display brightness
    ///
    /// The value is kept and restored on the next enable. While unprepared
    /// nothing is sent.
    ///
    /// # Errors
    ///
    /// * [`Error::BacklightDisabled`] if the backlight is not DCS controlled
    /// * [`Error::Brightness`] if the write fails
    pub fn set_brightness(&mut self, brightness: u16) -> PanelResult<I::Error> {
        if !self.config.backlight {
            return Err(Error::BacklightDisabled);
        }
        self.brightness = brightness;
        if !self.is_prepared() {
            return Ok(());
        }
        self.interface.set_low_power_mode(false);
        self.interface
            .set_display_brightness(brightness)
            .map_err(Error::Brightness)
    }

    /// The mode to report to the display framework
    ///
    /// A configured timing override wins over the profile's list; otherwise
    /// the configured timing mode selects from it, falling back to the first.
    pub fn mode(&self) -> ModeInfo {
        let profile = self.profile;
        let mut timing = match self.config.timing_override {
            Some(timing) => timing,
            None => *profile.modes.select(self.config.timing_mode),
        };
        if let Some(hz) = self.config.refresh_hz {
            timing.refresh_hz = hz;
        }
        ModeInfo {
            timing,
            width_mm: self.config.width_mm.unwrap_or(profile.width_mm),
            height_mm: self.config.height_mm.unwrap_or(profile.height_mm),
            bus_formats: profile.bus_formats,
            bus_flags: BusFlags::from_display_flags(timing.flags),
            preferred: true,
        }
    }

    /// Current power state
    pub fn state(&self) -> PowerState {
        self.state
    }

    /// Whether the panel is out of reset
    pub fn is_prepared(&self) -> bool {
        self.state != PowerState::Unprepared
    }

    /// Whether the display is on
    pub fn is_enabled(&self) -> bool {
        self.state == PowerState::Enabled
    }

    /// Link settings used at attach
    pub fn dsi_settings(&self) -> &DsiSettings {
        &self.settings
    }

    /// Configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Panel profile
    pub fn profile(&self) -> &'static PanelProfile {
        self.profile
    }

    /// Transport, for commands outside the lifecycle
    pub fn interface_mut(&mut self) -> &mut I {
        &mut self.interface
    }

    /// Detach from the host and give back the transport and lines
    ///
    /// A failed detach is logged only.
    pub fn release(mut self) -> (I, Option<RST>, Option<TP>) {
        if let Err(e) = self.interface.detach() {
            error!("{}: failed to detach from DSI host: {:?}", self.profile.name, e);
        }
        (self.interface, self.reset, self.touch_reset)
    }

    fn run_steps<D: DelayNs>(&mut self, steps: &[Step], delay: &mut D) -> PanelResult<I::Error> {
        for step in steps {
            match *step {
                Step::Table(table) => {
                    let report = sequence::transmit(&mut self.interface, table, delay);
                    if !report.is_clean() {
                        warn!(
                            "{}: {} of {} writes failed in {}",
                            self.profile.name, report.failed, report.processed, report.table
                        );
                    }
                }
                Step::Dcs(op) => self.dcs(op)?,
                Step::Sleep(wait) => wait.apply(delay),
                Step::RestoreBrightness => {
                    if self.config.backlight {
                        self.dcs(DcsOp::SetDisplayBrightness(self.brightness))?;
                    }
                }
                Step::ReadDiagnostics => self.read_diagnostics(),
            }
        }
        Ok(())
    }

    fn dcs(&mut self, op: DcsOp) -> PanelResult<I::Error> {
        let interface = &mut self.interface;
        let result = match op {
            DcsOp::SoftReset => interface.soft_reset(),
            DcsOp::ExitSleepMode => interface.exit_sleep_mode(),
            DcsOp::EnterSleepMode => interface.enter_sleep_mode(),
            DcsOp::SetDisplayOn => interface.set_display_on(),
            DcsOp::SetDisplayOff => interface.set_display_off(),
            DcsOp::SetTearOn(mode) => interface.set_tear_on(mode),
            DcsOp::SetTearScanline(scanline) => interface.set_tear_scanline(scanline),
            DcsOp::SetPixelFormat(PixelFormatSource::Fixed(code)) => {
                interface.set_pixel_format(code)
            }
            DcsOp::SetPixelFormat(PixelFormatSource::Link) => {
                let code = self.settings.format.dcs_code();
                debug!("{}: interface color format {:#04x}", self.profile.name, code);
                interface.set_pixel_format(code)
            }
            DcsOp::SetDisplayBrightness(brightness) => interface.set_display_brightness(brightness),
            DcsOp::GenericWrite(payload) => interface.generic_write(payload),
        };
        result.map_err(|source| {
            error!("{}: {:?} failed: {:?}", self.profile.name, op, source);
            Error::Dcs { op, source }
        })
    }

    fn read_diagnostics(&mut self) {
        let name = self.profile.name;
        match self.interface.get_display_brightness() {
            Ok(value) => debug!("{}: brightness {}", name, value),
            Err(e) => warn!("{}: brightness read failed: {:?}", name, e),
        }
        match self.interface.get_power_mode() {
            Ok(value) => debug!("{}: power mode {:#04x}", name, value),
            Err(e) => warn!("{}: power mode read failed: {:?}", name, e),
        }
        match self.interface.get_pixel_format() {
            Ok(value) => debug!("{}: pixel format {:#04x}", name, value),
            Err(e) => warn!("{}: pixel format read failed: {:?}", name, e),
        }
    }

    fn run_gpio<D: DelayNs>(&mut self, steps: &[GpioStep], delay: &mut D) {
        for step in steps {
            if self.drive(step.line, step.state) {
                step.hold.apply(delay);
            }
        }
    }

    /// Drive a line; false if it is not wired
    fn drive(&mut self, line: ResetLine, state: PinState) -> bool {
        let name = self.profile.name;
        match line {
            ResetLine::Panel => match self.reset.as_mut() {
                Some(pin) => {
                    if let Err(e) = pin.set_state(state) {
                        warn!("{}: failed to set reset line: {:?}", name, e);
                    }
                    true
                }
                None => false,
            },
            ResetLine::Touch => match self.touch_reset.as_mut() {
                Some(pin) => {
                    if let Err(e) = pin.set_state(state) {
                        warn!("{}: failed to set touch reset line: {:?}", name, e);
                    }
                    true
                }
                None => false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command;
    use crate::config::{Builder, PixelFormat};
    use crate::mock::{MockDelay, MockDsi, MockError, MockPin, PinLog, count_warnings, pin_log};
    use crate::mode::DisplayTiming;
    use crate::panels::{nt35596, otm1902b, tpm0501010p};
    use alloc::vec::Vec;

    type TestPanel = Panel<MockDsi, MockPin, MockPin>;

    fn config() -> Config {
        Builder::new().lanes(4).build().unwrap()
    }

    fn test_panel(
        profile: &'static PanelProfile,
        dsi: MockDsi,
        config: Config,
    ) -> (TestPanel, PinLog) {
        let log = pin_log();
        let panel = Panel::new(
            dsi,
            Some(MockPin::new("reset", &log)),
            Some(MockPin::new("tpreset", &log)),
            profile,
            config,
        )
        .unwrap();
        log.borrow_mut().clear();
        (panel, log)
    }

    fn enabled_panel(profile: &'static PanelProfile, config: Config) -> (TestPanel, PinLog) {
        let (mut panel, log) = test_panel(profile, MockDsi::new(), config);
        let mut delay = MockDelay::new();
        panel.prepare(&mut delay);
        panel.enable(&mut delay).unwrap();
        (panel, log)
    }

    #[test]
    fn test_probe_applies_initial_levels_and_attaches() {
        let log = pin_log();
        let panel = Panel::new(
            MockDsi::new(),
            Some(MockPin::new("reset", &log)),
            Some(MockPin::new("tpreset", &log)),
            &tpm0501010p::PROFILE,
            config(),
        )
        .unwrap();

        assert_eq!(*log.borrow(), [("reset", true), ("tpreset", true)]);
        assert_eq!(panel.state(), PowerState::Unprepared);
        let (dsi, _, _) = panel.release();
        assert_eq!(dsi.attached.map(|s| s.lanes), Some(4));
        assert!(dsi.detached);
    }

    #[test]
    fn test_probe_requires_lanes() {
        let result = Panel::new(
            MockDsi::new(),
            Some(NoPin),
            Some(NoPin),
            &nt35596::PROFILE,
            Config::default(),
        );
        assert!(matches!(result, Err(Error::MissingLanes)));
    }

    #[test]
    fn test_probe_uses_fixed_lanes() {
        let panel = Panel::new(
            MockDsi::new(),
            None::<NoPin>,
            None::<NoPin>,
            &otm1902b::PROFILE,
            Config::default(),
        )
        .unwrap();
        assert_eq!(panel.dsi_settings().lanes, 4);
    }

    #[test]
    fn test_probe_requires_reset_line() {
        let result = Panel::new(
            MockDsi::new(),
            None::<NoPin>,
            Some(NoPin),
            &nt35596::PROFILE,
            config(),
        );
        assert!(matches!(result, Err(Error::MissingResetLine)));

        // optional on the JDI panels
        let result = Panel::new(
            MockDsi::new(),
            None::<NoPin>,
            Some(NoPin),
            &tpm0501010p::PROFILE,
            config(),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_probe_attach_failure() {
        let dsi = MockDsi {
            fail_attach: true,
            ..MockDsi::default()
        };
        let result = Panel::new(dsi, Some(NoPin), Some(NoPin), &nt35596::PROFILE, config());
        assert!(matches!(result, Err(Error::Attach(MockError))));
    }

    #[test]
    fn test_prepare_pulses_reset_lines() {
        let (mut panel, log) = test_panel(&nt35596::PROFILE, MockDsi::new(), config());
        let mut delay = MockDelay::new();

        panel.prepare(&mut delay);

        assert_eq!(
            *log.borrow(),
            [
                ("reset", true),
                ("reset", false),
                ("reset", true),
                ("tpreset", false),
                ("tpreset", true),
            ]
        );
        assert_eq!(delay.total_ns(), 140_000_000);
        assert!(panel.is_prepared());
        assert!(!panel.is_enabled());
    }

    #[test]
    fn test_prepare_is_idempotent() {
        let (mut panel, log) = test_panel(&otm1902b::PROFILE, MockDsi::new(), config());
        let mut delay = MockDelay::new();

        panel.prepare(&mut delay);
        let writes = log.borrow().len();
        panel.prepare(&mut delay);

        assert_eq!(log.borrow().len(), writes);
    }

    #[test]
    fn test_prepare_without_touch_reset() {
        let log = pin_log();
        let mut panel = Panel::new(
            MockDsi::new(),
            Some(MockPin::new("reset", &log)),
            None::<MockPin>,
            &tpm0501010p::PROFILE,
            config(),
        )
        .unwrap();
        log.borrow_mut().clear();
        let mut delay = MockDelay::new();

        panel.prepare(&mut delay);

        assert_eq!(
            *log.borrow(),
            [("reset", true), ("reset", false), ("reset", true)]
        );
        // touch reset holds are skipped with the line
        assert_eq!(delay.total_ns(), 100_000_000);
        assert_eq!(panel.state(), PowerState::Prepared);
    }

    #[test]
    fn test_prepare_tolerates_pin_errors() {
        let log = pin_log();
        let mut panel = Panel::new(
            MockDsi::new(),
            Some(MockPin::failing("reset", &log)),
            Some(MockPin::new("tpreset", &log)),
            &otm1902b::PROFILE,
            config(),
        )
        .unwrap();
        let mut delay = MockDelay::new();

        panel.prepare(&mut delay);

        assert!(panel.is_prepared());
    }

    #[test]
    fn test_enable_requires_prepare() {
        let (mut panel, log) = test_panel(&nt35596::PROFILE, MockDsi::new(), config());
        let mut delay = MockDelay::new();

        assert!(matches!(panel.enable(&mut delay), Err(Error::NotPrepared)));

        let (dsi, _, _) = panel.release();
        assert!(dsi.writes.is_empty());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_enable_sends_dcs_sequence() {
        let (panel, _log) = enabled_panel(&nt35596::PROFILE, config());
        assert!(panel.is_enabled());

        let (dsi, _, _) = panel.release();
        assert_eq!(dsi.low_power, [true]);
        assert_eq!(
            dsi.commands(),
            [
                0xD3,
                0xD4,
                0x35,
                command::SOFT_RESET,
                command::SET_TEAR_ON,
                command::SET_TEAR_SCANLINE,
                command::SET_PIXEL_FORMAT,
                command::EXIT_SLEEP_MODE,
                command::SET_DISPLAY_ON,
            ]
        );
        assert_eq!(dsi.writes[4], [0x35, 0x01]);
        assert_eq!(dsi.writes[5], [0x44, 0x00, 0x00]);
        assert_eq!(
            dsi.reads,
            [
                command::GET_DISPLAY_BRIGHTNESS,
                command::GET_POWER_MODE,
                command::GET_PIXEL_FORMAT
            ]
        );
    }

    #[test]
    fn test_enable_tpm_pixel_formats_and_generic_write() {
        let config = Builder::new()
            .lanes(4)
            .pixel_format(PixelFormat::Rgb565)
            .backlight(true)
            .brightness(128)
            .build()
            .unwrap();
        let (panel, _log) = enabled_panel(&tpm0501010p::PROFILE, config);

        let (dsi, _, _) = panel.release();
        assert_eq!(dsi.writes[0].len(), 32);
        assert_eq!(dsi.writes[1], [0x3A, 0x77]);
        assert_eq!(dsi.writes[3], [0xC2, 0x0B]);
        assert_eq!(dsi.generic, [3]);
        assert_eq!(dsi.writes[4], [0x35, 0x00]);
        assert_eq!(dsi.writes[5], [0x44, 0x03, 0x80]);
        assert_eq!(dsi.writes[6], [0x3A, 0x55]);
        assert_eq!(dsi.writes[7], [0x51, 128, 0]);
        assert_eq!(dsi.brightness, 128);
    }

    #[test]
    fn test_enable_otm_sends_only_tables() {
        let (panel, _log) = enabled_panel(&otm1902b::PROFILE, Config::default());

        let expected: usize = otm1902b::PROFILE.enable_tables().map(CommandTable::len).sum();
        let (dsi, _, _) = panel.release();
        assert_eq!(dsi.writes.len(), expected);
        assert_eq!(dsi.writes.last().map(Vec::as_slice), Some(&[0x55, 0x91][..]));
    }

    #[test]
    fn test_enable_is_idempotent() {
        let (mut panel, _log) = enabled_panel(&nt35596::PROFILE, config());
        let before = panel.interface_mut().writes.len();
        let mut delay = MockDelay::new();

        assert!(panel.enable(&mut delay).is_ok());

        assert_eq!(panel.interface_mut().writes.len(), before);
        assert!(delay.calls.is_empty());
    }

    #[test]
    fn test_table_failures_do_not_abort_enable() {
        // first OTM table write and a write deep in the power-on table
        let dsi = MockDsi::failing_at(&[0, 40]);
        let (mut panel, _log) = test_panel(&otm1902b::PROFILE, dsi, Config::default());
        let mut delay = MockDelay::new();
        panel.prepare(&mut delay);

        assert!(panel.enable(&mut delay).is_ok());
        assert!(panel.is_enabled());
    }

    #[test]
    fn test_dcs_failure_aborts_enable_and_resets() {
        let dsi = MockDsi::failing_command(command::EXIT_SLEEP_MODE);
        let (mut panel, log) = test_panel(&nt35596::PROFILE, dsi, config());
        let mut delay = MockDelay::new();
        panel.prepare(&mut delay);
        log.borrow_mut().clear();

        let result = panel.enable(&mut delay);

        assert!(matches!(
            result,
            Err(Error::Dcs {
                op: DcsOp::ExitSleepMode,
                source: MockError
            })
        ));
        assert_eq!(panel.state(), PowerState::Prepared);
        assert_eq!(*log.borrow(), [("reset", true)]);
        let (dsi, _, _) = panel.release();
        assert!(!dsi.commands().contains(&command::SET_DISPLAY_ON));
        assert!(dsi.reads.is_empty());
    }

    #[test]
    fn test_disable_sequence() {
        let (mut panel, _log) = enabled_panel(&tpm0501010p::PROFILE, config());
        let start = panel.interface_mut().writes.len();
        let mut delay = MockDelay::new();

        assert!(panel.disable(&mut delay).is_ok());

        assert_eq!(panel.state(), PowerState::Prepared);
        let dsi = panel.interface_mut();
        assert_eq!(dsi.commands()[start..], [command::SET_DISPLAY_OFF, command::ENTER_SLEEP_MODE]);
        assert_eq!(delay.total_ns(), 15_000_000);

        // already disabled
        assert!(panel.disable(&mut delay).is_ok());
        assert_eq!(panel.interface_mut().writes.len(), start + 2);
    }

    #[test]
    fn test_disable_failure_keeps_enabled() {
        let (mut panel, _log) = enabled_panel(&nt35596::PROFILE, config());
        panel.interface_mut().fail_commands.push(command::SET_DISPLAY_OFF);
        let mut delay = MockDelay::new();

        let result = panel.disable(&mut delay);

        assert!(matches!(
            result,
            Err(Error::Dcs {
                op: DcsOp::SetDisplayOff,
                ..
            })
        ));
        assert!(panel.is_enabled());
        assert!(!panel.interface_mut().commands().contains(&command::ENTER_SLEEP_MODE));
    }

    #[test]
    fn test_otm_disable_sends_off_table() {
        let (mut panel, _log) = enabled_panel(&otm1902b::PROFILE, Config::default());
        let start = panel.interface_mut().writes.len();
        let mut delay = MockDelay::new();

        assert!(panel.disable(&mut delay).is_ok());

        assert_eq!(panel.interface_mut().commands()[start..], [0x28, 0x10, 0x28]);
        assert_eq!(delay.total_ns(), 180_000_000);
    }

    #[test]
    fn test_unprepare_while_enabled() {
        let (mut panel, log) = enabled_panel(&nt35596::PROFILE, config());
        log.borrow_mut().clear();
        let mut delay = MockDelay::new();

        assert!(matches!(panel.unprepare(&mut delay), Err(Error::StillEnabled)));

        assert!(log.borrow().is_empty());
        assert!(panel.is_enabled());
    }

    #[test]
    fn test_unprepare_sleeps_and_resets() {
        let (mut panel, log) = test_panel(&otm1902b::PROFILE, MockDsi::new(), config());
        let mut delay = MockDelay::new();
        panel.prepare(&mut delay);
        log.borrow_mut().clear();

        assert!(panel.unprepare(&mut delay).is_ok());

        assert_eq!(*log.borrow(), [("reset", true), ("tpreset", true)]);
        assert_eq!(panel.interface_mut().commands(), [command::ENTER_SLEEP_MODE]);
        assert_eq!(panel.state(), PowerState::Unprepared);

        // already unprepared
        assert!(panel.unprepare(&mut delay).is_ok());
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn test_unprepare_ignores_sleep_failure() {
        let dsi = MockDsi::failing_command(command::ENTER_SLEEP_MODE);
        let (mut panel, log) = test_panel(&tpm0501010p::PROFILE, dsi, config());
        let mut delay = MockDelay::new();
        panel.prepare(&mut delay);
        log.borrow_mut().clear();

        assert!(panel.unprepare(&mut delay).is_ok());
        assert_eq!(*log.borrow(), [("reset", false), ("tpreset", false)]);
    }

    #[test]
    fn test_full_cycle() {
        let (mut panel, _log) = enabled_panel(&nt35596::PROFILE, config());
        let mut delay = MockDelay::new();

        assert!(panel.disable(&mut delay).is_ok());
        assert!(panel.unprepare(&mut delay).is_ok());
        panel.prepare(&mut delay);
        assert!(panel.enable(&mut delay).is_ok());

        assert_eq!(panel.state(), PowerState::Enabled);
        assert!(panel.is_prepared());
        assert!(panel.is_enabled());
    }

    #[test]
    fn test_shutdown() {
        let (mut panel, _log) = enabled_panel(&tpm0501010p::PROFILE, config());
        let mut delay = MockDelay::new();

        assert!(panel.shutdown(&mut delay).is_ok());
        assert_eq!(panel.state(), PowerState::Unprepared);

        let (mut panel, _log) = enabled_panel(&tpm0501010p::PROFILE, config());
        panel.interface_mut().fail_commands.push(command::SET_DISPLAY_OFF);
        assert!(matches!(panel.shutdown(&mut delay), Err(Error::Dcs { .. })));
        assert!(panel.is_enabled());
    }

    #[test]
    fn test_brightness_requires_backlight() {
        let (mut panel, _log) = enabled_panel(&nt35596::PROFILE, config());
        assert!(matches!(panel.brightness(), Err(Error::BacklightDisabled)));
        assert!(matches!(panel.set_brightness(10), Err(Error::BacklightDisabled)));
    }

    #[test]
    fn test_brightness_round_trip() {
        let config = Builder::new().lanes(4).backlight(true).build().unwrap();
        let (mut panel, _log) = test_panel(&nt35596::PROFILE, MockDsi::new(), config);
        let mut delay = MockDelay::new();

        // unprepared: cached only
        assert!(matches!(panel.brightness(), Ok(0)));
        assert!(panel.set_brightness(0x1C0).is_ok());
        assert!(panel.interface_mut().writes.is_empty());

        panel.prepare(&mut delay);
        panel.enable(&mut delay).unwrap();
        assert_eq!(panel.interface_mut().brightness, 0x1C0);
        // reads are truncated to 8 bits
        assert!(matches!(panel.brightness(), Ok(0xC0)));
        assert_eq!(panel.interface_mut().low_power.last(), Some(&false));

        assert!(panel.set_brightness(42).is_ok());
        assert_eq!(panel.interface_mut().brightness, 42);
    }

    #[test]
    fn test_send_extra_table() {
        let (mut panel, _log) = enabled_panel(&otm1902b::PROFILE, Config::default());
        let mut delay = MockDelay::new();

        let report = panel.send_table(&otm1902b::CABC_MOVING, &mut delay);

        assert!(report.is_clean());
        assert_eq!(panel.interface_mut().writes.last().map(Vec::as_slice), Some(&[0x55, 0x93][..]));
    }

    #[test]
    fn test_mode_selection() {
        let (panel, _log) = test_panel(&otm1902b::PROFILE, MockDsi::new(), config());
        let mode = panel.mode();
        assert_eq!(mode.timing.pixel_clock_hz, 62_000_000);
        assert_eq!((mode.width_mm, mode.height_mm), (64, 116));
        assert!(mode.preferred);

        let high = Builder::new().timing_mode(1).build().unwrap();
        let (panel, _log) = test_panel(&otm1902b::PROFILE, MockDsi::new(), high);
        assert_eq!(panel.mode().timing.pixel_clock_hz, 148_500_000);

        let invalid = Builder::new().timing_mode(99).build().unwrap();
        let (panel, _log) = test_panel(&otm1902b::PROFILE, MockDsi::new(), invalid);
        let (fallback, warnings) = count_warnings(|| panel.mode());
        assert_eq!(fallback.timing, mode.timing);
        assert_eq!(warnings, 1);

        let (panel, _log) = test_panel(&otm1902b::PROFILE, MockDsi::new(), config());
        let (_, warnings) = count_warnings(|| panel.mode());
        assert_eq!(warnings, 0);
    }

    #[test]
    fn test_mode_overrides() {
        let timing = DisplayTiming::new(720, 1280).pixel_clock_hz(74_250_000);
        let config = Builder::new()
            .lanes(4)
            .timing(timing)
            .physical_size(62, 110)
            .refresh_hz(60)
            .build()
            .unwrap();
        let (panel, _log) = test_panel(&nt35596::PROFILE, MockDsi::new(), config);

        let mode = panel.mode();
        assert_eq!(mode.timing.hactive, 720);
        assert_eq!(mode.timing.refresh_hz, 60);
        assert_eq!((mode.width_mm, mode.height_mm), (62, 110));
        assert!(mode.bus_flags.is_empty());
    }

    #[test]
    fn test_mode_bus_properties() {
        let (panel, _log) = test_panel(&nt35596::PROFILE, MockDsi::new(), config());
        let mode = panel.mode();
        assert_eq!(mode.bus_formats.len(), 3);
        assert_eq!(
            mode.bus_flags,
            BusFlags::DE_LOW | BusFlags::PIXDATA_DRIVE_NEGEDGE
        );
        assert_eq!(mode.timing.pixel_clock_hz, 132_000_000);
    }
}
