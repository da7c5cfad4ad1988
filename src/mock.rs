//! Recording doubles for the transport, GPIO lines and delays used by the unit tests

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};
use log::{Level, LevelFilter, Log, Metadata, Record};

use crate::command;
use crate::config::DsiSettings;
use crate::interface::DsiInterface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

impl core::fmt::Display for MockError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "mock error")
    }
}

impl embedded_hal::digital::Error for MockError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Records every packet in the order it was sent
#[derive(Debug, Default)]
pub struct MockDsi {
    /// Every DCS and generic write attempted, failed ones included
    pub writes: Vec<Vec<u8>>,
    /// Indices into `writes` that went out as generic packets
    pub generic: Vec<usize>,
    pub reads: Vec<u8>,
    pub low_power: Vec<bool>,
    pub attached: Option<DsiSettings>,
    pub detached: bool,
    /// Write indices that fail
    pub fail_at: Vec<usize>,
    /// Command bytes that always fail
    pub fail_commands: Vec<u8>,
    pub fail_attach: bool,
    pub brightness: u16,
}

impl MockDsi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_at(indices: &[usize]) -> Self {
        Self {
            fail_at: indices.to_vec(),
            ..Self::default()
        }
    }

    pub fn failing_command(command: u8) -> Self {
        Self {
            fail_commands: alloc::vec![command],
            ..Self::default()
        }
    }

    /// Leading bytes of every write, in order
    pub fn commands(&self) -> Vec<u8> {
        self.writes.iter().map(|w| w[0]).collect()
    }

    fn record(&mut self, payload: &[u8]) -> Result<(), MockError> {
        let index = self.writes.len();
        self.writes.push(payload.to_vec());
        if self.fail_at.contains(&index) || self.fail_commands.contains(&payload[0]) {
            return Err(MockError);
        }
        if payload[0] == command::SET_DISPLAY_BRIGHTNESS && payload.len() == 3 {
            self.brightness = u16::from_le_bytes([payload[1], payload[2]]);
        }
        Ok(())
    }
}

impl DsiInterface for MockDsi {
    type Error = MockError;

    fn write_buffer(&mut self, payload: &[u8]) -> Result<(), Self::Error> {
        self.record(payload)
    }

    fn generic_write(&mut self, payload: &[u8]) -> Result<(), Self::Error> {
        self.generic.push(self.writes.len());
        self.record(payload)
    }

    fn dcs_read(&mut self, command: u8, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.reads.push(command);
        if self.fail_commands.contains(&command) {
            return Err(MockError);
        }
        match command {
            command::GET_DISPLAY_BRIGHTNESS => {
                let bytes = self.brightness.to_le_bytes();
                let n = buf.len().min(bytes.len());
                buf[..n].copy_from_slice(&bytes[..n]);
                Ok(n)
            }
            _ => {
                buf.fill(0x9C);
                Ok(buf.len())
            }
        }
    }

    fn set_low_power_mode(&mut self, enabled: bool) {
        self.low_power.push(enabled);
    }

    fn attach(&mut self, settings: &DsiSettings) -> Result<(), Self::Error> {
        if self.fail_attach {
            return Err(MockError);
        }
        self.attached = Some(*settings);
        Ok(())
    }

    fn detach(&mut self) -> Result<(), Self::Error> {
        self.detached = true;
        Ok(())
    }
}

/// Sums every requested delay, in nanoseconds
#[derive(Debug, Default)]
pub struct MockDelay {
    pub calls: Vec<u32>,
}

impl MockDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_ns(&self) -> u64 {
        self.calls.iter().map(|&ns| u64::from(ns)).sum()
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.calls.push(ns);
    }
}

pub type PinLog = Rc<RefCell<Vec<(&'static str, bool)>>>;

pub fn pin_log() -> PinLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// Output line that appends `(name, level)` to a log shared with its siblings
#[derive(Debug)]
pub struct MockPin {
    name: &'static str,
    log: PinLog,
    fail: bool,
}

impl MockPin {
    pub fn new(name: &'static str, log: &PinLog) -> Self {
        Self {
            name,
            log: Rc::clone(log),
            fail: false,
        }
    }

    pub fn failing(name: &'static str, log: &PinLog) -> Self {
        Self {
            fail: true,
            ..Self::new(name, log)
        }
    }

    fn set(&mut self, level: bool) -> Result<(), MockError> {
        self.log.borrow_mut().push((self.name, level));
        if self.fail { Err(MockError) } else { Ok(()) }
    }
}

impl ErrorType for MockPin {
    type Error = MockError;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set(true)
    }
}

std::thread_local! {
    static WARNINGS: Cell<usize> = const { Cell::new(0) };
}

/// Counts `warn!` records emitted on the calling thread
struct WarningCounter;

impl Log for WarningCounter {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record<'_>) {
        if record.level() == Level::Warn {
            WARNINGS.with(|count| count.set(count.get() + 1));
        }
    }

    fn flush(&self) {}
}

static WARNING_COUNTER: WarningCounter = WarningCounter;

/// Run `f` and return its result with the number of warnings it logged
///
/// Tests run on separate threads, so the count only sees `f`.
pub fn count_warnings<R>(f: impl FnOnce() -> R) -> (R, usize) {
    // Already installed by another test on a different thread
    let _ = log::set_logger(&WARNING_COUNTER);
    log::set_max_level(LevelFilter::Warn);
    WARNINGS.with(|count| count.set(0));
    let result = f();
    (result, WARNINGS.with(Cell::get))
}
