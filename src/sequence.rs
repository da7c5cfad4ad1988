//! Command tables and the sequence transmitter
//!
//! A panel's vendor initialisation is a fixed, ordered list of raw DSI
//! payloads, each followed by a settle time. [`Command`] is one such entry,
//! [`CommandTable`] an immutable ordered list of them, and [`transmit`] pushes
//! a table through a [`DsiInterface`] in order.
//!
//! Transmission never stops early: a failed write is logged and the table
//! continues with the next entry, still honouring the failed entry's wait.
//! The outcome is returned as a [`SequenceReport`].
//!
//! ## Example
//!
//! ```
//! use dsi_panel::sequence::{Command, CommandTable, Wait};
//!
//! static OFF: CommandTable = CommandTable::new(
//!     "off",
//!     &[
//!         Command::new(Wait::ms(60), &[0x28]),
//!         Command::new(Wait::ms(120), &[0x10]),
//!     ],
//! );
//!
//! assert_eq!(OFF.len(), 2);
//! assert_eq!(OFF.commands()[1].command(), 0x10);
//! ```

use embedded_hal::delay::DelayNs;
use log::{debug, error};

use crate::interface::DsiInterface;

/// Unit of a [`Wait`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaitUnit {
    /// Microseconds
    Microseconds,
    /// Milliseconds
    Milliseconds,
    /// Seconds
    Seconds,
}

/// A blocking settle time
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Wait {
    /// Magnitude; zero means no wait
    pub amount: u32,
    /// Unit of `amount`
    pub unit: WaitUnit,
}

impl Wait {
    /// No wait at all
    pub const NONE: Self = Self::us(0);

    /// Wait in microseconds
    pub const fn us(amount: u32) -> Self {
        Self {
            amount,
            unit: WaitUnit::Microseconds,
        }
    }

    /// Wait in milliseconds
    pub const fn ms(amount: u32) -> Self {
        Self {
            amount,
            unit: WaitUnit::Milliseconds,
        }
    }

    /// Wait in seconds
    pub const fn s(amount: u32) -> Self {
        Self {
            amount,
            unit: WaitUnit::Seconds,
        }
    }

    /// Whether this wait blocks at all
    pub const fn is_zero(&self) -> bool {
        self.amount == 0
    }

    /// Total duration in microseconds
    pub const fn as_micros(&self) -> u64 {
        let amount = self.amount as u64;
        match self.unit {
            WaitUnit::Microseconds => amount,
            WaitUnit::Milliseconds => amount * 1_000,
            WaitUnit::Seconds => amount * 1_000_000,
        }
    }

    /// Block for this duration
    pub fn apply<D: DelayNs>(&self, delay: &mut D) {
        if self.is_zero() {
            return;
        }
        match self.unit {
            WaitUnit::Microseconds => delay.delay_us(self.amount),
            WaitUnit::Milliseconds => delay.delay_ms(self.amount),
            // one second at a time so large values cannot overflow
            WaitUnit::Seconds => {
                for _ in 0..self.amount {
                    delay.delay_ms(1_000);
                }
            }
        }
    }
}

/// One raw DSI payload plus the wait that follows it
///
/// `payload[0]` is the command byte, the rest are its parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Command {
    wait: Wait,
    payload: &'static [u8],
}

impl Command {
    /// Create a descriptor
    ///
    /// Intended for `static`/`const` tables, where an empty payload is a
    /// compile-time error.
    pub const fn new(wait: Wait, payload: &'static [u8]) -> Self {
        assert!(!payload.is_empty(), "command payload must not be empty");
        Self { wait, payload }
    }

    /// Wait applied after the payload is written
    pub const fn wait(&self) -> Wait {
        self.wait
    }

    /// Full payload, command byte included
    pub const fn payload(&self) -> &'static [u8] {
        self.payload
    }

    /// Leading command byte
    pub const fn command(&self) -> u8 {
        self.payload[0]
    }

    /// Payload length in bytes
    pub const fn len(&self) -> usize {
        self.payload.len()
    }
}

/// Named, ordered list of [`Command`]s for one lifecycle stage
#[derive(Debug)]
pub struct CommandTable {
    name: &'static str,
    commands: &'static [Command],
}

impl CommandTable {
    /// Create a table
    pub const fn new(name: &'static str, commands: &'static [Command]) -> Self {
        Self { name, commands }
    }

    /// Name used in log messages
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Descriptors in transmission order
    pub const fn commands(&self) -> &'static [Command] {
        self.commands
    }

    /// Number of descriptors
    pub const fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the table has no descriptors
    pub const fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Sum of all waits in microseconds
    pub fn total_wait_us(&self) -> u64 {
        self.commands.iter().map(|c| c.wait.as_micros()).sum()
    }
}

/// A write that the transport rejected
#[derive(Debug)]
pub struct SequenceFailure<E> {
    /// Position in the table
    pub index: usize,
    /// Command byte of the rejected payload
    pub command: u8,
    /// Length of the rejected payload
    pub len: usize,
    /// Transport error
    pub source: E,
}

/// Outcome of [`transmit`]
#[derive(Debug)]
pub struct SequenceReport<E> {
    /// Table that was sent
    pub table: &'static str,
    /// Descriptors processed; always the table length
    pub processed: usize,
    /// Descriptors whose write failed
    pub failed: usize,
    /// Earliest failed write, if any
    pub first_failure: Option<SequenceFailure<E>>,
}

impl<E> SequenceReport<E> {
    /// Whether every write went through
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }

    /// Turn the report into the number of processed descriptors, or the first failure
    pub fn into_result(self) -> Result<usize, SequenceFailure<E>> {
        match self.first_failure {
            Some(failure) => Err(failure),
            None => Ok(self.processed),
        }
    }
}

/// Send every descriptor of `table` in order
///
/// Each payload goes out as one DCS buffer write, then the descriptor's wait
/// is applied. A failed write is logged and does not stop the table; the
/// wait is applied regardless.
pub fn transmit<I, D>(
    interface: &mut I,
    table: &CommandTable,
    delay: &mut D,
) -> SequenceReport<I::Error>
where
    I: DsiInterface + ?Sized,
    D: DelayNs,
{
    let mut report = SequenceReport {
        table: table.name,
        processed: 0,
        failed: 0,
        first_failure: None,
    };

    for (index, command) in table.commands.iter().enumerate() {
        if let Err(e) = interface.write_buffer(command.payload) {
            error!(
                "{}: write {} failed (cmd {:#04x}, {} bytes): {:?}",
                table.name,
                index,
                command.command(),
                command.len(),
                e
            );
            report.failed += 1;
            if report.first_failure.is_none() {
                report.first_failure = Some(SequenceFailure {
                    index,
                    command: command.command(),
                    len: command.len(),
                    source: e,
                });
            }
        }
        command.wait.apply(delay);
        report.processed += 1;
    }

    debug!(
        "{}: sent {} commands, {} failed",
        table.name, report.processed, report.failed
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockDelay, MockDsi, MockError};

    static THREE: CommandTable = CommandTable::new(
        "three",
        &[
            Command::new(Wait::us(10), &[0x00, 0x80]),
            Command::new(Wait::ms(1), &[0xFF, 0x19, 0x02]),
            Command::new(Wait::us(200), &[0x11]),
        ],
    );

    static EMPTY: CommandTable = CommandTable::new("empty", &[]);

    #[test]
    fn test_wait_conversions() {
        assert_eq!(Wait::us(10).as_micros(), 10);
        assert_eq!(Wait::ms(3).as_micros(), 3_000);
        assert_eq!(Wait::s(2).as_micros(), 2_000_000);
        assert!(Wait::NONE.is_zero());
    }

    #[test]
    fn test_zero_wait_is_skipped() {
        let mut delay = MockDelay::new();
        Wait::ms(0).apply(&mut delay);
        assert!(delay.calls.is_empty());
    }

    #[test]
    fn test_seconds_wait() {
        let mut delay = MockDelay::new();
        Wait::s(3).apply(&mut delay);
        assert_eq!(delay.total_ns(), 3_000_000_000);
    }

    #[test]
    fn test_transmit_in_order() {
        let mut dsi = MockDsi::new();
        let mut delay = MockDelay::new();

        let report = transmit(&mut dsi, &THREE, &mut delay);

        assert!(report.is_clean());
        assert_eq!(report.processed, 3);
        assert_eq!(dsi.writes.len(), 3);
        assert_eq!(dsi.writes[0], [0x00, 0x80]);
        assert_eq!(dsi.writes[1], [0xFF, 0x19, 0x02]);
        assert_eq!(dsi.writes[2], [0x11]);
        assert_eq!(delay.total_ns(), THREE.total_wait_us() * 1_000);
    }

    #[test]
    fn test_transmit_continues_after_failure() {
        let mut dsi = MockDsi::failing_at(&[1]);
        let mut delay = MockDelay::new();

        let report = transmit(&mut dsi, &THREE, &mut delay);

        assert_eq!(dsi.writes.len(), 3);
        assert_eq!(dsi.writes[2], [0x11]);
        assert_eq!(report.processed, 3);
        assert_eq!(report.failed, 1);
        // the third descriptor's wait is still the last one applied
        assert_eq!(delay.calls.last(), Some(&200_000));
        assert_eq!(delay.total_ns(), THREE.total_wait_us() * 1_000);

        let failure = report.first_failure.as_ref();
        assert!(matches!(
            failure,
            Some(SequenceFailure {
                index: 1,
                command: 0xFF,
                len: 3,
                source: MockError
            })
        ));
    }

    #[test]
    fn test_transmit_all_failing() {
        let mut dsi = MockDsi::failing_at(&[0, 1, 2]);
        let mut delay = MockDelay::new();

        let report = transmit(&mut dsi, &THREE, &mut delay);

        assert_eq!(dsi.writes.len(), 3);
        assert_eq!(report.failed, 3);
        assert!(matches!(report.into_result(), Err(SequenceFailure { index: 0, .. })));
    }

    #[test]
    fn test_transmit_empty_table() {
        let mut dsi = MockDsi::new();
        let mut delay = MockDelay::new();

        let report = transmit(&mut dsi, &EMPTY, &mut delay);

        assert!(dsi.writes.is_empty());
        assert!(delay.calls.is_empty());
        assert!(matches!(report.into_result(), Ok(0)));
    }
}
