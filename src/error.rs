//! Error definitions shared across library modules.
//! None of them ever reaches the wire in detail: the protocol only knows a
//! single "bell" byte, so every failure below collapses into it once the
//! interpreter has logged it.
use thiserror_no_std::Error;

//==================================================================================PARSE_ERROR
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Reasons a command line is refused before anything reaches the driver.
pub enum ParseError {
    /// A byte inside a hex field is not a hexadecimal digit.
    #[error("Invalid hex digit")]
    InvalidDigit,
    /// The line ended (or hit a NUL terminator) before a field was complete.
    #[error("Truncated hex field")]
    Truncated,
    /// The line is empty or starts with an unknown command tag.
    #[error("Unknown command")]
    UnknownCommand,
    /// A field parsed but its value is outside the accepted range
    /// (bitrate preset above 8, identifier wider than its kind).
    #[error("Value out of range")]
    OutOfRange,
    /// The command is not allowed in the current channel state.
    #[error("Command not allowed in current channel state")]
    InvalidState,
}

//==================================================================================COMMAND_ERROR
#[derive(Error, Debug, Clone, PartialEq, Eq)]
/// Failures while executing a command line.
pub enum CommandError<E: core::fmt::Debug> {
    /// The line was refused before any side effect.
    #[error("Command refused: {0}")]
    Parse(#[from] ParseError),

    /// The CAN driver refused the request (no free mailbox, register access failure…).
    #[error("CAN driver rejected request: {0:?}")]
    DriverRejected(E),
}
