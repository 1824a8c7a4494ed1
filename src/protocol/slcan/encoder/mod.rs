//! Resumable ASCII serializer for received frames.
//!
//! A frame is written out one character per call so the main loop can
//! interleave the serial output with bus reception and command handling:
//!
//! ```text
//! type  id (3 or 8)  dlc  data (2 per byte)  [timestamp (4)]  CR
//! t     123          2    A0B0               [EA5F]           \r
//! ```
//!
//! Remote frames and frames with `dlc == 0` skip the data field; the
//! timestamp is only emitted while timestamping is enabled.
use crate::core::CR;
use crate::infra::codec::hex::hex_digit;
use crate::protocol::transport::can_frame::{CanFrame, MAX_DLC};

/// Longest possible line: `T` + 8 id + 1 dlc + 16 data + 4 timestamp + CR.
pub const MAX_ENCODED_LEN: usize = 31;

const STD_ID_DIGITS: u8 = 3;
const EXT_ID_DIGITS: u8 = 8;
const TIMESTAMP_DIGITS: u8 = 4;

/// Position of the cursor inside the fixed field order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeStep {
    /// Nothing emitted yet.
    #[default]
    Type,
    /// Identifier digit `n`, most significant first.
    Id(u8),
    Dlc,
    /// Payload digit `n` (two per byte, high nibble first).
    Data(u8),
    /// Timestamp digit `n`; emits the terminator instead when timestamping is off.
    Timestamp(u8),
    Terminator,
    /// Terminator sent; the frame slot may be released.
    Finished,
}

/// Progress marker for the frame currently being written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncodeCursor {
    step: EncodeStep,
}

impl EncodeCursor {
    pub const fn new() -> Self {
        Self {
            step: EncodeStep::Type,
        }
    }

    #[inline]
    pub fn step(&self) -> EncodeStep {
        self.step
    }

    /// No frame is in progress.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.step == EncodeStep::Type
    }

    /// The terminator of the current frame has been produced.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.step == EncodeStep::Finished
    }

    /// Rewind to the start of a new frame.
    #[inline]
    pub fn reset(&mut self) {
        self.step = EncodeStep::Type;
    }

    /// Produce the next character of `frame` and advance by one step.
    ///
    /// Calling it again once [`is_finished`](Self::is_finished) holds starts
    /// the frame over from its type byte.
    pub fn next_char(&mut self, frame: &CanFrame, timestamping: bool) -> u8 {
        if self.is_finished() {
            self.reset();
        }

        let id_digits = if frame.is_extended {
            EXT_ID_DIGITS
        } else {
            STD_ID_DIGITS
        };
        let dlc = frame.dlc.min(MAX_DLC);

        let (ch, next) = match self.step {
            EncodeStep::Type => {
                let ch = match (frame.is_extended, frame.is_remote) {
                    (true, true) => b'R',
                    (true, false) => b'T',
                    (false, true) => b'r',
                    (false, false) => b't',
                };
                (ch, EncodeStep::Id(0))
            }
            EncodeStep::Id(index) => {
                let shift = 4 * (id_digits - 1 - index) as u32;
                let ch = hex_digit((frame.id >> shift) as u8);
                let next = if index + 1 >= id_digits {
                    EncodeStep::Dlc
                } else {
                    EncodeStep::Id(index + 1)
                };
                (ch, next)
            }
            EncodeStep::Dlc => {
                let next = if dlc == 0 || frame.is_remote {
                    EncodeStep::Timestamp(0)
                } else {
                    EncodeStep::Data(0)
                };
                (hex_digit(frame.dlc), next)
            }
            EncodeStep::Data(index) => {
                let byte = frame.data[(index / 2) as usize];
                let nibble = if index % 2 == 0 { byte >> 4 } else { byte };
                let next = if index + 1 >= dlc * 2 {
                    EncodeStep::Timestamp(0)
                } else {
                    EncodeStep::Data(index + 1)
                };
                (hex_digit(nibble), next)
            }
            EncodeStep::Timestamp(index) if timestamping => {
                let shift = 4 * (TIMESTAMP_DIGITS - 1 - index) as u32;
                let ch = hex_digit((frame.timestamp >> shift) as u8);
                let next = if index + 1 >= TIMESTAMP_DIGITS {
                    EncodeStep::Terminator
                } else {
                    EncodeStep::Timestamp(index + 1)
                };
                (ch, next)
            }
            EncodeStep::Timestamp(_) | EncodeStep::Terminator | EncodeStep::Finished => {
                (CR, EncodeStep::Finished)
            }
        };

        self.step = next;
        ch
    }
}

/// Whole-frame view over an [`EncodeCursor`], for callers that can afford to
/// drain a frame in one go.
#[derive(Debug, Clone)]
pub struct EncodedFrame<'a> {
    frame: &'a CanFrame,
    cursor: EncodeCursor,
    timestamping: bool,
}

impl<'a> EncodedFrame<'a> {
    pub fn new(frame: &'a CanFrame, timestamping: bool) -> Self {
        Self {
            frame,
            cursor: EncodeCursor::new(),
            timestamping,
        }
    }
}

impl Iterator for EncodedFrame<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor.is_finished() {
            return None;
        }
        Some(self.cursor.next_char(self.frame, self.timestamping))
    }
}

//==================================================================================TESTS
#[cfg(test)]
#[path = "tests.rs"]
mod tests;
