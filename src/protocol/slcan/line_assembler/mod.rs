//! Collects incoming serial bytes into `CR`-terminated command lines.
//!
//! A line longer than the buffer gets no reply at all, neither `CR` nor
//! `BELL`. Classic adapters execute the truncated prefix and answer it
//! instead; here a host waiting for a status byte after an overlong line
//! must time out and resynchronise.
use crate::core::{CR, LF, LINE_MAXLEN};

/// Bounded line buffer. No allocation, no reallocation.
///
/// A line longer than `L` bytes is not truncated into a different command:
/// the excess is dropped and the whole line is discarded at its terminator.
#[derive(Debug, Clone)]
pub struct LineAssembler<const L: usize = LINE_MAXLEN> {
    buffer: [u8; L],
    len: usize,
    overflowed: bool,
}

impl<const L: usize> Default for LineAssembler<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const L: usize> LineAssembler<L> {
    pub const fn new() -> Self {
        Self {
            buffer: [0; L],
            len: 0,
            overflowed: false,
        }
    }

    /// Feed one byte. Returns the completed line (terminator excluded) when
    /// `byte` is `CR`; the slice stays valid until the next call.
    pub fn feed(&mut self, byte: u8) -> Option<&[u8]> {
        match byte {
            CR => {
                let len = self.len;
                let overflowed = self.overflowed;
                self.len = 0;
                self.overflowed = false;
                if overflowed {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("Discarding overlong command line");
                    return None;
                }
                Some(&self.buffer[..len])
            }
            LF => None,
            _ => {
                if self.len < L {
                    self.buffer[self.len] = byte;
                    self.len += 1;
                } else {
                    self.overflowed = true;
                }
                None
            }
        }
    }

    /// Bytes buffered for the line in progress.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drop the line in progress.
    pub fn clear(&mut self) {
        self.len = 0;
        self.overflowed = false;
    }
}
