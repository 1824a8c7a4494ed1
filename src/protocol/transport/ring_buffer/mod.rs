//! Fixed-capacity FIFO of received frames sitting between the controller
//! receive path (single producer) and the serial encoder (single consumer).
//!
//! When the buffer is full the newest frame is dropped: frames already queued
//! keep their order and are never overwritten. Drops are counted so firmware
//! can surface them in its own diagnostics.
use crate::core::CANMSG_BUFFERSIZE;
use crate::protocol::transport::can_frame::CanFrame;

/// Circular buffer of `N` frame slots.
#[derive(Debug, Clone)]
pub struct FrameRingBuffer<const N: usize = CANMSG_BUFFERSIZE> {
    slots: [CanFrame; N],
    /// Next slot to read.
    head: usize,
    /// Next slot to write.
    tail: usize,
    filled: usize,
    dropped: u32,
}

impl<const N: usize> Default for FrameRingBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> FrameRingBuffer<N> {
    /// Create an empty buffer.
    pub const fn new() -> Self {
        Self {
            slots: [CanFrame {
                id: 0,
                is_extended: false,
                is_remote: false,
                dlc: 0,
                data: [0; 8],
                timestamp: 0,
            }; N],
            head: 0,
            tail: 0,
            filled: 0,
            dropped: 0,
        }
    }

    /// Queue a frame. Returns `false` (frame dropped) when the buffer is full.
    pub fn push(&mut self, frame: CanFrame) -> bool {
        if self.is_full() {
            self.dropped = self.dropped.wrapping_add(1);
            return false;
        }
        self.slots[self.tail] = frame;
        self.tail = (self.tail + 1) % N;
        self.filled += 1;
        true
    }

    /// Remove and return the oldest frame.
    pub fn pop(&mut self) -> Option<CanFrame> {
        if self.is_empty() {
            return None;
        }
        let frame = self.slots[self.head];
        self.head = (self.head + 1) % N;
        self.filled -= 1;
        Some(frame)
    }

    /// Oldest frame without releasing its slot.
    pub fn peek(&self) -> Option<&CanFrame> {
        if self.is_empty() {
            None
        } else {
            Some(&self.slots[self.head])
        }
    }

    /// Number of queued frames.
    #[inline]
    pub fn len(&self) -> usize {
        self.filled
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.filled >= N
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Frames dropped because the buffer was full (wraps).
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}
