//! Top-level SLCAN context: owns the channel state (through the interpreter),
//! the receive ring, the line assembler and the encode cursor, and drives the
//! driver and serial port one non-blocking step at a time.
//!
//! One [`Bridge::poll`] pass:
//!
//! 1. while the channel is open, pull at most one frame from the controller
//!    into the ring (dropped when the ring is full);
//! 2. if the serial port can take a byte, write the next character of the
//!    oldest queued frame and release its slot once the terminator is out;
//! 3. if no frame line is half-written and the serial port can take a byte,
//!    read one byte from the host and, when it completes a line, execute the
//!    command and write its reply.
//!
//! Step 3 never runs in the middle of a frame line so that command replies
//! cannot be spliced into an unsolicited frame on the wire.
use core::convert::Infallible;
use core::fmt::Debug;

use crate::core::{ChannelState, DeviceInfo, CANMSG_BUFFERSIZE, LINE_MAXLEN};
use crate::protocol::slcan::encoder::EncodeCursor;
use crate::protocol::slcan::interpreter::CommandInterpreter;
use crate::protocol::slcan::line_assembler::LineAssembler;
use crate::protocol::transport::ring_buffer::FrameRingBuffer;
use crate::protocol::transport::traits::{
    can_driver::CanDriver, loop_timer::LoopTimer, serial_port::SerialPort,
};
use crate::protocol::transport::IDLE_YIELD_MS;

/// SLCAN engine bound to a CAN driver and a serial port.
///
/// * `N` – receive ring capacity (frames)
/// * `L` – maximum command line length (bytes)
pub struct Bridge<D, S, const N: usize = CANMSG_BUFFERSIZE, const L: usize = LINE_MAXLEN>
where
    D: CanDriver,
    S: SerialPort,
{
    driver: D,
    serial: S,
    interpreter: CommandInterpreter,
    ring: FrameRingBuffer<N>,
    line: LineAssembler<L>,
    cursor: EncodeCursor,
}

impl<D, S, const N: usize, const L: usize> Bridge<D, S, N, L>
where
    D: CanDriver,
    D::Error: Debug,
    S: SerialPort,
{
    /// Build a bridge in the `Config` state with empty buffers.
    pub fn new(driver: D, serial: S, device: DeviceInfo) -> Self {
        Self {
            driver,
            serial,
            interpreter: CommandInterpreter::new(device),
            ring: FrameRingBuffer::new(),
            line: LineAssembler::new(),
            cursor: EncodeCursor::new(),
        }
    }

    //==================================================================================Loop
    /// Run one loop pass. Returns `true` if any byte or frame was moved.
    pub fn poll(&mut self) -> bool {
        let received = self.poll_bus();
        let emitted = self.poll_output();
        let consumed = self.poll_input();
        received || emitted || consumed
    }

    /// Drive [`poll`](Self::poll) forever, yielding through `timer` after idle passes.
    pub async fn run<T: LoopTimer>(&mut self, timer: &mut T) -> Infallible {
        #[cfg(feature = "defmt")]
        defmt::info!("SLCAN bridge running");
        loop {
            if !self.poll() {
                timer.delay_ms(IDLE_YIELD_MS).await;
            }
        }
    }

    fn poll_bus(&mut self) -> bool {
        if self.interpreter.state() == ChannelState::Config {
            return false;
        }
        let Some(frame) = self.driver.try_receive() else {
            return false;
        };
        if !self.ring.push(frame) {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "Receive buffer full, frame {=u32:x} dropped ({} total)",
                frame.id,
                self.ring.dropped()
            );
        }
        true
    }

    fn poll_output(&mut self) -> bool {
        if !self.serial.is_writable() {
            return false;
        }
        let Some(frame) = self.ring.peek() else {
            return false;
        };
        let byte = self
            .cursor
            .next_char(frame, self.interpreter.timestamping());
        self.serial.write_byte(byte);
        if self.cursor.is_finished() {
            self.cursor.reset();
            self.ring.pop();
        }
        true
    }

    fn poll_input(&mut self) -> bool {
        if !self.cursor.is_idle() || !self.serial.is_writable() {
            return false;
        }
        let Some(byte) = self.serial.read_byte() else {
            return false;
        };
        if let Some(line) = self.line.feed(byte) {
            let reply = self.interpreter.execute(line, &mut self.driver);
            self.serial.write_all(reply.as_bytes());
        }
        true
    }

    //==================================================================================Accessors
    #[inline]
    pub fn state(&self) -> ChannelState {
        self.interpreter.state()
    }

    #[inline]
    pub fn timestamping(&self) -> bool {
        self.interpreter.timestamping()
    }

    /// Received frames waiting to be written out.
    #[inline]
    pub fn pending_frames(&self) -> usize {
        self.ring.len()
    }

    /// Frames lost because the receive ring was full.
    #[inline]
    pub fn dropped_frames(&self) -> u32 {
        self.ring.dropped()
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn serial(&self) -> &S {
        &self.serial
    }

    pub fn serial_mut(&mut self) -> &mut S {
        &mut self.serial
    }

    /// Give the driver and the serial port back.
    pub fn into_parts(self) -> (D, S) {
        (self.driver, self.serial)
    }
}
