//! Transport layer: the canonical CAN frame, the receive ring buffer, and the
//! traits behind which the controller driver, serial port and timer live.
//!
//! ## Loop timing
//!
//! The bridge never blocks on either side. When a loop pass finds nothing to
//! do it yields for [`IDLE_YIELD_MS`], which keeps the receive latency well
//! below one frame time at 115200 baud while leaving the CPU to other tasks.

pub mod can_frame;
pub mod ring_buffer;
pub mod traits;

/// Idle delay between two empty loop passes (ms).
pub const IDLE_YIELD_MS: u32 = 1;

/// Serial baud rate the host side is expected to be configured with.
///
/// The bridge does not configure the transport itself; firmware applies this
/// once at startup.
pub const SERIAL_BAUD_RATE: u32 = 115_200;
