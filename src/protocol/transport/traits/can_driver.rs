//! Minimal abstraction over a CAN controller (MCP2515, bxCAN, TWAI…). Lets the
//! SLCAN engine run on any HAL or on a desktop mock.
use crate::core::{BitTiming, Bitrate, BusMode};
use crate::protocol::transport::can_frame::CanFrame;

/// Contract of the CAN controller driver. No method may block.
///
/// Configuration calls are only issued while the channel is closed; the
/// driver does not have to guard against reconfiguration of a running bus.
pub trait CanDriver {
    type Error: core::fmt::Debug;

    /// Select one of the standard bitrates.
    fn set_bitrate(&mut self, bitrate: Bitrate) -> Result<(), Self::Error>;
    /// Program raw bit timing registers.
    fn set_custom_timing(&mut self, timing: BitTiming) -> Result<(), Self::Error>;
    /// Read a controller register.
    fn read_register(&mut self, address: u8) -> Result<u8, Self::Error>;
    /// Write a controller register.
    fn write_register(&mut self, address: u8, value: u8) -> Result<(), Self::Error>;
    /// Reset the controller, applying the pending configuration.
    fn reset(&mut self) -> Result<(), Self::Error>;
    /// Select the operating mode used after the next reset.
    fn set_mode(&mut self, mode: BusMode) -> Result<(), Self::Error>;
    /// Acceptance filter mask, SJA1000 byte layout (AM0..AM3).
    fn set_filter_mask(&mut self, mask: [u8; 4]) -> Result<(), Self::Error>;
    /// Acceptance filter code, SJA1000 byte layout (AC0..AC3).
    fn set_filter_code(&mut self, code: [u8; 4]) -> Result<(), Self::Error>;
    /// Raw error flag register (MCP2515 `EFLG` layout).
    fn error_flags(&mut self) -> Result<u8, Self::Error>;
    /// Next received frame, if any. The driver fills in the timestamp.
    fn try_receive(&mut self) -> Option<CanFrame>;
    /// Hand a frame to a free mailbox; `Err` when none is available.
    fn try_transmit(&mut self, frame: &CanFrame) -> Result<(), Self::Error>;
}
