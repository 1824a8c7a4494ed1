/// Test doubles to simulate the CAN controller, the serial link and the timer
/// during integration tests.
use slcan_bridge::core::{BitTiming, Bitrate, BusMode};
use slcan_bridge::protocol::transport::{
    can_frame::CanFrame,
    traits::{can_driver::CanDriver, loop_timer::LoopTimer, serial_port::SerialPort},
};
use std::collections::VecDeque;
use tokio::time::{sleep, Duration};

#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(dead_code)]
/// One request issued on the driver.
pub enum DriverCall {
    SetBitrate(Bitrate),
    SetCustomTiming(BitTiming),
    ReadRegister(u8),
    WriteRegister(u8, u8),
    Reset,
    SetMode(BusMode),
    SetFilterMask([u8; 4]),
    SetFilterCode([u8; 4]),
    ErrorFlags,
    Transmit(CanFrame),
}

#[allow(dead_code)]
/// In-memory controller recording every call and replaying queued frames.
pub struct MockDriver {
    pub calls: Vec<DriverCall>,
    pub incoming: VecDeque<CanFrame>,
    pub registers: [u8; 256],
    pub eflg: u8,
    /// Refuse transmit requests (no free mailbox).
    pub mailboxes_full: bool,
    /// Refuse controller resets.
    pub reset_fails: bool,
    pub mode: Option<BusMode>,
}

#[allow(dead_code)]
impl MockDriver {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            incoming: VecDeque::new(),
            registers: [0; 256],
            eflg: 0,
            mailboxes_full: false,
            reset_fails: false,
            mode: None,
        }
    }

    /// Queue a frame as if it had just been received from the bus.
    pub fn inject(&mut self, frame: CanFrame) {
        self.incoming.push_back(frame);
    }

    /// Frames accepted by the transmit path, in order.
    pub fn transmitted(&self) -> Vec<CanFrame> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DriverCall::Transmit(frame) => Some(*frame),
                _ => None,
            })
            .collect()
    }
}

impl CanDriver for MockDriver {
    type Error = ();

    fn set_bitrate(&mut self, bitrate: Bitrate) -> Result<(), ()> {
        self.calls.push(DriverCall::SetBitrate(bitrate));
        Ok(())
    }

    fn set_custom_timing(&mut self, timing: BitTiming) -> Result<(), ()> {
        self.calls.push(DriverCall::SetCustomTiming(timing));
        Ok(())
    }

    fn read_register(&mut self, address: u8) -> Result<u8, ()> {
        self.calls.push(DriverCall::ReadRegister(address));
        Ok(self.registers[address as usize])
    }

    fn write_register(&mut self, address: u8, value: u8) -> Result<(), ()> {
        self.calls.push(DriverCall::WriteRegister(address, value));
        self.registers[address as usize] = value;
        Ok(())
    }

    fn reset(&mut self) -> Result<(), ()> {
        if self.reset_fails {
            return Err(());
        }
        self.calls.push(DriverCall::Reset);
        Ok(())
    }

    fn set_mode(&mut self, mode: BusMode) -> Result<(), ()> {
        self.calls.push(DriverCall::SetMode(mode));
        self.mode = Some(mode);
        Ok(())
    }

    fn set_filter_mask(&mut self, mask: [u8; 4]) -> Result<(), ()> {
        self.calls.push(DriverCall::SetFilterMask(mask));
        Ok(())
    }

    fn set_filter_code(&mut self, code: [u8; 4]) -> Result<(), ()> {
        self.calls.push(DriverCall::SetFilterCode(code));
        Ok(())
    }

    fn error_flags(&mut self) -> Result<u8, ()> {
        self.calls.push(DriverCall::ErrorFlags);
        Ok(self.eflg)
    }

    fn try_receive(&mut self) -> Option<CanFrame> {
        self.incoming.pop_front()
    }

    fn try_transmit(&mut self, frame: &CanFrame) -> Result<(), ()> {
        if self.mailboxes_full {
            return Err(());
        }
        self.calls.push(DriverCall::Transmit(*frame));
        // Loopback mode hears its own frames.
        if self.mode == Some(BusMode::Loopback) {
            self.incoming.push_back(*frame);
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
#[allow(dead_code)]
/// Serial link double: host bytes in, device bytes out.
pub struct MockSerial {
    pub input: VecDeque<u8>,
    pub output: Vec<u8>,
}

#[allow(dead_code)]
impl MockSerial {
    pub fn with_input(bytes: &[u8]) -> Self {
        Self {
            input: bytes.iter().copied().collect(),
            output: Vec::new(),
        }
    }

    /// Append host bytes to the pending input.
    pub fn send(&mut self, bytes: &[u8]) {
        self.input.extend(bytes.iter().copied());
    }

    /// Take everything written so far.
    pub fn take_output(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.output)
    }
}

impl SerialPort for MockSerial {
    fn read_byte(&mut self) -> Option<u8> {
        self.input.pop_front()
    }

    fn write_byte(&mut self, byte: u8) {
        self.output.push(byte);
    }
}

#[allow(dead_code)]
/// Timer based on `tokio::time::sleep` to drive the idle yield in tests.
pub struct MockTimer;

impl LoopTimer for MockTimer {
    fn delay_ms<'a>(&'a mut self, millis: u32) -> impl core::future::Future<Output = ()> + 'a {
        sleep(Duration::from_millis(millis as u64))
    }
}

#[allow(dead_code)]
/// Poll `bridge` until a pass moves nothing (bounded).
pub fn drain<D, S, const N: usize, const L: usize>(
    bridge: &mut slcan_bridge::protocol::slcan::bridge::Bridge<D, S, N, L>,
) where
    D: CanDriver,
    S: SerialPort,
{
    for _ in 0..10_000 {
        if !bridge.poll() {
            return;
        }
    }
    panic!("bridge never went idle");
}
