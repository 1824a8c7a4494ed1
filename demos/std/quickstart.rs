//! SLCAN quickstart on a desktop: a host script is fed to the bridge over an
//! in-memory serial link while a loop-back "controller" echoes every
//! transmitted frame, so the transcript shows both command replies and
//! unsolicited frame lines.

use std::collections::VecDeque;

use slcan_bridge::{
    core::{BitTiming, Bitrate, BusMode, DeviceInfo, BELL},
    protocol::{
        slcan::bridge::Bridge,
        transport::{
            can_frame::CanFrame,
            traits::{can_driver::CanDriver, serial_port::SerialPort},
        },
    },
};

// ============================================================================
// Loop-back controller
// ============================================================================

/// Controller that receives its own frames back when opened with `l`.
#[derive(Default)]
struct LoopbackController {
    mode: Option<BusMode>,
    rx: VecDeque<CanFrame>,
    ticks: u16,
}

impl CanDriver for LoopbackController {
    type Error = ();

    fn set_bitrate(&mut self, bitrate: Bitrate) -> Result<(), ()> {
        println!("  [can] bitrate {} bit/s", bitrate.bits_per_second());
        Ok(())
    }
    fn set_custom_timing(&mut self, timing: BitTiming) -> Result<(), ()> {
        println!("  [can] custom timing {:?}", timing);
        Ok(())
    }
    fn read_register(&mut self, _address: u8) -> Result<u8, ()> {
        Ok(0)
    }
    fn write_register(&mut self, _address: u8, _value: u8) -> Result<(), ()> {
        Ok(())
    }
    fn reset(&mut self) -> Result<(), ()> {
        println!("  [can] reset");
        Ok(())
    }
    fn set_mode(&mut self, mode: BusMode) -> Result<(), ()> {
        println!("  [can] mode {:?}", mode);
        self.mode = Some(mode);
        Ok(())
    }
    fn set_filter_mask(&mut self, _mask: [u8; 4]) -> Result<(), ()> {
        Ok(())
    }
    fn set_filter_code(&mut self, _code: [u8; 4]) -> Result<(), ()> {
        Ok(())
    }
    fn error_flags(&mut self) -> Result<u8, ()> {
        Ok(0)
    }
    fn try_receive(&mut self) -> Option<CanFrame> {
        self.ticks = self.ticks.wrapping_add(1);
        let ticks = self.ticks;
        self.rx.pop_front().map(|frame| frame.with_timestamp(ticks))
    }
    fn try_transmit(&mut self, frame: &CanFrame) -> Result<(), ()> {
        println!("  [can] transmit {:?}", frame);
        if self.mode == Some(BusMode::Loopback) {
            self.rx.push_back(*frame);
        }
        Ok(())
    }
}

// ============================================================================
// Host link
// ============================================================================

#[derive(Default)]
struct HostLink {
    to_device: VecDeque<u8>,
    from_device: Vec<u8>,
}

impl SerialPort for HostLink {
    fn read_byte(&mut self) -> Option<u8> {
        self.to_device.pop_front()
    }
    fn write_byte(&mut self, byte: u8) {
        self.from_device.push(byte);
    }
}

/// Render device output with `\r` and `BELL` made visible.
fn printable(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&byte| match byte {
            b'\r' => "\\r".to_string(),
            BELL => "<BELL>".to_string(),
            other => (other as char).to_string(),
        })
        .collect()
}

fn main() {
    println!("=== SLCAN Quickstart ===\n");

    let mut bridge: Bridge<_, _> = Bridge::new(
        LoopbackController::default(),
        HostLink::default(),
        DeviceInfo::default(),
    );

    let script: [&[u8]; 8] = [
        b"V\r",
        b"N\r",
        b"S6\r",
        b"Z1\r",
        b"l\r",
        b"t1232CAFE\r",
        b"S4\r",
        b"C\r",
    ];

    for line in script {
        println!("host  > {}", printable(line));
        bridge.serial_mut().to_device.extend(line.iter().copied());
        while bridge.poll() {}
        let output = std::mem::take(&mut bridge.serial_mut().from_device);
        println!("device< {}\n", printable(&output));
    }

    println!("Final state: {:?}", bridge.state());
    println!("Frames dropped: {}", bridge.dropped_frames());
}
