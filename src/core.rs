//! Protocol-wide constants and the small value types shared by the
//! interpreter, the encoder, and the driver contract.

//==================================================================================WIRE_BYTES
/// Line terminator and success status byte.
pub const CR: u8 = b'\r';
/// Optional line feed following `CR`; ignored on input.
pub const LF: u8 = b'\n';
/// Generic error status byte.
pub const BELL: u8 = 0x07;

//==================================================================================DEVICE_DEFAULTS
pub const VERSION_HARDWARE_MAJOR: u8 = 1;
pub const VERSION_HARDWARE_MINOR: u8 = 0;
pub const VERSION_FIRMWARE_MAJOR: u8 = 1;
pub const VERSION_FIRMWARE_MINOR: u8 = 7;
/// Placeholder reported by `N` when the firmware has no serial number to offer.
pub const SERIAL_NUMBER_PLACEHOLDER: [u8; 4] = *b"FFFF";

/// Default number of received frames buffered before new ones are dropped.
pub const CANMSG_BUFFERSIZE: usize = 8;
/// Default maximum length of a command line, terminator excluded.
pub const LINE_MAXLEN: usize = 64;

//==================================================================================CHANNEL_STATE
/// State of the CAN channel as seen by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelState {
    /// Channel closed; bitrate, timing and filters may be changed.
    #[default]
    Config,
    /// Channel open for reception and transmission.
    Open,
    /// Channel open in listen-only mode: receive, never transmit.
    Listen,
}

/// Operating mode requested from the CAN controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusMode {
    Normal,
    Loopback,
    ListenOnly,
}

//==================================================================================BITRATE
/// The nine standard bitrates selectable with `S0`..`S8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bitrate {
    Kbit10,
    Kbit20,
    Kbit50,
    Kbit100,
    Kbit125,
    Kbit250,
    Kbit500,
    Kbit800,
    Mbit1,
}

impl Bitrate {
    /// Bus speed in bits per second.
    pub const fn bits_per_second(self) -> u32 {
        match self {
            Bitrate::Kbit10 => 10_000,
            Bitrate::Kbit20 => 20_000,
            Bitrate::Kbit50 => 50_000,
            Bitrate::Kbit100 => 100_000,
            Bitrate::Kbit125 => 125_000,
            Bitrate::Kbit250 => 250_000,
            Bitrate::Kbit500 => 500_000,
            Bitrate::Kbit800 => 800_000,
            Bitrate::Mbit1 => 1_000_000,
        }
    }

    /// Preset digit used on the wire (`0`..=`8`).
    pub const fn preset(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Bitrate {
    type Error = u8;

    fn try_from(preset: u8) -> Result<Self, Self::Error> {
        match preset {
            0 => Ok(Bitrate::Kbit10),
            1 => Ok(Bitrate::Kbit20),
            2 => Ok(Bitrate::Kbit50),
            3 => Ok(Bitrate::Kbit100),
            4 => Ok(Bitrate::Kbit125),
            5 => Ok(Bitrate::Kbit250),
            6 => Ok(Bitrate::Kbit500),
            7 => Ok(Bitrate::Kbit800),
            8 => Ok(Bitrate::Mbit1),
            other => Err(other),
        }
    }
}

/// Raw bit timing registers (MCP2515 naming) supplied with the `s` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitTiming {
    pub cnf1: u8,
    pub cnf2: u8,
    pub cnf3: u8,
}

//==================================================================================STATUS_FLAGS
/// Bits of the `F` status byte reported to the host.
pub mod status_flags {
    pub const ERROR_WARNING: u8 = 0x04;
    pub const DATA_OVERRUN: u8 = 0x08;
    pub const ERROR_PASSIVE: u8 = 0x20;
    pub const BUS_ERROR: u8 = 0x80;
}

/// Remap the controller error flag register (MCP2515 `EFLG` layout) to the
/// status bits of the `F` reply.
pub const fn remap_error_flags(eflg: u8) -> u8 {
    let mut status = 0;
    if eflg & 0x01 != 0 {
        status |= status_flags::ERROR_WARNING;
    }
    if eflg & 0xC0 != 0 {
        status |= status_flags::DATA_OVERRUN;
    }
    if eflg & 0x18 != 0 {
        status |= status_flags::ERROR_PASSIVE;
    }
    if eflg & 0x20 != 0 {
        status |= status_flags::BUS_ERROR;
    }
    status
}

//==================================================================================DEVICE_INFO
/// Identity reported by `V`, `v` and `N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceInfo {
    /// Hardware version as (major, minor).
    pub hardware_version: (u8, u8),
    /// Firmware version as (major, minor).
    pub firmware_version: (u8, u8),
    /// Four ASCII characters sent verbatim after `N`.
    pub serial_number: [u8; 4],
}

impl Default for DeviceInfo {
    fn default() -> Self {
        Self {
            hardware_version: (VERSION_HARDWARE_MAJOR, VERSION_HARDWARE_MINOR),
            firmware_version: (VERSION_FIRMWARE_MAJOR, VERSION_FIRMWARE_MINOR),
            serial_number: SERIAL_NUMBER_PLACEHOLDER,
        }
    }
}
