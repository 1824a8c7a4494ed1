//! SLCAN command interpreter: parses one command line into a [`Command`],
//! checks it against the channel state machine, and applies it to the driver.
//!
//! State machine:
//!
//! ```text
//!            O / l               C
//!  Config ---------> Open  -----------> Config
//!  Config ---------> Listen -----------> Config
//!              L                 C
//! ```
//!
//! Every line yields exactly one status byte: `CR` on success, `BELL` on any
//! failure. A command either applies completely or not at all: all of its
//! fields are decoded before the first driver call.
use embedded_can::{ExtendedId, Id, StandardId};

use crate::core::{
    remap_error_flags, BitTiming, Bitrate, BusMode, ChannelState, DeviceInfo, BELL, CR,
};
use crate::error::{CommandError, ParseError};
use crate::infra::codec::hex::{decode_hex, decode_hex_byte, encode_hex_byte};
use crate::protocol::transport::can_frame::{CanFrame, MAX_DLC};
use crate::protocol::transport::traits::can_driver::CanDriver;

/// Longest reply: `N` + four serial characters + status byte.
pub const MAX_REPLY_LEN: usize = 8;

//==================================================================================REPLY
/// Bytes written back to the host for one command line: optional payload
/// followed by exactly one status byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reply {
    bytes: [u8; MAX_REPLY_LEN],
    len: usize,
}

impl Reply {
    /// Bare error reply (`BELL`, no payload).
    pub fn error() -> Self {
        let mut reply = Self::empty();
        reply.push(BELL);
        reply
    }

    /// Bare success reply (`CR`, no payload).
    pub fn ok() -> Self {
        Self::empty().terminated()
    }

    const fn empty() -> Self {
        Self {
            bytes: [0; MAX_REPLY_LEN],
            len: 0,
        }
    }

    fn push(&mut self, byte: u8) {
        if self.len < MAX_REPLY_LEN {
            self.bytes[self.len] = byte;
            self.len += 1;
        }
    }

    fn push_hex_byte(&mut self, value: u8) {
        for digit in encode_hex_byte(value) {
            self.push(digit);
        }
    }

    fn terminated(mut self) -> Self {
        self.push(CR);
        self
    }

    /// Everything to write to the serial port, status byte included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Bytes preceding the status byte.
    pub fn payload(&self) -> &[u8] {
        &self.bytes[..self.len.saturating_sub(1)]
    }

    /// The status byte: `CR` or `BELL`.
    pub fn status(&self) -> u8 {
        self.len
            .checked_sub(1)
            .map(|last| self.bytes[last])
            .unwrap_or(BELL)
    }

    #[inline]
    pub fn is_ok(&self) -> bool {
        self.status() == CR
    }
}

//==================================================================================COMMAND
/// A decoded command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// `Sn`: standard bitrate preset.
    SetBitrate(Bitrate),
    /// `sxxyyzz`: raw CNF1/CNF2/CNF3.
    SetBitTiming(BitTiming),
    /// `Gaa`: read a controller register.
    ReadRegister { address: u8 },
    /// `Waadd`: write a controller register.
    WriteRegister { address: u8, value: u8 },
    /// `V`
    HardwareVersion,
    /// `v`
    FirmwareVersion,
    /// `N`
    SerialNumber,
    /// `O`
    Open,
    /// `l`
    OpenLoopback,
    /// `L`
    OpenListenOnly,
    /// `C`
    Close,
    /// `t`, `T`, `r`, `R`
    Transmit(CanFrame),
    /// `F`
    ReadStatusFlags,
    /// `Zn`
    SetTimestamping(bool),
    /// `mxxxxxxxx`
    SetFilterMask([u8; 4]),
    /// `Mxxxxxxxx`
    SetFilterCode([u8; 4]),
}

/// Remainder of `line` from `offset`, empty when the line is shorter.
#[inline]
fn field(line: &[u8], offset: usize) -> &[u8] {
    line.get(offset..).unwrap_or(&[])
}

fn parse_bytes<const N: usize>(line: &[u8], offset: usize) -> Result<[u8; N], ParseError> {
    let mut out = [0u8; N];
    for (index, slot) in out.iter_mut().enumerate() {
        *slot = decode_hex_byte(field(line, offset + 2 * index))?;
    }
    Ok(out)
}

/// Decode a `t`/`T`/`r`/`R` line. DLC values above 8 are clamped.
fn parse_frame(line: &[u8]) -> Result<CanFrame, ParseError> {
    let tag = line.first().copied().ok_or(ParseError::UnknownCommand)?;
    let is_remote = matches!(tag, b'r' | b'R');
    let is_extended = tag.is_ascii_uppercase();
    let id_digits = if is_extended { 8 } else { 3 };

    let raw_id = decode_hex(field(line, 1), id_digits)?;
    let id: Id = if is_extended {
        ExtendedId::new(raw_id).ok_or(ParseError::OutOfRange)?.into()
    } else {
        StandardId::new(raw_id as u16)
            .ok_or(ParseError::OutOfRange)?
            .into()
    };

    let dlc = decode_hex(field(line, 1 + id_digits), 1)? as u8;
    if is_remote {
        return Ok(CanFrame::remote_frame(id, dlc));
    }

    let len = dlc.min(MAX_DLC) as usize;
    let mut data = [0u8; 8];
    for (index, byte) in data[..len].iter_mut().enumerate() {
        *byte = decode_hex_byte(field(line, 2 + id_digits + 2 * index))?;
    }
    Ok(CanFrame::data_frame(id, &data[..len]))
}

impl Command {
    /// Decode one command line (terminator excluded).
    pub fn parse(line: &[u8]) -> Result<Self, ParseError> {
        let tag = line.first().copied().ok_or(ParseError::UnknownCommand)?;
        let command = match tag {
            b'S' => {
                let preset = decode_hex(field(line, 1), 1)? as u8;
                Command::SetBitrate(Bitrate::try_from(preset).map_err(|_| ParseError::OutOfRange)?)
            }
            b's' => {
                let [cnf1, cnf2, cnf3] = parse_bytes::<3>(line, 1)?;
                Command::SetBitTiming(BitTiming { cnf1, cnf2, cnf3 })
            }
            b'G' => Command::ReadRegister {
                address: decode_hex_byte(field(line, 1))?,
            },
            b'W' => {
                let [address, value] = parse_bytes::<2>(line, 1)?;
                Command::WriteRegister { address, value }
            }
            b'V' => Command::HardwareVersion,
            b'v' => Command::FirmwareVersion,
            b'N' => Command::SerialNumber,
            b'O' => Command::Open,
            b'l' => Command::OpenLoopback,
            b'L' => Command::OpenListenOnly,
            b'C' => Command::Close,
            b't' | b'T' | b'r' | b'R' => Command::Transmit(parse_frame(line)?),
            b'F' => Command::ReadStatusFlags,
            b'Z' => Command::SetTimestamping(decode_hex(field(line, 1), 1)? != 0),
            b'm' => Command::SetFilterMask(parse_bytes::<4>(line, 1)?),
            b'M' => Command::SetFilterCode(parse_bytes::<4>(line, 1)?),
            _ => return Err(ParseError::UnknownCommand),
        };
        Ok(command)
    }

    /// Whether the channel state machine accepts this command in `state`.
    pub fn allowed_in(&self, state: ChannelState) -> bool {
        match self {
            Command::SetBitrate(_)
            | Command::SetBitTiming(_)
            | Command::SetFilterMask(_)
            | Command::SetFilterCode(_)
            | Command::Open
            | Command::OpenLoopback
            | Command::OpenListenOnly => state == ChannelState::Config,
            Command::Close => state != ChannelState::Config,
            Command::Transmit(_) => state == ChannelState::Open,
            Command::ReadRegister { .. }
            | Command::WriteRegister { .. }
            | Command::HardwareVersion
            | Command::FirmwareVersion
            | Command::SerialNumber
            | Command::ReadStatusFlags
            | Command::SetTimestamping(_) => true,
        }
    }
}

//==================================================================================INTERPRETER
/// Owner of the channel state and the timestamping flag; nothing else mutates them.
#[derive(Debug, Clone)]
pub struct CommandInterpreter {
    state: ChannelState,
    timestamping: bool,
    /// Mode the controller was last opened with.
    mode: BusMode,
    device: DeviceInfo,
}

impl Default for CommandInterpreter {
    fn default() -> Self {
        Self::new(DeviceInfo::default())
    }
}

impl CommandInterpreter {
    /// Start closed (`Config`) with timestamping disabled.
    pub const fn new(device: DeviceInfo) -> Self {
        Self {
            state: ChannelState::Config,
            timestamping: false,
            mode: BusMode::Normal,
            device,
        }
    }

    #[inline]
    pub fn state(&self) -> ChannelState {
        self.state
    }

    /// Whether received frames carry a timestamp field.
    #[inline]
    pub fn timestamping(&self) -> bool {
        self.timestamping
    }

    /// Mode applied by the last successful `O`, `l` or `L`.
    #[inline]
    pub fn mode(&self) -> BusMode {
        self.mode
    }

    #[inline]
    pub fn device(&self) -> &DeviceInfo {
        &self.device
    }

    /// Execute one line and return the bytes to send back.
    pub fn execute<D: CanDriver>(&mut self, line: &[u8], driver: &mut D) -> Reply {
        match self.try_execute(line, driver) {
            Ok(reply) => reply,
            Err(_err) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("Command rejected: {}", defmt::Debug2Format(&_err));
                Reply::error()
            }
        }
    }

    /// Same as [`execute`](Self::execute) but keeps the failure reason.
    pub fn try_execute<D: CanDriver>(
        &mut self,
        line: &[u8],
        driver: &mut D,
    ) -> Result<Reply, CommandError<D::Error>> {
        let command = Command::parse(line)?;
        if !command.allowed_in(self.state) {
            return Err(ParseError::InvalidState.into());
        }
        self.apply(command, driver)
    }

    fn apply<D: CanDriver>(
        &mut self,
        command: Command,
        driver: &mut D,
    ) -> Result<Reply, CommandError<D::Error>> {
        let mut reply = Reply::empty();
        match command {
            Command::SetBitrate(bitrate) => {
                driver
                    .set_bitrate(bitrate)
                    .map_err(CommandError::DriverRejected)?;
            }
            Command::SetBitTiming(timing) => {
                driver
                    .set_custom_timing(timing)
                    .map_err(CommandError::DriverRejected)?;
            }
            Command::ReadRegister { address } => {
                let value = driver
                    .read_register(address)
                    .map_err(CommandError::DriverRejected)?;
                reply.push_hex_byte(value);
            }
            Command::WriteRegister { address, value } => {
                driver
                    .write_register(address, value)
                    .map_err(CommandError::DriverRejected)?;
            }
            Command::HardwareVersion => {
                let (major, minor) = self.device.hardware_version;
                reply.push(b'V');
                reply.push_hex_byte(major);
                reply.push_hex_byte(minor);
            }
            Command::FirmwareVersion => {
                let (major, minor) = self.device.firmware_version;
                reply.push(b'v');
                reply.push_hex_byte(major);
                reply.push_hex_byte(minor);
            }
            Command::SerialNumber => {
                reply.push(b'N');
                for byte in self.device.serial_number {
                    reply.push(byte);
                }
            }
            Command::Open => self.open(driver, BusMode::Normal, ChannelState::Open)?,
            Command::OpenLoopback => self.open(driver, BusMode::Loopback, ChannelState::Open)?,
            Command::OpenListenOnly => {
                self.open(driver, BusMode::ListenOnly, ChannelState::Listen)?
            }
            Command::Close => {
                driver.reset().map_err(CommandError::DriverRejected)?;
                self.transition(ChannelState::Config);
            }
            Command::Transmit(frame) => {
                driver
                    .try_transmit(&frame)
                    .map_err(CommandError::DriverRejected)?;
                reply.push(if frame.is_extended { b'Z' } else { b'z' });
            }
            Command::ReadStatusFlags => {
                let eflg = driver
                    .error_flags()
                    .map_err(CommandError::DriverRejected)?;
                reply.push(b'F');
                reply.push_hex_byte(remap_error_flags(eflg));
            }
            Command::SetTimestamping(enabled) => {
                self.timestamping = enabled;
            }
            Command::SetFilterMask(mask) => {
                driver
                    .set_filter_mask(mask)
                    .map_err(CommandError::DriverRejected)?;
            }
            Command::SetFilterCode(code) => {
                driver
                    .set_filter_code(code)
                    .map_err(CommandError::DriverRejected)?;
            }
        }
        Ok(reply.terminated())
    }

    /// Select `mode` and reset the controller into it.
    ///
    /// When the reset fails the previous mode is written back (best effort)
    /// so a refused open leaves the controller configured as before.
    fn open<D: CanDriver>(
        &mut self,
        driver: &mut D,
        mode: BusMode,
        next: ChannelState,
    ) -> Result<(), CommandError<D::Error>> {
        driver.set_mode(mode).map_err(CommandError::DriverRejected)?;
        if let Err(err) = driver.reset() {
            let _ = driver.set_mode(self.mode);
            return Err(CommandError::DriverRejected(err));
        }
        self.mode = mode;
        self.transition(next);
        Ok(())
    }

    fn transition(&mut self, next: ChannelState) {
        #[cfg(feature = "defmt")]
        defmt::info!("Channel {} -> {}", self.state, next);
        self.state = next;
    }
}
