//! In-memory representation of a classic CAN frame as it travels between the
//! controller driver and the SLCAN wire format.
use embedded_can::{ExtendedId, Frame, Id, StandardId};

/// Largest payload of a classic CAN frame.
pub const MAX_DLC: u8 = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Canonical frame shared by the receive buffer, the encoder and the transmit path.
pub struct CanFrame {
    /// Raw identifier: 11 bits when standard, 29 bits when extended.
    pub id: u32,
    /// Extended (29-bit) identifier.
    pub is_extended: bool,
    /// Remote transmit request: `data` carries nothing.
    pub is_remote: bool,
    /// Data Length Code, always `<= 8`.
    pub dlc: u8,
    /// Payload buffer; the first `dlc` bytes are valid for data frames.
    pub data: [u8; 8],
    /// Reception timestamp supplied by the driver (wraps).
    pub timestamp: u16,
}

impl CanFrame {
    /// Data frame carrying `data` (truncated to eight bytes).
    pub fn data_frame(id: impl Into<Id>, data: &[u8]) -> Self {
        let (id, is_extended) = split_id(id.into());
        let dlc = data.len().min(MAX_DLC as usize);
        let mut payload = [0u8; 8];
        payload[..dlc].copy_from_slice(&data[..dlc]);
        Self {
            id,
            is_extended,
            is_remote: false,
            dlc: dlc as u8,
            data: payload,
            timestamp: 0,
        }
    }

    /// Remote frame requesting `dlc` bytes (clamped to eight).
    pub fn remote_frame(id: impl Into<Id>, dlc: u8) -> Self {
        let (id, is_extended) = split_id(id.into());
        Self {
            id,
            is_extended,
            is_remote: true,
            dlc: dlc.min(MAX_DLC),
            data: [0; 8],
            timestamp: 0,
        }
    }

    /// Same frame with a reception timestamp attached.
    pub fn with_timestamp(mut self, timestamp: u16) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Valid payload bytes (empty for remote frames).
    pub fn payload(&self) -> &[u8] {
        if self.is_remote {
            &[]
        } else {
            &self.data[..self.dlc.min(MAX_DLC) as usize]
        }
    }

    /// Typed identifier; out-of-range raw values are masked to the width of their kind.
    pub fn typed_id(&self) -> Id {
        if self.is_extended {
            Id::Extended(ExtendedId::new(self.id & 0x1FFF_FFFF).unwrap_or(ExtendedId::ZERO))
        } else {
            Id::Standard(StandardId::new((self.id & 0x7FF) as u16).unwrap_or(StandardId::ZERO))
        }
    }

    /// Copy any driver frame into the canonical representation.
    pub fn from_frame<F: Frame>(frame: &F, timestamp: u16) -> Self {
        let dlc = frame.dlc().min(MAX_DLC as usize) as u8;
        let mut converted = if frame.is_remote_frame() {
            Self::remote_frame(frame.id(), dlc)
        } else {
            Self::data_frame(frame.id(), frame.data())
        };
        converted.timestamp = timestamp;
        converted
    }

    /// Build the driver's frame type. `None` when the driver refuses the shape.
    pub fn to_frame<F: Frame>(&self) -> Option<F> {
        if self.is_remote {
            F::new_remote(self.typed_id(), self.dlc as usize)
        } else {
            F::new(self.typed_id(), self.payload())
        }
    }
}

fn split_id(id: Id) -> (u32, bool) {
    match id {
        Id::Standard(id) => (id.as_raw() as u32, false),
        Id::Extended(id) => (id.as_raw(), true),
    }
}

impl Frame for CanFrame {
    fn new(id: impl Into<Id>, data: &[u8]) -> Option<Self> {
        if data.len() > MAX_DLC as usize {
            return None;
        }
        Some(Self::data_frame(id, data))
    }

    fn new_remote(id: impl Into<Id>, dlc: usize) -> Option<Self> {
        if dlc > MAX_DLC as usize {
            return None;
        }
        Some(Self::remote_frame(id, dlc as u8))
    }

    fn is_extended(&self) -> bool {
        self.is_extended
    }

    fn is_remote_frame(&self) -> bool {
        self.is_remote
    }

    fn id(&self) -> Id {
        self.typed_id()
    }

    fn dlc(&self) -> usize {
        self.dlc as usize
    }

    fn data(&self) -> &[u8] {
        self.payload()
    }
}
