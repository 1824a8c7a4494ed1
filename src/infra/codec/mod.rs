//! Text codecs used by the SLCAN wire format.
pub mod hex;
