//! `slcan-bridge` library: a `no_std` engine for the SLCAN (Lawicel) serial
//! line protocol. The crate exposes the infrastructure modules (hex codec),
//! the CAN transport primitives (frame model, receive ring, hardware traits)
//! and the SLCAN protocol itself (command interpreter, frame encoder, line
//! assembler and the bridge loop tying them together).
#![no_std]
//==================================================================================
/// Protocol constants and shared value types (channel state, bitrates, device info).
pub mod core;
/// Parse and driver errors raised while handling command lines.
pub mod error;
/// Low-level helpers: ASCII hexadecimal codec.
pub mod infra;
/// CAN transport primitives and the SLCAN protocol layer.
pub mod protocol;
//==================================================================================
