//! High-level components: CAN transport primitives (frame, receive ring,
//! hardware traits) and the SLCAN command/stream protocol built on them.
pub mod slcan;
pub mod transport;
