//! SLCAN line protocol: host command parsing and execution, frame-to-ASCII
//! encoding, byte-wise line assembly and the polling bridge.
pub mod bridge;
pub mod encoder;
pub mod interpreter;
pub mod line_assembler;
