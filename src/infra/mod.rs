//! Low-level building blocks with no protocol knowledge.
pub mod codec;
