//! Abstraction traits for the collaborators the bridge drives: the CAN
//! controller driver, the serial byte stream, and the loop timer.
pub mod can_driver;
pub mod loop_timer;
pub mod serial_port;
