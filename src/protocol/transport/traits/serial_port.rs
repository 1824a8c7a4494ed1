//! Non-blocking byte stream towards the host (USB CDC, UART…).

/// Contract of the serial transport. Every call must return immediately.
pub trait SerialPort {
    /// Next received byte, if one is available.
    fn read_byte(&mut self) -> Option<u8>;

    /// Queue one byte for transmission.
    fn write_byte(&mut self, byte: u8);

    /// Whether the transmit path can take another byte right now.
    ///
    /// Frame characters and host input are both held back while this is
    /// `false`. A command reply (at most eight bytes) is written in one go
    /// once its line completes, so the port must be able to queue that much
    /// after reporting `true`.
    fn is_writable(&self) -> bool {
        true
    }

    /// Queue every byte of `bytes`.
    fn write_all(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.write_byte(byte);
        }
    }
}
