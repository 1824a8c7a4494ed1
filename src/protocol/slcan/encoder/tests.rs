//! Encoder tests: exact character sequences, step skipping, and single-stepping.
use super::*;
use embedded_can::{ExtendedId, StandardId};

/// Drain a frame into a fixed buffer.
fn encode(frame: &CanFrame, timestamping: bool) -> ([u8; MAX_ENCODED_LEN], usize) {
    let mut out = [0u8; MAX_ENCODED_LEN];
    let mut len = 0;
    for byte in EncodedFrame::new(frame, timestamping) {
        out[len] = byte;
        len += 1;
    }
    (out, len)
}

fn std_id(raw: u16) -> StandardId {
    StandardId::new(raw).expect("valid standard id")
}

fn ext_id(raw: u32) -> ExtendedId {
    ExtendedId::new(raw).expect("valid extended id")
}

#[test]
/// Standard data frame, dlc 2, no timestamp: `t` + id + `2` + 4 digits + CR.
fn test_standard_data_frame() {
    let frame = CanFrame::data_frame(std_id(0x023), &[0xA0, 0xB0]);
    let (out, len) = encode(&frame, false);
    assert_eq!(&out[..len], b"t0232A0B0\r");
}

#[test]
/// Extended data frame with a full payload.
fn test_extended_data_frame() {
    let frame = CanFrame::data_frame(
        ext_id(0x1234_5678),
        &[0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88],
    );
    let (out, len) = encode(&frame, false);
    assert_eq!(&out[..len], b"T1234567881122334455667788\r");
}

#[test]
/// Remote frames keep the DLC digit but never emit payload digits.
fn test_remote_frames_skip_payload() {
    let frame = CanFrame::remote_frame(std_id(0x7FF), 5);
    let (out, len) = encode(&frame, false);
    assert_eq!(&out[..len], b"r7FF5\r");

    let frame = CanFrame::remote_frame(ext_id(0x0000_0ABC), 0);
    let (out, len) = encode(&frame, false);
    assert_eq!(&out[..len], b"R00000ABC0\r");
}

#[test]
/// Zero-length data frame goes straight from the DLC to the terminator.
fn test_empty_data_frame() {
    let frame = CanFrame::data_frame(std_id(0x100), &[]);
    let (out, len) = encode(&frame, false);
    assert_eq!(&out[..len], b"t1000\r");
}

#[test]
/// Timestamp is appended as four digits, high byte first.
fn test_timestamp_appended_when_enabled() {
    let frame = CanFrame::data_frame(std_id(0x123), &[0xFF]).with_timestamp(0xEA5F);
    let (out, len) = encode(&frame, true);
    assert_eq!(&out[..len], b"t1231FFEA5F\r");

    let frame = CanFrame::remote_frame(std_id(0x001), 0).with_timestamp(0x0102);
    let (out, len) = encode(&frame, true);
    assert_eq!(&out[..len], b"r00100102\r");
}

#[test]
/// Longest line fits the advertised bound.
fn test_max_encoded_len() {
    let frame = CanFrame::data_frame(ext_id(0x1FFF_FFFF), &[0xFF; 8]).with_timestamp(0xFFFF);
    let (_, len) = encode(&frame, true);
    assert_eq!(len, MAX_ENCODED_LEN);
}

#[test]
/// The cursor advances exactly one step per character and stops at `Finished`.
fn test_single_stepping() {
    let frame = CanFrame::data_frame(std_id(0x0AB), &[0x5C]);
    let mut cursor = EncodeCursor::new();
    assert!(cursor.is_idle());

    assert_eq!(cursor.next_char(&frame, false), b't');
    assert_eq!(cursor.step(), EncodeStep::Id(0));
    assert_eq!(cursor.next_char(&frame, false), b'0');
    assert_eq!(cursor.next_char(&frame, false), b'A');
    assert_eq!(cursor.next_char(&frame, false), b'B');
    assert_eq!(cursor.step(), EncodeStep::Dlc);
    assert_eq!(cursor.next_char(&frame, false), b'1');
    assert_eq!(cursor.step(), EncodeStep::Data(0));
    assert_eq!(cursor.next_char(&frame, false), b'5');
    assert_eq!(cursor.next_char(&frame, false), b'C');
    assert_eq!(cursor.step(), EncodeStep::Timestamp(0));
    assert!(!cursor.is_finished());
    assert_eq!(cursor.next_char(&frame, false), b'\r');
    assert!(cursor.is_finished());

    cursor.reset();
    assert!(cursor.is_idle());
}

#[test]
/// Two cursors can interleave over different frames without interfering.
fn test_interleaved_cursors() {
    let first = CanFrame::data_frame(std_id(0x001), &[]);
    let second = CanFrame::data_frame(std_id(0x002), &[]);
    let mut a = EncodeCursor::new();
    let mut b = EncodeCursor::new();

    let mut out_a = [0u8; 6];
    let mut out_b = [0u8; 6];
    for index in 0..6 {
        out_a[index] = a.next_char(&first, false);
        out_b[index] = b.next_char(&second, false);
    }
    assert_eq!(&out_a, b"t0010\r");
    assert_eq!(&out_b, b"t0020\r");
}
