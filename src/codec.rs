//! Vision sensor register map and the pure byte-level codec.
//!
//! Nothing in here touches the bus. All multi-byte values are little-endian.

use crate::messages::{
    ClassifierSignature, DetectedObject, LedMode, ObjectList, RgbColor, WhiteBalanceMode,
    MAX_OBJECTS,
};

// ---------------------------------------------------------------------------
// Register map
// ---------------------------------------------------------------------------

/// Device type reported by the device-info query for a vision sensor
pub const DEVICE_TYPE_VISION: u8 = 0x0B;

/// Object query: 2-byte signature or color code id (write)
pub const OBJECT_ID_REG: u8 = 0x24;
/// Object results: up to four 6-byte records (read)
pub const OBJECT_DATA_REG: u8 = 0x26;
/// Signature slot select, followed by the signature payload
pub const SIGNATURE_REG: u8 = 0xAF;
/// First payload byte of the selected signature
pub const SIGNATURE_DATA_REG: u8 = SIGNATURE_REG + 1;
pub const BRIGHTNESS_REG: u8 = 0xE2;
pub const WHITE_BALANCE_MODE_REG: u8 = 0xE3;
/// White-balance red, green and blue are contiguous from here
pub const WHITE_BALANCE_RED_REG: u8 = 0xE4;
/// LED brightness, red, green, blue are contiguous from here, LED mode follows
pub const LED_BRIGHTNESS_REG: u8 = 0xE7;
pub const LED_MODE_REG: u8 = 0xEB;

// ---------------------------------------------------------------------------
// Record sizes and limits
// ---------------------------------------------------------------------------

pub const OBJECT_RECORD_LEN: usize = 6;
/// First byte of an object record that marks the end of the list
pub const OBJECT_LIST_END: u8 = 0xFF;
/// Signature payload: range plus eight statistics
pub const SIGNATURE_PAYLOAD_LEN: usize = 4 + 8 * 4;
/// Slot id followed by the payload
pub const SIGNATURE_RECORD_LEN: usize = 1 + SIGNATURE_PAYLOAD_LEN;
pub const MAX_BRIGHTNESS: u8 = 100;

pub fn pack_i32_le(value: i32) -> [u8; 4] {
    value.to_le_bytes()
}

pub fn unpack_i32_le(buf: &[u8; 4]) -> i32 {
    i32::from_le_bytes(*buf)
}

/// Low byte then high byte of the requested id, `None` for ids that are not positive
pub fn pack_object_request(signature_id: i16) -> Option<[u8; 2]> {
    (signature_id > 0).then(|| signature_id.to_le_bytes())
}

/// Decode object records until `max_count` records, the end of `buf`, or an end marker.
///
/// Horizontal position and width arrive at half resolution and are doubled here.
pub fn decode_object_list(buf: &[u8], max_count: usize, requested_id: i16) -> ObjectList {
    let mut objects = ObjectList::new();
    for record in buf.chunks_exact(OBJECT_RECORD_LEN).take(max_count.min(MAX_OBJECTS)) {
        if record[0] == OBJECT_LIST_END {
            break;
        }
        objects.push(DetectedObject {
            signature_id: requested_id,
            x: record[0] as i16 * 2,
            y: record[1] as i16,
            width: record[2] as i16 * 2,
            height: record[3] as i16,
            angle: i16::from_le_bytes([record[4], record[5]]),
            total: 0,
        });
    }
    objects
}

pub fn encode_signature(sig: &ClassifierSignature) -> [u8; SIGNATURE_RECORD_LEN] {
    let mut buf = [0u8; SIGNATURE_RECORD_LEN];
    buf[0] = sig.id;
    // IEEE-754 bit pattern, not a numeric conversion
    buf[1..5].copy_from_slice(&pack_i32_le(sig.range.to_bits() as i32));

    let stats = [
        sig.u_min, sig.u_max, sig.u_mean, sig.v_min, sig.v_max, sig.v_mean, sig.m_rgb, sig.m_type,
    ];
    for (chunk, value) in buf[5..].chunks_exact_mut(4).zip(stats) {
        chunk.copy_from_slice(&pack_i32_le(value));
    }
    buf
}

pub fn decode_signature(buf: &[u8; SIGNATURE_RECORD_LEN]) -> ClassifierSignature {
    let mut payload = [0u8; SIGNATURE_PAYLOAD_LEN];
    payload.copy_from_slice(&buf[1..]);
    decode_signature_payload(buf[0], &payload)
}

/// Decode the payload read back from the sensor, the slot id is not part of it
pub fn decode_signature_payload(
    id: u8,
    payload: &[u8; SIGNATURE_PAYLOAD_LEN],
) -> ClassifierSignature {
    let field = |n: usize| {
        let mut word = [0u8; 4];
        word.copy_from_slice(&payload[n * 4..n * 4 + 4]);
        unpack_i32_le(&word)
    };

    ClassifierSignature {
        id,
        range: f32::from_bits(field(0) as u32),
        u_min: field(1),
        u_max: field(2),
        u_mean: field(3),
        v_min: field(4),
        v_max: field(5),
        v_mean: field(6),
        m_rgb: field(7),
        m_type: field(8),
    }
}

/// Manual-mode tag followed by red, green, blue
pub fn encode_white_balance(color: &RgbColor) -> [u8; 4] {
    [WhiteBalanceMode::Manual as u8, color.red, color.green, color.blue]
}

pub fn decode_white_balance(buf: &[u8; 3]) -> RgbColor {
    RgbColor::new(buf[0], buf[1], buf[2], 0)
}

/// Brightness (clamped), red, green, blue, then the manual LED mode tag
pub fn encode_led_color(color: &RgbColor) -> [u8; 5] {
    [
        color.brightness.min(MAX_BRIGHTNESS),
        color.red,
        color.green,
        color.blue,
        LedMode::Manual as u8,
    ]
}

pub fn decode_led_color(buf: &[u8; 4]) -> RgbColor {
    RgbColor::new(buf[1], buf[2], buf[3], buf[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(x: i16, y: i16, width: i16, height: i16, angle: i16) -> DetectedObject {
        DetectedObject { signature_id: 1, x, y, width, height, angle, total: 0 }
    }

    fn sample_signature() -> ClassifierSignature {
        ClassifierSignature {
            id: 3,
            range: 2.5,
            u_min: -4561,
            u_max: -3215,
            u_mean: -3888,
            v_min: 9081,
            v_max: 12145,
            v_mean: 10613,
            m_rgb: 0x00A0_3C28,
            m_type: i32::MIN,
        }
    }

    #[test]
    fn test_pack_i32_sign_extension() {
        assert_eq!(pack_i32_le(0x1234_5678), [0x78, 0x56, 0x34, 0x12]);
        assert_eq!(pack_i32_le(-2), [0xFE, 0xFF, 0xFF, 0xFF]);
        assert_eq!(unpack_i32_le(&[0xFE, 0xFF, 0xFF, 0xFF]), -2);
        assert_eq!(unpack_i32_le(&[0x00, 0x00, 0x00, 0x80]), i32::MIN);
    }

    #[test]
    fn test_object_request_packing() {
        assert_eq!(pack_object_request(1), Some([0x01, 0x00]));
        // Color code 0o123
        assert_eq!(pack_object_request(0o123), Some([0x53, 0x00]));
        assert_eq!(pack_object_request(0x0102), Some([0x02, 0x01]));
        assert_eq!(pack_object_request(0), None);
        assert_eq!(pack_object_request(-5), None);
    }

    #[test]
    fn test_decode_stops_at_end_marker() {
        #[rustfmt::skip]
        let buf = [
            10, 20, 5, 8, 0, 0,
            30, 1, 2, 3, 0, 1,
            0xFF, 0, 0, 0, 0, 0,
            40, 40, 40, 40, 0, 0,
        ];
        let objects = decode_object_list(&buf, 4, 1);
        assert_eq!(objects.len(), 2);
        assert_eq!(objects[0], object(20, 20, 10, 8, 0));
        assert_eq!(objects[1], object(60, 1, 4, 3, 256));
    }

    #[test]
    fn test_decode_leading_end_marker_is_empty() {
        let mut buf = [0x11u8; 24];
        buf[0] = OBJECT_LIST_END;
        assert!(decode_object_list(&buf, 4, 2).is_empty());
    }

    #[test]
    fn test_decode_respects_max_count_and_buffer() {
        #[rustfmt::skip]
        let buf = [
            1, 2, 3, 4, 0x67, 0x01,
            200, 2, 255, 4, 5, 0,
            7, 7, 7, 7, 0, 0,
        ];
        let objects = decode_object_list(&buf, 2, 9);
        assert_eq!(objects.len(), 2);
        assert_eq!(objects[0].angle, 359);
        assert_eq!(objects[1].x, 400);
        assert_eq!(objects[1].width, 510);
        assert!(objects.iter().all(|o| o.signature_id == 9));

        // Fewer bytes than records requested
        assert_eq!(decode_object_list(&buf[..12], 4, 9).len(), 2);
        // Requests beyond the hardware limit are capped
        assert_eq!(decode_object_list(&[0u8; 36], 6, 1).len(), MAX_OBJECTS);
    }

    #[test]
    fn test_signature_layout() {
        let sig = sample_signature();
        let buf = encode_signature(&sig);
        assert_eq!(buf.len(), 37);
        assert_eq!(buf[0], 3);
        assert_eq!(&buf[1..5], &2.5f32.to_bits().to_le_bytes());
        assert_eq!(&buf[5..9], &(-4561i32).to_le_bytes());
        assert_eq!(&buf[29..33], &[0x28, 0x3C, 0xA0, 0x00]);
        assert_eq!(&buf[33..37], &[0x00, 0x00, 0x00, 0x80]);
    }

    #[test]
    fn test_signature_round_trip_is_bit_exact() {
        for id in ClassifierSignature::MIN_ID..=ClassifierSignature::MAX_ID {
            let sig = ClassifierSignature { id, ..sample_signature() };
            let buf = encode_signature(&sig);
            assert_eq!(buf[0], id);
            assert_eq!(decode_signature(&buf), sig);
        }

        // Values that do not survive a numeric cast
        for range in [f32::MIN_POSITIVE / 2.0, -0.0, f32::NAN, 3.3e38] {
            let sig = ClassifierSignature { range, ..sample_signature() };
            let decoded = decode_signature(&encode_signature(&sig));
            assert_eq!(decoded.range.to_bits(), range.to_bits());
        }
    }

    #[test]
    fn test_color_encoding() {
        let color = RgbColor::new(10, 20, 30, 150);
        assert_eq!(encode_led_color(&color), [100, 10, 20, 30, 1]);
        assert_eq!(encode_white_balance(&color), [2, 10, 20, 30]);
        assert_eq!(decode_led_color(&[55, 1, 2, 3]), RgbColor::new(1, 2, 3, 55));
        assert_eq!(decode_white_balance(&[9, 8, 7]), RgbColor::new(9, 8, 7, 0));
    }
}
