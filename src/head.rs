//! Tag/length grammar: the head byte's low nibble, shared by integers and by
//! string/blob length fields. See spec §4.2.
//!
//! A head byte's high nibble selects the value family (see [`crate::element`]);
//! its low nibble is decoded here into either a small literal or a width
//! class for a following little-endian field.

use crate::cursor::Cursor;
use crate::error::{Error, Result};

pub(crate) const LOW_I8: u8 = 0xA;
pub(crate) const LOW_I16: u8 = 0xB;
pub(crate) const LOW_I32: u8 = 0xC;
pub(crate) const LOW_I64: u8 = 0xD;
pub(crate) const LOW_BIGINT: u8 = 0xE;
pub(crate) const LOW_NEG_ONE: u8 = 0xF;

/// Write a head byte (`high | low-nibble`) followed by whatever bytes the
/// chosen width class needs, picking the narrowest class that represents
/// `i` exactly (spec §4.2 encoder policy).
pub(crate) fn write_tagged(buf: &mut Vec<u8>, high: u8, i: i64) {
    debug_assert_eq!(high & 0x0F, 0);
    if (0..=9).contains(&i) {
        buf.push(high | (i as u8));
    } else if i == -1 {
        buf.push(high | LOW_NEG_ONE);
    } else if (i8::MIN as i64..=i8::MAX as i64).contains(&i) {
        buf.push(high | LOW_I8);
        buf.push(i as i8 as u8);
    } else if (i16::MIN as i64..=i16::MAX as i64).contains(&i) {
        buf.push(high | LOW_I16);
        buf.extend_from_slice(&(i as i16).to_le_bytes());
    } else if (i32::MIN as i64..=i32::MAX as i64).contains(&i) {
        buf.push(high | LOW_I32);
        buf.extend_from_slice(&(i as i32).to_le_bytes());
    } else {
        buf.push(high | LOW_I64);
        buf.extend_from_slice(&i.to_le_bytes());
    }
}

/// Decode the integer attached to a head byte whose low nibble is `low`,
/// given the already-consumed high nibble. Rejects any width class wider
/// than the narrowest one that could represent the decoded value (spec's
/// narrowest-encoding invariant, enforced the way fog-pack rejects
/// non-canonical MessagePack widths).
pub(crate) fn read_tagged(cursor: &mut Cursor, low: u8) -> Result<i64> {
    match low {
        0..=9 => Ok(low as i64),
        LOW_I8 => {
            let v = cursor.read_i8("decode Int8")? as i64;
            if (0..=9).contains(&v) || v == -1 {
                return Err(Error::Malformed(format!(
                    "Int8 encoding of {} is not the narrowest representation",
                    v
                )));
            }
            Ok(v)
        }
        LOW_I16 => {
            let v = cursor.read_i16("decode Int16")? as i64;
            if (-128..=127).contains(&v) {
                return Err(Error::Malformed(format!(
                    "Int16 encoding of {} is not the narrowest representation",
                    v
                )));
            }
            Ok(v)
        }
        LOW_I32 => {
            let v = cursor.read_i32("decode Int32")? as i64;
            if (-32768..=32767).contains(&v) {
                return Err(Error::Malformed(format!(
                    "Int32 encoding of {} is not the narrowest representation",
                    v
                )));
            }
            Ok(v)
        }
        LOW_I64 => {
            let v = cursor.read_i64("decode Int64")?;
            if (i32::MIN as i64..=i32::MAX as i64).contains(&v) {
                return Err(Error::Malformed(format!(
                    "Int64 encoding of {} is not the narrowest representation",
                    v
                )));
            }
            Ok(v)
        }
        LOW_BIGINT => Err(Error::Unsupported("BigInt")),
        LOW_NEG_ONE => Ok(-1),
        _ => unreachable!("low nibble is masked to 0..=0xF"),
    }
}

/// Like [`read_tagged`], but for a length field: the decoded value must be
/// non-negative (spec §4.2: "a decoder seeing a negative length MUST fail
/// with Malformed").
pub(crate) fn read_length(cursor: &mut Cursor, low: u8) -> Result<usize> {
    let v = read_tagged(cursor, low)?;
    usize::try_from(v).map_err(|_| Error::Malformed(format!("negative length field: {}", v)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(i: i64) -> (Vec<u8>, i64) {
        let mut buf = Vec::new();
        write_tagged(&mut buf, 0x80, i);
        let high = buf[0] & 0xF0;
        let low = buf[0] & 0x0F;
        assert_eq!(high, 0x80);
        let mut cursor = Cursor::new(&buf[1..]);
        let decoded = read_tagged(&mut cursor, low).unwrap();
        assert!(cursor.is_empty());
        (buf, decoded)
    }

    #[test]
    fn narrowest_width_table() {
        assert_eq!(roundtrip(0).0, vec![0x80]);
        assert_eq!(roundtrip(-1).0, vec![0x8F]);
        assert_eq!(roundtrip(10).0, vec![0x8A, 0x0A]);
        assert_eq!(roundtrip(127).0, vec![0x8A, 0x7F]);
        assert_eq!(roundtrip(128).0, vec![0x8B, 0x80, 0x00]);
    }

    #[test]
    fn full_range_roundtrip() {
        let cases = [
            0,
            9,
            10,
            -1,
            -2,
            i8::MIN as i64,
            i8::MAX as i64,
            i8::MIN as i64 - 1,
            i16::MIN as i64,
            i16::MAX as i64,
            i16::MAX as i64 + 1,
            i32::MIN as i64,
            i32::MAX as i64,
            i32::MAX as i64 + 1,
            i64::MIN,
            i64::MAX,
        ];
        for case in cases {
            let (_, decoded) = roundtrip(case);
            assert_eq!(decoded, case, "failed for {}", case);
        }
    }

    #[test]
    fn rejects_non_canonical_widths() {
        // 0x8A (Int8) carrying 5, which should have been a small literal.
        let mut cursor = Cursor::new(&[0x05]);
        assert!(read_tagged(&mut cursor, LOW_I8).is_err());
        // 0x8A carrying -1, which should have used the NegOne nibble.
        let mut cursor = Cursor::new(&[0xFF]);
        assert!(read_tagged(&mut cursor, LOW_I8).is_err());
        // 0x8B (Int16) carrying 100, which fits in Int8.
        let mut cursor = Cursor::new(&100i16.to_le_bytes());
        assert!(read_tagged(&mut cursor, LOW_I16).is_err());
    }

    #[test]
    fn bigint_is_unsupported() {
        let mut cursor = Cursor::new(&[]);
        match read_tagged(&mut cursor, LOW_BIGINT) {
            Err(Error::Unsupported(_)) => {}
            other => panic!("expected Unsupported, got {:?}", other),
        }
    }

    #[test]
    fn negative_length_is_malformed() {
        let mut buf = Vec::new();
        write_tagged(&mut buf, 0x90, -1);
        let low = buf[0] & 0x0F;
        let mut cursor = Cursor::new(&buf[1..]);
        match read_length(&mut cursor, low) {
            Err(Error::Malformed(_)) => {}
            other => panic!("expected Malformed, got {:?}", other),
        }
    }
}
