//! Public encode entry points and the `Encoder` that walks a [`Value`] tree
//! (component D, spec §4.4). Grounded on fog-pack's `FogSerializer`
//! (`ser.rs`): a struct holding whatever per-call state the wire format
//! needs, with a `Vec<u8>` output buffer built up by direct pushes rather
//! than going through a generic `std::io::Write`.

use crate::element::{self, Element};
use crate::error::{Error, Result};
use crate::key_table::KeyTable;
use crate::value::Value;

/// Encode a value with no key table. Equivalent to `encode_with_keys(value,
/// &[])` but infallible, since an empty key list can never overflow the
/// 128-entry table or contain a duplicate.
pub fn encode(value: &Value) -> Vec<u8> {
    let mut buf = Vec::new();
    let table = KeyTable::new();
    write_value(&mut buf, value, &table);
    buf
}

/// Encode a value, first emitting key-table bootstrap registrations for
/// `keys` in order (spec §4.4 "Key-table bootstrap"). Keys beyond the
/// 128-entry table (spec §3 invariants) are silently left unregistered —
/// their occurrences in `value` are then emitted as inline strings, same as
/// any key never in the table. Fails with [`Error::TypeError`] if `keys`
/// contains a duplicate, since registering the same conceptual key twice
/// would make later occurrences ambiguous between two indices.
pub fn encode_with_keys(value: &Value, keys: &[&str]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut table = KeyTable::new();
    for key in keys {
        if table.index_of(key).is_some() {
            return Err(Error::TypeError(format!("duplicate key in key table: {:?}", key)));
        }
        match table.register(key) {
            Some(index) => element::write_table_reg(&mut buf, key, index),
            None => break, // table full; spec §3: stop registering, keep encoding inline
        }
    }
    write_value(&mut buf, value, &table);
    Ok(buf)
}

fn write_value(buf: &mut Vec<u8>, value: &Value, table: &KeyTable) {
    match value {
        Value::Null => element::write_element(buf, &Element::Null),
        Value::Bool(b) => element::write_element(buf, &Element::Bool(*b)),
        Value::Int(i) => element::write_element(buf, &Element::Int(*i)),
        Value::Float(f) => element::write_element(buf, &Element::Float(*f)),
        Value::Blob(bytes) => element::write_element(buf, &Element::Blob(bytes)),
        Value::Str(s) => element::write_element(buf, &Element::Str(s)),
        Value::Array(items) => {
            element::write_element(buf, &Element::ArrayOpen);
            for item in items {
                write_value(buf, item, table);
            }
            element::write_element(buf, &Element::Close);
        }
        Value::Object(pairs) => {
            element::write_element(buf, &Element::ObjectOpen);
            for (key, val) in pairs {
                write_key(buf, key, table);
                write_value(buf, val, table);
            }
            element::write_element(buf, &Element::Close);
        }
    }
}

/// Write an object key: a one-byte table index if the key was registered
/// in the bootstrap table, else an inline string (spec §4.4 encoder side).
fn write_key(buf: &mut Vec<u8>, key: &str, table: &KeyTable) {
    match table.index_of(key) {
        Some(index) => buf.push(index as u8),
        None => element::write_element(buf, &Element::Str(key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_scalars() {
        assert_eq!(encode(&Value::Null), vec![0xF0]);
        assert_eq!(encode(&Value::Bool(false)), vec![0xF1]);
        assert_eq!(encode(&Value::Bool(true)), vec![0xF2]);
        assert_eq!(encode(&Value::Object(vec![])), vec![0xF3, 0xF5]);
        assert_eq!(encode(&Value::Array(vec![])), vec![0xF4, 0xF5]);
    }

    #[test]
    fn array_of_small_ints() {
        let v = Value::Array(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        assert_eq!(encode(&v), vec![0xF4, 0x81, 0x82, 0x83, 0xF5]);
    }

    #[test]
    fn object_with_inline_keys() {
        let v = Value::Object(vec![
            ("key1".into(), Value::Int(1)),
            ("key2".into(), Value::Str("string".into())),
        ]);
        let bytes = encode(&v);
        assert_eq!(bytes[0], 0xF3);
        assert_eq!(bytes[bytes.len() - 1], 0xF5);
        let inner = &bytes[1..bytes.len() - 1];
        let mut expected = Vec::new();
        expected.extend_from_slice(&[0xA4]);
        expected.extend_from_slice(b"key1");
        expected.push(0x00);
        expected.push(0x81);
        expected.push(0xA4);
        expected.extend_from_slice(b"key2");
        expected.push(0x00);
        expected.extend_from_slice(&[0xA6]);
        expected.extend_from_slice(b"string");
        expected.push(0x00);
        assert_eq!(inner, expected.as_slice());
    }

    #[test]
    fn blob_examples() {
        assert_eq!(encode(&Value::Blob(vec![])), vec![0x90]);
        assert_eq!(
            encode(&Value::Blob(vec![0x00, 0x01, 0x02, 0x03])),
            vec![0x94, 0x00, 0x01, 0x02, 0x03]
        );
    }

    #[test]
    fn key_table_worked_example() {
        let v = Value::Object(vec![
            ("k0".into(), Value::Int(1)),
            ("k1".into(), Value::Int(2)),
            ("k2".into(), Value::Int(3)),
        ]);
        let bytes = encode_with_keys(&v, &["k0", "k1"]).unwrap();

        // Two registration entries up front.
        let mut pos = 0;
        for (key, idx) in [("k0", 0u8), ("k1", 1u8)] {
            assert_eq!(bytes[pos] & 0xF0, 0xB0);
            pos += 1;
            pos += key.len();
            assert_eq!(bytes[pos], 0); // NUL
            pos += 1;
            assert_eq!(bytes[pos], idx);
            pos += 1;
        }

        assert_eq!(bytes[pos], 0xF3); // object open
        pos += 1;
        assert_eq!(bytes[pos], 0x00); // index 0 -> k0
        pos += 1;
        assert_eq!(bytes[pos], 0x81); // Int(1)
        pos += 1;
        assert_eq!(bytes[pos], 0x01); // index 1 -> k1
        pos += 1;
        assert_eq!(bytes[pos], 0x82); // Int(2)
        pos += 1;
        assert_eq!(bytes[pos], 0xA2); // inline string head, len 2, "k2"
        pos += 1;
        assert_eq!(&bytes[pos..pos + 2], b"k2");
        pos += 2;
        assert_eq!(bytes[pos], 0x00); // NUL
        pos += 1;
        assert_eq!(bytes[pos], 0x83); // Int(3)
        pos += 1;
        assert_eq!(bytes[pos], 0xF5); // close object
        pos += 1;
        assert_eq!(pos, bytes.len());
    }

    #[test]
    fn duplicate_supplied_key_is_an_error() {
        let v = Value::Null;
        assert!(encode_with_keys(&v, &["a", "a"]).is_err());
    }

    #[test]
    fn keys_past_128_fall_back_to_inline() {
        let keys: Vec<String> = (0..200).map(|i| format!("k{}", i)).collect();
        let key_refs: Vec<&str> = keys.iter().map(String::as_str).collect();
        let v = Value::Object(vec![("k150".into(), Value::Int(1))]);
        let bytes = encode_with_keys(&v, &key_refs).unwrap();
        // k150 was never registered (only the first 128 keys are), so its
        // key must appear inline further into the stream.
        assert!(bytes.windows(4).any(|w| w == b"k150"));
    }

    #[test]
    fn negative_one_special_case() {
        assert_eq!(encode(&Value::Int(-1)), vec![0x8F]);
    }
}
