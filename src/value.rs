//! The owned value tree (component model, spec §3) and its borrowing
//! counterpart, mirroring fog-pack's `Value`/`ValueRef` split
//! (`value.rs`/`value_ref.rs`) but over JXON's smaller value model: no
//! crypto types, no `Timestamp`, a single `Int(i64)` variant instead of
//! fog-pack's split `Integer`/`IntPriv`.

use std::collections::BTreeMap;

/// An owned JXON value tree.
///
/// `BigFloat` and arbitrary-width integers are recognized on the wire (see
/// [`crate::Error::Unsupported`]) but have no variant here: spec §9 permits
/// a conformant port to reject them outright, which this crate does.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Blob(Vec<u8>),
    Str(String),
    Array(Vec<Value>),
    /// Insertion-ordered key/value pairs. The wire format does not require
    /// sorted keys (unlike fog-pack's MessagePack-derived maps); order is
    /// preserved exactly as encoded, per spec §3.
    Object(Vec<(String, Value)>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_blob(&self) -> Option<&[u8]> {
        match self {
            Value::Blob(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&[(String, Value)]> {
        match self {
            Value::Object(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    /// Look up a key in an object, in encounter order. Returns `None` for
    /// any other variant, or if the key is absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(pairs) => pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// JSON-equivalence per spec §3's last invariant and §8 "Round-trip":
    /// NaN compares equal to NaN, floats otherwise compare bit-wise, blobs
    /// compare byte-wise, and object key order is ignored. A plain derived
    /// `PartialEq` cannot express the NaN rule without breaking reflexivity
    /// for ordinary float comparisons, so this is a separate method rather
    /// than an `impl PartialEq` override — see DESIGN.md's Open Question.
    pub fn json_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits() || (a.is_nan() && b.is_nan()),
            (Value::Blob(a), Value::Blob(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.json_eq(y))
            }
            (Value::Object(a), Value::Object(b)) => {
                if a.len() != b.len() {
                    return false;
                }
                let bm: BTreeMap<&str, &Value> = b.iter().map(|(k, v)| (k.as_str(), v)).collect();
                a.iter().all(|(k, v)| match bm.get(k.as_str()) {
                    Some(other_v) => v.json_eq(other_v),
                    None => false,
                })
            }
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Blob(v)
    }
}

/// A zero-copy borrowing view over a decode buffer, mirroring fog-pack's
/// `Value`/`ValueRef` split: `Str`/`Blob` borrow directly from the input
/// slice instead of allocating, which matters for read-only inspection of
/// large documents. Produced by [`crate::decode_ref`].
#[derive(Clone, Debug, PartialEq)]
pub enum ValueRef<'a> {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Blob(&'a [u8]),
    Str(&'a str),
    Array(Vec<ValueRef<'a>>),
    Object(Vec<(&'a str, ValueRef<'a>)>),
}

impl<'a> ValueRef<'a> {
    /// Convert to an owned [`Value`], copying any borrowed bytes/strings.
    pub fn to_owned(&self) -> Value {
        match self {
            ValueRef::Null => Value::Null,
            ValueRef::Bool(v) => Value::Bool(*v),
            ValueRef::Int(v) => Value::Int(*v),
            ValueRef::Float(v) => Value::Float(*v),
            ValueRef::Blob(v) => Value::Blob(v.to_vec()),
            ValueRef::Str(v) => Value::Str(v.to_string()),
            ValueRef::Array(v) => Value::Array(v.iter().map(ValueRef::to_owned).collect()),
            ValueRef::Object(v) => {
                Value::Object(v.iter().map(|(k, v)| (k.to_string(), v.to_owned())).collect())
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&ValueRef<'a>> {
        match self {
            ValueRef::Object(pairs) => pairs.iter().find(|(k, _)| *k == key).map(|(_, v)| v),
            _ => None,
        }
    }
}
