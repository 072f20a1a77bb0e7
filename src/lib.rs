//! JXON: a binary serialization format for JSON-compatible values extended
//! with byte blobs, exact rationals, and a per-document key-interning
//! table.
//!
//! This crate implements the core codec only — the encoder that maps a
//! [`Value`] tree to bytes, and the decoder that reconstructs a tree from
//! bytes. Three coupled concerns carry the bulk of the design: the
//! tag/length wire grammar that picks the narrowest representation of
//! integers and lengths ([`head`]), the IEEE-754 classification that
//! decides whether a float can be written as `binary32`, `binary64`, or
//! must fall back to the reserved big-float encoding ([`float`]), and the
//! key-table mechanism that lets objects substitute one-byte indices for
//! repeated string keys ([`key_table`]).
//!
//! ```
//! use jxon::Value;
//!
//! let value = Value::Object(vec![
//!     ("name".to_string(), Value::Str("jxon".to_string())),
//!     ("version".to_string(), Value::Int(1)),
//! ]);
//! let bytes = jxon::encode(&value);
//! let decoded = jxon::decode(&bytes).unwrap();
//! assert!(value.json_eq(&decoded));
//! ```

#![allow(dead_code)]

mod cursor;
mod decode;
mod depth;
mod element;
mod encode;
mod error;
mod float;
mod head;
mod key_table;
mod value;

pub use crate::decode::{decode, decode_ref, decode_with, DecodeOptions};
pub use crate::encode::{encode, encode_with_keys};
pub use crate::error::{Error, Result};
pub use crate::value::{Value, ValueRef};
