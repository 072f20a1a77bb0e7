//! Public decode entry points and the `Decoder` that reconstructs a
//! [`Value`]/[`ValueRef`] tree from bytes (component D, spec §4.4).
//! Grounded on fog-pack's `FogDeserializer`/`read_value` (`de.rs`,
//! `decode.rs`): recursive descent over a `Parser`, threading a
//! depth tracker and per-document key table through the recursion.

use crate::depth::{DepthTracker, DEFAULT_MAX_DEPTH};
use crate::element::{Element, KeyToken, Parser};
use crate::error::{Error, Result};
use crate::key_table::{KeyTable, KeyTableRef};
use crate::value::{Value, ValueRef};

/// Ambient configuration for decoding (spec §6, §5's depth limit, §4.4's
/// "SHOULD reject" duplicate-key guidance, §4.4's document-start JSON
/// fallback flag). Analogous to the parameter structs fog-pack threads
/// through its own (de)serializers.
#[derive(Clone, Debug)]
pub struct DecodeOptions {
    /// Try `serde_json` on input whose first byte fails the JXON heuristic
    /// (spec §4.4 "Document start"). Only takes effect when the
    /// `json-fallback` cargo feature is enabled; otherwise such input
    /// always fails with `Error::Malformed` regardless of this flag.
    pub allow_json_fallback: bool,
    /// Recursion/nesting depth ceiling (spec §5).
    pub max_depth: usize,
    /// Reject objects containing the same key twice (spec §4.4 SHOULD).
    /// When `false`, a later occurrence overwrites the earlier value,
    /// matching the spec's other permitted behavior.
    pub reject_duplicate_keys: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            allow_json_fallback: true,
            max_depth: DEFAULT_MAX_DEPTH,
            reject_duplicate_keys: true,
        }
    }
}

/// Decode one value with default options (json fallback on, depth 1000,
/// duplicate keys rejected).
pub fn decode(data: &[u8]) -> Result<Value> {
    decode_with(data, DecodeOptions::default())
}

/// Decode one value with explicit [`DecodeOptions`].
pub fn decode_with(data: &[u8], opts: DecodeOptions) -> Result<Value> {
    if let Some(value) = try_json_fallback(data, &opts)? {
        return Ok(value);
    }
    let mut decoder = Decoder::new(data, opts);
    let value = decoder.decode_value()?;
    if !decoder.parser.is_empty() {
        return Err(Error::Malformed("trailing data after top-level value".to_string()));
    }
    Ok(value)
}

/// Decode one value borrowing strings and blobs from `data` rather than
/// copying them (spec §3's "zero-copy" intent for read-only inspection).
/// Does not attempt the JSON fallback, since `serde_json::Value` would
/// need to own its strings anyway.
pub fn decode_ref(data: &[u8]) -> Result<ValueRef<'_>> {
    let mut decoder = Decoder::new(data, DecodeOptions::default());
    let value = decoder.decode_value_ref()?;
    if !decoder.parser.is_empty() {
        return Err(Error::Malformed("trailing data after top-level value".to_string()));
    }
    Ok(value)
}

fn is_jxon_heuristic_head(b: u8) -> bool {
    !((0x00..=0x7F).contains(&b) || (0xC0..=0xEF).contains(&b) || b == 0xFE || b == 0xFF)
}

#[cfg(feature = "json-fallback")]
fn try_json_fallback(data: &[u8], opts: &DecodeOptions) -> Result<Option<Value>> {
    let Some(&first) = data.first() else {
        return Ok(None);
    };
    if is_jxon_heuristic_head(first) || !opts.allow_json_fallback {
        return Ok(None);
    }
    let json: serde_json::Value = serde_json::from_slice(data).map_err(Error::from)?;
    Ok(Some(json_to_value(json)))
}

#[cfg(feature = "json-fallback")]
fn json_to_value(v: serde_json::Value) -> Value {
    match v {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else {
                Value::Float(n.as_f64().unwrap_or(0.0))
            }
        }
        serde_json::Value::String(s) => Value::Str(s),
        serde_json::Value::Array(items) => Value::Array(items.into_iter().map(json_to_value).collect()),
        serde_json::Value::Object(map) => {
            Value::Object(map.into_iter().map(|(k, v)| (k, json_to_value(v))).collect())
        }
    }
}

#[cfg(not(feature = "json-fallback"))]
fn try_json_fallback(data: &[u8], opts: &DecodeOptions) -> Result<Option<Value>> {
    let _ = opts;
    let _ = data;
    Ok(None)
}

struct Decoder<'a> {
    parser: Parser<'a>,
    table: KeyTable,
    ref_table: KeyTableRef<'a>,
    depth: DepthTracker,
    opts: DecodeOptions,
}

impl<'a> Decoder<'a> {
    fn new(data: &'a [u8], opts: DecodeOptions) -> Decoder<'a> {
        let depth = DepthTracker::new(opts.max_depth);
        Decoder {
            parser: Parser::new(data),
            table: KeyTable::new(),
            ref_table: KeyTableRef::new(),
            depth,
            opts,
        }
    }

    /// Read the next token, transparently applying and skipping any
    /// key-table registration entries encountered first (spec §4.4/§9:
    /// registrations do not themselves yield a value). Used by the owned
    /// `decode`/`decode_with` path.
    fn next_non_reg(&mut self) -> Result<Element<'a>> {
        loop {
            match self.parser.next_element()? {
                Element::TableReg { index, key } => {
                    self.table.insert_at(index, key.to_string())?;
                }
                other => return Ok(other),
            }
        }
    }

    /// As [`Decoder::next_non_reg`], but updates the zero-copy
    /// [`KeyTableRef`] for the `decode_ref` path.
    fn next_non_reg_ref(&mut self) -> Result<Element<'a>> {
        loop {
            match self.parser.next_element()? {
                Element::TableReg { index, key } => {
                    self.ref_table.insert_at(index, key)?;
                }
                other => return Ok(other),
            }
        }
    }

    fn decode_value(&mut self) -> Result<Value> {
        let elem = self.next_non_reg()?;
        self.element_to_value(elem)
    }

    fn element_to_value(&mut self, elem: Element<'a>) -> Result<Value> {
        match elem {
            Element::Null => Ok(Value::Null),
            Element::Bool(b) => Ok(Value::Bool(b)),
            Element::Int(i) => Ok(Value::Int(i)),
            Element::Float(f) => Ok(Value::Float(f)),
            Element::Blob(b) => Ok(Value::Blob(b.to_vec())),
            Element::Str(s) => Ok(Value::Str(s.to_string())),
            Element::ArrayOpen => self.decode_array(),
            Element::ObjectOpen => self.decode_object(),
            Element::Close => Err(Error::Malformed(
                "unexpected close byte where a value was expected".to_string(),
            )),
            Element::TableReg { .. } => unreachable!("filtered out by next_non_reg"),
        }
    }

    fn decode_array(&mut self) -> Result<Value> {
        self.depth.enter()?;
        let mut items = Vec::new();
        loop {
            let elem = self.next_non_reg()?;
            if matches!(elem, Element::Close) {
                break;
            }
            items.push(self.element_to_value(elem)?);
        }
        self.depth.exit();
        Ok(Value::Array(items))
    }

    fn decode_object(&mut self) -> Result<Value> {
        self.depth.enter()?;
        let mut pairs: Vec<(String, Value)> = Vec::new();
        loop {
            match self.parser.next_key_token()? {
                KeyToken::Close => break,
                KeyToken::Reg { index, key } => {
                    self.table.insert_at(index, key.to_string())?;
                }
                KeyToken::Index(idx) => {
                    let key = self.table.get(idx as usize)?.to_string();
                    let value = self.decode_value()?;
                    self.insert_pair(&mut pairs, key, value)?;
                }
                KeyToken::Inline(s) => {
                    let key = s.to_string();
                    let value = self.decode_value()?;
                    self.insert_pair(&mut pairs, key, value)?;
                }
            }
        }
        self.depth.exit();
        Ok(Value::Object(pairs))
    }

    fn insert_pair(&self, pairs: &mut Vec<(String, Value)>, key: String, value: Value) -> Result<()> {
        if let Some(slot) = pairs.iter_mut().find(|(k, _)| *k == key) {
            if self.opts.reject_duplicate_keys {
                return Err(Error::DuplicateKey(key));
            }
            slot.1 = value;
        } else {
            pairs.push((key, value));
        }
        Ok(())
    }

    // --- ValueRef (zero-copy) path -----------------------------------

    fn decode_value_ref(&mut self) -> Result<ValueRef<'a>> {
        let elem = self.next_non_reg_ref()?;
        self.element_to_value_ref(elem)
    }

    fn element_to_value_ref(&mut self, elem: Element<'a>) -> Result<ValueRef<'a>> {
        match elem {
            Element::Null => Ok(ValueRef::Null),
            Element::Bool(b) => Ok(ValueRef::Bool(b)),
            Element::Int(i) => Ok(ValueRef::Int(i)),
            Element::Float(f) => Ok(ValueRef::Float(f)),
            Element::Blob(b) => Ok(ValueRef::Blob(b)),
            Element::Str(s) => Ok(ValueRef::Str(s)),
            Element::ArrayOpen => self.decode_array_ref(),
            Element::ObjectOpen => self.decode_object_ref(),
            Element::Close => Err(Error::Malformed(
                "unexpected close byte where a value was expected".to_string(),
            )),
            Element::TableReg { .. } => unreachable!("filtered out by next_non_reg"),
        }
    }

    fn decode_array_ref(&mut self) -> Result<ValueRef<'a>> {
        self.depth.enter()?;
        let mut items = Vec::new();
        loop {
            let elem = self.next_non_reg_ref()?;
            if matches!(elem, Element::Close) {
                break;
            }
            items.push(self.element_to_value_ref(elem)?);
        }
        self.depth.exit();
        Ok(ValueRef::Array(items))
    }

    fn decode_object_ref(&mut self) -> Result<ValueRef<'a>> {
        self.depth.enter()?;
        let mut pairs: Vec<(&'a str, ValueRef<'a>)> = Vec::new();
        loop {
            match self.parser.next_key_token()? {
                KeyToken::Close => break,
                KeyToken::Reg { index, key } => {
                    self.ref_table.insert_at(index, key)?;
                }
                KeyToken::Index(idx) => {
                    let key = self.ref_table.get(idx as usize)?;
                    let value = self.decode_value_ref()?;
                    self.insert_pair_ref(&mut pairs, key, value)?;
                }
                KeyToken::Inline(s) => {
                    let value = self.decode_value_ref()?;
                    self.insert_pair_ref(&mut pairs, s, value)?;
                }
            }
        }
        self.depth.exit();
        Ok(ValueRef::Object(pairs))
    }

    fn insert_pair_ref(
        &self,
        pairs: &mut Vec<(&'a str, ValueRef<'a>)>,
        key: &'a str,
        value: ValueRef<'a>,
    ) -> Result<()> {
        if let Some(slot) = pairs.iter_mut().find(|(k, _)| *k == key) {
            if self.opts.reject_duplicate_keys {
                return Err(Error::DuplicateKey(key.to_string()));
            }
            slot.1 = value;
        } else {
            pairs.push((key, value));
        }
        Ok(())
    }
}
