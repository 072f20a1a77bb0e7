//! Per-document key table (component D, spec §4.4): a bounded array of
//! strings, populated the first time each object key is written and
//! referenced by index on every later use of that key within the same
//! document.
//!
//! Grounded on the bootstrap-registration loop in `encode_dict` /
//! `decode_key_from_stream` in
//! `examples/original_source/python/jxon.py`; the 128-entry cap and the
//! 0xB0-family registration head follow spec §4.4 and §9's resolution of
//! the conflicting registration-head families in the source (`0xB0` wins,
//! matching the decoder).

use crate::error::{Error, Result};

/// Registration heads use the low nibble as a 4-bit index, so the table can
/// never exceed this many entries.
pub(crate) const MAX_ENTRIES: usize = 128;

/// Keys seen so far while encoding or decoding one document. Lives only for
/// the duration of a single `encode`/`decode` call; the spec gives it no
/// persistence across documents.
#[derive(Debug, Default)]
pub(crate) struct KeyTable {
    keys: Vec<String>,
}

impl KeyTable {
    pub(crate) fn new() -> KeyTable {
        KeyTable { keys: Vec::new() }
    }

    /// Look up an already-registered key, returning its index if present.
    pub(crate) fn index_of(&self, key: &str) -> Option<usize> {
        self.keys.iter().position(|k| k == key)
    }

    /// Register a new key, returning its index. Fails once the table is
    /// full; the caller then has no choice but to write the key inline on
    /// every use (spec §4.4: a full table is not an encoding error, just a
    /// missed chance to intern).
    pub(crate) fn register(&mut self, key: &str) -> Option<usize> {
        if self.keys.len() >= MAX_ENTRIES {
            return None;
        }
        self.keys.push(key.to_string());
        Some(self.keys.len() - 1)
    }

    /// Insert the key at a decoder-observed registration index. The source
    /// format numbers registrations in the order they occur, so this should
    /// always equal `self.keys.len()`; a mismatch means the stream
    /// registered the same conceptual slot twice or skipped one.
    pub(crate) fn insert_at(&mut self, index: usize, key: String) -> Result<()> {
        if index != self.keys.len() {
            return Err(Error::Malformed(format!(
                "key table registration at index {} but table has {} entries",
                index,
                self.keys.len()
            )));
        }
        if index >= MAX_ENTRIES {
            return Err(Error::Malformed(format!(
                "key table index {} exceeds the {}-entry limit",
                index, MAX_ENTRIES
            )));
        }
        self.keys.push(key);
        Ok(())
    }

    pub(crate) fn get(&self, index: usize) -> Result<&str> {
        self.keys
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| Error::Malformed(format!("key table index {} is out of range", index)))
    }

    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }
}

/// The zero-copy counterpart of [`KeyTable`], used by [`crate::decode_ref`]:
/// registration entries already borrow their key from the input buffer
/// (`Element::TableReg`'s `key: &'a str`), so there is no need to copy them
/// into an owned `String` just to satisfy the table's lifetime.
#[derive(Debug, Default)]
pub(crate) struct KeyTableRef<'a> {
    keys: Vec<&'a str>,
}

impl<'a> KeyTableRef<'a> {
    pub(crate) fn new() -> KeyTableRef<'a> {
        KeyTableRef { keys: Vec::new() }
    }

    pub(crate) fn insert_at(&mut self, index: usize, key: &'a str) -> Result<()> {
        if index != self.keys.len() {
            return Err(Error::Malformed(format!(
                "key table registration at index {} but table has {} entries",
                index,
                self.keys.len()
            )));
        }
        if index >= MAX_ENTRIES {
            return Err(Error::Malformed(format!(
                "key table index {} exceeds the {}-entry limit",
                index, MAX_ENTRIES
            )));
        }
        self.keys.push(key);
        Ok(())
    }

    pub(crate) fn get(&self, index: usize) -> Result<&'a str> {
        self.keys
            .get(index)
            .copied()
            .ok_or_else(|| Error::Malformed(format!("key table index {} is out of range", index)))
    }
}
