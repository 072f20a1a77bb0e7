//! Byte cursor used by the decoder. Internal only — never heap-allocates.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{Error, Result};

/// A read cursor over an in-memory buffer. Every read either succeeds or
/// fails with [`Error::UnexpectedEnd`]; there is no panicking short read.
#[derive(Clone, Debug)]
pub(crate) struct Cursor<'a> {
    data: &'a [u8],
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Cursor<'a> {
        Cursor { data }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub(crate) fn remaining(&self) -> &'a [u8] {
        self.data
    }

    /// Peek at the next byte without consuming it.
    pub(crate) fn peek_u8(&self) -> Option<u8> {
        self.data.first().copied()
    }

    fn need(&self, step: &'static str, n: usize) -> Result<()> {
        if self.data.len() < n {
            Err(Error::UnexpectedEnd {
                step,
                needed: n,
                available: self.data.len(),
            })
        } else {
            Ok(())
        }
    }

    pub(crate) fn read_bytes(&mut self, step: &'static str, n: usize) -> Result<&'a [u8]> {
        self.need(step, n)?;
        let (bytes, rest) = self.data.split_at(n);
        self.data = rest;
        Ok(bytes)
    }

    pub(crate) fn read_u8(&mut self, step: &'static str) -> Result<u8> {
        Ok(self.read_bytes(step, 1)?[0])
    }

    pub(crate) fn read_i8(&mut self, step: &'static str) -> Result<i8> {
        Ok(self.read_u8(step)? as i8)
    }

    pub(crate) fn read_i16(&mut self, step: &'static str) -> Result<i16> {
        Ok(LittleEndian::read_i16(self.read_bytes(step, 2)?))
    }

    pub(crate) fn read_i32(&mut self, step: &'static str) -> Result<i32> {
        Ok(LittleEndian::read_i32(self.read_bytes(step, 4)?))
    }

    pub(crate) fn read_i64(&mut self, step: &'static str) -> Result<i64> {
        Ok(LittleEndian::read_i64(self.read_bytes(step, 8)?))
    }

    pub(crate) fn read_f32(&mut self, step: &'static str) -> Result<f32> {
        Ok(LittleEndian::read_f32(self.read_bytes(step, 4)?))
    }

    pub(crate) fn read_f64(&mut self, step: &'static str) -> Result<f64> {
        Ok(LittleEndian::read_f64(self.read_bytes(step, 8)?))
    }
}
