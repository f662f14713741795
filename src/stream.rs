//! Byte stream primitives: little-endian integers, reversed hash fields and varints
//!
//! Varint layout (compact size):
//! - `0x00..=0xfc`: the byte itself
//! - `0xfd` + u16 LE
//! - `0xfe` + u32 LE
//! - `0xff` + u64 LE

use crate::error::{CodecError, Result};
use crate::types::{ByteString, Hash};

/// Cursor over a borrowed byte buffer
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Consume exactly `n` bytes as a borrowed slice
    pub fn read_slice(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(CodecError::UnexpectedEof {
                needed: n,
                remaining: self.remaining(),
            });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.read_slice(N)?);
        Ok(buf)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(i16::from_le_bytes(self.read_array()?))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(i64::from_le_bytes(self.read_array()?))
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<ByteString> {
        Ok(self.read_slice(n)?.to_vec())
    }

    pub fn read_bytes_reversed(&mut self, n: usize) -> Result<ByteString> {
        let mut bytes = self.read_bytes(n)?;
        bytes.reverse();
        Ok(bytes)
    }

    /// Read a 32-byte wire hash into display order
    pub fn read_hash(&mut self) -> Result<Hash> {
        let mut hash: Hash = self.read_array()?;
        hash.reverse();
        Ok(hash)
    }

    /// Read a varint; non-minimal encodings are accepted
    pub fn read_varint(&mut self) -> Result<u64> {
        match self.read_u8()? {
            0xfd => Ok(self.read_u16()? as u64),
            0xfe => Ok(self.read_u32()? as u64),
            0xff => self.read_u64(),
            n => Ok(n as u64),
        }
    }

    /// Read a varint length prefix followed by that many bytes
    pub fn read_var_bytes(&mut self) -> Result<ByteString> {
        let len = self.read_varint()?;
        // only fails where usize is narrower than u64; no buffer can hold it
        let len = usize::try_from(len).map_err(|_| CodecError::UnexpectedEof {
            needed: self.remaining().saturating_add(1),
            remaining: self.remaining(),
        })?;
        self.read_bytes(len)
    }

    pub fn read_hex(&mut self, n: usize) -> Result<String> {
        Ok(hex::encode(self.read_slice(n)?))
    }

    pub fn read_hex_reversed(&mut self, n: usize) -> Result<String> {
        Ok(hex::encode(self.read_bytes_reversed(n)?))
    }
}

/// Growable output buffer
#[derive(Debug, Clone, Default)]
pub struct Writer {
    buf: ByteString,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_bytes(self) -> ByteString {
        self.buf
    }

    pub fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    pub fn write_u16(&mut self, v: u16) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_i16(&mut self, v: i16) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_i32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_i64(&mut self, v: i64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_bytes_reversed(&mut self, bytes: &[u8]) {
        self.buf.extend(bytes.iter().rev());
    }

    /// Write a display-order hash in wire order
    pub fn write_hash(&mut self, hash: &Hash) {
        self.write_bytes_reversed(hash);
    }

    /// Write the minimal varint encoding of `n`
    pub fn write_varint(&mut self, n: u64) {
        match n {
            0..=0xfc => self.write_u8(n as u8),
            0xfd..=0xffff => {
                self.write_u8(0xfd);
                self.write_u16(n as u16);
            }
            0x10000..=0xffffffff => {
                self.write_u8(0xfe);
                self.write_u32(n as u32);
            }
            _ => {
                self.write_u8(0xff);
                self.write_u64(n);
            }
        }
    }

    /// Write a varint length prefix followed by the bytes
    pub fn write_var_bytes(&mut self, bytes: &[u8]) {
        self.write_varint(bytes.len() as u64);
        self.write_bytes(bytes);
    }

    pub fn write_hex(&mut self, s: &str) -> Result<()> {
        self.write_bytes(&hex::decode(s)?);
        Ok(())
    }

    pub fn write_hex_reversed(&mut self, s: &str) -> Result<()> {
        self.write_bytes_reversed(&hex::decode(s)?);
        Ok(())
    }
}

/// Size of the minimal varint encoding of `n`
pub fn varint_size(n: u64) -> usize {
    match n {
        0..=0xfc => 1,
        0xfd..=0xffff => 3,
        0x10000..=0xffffffff => 5,
        _ => 9,
    }
}
