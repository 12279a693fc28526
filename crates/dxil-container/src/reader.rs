//! Bounds-checked little-endian reads over a borrowed byte slice.

use thiserror::Error;

use crate::fourcc::FourCC;

/// A failed bounds-checked read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReadError {
    /// The requested range does not fit in the buffer.
    #[error("need {len} bytes at offset {offset}, but buffer length is {available}")]
    OutOfBounds {
        /// Start of the requested range.
        offset: usize,
        /// Length of the requested range.
        len: usize,
        /// Length of the buffer being read.
        available: usize,
    },
    /// `offset + len` overflows `usize`.
    #[error("range at offset {offset} with length {len} overflows")]
    Overflow {
        /// Start of the requested range.
        offset: usize,
        /// Length of the requested range.
        len: usize,
    },
    /// A C string runs off the end of the buffer.
    #[error("string at offset {offset} is missing a NUL terminator")]
    UnterminatedString {
        /// Start of the string.
        offset: usize,
    },
    /// A C string is not valid UTF-8.
    #[error("string at offset {offset} is not valid UTF-8")]
    InvalidUtf8 {
        /// Start of the string.
        offset: usize,
    },
}

/// Returns `bytes[offset..offset + len]`, checking for overflow and bounds.
pub fn slice_at(bytes: &[u8], offset: usize, len: usize) -> Result<&[u8], ReadError> {
    let end = offset
        .checked_add(len)
        .ok_or(ReadError::Overflow { offset, len })?;
    bytes.get(offset..end).ok_or(ReadError::OutOfBounds {
        offset,
        len,
        available: bytes.len(),
    })
}

/// Reads a little-endian `u32` at `offset`.
pub fn read_u32_le_at(bytes: &[u8], offset: usize) -> Result<u32, ReadError> {
    let s = slice_at(bytes, offset, 4)?;
    Ok(u32::from_le_bytes([s[0], s[1], s[2], s[3]]))
}

/// A forward-only cursor over a byte slice.
///
/// Reads never panic: each one validates the requested range first and leaves
/// the cursor untouched on failure.
#[derive(Debug, Clone, Copy)]
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Creates a cursor positioned at the start of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Creates a cursor over `bytes` positioned at `offset`.
    ///
    /// `offset == bytes.len()` is allowed and yields an empty cursor.
    pub fn at(bytes: &'a [u8], offset: usize) -> Result<Self, ReadError> {
        if offset > bytes.len() {
            return Err(ReadError::OutOfBounds {
                offset,
                len: 0,
                available: bytes.len(),
            });
        }
        Ok(Self { bytes, pos: offset })
    }

    /// Returns a new cursor over the same buffer positioned at `offset`.
    pub fn fork(&self, offset: usize) -> Result<Self, ReadError> {
        Self::at(self.bytes, offset)
    }

    /// The whole underlying buffer.
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Current offset from the start of the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left between the cursor and the end of the buffer.
    pub fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.pos)
    }

    /// Advances the cursor by `len` bytes.
    pub fn skip(&mut self, len: usize) -> Result<(), ReadError> {
        self.read_bytes(len).map(|_| ())
    }

    /// Reads `len` raw bytes.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], ReadError> {
        let out = slice_at(self.bytes, self.pos, len)?;
        self.pos += len;
        Ok(out)
    }

    /// Reads one byte.
    pub fn read_u8(&mut self) -> Result<u8, ReadError> {
        Ok(self.read_bytes(1)?[0])
    }

    /// Reads a little-endian `u16`.
    pub fn read_u16_le(&mut self) -> Result<u16, ReadError> {
        let s = self.read_bytes(2)?;
        Ok(u16::from_le_bytes([s[0], s[1]]))
    }

    /// Reads a little-endian `u32`.
    pub fn read_u32_le(&mut self) -> Result<u32, ReadError> {
        let s = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([s[0], s[1], s[2], s[3]]))
    }

    /// Reads a little-endian `u64`.
    pub fn read_u64_le(&mut self) -> Result<u64, ReadError> {
        let s = self.read_bytes(8)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(s);
        Ok(u64::from_le_bytes(raw))
    }

    /// Reads a four-character tag.
    pub fn read_fourcc(&mut self) -> Result<FourCC, ReadError> {
        let s = self.read_bytes(4)?;
        Ok(FourCC([s[0], s[1], s[2], s[3]]))
    }

    /// Reads a NUL-terminated UTF-8 string at an absolute buffer offset,
    /// without moving the cursor.
    pub fn read_cstring_at(&self, offset: usize) -> Result<&'a str, ReadError> {
        let tail = self.bytes.get(offset..).ok_or(ReadError::OutOfBounds {
            offset,
            len: 1,
            available: self.bytes.len(),
        })?;
        let nul = tail
            .iter()
            .position(|&b| b == 0)
            .ok_or(ReadError::UnterminatedString { offset })?;
        core::str::from_utf8(&tail[..nul]).map_err(|_| ReadError::InvalidUtf8 { offset })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_little_endian_fields_in_order() {
        let bytes = [1u8, 0x34, 0x12, 0x78, 0x56, 0x34, 0x12, 9, 0, 0, 0, 0, 0, 0, 0];
        let mut r = ByteReader::new(&bytes);
        assert_eq!(r.read_u8().unwrap(), 1);
        assert_eq!(r.read_u16_le().unwrap(), 0x1234);
        assert_eq!(r.read_u32_le().unwrap(), 0x1234_5678);
        assert_eq!(r.read_u64_le().unwrap(), 9);
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn failed_read_does_not_advance() {
        let bytes = [0u8; 3];
        let mut r = ByteReader::new(&bytes);
        assert_eq!(
            r.read_u32_le(),
            Err(ReadError::OutOfBounds {
                offset: 0,
                len: 4,
                available: 3
            })
        );
        assert_eq!(r.position(), 0);
        assert_eq!(r.read_u16_le().unwrap(), 0);
    }

    #[test]
    fn slice_at_rejects_overflowing_ranges() {
        let bytes = [0u8; 8];
        assert_eq!(
            slice_at(&bytes, usize::MAX, 2),
            Err(ReadError::Overflow {
                offset: usize::MAX,
                len: 2
            })
        );
    }

    #[test]
    fn cstrings_need_a_terminator() {
        let bytes = b"ab\0cd";
        let r = ByteReader::new(bytes);
        assert_eq!(r.read_cstring_at(0).unwrap(), "ab");
        assert_eq!(r.read_cstring_at(2).unwrap(), "");
        assert_eq!(
            r.read_cstring_at(3),
            Err(ReadError::UnterminatedString { offset: 3 })
        );
        assert!(r.read_cstring_at(9).is_err());
    }

    #[test]
    fn fork_allows_end_of_buffer_only() {
        let bytes = [0u8; 4];
        let r = ByteReader::new(&bytes);
        assert_eq!(r.fork(4).unwrap().remaining(), 0);
        assert!(r.fork(5).is_err());
    }
}
