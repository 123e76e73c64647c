//! raw font bytes

use std::ops::{Bound, Range, RangeBounds};

use bytemuck::AnyBitPattern;
use types::{BigEndian, FixedSize, Scalar};

use crate::read::ReadError;

/// A reference to raw binary font data.
///
/// This is a wrapper around a byte slice, that provides convenience methods
/// for parsing and validating that data. Every read is bounds checked, and
/// fails with [`ReadError::OutOfBounds`] instead of panicking.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FontData<'a> {
    bytes: &'a [u8],
}

/// A cursor for validating bytes during parsing.
///
/// The cursor reads scalars in sequence, advancing past each one.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    pos: usize,
    data: FontData<'a>,
}

impl<'a> FontData<'a> {
    /// Empty data, useful for some tests and examples
    pub const EMPTY: FontData<'static> = FontData { bytes: &[] };

    /// Create a new `FontData` with these bytes.
    pub const fn new(bytes: &'a [u8]) -> Self {
        FontData { bytes }
    }

    /// The length of the data, in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// `true` if the data has a length of zero bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns self[pos..]
    pub fn split_off(&self, pos: usize) -> Option<FontData<'a>> {
        self.bytes.get(pos..).map(|bytes| FontData { bytes })
    }

    /// returns self[..pos], and updates self to = self[pos..];
    pub fn take_up_to(&mut self, pos: usize) -> Option<FontData<'a>> {
        if pos > self.len() {
            return None;
        }
        let (head, tail) = self.bytes.split_at(pos);
        self.bytes = tail;
        Some(FontData { bytes: head })
    }

    /// Return a sub-view of the data, or `None` if the range is out of bounds.
    pub fn slice(&self, range: impl RangeBounds<usize>) -> Option<FontData<'a>> {
        let bounds = (range.start_bound().cloned(), range.end_bound().cloned());
        self.bytes.get(bounds).map(|bytes| FontData { bytes })
    }

    /// Return the `len` bytes starting at `offset`.
    ///
    /// Offsets and lengths usually come straight from the file, so the end
    /// position is computed without overflow.
    pub fn slice_len(&self, offset: usize, len: usize) -> Result<FontData<'a>, ReadError> {
        let end = offset.checked_add(len).ok_or(ReadError::OutOfBounds)?;
        self.slice(offset..end).ok_or(ReadError::OutOfBounds)
    }

    /// Read a scalar at the provided location in the data.
    pub fn read_at<T: Scalar>(&self, offset: usize) -> Result<T, ReadError> {
        let end = offset
            .checked_add(T::RAW_BYTE_LEN)
            .ok_or(ReadError::OutOfBounds)?;
        self.bytes
            .get(offset..end)
            .and_then(T::read)
            .ok_or(ReadError::OutOfBounds)
    }

    /// Interpret the bytes in `range` as a slice of some type `T`.
    ///
    /// The range must be in bounds and its length must be a multiple of the
    /// size of `T`.
    pub fn read_array<T: AnyBitPattern + FixedSize>(
        &self,
        range: Range<usize>,
    ) -> Result<&'a [T], ReadError> {
        let bytes = self
            .bytes
            .get(range)
            .ok_or(ReadError::OutOfBounds)?;
        bytemuck::try_cast_slice(bytes).map_err(|_| ReadError::InvalidArrayLen)
    }

    /// Return a cursor positioned at the start of the data.
    pub fn cursor(&self) -> Cursor<'a> {
        Cursor {
            pos: 0,
            data: *self,
        }
    }

    /// Return the data as a byte slice
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

impl<'a> Cursor<'a> {
    /// Skip `n_bytes` without reading them.
    pub fn advance_by(&mut self, n_bytes: usize) {
        self.pos = self.pos.saturating_add(n_bytes);
    }

    /// Read a scalar and advance the cursor.
    pub fn read<T: Scalar>(&mut self) -> Result<T, ReadError> {
        let temp = self.data.read_at(self.pos);
        self.pos = self.pos.saturating_add(T::RAW_BYTE_LEN);
        temp
    }

    /// Read a scalar stored as big-endian bytes, without converting it.
    pub fn read_be<T: Scalar>(&mut self) -> Result<BigEndian<T>, ReadError> {
        let len = T::RAW_BYTE_LEN;
        let temp = self
            .data
            .slice_len(self.pos, len)
            .ok()
            .and_then(|data| BigEndian::from_slice(data.as_bytes()))
            .ok_or(ReadError::OutOfBounds);
        self.pos = self.pos.saturating_add(len);
        temp
    }

    /// Read `n_elem` items of `T` and advance the cursor.
    ///
    /// The byte length is checked against the remaining data before anything
    /// is returned, so a hostile count cannot cause an oversized read.
    pub fn read_array<T: AnyBitPattern + FixedSize>(
        &mut self,
        n_elem: usize,
    ) -> Result<&'a [T], ReadError> {
        let len = n_elem
            .checked_mul(T::RAW_BYTE_LEN)
            .ok_or(ReadError::OutOfBounds)?;
        let end = self.pos.checked_add(len).ok_or(ReadError::OutOfBounds)?;
        let temp = self.data.read_array(self.pos..end);
        self.pos = end;
        temp
    }

    /// Read `len` raw bytes and advance the cursor.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], ReadError> {
        let temp = self.data.slice_len(self.pos, len).map(|d| d.as_bytes());
        self.pos = self.pos.saturating_add(len);
        temp
    }

    /// The current position in the data.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The number of bytes between the current position and the end.
    pub fn remaining_bytes(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// The data after the current position.
    pub fn remaining(&self) -> FontData<'a> {
        self.data.split_off(self.pos).unwrap_or_default()
    }
}

impl AsRef<[u8]> for FontData<'_> {
    fn as_ref(&self) -> &[u8] {
        self.bytes
    }
}

impl<'a> From<&'a [u8]> for FontData<'a> {
    fn from(src: &'a [u8]) -> FontData<'a> {
        FontData::new(src)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_past_end_is_error() {
        let data = FontData::new(&[0, 1, 2, 3, 4]);
        assert_eq!(data.read_at::<u32>(0).unwrap(), 0x00010203);
        assert!(matches!(data.read_at::<u32>(2), Err(ReadError::OutOfBounds)));
        assert!(matches!(
            data.read_at::<u16>(usize::MAX),
            Err(ReadError::OutOfBounds)
        ));
        assert!(data.slice_len(usize::MAX, 2).is_err());
        assert!(data.slice_len(3, 3).is_err());
        assert_eq!(data.slice_len(3, 2).unwrap().as_bytes(), &[3, 4]);
    }

    #[test]
    fn cursor_arrays() {
        let data = FontData::new(&[0, 1, 0, 2, 0, 3, 0xff]);
        let mut cursor = data.cursor();
        let array: &[BigEndian<u16>] = cursor.read_array(3).unwrap();
        assert_eq!(
            array.iter().map(|x| x.get()).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(cursor.remaining_bytes(), 1);
        assert!(cursor.read_array::<BigEndian<u16>>(1).is_err());
        let mut cursor = data.cursor();
        assert!(cursor.read_array::<BigEndian<u32>>(usize::MAX).is_err());
    }
}
