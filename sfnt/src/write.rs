//! Writing big-endian data

use types::{
    BigEndian, FWord, Fixed, GlyphId16, LongDateTime, MajorMinor, NameId, Scalar, Tag, UfWord,
};

/// A type that that can be written out as part of a font file.
pub trait FontWrite {
    /// Write our data into this [TableWriter].
    fn write_into(&self, writer: &mut TableWriter);
}

/// An accumulator for the bytes of a single table.
#[derive(Debug, Default, Clone)]
pub struct TableWriter {
    data: Vec<u8>,
}

/// Serialize a table to bytes.
pub fn dump_table<T: FontWrite + ?Sized>(table: &T) -> Vec<u8> {
    let mut writer = TableWriter::default();
    table.write_into(&mut writer);
    writer.into_data()
}

impl TableWriter {
    /// Write raw bytes into this table.
    ///
    /// The caller is responsible for ensuring bytes are in big-endian order.
    #[inline]
    pub fn write_slice(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes)
    }

    /// Write `n` zero bytes.
    pub fn pad(&mut self, n: usize) {
        self.data.resize(self.data.len() + n, 0);
    }

    /// The number of bytes written so far.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// `true` if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Consume the writer, returning the bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

macro_rules! write_be_bytes {
    ($ty:ty) => {
        impl FontWrite for $ty {
            #[inline]
            fn write_into(&self, writer: &mut TableWriter) {
                writer.write_slice(&self.to_raw())
            }
        }
    };
}

write_be_bytes!(u8);
write_be_bytes!(i8);
write_be_bytes!(u16);
write_be_bytes!(i16);
write_be_bytes!(u32);
write_be_bytes!(i32);
write_be_bytes!(i64);
write_be_bytes!(Tag);
write_be_bytes!(Fixed);
write_be_bytes!(FWord);
write_be_bytes!(UfWord);
write_be_bytes!(GlyphId16);
write_be_bytes!(LongDateTime);
write_be_bytes!(MajorMinor);
write_be_bytes!(NameId);

impl<T: Scalar> FontWrite for BigEndian<T> {
    fn write_into(&self, writer: &mut TableWriter) {
        writer.write_slice(self.be_bytes())
    }
}

impl<T: FontWrite> FontWrite for [T] {
    fn write_into(&self, writer: &mut TableWriter) {
        self.iter().for_each(|item| item.write_into(writer))
    }
}

impl<T: FontWrite, const N: usize> FontWrite for [T; N] {
    fn write_into(&self, writer: &mut TableWriter) {
        self.as_slice().write_into(writer)
    }
}

impl<T: FontWrite> FontWrite for Vec<T> {
    fn write_into(&self, writer: &mut TableWriter) {
        self.as_slice().write_into(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_big_endian() {
        let mut writer = TableWriter::default();
        0x0102u16.write_into(&mut writer);
        (-2i16).write_into(&mut writer);
        Tag::new(b"head").write_into(&mut writer);
        [1u8, 2].write_into(&mut writer);
        writer.pad(2);
        assert_eq!(
            writer.into_data(),
            vec![1, 2, 0xFF, 0xFE, b'h', b'e', b'a', b'd', 1, 2, 0, 0]
        );
    }
}
