//! The [head](https://docs.microsoft.com/en-us/typography/opentype/spec/head) table

use types::{Fixed, LongDateTime, MajorMinor, Tag};

use crate::{
    font_data::FontData,
    read::{FontRead, ReadError},
    write::{dump_table, FontWrite, TableWriter},
};

/// 'head'
pub const TAG: Tag = Tag::new(b"head");

/// The value every `head` table stores in `magicNumber`.
pub const MAGIC_NUMBER: u32 = 0x5F0F3CF5;

/// The whole-file checksum plus `checksumAdjustment` must equal this value.
pub const CHECKSUM_MAGIC: u32 = 0xB1B0AFBA;

/// Byte position of `checksumAdjustment` within the table.
pub const CHECKSUM_ADJUSTMENT_OFFSET: usize = 8;

/// The [head](https://docs.microsoft.com/en-us/typography/opentype/spec/head)
/// (font header) table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Head {
    /// Version number of the font header table, set to (1, 0)
    pub version: MajorMinor,
    /// Set by font manufacturer.
    pub font_revision: Fixed,
    /// Adjustment that makes the whole-file checksum equal to
    /// [`CHECKSUM_MAGIC`].
    ///
    /// This is only meaningful in a file read from disk; the writer computes
    /// it from scratch and never stores the result back into the table.
    pub checksum_adjustment: u32,
    /// Set to 0x5F0F3CF5.
    pub magic_number: u32,
    pub flags: u16,
    /// Set to a value from 16 to 16384.
    pub units_per_em: u16,
    /// Number of seconds since 12:00 midnight that started January 1st
    /// 1904 in GMT/UTC time zone.
    pub created: LongDateTime,
    /// Number of seconds since 12:00 midnight that started January 1st
    /// 1904 in GMT/UTC time zone.
    pub modified: LongDateTime,
    pub x_min: i16,
    pub y_min: i16,
    pub x_max: i16,
    pub y_max: i16,
    pub mac_style: u16,
    /// Smallest readable size in pixels.
    pub lowest_rec_ppem: u16,
    /// Deprecated (Set to 2).
    pub font_direction_hint: i16,
    /// 0 for short offsets (Offset16), 1 for long (Offset32).
    pub index_to_loc_format: i16,
    /// 0 for current format.
    pub glyph_data_format: i16,
}

impl Head {
    /// The size of the table in bytes.
    pub const RAW_BYTE_LEN: usize = 54;

    /// The whole-file checksum implied by the stored adjustment.
    pub fn expected_checksum(&self) -> u32 {
        CHECKSUM_MAGIC.wrapping_sub(self.checksum_adjustment)
    }

    /// Encode the table with `checksumAdjustment` cleared to zero.
    ///
    /// These are the bytes that participate in the whole-file checksum.
    pub fn compile_for_checksum(&self) -> Vec<u8> {
        self.compile_with_adjustment(0)
    }

    /// Encode the table for output, given the whole-file checksum computed
    /// with the adjustment cleared.
    ///
    /// `self` is not modified.
    pub fn compile_with_checksum(&self, total_checksum: u32) -> Vec<u8> {
        self.compile_with_adjustment(checksum_adjustment(total_checksum))
    }

    fn compile_with_adjustment(&self, adjustment: u32) -> Vec<u8> {
        let mut bytes = dump_table(self);
        bytes[CHECKSUM_ADJUSTMENT_OFFSET..CHECKSUM_ADJUSTMENT_OFFSET + 4]
            .copy_from_slice(&adjustment.to_be_bytes());
        bytes
    }
}

/// Compute the `checksumAdjustment` for a whole-file checksum.
pub fn checksum_adjustment(total_checksum: u32) -> u32 {
    CHECKSUM_MAGIC.wrapping_sub(total_checksum)
}

impl Default for Head {
    fn default() -> Self {
        Head {
            version: MajorMinor::VERSION_1_0,
            font_revision: Fixed::default(),
            checksum_adjustment: 0,
            magic_number: MAGIC_NUMBER,
            flags: 0,
            units_per_em: 0,
            created: LongDateTime::default(),
            modified: LongDateTime::default(),
            x_min: 0,
            y_min: 0,
            x_max: 0,
            y_max: 0,
            mac_style: 0,
            lowest_rec_ppem: 0,
            font_direction_hint: 0,
            index_to_loc_format: 0,
            glyph_data_format: 0,
        }
    }
}

impl FontRead<'_> for Head {
    fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        if data.len() < Self::RAW_BYTE_LEN {
            return Err(ReadError::OutOfBounds);
        }
        if data.len() > Self::RAW_BYTE_LEN {
            log::warn!(
                "head table has {} trailing bytes, which will be dropped",
                data.len() - Self::RAW_BYTE_LEN
            );
        }
        let mut cursor = data.cursor();
        Ok(Head {
            version: cursor.read()?,
            font_revision: cursor.read()?,
            checksum_adjustment: cursor.read()?,
            magic_number: cursor.read()?,
            flags: cursor.read()?,
            units_per_em: cursor.read()?,
            created: cursor.read()?,
            modified: cursor.read()?,
            x_min: cursor.read()?,
            y_min: cursor.read()?,
            x_max: cursor.read()?,
            y_max: cursor.read()?,
            mac_style: cursor.read()?,
            lowest_rec_ppem: cursor.read()?,
            font_direction_hint: cursor.read()?,
            index_to_loc_format: cursor.read()?,
            glyph_data_format: cursor.read()?,
        })
    }
}

impl FontWrite for Head {
    fn write_into(&self, writer: &mut TableWriter) {
        self.version.write_into(writer);
        self.font_revision.write_into(writer);
        self.checksum_adjustment.write_into(writer);
        self.magic_number.write_into(writer);
        self.flags.write_into(writer);
        self.units_per_em.write_into(writer);
        self.created.write_into(writer);
        self.modified.write_into(writer);
        self.x_min.write_into(writer);
        self.y_min.write_into(writer);
        self.x_max.write_into(writer);
        self.y_max.write_into(writer);
        self.mac_style.write_into(writer);
        self.lowest_rec_ppem.write_into(writer);
        self.font_direction_hint.write_into(writer);
        self.index_to_loc_format.write_into(writer);
        self.glyph_data_format.write_into(writer);
    }
}

#[cfg(test)]
mod tests {
    use font_test_data::bebuffer::BeBuffer;

    use super::*;

    fn sample_head() -> BeBuffer {
        BeBuffer::new()
            .extend([1u16, 0]) // version
            .push(0x0002_8000u32) // fontRevision 2.5
            .push(0xDEADBEEFu32) // checksumAdjustment
            .push(MAGIC_NUMBER)
            .push(0x000Bu16) // flags
            .push(1000u16) // unitsPerEm
            .push(3_600_000_000i64) // created
            .push(3_700_000_000i64) // modified
            .extend([-50i16, -200, 950, 800])
            .push(0u16) // macStyle
            .push(8u16) // lowestRecPPEM
            .push(2i16) // fontDirectionHint
            .push(1i16) // indexToLocFormat
            .push(0i16) // glyphDataFormat
    }

    #[test]
    fn read_fields() {
        let buf = sample_head();
        assert_eq!(buf.len(), Head::RAW_BYTE_LEN);
        let head = Head::read(FontData::new(buf.as_slice())).unwrap();
        assert_eq!(head.version, MajorMinor::VERSION_1_0);
        assert_eq!(head.font_revision.to_f64(), 2.5);
        assert_eq!(head.checksum_adjustment, 0xDEADBEEF);
        assert_eq!(head.units_per_em, 1000);
        assert_eq!(head.created.as_secs(), 3_600_000_000);
        assert_eq!((head.x_min, head.y_max), (-50, 800));
        assert_eq!(head.index_to_loc_format, 1);
        assert_eq!(dump_table(&head), buf.as_slice());
    }

    #[test]
    fn truncated() {
        let buf = sample_head();
        let data = FontData::new(&buf.as_slice()[..53]);
        assert_eq!(Head::read(data), Err(ReadError::OutOfBounds));
    }

    #[test]
    fn checksum_helpers_do_not_mutate() {
        let buf = sample_head();
        let head = Head::read(FontData::new(buf.as_slice())).unwrap();
        assert_eq!(head.expected_checksum(), 0xB1B0AFBAu32.wrapping_sub(0xDEADBEEF));

        let zeroed = head.compile_for_checksum();
        assert_eq!(&zeroed[8..12], &[0, 0, 0, 0]);

        let out = head.compile_with_checksum(0x1234_5678);
        let adjustment = u32::from_be_bytes(out[8..12].try_into().unwrap());
        assert_eq!(adjustment.wrapping_add(0x1234_5678), CHECKSUM_MAGIC);
        assert_eq!(head.checksum_adjustment, 0xDEADBEEF);
    }
}
