//! Writing a [`Font`] as an OpenType/TrueType file

use std::{borrow::Cow, io};

use types::Tag;

use crate::{
    error::Error,
    font::Font,
    read::ReadError,
    tables::{
        head::{self, checksum_adjustment, CHECKSUM_ADJUSTMENT_OFFSET},
        hhea, name, os2, Table, HMTX, MAXP,
    },
    write::{dump_table, FontWrite, TableWriter},
};

const TABLE_RECORD_LEN: usize = 16;
const TABLE_DIRECTORY_HEADER_LEN: usize = 12;

/// The values used to speed up binary searches of a table directory (or
/// any other sorted array).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchRange {
    pub search_range: u16,
    pub entry_selector: u16,
    pub range_shift: u16,
}

impl SearchRange {
    /// Compute the search fields for `n_items` items of `item_size` bytes.
    ///
    /// All three fields are zero for an empty array.
    pub fn compute(n_items: usize, item_size: usize) -> Self {
        if n_items == 0 {
            return Self::default();
        }
        let entry_selector = n_items.ilog2();
        let search_range = (1usize << entry_selector) * item_size;
        let range_shift = n_items * item_size - search_range;
        SearchRange {
            search_range: search_range as u16,
            entry_selector: entry_selector as u16,
            range_shift: range_shift as u16,
        }
    }
}

/// A record in the table directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableRecord {
    pub tag: Tag,
    pub checksum: u32,
    pub offset: u32,
    pub length: u32,
}

impl FontWrite for TableRecord {
    fn write_into(&self, writer: &mut TableWriter) {
        self.tag.write_into(writer);
        self.checksum.write_into(writer);
        self.offset.write_into(writer);
        self.length.write_into(writer);
    }
}

/// The [table directory](https://learn.microsoft.com/en-us/typography/opentype/spec/otff#table-directory)
/// at the start of a font file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableDirectory {
    pub sfnt_version: Tag,
    pub search: SearchRange,
    pub table_records: Vec<TableRecord>,
}

impl TableDirectory {
    /// Create a directory, computing the binary search fields.
    ///
    /// There must be no more than `u16::MAX` records.
    pub fn from_table_records(sfnt_version: Tag, table_records: Vec<TableRecord>) -> Self {
        TableDirectory {
            sfnt_version,
            search: SearchRange::compute(table_records.len(), TABLE_RECORD_LEN),
            table_records,
        }
    }
}

impl FontWrite for TableDirectory {
    fn write_into(&self, writer: &mut TableWriter) {
        self.sfnt_version.write_into(writer);
        (self.table_records.len() as u16).write_into(writer);
        self.search.search_range.write_into(writer);
        self.search.entry_selector.write_into(writer);
        self.search.range_shift.write_into(writer);
        self.table_records.write_into(writer);
    }
}

/// Calculate a checksum of the given table data.
///
/// This sums the data as big-endian u32 words; a trailing partial word is
/// padded with zeros.
pub fn compute_checksum(table: &[u8]) -> u32 {
    let mut sum = 0u32;
    let mut iter = table.chunks_exact(4);
    for quad in &mut iter {
        sum = sum.wrapping_add(u32::from_be_bytes([quad[0], quad[1], quad[2], quad[3]]));
    }
    let rem = iter.remainder();
    if !rem.is_empty() {
        let mut last = [0u8; 4];
        last[..rem.len()].copy_from_slice(rem);
        sum = sum.wrapping_add(u32::from_be_bytes(last));
    }
    sum
}

/// <https://github.com/google/woff2/blob/a0d0ed7da27b708c0a4e96ad7a998bddc933c06e/src/round.h#L19>
fn round4(sz: usize) -> usize {
    (sz + 3) & !3
}

/// The position of a table in written output: lower comes first.
///
/// A few tables are written first, in a fixed order that some platforms
/// expect; everything else follows in tag order.
pub fn output_priority(tag: Tag) -> u32 {
    match tag {
        MAXP => 0,
        head::TAG => 1,
        HMTX => 2,
        hhea::TAG => 3,
        os2::TAG => 4,
        name::TAG => 5,
        other => other.to_u32(),
    }
}

/// The order tables are written in.
pub fn output_order(tags: impl IntoIterator<Item = Tag>) -> Vec<Tag> {
    let mut tags: Vec<_> = tags.into_iter().collect();
    tags.sort_by_key(|tag| (output_priority(*tag), *tag));
    tags
}

// head bytes with checksumAdjustment cleared, or set for `total_checksum`
fn head_bytes(table: &Table, total_checksum: Option<u32>) -> Cow<'_, [u8]> {
    if let Table::Head(head) = table {
        return Cow::Owned(match total_checksum {
            Some(total) => head.compile_with_checksum(total),
            None => head.compile_for_checksum(),
        });
    }
    let adjustment = total_checksum.map(checksum_adjustment).unwrap_or(0);
    let mut bytes = table.to_bytes();
    let range = CHECKSUM_ADJUSTMENT_OFFSET..CHECKSUM_ADJUSTMENT_OFFSET + 4;
    match bytes.to_mut().get_mut(range) {
        Some(slot) => slot.copy_from_slice(&adjustment.to_be_bytes()),
        None => log::warn!("head table is too short to hold a checksum adjustment"),
    }
    bytes
}

fn too_large(what: &str) -> Error {
    Error::Io(io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("font has too many {what} to write"),
    ))
}

impl Font {
    /// Write the font in the OpenType (or TrueType) file format.
    ///
    /// Tables are laid out in [`output_order`], each padded to a four byte
    /// boundary, with fresh checksums and a fresh `checksumAdjustment` in the
    /// `head` table. The font itself is not modified.
    ///
    /// Returns the number of bytes written. Bytes are written as they are
    /// produced, so an error may leave a partial file behind.
    pub fn write_otf<W: io::Write>(&self, mut writer: W) -> Result<usize, Error> {
        if !self.has_table(head::TAG) {
            return Err(ReadError::TableIsMissing(head::TAG).into());
        }
        let order = output_order(self.tags());
        if order.len() > u16::MAX as usize {
            return Err(too_large("tables"));
        }

        let mut tables = Vec::with_capacity(order.len());
        for tag in &order {
            let Some(table) = self.table(*tag) else {
                continue;
            };
            let bytes = match *tag {
                head::TAG => head_bytes(table, None),
                _ => table.to_bytes(),
            };
            tables.push((*tag, table, bytes));
        }

        let mut position = TABLE_DIRECTORY_HEADER_LEN + TABLE_RECORD_LEN * tables.len();
        let mut table_records = Vec::with_capacity(tables.len());
        for (tag, _, bytes) in &tables {
            let offset = u32::try_from(position).map_err(|_| too_large("bytes"))?;
            let length = u32::try_from(bytes.len()).map_err(|_| too_large("bytes"))?;
            table_records.push(TableRecord {
                tag: *tag,
                checksum: compute_checksum(bytes),
                offset,
                length,
            });
            position += round4(bytes.len());
        }
        let directory = TableDirectory::from_table_records(self.scaler_type(), table_records);
        let directory_bytes = dump_table(&directory);

        // the checksum of the directory covers the header and every
        // record; head is included with a zero adjustment.
        let total_checksum = directory
            .table_records
            .iter()
            .fold(compute_checksum(&directory_bytes), |sum, record| {
                sum.wrapping_add(record.checksum)
            });
        log::debug!(
            "writing {} tables, checksum 0x{total_checksum:08X}, adjustment 0x{:08X}",
            tables.len(),
            checksum_adjustment(total_checksum)
        );

        writer.write_all(&directory_bytes)?;
        let mut written = directory_bytes.len();
        let padding = [0u8; 4];
        for (tag, table, bytes) in tables {
            let bytes = match tag {
                head::TAG => head_bytes(table, Some(total_checksum)),
                _ => bytes,
            };
            log::debug!("writing '{tag}' at {written}, {} bytes", bytes.len());
            writer.write_all(&bytes)?;
            let pad = round4(bytes.len()) - bytes.len();
            writer.write_all(&padding[..pad])?;
            written += bytes.len() + pad;
        }
        Ok(written)
    }

    /// Write the font in the OpenType format into a new buffer.
    pub fn to_otf_bytes(&self) -> Result<Vec<u8>, Error> {
        let mut buf = Vec::new();
        self.write_otf(&mut buf)?;
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use font_test_data::tables as test_tables;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use types::TT_SFNT_VERSION;

    use super::*;
    use crate::tables::{head::CHECKSUM_MAGIC, Opaque};

    #[rstest]
    #[case(0, (0, 0, 0))]
    #[case(1, (16, 0, 0))]
    #[case(2, (32, 1, 0))]
    #[case(9, (128, 3, 16))]
    #[case(0x16, (256, 4, 96))]
    fn search_range(#[case] n: usize, #[case] expected: (u16, u16, u16)) {
        let computed = SearchRange::compute(n, TABLE_RECORD_LEN);
        assert_eq!(
            (
                computed.search_range,
                computed.entry_selector,
                computed.range_shift
            ),
            expected
        );
    }

    #[test]
    fn checksum_trailing_bytes() {
        assert_eq!(compute_checksum(&[]), 0);
        assert_eq!(compute_checksum(&[0, 0, 0, 1, 0, 0, 0, 2]), 3);
        assert_eq!(compute_checksum(&[0, 0, 0, 1, 0xAB]), 0xAB00_0001);
        assert_eq!(compute_checksum(&[0xFF; 8]), 0xFFFF_FFFE);
    }

    #[test]
    fn pad4() {
        for i in 0..10 {
            let pad = round4(i) - i;
            assert!(pad < 4);
            assert!((i + pad) % 4 == 0, "pad {i} +{pad} bytes");
        }
    }

    #[test]
    fn output_order_puts_metrics_first() {
        let tags = ["zzzz", "name", "OS/2", "hhea", "hmtx", "head", "maxp", "GSUB", "cmap"]
            .map(|s| Tag::new_checked(s.as_bytes()).unwrap());
        let order: Vec<_> = output_order(tags).iter().map(Tag::to_string).collect();
        assert_eq!(
            order,
            ["maxp", "head", "hmtx", "hhea", "OS/2", "name", "GSUB", "cmap", "zzzz"]
        );
    }

    #[test]
    fn missing_head_is_an_error() {
        let mut font = Font::new(TT_SFNT_VERSION);
        font.remove_table(head::TAG);
        let err = font.to_otf_bytes().unwrap_err();
        assert!(matches!(
            err,
            Error::Read(ReadError::TableIsMissing(tag)) if tag == head::TAG
        ));
    }

    #[test]
    fn layout_and_checksum() {
        let mut font = Font::new(TT_SFNT_VERSION);
        font.add_table(MAXP, Opaque::new(test_tables::maxp().into_vec()));
        font.add_table(Tag::new(b"zzzz"), Opaque::new(vec![1, 2, 3, 4, 5]));
        let head_before = font.head().cloned();

        let mut buf = Vec::new();
        let written = font.write_otf(&mut buf).unwrap();
        assert_eq!(written, buf.len());
        assert_eq!(buf.len() % 4, 0);
        // directory: 12 + 3 * 16, then maxp, head, zzzz
        assert_eq!(&buf[..4], &[0, 1, 0, 0]);
        assert_eq!(&buf[4..12], &[0, 3, 0, 32, 0, 1, 0, 16]);
        assert_eq!(&buf[12..16], b"maxp");
        assert_eq!(&buf[28..32], b"head");
        assert_eq!(&buf[44..48], b"zzzz");
        // the last table is padded
        assert_eq!(&buf[buf.len() - 4..], &[5, 0, 0, 0]);
        assert_eq!(compute_checksum(&buf), CHECKSUM_MAGIC);
        // writing does not modify the font
        assert_eq!(font.head().cloned(), head_before);
    }

    #[test]
    fn opaque_head_is_patched() {
        let mut font = Font::new(TT_SFNT_VERSION);
        let mut head = test_tables::head().into_vec();
        head[8..12].copy_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);
        font.add_table(head::TAG, Opaque::new(head));
        let buf = font.to_otf_bytes().unwrap();
        assert_eq!(compute_checksum(&buf), CHECKSUM_MAGIC);
    }

    #[test]
    fn head_only() {
        let font = Font::new(TT_SFNT_VERSION);
        let buf = font.to_otf_bytes().unwrap();
        assert_eq!(buf.len(), 12 + 16 + 56);
        assert_eq!(compute_checksum(&buf), CHECKSUM_MAGIC);
    }
}
