//! The common header of the [GSUB] and [GPOS] tables
//!
//! The table is kept as an opaque span of bytes and written back exactly as
//! it was read. The header and the sizes of the three top-level lists are
//! decoded on a best-effort basis: a table with an unknown version or with
//! offsets outside the table still loads, it just has no [`LayoutHeader`].
//!
//! [GSUB]: https://docs.microsoft.com/en-us/typography/opentype/spec/gsub
//! [GPOS]: https://docs.microsoft.com/en-us/typography/opentype/spec/gpos

use types::{MajorMinor, Tag};

use crate::{
    font_data::FontData,
    read::{FontRead, ReadError},
    write::{FontWrite, TableWriter},
};

/// 'GSUB'
pub const GSUB_TAG: Tag = Tag::new(b"GSUB");
/// 'GPOS'
pub const GPOS_TAG: Tag = Tag::new(b"GPOS");

/// A GSUB or GPOS table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutTable {
    data: Vec<u8>,
    header: Option<LayoutHeader>,
}

/// The decoded header of a version 1.0 or 1.1 layout table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutHeader {
    /// (1, 0) or (1, 1)
    pub version: MajorMinor,
    pub script_list_offset: u16,
    pub feature_list_offset: u16,
    pub lookup_list_offset: u16,
    /// Present in version 1.1 tables with a non-null offset.
    pub feature_variations_offset: Option<u32>,
    pub script_count: u16,
    pub feature_count: u16,
    pub lookup_count: u16,
}

impl LayoutTable {
    /// Wrap raw table bytes, decoding the header if possible.
    pub fn new(data: Vec<u8>) -> Self {
        let header = match LayoutHeader::read(FontData::new(&data)) {
            Ok(header) => Some(header),
            Err(e) => {
                log::debug!("layout header not decoded: {e}");
                None
            }
        };
        LayoutTable { data, header }
    }

    /// The table bytes, as read.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// The header, if the table has a recognized version and its list
    /// offsets fall inside the table.
    pub fn header(&self) -> Option<&LayoutHeader> {
        self.header.as_ref()
    }
}

// each list starts with a u16 count; a null offset means an empty list
fn list_count(data: FontData, offset: u16) -> Result<u16, ReadError> {
    match offset {
        0 => Ok(0),
        offset => data.read_at(offset as usize),
    }
}

impl FontRead<'_> for LayoutHeader {
    fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let version: MajorMinor = cursor.read()?;
        if version != MajorMinor::VERSION_1_0 && version != MajorMinor::VERSION_1_1 {
            return Err(ReadError::MalformedData(format!(
                "unsupported layout table version {version}"
            )));
        }
        let script_list_offset = cursor.read()?;
        let feature_list_offset = cursor.read()?;
        let lookup_list_offset = cursor.read()?;
        let feature_variations_offset = match version {
            MajorMinor::VERSION_1_1 => Some(cursor.read::<u32>()?).filter(|off| *off != 0),
            _ => None,
        };
        Ok(LayoutHeader {
            version,
            script_list_offset,
            feature_list_offset,
            lookup_list_offset,
            feature_variations_offset,
            script_count: list_count(data, script_list_offset)?,
            feature_count: list_count(data, feature_list_offset)?,
            lookup_count: list_count(data, lookup_list_offset)?,
        })
    }
}

impl FontRead<'_> for LayoutTable {
    /// Never fails: bytes that are not a well-formed header are kept as is.
    fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        Ok(LayoutTable::new(data.as_bytes().to_vec()))
    }
}

impl FontWrite for LayoutTable {
    fn write_into(&self, writer: &mut TableWriter) {
        writer.write_slice(&self.data)
    }
}
