//! The [WOFF 1.0] container
//!
//! Tables are stored one after another, each compressed with zlib when that
//! makes it smaller. The extended metadata and private data blocks are not
//! read.
//!
//! [WOFF 1.0]: https://www.w3.org/TR/WOFF/

use std::{borrow::Cow, collections::BTreeMap, io::Read};

use flate2::read::ZlibDecoder;
use types::{MajorMinor, Tag};

use super::{check_duplicates, finish, Parser};
use crate::{
    font::Font,
    font_data::{Cursor, FontData},
    read::ReadError,
};

const WOFF_HEADER_LEN: usize = 44;
const WOFF_ENTRY_LEN: usize = 20;

/// A record in the WOFF table directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct WoffEntry {
    tag: Tag,
    offset: u32,
    comp_length: u32,
    orig_length: u32,
    orig_checksum: u32,
}

impl WoffEntry {
    fn read(cursor: &mut Cursor) -> Result<Self, ReadError> {
        Ok(WoffEntry {
            tag: cursor.read()?,
            offset: cursor.read()?,
            comp_length: cursor.read()?,
            orig_length: cursor.read()?,
            orig_checksum: cursor.read()?,
        })
    }

    fn is_compressed(&self) -> bool {
        self.comp_length < self.orig_length
    }
}

/// Parse a WOFF file. The flavor becomes the scaler type of the font.
pub(super) fn parse_woff(parser: &Parser, file: FontData) -> Result<Font, ReadError> {
    if file.len() < WOFF_HEADER_LEN {
        return Err(ReadError::MalformedHeader("truncated WOFF header"));
    }
    let mut cursor = file.cursor();
    cursor.advance_by(4); // signature, checked by the caller
    let flavor: Tag = cursor.read()?;
    let length: u32 = cursor.read()?;
    let num_tables: u16 = cursor.read()?;
    cursor.advance_by(2); // reserved
    let total_sfnt_size: u32 = cursor.read()?;
    let version: MajorMinor = cursor.read()?;
    // metaOffset, metaLength, metaOrigLength, privOffset, privLength
    cursor.advance_by(20);

    log::debug!(
        "WOFF {version}, flavor {}, {num_tables} tables, {total_sfnt_size} bytes uncompressed",
        flavor.to_hex()
    );
    if length as usize != file.len() {
        log::warn!(
            "WOFF header gives a length of {length}, file has {} bytes",
            file.len()
        );
    }

    if cursor.remaining_bytes() < num_tables as usize * WOFF_ENTRY_LEN {
        return Err(ReadError::OutOfBounds);
    }
    let entries = (0..num_tables)
        .map(|_| WoffEntry::read(&mut cursor))
        .collect::<Result<Vec<_>, _>>()?;
    check_duplicates(entries.iter().map(|entry| entry.tag))?;

    let mut tables = BTreeMap::new();
    for entry in &entries {
        let data = table_data(file, entry)?;
        log::debug!(
            "table {} at {}, {} bytes ({} stored)",
            entry.tag,
            entry.offset,
            entry.orig_length,
            entry.comp_length
        );
        let table = parser.decode_table(entry.tag, FontData::new(&data), entry.orig_checksum)?;
        tables.insert(entry.tag, table);
    }
    finish(flavor, tables)
}

// the uncompressed bytes of one table
fn table_data<'a>(file: FontData<'a>, entry: &WoffEntry) -> Result<Cow<'a, [u8]>, ReadError> {
    let stored = file.slice_len(entry.offset as usize, entry.comp_length as usize)?;
    if entry.is_compressed() {
        inflate(entry.tag, stored.as_bytes(), entry.orig_length).map(Cow::Owned)
    } else {
        // a stored length longer than the original is tolerated
        stored
            .slice(..entry.orig_length as usize)
            .map(|data| Cow::Borrowed(data.as_bytes()))
            .ok_or(ReadError::OutOfBounds)
    }
}

/// Inflate a zlib stream that must decode to exactly `orig_length` bytes.
fn inflate(tag: Tag, stored: &[u8], orig_length: u32) -> Result<Vec<u8>, ReadError> {
    let mut data = Vec::new();
    // one extra byte is enough to detect a stream that is too long
    ZlibDecoder::new(stored)
        .take(orig_length as u64 + 1)
        .read_to_end(&mut data)
        .map_err(|e| ReadError::Decompression {
            tag,
            reason: e.to_string(),
        })?;
    if data.len() != orig_length as usize {
        return Err(ReadError::Decompression {
            tag,
            reason: format!(
                "expected {orig_length} bytes, inflated {}",
                data.len()
            ),
        });
    }
    Ok(data)
}
