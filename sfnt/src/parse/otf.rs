//! The plain sfnt table directory

use std::collections::BTreeMap;

use types::Tag;

use super::{check_duplicates, finish, is_sfnt_version, Parser};
use crate::{
    font::Font,
    font_builder::{SearchRange, TableRecord},
    font_data::{Cursor, FontData},
    read::ReadError,
};

const TABLE_RECORD_LEN: usize = 16;

/// Parse the sfnt whose directory starts at `directory_offset` in `file`.
///
/// Table offsets are relative to the start of `file`, which is the whole
/// collection when reading a collection member.
pub(super) fn parse_sfnt(
    parser: &Parser,
    file: FontData,
    directory_offset: usize,
) -> Result<Font, ReadError> {
    let directory = file
        .split_off(directory_offset)
        .ok_or(ReadError::OutOfBounds)?;
    let (scaler_type, records) = read_directory(directory)?;
    log::debug!(
        "sfnt directory at {directory_offset}: scaler type {}, {} tables",
        scaler_type.to_hex(),
        records.len()
    );
    check_duplicates(records.iter().map(|record| record.tag))?;

    let mut tables = BTreeMap::new();
    for record in &records {
        let data = file.slice_len(record.offset as usize, record.length as usize)?;
        log::debug!(
            "table {} at {}, {} bytes",
            record.tag,
            record.offset,
            record.length
        );
        let table = parser.decode_table(record.tag, data, record.checksum)?;
        tables.insert(record.tag, table);
    }
    finish(scaler_type, tables)
}

fn read_directory(directory: FontData) -> Result<(Tag, Vec<TableRecord>), ReadError> {
    let truncated = |_| ReadError::MalformedHeader("truncated sfnt header");
    let mut cursor = directory.cursor();
    let scaler_type: Tag = cursor.read().map_err(truncated)?;
    if !is_sfnt_version(scaler_type) {
        return Err(ReadError::UnsupportedFormat(scaler_type));
    }
    let num_tables: u16 = cursor.read().map_err(truncated)?;
    let search = SearchRange {
        search_range: cursor.read().map_err(truncated)?,
        entry_selector: cursor.read().map_err(truncated)?,
        range_shift: cursor.read().map_err(truncated)?,
    };
    let expected = SearchRange::compute(num_tables as usize, TABLE_RECORD_LEN);
    if search != expected {
        log::warn!("sfnt search fields are {search:?}, expected {expected:?}");
    }

    if cursor.remaining_bytes() < num_tables as usize * TABLE_RECORD_LEN {
        return Err(ReadError::OutOfBounds);
    }
    let records = (0..num_tables)
        .map(|_| read_record(&mut cursor))
        .collect::<Result<_, _>>()?;
    Ok((scaler_type, records))
}

fn read_record(cursor: &mut Cursor) -> Result<TableRecord, ReadError> {
    Ok(TableRecord {
        tag: cursor.read()?,
        checksum: cursor.read()?,
        offset: cursor.read()?,
        length: cursor.read()?,
    })
}
