//! Assemble sfnt, WOFF and TTC files from raw tables
//!
//! These builders write exactly what they are given: tables keep the order
//! they are passed in, and duplicates are not rejected, so tests can produce
//! malformed directories on purpose.

use std::io::Write;

use flate2::{write::ZlibEncoder, Compression};
use font_types::Tag;

const HEAD: Tag = Tag::new(b"head");

/// The sfnt checksum: a wrapping sum of big-endian u32 words, with a
/// trailing partial word padded with zeros.
pub fn checksum(data: &[u8]) -> u32 {
    data.chunks(4).fold(0u32, |sum, chunk| {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        sum.wrapping_add(u32::from_be_bytes(word))
    })
}

fn padded_len(len: usize) -> usize {
    (len + 3) & !3
}

fn search_fields(num_tables: usize) -> (u16, u16, u16) {
    if num_tables == 0 {
        return (0, 0, 0);
    }
    let entry_selector = num_tables.ilog2() as u16;
    let search_range = (1u16 << entry_selector) * 16;
    let range_shift = num_tables as u16 * 16 - search_range;
    (search_range, entry_selector, range_shift)
}

// checksum of a table as stored in the directory: for head, with
// checksumAdjustment zeroed.
fn table_checksum(tag: Tag, data: &[u8]) -> u32 {
    if tag == HEAD && data.len() >= 12 {
        let mut copy = data.to_vec();
        copy[8..12].fill(0);
        checksum(&copy)
    } else {
        checksum(data)
    }
}

fn write_directory(out: &mut Vec<u8>, scaler: u32, records: &[(Tag, u32, u32, u32)]) {
    let (search_range, entry_selector, range_shift) = search_fields(records.len());
    out.extend_from_slice(&scaler.to_be_bytes());
    out.extend_from_slice(&(records.len() as u16).to_be_bytes());
    out.extend_from_slice(&search_range.to_be_bytes());
    out.extend_from_slice(&entry_selector.to_be_bytes());
    out.extend_from_slice(&range_shift.to_be_bytes());
    for (tag, checksum, offset, length) in records {
        out.extend_from_slice(&tag.to_be_bytes());
        out.extend_from_slice(&checksum.to_be_bytes());
        out.extend_from_slice(&offset.to_be_bytes());
        out.extend_from_slice(&length.to_be_bytes());
    }
}

/// Build a plain sfnt file, with correct checksums and `checksumAdjustment`.
pub fn build_sfnt(scaler: u32, tables: &[(Tag, &[u8])]) -> Vec<u8> {
    let header_len = 12 + 16 * tables.len();
    let mut offset = header_len;
    let records: Vec<_> = tables
        .iter()
        .map(|(tag, data)| {
            let record = (
                *tag,
                table_checksum(*tag, data),
                offset as u32,
                data.len() as u32,
            );
            offset += padded_len(data.len());
            record
        })
        .collect();

    let mut out = Vec::with_capacity(offset);
    write_directory(&mut out, scaler, &records);
    let mut head_pos = None;
    for (tag, data) in tables {
        if *tag == HEAD && data.len() >= 12 {
            head_pos = Some(out.len());
        }
        out.extend_from_slice(data);
        out.resize(padded_len(out.len()), 0);
    }
    if let Some(pos) = head_pos {
        out[pos + 8..pos + 12].fill(0);
        let adjustment = 0xB1B0AFBAu32.wrapping_sub(checksum(&out));
        out[pos + 8..pos + 12].copy_from_slice(&adjustment.to_be_bytes());
    }
    out
}

/// Build a WOFF 1.0 file.
///
/// Each table is compressed when that makes it smaller, and stored as-is
/// otherwise.
pub fn build_woff(flavor: u32, tables: &[(Tag, &[u8])]) -> Vec<u8> {
    let compressed: Vec<Vec<u8>> = tables
        .iter()
        .map(|(_, data)| {
            let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
            encoder.write_all(data).unwrap();
            let packed = encoder.finish().unwrap();
            if packed.len() < data.len() {
                packed
            } else {
                data.to_vec()
            }
        })
        .collect();
    build_woff_with_payloads(flavor, tables, &compressed)
}

/// Build a WOFF 1.0 file with explicit stored payloads for each table.
///
/// `payloads[i]` is written as the (possibly compressed) data for
/// `tables[i]`, whose bytes give the original length and checksum.
pub fn build_woff_with_payloads(
    flavor: u32,
    tables: &[(Tag, &[u8])],
    payloads: &[Vec<u8>],
) -> Vec<u8> {
    const WOFF_HEADER_LEN: usize = 44;
    const WOFF_ENTRY_LEN: usize = 20;
    let mut offset = WOFF_HEADER_LEN + WOFF_ENTRY_LEN * tables.len();
    let mut entries = Vec::new();
    let mut total_sfnt_size = 12 + 16 * tables.len();
    for ((tag, data), payload) in tables.iter().zip(payloads) {
        entries.push((
            *tag,
            offset as u32,
            payload.len() as u32,
            data.len() as u32,
            table_checksum(*tag, data),
        ));
        offset += padded_len(payload.len());
        total_sfnt_size += padded_len(data.len());
    }

    let mut out = Vec::with_capacity(offset);
    out.extend_from_slice(b"wOFF");
    out.extend_from_slice(&flavor.to_be_bytes());
    out.extend_from_slice(&(offset as u32).to_be_bytes()); // length
    out.extend_from_slice(&(tables.len() as u16).to_be_bytes());
    out.extend_from_slice(&0u16.to_be_bytes()); // reserved
    out.extend_from_slice(&(total_sfnt_size as u32).to_be_bytes());
    out.extend_from_slice(&1u16.to_be_bytes()); // majorVersion
    out.extend_from_slice(&0u16.to_be_bytes()); // minorVersion
    out.extend_from_slice(&[0u8; 20]); // meta and private blocks
    for (tag, offset, comp_len, orig_len, orig_checksum) in &entries {
        out.extend_from_slice(&tag.to_be_bytes());
        out.extend_from_slice(&offset.to_be_bytes());
        out.extend_from_slice(&comp_len.to_be_bytes());
        out.extend_from_slice(&orig_len.to_be_bytes());
        out.extend_from_slice(&orig_checksum.to_be_bytes());
    }
    for payload in payloads {
        out.extend_from_slice(payload);
        out.resize(padded_len(out.len()), 0);
    }
    out
}

/// Build a TrueType collection.
///
/// Table offsets in each member directory are relative to the start of the
/// collection file. Tables are not shared between members.
pub fn build_ttc(fonts: &[(u32, Vec<(Tag, &[u8])>)]) -> Vec<u8> {
    let header_len = 12 + 4 * fonts.len();
    let directories_len: usize = fonts.iter().map(|(_, t)| 12 + 16 * t.len()).sum();
    let mut table_offset = header_len + directories_len;
    let mut dir_offset = header_len;

    let mut out = Vec::new();
    out.extend_from_slice(b"ttcf");
    out.extend_from_slice(&1u16.to_be_bytes());
    out.extend_from_slice(&0u16.to_be_bytes());
    out.extend_from_slice(&(fonts.len() as u32).to_be_bytes());
    for (_, tables) in fonts {
        out.extend_from_slice(&(dir_offset as u32).to_be_bytes());
        dir_offset += 12 + 16 * tables.len();
    }
    for (scaler, tables) in fonts {
        let records: Vec<_> = tables
            .iter()
            .map(|(tag, data)| {
                let record = (
                    *tag,
                    table_checksum(*tag, data),
                    table_offset as u32,
                    data.len() as u32,
                );
                table_offset += padded_len(data.len());
                record
            })
            .collect();
        write_directory(&mut out, *scaler, &records);
    }
    for (_, tables) in fonts {
        for (_, data) in tables {
            out.extend_from_slice(data);
            out.resize(padded_len(out.len()), 0);
        }
    }
    out
}
