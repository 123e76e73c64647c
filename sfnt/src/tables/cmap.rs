//! The [cmap](https://docs.microsoft.com/en-us/typography/opentype/spec/cmap) table

use std::{fmt, ops::RangeInclusive};

use types::{BigEndian, GlyphId, Scalar, Tag};

use super::name::PlatformId;
use crate::{
    font_data::{Cursor, FontData},
    read::{FontRead, ReadError},
    write::{FontWrite, TableWriter},
};

/// 'cmap'
pub const TAG: Tag = Tag::new(b"cmap");

/// Enumeration never yields codepoints past the end of Unicode.
const MAX_CODEPOINT: u32 = 0x10FFFF;

/// The [cmap](https://docs.microsoft.com/en-us/typography/opentype/spec/cmap)
/// (Character to Glyph Index Mapping) table.
///
/// The table is read-only: it is written back exactly as it was read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cmap {
    data: Vec<u8>,
    encodings: Vec<EncodingSubtable>,
}

/// One encoding record, with its decoded subtable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodingSubtable {
    pub platform_id: u16,
    pub encoding_id: u16,
    pub format: u16,
    pub subtable: CmapSubtable,
}

/// The decoded subtable formats.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CmapSubtable {
    Format4(Cmap4),
    Format6(Cmap6),
    Format10(Cmap10),
    Format12(Cmap12),
    /// A format without a decoder here; it maps nothing.
    Unsupported(u16),
}

impl Cmap {
    /// The encoding subtables, in stored order.
    pub fn encodings(&self) -> &[EncodingSubtable] {
        &self.encodings
    }

    /// Map a codepoint to a nominal glyph identifier
    ///
    /// This uses the first subtable that provides a mapping.
    pub fn map_codepoint(&self, codepoint: impl Into<u32>) -> Option<GlyphId> {
        let codepoint: u32 = codepoint.into();
        self.encodings
            .iter()
            .find_map(|encoding| encoding.map_codepoint(codepoint))
    }

    /// The table bytes, as read.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl EncodingSubtable {
    pub fn platform(&self) -> PlatformId {
        PlatformId(self.platform_id)
    }

    /// Maps a codepoint to a nominal glyph identifier.
    ///
    /// Returns `None` for unmapped codepoints, including those explicitly
    /// mapped to glyph 0.
    pub fn map_codepoint(&self, codepoint: impl Into<u32>) -> Option<GlyphId> {
        self.subtable.map_codepoint(codepoint)
    }

    /// Returns an iterator over all (codepoint, glyph identifier) pairs
    /// in the subtable.
    pub fn iter(&self) -> CmapIter<'_> {
        self.subtable.iter()
    }

    /// All mapped codepoints, in ascending order.
    pub fn codepoints(&self) -> Vec<u32> {
        self.iter().map(|(codepoint, _)| codepoint).collect()
    }

    fn encoding_label(&self) -> String {
        match (self.platform(), self.encoding_id) {
            (PlatformId::MACINTOSH, 0) => "Roman".into(),
            (PlatformId::WINDOWS, 0) => "Symbol".into(),
            (PlatformId::WINDOWS, 1) => "Unicode BMP (UCS-2)".into(),
            (PlatformId::WINDOWS, 10) => "Unicode UCS-4".into(),
            (_, other) => format!("Encoding {other}"),
        }
    }
}

/// Describes the subtable, as in "Microsoft Unicode BMP (UCS-2) (format: 4)".
impl fmt::Display for EncodingSubtable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} (format: {})",
            self.platform(),
            self.encoding_label(),
            self.format
        )
    }
}

impl CmapSubtable {
    fn read(data: FontData) -> Result<Self, ReadError> {
        let format: u16 = data.read_at(0)?;
        match format {
            4 => Cmap4::read(data).map(Self::Format4),
            6 => Cmap6::read(data).map(Self::Format6),
            10 => Cmap10::read(data).map(Self::Format10),
            12 => Cmap12::read(data).map(Self::Format12),
            other => {
                log::warn!("cmap subtable format {other} is not supported, it will map nothing");
                Ok(Self::Unsupported(other))
            }
        }
    }

    /// Maps a codepoint to a nominal glyph identifier.
    pub fn map_codepoint(&self, codepoint: impl Into<u32>) -> Option<GlyphId> {
        let codepoint: u32 = codepoint.into();
        match self {
            Self::Format4(subtable) => subtable.map_codepoint(codepoint),
            Self::Format6(subtable) => subtable.map_codepoint(codepoint),
            Self::Format10(subtable) => subtable.map_codepoint(codepoint),
            Self::Format12(subtable) => subtable.map_codepoint(codepoint),
            Self::Unsupported(_) => None,
        }
    }

    /// Returns an iterator over all (codepoint, glyph identifier) pairs
    /// in the subtable.
    pub fn iter(&self) -> CmapIter<'_> {
        CmapIter {
            subtable: self,
            cur_range: 1..=0,
            cur_range_ix: 0,
        }
    }

    // the inclusive codepoint range of the nth segment/group, clamped to
    // valid unicode
    fn range(&self, index: usize) -> Option<RangeInclusive<u32>> {
        let (start, end) = match self {
            Self::Format4(subtable) => (
                *subtable.start_codes.get(index)? as u32,
                *subtable.end_codes.get(index)? as u32,
            ),
            Self::Format6(subtable) if index == 0 => {
                let start = subtable.first_code as u32;
                let end = (start + subtable.glyph_ids.len() as u32).checked_sub(1)?;
                (start, end)
            }
            Self::Format10(subtable) if index == 0 => {
                let start = subtable.start_char_code;
                let end = start
                    .saturating_add(subtable.glyph_ids.len() as u32)
                    .checked_sub(1)?;
                (start, end)
            }
            Self::Format12(subtable) => {
                let group = subtable.groups.get(index)?;
                (group.start_char_code, group.end_char_code)
            }
            _ => return None,
        };
        Some(start..=end.min(MAX_CODEPOINT))
    }
}

/// Iterator over all (codepoint, glyph identifier) pairs in a subtable.
///
/// Codepoints explicitly mapped to glyph 0 are skipped.
#[derive(Clone)]
pub struct CmapIter<'a> {
    subtable: &'a CmapSubtable,
    cur_range: RangeInclusive<u32>,
    cur_range_ix: usize,
}

impl Iterator for CmapIter<'_> {
    type Item = (u32, GlyphId);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(codepoint) = self.cur_range.next() {
                let glyph_id = match self.subtable {
                    CmapSubtable::Format4(subtable) => {
                        subtable.lookup_glyph_id(codepoint as u16, self.cur_range_ix - 1)
                    }
                    other => other.map_codepoint(codepoint),
                };
                if let Some(glyph_id) = glyph_id {
                    return Some((codepoint, glyph_id));
                }
            } else {
                self.cur_range = self.subtable.range(self.cur_range_ix)?;
                self.cur_range_ix += 1;
            }
        }
    }
}

/// Format 4: segment mapping to delta values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cmap4 {
    end_codes: Vec<u16>,
    start_codes: Vec<u16>,
    id_deltas: Vec<i16>,
    id_range_offsets: Vec<u16>,
    glyph_ids: Vec<u16>,
}

impl Cmap4 {
    pub fn seg_count(&self) -> usize {
        self.end_codes.len()
    }

    /// Maps a codepoint to a nominal glyph identifier.
    pub fn map_codepoint(&self, codepoint: impl Into<u32>) -> Option<GlyphId> {
        let codepoint: u32 = codepoint.into();
        let codepoint = u16::try_from(codepoint).ok()?;
        // end codes are strictly increasing
        let index = self.end_codes.partition_point(|end| *end < codepoint);
        self.lookup_glyph_id(codepoint, index)
    }

    /// Does the final phase of glyph id lookup.
    ///
    /// Shared between Self::map_codepoint and CmapIter.
    fn lookup_glyph_id(&self, codepoint: u16, index: usize) -> Option<GlyphId> {
        let start_code = *self.start_codes.get(index)?;
        if codepoint < start_code {
            return None;
        }
        let delta = *self.id_deltas.get(index)?;
        let range_offset = *self.id_range_offsets.get(index)?;
        let glyph_id = if range_offset == 0 {
            codepoint.wrapping_add_signed(delta)
        } else {
            // the offset is relative to this segment's entry in
            // idRangeOffset, which sits seg_count - index entries before
            // the glyph array
            let glyph_ix = (range_offset / 2) as usize + (codepoint - start_code) as usize;
            let glyph_ix = glyph_ix.checked_sub(self.seg_count() - index)?;
            match *self.glyph_ids.get(glyph_ix)? {
                0 => return None,
                glyph_id => glyph_id.wrapping_add_signed(delta),
            }
        };
        (glyph_id != 0).then(|| GlyphId::from(glyph_id))
    }
}

impl FontRead<'_> for Cmap4 {
    fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let _format: u16 = cursor.read()?;
        let length: u16 = cursor.read()?;
        let _language: u16 = cursor.read()?;
        let seg_count_x2: u16 = cursor.read()?;
        if seg_count_x2 == 0 || seg_count_x2 % 2 == 1 {
            return Err(ReadError::MalformedData(format!(
                "invalid segCountX2: {seg_count_x2}"
            )));
        }
        let seg_count = seg_count_x2 as usize / 2;
        // searchRange, entrySelector, rangeShift
        cursor.advance_by(6);
        let end_codes = read_vec(&mut cursor, seg_count)?;
        // reservedPad
        cursor.advance_by(2);
        let start_codes = read_vec(&mut cursor, seg_count)?;
        let id_deltas = read_vec(&mut cursor, seg_count)?;
        let id_range_offsets: Vec<u16> = read_vec(&mut cursor, seg_count)?;

        let glyph_array_len = length as i64 - 16 - 8 * seg_count as i64;
        if glyph_array_len < 0 || glyph_array_len % 2 == 1 {
            return Err(ReadError::MalformedData(format!(
                "invalid format 4 length {length} for {seg_count} segments"
            )));
        }
        let glyph_ids = read_vec(&mut cursor, glyph_array_len as usize / 2)?;

        if let Some((i, offset)) = id_range_offsets
            .iter()
            .enumerate()
            .find(|(_, offset)| **offset % 2 == 1)
        {
            return Err(ReadError::MalformedData(format!(
                "idRangeOffset[{i}] is odd: {offset}"
            )));
        }
        if !end_codes.windows(2).all(|pair| pair[0] < pair[1]) {
            return Err(ReadError::MalformedData(
                "endCode values are not strictly increasing".into(),
            ));
        }
        Ok(Cmap4 {
            end_codes,
            start_codes,
            id_deltas,
            id_range_offsets,
            glyph_ids,
        })
    }
}

/// Format 6: trimmed table mapping.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cmap6 {
    first_code: u16,
    glyph_ids: Vec<u16>,
}

impl Cmap6 {
    /// Maps a codepoint to a nominal glyph identifier.
    pub fn map_codepoint(&self, codepoint: impl Into<u32>) -> Option<GlyphId> {
        let codepoint: u32 = codepoint.into();
        let index = codepoint.checked_sub(self.first_code as u32)?;
        match *self.glyph_ids.get(index as usize)? {
            0 => None,
            glyph_id => Some(GlyphId::from(glyph_id)),
        }
    }
}

impl FontRead<'_> for Cmap6 {
    fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let _format: u16 = cursor.read()?;
        let length: u16 = cursor.read()?;
        let _language: u16 = cursor.read()?;
        let first_code = cursor.read()?;
        let entry_count: u16 = cursor.read()?;
        check_length(length as u64, 10 + 2 * entry_count as u64)?;
        Ok(Cmap6 {
            first_code,
            glyph_ids: read_vec(&mut cursor, entry_count as usize)?,
        })
    }
}

/// Format 10: trimmed array.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cmap10 {
    start_char_code: u32,
    glyph_ids: Vec<u16>,
}

impl Cmap10 {
    /// Maps a codepoint to a nominal glyph identifier.
    pub fn map_codepoint(&self, codepoint: impl Into<u32>) -> Option<GlyphId> {
        let codepoint: u32 = codepoint.into();
        let index = codepoint.checked_sub(self.start_char_code)?;
        match *self.glyph_ids.get(index as usize)? {
            0 => None,
            glyph_id => Some(GlyphId::from(glyph_id)),
        }
    }
}

impl FontRead<'_> for Cmap10 {
    fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let _format: u16 = cursor.read()?;
        let _reserved: u16 = cursor.read()?;
        let length: u32 = cursor.read()?;
        let _language: u32 = cursor.read()?;
        let start_char_code = cursor.read()?;
        let num_chars: u32 = cursor.read()?;
        check_length(length as u64, 20 + 2 * num_chars as u64)?;
        Ok(Cmap10 {
            start_char_code,
            glyph_ids: read_vec(&mut cursor, num_chars as usize)?,
        })
    }
}

/// Format 12: segmented coverage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cmap12 {
    groups: Vec<SequentialMapGroup>,
}

/// A run of consecutive codepoints mapped to consecutive glyphs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SequentialMapGroup {
    pub start_char_code: u32,
    /// Inclusive.
    pub end_char_code: u32,
    pub start_glyph_id: u32,
}

impl Cmap12 {
    pub fn groups(&self) -> &[SequentialMapGroup] {
        &self.groups
    }

    /// Maps a codepoint to a nominal glyph identifier.
    pub fn map_codepoint(&self, codepoint: impl Into<u32>) -> Option<GlyphId> {
        let codepoint: u32 = codepoint.into();
        // groups are sorted and disjoint
        let index = self
            .groups
            .partition_point(|group| group.end_char_code < codepoint);
        let group = self.groups.get(index)?;
        if codepoint < group.start_char_code {
            return None;
        }
        let glyph_id = group
            .start_glyph_id
            .wrapping_add(codepoint - group.start_char_code);
        (glyph_id != 0).then_some(GlyphId::new(glyph_id))
    }
}

impl FontRead<'_> for Cmap12 {
    fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let _format: u16 = cursor.read()?;
        let _reserved: u16 = cursor.read()?;
        let length: u32 = cursor.read()?;
        let _language: u32 = cursor.read()?;
        let num_groups: u32 = cursor.read()?;
        check_length(length as u64, 16 + 12 * num_groups as u64)?;
        if cursor.remaining_bytes() < (num_groups as usize).saturating_mul(12) {
            return Err(ReadError::OutOfBounds);
        }
        let groups = (0..num_groups)
            .map(|_| {
                Ok(SequentialMapGroup {
                    start_char_code: cursor.read()?,
                    end_char_code: cursor.read()?,
                    start_glyph_id: cursor.read()?,
                })
            })
            .collect::<Result<Vec<_>, ReadError>>()?;
        if let Some(group) = groups
            .iter()
            .find(|group| group.start_char_code > group.end_char_code)
        {
            return Err(ReadError::MalformedData(format!(
                "group {group:?} ends before it starts"
            )));
        }
        for pair in groups.windows(2) {
            if pair[0].start_char_code >= pair[1].start_char_code {
                return Err(ReadError::MalformedData(
                    "groups are not sorted by startCharCode".into(),
                ));
            }
            if pair[0].end_char_code >= pair[1].start_char_code {
                return Err(ReadError::MalformedData(format!(
                    "groups overlap: {:?} vs {:?}",
                    pair[0], pair[1]
                )));
            }
        }
        Ok(Cmap12 { groups })
    }
}

impl FontRead<'_> for Cmap {
    fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let version: u16 = cursor.read()?;
        if version != 0 {
            return Err(ReadError::InvalidFormat(version as i64));
        }
        let num_tables: u16 = cursor.read()?;
        let encodings = (0..num_tables)
            .map(|i| {
                let platform_id = cursor.read()?;
                let encoding_id = cursor.read()?;
                let offset: u32 = cursor.read()?;
                let subtable_data = data
                    .split_off(offset as usize)
                    .ok_or(ReadError::OutOfBounds)?;
                let format = subtable_data.read_at(0)?;
                check_format_allowed(platform_id, encoding_id, format)?;
                log::debug!(
                    "cmap encoding {i}: platform {platform_id} encoding {encoding_id} format {format} at 0x{offset:x}"
                );
                Ok(EncodingSubtable {
                    platform_id,
                    encoding_id,
                    format,
                    subtable: CmapSubtable::read(subtable_data)?,
                })
            })
            .collect::<Result<Vec<_>, ReadError>>()?;
        Ok(Cmap {
            data: data.as_bytes().to_vec(),
            encodings,
        })
    }
}

impl FontWrite for Cmap {
    fn write_into(&self, writer: &mut TableWriter) {
        writer.write_slice(&self.data)
    }
}

/// The formats allowed for each Unicode platform encoding.
///
/// Other platforms accept any format.
fn allowed_formats(platform_id: u16, encoding_id: u16) -> Option<&'static [u16]> {
    if PlatformId(platform_id) != PlatformId::UNICODE {
        return None;
    }
    match encoding_id {
        3 => Some(&[0, 4, 6]),
        4 => Some(&[0, 4, 6, 10, 12]),
        5 => Some(&[14]),
        6 => Some(&[0, 4, 6, 10, 12, 13]),
        _ => None,
    }
}

fn check_format_allowed(platform_id: u16, encoding_id: u16, format: u16) -> Result<(), ReadError> {
    match allowed_formats(platform_id, encoding_id) {
        Some(allowed) if !allowed.contains(&format) => Err(ReadError::MalformedData(format!(
            "{} encoding {encoding_id} requires format {allowed:?} not {format}",
            PlatformId(platform_id)
        ))),
        _ => Ok(()),
    }
}

fn check_length(declared: u64, computed: u64) -> Result<(), ReadError> {
    if declared != computed {
        return Err(ReadError::MalformedData(format!(
            "length does not match expected length {declared} != {computed}"
        )));
    }
    Ok(())
}

fn read_vec<T: Scalar + Copy + 'static>(
    cursor: &mut Cursor,
    n_elem: usize,
) -> Result<Vec<T>, ReadError> {
    Ok(cursor
        .read_array::<BigEndian<T>>(n_elem)?
        .iter()
        .map(BigEndian::get)
        .collect())
}
