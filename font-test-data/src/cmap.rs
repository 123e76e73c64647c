//! cmap subtables and tables built in code

use crate::{be_buffer, bebuffer::BeBuffer};

/// Four segments covering `[10, 20]`, `[30, 90]`, `[100, 153]` and the
/// terminating `0xFFFF` segment, all mapped through `idDelta` alone.
pub fn format4_deltas() -> BeBuffer {
    // <https://learn.microsoft.com/en-us/typography/opentype/spec/cmap#format-4-segment-mapping-to-delta-values>
    be_buffer! {
        4u16,           // format
        48u16,          // length: 16 + 8 * segCount
        0u16,           // language
        8u16,           // segCountX2
        8u16,           // searchRange
        2u16,           // entrySelector
        0u16,           // rangeShift
        // endCode
        20u16, 90u16, 153u16, 0xFFFFu16,
        0u16,           // reservedPad
        // startCode
        10u16, 30u16, 100u16, 0xFFFFu16,
        // idDelta
        -9i16, -18i16, -27i16, 1i16,
        // idRangeOffset
        0u16, 0u16, 0u16, 0u16
    }
}

/// Two segments: `[65, 68]` resolved through the glyph id array (with
/// 'C' mapped to glyph 0) and the terminating `0xFFFF` segment.
pub fn format4_glyph_array() -> BeBuffer {
    be_buffer! {
        4u16,           // format
        40u16,          // length: 16 + 8 * 2 + 2 * 4
        0u16,           // language
        4u16,           // segCountX2
        4u16,           // searchRange
        1u16,           // entrySelector
        0u16,           // rangeShift
        // endCode
        68u16, 0xFFFFu16,
        0u16,           // reservedPad
        // startCode
        65u16, 0xFFFFu16,
        // idDelta
        5i16, 1i16,
        // idRangeOffset: the first points just past the array
        4u16, 0u16,
        // glyphIdArray
        20u16, 21u16, 0u16, 23u16
    }
}

/// A format 6 subtable mapping 'A', 'B', 'C' to glyphs 10, 11, 12.
pub fn format6() -> BeBuffer {
    be_buffer! {
        6u16,           // format
        16u16,          // length: 10 + 2 * entryCount
        0u16,           // language
        65u16,          // firstCode
        3u16,           // entryCount
        10u16, 11u16, 12u16
    }
}

/// A format 10 subtable mapping U+10000 and U+10001 to glyphs 5 and 6.
pub fn format10() -> BeBuffer {
    be_buffer! {
        10u16,          // format
        0u16,           // reserved
        24u32,          // length: 20 + 2 * numChars
        0u32,           // language
        0x10000u32,     // startCharCode
        2u32,           // numChars
        5u16, 6u16
    }
}

/// Groups `(10, 20, 1)`, `(30, 90, 12)` and `(100, 153, 73)`.
pub fn format12() -> BeBuffer {
    be_buffer! {
        12u16,          // format
        0u16,           // reserved
        52u32,          // length: 16 + 12 * numGroups
        0u32,           // language
        3u32,           // numGroups
        10u32, 20u32, 1u32,
        30u32, 90u32, 12u32,
        100u32, 153u32, 73u32
    }
}

/// A format 0 subtable (byte encoding), which has no dedicated decoder.
pub fn format0() -> BeBuffer {
    let buf = be_buffer! {
        0u16,           // format
        262u16,         // length
        0u16            // language
    };
    buf.extend((0u8..=255).map(|c| if c == b'A' { 1u8 } else { 0u8 }))
}

/// Assemble a cmap table from `(platformID, encodingID, subtable)` triples.
///
/// Subtables are stored in order after the encoding records.
pub fn cmap_table(subtables: &[(u16, u16, &[u8])]) -> BeBuffer {
    let mut buf = be_buffer! { 0u16, subtables.len() as u16 };
    let mut offset = 4 + 8 * subtables.len() as u32;
    for (platform_id, encoding_id, data) in subtables {
        buf = buf
            .push(*platform_id)
            .push(*encoding_id)
            .push(offset);
        offset += data.len() as u32;
    }
    for (_, _, data) in subtables {
        buf = buf.extend_bytes(data);
    }
    buf
}

/// A cmap with a (3, 1) format 4 subtable and a (1, 0) format 6 subtable.
pub fn simple_cmap() -> BeBuffer {
    let format4 = format4_deltas();
    let format6 = format6();
    cmap_table(&[(3, 1, format4.as_slice()), (1, 0, format6.as_slice())])
}
