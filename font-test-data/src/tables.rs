//! Fixed-layout tables used to assemble test fonts

use font_types::Tag;

use crate::{be_buffer, bebuffer::BeBuffer};

/// A 54-byte head table with `checksumAdjustment` set to zero.
pub fn head() -> BeBuffer {
    be_buffer! {
        1u16, 0u16,             // version
        0x0001_0000u32,         // fontRevision
        0u32,                   // checksumAdjustment
        0x5F0F3CF5u32,          // magicNumber
        0x0003u16,              // flags
        2048u16,                // unitsPerEm
        3_500_000_000i64,       // created
        3_600_000_000i64,       // modified
        -100i16, -500i16, 1900i16, 1800i16, // bbox
        0u16,                   // macStyle
        9u16,                   // lowestRecPPEM
        2i16,                   // fontDirectionHint
        0i16,                   // indexToLocFormat
        0i16                    // glyphDataFormat
    }
}

/// A 36-byte hhea table.
pub fn hhea() -> BeBuffer {
    be_buffer! {
        1u16, 0u16,             // version
        1900i16,                // ascender
        -500i16,                // descender
        67i16,                  // lineGap
        2100u16,                // advanceWidthMax
        -80i16,                 // minLeftSideBearing
        -60i16,                 // minRightSideBearing
        2000i16,                // xMaxExtent
        1i16,                   // caretSlopeRise
        0i16,                   // caretSlopeRun
        0i16,                   // caretOffset
        0i16, 0i16, 0i16, 0i16, // reserved
        0i16,                   // metricDataFormat
        42u16                   // numberOfHMetrics
    }
}

/// An OS/2 table of the given version.
///
/// Versions 0 and 1 are truncated to 78 and 86 bytes, versions 2-4 are 96
/// bytes and version 5 is 100 bytes.
pub fn os2(version: u16) -> BeBuffer {
    let buf = be_buffer! {
        version,
        1031i16,                // xAvgCharWidth
        400u16,                 // usWeightClass
        5u16,                   // usWidthClass
        0u16,                   // fsType
        1331i16, 1433i16, 0i16, 286i16,  // subscript
        1331i16, 1433i16, 0i16, 983i16,  // superscript
        102i16,                 // yStrikeoutSize
        530i16,                 // yStrikeoutPosition
        0x0805i16               // sFamilyClass
    };
    let buf = buf
        .extend([2u8, 11, 6, 3, 5, 4, 5, 2, 2, 4]) // panose
        .extend([0xE00002FFu32, 0x5000205B, 0x20, 0]) // ulUnicodeRange1-4
        .push(Tag::new(b"TEST")) // achVendID
        .push(0x0040u16) // fsSelection
        .push(0x20u16) // usFirstCharIndex
        .push(0xFFFDu16) // usLastCharIndex
        .extend([1536i16, -512, 102]) // sTypoAscender, descender, lineGap
        .extend([1946u16, 512]); // usWinAscent, usWinDescent
    if version == 0 {
        return buf;
    }
    let buf = buf.extend([0x2000019Fu32, 0]); // ulCodePageRange1-2
    if version == 1 {
        return buf;
    }
    let buf = buf
        .push(1082i16) // sxHeight
        .push(1456i16) // sCapHeight
        .push(0u16) // usDefaultChar
        .push(32u16) // usBreakChar
        .push(3u16); // usMaxContext
    if version < 5 {
        return buf;
    }
    buf.push(8u16).push(72u16) // usLowerOpticalPointSize, usUpperOpticalPointSize
}

/// A maxp version 0.5 table.
pub fn maxp() -> BeBuffer {
    be_buffer! { 0x0000_5000u32, 42u16 }
}

/// A name table with a Microsoft (3, 1, 0x409) family name and a Mac
/// (1, 0, 0) family name, both "Test".
pub fn name() -> BeBuffer {
    let buf = be_buffer! {
        0u16,                   // format
        2u16,                   // count
        30u16,                  // stringOffset: 6 + 12 * 2
        // records
        3u16, 1u16, 0x409u16, 1u16, 8u16, 0u16,
        1u16, 0u16, 0u16, 1u16, 4u16, 8u16,
        // string storage
        0x0054u16, 0x0065u16, 0x0073u16, 0x0074u16 // "Test" in UTF-16BE
    };
    buf.extend_bytes(b"Test")
}

/// A minimal GSUB 1.0 header with empty script, feature and lookup lists.
pub fn gsub() -> BeBuffer {
    be_buffer! {
        1u16, 0u16,             // version
        10u16,                  // scriptListOffset
        12u16,                  // featureListOffset
        14u16,                  // lookupListOffset
        0u16,                   // ScriptList.scriptCount
        0u16,                   // FeatureList.featureCount
        0u16                    // LookupList.lookupCount
    }
}

/// A GPOS 1.1 header with one script record and a null
/// FeatureVariations offset.
pub fn gpos_1_1() -> BeBuffer {
    be_buffer! {
        1u16, 1u16,             // version
        14u16,                  // scriptListOffset
        22u16,                  // featureListOffset
        24u16,                  // lookupListOffset
        0u32,                   // featureVariationsOffset
        // ScriptList
        1u16,
        Tag::new(b"latn"), 0u16,
        // FeatureList
        0u16,
        // LookupList
        0u16
    }
}
