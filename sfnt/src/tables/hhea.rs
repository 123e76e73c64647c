//! The [hhea](https://docs.microsoft.com/en-us/typography/opentype/spec/hhea) table

use types::{FWord, MajorMinor, Tag, UfWord};

use crate::{
    font_data::FontData,
    read::{FontRead, ReadError},
    write::{FontWrite, TableWriter},
};

/// 'hhea'
pub const TAG: Tag = Tag::new(b"hhea");

/// The [hhea](https://docs.microsoft.com/en-us/typography/opentype/spec/hhea)
/// (Horizontal Header) table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Hhea {
    /// The major/minor version (1, 0)
    pub version: MajorMinor,
    /// Typographic ascent.
    pub ascender: FWord,
    /// Typographic descent.
    pub descender: FWord,
    /// Typographic line gap.
    pub line_gap: FWord,
    /// Maximum advance width value in 'hmtx' table.
    pub advance_width_max: UfWord,
    /// Minimum left sidebearing value in 'hmtx' table for glyphs with
    /// contours (empty glyphs should be ignored).
    pub min_left_side_bearing: FWord,
    /// Minimum right sidebearing value.
    pub min_right_side_bearing: FWord,
    /// Max(lsb + (xMax - xMin)).
    pub x_max_extent: FWord,
    /// Used to calculate the slope of the cursor (rise/run); 1 for
    /// vertical.
    pub caret_slope_rise: i16,
    /// 0 for vertical.
    pub caret_slope_run: i16,
    /// The amount by which a slanted highlight on a glyph needs to be
    /// shifted to produce the best appearance. Set to 0 for non-slanted
    /// fonts
    pub caret_offset: i16,
    /// Four reserved words, kept so that nonzero values survive a rewrite.
    pub reserved: [i16; 4],
    /// 0 for current format.
    pub metric_data_format: i16,
    /// Number of hMetric entries in 'hmtx' table
    pub number_of_h_metrics: u16,
}

impl Hhea {
    /// The size of the table in bytes.
    pub const RAW_BYTE_LEN: usize = 36;
}

impl FontRead<'_> for Hhea {
    fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        if data.len() < Self::RAW_BYTE_LEN {
            return Err(ReadError::OutOfBounds);
        }
        if data.len() > Self::RAW_BYTE_LEN {
            log::warn!(
                "hhea table has {} trailing bytes, which will be dropped",
                data.len() - Self::RAW_BYTE_LEN
            );
        }
        let mut cursor = data.cursor();
        Ok(Hhea {
            version: cursor.read()?,
            ascender: cursor.read()?,
            descender: cursor.read()?,
            line_gap: cursor.read()?,
            advance_width_max: cursor.read()?,
            min_left_side_bearing: cursor.read()?,
            min_right_side_bearing: cursor.read()?,
            x_max_extent: cursor.read()?,
            caret_slope_rise: cursor.read()?,
            caret_slope_run: cursor.read()?,
            caret_offset: cursor.read()?,
            reserved: [
                cursor.read()?,
                cursor.read()?,
                cursor.read()?,
                cursor.read()?,
            ],
            metric_data_format: cursor.read()?,
            number_of_h_metrics: cursor.read()?,
        })
    }
}

impl FontWrite for Hhea {
    fn write_into(&self, writer: &mut TableWriter) {
        self.version.write_into(writer);
        self.ascender.write_into(writer);
        self.descender.write_into(writer);
        self.line_gap.write_into(writer);
        self.advance_width_max.write_into(writer);
        self.min_left_side_bearing.write_into(writer);
        self.min_right_side_bearing.write_into(writer);
        self.x_max_extent.write_into(writer);
        self.caret_slope_rise.write_into(writer);
        self.caret_slope_run.write_into(writer);
        self.caret_offset.write_into(writer);
        self.reserved.write_into(writer);
        self.metric_data_format.write_into(writer);
        self.number_of_h_metrics.write_into(writer);
    }
}
