//! The [OS/2](https://docs.microsoft.com/en-us/typography/opentype/spec/os2) table

use types::Tag;

use crate::{
    font_data::FontData,
    read::{FontRead, ReadError},
    write::{FontWrite, TableWriter},
};

/// 'OS/2'
pub const TAG: Tag = Tag::new(b"OS/2");

/// [OS/2](https://docs.microsoft.com/en-us/typography/opentype/spec/os2)
/// (OS/2 and Windows Metrics) table
///
/// The layout depends on `version`: version 0 ends after `usWinDescent`,
/// version 1 adds the code page ranges, versions 2 through 4 add five more
/// fields, and version 5 adds the optical point size range. Fields that the
/// version does not include read as zero and are not written.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Os2 {
    pub version: u16,
    /// Average weighted escapement.
    pub x_avg_char_width: i16,
    /// Visual weight (degree of blackness or thickness of strokes) of
    /// the characters in the font. Values from 1 to 1000 are valid.
    pub us_weight_class: u16,
    /// Relative change from the normal aspect ratio (width to height ratio).
    pub us_width_class: u16,
    /// Font embedding licensing rights.
    pub fs_type: u16,
    pub y_subscript_x_size: i16,
    pub y_subscript_y_size: i16,
    pub y_subscript_x_offset: i16,
    pub y_subscript_y_offset: i16,
    pub y_superscript_x_size: i16,
    pub y_superscript_y_size: i16,
    pub y_superscript_x_offset: i16,
    pub y_superscript_y_offset: i16,
    pub y_strikeout_size: i16,
    pub y_strikeout_position: i16,
    /// Font-family class and subclass.
    pub s_family_class: i16,
    /// PANOSE classification number.
    pub panose_10: [u8; 10],
    /// Unicode Character Range (bits 0-31).
    pub ul_unicode_range_1: u32,
    /// Unicode Character Range (bits 32-63).
    pub ul_unicode_range_2: u32,
    /// Unicode Character Range (bits 64-95).
    pub ul_unicode_range_3: u32,
    /// Unicode Character Range (bits 96-127).
    pub ul_unicode_range_4: u32,
    /// Font Vendor Identification.
    pub ach_vend_id: Tag,
    /// Font selection flags.
    pub fs_selection: u16,
    /// The minimum Unicode index (character code) in this font.
    pub us_first_char_index: u16,
    /// The maximum Unicode index (character code) in this font.
    pub us_last_char_index: u16,
    pub s_typo_ascender: i16,
    pub s_typo_descender: i16,
    pub s_typo_line_gap: i16,
    pub us_win_ascent: u16,
    pub us_win_descent: u16,
    /// Code page character range (bits 0-31). Version 1 and later.
    pub ul_code_page_range_1: u32,
    /// Code page character range (bits 32-63). Version 1 and later.
    pub ul_code_page_range_2: u32,
    /// Version 2 and later.
    pub sx_height: i16,
    /// Version 2 and later.
    pub s_cap_height: i16,
    /// Version 2 and later.
    pub us_default_char: u16,
    /// Version 2 and later.
    pub us_break_char: u16,
    /// Version 2 and later.
    pub us_max_context: u16,
    /// Version 5 only.
    pub us_lower_optical_point_size: u16,
    /// Version 5 only.
    pub us_upper_optical_point_size: u16,
    /// Bytes past the end of the layout for `version`, written back unchanged.
    pub trailing_data: Vec<u8>,
}

impl Os2 {
    /// The number of bytes in a table of the given version.
    ///
    /// Versions newer than 5 are treated like version 4.
    pub fn byte_len_for_version(version: u16) -> usize {
        match version {
            0 => 78,
            1 => 86,
            5 => 100,
            _ => 96,
        }
    }

    fn has_code_page_ranges(&self) -> bool {
        self.version >= 1
    }

    fn has_v2_fields(&self) -> bool {
        self.version >= 2
    }

    fn has_optical_sizes(&self) -> bool {
        self.version == 5
    }
}

impl FontRead<'_> for Os2 {
    fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        let version: u16 = data.read_at(0)?;
        let byte_len = Self::byte_len_for_version(version);
        if data.len() < byte_len {
            return Err(ReadError::OutOfBounds);
        }
        let mut cursor = data.cursor();
        let mut table = Os2 {
            version: cursor.read()?,
            x_avg_char_width: cursor.read()?,
            us_weight_class: cursor.read()?,
            us_width_class: cursor.read()?,
            fs_type: cursor.read()?,
            y_subscript_x_size: cursor.read()?,
            y_subscript_y_size: cursor.read()?,
            y_subscript_x_offset: cursor.read()?,
            y_subscript_y_offset: cursor.read()?,
            y_superscript_x_size: cursor.read()?,
            y_superscript_y_size: cursor.read()?,
            y_superscript_x_offset: cursor.read()?,
            y_superscript_y_offset: cursor.read()?,
            y_strikeout_size: cursor.read()?,
            y_strikeout_position: cursor.read()?,
            s_family_class: cursor.read()?,
            panose_10: cursor
                .read_bytes(10)?
                .try_into()
                .map_err(|_| ReadError::OutOfBounds)?,
            ul_unicode_range_1: cursor.read()?,
            ul_unicode_range_2: cursor.read()?,
            ul_unicode_range_3: cursor.read()?,
            ul_unicode_range_4: cursor.read()?,
            ach_vend_id: cursor.read()?,
            fs_selection: cursor.read()?,
            us_first_char_index: cursor.read()?,
            us_last_char_index: cursor.read()?,
            s_typo_ascender: cursor.read()?,
            s_typo_descender: cursor.read()?,
            s_typo_line_gap: cursor.read()?,
            us_win_ascent: cursor.read()?,
            us_win_descent: cursor.read()?,
            ..Default::default()
        };
        if table.has_code_page_ranges() {
            table.ul_code_page_range_1 = cursor.read()?;
            table.ul_code_page_range_2 = cursor.read()?;
        }
        if table.has_v2_fields() {
            table.sx_height = cursor.read()?;
            table.s_cap_height = cursor.read()?;
            table.us_default_char = cursor.read()?;
            table.us_break_char = cursor.read()?;
            table.us_max_context = cursor.read()?;
        }
        if table.has_optical_sizes() {
            table.us_lower_optical_point_size = cursor.read()?;
            table.us_upper_optical_point_size = cursor.read()?;
        }
        let trailing = cursor.remaining();
        if !trailing.is_empty() {
            log::warn!(
                "OS/2 version {version} has {} bytes past the expected {byte_len}",
                trailing.len()
            );
            table.trailing_data = trailing.as_bytes().to_vec();
        }
        Ok(table)
    }
}

impl FontWrite for Os2 {
    fn write_into(&self, writer: &mut TableWriter) {
        self.version.write_into(writer);
        self.x_avg_char_width.write_into(writer);
        self.us_weight_class.write_into(writer);
        self.us_width_class.write_into(writer);
        self.fs_type.write_into(writer);
        self.y_subscript_x_size.write_into(writer);
        self.y_subscript_y_size.write_into(writer);
        self.y_subscript_x_offset.write_into(writer);
        self.y_subscript_y_offset.write_into(writer);
        self.y_superscript_x_size.write_into(writer);
        self.y_superscript_y_size.write_into(writer);
        self.y_superscript_x_offset.write_into(writer);
        self.y_superscript_y_offset.write_into(writer);
        self.y_strikeout_size.write_into(writer);
        self.y_strikeout_position.write_into(writer);
        self.s_family_class.write_into(writer);
        self.panose_10.write_into(writer);
        self.ul_unicode_range_1.write_into(writer);
        self.ul_unicode_range_2.write_into(writer);
        self.ul_unicode_range_3.write_into(writer);
        self.ul_unicode_range_4.write_into(writer);
        self.ach_vend_id.write_into(writer);
        self.fs_selection.write_into(writer);
        self.us_first_char_index.write_into(writer);
        self.us_last_char_index.write_into(writer);
        self.s_typo_ascender.write_into(writer);
        self.s_typo_descender.write_into(writer);
        self.s_typo_line_gap.write_into(writer);
        self.us_win_ascent.write_into(writer);
        self.us_win_descent.write_into(writer);
        if self.has_code_page_ranges() {
            self.ul_code_page_range_1.write_into(writer);
            self.ul_code_page_range_2.write_into(writer);
        }
        if self.has_v2_fields() {
            self.sx_height.write_into(writer);
            self.s_cap_height.write_into(writer);
            self.us_default_char.write_into(writer);
            self.us_break_char.write_into(writer);
            self.us_max_context.write_into(writer);
        }
        if self.has_optical_sizes() {
            self.us_lower_optical_point_size.write_into(writer);
            self.us_upper_optical_point_size.write_into(writer);
        }
        writer.write_slice(&self.trailing_data);
    }
}

#[cfg(test)]
mod tests {
    use font_test_data::tables;
    use rstest::rstest;

    use super::*;
    use crate::write::dump_table;

    #[rstest]
    #[case(0, 78)]
    #[case(1, 86)]
    #[case(2, 96)]
    #[case(3, 96)]
    #[case(4, 96)]
    #[case(5, 100)]
    fn roundtrip_each_version(#[case] version: u16, #[case] len: usize) {
        let buf = tables::os2(version);
        assert_eq!(buf.len(), len);
        let os2 = Os2::read(FontData::new(buf.as_slice())).unwrap();
        assert_eq!(os2.version, version);
        assert_eq!(os2.us_weight_class, 400);
        assert_eq!(os2.ach_vend_id, Tag::new(b"TEST"));
        assert_eq!(dump_table(&os2), buf.as_slice());
    }

    #[test]
    fn optical_sizes_only_in_v5() {
        let v5 = Os2::read(FontData::new(tables::os2(5).as_slice())).unwrap();
        assert_eq!(v5.us_lower_optical_point_size, 8);
        assert_eq!(v5.us_upper_optical_point_size, 72);
        assert_eq!(v5.us_max_context, 3);

        // a v4 table padded out to 100 bytes does not gain optical sizes
        let padded = tables::os2(4).push(8u16).push(72u16);
        let v4 = Os2::read(FontData::new(padded.as_slice())).unwrap();
        assert_eq!(v4.us_lower_optical_point_size, 0);
        assert_eq!(v4.us_upper_optical_point_size, 0);
        assert_eq!(v4.trailing_data, vec![0, 8, 0, 72]);
        assert_eq!(dump_table(&v4), padded.as_slice());
    }

    #[test]
    fn version_zero_fields_default() {
        let v0 = Os2::read(FontData::new(tables::os2(0).as_slice())).unwrap();
        assert_eq!(v0.ul_code_page_range_1, 0);
        assert_eq!(v0.sx_height, 0);
        assert_eq!(v0.us_win_descent, 512);
    }

    #[test]
    fn truncated_for_version() {
        let buf = tables::os2(5);
        // 96 bytes claiming version 5
        let data = FontData::new(&buf.as_slice()[..96]);
        assert!(matches!(Os2::read(data), Err(ReadError::OutOfBounds)));
        assert!(Os2::read(FontData::new(&[0])).is_err());
    }
}
