//! TrueType collections

use types::{BigEndian, Tag, TTC_HEADER_TAG};

use super::{otf, Parser};
use crate::{font::Font, font_data::FontData, read::ReadError};

/// The file-relative offsets of the member table directories.
fn read_header<'a>(file: FontData<'a>) -> Result<&'a [BigEndian<u32>], ReadError> {
    let truncated = |_| ReadError::MalformedHeader("truncated collection header");
    let mut cursor = file.cursor();
    let tag: Tag = cursor.read().map_err(truncated)?;
    if tag != TTC_HEADER_TAG {
        return Err(ReadError::MalformedHeader("missing 'ttcf' tag"));
    }
    let major: u16 = cursor.read().map_err(truncated)?;
    let minor: u16 = cursor.read().map_err(truncated)?;
    let num_fonts: u32 = cursor.read().map_err(truncated)?;
    if !(1..=2).contains(&major) {
        log::warn!("unexpected collection version {major}.{minor}");
    }
    log::debug!("collection version {major}.{minor} with {num_fonts} fonts");
    cursor.read_array(num_fonts as usize)
}

/// Parse every member of a collection.
pub(super) fn parse_collection(parser: &Parser, file: FontData) -> Result<Vec<Font>, ReadError> {
    read_header(file)?
        .iter()
        .map(|offset| otf::parse_sfnt(parser, file, offset.get() as usize))
        .collect()
}

/// Parse the member at `index`, without reading the others.
pub(super) fn parse_member(parser: &Parser, file: FontData, index: u32) -> Result<Font, ReadError> {
    let offset = read_header(file)?
        .get(index as usize)
        .ok_or(ReadError::InvalidCollectionIndex(index))?;
    otf::parse_sfnt(parser, file, offset.get() as usize)
}

#[cfg(test)]
mod tests {
    use font_test_data::{be_buffer, borrow_tables, container, simple_font_tables, tables};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::tables::{cmap, head, MAXP};

    fn parse(data: &[u8]) -> Result<Vec<Font>, ReadError> {
        parse_collection(&Parser::new(), FontData::new(data))
    }

    #[test]
    fn two_fonts() {
        let owned = simple_font_tables();
        let head = tables::head();
        let maxp = tables::maxp();
        let data = container::build_ttc(&[
            (0x00010000, borrow_tables(&owned)),
            (
                0x4F54544F,
                vec![(MAXP, maxp.as_slice()), (head::TAG, head.as_slice())],
            ),
        ]);
        let fonts = Parser::new().strict(true).parse_collection(&data).unwrap();
        assert_eq!(fonts.len(), 2);
        assert!(fonts[0].cmap().is_some());
        assert_eq!(fonts[1].scaler_type(), Tag::new(b"OTTO"));
        let tags: Vec<_> = fonts[1].tags().collect();
        assert_eq!(tags, [head::TAG, MAXP]);
    }

    #[test]
    fn one_bad_member_fails_all() {
        let owned = simple_font_tables();
        let maxp = tables::maxp();
        let data = container::build_ttc(&[
            (0x00010000, borrow_tables(&owned)),
            (0x00010000, vec![(MAXP, maxp.as_slice())]),
        ]);
        assert_eq!(
            parse(&data).unwrap_err(),
            ReadError::TableIsMissing(head::TAG)
        );
        // but the good one can be read alone
        let font = parse_member(&Parser::new(), FontData::new(&data), 0).unwrap();
        assert!(font.has_table(cmap::TAG));
    }

    #[test]
    fn empty_collection() {
        let data = be_buffer! { TTC_HEADER_TAG, 1u16, 0u16, 0u32 };
        assert!(parse(data.as_slice()).unwrap().is_empty());
        assert_eq!(
            Parser::new().parse(data.as_slice()).unwrap_err(),
            ReadError::InvalidCollectionIndex(0)
        );
    }

    #[test]
    fn bad_offsets() {
        // more fonts than there are offsets
        let data = be_buffer! { TTC_HEADER_TAG, 1u16, 0u16, 0xFFFF_FFFFu32, 16u32 };
        assert_eq!(parse(data.as_slice()).unwrap_err(), ReadError::OutOfBounds);
        // a member directory past the end of the file
        let data = be_buffer! { TTC_HEADER_TAG, 1u16, 0u16, 1u32, 1000u32 };
        assert_eq!(parse(data.as_slice()).unwrap_err(), ReadError::OutOfBounds);
        // a member directory that runs off the end of the file
        let data = be_buffer! { TTC_HEADER_TAG, 1u16, 0u16, 1u32, 16u32, 0x0001_0000u32, 4u16 };
        assert!(matches!(
            parse(data.as_slice()),
            Err(ReadError::MalformedHeader(_))
        ));
    }

    #[test]
    fn members_must_be_sfnts() {
        let head = tables::head();
        let data = container::build_ttc(&[(u32::from_be_bytes(*b"wOFF"), vec![(head::TAG, head.as_slice())])]);
        assert_eq!(
            parse(&data).unwrap_err(),
            ReadError::UnsupportedFormat(Tag::new(b"wOFF"))
        );
    }

    #[test]
    fn not_a_collection() {
        let data = be_buffer! { 0x0001_0000u32, 0u16, 0u16, 0u16 };
        assert!(matches!(
            parse(data.as_slice()),
            Err(ReadError::MalformedHeader(_))
        ));
    }
}
