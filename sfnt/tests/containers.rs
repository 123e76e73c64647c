//! Container-level behaviour through the public entry points.

use font_test_data::{be_buffer, borrow_tables, container, simple_font_tables, simple_ttf, tables};
use pretty_assertions::assert_eq;
use sfnt::{
    tables::{cmap, head, Table, TableCodecs, MAXP},
    types::{GlyphId, Tag, TT_SFNT_VERSION},
    FileFormat, FontData, FontFile, Parser, ReadError,
};

#[test]
fn duplicate_tables_are_rejected() {
    let head = tables::head();
    let maxp = tables::maxp();
    let dup = [
        (head::TAG, head.as_slice()),
        (MAXP, maxp.as_slice()),
        (head::TAG, head.as_slice()),
    ];
    assert_eq!(
        sfnt::parse(&container::build_sfnt(0x00010000, &dup)).unwrap_err(),
        ReadError::DuplicateTable(head::TAG)
    );
    assert_eq!(
        sfnt::parse(&container::build_woff(0x00010000, &dup)).unwrap_err(),
        ReadError::DuplicateTable(head::TAG)
    );
    let ttc = container::build_ttc(&[(0x00010000, dup.to_vec())]);
    assert_eq!(
        sfnt::parse_collection(&ttc).unwrap_err(),
        ReadError::DuplicateTable(head::TAG)
    );
}

#[test]
fn head_is_required() {
    assert_eq!(
        sfnt::parse(&container::build_sfnt(0x00010000, &[])).unwrap_err(),
        ReadError::TableIsMissing(head::TAG)
    );
    let owned = simple_font_tables();
    let headless: Vec<_> = borrow_tables(&owned)
        .into_iter()
        .filter(|(tag, _)| *tag != head::TAG)
        .collect();
    assert_eq!(
        sfnt::parse(&container::build_sfnt(0x00010000, &headless)).unwrap_err(),
        ReadError::TableIsMissing(head::TAG)
    );
}

#[test]
fn unsupported_formats() {
    for magic in [b"wOF2", b"\0\0\0\0", b"%PDF", b"ttcF"] {
        let data = be_buffer! { Tag::new(magic), 0u32, 0u32, 0u32 };
        assert_eq!(
            sfnt::parse(data.as_slice()).unwrap_err(),
            ReadError::UnsupportedFormat(Tag::new(magic))
        );
        assert!(sfnt::parse_collection(data.as_slice()).is_err());
    }
    assert!(matches!(sfnt::parse(&[]), Err(ReadError::MalformedHeader(_))));
}

#[test]
fn file_format() {
    let owned = simple_font_tables();
    let tables = borrow_tables(&owned);
    assert_eq!(FileFormat::sniff(&simple_ttf()), Ok(FileFormat::Sfnt));
    assert_eq!(
        FileFormat::sniff(&container::build_woff(0x00010000, &tables)),
        Ok(FileFormat::Woff)
    );
    let ttc = container::build_ttc(&[(0x00010000, tables)]);
    assert_eq!(FileFormat::sniff(&ttc), Ok(FileFormat::Collection));
    assert!(matches!(sfnt::parse_file(&ttc), Ok(FontFile::Collection(_))));
}

#[test]
fn display() {
    let font = sfnt::parse(&simple_ttf()).unwrap();
    assert_eq!(
        font.to_string(),
        "Parsed font with scalerType=0x00010000\nGSUB\nOS/2\ncmap\nhead\nhhea\nmaxp\nname\nzzzz"
    );
}

#[test]
fn typed_access() {
    let font = sfnt::parse(&simple_ttf()).unwrap();
    assert_eq!(font.scaler_type(), TT_SFNT_VERSION);
    assert_eq!(font.hhea().map(|hhea| hhea.number_of_h_metrics), Some(42));
    assert_eq!(font.os2().map(|os2| os2.version), Some(4));
    assert!(font.gpos().is_none());
    let cmap = font.cmap().unwrap();
    assert_eq!(cmap.map_codepoint('A'), Some(GlyphId::new(47)));
    assert_eq!(cmap.map_codepoint('\u{10FFFF}'), None);
    assert!(matches!(font.table(MAXP), Some(Table::Opaque(_))));
}

fn reject(_: FontData) -> Result<Table, ReadError> {
    Err(ReadError::MalformedData("rejected".into()))
}

#[test]
fn custom_codecs() {
    let data = simple_ttf();

    let mut codecs = TableCodecs::default();
    codecs.remove(cmap::TAG);
    let font = Parser::new().with_codecs(codecs).parse(&data).unwrap();
    assert!(font.cmap().is_none());
    assert!(matches!(font.table(cmap::TAG), Some(Table::Opaque(_))));

    let mut codecs = TableCodecs::default();
    codecs.insert(Tag::new(b"zzzz"), reject);
    assert_eq!(
        Parser::new().with_codecs(codecs).parse(&data).unwrap_err(),
        ReadError::MalformedData("rejected".into())
    );
}

#[test]
fn whole_font_checksum() {
    let font = sfnt::parse(&simple_ttf()).unwrap();
    let expected = font.tables().fold(0u32, |sum, (_, table)| {
        sum.wrapping_add(sfnt::compute_checksum(&table.to_bytes()))
    });
    assert_eq!(font.checksum(), expected);
}
