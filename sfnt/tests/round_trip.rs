//! Parse fonts, write them back out, and read the result again.

use std::io;

use font_test_data::{borrow_tables, container, simple_font_tables, simple_ttf};
use pretty_assertions::assert_eq;
use sfnt::{
    compute_checksum,
    parse::table_checksum,
    tables::{
        head::{self, Head, CHECKSUM_MAGIC},
        layout::{GPOS_TAG, GSUB_TAG},
        name::NameId,
        Opaque,
    },
    types::{Tag, CFF_SFNT_VERSION, TT_SFNT_VERSION},
    Error, Font, Parser, ReadError,
};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// table bytes, with the checksum adjustment cleared for head
fn comparable_bytes(tag: Tag, bytes: &[u8]) -> Vec<u8> {
    let mut bytes = bytes.to_vec();
    if tag == head::TAG && bytes.len() >= 12 {
        bytes[8..12].fill(0);
    }
    bytes
}

fn directory_tags(file: &[u8]) -> Vec<Tag> {
    let num_tables = u16::from_be_bytes([file[4], file[5]]) as usize;
    (0..num_tables)
        .map(|i| {
            let start = 12 + i * 16;
            Tag::new(file[start..start + 4].try_into().unwrap())
        })
        .collect()
}

#[test]
fn tables_survive_a_round_trip() {
    init();
    let original = simple_font_tables();
    let font = sfnt::parse(&simple_ttf()).unwrap();
    let written = font.to_otf_bytes().unwrap();
    let reparsed = Parser::new().strict(true).parse(&written).unwrap();

    assert_eq!(reparsed.scaler_type(), TT_SFNT_VERSION);
    assert_eq!(reparsed.num_tables(), original.len());
    for (tag, bytes) in &original {
        let table = reparsed.table(*tag).unwrap();
        assert_eq!(
            comparable_bytes(*tag, &table.to_bytes()),
            comparable_bytes(*tag, bytes),
            "{tag}"
        );
    }
}

#[test]
fn output_order() {
    let font = sfnt::parse(&simple_ttf()).unwrap();
    let written = font.to_otf_bytes().unwrap();
    let tags: Vec<_> = directory_tags(&written)
        .into_iter()
        .map(|tag| tag.to_string())
        .collect();
    assert_eq!(
        tags,
        ["maxp", "head", "hhea", "OS/2", "name", "GSUB", "cmap", "zzzz"]
    );
}

#[test]
fn checksum_closes() {
    let font = sfnt::parse(&simple_ttf()).unwrap();
    let before = font.head().unwrap().checksum_adjustment;
    let written = font.to_otf_bytes().unwrap();
    assert_eq!(compute_checksum(&written), CHECKSUM_MAGIC);

    let reparsed = sfnt::parse(&written).unwrap();
    let adjustment = reparsed.head().unwrap().checksum_adjustment;
    let mut zeroed = written.clone();
    let head_offset = {
        let ix = directory_tags(&written)
            .iter()
            .position(|tag| *tag == head::TAG)
            .unwrap();
        let record = 12 + ix * 16;
        u32::from_be_bytes(written[record + 8..record + 12].try_into().unwrap()) as usize
    };
    zeroed[head_offset + 8..head_offset + 12].fill(0);
    assert_eq!(
        adjustment.wrapping_add(compute_checksum(&zeroed)),
        CHECKSUM_MAGIC
    );
    // writing never leaves the font modified
    assert_eq!(font.head().unwrap().checksum_adjustment, before);
}

#[test]
fn writing_is_deterministic() {
    let font = sfnt::parse(&simple_ttf()).unwrap();
    let mut first = Vec::new();
    let len = font.write_otf(&mut first).unwrap();
    assert_eq!(len, first.len());
    assert_eq!(len % 4, 0);
    assert_eq!(font.to_otf_bytes().unwrap(), first);
}

#[test]
fn woff_to_otf() {
    init();
    let owned = simple_font_tables();
    let woff = container::build_woff(u32::from_be_bytes(*b"OTTO"), &borrow_tables(&owned));
    let font = sfnt::parse(&woff).unwrap();
    let written = font.to_otf_bytes().unwrap();
    assert_eq!(&written[..4], b"OTTO");
    let reparsed = Parser::new().strict(true).parse(&written).unwrap();
    assert_eq!(reparsed.scaler_type(), CFF_SFNT_VERSION);
    for (tag, bytes) in &owned {
        assert_eq!(
            comparable_bytes(*tag, &reparsed.table(*tag).unwrap().to_bytes()),
            comparable_bytes(*tag, bytes),
            "{tag}"
        );
    }
}

#[test]
fn collection_member_to_otf() {
    let owned = simple_font_tables();
    let ttc = container::build_ttc(&[
        (0x00010000, borrow_tables(&owned[..4])),
        (0x00010000, borrow_tables(&owned)),
    ]);
    let fonts = sfnt::parse_collection(&ttc).unwrap();
    let written = fonts[1].to_otf_bytes().unwrap();
    let reparsed = sfnt::parse(&written).unwrap();
    let tags: Vec<_> = reparsed.tags().collect();
    let expected: Vec<_> = fonts[1].tags().collect();
    assert_eq!(tags, expected);
    assert_eq!(fonts[0].num_tables(), 4);
}

#[test]
fn edited_name_is_written() {
    let mut font = sfnt::parse(&simple_ttf()).unwrap();
    let name = font.name_mut().unwrap();
    name.add_microsoft_english_entry(NameId::new(256), "Stylistic")
        .unwrap();
    name.add_mac_english_entry(NameId::FAMILY_NAME, "Caf\u{e9}")
        .unwrap();
    let written = font.to_otf_bytes().unwrap();

    let reparsed = Parser::new().strict(true).parse(&written).unwrap();
    let entries = reparsed.name().unwrap().entries().unwrap();
    let decoded: Vec<_> = entries
        .iter()
        .map(|entry| (entry.platform_id, entry.name_id.to_u16(), entry.decoded()))
        .collect();
    assert_eq!(
        decoded,
        [
            (3, 1, "Test".to_string()),
            (1, 1, "Test".to_string()),
            (3, 256, "Stylistic".to_string()),
            (1, 1, "Caf\u{e9}".to_string()),
        ]
    );
}

#[test]
fn unusual_layout_tables_round_trip() {
    init();
    // version 2.0 with null offsets
    let gsub = [0u8, 2, 0, 0, 0, 0, 0, 0, 0, 0];
    // version 1.0 with a script list past the end, and an odd length
    let gpos = [0u8, 1, 0, 0, 0, 0x64, 0, 0, 0, 0, 7];
    let owned = simple_font_tables();
    let mut tables = borrow_tables(&owned);
    tables.retain(|(tag, _)| *tag != GSUB_TAG);
    tables.push((GSUB_TAG, &gsub[..]));
    tables.push((GPOS_TAG, &gpos[..]));

    for file in [
        container::build_sfnt(0x00010000, &tables),
        container::build_woff(0x00010000, &tables),
    ] {
        let font = Parser::new().strict(true).parse(&file).unwrap();
        assert_eq!(font.gsub().map(|gsub| gsub.header()), Some(None));
        assert_eq!(font.gpos().map(|gpos| gpos.header()), Some(None));

        let written = font.to_otf_bytes().unwrap();
        let reparsed = Parser::new().strict(true).parse(&written).unwrap();
        assert_eq!(
            reparsed.table(GSUB_TAG).map(|table| table.to_bytes().to_vec()),
            Some(gsub.to_vec())
        );
        assert_eq!(
            reparsed.table(GPOS_TAG).map(|table| table.to_bytes().to_vec()),
            Some(gpos.to_vec())
        );
    }
}

#[test]
fn new_font() {
    let mut font = Font::new(TT_SFNT_VERSION);
    font.add_table(Tag::new(b"zzzz"), Opaque::new(vec![1, 2, 3]));
    let written = font.to_otf_bytes().unwrap();
    // header, two records, head and one padded table
    assert_eq!(written.len(), 12 + 2 * 16 + 56 + 4);
    let reparsed = sfnt::parse(&written).unwrap();
    let head = reparsed.head().unwrap();
    assert_eq!(head.magic_number, head::MAGIC_NUMBER);
    assert_eq!(
        Head {
            checksum_adjustment: 0,
            ..head.clone()
        },
        Head::default()
    );
}

#[test]
fn opaque_head_is_patched() {
    init();
    let opaque = Parser::new().with_codecs(sfnt::TableCodecs::empty());
    let font = opaque.parse(&simple_ttf()).unwrap();
    assert!(font.head().is_none());
    let written = font.to_otf_bytes().unwrap();
    assert_eq!(compute_checksum(&written), CHECKSUM_MAGIC);
    let reparsed = Parser::new().strict(true).parse(&written).unwrap();
    assert_eq!(reparsed.head().map(|head| head.units_per_em), Some(2048));
}

#[test]
fn headless_font_is_not_written() {
    let mut font = Font::new(TT_SFNT_VERSION);
    font.remove_table(head::TAG);
    let mut out = Vec::new();
    assert!(matches!(
        font.write_otf(&mut out),
        Err(Error::Read(ReadError::TableIsMissing(tag))) if tag == head::TAG
    ));
    assert!(out.is_empty());
}

struct FailingWriter;

impl io::Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::other("disk full"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn io_errors_propagate() {
    let font = sfnt::parse(&simple_ttf()).unwrap();
    let err = font.write_otf(FailingWriter).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert_eq!(err.to_string(), "io error: disk full");
}

#[test]
fn stored_checksums_match_written_tables() {
    let font = sfnt::parse(&simple_ttf()).unwrap();
    let written = font.to_otf_bytes().unwrap();
    for (ix, tag) in directory_tags(&written).into_iter().enumerate() {
        let record = &written[12 + ix * 16..12 + ix * 16 + 16];
        let stored = u32::from_be_bytes(record[4..8].try_into().unwrap());
        let offset = u32::from_be_bytes(record[8..12].try_into().unwrap()) as usize;
        let length = u32::from_be_bytes(record[12..16].try_into().unwrap()) as usize;
        assert_eq!(offset % 4, 0, "{tag}");
        assert_eq!(
            table_checksum(tag, &written[offset..offset + length]),
            stored,
            "{tag}"
        );
    }
}
