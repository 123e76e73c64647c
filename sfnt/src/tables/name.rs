//! The [name (Naming)](https://docs.microsoft.com/en-us/typography/opentype/spec/name) table

use std::{borrow::Cow, cell::OnceCell, fmt};

use types::Tag;

pub use types::NameId;

use crate::{
    font_data::FontData,
    read::{FontRead, ReadError},
    write::{FontWrite, TableWriter},
};

/// 'name'
pub const TAG: Tag = Tag::new(b"name");

const HEADER_LEN: usize = 6;
const RECORD_LEN: usize = 12;

/// The Macintosh platform encoding for Roman text.
pub const MAC_ROMAN_ENCODING: u16 = 0;
/// The Macintosh language id for English.
pub const MAC_ENGLISH_LANGUAGE: u16 = 0;
/// The Windows platform encoding for Unicode BMP text.
pub const WINDOWS_UNICODE_BMP_ENCODING: u16 = 1;
/// The Windows language id for English (United States).
pub const WINDOWS_ENGLISH_LANGUAGE: u16 = 0x0409;

/// A platform identifier, shared by the `name` and `cmap` tables.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlatformId(pub u16);

impl PlatformId {
    pub const UNICODE: PlatformId = PlatformId(0);
    pub const MACINTOSH: PlatformId = PlatformId(1);
    pub const WINDOWS: PlatformId = PlatformId(3);
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PlatformId::UNICODE => f.write_str("Unicode"),
            PlatformId::MACINTOSH => f.write_str("Mac"),
            PlatformId::WINDOWS => f.write_str("Microsoft"),
            PlatformId(other) => write!(f, "Platform {other}"),
        }
    }
}

/// A single string in the naming table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameEntry {
    pub platform_id: u16,
    pub encoding_id: u16,
    pub language_id: u16,
    pub name_id: NameId,
    /// The encoded string, exactly as stored.
    pub value: Vec<u8>,
}

impl NameEntry {
    /// The platform of this entry.
    pub fn platform(&self) -> PlatformId {
        PlatformId(self.platform_id)
    }

    /// The text encoding implied by the platform and encoding ids.
    pub fn encoding(&self) -> Encoding {
        Encoding::new(self.platform_id, self.encoding_id)
    }

    /// A short label for the name id, such as "Font Family".
    pub fn label(&self) -> String {
        self.name_id.to_string()
    }

    /// An iterator over the decoded `char`s of the value.
    pub fn chars(&self) -> CharIter<'_> {
        CharIter {
            data: &self.value,
            encoding: self.encoding(),
            pos: 0,
        }
    }

    /// The value decoded to a string.
    ///
    /// UTF-16BE and Mac Roman entries are decoded; any other encoding is
    /// interpreted as (lossy) UTF-8.
    pub fn decoded(&self) -> String {
        match self.encoding() {
            Encoding::Unknown => String::from_utf8_lossy(&self.value).into_owned(),
            _ => self.chars().collect(),
        }
    }
}

/// An error produced when adding entries to a [`Name`] table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NameError {
    /// The existing table data could not be parsed.
    Read(ReadError),
    /// A character has no representation in the target encoding.
    Unencodable(char),
    /// The table would overflow its 16-bit counts or offsets.
    TooLarge,
}

impl From<ReadError> for NameError {
    fn from(src: ReadError) -> NameError {
        NameError::Read(src)
    }
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameError::Read(err) => write!(f, "could not read name table: {err}"),
            NameError::Unencodable(c) => write!(f, "character {c:?} cannot be encoded"),
            NameError::TooLarge => write!(f, "name table exceeds 16-bit limits"),
        }
    }
}

impl std::error::Error for NameError {}

/// The [name](https://docs.microsoft.com/en-us/typography/opentype/spec/name)
/// table.
///
/// A table read from a font keeps its bytes and only parses its records
/// when [`Name::entries`] is first called. Adding an entry switches the
/// table to a structured list; [`Name::compile`] switches it back, caching
/// the rebuilt bytes.
#[derive(Clone, Debug)]
pub struct Name {
    /// The encoded table; `None` once an entry has been added.
    bytes: Option<Vec<u8>>,
    /// Parsed lazily from `bytes`. Always set while `bytes` is `None`.
    entries: OnceCell<Result<Vec<NameEntry>, ReadError>>,
}

impl Name {
    /// Create an empty table.
    pub fn new() -> Self {
        Name {
            bytes: None,
            entries: OnceCell::from(Ok(Vec::new())),
        }
    }

    /// Create a table from its encoded bytes, without parsing them.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Name {
            bytes: Some(bytes),
            entries: OnceCell::new(),
        }
    }

    /// `true` if the table currently holds encoded bytes.
    pub fn is_compiled(&self) -> bool {
        self.bytes.is_some()
    }

    /// The entries of the table, in stored order.
    pub fn entries(&self) -> Result<&[NameEntry], ReadError> {
        self.entries
            .get_or_init(|| {
                let bytes = self.bytes.as_deref().unwrap_or_default();
                parse_entries(FontData::new(bytes))
            })
            .as_deref()
            .map_err(Clone::clone)
    }

    /// Append an entry.
    pub fn push(&mut self, entry: NameEntry) -> Result<(), NameError> {
        let entries = self.entries()?;
        let string_len: usize = entries.iter().map(|e| e.value.len()).sum();
        if HEADER_LEN + RECORD_LEN * (entries.len() + 1) > u16::MAX as usize
            || string_len + entry.value.len() > u16::MAX as usize
        {
            return Err(NameError::TooLarge);
        }
        let mut entries = self.entries.take().transpose()?.unwrap_or_default();
        entries.push(entry);
        self.entries = OnceCell::from(Ok(entries));
        self.bytes = None;
        Ok(())
    }

    /// Add an entry for the Unicode platform, with the default encoding and
    /// language, encoded as UTF-16BE.
    pub fn add_unicode_entry(&mut self, name_id: NameId, value: &str) -> Result<(), NameError> {
        self.push(NameEntry {
            platform_id: PlatformId::UNICODE.0,
            encoding_id: 0,
            language_id: 0,
            name_id,
            value: encode_utf16_be(value),
        })
    }

    /// Add an entry for the Windows platform, Unicode BMP encoding, US
    /// English, encoded as UTF-16BE.
    pub fn add_microsoft_english_entry(
        &mut self,
        name_id: NameId,
        value: &str,
    ) -> Result<(), NameError> {
        self.push(NameEntry {
            platform_id: PlatformId::WINDOWS.0,
            encoding_id: WINDOWS_UNICODE_BMP_ENCODING,
            language_id: WINDOWS_ENGLISH_LANGUAGE,
            name_id,
            value: encode_utf16_be(value),
        })
    }

    /// Add an entry for the Macintosh platform, Roman encoding, English.
    ///
    /// Fails if `value` contains a character outside of Mac Roman.
    pub fn add_mac_english_entry(&mut self, name_id: NameId, value: &str) -> Result<(), NameError> {
        let value = value
            .chars()
            .map(|c| MacRomanMapping.encode(c).ok_or(NameError::Unencodable(c)))
            .collect::<Result<Vec<_>, _>>()?;
        self.push(NameEntry {
            platform_id: PlatformId::MACINTOSH.0,
            encoding_id: MAC_ROMAN_ENCODING,
            language_id: MAC_ENGLISH_LANGUAGE,
            name_id,
            value,
        })
    }

    /// Encode the entries, caching the result.
    ///
    /// After this call the table holds bytes again, and further calls (or
    /// [`Name::to_bytes`]) return the same bytes until an entry is added.
    pub fn compile(&mut self) -> &[u8] {
        let Name { bytes, entries } = self;
        bytes.get_or_insert_with(|| encode_entries(cached_entries(entries)))
    }

    /// The encoded table.
    ///
    /// Borrowed when the table holds bytes, freshly encoded otherwise.
    pub fn to_bytes(&self) -> Cow<'_, [u8]> {
        match &self.bytes {
            Some(bytes) => Cow::Borrowed(bytes),
            None => Cow::Owned(encode_entries(cached_entries(&self.entries))),
        }
    }
}

// the structured entries of a table that holds no bytes
fn cached_entries(entries: &OnceCell<Result<Vec<NameEntry>, ReadError>>) -> &[NameEntry] {
    entries
        .get()
        .and_then(|entries| entries.as_deref().ok())
        .unwrap_or_default()
}

impl Default for Name {
    fn default() -> Self {
        Self::new()
    }
}

impl FontRead<'_> for Name {
    fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        Ok(Name::from_bytes(data.as_bytes().to_vec()))
    }
}

impl FontWrite for Name {
    fn write_into(&self, writer: &mut TableWriter) {
        writer.write_slice(&self.to_bytes())
    }
}

fn parse_entries(data: FontData) -> Result<Vec<NameEntry>, ReadError> {
    let mut cursor = data.cursor();
    let _format: u16 = cursor.read()?;
    let count: u16 = cursor.read()?;
    let storage_offset: u16 = cursor.read()?;
    let storage = data
        .split_off(storage_offset as usize)
        .ok_or(ReadError::OutOfBounds)?;
    if cursor.remaining_bytes() < count as usize * RECORD_LEN {
        return Err(ReadError::OutOfBounds);
    }
    (0..count)
        .map(|_| {
            let platform_id = cursor.read()?;
            let encoding_id = cursor.read()?;
            let language_id = cursor.read()?;
            let name_id = cursor.read()?;
            let length: u16 = cursor.read()?;
            let offset: u16 = cursor.read()?;
            let value = storage.slice_len(offset as usize, length as usize)?;
            Ok(NameEntry {
                platform_id,
                encoding_id,
                language_id,
                name_id,
                value: value.as_bytes().to_vec(),
            })
        })
        .collect()
}

// offsets are sequential, in list order; `push` keeps every value in range.
fn encode_entries(entries: &[NameEntry]) -> Vec<u8> {
    let mut writer = TableWriter::default();
    0u16.write_into(&mut writer);
    (entries.len() as u16).write_into(&mut writer);
    ((HEADER_LEN + RECORD_LEN * entries.len()) as u16).write_into(&mut writer);
    let mut offset = 0usize;
    for entry in entries {
        entry.platform_id.write_into(&mut writer);
        entry.encoding_id.write_into(&mut writer);
        entry.language_id.write_into(&mut writer);
        entry.name_id.write_into(&mut writer);
        (entry.value.len() as u16).write_into(&mut writer);
        (offset as u16).write_into(&mut writer);
        offset += entry.value.len();
    }
    for entry in entries {
        writer.write_slice(&entry.value);
    }
    writer.into_data()
}

fn encode_utf16_be(value: &str) -> Vec<u8> {
    value.encode_utf16().flat_map(u16::to_be_bytes).collect()
}

/// An iterator over the chars of a name entry.
#[derive(Clone)]
pub struct CharIter<'a> {
    data: &'a [u8],
    encoding: Encoding,
    pos: usize,
}

impl CharIter<'_> {
    fn bump_u16(&mut self) -> Option<u16> {
        let result = self
            .data
            .get(self.pos..self.pos + 2)
            .map(|x| u16::from_be_bytes([x[0], x[1]]))?;
        self.pos += 2;
        Some(result)
    }

    fn bump_u8(&mut self) -> Option<u8> {
        let result = self.data.get(self.pos)?;
        self.pos += 1;
        Some(*result)
    }
}

impl Iterator for CharIter<'_> {
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.data.len() {
            return None;
        }
        let rep = char::REPLACEMENT_CHARACTER;
        let raw_c = match self.encoding {
            Encoding::Utf16Be => {
                let c1 = self.bump_u16()? as u32;
                if (0xD800..0xDC00).contains(&c1) {
                    let Some(c2) = self.bump_u16() else {
                        return Some(rep);
                    };
                    ((c1 & 0x3FF) << 10) + (c2 as u32 & 0x3FF) + 0x10000
                } else {
                    c1
                }
            }
            Encoding::MacRoman => {
                let c = self.bump_u8()?;
                MacRomanMapping.decode(c) as u32
            }
            Encoding::Unknown => return None,
        };
        Some(char::from_u32(raw_c).unwrap_or(rep))
    }
}

/// The encoding used by a name entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Encoding {
    Utf16Be,
    MacRoman,
    Unknown,
}

impl Encoding {
    /// Determine the coding from the platform and encoding id.
    pub fn new(platform_id: u16, encoding_id: u16) -> Encoding {
        match (platform_id, encoding_id) {
            (0, _) => Encoding::Utf16Be,
            (1, 0) => Encoding::MacRoman,
            (3, 1) => Encoding::Utf16Be,
            _ => Encoding::Unknown,
        }
    }
}

/// A helper for encoding and decoding Mac OS Roman encoded strings.
pub struct MacRomanMapping;

impl MacRomanMapping {
    const START_REMAP: u8 = 128;

    /// Convert from a mac-roman encoded byte to a `char`
    pub fn decode(self, raw: u8) -> char {
        if raw < Self::START_REMAP {
            raw as char
        } else {
            let idx = raw - Self::START_REMAP;
            char::from_u32(MAC_ROMAN_DECODE[idx as usize] as u32)
                .unwrap_or(char::REPLACEMENT_CHARACTER)
        }
    }

    /// convert from a char to a mac-roman encoded byte, if the char is in the mac-roman charset.
    pub fn encode(self, c: char) -> Option<u8> {
        let raw_c: u16 = (c as u32).try_into().ok()?;
        if raw_c < Self::START_REMAP as u16 {
            Some(raw_c as u8)
        } else {
            MAC_ROMAN_ENCODE
                .binary_search_by_key(&raw_c, |(unic, _)| *unic)
                .ok()
                .map(|idx| MAC_ROMAN_ENCODE[idx].1)
        }
    }
}

/// Maps the values 128..=255 to unicode.
#[rustfmt::skip]
static MAC_ROMAN_DECODE: [u16; 128] = [
    196, 197, 199, 201, 209, 214, 220, 225, 224, 226, 228, 227, 229, 231, 233,
    232, 234, 235, 237, 236, 238, 239, 241, 243, 242, 244, 246, 245, 250, 249,
    251, 252, 8224, 176, 162, 163, 167, 8226, 182, 223, 174, 169, 8482, 180,
    168, 8800, 198, 216, 8734, 177, 8804, 8805, 165, 181, 8706, 8721, 8719,
    960, 8747, 170, 186, 937, 230, 248, 191, 161, 172, 8730, 402, 8776, 8710,
    171, 187, 8230, 160, 192, 195, 213, 338, 339, 8211, 8212, 8220, 8221, 8216,
    8217, 247, 9674, 255, 376, 8260, 8364, 8249, 8250, 64257, 64258, 8225, 183,
    8218, 8222, 8240, 194, 202, 193, 203, 200, 205, 206, 207, 204, 211, 212,
    63743, 210, 218, 219, 217, 305, 710, 732, 175, 728, 729, 730, 184, 733,
    731, 711,
];

/// Pairs (sorted) unicode values with Mac Roman values.
#[rustfmt::skip]
static MAC_ROMAN_ENCODE: [(u16, u8); 128] = [
    (160, 202), (161, 193), (162, 162), (163, 163),
    (165, 180), (167, 164), (168, 172), (169, 169),
    (170, 187), (171, 199), (172, 194), (174, 168),
    (175, 248), (176, 161), (177, 177), (180, 171),
    (181, 181), (182, 166), (183, 225), (184, 252),
    (186, 188), (187, 200), (191, 192), (192, 203),
    (193, 231), (194, 229), (195, 204), (196, 128),
    (197, 129), (198, 174), (199, 130), (200, 233),
    (201, 131), (202, 230), (203, 232), (204, 237),
    (205, 234), (206, 235), (207, 236), (209, 132),
    (210, 241), (211, 238), (212, 239), (213, 205),
    (214, 133), (216, 175), (217, 244), (218, 242),
    (219, 243), (220, 134), (223, 167), (224, 136),
    (225, 135), (226, 137), (227, 139), (228, 138),
    (229, 140), (230, 190), (231, 141), (232, 143),
    (233, 142), (234, 144), (235, 145), (236, 147),
    (237, 146), (238, 148), (239, 149), (241, 150),
    (242, 152), (243, 151), (244, 153), (245, 155),
    (246, 154), (247, 214), (248, 191), (249, 157),
    (250, 156), (251, 158), (252, 159), (255, 216),
    (305, 245), (338, 206), (339, 207), (376, 217),
    (402, 196), (710, 246), (711, 255), (728, 249),
    (729, 250), (730, 251), (731, 254), (732, 247),
    (733, 253), (937, 189), (960, 185), (8211, 208),
    (8212, 209), (8216, 212), (8217, 213), (8218, 226),
    (8220, 210), (8221, 211), (8222, 227), (8224, 160),
    (8225, 224), (8226, 165), (8230, 201), (8240, 228),
    (8249, 220), (8250, 221), (8260, 218), (8364, 219),
    (8482, 170), (8706, 182), (8710, 198), (8719, 184),
    (8721, 183), (8730, 195), (8734, 176), (8747, 186),
    (8776, 197), (8800, 173), (8804, 178), (8805, 179),
    (9674, 215), (63743, 240), (64257, 222), (64258, 223),
];

#[cfg(test)]
mod tests {
    use font_test_data::tables;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn lazy_entries() {
        let buf = tables::name();
        let name = Name::read(FontData::new(buf.as_slice())).unwrap();
        assert!(name.is_compiled());
        let entries = name.entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].platform(), PlatformId::WINDOWS);
        assert_eq!(entries[0].decoded(), "Test");
        assert_eq!(entries[0].label(), "Font Family");
        assert_eq!(entries[1].platform().to_string(), "Mac");
        assert_eq!(entries[1].decoded(), "Test");
        // still holds the original bytes
        assert!(name.is_compiled());
        assert_eq!(&*name.to_bytes(), buf.as_slice());
    }

    #[test]
    fn rebuild_is_idempotent() {
        let mut name = Name::new();
        name.add_unicode_entry(NameId::FAMILY_NAME, "Fancy").unwrap();
        name.add_microsoft_english_entry(NameId::FULL_NAME, "Fancy Bold")
            .unwrap();
        name.add_mac_english_entry(NameId::COPYRIGHT_NOTICE, "© Müller")
            .unwrap();
        let first = name.to_bytes().into_owned();
        let second = name.to_bytes().into_owned();
        assert_eq!(first, second);
        assert_eq!(name.compile(), first.as_slice());
        assert_eq!(name.compile(), first.as_slice());
        assert!(name.is_compiled());
        assert_eq!(&*name.to_bytes(), first.as_slice());

        // header and sequential offsets
        assert_eq!(&first[..6], &[0, 0, 0, 3, 0, 42]);
        let reparsed = Name::from_bytes(first);
        let entries = reparsed.entries().unwrap();
        assert_eq!(entries[0].decoded(), "Fancy");
        assert_eq!(entries[1].decoded(), "Fancy Bold");
        assert_eq!(entries[2].decoded(), "© Müller");
        assert_eq!(entries[2].value, vec![0xA9, b' ', b'M', 0x9F, b'l', b'l', b'e', b'r']);
    }

    #[test]
    fn push_after_parse_keeps_existing_entries() {
        let buf = tables::name();
        let mut name = Name::read(FontData::new(buf.as_slice())).unwrap();
        name.add_microsoft_english_entry(NameId::SUBFAMILY_NAME, "Regular")
            .unwrap();
        assert!(!name.is_compiled());
        let bytes = name.compile().to_vec();
        let entries = Name::from_bytes(bytes).entries().unwrap().to_vec();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].decoded(), "Test");
        assert_eq!(entries[2].decoded(), "Regular");
        assert_eq!(entries[2].name_id, NameId::SUBFAMILY_NAME);
    }

    #[test]
    fn mac_roman_rejects_unencodable() {
        let mut name = Name::new();
        assert_eq!(
            name.add_mac_english_entry(NameId::FAMILY_NAME, "日本"),
            Err(NameError::Unencodable('日'))
        );
        assert!(name.entries().unwrap().is_empty());
    }

    #[test]
    fn malformed_storage() {
        // one record pointing past the end of the string storage
        let buf = font_test_data::be_buffer! {
            0u16, 1u16, 18u16,
            3u16, 1u16, 0x409u16, 1u16, 10u16, 0u16
        };
        let mut name = Name::from_bytes(buf.to_vec());
        assert_eq!(name.entries(), Err(ReadError::OutOfBounds));
        assert!(matches!(
            name.add_unicode_entry(NameId::FAMILY_NAME, "x"),
            Err(NameError::Read(ReadError::OutOfBounds))
        ));
        // a failed edit leaves the bytes in place
        assert!(name.is_compiled());
        assert_eq!(&*name.to_bytes(), buf.as_slice());
    }

    #[test]
    fn platform_labels() {
        assert_eq!(PlatformId(0).to_string(), "Unicode");
        assert_eq!(PlatformId(3).to_string(), "Microsoft");
        assert_eq!(PlatformId(7).to_string(), "Platform 7");
    }

    #[rstest]
    #[case::unicode(0, 3, Encoding::Utf16Be)]
    #[case::windows_bmp(3, 1, Encoding::Utf16Be)]
    #[case::mac_roman(1, 0, Encoding::MacRoman)]
    #[case::windows_symbol(3, 0, Encoding::Unknown)]
    #[case::windows_ucs4(3, 10, Encoding::Unknown)]
    #[case::mac_japanese(1, 1, Encoding::Unknown)]
    fn encodings(#[case] platform_id: u16, #[case] encoding_id: u16, #[case] expected: Encoding) {
        assert_eq!(Encoding::new(platform_id, encoding_id), expected);
    }

    #[test]
    fn unknown_encoding_is_lossy_utf8() {
        for encoding_id in [0, 2, 10] {
            let entry = NameEntry {
                platform_id: 3,
                encoding_id,
                language_id: 0,
                name_id: NameId::FAMILY_NAME,
                value: b"Plain".to_vec(),
            };
            assert_eq!(entry.decoded(), "Plain");
        }
    }

    #[test]
    fn mac_roman() {
        static INPUT: &str = "Joachim Müller-Lancé";
        for c in INPUT.chars() {
            let enc = MacRomanMapping.encode(c).unwrap();
            assert_eq!(MacRomanMapping.decode(enc), c);
        }
    }

    #[test]
    fn lone_surrogate_at_end() {
        let entry = NameEntry {
            platform_id: 0,
            encoding_id: 3,
            language_id: 0,
            name_id: NameId::FAMILY_NAME,
            // DEVANAGARI LETTER SHORT A (U+0904), unpaired high surrogate (0xD800)
            value: vec![0x09, 0x04, 0xD8, 0x00],
        };
        assert!(entry.chars().eq(['ऄ', char::REPLACEMENT_CHARACTER]));
    }
}
