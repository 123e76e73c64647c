//! Reading fonts from OpenType, TrueType, WOFF and collection files
//!
//! The container format is chosen from the first four bytes of the file.
//! Every table found in the directory is handed to the [`TableCodecs`] of
//! the [`Parser`]; tables without a codec are kept as opaque bytes.

mod otf;
mod ttc;
mod woff;

use std::{collections::BTreeMap, io::Read};

use types::{
    Tag, CFF_SFNT_VERSION, TRUE_SFNT_VERSION, TTC_HEADER_TAG, TT_SFNT_VERSION, TYP1_SFNT_VERSION,
    WOFF_SIGNATURE,
};

use crate::{
    error::Error,
    font::Font,
    font_builder::compute_checksum,
    font_data::FontData,
    read::ReadError,
    tables::{head, Table, TableCodecs},
};

/// The container format of a font file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileFormat {
    /// A plain OpenType or TrueType file.
    Sfnt,
    /// A WOFF 1.0 file.
    Woff,
    /// A TrueType collection.
    Collection,
}

impl FileFormat {
    /// Identify the format of `data` from its signature.
    ///
    /// Only the first four bytes are inspected.
    pub fn sniff(data: &[u8]) -> Result<FileFormat, ReadError> {
        let magic: Tag = FontData::new(data)
            .read_at(0)
            .map_err(|_| ReadError::MalformedHeader("file is too short to hold a signature"))?;
        match magic {
            WOFF_SIGNATURE => Ok(FileFormat::Woff),
            TTC_HEADER_TAG => Ok(FileFormat::Collection),
            magic if is_sfnt_version(magic) => Ok(FileFormat::Sfnt),
            magic => Err(ReadError::UnsupportedFormat(magic)),
        }
    }
}

/// `true` if `tag` is one of the scaler types that open an sfnt directory.
pub fn is_sfnt_version(tag: Tag) -> bool {
    [
        TT_SFNT_VERSION,
        CFF_SFNT_VERSION,
        TRUE_SFNT_VERSION,
        TYP1_SFNT_VERSION,
    ]
    .contains(&tag)
}

/// The contents of a font file: either a single font or a collection.
#[derive(Clone, Debug)]
pub enum FontFile {
    Font(Font),
    Collection(Vec<Font>),
}

impl FontFile {
    /// All the fonts in the file, in file order.
    pub fn into_fonts(self) -> Vec<Font> {
        match self {
            FontFile::Font(font) => vec![font],
            FontFile::Collection(fonts) => fonts,
        }
    }
}

/// Reads fonts from bytes.
///
/// The default parser decodes the tables registered in
/// [`TableCodecs::default`] and does not verify table checksums.
///
/// ```no_run
/// # let bytes: Vec<u8> = Vec::new();
/// use sfnt::{Parser, TableCodecs};
///
/// let font = Parser::new()
///     .strict(true)
///     .with_codecs(TableCodecs::empty())
///     .parse(&bytes)
///     .unwrap();
/// ```
#[derive(Clone, Debug, Default)]
pub struct Parser {
    codecs: TableCodecs,
    strict: bool,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare the checksum stored for each table with the checksum of its
    /// data, failing with [`ReadError::InvalidChecksum`] on a mismatch.
    ///
    /// The `checksumAdjustment` field of `head` is treated as zero.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Decode tables with `codecs` instead of the default set.
    pub fn with_codecs(mut self, codecs: TableCodecs) -> Self {
        self.codecs = codecs;
        self
    }

    pub fn codecs(&self) -> &TableCodecs {
        &self.codecs
    }

    /// Parse a single font.
    ///
    /// For a collection, this returns the first member.
    pub fn parse(&self, data: &[u8]) -> Result<Font, ReadError> {
        self.parse_index(data, 0)
    }

    /// Parse the font at `index` in a collection.
    ///
    /// A file that is not a collection is treated as a collection of one.
    pub fn parse_index(&self, data: &[u8], index: u32) -> Result<Font, ReadError> {
        let file = FontData::new(data);
        match FileFormat::sniff(data)? {
            FileFormat::Collection => ttc::parse_member(self, file, index),
            _ if index != 0 => Err(ReadError::InvalidCollectionIndex(index)),
            FileFormat::Sfnt => otf::parse_sfnt(self, file, 0),
            FileFormat::Woff => woff::parse_woff(self, file),
        }
    }

    /// Parse every font in a collection.
    ///
    /// A file that is not a collection yields a single font. If any member
    /// fails to parse, the whole collection fails.
    pub fn parse_collection(&self, data: &[u8]) -> Result<Vec<Font>, ReadError> {
        self.parse_file(data).map(FontFile::into_fonts)
    }

    /// Parse a file, keeping track of whether it was a collection.
    pub fn parse_file(&self, data: &[u8]) -> Result<FontFile, ReadError> {
        let file = FontData::new(data);
        let format = FileFormat::sniff(data)?;
        log::debug!("reading {format:?} file of {} bytes", data.len());
        match format {
            FileFormat::Sfnt => otf::parse_sfnt(self, file, 0).map(FontFile::Font),
            FileFormat::Woff => woff::parse_woff(self, file).map(FontFile::Font),
            FileFormat::Collection => ttc::parse_collection(self, file).map(FontFile::Collection),
        }
    }

    /// Read all of `reader` and parse the result as with [`Parser::parse`].
    pub fn parse_reader(&self, mut reader: impl Read) -> Result<Font, Error> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Ok(self.parse(&data)?)
    }

    // check the stored checksum, if requested, then decode
    fn decode_table(&self, tag: Tag, data: FontData, stored_checksum: u32) -> Result<Table, ReadError> {
        if self.strict {
            let actual = table_checksum(tag, data.as_bytes());
            if actual != stored_checksum {
                return Err(ReadError::InvalidChecksum {
                    tag,
                    expected: stored_checksum,
                    actual,
                });
            }
        }
        self.codecs.decode(tag, data)
    }
}

/// The checksum of a table as stored in a directory.
///
/// For `head`, the `checksumAdjustment` field counts as zero. The field is
/// word-aligned, so its value can be subtracted from the full sum.
pub fn table_checksum(tag: Tag, data: &[u8]) -> u32 {
    let sum = compute_checksum(data);
    if tag != head::TAG {
        return sum;
    }
    match FontData::new(data).read_at::<u32>(head::CHECKSUM_ADJUSTMENT_OFFSET) {
        Ok(adjustment) => sum.wrapping_sub(adjustment),
        Err(_) => sum,
    }
}

fn check_duplicates(tags: impl IntoIterator<Item = Tag>) -> Result<(), ReadError> {
    let mut tags: Vec<_> = tags.into_iter().collect();
    tags.sort_unstable();
    match tags.windows(2).find(|pair| pair[0] == pair[1]) {
        Some(pair) => Err(ReadError::DuplicateTable(pair[0])),
        None => Ok(()),
    }
}

fn finish(scaler_type: Tag, tables: BTreeMap<Tag, Table>) -> Result<Font, ReadError> {
    if !tables.contains_key(&head::TAG) {
        return Err(ReadError::TableIsMissing(head::TAG));
    }
    Ok(Font::from_tables(scaler_type, tables))
}
