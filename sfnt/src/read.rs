//! Traits for interpreting font data

use types::Tag;

use crate::font_data::FontData;

/// A type that can be read from raw table data.
///
/// This trait is implemented for all table codecs. `read` is responsible for
/// ensuring the input is consistent: fixed-size records must be fully
/// present, declared lengths must match, and arrays must be in bounds.
pub trait FontRead<'a>: Sized {
    /// Read an instance of `Self` from the provided data, performing validation.
    fn read(data: FontData<'a>) -> Result<Self, ReadError>;
}

/// An error that occurs when reading font data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    /// A read went past the end of the available data.
    OutOfBounds,
    /// A fixed-size header was truncated or carried an unexpected magic.
    MalformedHeader(&'static str),
    /// A required table (currently only `head`) is absent.
    TableIsMissing(Tag),
    /// The same tag appears twice in a table directory.
    DuplicateTable(Tag),
    // i64 is flexible enough to store any value we might encounter
    InvalidFormat(i64),
    InvalidArrayLen,
    /// A field value that violates the table's constraints.
    MalformedData(String),
    /// The first four bytes of the file are not a known signature.
    UnsupportedFormat(Tag),
    /// A compressed WOFF table could not be inflated.
    Decompression { tag: Tag, reason: String },
    /// A stored table checksum does not match the table data (strict mode).
    InvalidChecksum { tag: Tag, expected: u32, actual: u32 },
    InvalidCollectionIndex(u32),
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadError::OutOfBounds => write!(f, "An offset was out of bounds"),
            ReadError::MalformedHeader(what) => write!(f, "Malformed header: {what}"),
            ReadError::TableIsMissing(tag) => write!(f, "the {tag} table is missing"),
            ReadError::DuplicateTable(tag) => write!(f, "the {tag} table appears more than once"),
            ReadError::InvalidFormat(x) => write!(f, "Invalid format '{x}'"),
            ReadError::InvalidArrayLen => {
                write!(f, "Specified array length not a multiple of item size")
            }
            ReadError::MalformedData(msg) => write!(f, "Malformed data: '{msg}'"),
            ReadError::UnsupportedFormat(magic) => {
                write!(f, "Unsupported font format (signature {})", magic.to_hex())
            }
            ReadError::Decompression { tag, reason } => {
                write!(f, "failed to decompress the {tag} table: {reason}")
            }
            ReadError::InvalidChecksum {
                tag,
                expected,
                actual,
            } => write!(
                f,
                "invalid checksum for the {tag} table: expected 0x{expected:08X}, found 0x{actual:08X}"
            ),
            ReadError::InvalidCollectionIndex(ix) => {
                write!(f, "Invalid index {ix} for font collection")
            }
        }
    }
}

impl std::error::Error for ReadError {}
