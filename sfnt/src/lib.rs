//! Reading, editing and writing sfnt font files
//!
//! This crate reads OpenType and TrueType fonts, [WOFF 1.0] files and
//! TrueType collections into a [`Font`]: a scaler type plus a set of tables
//! keyed by [`Tag`][types::Tag]. Fonts can be edited and then written back
//! out as a plain OpenType/TrueType file, with the table directory and all
//! checksums recomputed.
//!
//! A handful of tables are decoded into structured types (see [`tables`]);
//! everything else is kept as opaque bytes and written back unchanged.
//!
//! # Example
//!
//! ```no_run
//! # let path_to_my_font_file = std::path::Path::new("");
//! use sfnt::tables::name::NameId;
//!
//! let font_bytes = std::fs::read(path_to_my_font_file).unwrap();
//! let mut font = sfnt::parse(&font_bytes).expect("failed to read font data");
//! println!("{font}");
//!
//! if let Some(name) = font.name_mut() {
//!     name.add_microsoft_english_entry(NameId::FAMILY_NAME, "New Family")
//!         .unwrap();
//! }
//! let new_bytes = font.to_otf_bytes().unwrap();
//! ```
//!
//! [WOFF 1.0]: https://www.w3.org/TR/WOFF/
#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

mod error;
mod font;
pub mod font_builder;
mod font_data;
pub mod parse;
mod read;
pub mod tables;
mod write;

pub use error::Error;
pub use font::Font;
pub use font_builder::compute_checksum;
pub use font_data::{Cursor, FontData};
pub use parse::{FileFormat, FontFile, Parser};
pub use read::{FontRead, ReadError};
pub use tables::{Table, TableCodecs};
pub use write::{dump_table, FontWrite, TableWriter};

/// Public re-export of the font-types crate.
pub extern crate font_types as types;

/// Parse a single font with the default [`Parser`].
///
/// For a collection, this returns the first member.
pub fn parse(data: &[u8]) -> Result<Font, ReadError> {
    Parser::default().parse(data)
}

/// Parse every font in a file with the default [`Parser`].
///
/// A file that is not a collection yields a single font.
pub fn parse_collection(data: &[u8]) -> Result<Vec<Font>, ReadError> {
    Parser::default().parse_collection(data)
}

/// Parse a font or collection with the default [`Parser`].
pub fn parse_file(data: &[u8]) -> Result<FontFile, ReadError> {
    Parser::default().parse_file(data)
}
