//! test data shared between the sfnt crates.
//!
//! Every fixture is built in code, so there are no binary files to keep in
//! sync with the tests that use them.

pub mod bebuffer;
pub mod cmap;
pub mod container;
pub mod tables;

use font_types::Tag;

/// The tables of a small but complete TrueType-flavored font.
///
/// Tables are returned in alphabetical (not tag) order, which is neither the
/// directory order nor the order used when writing.
pub fn simple_font_tables() -> Vec<(Tag, Vec<u8>)> {
    vec![
        (Tag::new(b"cmap"), cmap::simple_cmap().into_vec()),
        (Tag::new(b"GSUB"), tables::gsub().into_vec()),
        (Tag::new(b"head"), tables::head().into_vec()),
        (Tag::new(b"hhea"), tables::hhea().into_vec()),
        (Tag::new(b"maxp"), tables::maxp().into_vec()),
        (Tag::new(b"name"), tables::name().into_vec()),
        (Tag::new(b"OS/2"), tables::os2(4).into_vec()),
        // an unknown table with a length that needs padding
        (Tag::new(b"zzzz"), vec![1, 2, 3, 4, 5]),
    ]
}

/// Borrow a list of owned tables in the shape the container builders take.
pub fn borrow_tables(tables: &[(Tag, Vec<u8>)]) -> Vec<(Tag, &[u8])> {
    tables
        .iter()
        .map(|(tag, data)| (*tag, data.as_slice()))
        .collect()
}

/// [`simple_font_tables`] assembled as a TrueType file.
pub fn simple_ttf() -> Vec<u8> {
    let tables = simple_font_tables();
    container::build_sfnt(0x00010000, &borrow_tables(&tables))
}
