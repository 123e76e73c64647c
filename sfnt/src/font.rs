//! The font container: a scaler type and a set of tables keyed by tag

use std::{collections::BTreeMap, fmt};

use types::{Tag, TT_SFNT_VERSION};

use crate::{
    font_builder::compute_checksum,
    tables::{
        cmap::{self, Cmap},
        head::{self, Head},
        hhea::{self, Hhea},
        layout::{self, LayoutTable},
        name::{self, Name},
        os2::{self, Os2},
        Table,
    },
};

/// An sfnt font: the tables of a single OpenType, TrueType or WOFF file, or
/// of one member of a collection.
///
/// Tables are always enumerated in ascending tag order, regardless of the
/// order they were added or stored in.
#[derive(Clone, Debug)]
pub struct Font {
    scaler_type: Tag,
    tables: BTreeMap<Tag, Table>,
}

impl Font {
    /// Create a font with the given scaler type, containing only a default
    /// `head` table.
    pub fn new(scaler_type: Tag) -> Self {
        let mut font = Font {
            scaler_type,
            tables: BTreeMap::new(),
        };
        font.add_table(head::TAG, Head::default());
        font
    }

    // parsers check for the head table before building a font
    pub(crate) fn from_tables(scaler_type: Tag, tables: BTreeMap<Tag, Table>) -> Self {
        Font {
            scaler_type,
            tables,
        }
    }

    /// The kind of outlines in this font, such as
    /// [`TT_SFNT_VERSION`](types::TT_SFNT_VERSION) or
    /// [`CFF_SFNT_VERSION`](types::CFF_SFNT_VERSION).
    pub fn scaler_type(&self) -> Tag {
        self.scaler_type
    }

    pub fn has_table(&self, tag: Tag) -> bool {
        self.tables.contains_key(&tag)
    }

    pub fn table(&self, tag: Tag) -> Option<&Table> {
        self.tables.get(&tag)
    }

    pub fn table_mut(&mut self, tag: Tag) -> Option<&mut Table> {
        self.tables.get_mut(&tag)
    }

    /// Add a table, replacing any existing table with this tag.
    pub fn add_table(&mut self, tag: Tag, table: impl Into<Table>) {
        self.tables.insert(tag, table.into());
    }

    /// Remove a table, returning it if it was present.
    pub fn remove_table(&mut self, tag: Tag) -> Option<Table> {
        self.tables.remove(&tag)
    }

    /// The tags of all tables, in ascending order.
    pub fn tags(&self) -> impl Iterator<Item = Tag> + '_ {
        self.tables.keys().copied()
    }

    /// Iterate over all tables, in ascending tag order.
    pub fn tables(&self) -> impl Iterator<Item = (Tag, &Table)> + '_ {
        self.tables.iter().map(|(tag, table)| (*tag, table))
    }

    pub fn num_tables(&self) -> usize {
        self.tables.len()
    }

    pub fn head(&self) -> Option<&Head> {
        self.table(head::TAG).and_then(Table::as_head)
    }

    pub fn head_mut(&mut self) -> Option<&mut Head> {
        self.table_mut(head::TAG).and_then(Table::as_head_mut)
    }

    pub fn hhea(&self) -> Option<&Hhea> {
        self.table(hhea::TAG).and_then(Table::as_hhea)
    }

    pub fn os2(&self) -> Option<&Os2> {
        self.table(os2::TAG).and_then(Table::as_os2)
    }

    pub fn name(&self) -> Option<&Name> {
        self.table(name::TAG).and_then(Table::as_name)
    }

    pub fn name_mut(&mut self) -> Option<&mut Name> {
        self.table_mut(name::TAG).and_then(Table::as_name_mut)
    }

    pub fn cmap(&self) -> Option<&Cmap> {
        self.table(cmap::TAG).and_then(Table::as_cmap)
    }

    pub fn gsub(&self) -> Option<&LayoutTable> {
        self.table(layout::GSUB_TAG).and_then(Table::as_layout)
    }

    pub fn gpos(&self) -> Option<&LayoutTable> {
        self.table(layout::GPOS_TAG).and_then(Table::as_layout)
    }

    /// The sum of the checksums of every table, as currently encoded.
    ///
    /// This does not include the file header or directory.
    pub fn checksum(&self) -> u32 {
        self.tables.values().fold(0u32, |sum, table| {
            sum.wrapping_add(compute_checksum(&table.to_bytes()))
        })
    }
}

/// Lists the scaler type and the table tags, one per line.
impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parsed font with scalerType={}", self.scaler_type.to_hex())?;
        if self.scaler_type != TT_SFNT_VERSION {
            write!(f, " ({})", self.scaler_type)?;
        }
        for tag in self.tags() {
            write!(f, "\n{tag}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use types::CFF_SFNT_VERSION;

    use super::*;
    use crate::tables::{Opaque, MAXP};

    #[test]
    fn new_font_has_head() {
        let font = Font::new(TT_SFNT_VERSION);
        assert!(font.has_table(head::TAG));
        assert_eq!(font.num_tables(), 1);
        assert_eq!(font.head(), Some(&Head::default()));
        assert!(font.name().is_none());
    }

    #[test]
    fn tags_are_sorted() {
        let mut font = Font::new(TT_SFNT_VERSION);
        font.add_table(Tag::new(b"zzzz"), Opaque::new(vec![1]));
        font.add_table(MAXP, Opaque::new(vec![2]));
        font.add_table(Tag::new(b"GSUB"), Opaque::new(vec![3]));
        font.add_table(Tag::new(b"OS/2"), Opaque::new(vec![4]));
        let tags: Vec<_> = font.tags().map(|tag| tag.to_string()).collect();
        assert_eq!(tags, ["GSUB", "OS/2", "head", "maxp", "zzzz"]);
    }

    #[test]
    fn add_overwrites_and_remove_is_noop_when_absent() {
        let mut font = Font::new(TT_SFNT_VERSION);
        font.add_table(MAXP, Opaque::new(vec![1]));
        font.add_table(MAXP, Opaque::new(vec![2]));
        assert_eq!(
            font.table(MAXP).and_then(Table::as_opaque).map(Opaque::as_bytes),
            Some([2u8].as_slice())
        );
        assert!(font.remove_table(MAXP).is_some());
        assert!(font.remove_table(MAXP).is_none());
        assert!(!font.has_table(MAXP));
        // a typed accessor never panics on the wrong variant
        font.add_table(head::TAG, Opaque::new(vec![0; 54]));
        assert!(font.head().is_none());
    }

    #[test]
    fn display() {
        let mut font = Font::new(TT_SFNT_VERSION);
        font.add_table(MAXP, Opaque::new(vec![]));
        assert_eq!(
            font.to_string(),
            "Parsed font with scalerType=0x00010000\nhead\nmaxp"
        );
        let font = Font::new(CFF_SFNT_VERSION);
        assert_eq!(
            font.to_string(),
            "Parsed font with scalerType=0x4f54544f (OTTO)\nhead"
        );
    }

    #[test]
    fn checksum_sums_tables() {
        let mut font = Font::new(TT_SFNT_VERSION);
        font.remove_table(head::TAG);
        font.add_table(MAXP, Opaque::new(vec![0, 0, 0, 1]));
        font.add_table(Tag::new(b"zzzz"), Opaque::new(vec![0, 0, 0, 2, 1]));
        assert_eq!(font.checksum(), 3 + 0x0100_0000);
    }
}
