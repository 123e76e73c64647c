//! The table codecs, and [`Table`], which holds any decoded table

pub mod cmap;
pub mod head;
pub mod hhea;
pub mod layout;
pub mod name;
pub mod os2;

use std::{borrow::Cow, collections::BTreeMap};

use types::Tag;

use crate::{
    font_data::FontData,
    read::{FontRead, ReadError},
    write::{dump_table, FontWrite, TableWriter},
};

use self::{cmap::Cmap, head::Head, hhea::Hhea, layout::LayoutTable, name::Name, os2::Os2};

/// 'maxp'
pub const MAXP: Tag = Tag::new(b"maxp");
/// 'hmtx'
pub const HMTX: Tag = Tag::new(b"hmtx");

/// A decoded table.
///
/// Tables without a registered codec are kept as [`Opaque`] bytes.
#[derive(Clone, Debug)]
pub enum Table {
    Head(Head),
    Hhea(Hhea),
    Os2(Os2),
    Name(Name),
    Cmap(Cmap),
    /// GSUB or GPOS
    Layout(LayoutTable),
    Opaque(Opaque),
}

/// Raw table bytes, written back unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Opaque {
    data: Vec<u8>,
}

impl Opaque {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Opaque { data: data.into() }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl FontRead<'_> for Opaque {
    fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        Ok(Opaque::new(data.as_bytes()))
    }
}

impl FontWrite for Opaque {
    fn write_into(&self, writer: &mut TableWriter) {
        writer.write_slice(&self.data)
    }
}

impl Table {
    /// The bytes that are written out for this table.
    ///
    /// Tables that keep the bytes they were read from borrow them; the
    /// others are encoded on each call.
    pub fn to_bytes(&self) -> Cow<'_, [u8]> {
        match self {
            Table::Head(table) => Cow::Owned(dump_table(table)),
            Table::Hhea(table) => Cow::Owned(dump_table(table)),
            Table::Os2(table) => Cow::Owned(dump_table(table)),
            Table::Name(table) => table.to_bytes(),
            Table::Cmap(table) => Cow::Borrowed(table.as_bytes()),
            Table::Layout(table) => Cow::Borrowed(table.as_bytes()),
            Table::Opaque(table) => Cow::Borrowed(table.as_bytes()),
        }
    }

    pub fn as_head(&self) -> Option<&Head> {
        match self {
            Table::Head(table) => Some(table),
            _ => None,
        }
    }

    pub fn as_head_mut(&mut self) -> Option<&mut Head> {
        match self {
            Table::Head(table) => Some(table),
            _ => None,
        }
    }

    pub fn as_hhea(&self) -> Option<&Hhea> {
        match self {
            Table::Hhea(table) => Some(table),
            _ => None,
        }
    }

    pub fn as_os2(&self) -> Option<&Os2> {
        match self {
            Table::Os2(table) => Some(table),
            _ => None,
        }
    }

    pub fn as_name(&self) -> Option<&Name> {
        match self {
            Table::Name(table) => Some(table),
            _ => None,
        }
    }

    pub fn as_name_mut(&mut self) -> Option<&mut Name> {
        match self {
            Table::Name(table) => Some(table),
            _ => None,
        }
    }

    pub fn as_cmap(&self) -> Option<&Cmap> {
        match self {
            Table::Cmap(table) => Some(table),
            _ => None,
        }
    }

    pub fn as_layout(&self) -> Option<&LayoutTable> {
        match self {
            Table::Layout(table) => Some(table),
            _ => None,
        }
    }

    pub fn as_opaque(&self) -> Option<&Opaque> {
        match self {
            Table::Opaque(table) => Some(table),
            _ => None,
        }
    }
}

impl FontWrite for Table {
    fn write_into(&self, writer: &mut TableWriter) {
        writer.write_slice(&self.to_bytes())
    }
}

macro_rules! table_from {
    ($variant:ident, $ty:ty) => {
        impl From<$ty> for Table {
            fn from(src: $ty) -> Table {
                Table::$variant(src)
            }
        }
    };
}

table_from!(Head, Head);
table_from!(Hhea, Hhea);
table_from!(Os2, Os2);
table_from!(Name, Name);
table_from!(Cmap, Cmap);
table_from!(Layout, LayoutTable);
table_from!(Opaque, Opaque);

/// A function that decodes the bytes of one table.
pub type DecodeFn = fn(FontData) -> Result<Table, ReadError>;

/// The set of codecs used to decode tables, keyed by tag.
///
/// Tables whose tag has no codec are decoded as [`Opaque`].
#[derive(Clone, Debug)]
pub struct TableCodecs {
    codecs: BTreeMap<Tag, DecodeFn>,
}

fn decode_as<T>(data: FontData) -> Result<Table, ReadError>
where
    T: for<'a> FontRead<'a> + Into<Table>,
{
    T::read(data).map(Into::into)
}

impl TableCodecs {
    /// A set with no codecs: every table is opaque.
    pub fn empty() -> Self {
        TableCodecs {
            codecs: BTreeMap::new(),
        }
    }

    /// Register a codec, returning the one it replaces.
    pub fn insert(&mut self, tag: Tag, decode: DecodeFn) -> Option<DecodeFn> {
        self.codecs.insert(tag, decode)
    }

    /// Remove the codec for `tag`, so that table becomes opaque.
    pub fn remove(&mut self, tag: Tag) -> Option<DecodeFn> {
        self.codecs.remove(&tag)
    }

    pub fn contains(&self, tag: Tag) -> bool {
        self.codecs.contains_key(&tag)
    }

    /// The tags with a registered codec, in ascending order.
    pub fn tags(&self) -> impl Iterator<Item = Tag> + '_ {
        self.codecs.keys().copied()
    }

    /// Decode the bytes of the table `tag`.
    pub fn decode(&self, tag: Tag, data: FontData) -> Result<Table, ReadError> {
        match self.codecs.get(&tag) {
            Some(decode) => decode(data),
            None => Ok(Table::Opaque(Opaque::new(data.as_bytes()))),
        }
    }
}

impl Default for TableCodecs {
    /// Codecs for head, hhea, OS/2, name, cmap, GSUB and GPOS.
    fn default() -> Self {
        let mut codecs = Self::empty();
        codecs.insert(head::TAG, decode_as::<Head>);
        codecs.insert(hhea::TAG, decode_as::<Hhea>);
        codecs.insert(os2::TAG, decode_as::<Os2>);
        codecs.insert(name::TAG, decode_as::<Name>);
        codecs.insert(cmap::TAG, decode_as::<Cmap>);
        codecs.insert(layout::GSUB_TAG, decode_as::<LayoutTable>);
        codecs.insert(layout::GPOS_TAG, decode_as::<LayoutTable>);
        codecs
    }
}

#[cfg(test)]
mod tests {
    use font_test_data::tables;

    use super::*;

    #[test]
    fn default_codecs() {
        let codecs = TableCodecs::default();
        let head = tables::head();
        let decoded = codecs.decode(head::TAG, FontData::new(head.as_slice())).unwrap();
        assert_eq!(decoded.as_head().map(|head| head.units_per_em), Some(2048));
        assert!(decoded.as_hhea().is_none());
        assert_eq!(&*decoded.to_bytes(), head.as_slice());

        let maxp = tables::maxp();
        let decoded = codecs.decode(MAXP, FontData::new(maxp.as_slice())).unwrap();
        assert_eq!(decoded.as_opaque().map(Opaque::as_bytes), Some(maxp.as_slice()));
    }

    #[test]
    fn removed_codec_is_opaque() {
        let mut codecs = TableCodecs::default();
        assert!(codecs.contains(cmap::TAG));
        codecs.remove(cmap::TAG);
        // not even a valid cmap
        let decoded = codecs.decode(cmap::TAG, FontData::new(&[1, 2, 3])).unwrap();
        assert!(decoded.as_opaque().is_some());
        assert!(TableCodecs::empty().tags().next().is_none());
    }

    #[test]
    fn decode_errors_propagate() {
        let codecs = TableCodecs::default();
        let short = FontData::new(&[0; 10]);
        assert_eq!(
            codecs.decode(head::TAG, short).unwrap_err(),
            ReadError::OutOfBounds
        );
    }
}
