use std::{
    borrow::Borrow,
    fmt::{Debug, Display, Formatter},
    str::FromStr,
};

/// A four-byte table or container identifier.
///
/// Tags identify tables inside an sfnt (`head`, `cmap`, `OS/2`) and also
/// double as the magic numbers that open a font file (`OTTO`, `ttcf`, `wOFF`).
///
/// A tag is compared and ordered by its big-endian `u32` value, so sorting a
/// list of tags yields the byte-wise order required by the table directory.
///
/// Tags read from a file are never validated; fonts in the wild contain
/// tags with non-printable bytes and these must round-trip unchanged. Use
/// [`Tag::new_checked`] when constructing a tag from user input.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Tag([u8; 4]);

// # SAFETY:
//
// `Tag` is a transparent wrapper around a byte array.
#[cfg(feature = "bytemuck")]
unsafe impl bytemuck::Zeroable for Tag {}
#[cfg(feature = "bytemuck")]
unsafe impl bytemuck::AnyBitPattern for Tag {}

impl Tag {
    /// Construct a `Tag` from raw bytes, without validation.
    pub const fn new(src: &[u8; 4]) -> Tag {
        Tag(*src)
    }

    /// Attempt to create a `Tag` from a string of bytes.
    ///
    /// The input must be exactly four bytes long, and each byte must be
    /// ASCII.
    pub const fn new_checked(src: &[u8]) -> Result<Self, InvalidTag> {
        if src.len() != 4 {
            return Err(InvalidTag::InvalidLength(src.len()));
        }
        let mut raw = [0; 4];
        let mut i = 0;
        while i < 4 {
            let byte = src[i];
            if byte > 0x7F {
                return Err(InvalidTag::InvalidByte { pos: i, byte });
            }
            raw[i] = byte;
            i += 1;
        }
        Ok(Tag(raw))
    }

    /// Construct a new `Tag` from a `u32`, interpreting it big-endian.
    pub const fn from_u32(src: u32) -> Self {
        Self::from_be_bytes(src.to_be_bytes())
    }

    /// Return the big-endian `u32` value of this tag.
    pub const fn to_u32(self) -> u32 {
        u32::from_be_bytes(self.0)
    }

    /// Create a tag from raw big-endian bytes.
    pub const fn from_be_bytes(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// Return the memory representation of this tag.
    pub const fn to_be_bytes(self) -> [u8; 4] {
        self.0
    }

    /// Return the tag formatted as a `0x`-prefixed, zero-padded hex number.
    ///
    /// ```
    /// # use font_types::Tag;
    /// assert_eq!(Tag::from_u32(0x00010000).to_hex(), "0x00010000");
    /// assert_eq!(Tag::new(b"OTTO").to_hex(), "0x4f54544f");
    /// ```
    pub fn to_hex(self) -> String {
        format!("0x{:08x}", self.to_u32())
    }
}

/// An error representing an invalid tag.
///
/// This is returned as an error from [`Tag::new_checked`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidTag {
    /// The tag was not exactly 4 bytes in length.
    InvalidLength(usize),
    /// The tag contained a byte outside of the ASCII range.
    InvalidByte { pos: usize, byte: u8 },
}

impl FromStr for Tag {
    type Err = InvalidTag;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        Tag::new_checked(src.as_bytes())
    }
}

impl crate::raw::Scalar for Tag {
    type Raw = [u8; 4];

    fn to_raw(self) -> Self::Raw {
        self.to_be_bytes()
    }

    fn from_raw(raw: Self::Raw) -> Self {
        Self::from_be_bytes(raw)
    }
}

impl std::error::Error for InvalidTag {}

impl From<u32> for Tag {
    fn from(src: u32) -> Tag {
        Tag::from_u32(src)
    }
}

impl From<Tag> for u32 {
    fn from(src: Tag) -> u32 {
        src.to_u32()
    }
}

impl Borrow<[u8; 4]> for Tag {
    fn borrow(&self) -> &[u8; 4] {
        &self.0
    }
}

impl PartialEq<[u8; 4]> for Tag {
    fn eq(&self, other: &[u8; 4]) -> bool {
        &self.0 == other
    }
}

impl PartialEq<str> for Tag {
    fn eq(&self, other: &str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl PartialEq<&str> for Tag {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl AsRef<[u8]> for Tag {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for byte in self.0 {
            if (0x20..=0x7E).contains(&byte) {
                write!(f, "{}", byte as char)?;
            } else {
                write!(f, "{{0x{:02X}}}", byte)?;
            }
        }
        Ok(())
    }
}

impl Display for InvalidTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidTag::InvalidByte { pos, byte } => {
                write!(f, "Invalid byte 0x{byte:X} at index {pos}")
            }
            InvalidTag::InvalidLength(len) => {
                write!(f, "Tag must be exactly 4 bytes (got {len})")
            }
        }
    }
}

impl Debug for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tag({})", self)
    }
}

// a meaningless placeholder value.
impl Default for Tag {
    fn default() -> Self {
        Tag([b' '; 4])
    }
}

// serializes to a string in human-readable formats, and to bytes otherwise.
#[cfg(feature = "serde")]
impl serde::Serialize for Tag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if serializer.is_human_readable() {
            std::str::from_utf8(&self.0)
                .map_err(serde::ser::Error::custom)?
                .serialize(serializer)
        } else {
            self.0.serialize(serializer)
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Tag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct TagStrVisitor;
        impl serde::de::Visitor<'_> for TagStrVisitor {
            type Value = Tag;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(formatter, "a four-byte ascii string")
            }
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                v.parse().map_err(serde::de::Error::custom)
            }
        }
        if deserializer.is_human_readable() {
            deserializer.deserialize_str(TagStrVisitor)
        } else {
            <[u8; 4]>::deserialize(deserializer).map(|raw| Tag::new(&raw))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_construction() {
        assert_eq!(Tag::new_checked(b"head"), Ok(Tag::new(b"head")));
        assert_eq!(Tag::new_checked(b"OS/2"), Ok(Tag::new(b"OS/2")));
        assert_eq!(Tag::new_checked(b""), Err(InvalidTag::InvalidLength(0)));
        assert_eq!(Tag::new_checked(b"abc"), Err(InvalidTag::InvalidLength(3)));
        assert_eq!(
            Tag::new_checked(b"abcde"),
            Err(InvalidTag::InvalidLength(5))
        );
        assert_eq!(
            Tag::new_checked(&[b'a', 0xC3, b'b', b'c']),
            Err(InvalidTag::InvalidByte { pos: 1, byte: 0xC3 })
        );
        assert!("cvt ".parse::<Tag>().is_ok());
        assert!("é".parse::<Tag>().is_err());
    }

    #[test]
    fn u32_conversion() {
        let tag = Tag::new(b"head");
        assert_eq!(tag.to_u32(), 0x68656164);
        assert_eq!(Tag::from_u32(0x68656164), tag);
        assert_eq!(Tag::from_u32(0x00010000).to_be_bytes(), [0, 1, 0, 0]);
    }

    #[test]
    fn ordering_matches_numeric_value() {
        let mut tags = vec![
            Tag::new(b"name"),
            Tag::new(b"OS/2"),
            Tag::new(b"cmap"),
            Tag::new(b"GSUB"),
        ];
        tags.sort();
        let sorted_by_value = {
            let mut v = tags.clone();
            v.sort_by_key(|t| t.to_u32());
            v
        };
        assert_eq!(tags, sorted_by_value);
        assert_eq!(tags[0], Tag::new(b"GSUB"));
    }

    #[test]
    fn display() {
        assert_eq!(Tag::new(b"OS/2").to_string(), "OS/2");
        let bad_tag = Tag::new(&[0x19, b'z', b'@', 0x7F]);
        assert_eq!(bad_tag.to_string(), "{0x19}z@{0x7F}");
        assert_eq!(format!("{:?}", Tag::new(b"glyf")), "Tag(glyf)");
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[derive(PartialEq, Eq, Debug, serde::Serialize, serde::Deserialize)]
    struct TableRecord {
        tag: Tag,
    }

    #[test]
    fn serde_json_good() {
        let record = TableRecord {
            tag: Tag::new(b"cmap"),
        };

        let json_str = serde_json::to_string(&record).unwrap();
        assert_eq!(json_str, r#"{"tag":"cmap"}"#);

        let de: TableRecord = serde_json::from_str(&json_str).unwrap();
        assert_eq!(de, record);
    }

    #[test]
    #[should_panic(expected = "invalid utf-8")]
    fn serde_json_bad() {
        let record = TableRecord {
            tag: Tag::new(&[3, 244, 0, 221]),
        };

        serde_json::to_string(&record).unwrap();
    }
}
