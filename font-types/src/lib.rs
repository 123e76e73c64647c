//! Common [scalar data types][data types] used in sfnt font files
//!
//! [data types]: https://docs.microsoft.com/en-us/typography/opentype/spec/otff#data-types

#![cfg_attr(not(feature = "bytemuck"), forbid(unsafe_code))]
#![deny(rustdoc::broken_intra_doc_links)]

mod fixed;
mod fword;
mod glyph_id;
mod longdatetime;
mod name_id;
pub mod raw;
mod tag;
mod version;

pub use fixed::Fixed;
pub use fword::{FWord, UfWord};
pub use glyph_id::{GlyphId, GlyphId16};
pub use longdatetime::LongDateTime;
pub use name_id::NameId;
pub use raw::{BigEndian, FixedSize, Scalar};
pub use tag::{InvalidTag, Tag};
pub use version::MajorMinor;

/// The sfnt version for fonts containing TrueType outlines.
pub const TT_SFNT_VERSION: Tag = Tag::from_u32(0x00010000);
/// The sfnt version for fonts containing CFF outlines.
pub const CFF_SFNT_VERSION: Tag = Tag::new(b"OTTO");
/// The sfnt version used by Apple for TrueType fonts.
pub const TRUE_SFNT_VERSION: Tag = Tag::new(b"true");
/// The sfnt version of old-style PostScript fonts wrapped in an sfnt.
pub const TYP1_SFNT_VERSION: Tag = Tag::new(b"typ1");
/// The header tag for a font collection file.
pub const TTC_HEADER_TAG: Tag = Tag::new(b"ttcf");
/// The signature of a WOFF 1.0 file.
pub const WOFF_SIGNATURE: Tag = Tag::new(b"wOFF");
