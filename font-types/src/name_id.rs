//! Name Identifiers
//!
//! Although these are treated as u16s in the spec, we choose to represent them
//! as a distinct type.

use std::fmt;

/// Identifier for an informational string (or name).
///
/// The predefined identifiers are provided as associated constants on this
/// type. IDs 26 to 255 are reserved for future standard names and IDs 256 to
/// 32767 for font-specific names.
///
/// For more detail, see <https://learn.microsoft.com/en-us/typography/opentype/spec/name#name-ids>
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct NameId(u16);

impl NameId {
    /// Copyright notice.
    pub const COPYRIGHT_NOTICE: Self = Self(0);
    /// Font family name.
    pub const FAMILY_NAME: Self = Self(1);
    /// Font subfamily name.
    pub const SUBFAMILY_NAME: Self = Self(2);
    /// Unique font identifier.
    pub const UNIQUE_ID: Self = Self(3);
    /// Full font name that reflects all family and relevant subfamily descriptors.
    pub const FULL_NAME: Self = Self(4);
    /// Version string.
    pub const VERSION_STRING: Self = Self(5);
    /// PostScript name for the font.
    pub const POSTSCRIPT_NAME: Self = Self(6);
    /// Trademark notice.
    pub const TRADEMARK: Self = Self(7);
    /// Manufacturer name.
    pub const MANUFACTURER: Self = Self(8);
    /// Name of the designer of the typeface.
    pub const DESIGNER: Self = Self(9);
    /// Description of the typeface.
    pub const DESCRIPTION: Self = Self(10);
    /// URL of font vendor.
    pub const VENDOR_URL: Self = Self(11);
    /// URL of typeface designer.
    pub const DESIGNER_URL: Self = Self(12);
    /// License description.
    pub const LICENSE_DESCRIPTION: Self = Self(13);
    /// URL where additional licensing information can be found.
    pub const LICENSE_URL: Self = Self(14);
    /// Typographic (preferred) family name.
    pub const TYPOGRAPHIC_FAMILY_NAME: Self = Self(16);
    /// Typographic (preferred) subfamily name.
    pub const TYPOGRAPHIC_SUBFAMILY_NAME: Self = Self(17);
    /// Compatible full (Macintosh only).
    pub const COMPATIBLE_FULL_NAME: Self = Self(18);
    /// Sample text.
    pub const SAMPLE_TEXT: Self = Self(19);
    /// PostScript CID findfont name.
    pub const POSTSCRIPT_CID_NAME: Self = Self(20);
    /// WWS family name.
    pub const WWS_FAMILY_NAME: Self = Self(21);
    /// WWS subfamily name.
    pub const WWS_SUBFAMILY_NAME: Self = Self(22);
    /// Light background palette.
    pub const LIGHT_BACKGROUND_PALETTE: Self = Self(23);
    /// Dark background palette.
    pub const DARK_BACKGROUND_PALETTE: Self = Self(24);
}

impl NameId {
    /// Create a new identifier from a raw u16 value.
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// Returns the raw u16 value.
    pub const fn to_u16(self) -> u16 {
        self.0
    }

    /// A short english label for the predefined identifiers.
    ///
    /// Returns `None` for reserved and font-specific ids.
    pub const fn label(self) -> Option<&'static str> {
        Some(match self.0 {
            0 => "Copyright Notice",
            1 => "Font Family",
            2 => "Font Subfamily",
            3 => "Unique Identifier",
            4 => "Full Name",
            5 => "Version",
            6 => "PostScript Name",
            7 => "Trademark Notice",
            8 => "Manufacturer",
            9 => "Designer",
            10 => "Description",
            11 => "Vendor URL",
            12 => "Designer URL",
            13 => "License Description",
            14 => "License URL",
            16 => "Preferred Family",
            17 => "Preferred Subfamily",
            18 => "Compatible Full",
            19 => "Sample Text",
            20 => "PostScript CID",
            21 => "WWS Family",
            22 => "WWS Subfamily",
            23 => "Light Background Palette",
            24 => "Dark Background Palette",
            _ => return None,
        })
    }
}

impl From<u16> for NameId {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl fmt::Debug for NameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Writes the english label, or `Name N` for ids without one.
impl fmt::Display for NameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label() {
            Some(label) => f.write_str(label),
            None => write!(f, "Name {}", self.0),
        }
    }
}

crate::newtype_scalar!(NameId, [u8; 2]);
