//! fixed-point numerical types

use std::fmt::{Debug, Display, Formatter};

/// 32-bit signed fixed point number with 16 bits of fraction.
///
/// Used for the `fontRevision` field of `head` and for legacy version
/// numbers.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Fixed(i32);

impl Fixed {
    /// Minimum value.
    pub const MIN: Self = Self(i32::MIN);

    /// Maximum value.
    pub const MAX: Self = Self(i32::MAX);

    /// The smallest representable value.
    pub const EPSILON: Self = Self(1);

    /// One.
    pub const ONE: Self = Self(1 << 16);

    const INT_MASK: i32 = !0 << 16;

    /// Creates a new fixed point value from the underlying bit representation.
    pub const fn from_bits(bits: i32) -> Self {
        Self(bits)
    }

    /// Returns the underlying bit representation of the value.
    pub const fn to_bits(self) -> i32 {
        self.0
    }

    /// Creates a value from an integer part and a 16-bit fraction.
    ///
    /// ```
    /// # use font_types::Fixed;
    /// assert_eq!(Fixed::from_parts(2, 0x8000).to_f64(), 2.5);
    /// ```
    pub const fn from_parts(int: i16, fract: u16) -> Self {
        Self(((int as i32) << 16) | fract as i32)
    }

    /// Creates a fixed point value from a 32-bit integer.
    pub const fn from_i32(x: i32) -> Self {
        Self(x << 16)
    }

    /// Returns the integer part, rounded towards negative infinity.
    pub const fn to_i32_floor(self) -> i32 {
        (self.0 & Self::INT_MASK) >> 16
    }

    /// Creates a fixed point value from a float.
    ///
    /// This operation is lossy; the float is rounded to the nearest
    /// representable value.
    pub fn from_f64(x: f64) -> Self {
        Self((x * 65536.0).round() as i32)
    }

    /// Returns the value as an `f64`.
    ///
    /// This operation is lossless.
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 65536.0
    }

    /// Wrapping addition.
    pub fn wrapping_add(self, other: Self) -> Self {
        Self(self.0.wrapping_add(other.0))
    }
}

crate::newtype_scalar!(Fixed, [u8; 4]);

impl Debug for Fixed {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Fixed({})", self.to_f64())
    }
}

impl Display for Fixed {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.to_f64(), f)
    }
}
