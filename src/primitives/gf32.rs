// SPDX-License-Identifier: MIT

//! GF32 - Galois Field over 32 elements.
//!
//! Every character of the data part of an address is a single element of this field, a five-bit
//! group. Only the character mapping and the raw value are needed by the codec, the checksum
//! arithmetic itself is done on packed integers (see [`crate::primitives::checksum`]).

use core::convert::TryFrom;
use core::fmt;

/// Mapping from numeric value to bech32 character.
#[rustfmt::skip]
const CHARS_LOWER: [char; 32] = [
    'q', 'p', 'z', 'r', 'y', '9', 'x', '8', //  +0
    'g', 'f', '2', 't', 'v', 'd', 'w', '0', //  +8
    's', '3', 'j', 'n', '5', '4', 'k', 'h', // +16
    'c', 'e', '6', 'm', 'u', 'a', '7', 'l', // +24
];

/// Mapping from bech32 character (either case) to numeric value.
///
/// E.g., 'z' is CHARS_LOWER[2] and is ASCII value 122 so CHARS_INV[122] == 2
#[rustfmt::skip]
const CHARS_INV: [i8; 128] = [
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    15, -1, 10, 17, 21, 20, 26, 30,  7,  5, -1, -1, -1, -1, -1, -1,
    -1, 29, -1, 24, 13, 25,  9,  8, 23, -1, 18, 22, 31, 27, 19, -1,
     1,  0,  3, 16, 11, 28, 12, 14,  6,  4,  2, -1, -1, -1, -1, -1,
    -1, 29, -1, 24, 13, 25,  9,  8, 23, -1, 18, 22, 31, 27, 19, -1,
     1,  0,  3, 16, 11, 28, 12, 14,  6,  4,  2, -1, -1, -1, -1, -1,
];

/// An element in GF(32), the finite field containing elements `[0,31]` inclusive.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Fe32(pub(crate) u8);

impl Fe32 {
    /// Numeric value maps to bech32 character: 0 == "q".
    pub const Q: Fe32 = Fe32(0);
    /// Numeric value maps to bech32 character: 1 == "p".
    pub const P: Fe32 = Fe32(1);
    /// Numeric value maps to bech32 character: 2 == "z".
    pub const Z: Fe32 = Fe32(2);
    /// Numeric value maps to bech32 character: 3 == "r".
    pub const R: Fe32 = Fe32(3);
    /// Numeric value maps to bech32 character: 4 == "y".
    pub const Y: Fe32 = Fe32(4);
    /// Numeric value maps to bech32 character: 5 == "9".
    pub const _9: Fe32 = Fe32(5);
    /// Numeric value maps to bech32 character: 6 == "x".
    pub const X: Fe32 = Fe32(6);
    /// Numeric value maps to bech32 character: 7 == "8".
    pub const _8: Fe32 = Fe32(7);
    /// Numeric value maps to bech32 character: 8 == "g".
    pub const G: Fe32 = Fe32(8);
    /// Numeric value maps to bech32 character: 9 == "f".
    pub const F: Fe32 = Fe32(9);
    /// Numeric value maps to bech32 character: 10 == "2".
    pub const _2: Fe32 = Fe32(10);
    /// Numeric value maps to bech32 character: 11 == "t".
    pub const T: Fe32 = Fe32(11);
    /// Numeric value maps to bech32 character: 12 == "v".
    pub const V: Fe32 = Fe32(12);
    /// Numeric value maps to bech32 character: 13 == "d".
    pub const D: Fe32 = Fe32(13);
    /// Numeric value maps to bech32 character: 14 == "w".
    pub const W: Fe32 = Fe32(14);
    /// Numeric value maps to bech32 character: 15 == "0".
    pub const _0: Fe32 = Fe32(15);
    /// Numeric value maps to bech32 character: 16 == "s".
    pub const S: Fe32 = Fe32(16);
    /// Numeric value maps to bech32 character: 17 == "3".
    pub const _3: Fe32 = Fe32(17);
    /// Numeric value maps to bech32 character: 18 == "j".
    pub const J: Fe32 = Fe32(18);
    /// Numeric value maps to bech32 character: 19 == "n".
    pub const N: Fe32 = Fe32(19);
    /// Numeric value maps to bech32 character: 20 == "5".
    pub const _5: Fe32 = Fe32(20);
    /// Numeric value maps to bech32 character: 21 == "4".
    pub const _4: Fe32 = Fe32(21);
    /// Numeric value maps to bech32 character: 22 == "k".
    pub const K: Fe32 = Fe32(22);
    /// Numeric value maps to bech32 character: 23 == "h".
    pub const H: Fe32 = Fe32(23);
    /// Numeric value maps to bech32 character: 24 == "c".
    pub const C: Fe32 = Fe32(24);
    /// Numeric value maps to bech32 character: 25 == "e".
    pub const E: Fe32 = Fe32(25);
    /// Numeric value maps to bech32 character: 26 == "6".
    pub const _6: Fe32 = Fe32(26);
    /// Numeric value maps to bech32 character: 27 == "m".
    pub const M: Fe32 = Fe32(27);
    /// Numeric value maps to bech32 character: 28 == "u".
    pub const U: Fe32 = Fe32(28);
    /// Numeric value maps to bech32 character: 29 == "a".
    pub const A: Fe32 = Fe32(29);
    /// Numeric value maps to bech32 character: 30 == "7".
    pub const _7: Fe32 = Fe32(30);
    /// Numeric value maps to bech32 character: 31 == "l".
    pub const L: Fe32 = Fe32(31);

    /// Iterator over all field elements, in numeric order.
    pub fn iter_alpha() -> impl Iterator<Item = Fe32> { (0..32).map(Fe32) }

    /// Creates a field element from a single bech32 character.
    ///
    /// Both cases of the alphabet are accepted.
    #[inline]
    pub fn from_char(c: char) -> Result<Fe32, Error> {
        if !c.is_ascii() {
            return Err(Error::InvalidChar(c));
        }

        // c is ASCII so the cast cannot truncate and the index is in range.
        let index = CHARS_INV[c as usize];
        if index < 0 {
            return Err(Error::InvalidChar(c));
        }
        Ok(Fe32(index as u8))
    }

    /// Creates a field element from the ASCII byte of a character already known to be in the
    /// alphabet.
    ///
    /// # Panics
    ///
    /// If `b` is not a valid bech32 character, in debug builds.
    pub(crate) fn from_char_unchecked(b: u8) -> Fe32 {
        let index = CHARS_INV[usize::from(b & 0x7f)];
        debug_assert!(index >= 0, "from_char_unchecked called on non-bech32 byte {}", b);
        Fe32(index as u8)
    }

    /// Converts the field element to a lowercase bech32 character.
    #[inline]
    pub fn to_char(self) -> char {
        // Indexing fine as we have self.0 in [0, 32) as an invariant.
        CHARS_LOWER[usize::from(self.0)]
    }

    /// Converts the field element to a 5-bit u8, with the high 3 bits set to 0.
    #[inline]
    pub fn to_u8(self) -> u8 { self.0 }

    /// Creates a field element from the low five bits of `byte`, discarding the high three.
    #[inline]
    pub(crate) fn from_low_5_bits(byte: u8) -> Fe32 { Fe32(byte & 0x1f) }
}

impl fmt::Debug for Fe32 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Fe32({})", self.to_char())
    }
}

impl fmt::Display for Fe32 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { fmt::Display::fmt(&self.to_char(), f) }
}

impl From<Fe32> for u8 {
    #[inline]
    fn from(v: Fe32) -> u8 { v.0 }
}

macro_rules! impl_try_from {
    ($($ty:ident)+) => {
        $(
            impl TryFrom<$ty> for Fe32 {
                type Error = Error;

                /// Tries to create an [`Fe32`] type from an unsigned source number type.
                ///
                /// # Errors
                ///
                /// Returns an error if `value` is outside of the range of an `Fe32`.
                #[inline]
                fn try_from(value: $ty) -> Result<Self, Self::Error> {
                    if value > 31 {
                        return Err(Error::InvalidByte(value as u8));
                    }
                    Ok(Fe32(value as u8))
                }
            }
        )+
    }
}
impl_try_from!(u8 u16 u32 u64 u128);

/// Errors converting to a field element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Tried to interpret an integer as a GF32 element but it could not be converted to an u8.
    InvalidByte(u8),
    /// Tried to parse a GF32 element from a character that is not in the bech32 alphabet.
    InvalidChar(char),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Error::*;

        match *self {
            InvalidByte(n) => write!(f, "invalid field element value {} (must be 0-31)", n),
            InvalidChar(c) => write!(f, "invalid bech32 character {:?}", c),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use Error::*;

        match *self {
            InvalidByte(_) | InvalidChar(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverse_charset() {
        fn get_char_value(c: char) -> i8 {
            let charset = "qpzry9x8gf2tvdw0s3jn54khce6mua7l";
            match charset.find(c.to_ascii_lowercase()) {
                Some(x) => x as i8,
                None => -1,
            }
        }

        let expected_rev_charset =
            (0u8..128).map(|i| get_char_value(i as char)).collect::<Vec<_>>();

        assert_eq!(&(CHARS_INV[..]), expected_rev_charset.as_slice());
    }

    #[test]
    fn from_char() {
        for c in &CHARS_LOWER[..] {
            assert!(Fe32::from_char(*c).is_ok())
        }
    }

    #[test]
    fn from_upper_char() {
        let lower = Fe32::from_char('q').expect("failed on q");
        let upper = Fe32::from_char('Q').expect("failed on Q");
        assert_eq!(lower, upper);
    }

    #[test]
    fn excluded_characters() {
        for c in ['1', 'b', 'i', 'o', 'B', 'I', 'O', ' ', '\u{e9}'] {
            assert_eq!(Fe32::from_char(c), Err(Error::InvalidChar(c)));
        }
        assert_eq!(Fe32::from_char('0'), Ok(Fe32::_0));
    }

    #[test]
    fn char_round_trip() {
        for fe in Fe32::iter_alpha() {
            assert_eq!(Fe32::from_char(fe.to_char()), Ok(fe));
            assert_eq!(Fe32::from_char(fe.to_char().to_ascii_uppercase()), Ok(fe));
        }
        assert_eq!(Fe32::iter_alpha().count(), 32);
    }

    #[test]
    fn try_from_range() {
        assert_eq!(Fe32::try_from(31_u8), Ok(Fe32::L));
        assert_eq!(Fe32::try_from(0_u32), Ok(Fe32::Q));
        assert!(Fe32::try_from(32_u8).is_err());
        assert!(Fe32::try_from(32_u16).is_err());
        assert!(Fe32::try_from(32_u32).is_err());
        assert!(Fe32::try_from(32_u64).is_err());
        assert!(Fe32::try_from(32_u128).is_err());
    }
}
