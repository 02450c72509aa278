// SPDX-License-Identifier: MIT

//! The 32-byte identifier carried by every address.

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::string::String;
use core::convert::TryFrom;
use core::fmt;
use core::str::FromStr;

use internals::write_err;

/// The number of bytes in a puzzle hash.
pub const PUZZLE_HASH_LEN: usize = 32;

/// A 32-byte puzzle hash, the payload of an address.
///
/// Any byte values are allowed. Displays as 64 lowercase hex digits, `{:#x}` adds a `0x` prefix.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PuzzleHash([u8; PUZZLE_HASH_LEN]);

impl PuzzleHash {
    /// Wraps `bytes`.
    pub const fn new(bytes: [u8; PUZZLE_HASH_LEN]) -> Self { PuzzleHash(bytes) }

    /// Returns a reference to the raw bytes.
    pub fn as_bytes(&self) -> &[u8; PUZZLE_HASH_LEN] { &self.0 }

    /// Returns a copy of the raw bytes.
    pub fn to_bytes(self) -> [u8; PUZZLE_HASH_LEN] { self.0 }

    /// Encodes this puzzle hash as an address under `prefix`.
    ///
    /// # Errors
    ///
    /// If `prefix` is not a valid human-readable prefix.
    #[cfg(feature = "alloc")]
    pub fn to_address(&self, prefix: &str) -> Result<String, crate::EncodeError> {
        crate::encode(&self.0, prefix)
    }
}

impl From<[u8; PUZZLE_HASH_LEN]> for PuzzleHash {
    fn from(bytes: [u8; PUZZLE_HASH_LEN]) -> Self { PuzzleHash(bytes) }
}

impl From<PuzzleHash> for [u8; PUZZLE_HASH_LEN] {
    fn from(hash: PuzzleHash) -> Self { hash.0 }
}

impl AsRef<[u8]> for PuzzleHash {
    fn as_ref(&self) -> &[u8] { &self.0 }
}

impl TryFrom<&[u8]> for PuzzleHash {
    type Error = LengthError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        <[u8; PUZZLE_HASH_LEN]>::try_from(bytes)
            .map(PuzzleHash)
            .map_err(|_| LengthError { found: bytes.len() })
    }
}

impl fmt::LowerHex for PuzzleHash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut buf = [0u8; PUZZLE_HASH_LEN * 2];
        // The buffer is exactly twice the input, encoding cannot fail.
        hex::encode_to_slice(self.0, &mut buf).map_err(|_| fmt::Error)?;
        if f.alternate() {
            f.write_str("0x")?;
        }
        // Hex digits are ASCII.
        f.write_str(core::str::from_utf8(&buf).map_err(|_| fmt::Error)?)
    }
}

impl fmt::Display for PuzzleHash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { fmt::LowerHex::fmt(self, f) }
}

impl fmt::Debug for PuzzleHash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "PuzzleHash({:x})", self) }
}

/// Parses 64 hex digits, with or without a leading `0x`.
impl FromStr for PuzzleHash {
    type Err = ParseHashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
        if digits.len() != PUZZLE_HASH_LEN * 2 {
            return Err(ParseHashError::Length(digits.len()));
        }
        let mut bytes = [0u8; PUZZLE_HASH_LEN];
        hex::decode_to_slice(digits, &mut bytes)?;
        Ok(PuzzleHash(bytes))
    }
}

/// A byte sequence that should have been a puzzle hash has the wrong length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthError {
    /// The number of bytes actually found.
    pub found: usize,
}

impl fmt::Display for LengthError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid puzzle hash length {}, must be {} bytes", self.found, PUZZLE_HASH_LEN)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LengthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> { None }
}

/// Error parsing a puzzle hash from a hex string.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ParseHashError {
    /// Wrong number of hex digits (after any `0x` prefix).
    Length(usize),
    /// Not valid hex.
    Hex(hex::FromHexError),
}

impl From<hex::FromHexError> for ParseHashError {
    fn from(e: hex::FromHexError) -> Self { ParseHashError::Hex(e) }
}

impl fmt::Display for ParseHashError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use ParseHashError::*;

        match *self {
            Length(n) => write!(f, "expected {} hex digits, found {}", PUZZLE_HASH_LEN * 2, n),
            Hex(ref e) => write_err!(f, "invalid puzzle hash hex"; e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseHashError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use ParseHashError::*;

        match *self {
            Length(_) => None,
            Hex(ref e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    const HEX: &str = "0b8622123401acf18bda97dfaa9d2c5e81f2be8c737c283e18903b35d209553e";
    const BYTES: [u8; 32] =
        hex!("0b8622123401acf18bda97dfaa9d2c5e81f2be8c737c283e18903b35d209553e");

    #[test]
    fn parse_hex() {
        let expected = PuzzleHash::new(BYTES);
        assert_eq!(HEX.parse::<PuzzleHash>(), Ok(expected));
        assert_eq!(format!("0x{}", HEX).parse::<PuzzleHash>(), Ok(expected));
        assert_eq!(format!("0X{}", HEX.to_uppercase()).parse::<PuzzleHash>(), Ok(expected));
    }

    #[test]
    fn parse_hex_errors() {
        assert_eq!("0x".parse::<PuzzleHash>(), Err(ParseHashError::Length(0)));
        assert_eq!(HEX[..62].parse::<PuzzleHash>(), Err(ParseHashError::Length(62)));
        assert_eq!(
            HEX.replace('b', "g").parse::<PuzzleHash>(),
            Err(ParseHashError::Hex(hex::FromHexError::InvalidHexCharacter { c: 'g', index: 1 }))
        );
    }

    #[test]
    fn format_hex() {
        let hash = PuzzleHash::new(BYTES);
        assert_eq!(hash.to_string(), HEX);
        assert_eq!(format!("{:x}", hash), HEX);
        assert_eq!(format!("{:#x}", hash), format!("0x{}", HEX));
        assert_eq!(format!("{:?}", hash), format!("PuzzleHash({})", HEX));
    }

    #[test]
    fn from_slice() {
        assert_eq!(PuzzleHash::try_from(&BYTES[..]), Ok(PuzzleHash::new(BYTES)));
        assert_eq!(PuzzleHash::try_from(&BYTES[..31]), Err(LengthError { found: 31 }));
        assert_eq!(PuzzleHash::try_from(&[0u8; 33][..]), Err(LengthError { found: 33 }));
    }

    #[test]
    fn conversions() {
        let hash = PuzzleHash::from(BYTES);
        assert_eq!(hash.as_bytes(), &BYTES);
        assert_eq!(hash.as_ref(), &BYTES[..]);
        assert_eq!(<[u8; 32]>::from(hash), BYTES);
        assert_eq!(hash.to_bytes(), BYTES);
    }
}
