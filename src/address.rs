// SPDX-License-Identifier: MIT

//! Encoding and decoding of puzzle hash addresses.
//!
//! Address format: `<prefix> 1 <payload> <checksum>`
//!
//! * **prefix**: human-readable prefix, e.g. "xch". Bound into the checksum.
//! * **payload**: the 32-byte puzzle hash regrouped into 52 five-bit characters.
//! * **checksum**: six bech32m checksum characters.
//!
//! Decoding runs a fixed sequence of gates, each one a type that can only be built from the
//! previous one:
//!
//! 1. [`UncheckedAddress::new`]: the string splits into a non-empty prefix and data part at the
//!    rightmost `'1'`.
//! 2. [`UncheckedAddress::validate_characters`]: the prefix is printable ASCII and every data
//!    character is in the bech32 alphabet.
//! 3. [`ParsedAddress::validate_checksum`]: the checksum matches.
//! 4. [`CheckedAddress::puzzle_hash`]: the payload regroups into bytes with valid padding, and
//!    there are exactly 32 of them.
//!
//! The first gate to fail determines the error.

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::string::String;
use core::fmt;
use core::marker::PhantomData;

use internals::write_err;

use crate::primitives::checksum::{self, Bech32m, Checksum, CHECKSUM_LENGTH};
use crate::primitives::gf32::Fe32;
use crate::primitives::hrp::{self, Hrp};
use crate::primitives::iter::{ByteIterExt, Fe32IterExt};
use crate::primitives::regroup::PaddingError;
use crate::puzzle_hash::{LengthError, PuzzleHash, PUZZLE_HASH_LEN};
use crate::SEP;

/// Encodes `puzzle_hash` as an address under `prefix`, writing it to `fmt`.
///
/// The prefix is written in lowercase whatever case it was given in. Does not allocate.
///
/// # Errors
///
/// If `puzzle_hash` is not exactly 32 bytes, if `prefix` is not a valid prefix, or if `fmt`
/// fails.
pub fn encode_to_fmt<W: fmt::Write>(
    fmt: &mut W,
    puzzle_hash: &[u8],
    prefix: &str,
) -> Result<(), EncodeError> {
    if puzzle_hash.len() != PUZZLE_HASH_LEN {
        return Err(EncodeError::InvalidLength(LengthError { found: puzzle_hash.len() }));
    }
    let hrp = Hrp::parse(prefix)?;

    let chars = puzzle_hash
        .iter()
        .copied()
        .bytes_to_fes()
        .checksum::<Bech32m>()
        .with_checksummed_hrp(&hrp)
        .hrp_char(&hrp);
    for c in chars {
        fmt.write_char(c)?;
    }
    Ok(())
}

/// Encodes `puzzle_hash` as an address under `prefix`.
///
/// # Errors
///
/// If `puzzle_hash` is not exactly 32 bytes or `prefix` is not a valid prefix.
#[cfg(feature = "alloc")]
pub fn encode(puzzle_hash: &[u8], prefix: &str) -> Result<String, EncodeError> {
    // Prefix, separator, 52 payload and 6 checksum characters.
    let mut address = String::with_capacity(prefix.len() + 59);
    encode_to_fmt(&mut address, puzzle_hash, prefix)?;
    Ok(address)
}

/// Decodes an address into the puzzle hash it carries.
///
/// The address may be in any case. Does not allocate.
///
/// # Errors
///
/// The error from the first decoding gate that fails, see the module docs.
pub fn decode(address: &str) -> Result<PuzzleHash, DecodeError> {
    UncheckedAddress::new(address)?
        .validate_characters()?
        .validate_checksum::<Bech32m>()?
        .puzzle_hash()
}

/// Decodes an address into the puzzle hash it carries and its prefix, in lowercase.
///
/// # Errors
///
/// Same as [`decode`].
#[cfg(feature = "alloc")]
pub fn decode_address_info(address: &str) -> Result<AddressInfo, DecodeError> {
    let checked =
        UncheckedAddress::new(address)?.validate_characters()?.validate_checksum::<Bech32m>()?;
    let puzzle_hash = checked.puzzle_hash()?;
    Ok(AddressInfo { prefix: checked.hrp().to_lowercase(), puzzle_hash })
}

/// The parts of a decoded address.
#[cfg(feature = "alloc")]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AddressInfo {
    /// The human-readable prefix, lowercase.
    pub prefix: String,
    /// The puzzle hash carried by the address.
    pub puzzle_hash: PuzzleHash,
}

#[cfg(feature = "alloc")]
impl AddressInfo {
    /// Encodes these parts back into an address.
    ///
    /// # Errors
    ///
    /// If `self.prefix` is not a valid prefix.
    pub fn encode(&self) -> Result<String, EncodeError> {
        encode(self.puzzle_hash.as_bytes(), &self.prefix)
    }
}

/// An address split into prefix and data part, nothing else checked yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UncheckedAddress<'s> {
    /// The prefix, exactly as it appeared.
    hrp: &'s str,
    /// The data part, including checksum, exactly as it appeared.
    data: &'s str,
}

impl<'s> UncheckedAddress<'s> {
    /// Splits `s` at its rightmost `'1'`.
    ///
    /// # Errors
    ///
    /// [`DecodeError::MissingSeparator`] if there is no `'1'` or either side of it is empty.
    pub fn new(s: &'s str) -> Result<Self, DecodeError> {
        let sep_pos = s.rfind(SEP).ok_or(DecodeError::MissingSeparator)?;
        // The separator is a single ASCII byte.
        let (hrp, data) = (&s[..sep_pos], &s[sep_pos + 1..]);
        if hrp.is_empty() || data.is_empty() {
            return Err(DecodeError::MissingSeparator);
        }
        Ok(UncheckedAddress { hrp, data })
    }

    /// Returns the prefix, exactly as it appeared in the input.
    pub fn hrp(&self) -> &'s str { self.hrp }

    /// Returns the data part (payload and checksum), exactly as it appeared in the input.
    pub fn data_part(&self) -> &'s str { self.data }

    /// Checks every character of the prefix and data part.
    ///
    /// # Errors
    ///
    /// [`DecodeError::InvalidChar`] naming the first offending character, prefix first.
    pub fn validate_characters(self) -> Result<ParsedAddress<'s>, DecodeError> {
        let hrp = Hrp::parse(self.hrp).map_err(|e| match e.offending_char() {
            Some(c) => DecodeError::InvalidChar(c),
            // Ruled out by the split.
            None => DecodeError::MissingSeparator,
        })?;
        if let Some(c) = self.data.chars().find(|&c| Fe32::from_char(c).is_err()) {
            return Err(DecodeError::InvalidChar(c));
        }
        Ok(ParsedAddress { hrp, data: self.data.as_bytes() })
    }
}

/// An address whose characters are all valid, checksum not checked yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedAddress<'s> {
    hrp: Hrp<'s>,
    /// ASCII bytes of the data part, guaranteed to be valid bech32 characters.
    data: &'s [u8],
}

impl<'s> ParsedAddress<'s> {
    /// Returns the prefix.
    pub fn hrp(&self) -> Hrp<'s> { self.hrp }

    /// Iterates over the data part, payload and checksum, as field elements.
    pub fn fe_iter(&self) -> impl ExactSizeIterator<Item = Fe32> + 's {
        self.data.iter().map(|&b| Fe32::from_char_unchecked(b))
    }

    /// Verifies the checksum of the data part.
    ///
    /// # Errors
    ///
    /// [`DecodeError::ChecksumMismatch`] if the residue is not the target for `Ck`, or the data
    /// part is too short to hold a checksum at all.
    pub fn validate_checksum<Ck: Checksum>(self) -> Result<CheckedAddress<'s, Ck>, DecodeError> {
        if self.data.len() < CHECKSUM_LENGTH {
            return Err(DecodeError::ChecksumMismatch);
        }
        if !checksum::verify_checksum::<Ck, _>(&self.hrp, self.fe_iter()) {
            return Err(DecodeError::ChecksumMismatch);
        }
        Ok(CheckedAddress {
            hrp: self.hrp,
            payload: &self.data[..self.data.len() - CHECKSUM_LENGTH],
            ck: PhantomData,
        })
    }
}

/// An address with a valid checksum, payload not regrouped yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckedAddress<'s, Ck: Checksum = Bech32m> {
    hrp: Hrp<'s>,
    /// ASCII bytes of the payload, checksum stripped.
    payload: &'s [u8],
    ck: PhantomData<Ck>,
}

impl<'s, Ck: Checksum> CheckedAddress<'s, Ck> {
    /// Returns the prefix.
    pub fn hrp(&self) -> Hrp<'s> { self.hrp }

    /// Returns the number of payload field elements, checksum excluded.
    pub fn payload_len(&self) -> usize { self.payload.len() }

    /// Regroups the payload into bytes.
    ///
    /// # Errors
    ///
    /// [`DecodeError::Padding`] if the leftover bits are not valid padding, otherwise
    /// [`DecodeError::InvalidLength`] if there are not exactly 32 bytes.
    pub fn puzzle_hash(&self) -> Result<PuzzleHash, DecodeError> {
        let mut bytes = [0u8; PUZZLE_HASH_LEN];
        let mut found = 0;
        let mut iter = self.payload.iter().map(|&b| Fe32::from_char_unchecked(b)).fes_to_bytes();
        for byte in iter.by_ref() {
            if let Some(slot) = bytes.get_mut(found) {
                *slot = byte;
            }
            found += 1;
        }
        iter.padding_check()?;
        if found != PUZZLE_HASH_LEN {
            return Err(DecodeError::InvalidLength(LengthError { found }));
        }
        Ok(PuzzleHash::new(bytes))
    }
}

/// An error while encoding an address.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EncodeError {
    /// The input is not a 32-byte puzzle hash.
    InvalidLength(LengthError),
    /// The prefix is invalid.
    InvalidHrp(hrp::Error),
    /// Error writing to the formatter.
    Fmt(fmt::Error),
}

impl From<hrp::Error> for EncodeError {
    fn from(e: hrp::Error) -> Self { EncodeError::InvalidHrp(e) }
}

impl From<fmt::Error> for EncodeError {
    fn from(e: fmt::Error) -> Self { EncodeError::Fmt(e) }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use EncodeError::*;

        match *self {
            InvalidLength(ref e) => write_err!(f, "cannot encode puzzle hash"; e),
            InvalidHrp(ref e) => write_err!(f, "invalid human-readable prefix"; e),
            Fmt(ref e) => write_err!(f, "writing to formatter failed"; e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EncodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use EncodeError::*;

        match *self {
            InvalidLength(ref e) => Some(e),
            InvalidHrp(ref e) => Some(e),
            Fmt(ref e) => Some(e),
        }
    }
}

/// An error while decoding an address.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// No `'1'` separator, or nothing before or after it.
    MissingSeparator,
    /// A character outside the printable ASCII range in the prefix, or outside the bech32
    /// alphabet in the data part.
    InvalidChar(char),
    /// The checksum does not match the rest of the address.
    ChecksumMismatch,
    /// The payload bits left over after regrouping are not valid padding.
    Padding(PaddingError),
    /// The payload does not decode to 32 bytes.
    InvalidLength(LengthError),
}

impl From<PaddingError> for DecodeError {
    fn from(e: PaddingError) -> Self { DecodeError::Padding(e) }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use DecodeError::*;

        match *self {
            MissingSeparator => write!(f, "missing human-readable separator, \"{}\"", SEP),
            InvalidChar(c) => write!(f, "invalid character {:?}", c),
            ChecksumMismatch => write!(f, "invalid checksum"),
            Padding(ref e) => write_err!(f, "invalid payload padding"; e),
            InvalidLength(ref e) => write_err!(f, "decoded payload is not a puzzle hash"; e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use DecodeError::*;

        match *self {
            Padding(ref e) => Some(e),
            InvalidLength(ref e) => Some(e),
            MissingSeparator | InvalidChar(_) | ChecksumMismatch => None,
        }
    }
}


#[cfg(bench)]
mod benches {
    use test::{black_box, Bencher};

    use super::*;

    const XCH: &str = "xch1pwrzyy35qxk0rz76jl0648fvt6ql905vwd7zs0scjqant5sf25lql4hz3z";

    #[bench]
    fn bench_encode(bh: &mut Bencher) {
        let hash = [0x5a; 32];
        bh.iter(|| {
            let s = encode(&hash, "xch").expect("failed to encode");
            black_box(&s);
        });
    }

    #[bench]
    fn bench_encode_to_fmt(bh: &mut Bencher) {
        let hash = [0x5a; 32];
        let mut s = String::with_capacity(64);
        bh.iter(|| {
            s.clear();
            encode_to_fmt(&mut s, &hash, "xch").expect("failed to encode");
            black_box(&s);
        });
    }

    #[bench]
    fn bench_decode(bh: &mut Bencher) {
        bh.iter(|| {
            let hash = decode(XCH).expect("failed to decode");
            black_box(&hash);
        });
    }
}
