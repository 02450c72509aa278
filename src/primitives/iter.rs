// SPDX-License-Identifier: MIT

//! Iterator Adaptors
//!
//! This module provides iterator adaptors that can be used to generate checksums and whole
//! addresses without any allocations.
//!
//! In general, directly using these adaptors is not very ergonomic, and users are recommended to
//! instead use the higher-level functions at the root of this crate.
//!
//! # Examples
//!
//! ```rust
//! use puzzle_address::primitives::checksum::Bech32m;
//! use puzzle_address::primitives::hrp::Hrp;
//! use puzzle_address::primitives::iter::{ByteIterExt, Fe32IterExt};
//!
//! let puzzle_hash = [
//!     0x0b, 0x86, 0x22, 0x12, 0x34, 0x01, 0xac, 0xf1,
//!     0x8b, 0xda, 0x97, 0xdf, 0xaa, 0x9d, 0x2c, 0x5e,
//!     0x81, 0xf2, 0xbe, 0x8c, 0x73, 0x7c, 0x28, 0x3e,
//!     0x18, 0x90, 0x3b, 0x35, 0xd2, 0x09, 0x55, 0x3e,
//! ];
//! let hrp = Hrp::parse("xch").expect("valid prefix");
//! let iterator = puzzle_hash
//!     .iter()
//!     .copied() // Iterate over bytes.
//!     .bytes_to_fes() // Convert bytes to field elements in-line.
//!     .checksum::<Bech32m>() // Convert to a [`ChecksumIter`] (append a bech32m checksum).
//!     .with_checksummed_hrp(&hrp) // Feed the prefix into the checksum.
//!     .hrp_char(&hrp); // Turn the fe stream into a char stream with the prefix.
//! let address: String = iterator.collect();
//! assert_eq!(address, "xch1pwrzyy35qxk0rz76jl0648fvt6ql905vwd7zs0scjqant5sf25lql4hz3z");
//! ```

use crate::primitives::checksum::{self, Checksum, CHECKSUM_LENGTH};
use crate::primitives::gf32::Fe32;
use crate::primitives::hrp::{self, Hrp};
pub use crate::primitives::regroup::{ByteToFeIter, FeToByteIter};

/// Extension trait for byte iterators which provides an adaptor to GF32 elements.
pub trait ByteIterExt: Sized + Iterator<Item = u8> {
    /// Obtain the GF32 iterator, see [`ByteToFeIter`].
    fn bytes_to_fes(self) -> ByteToFeIter<Self> { ByteToFeIter::new(self) }
}
impl<I> ByteIterExt for I where I: Iterator<Item = u8> {}

/// Extension trait for field element iterators.
pub trait Fe32IterExt: Sized + Iterator<Item = Fe32> {
    /// Adapts the Fe32 iterator to output bytes instead, see [`FeToByteIter`].
    fn fes_to_bytes(self) -> FeToByteIter<Self> { FeToByteIter::new(self) }

    /// Adapts the Fe32 iterator to append a checksum to the end of the data.
    ///
    /// Because the prefix of an address needs to be expanded before being
    /// checksummed, this iterator is a little bit inconvenient to use on raw
    /// data. The [`ChecksumIter::with_checksummed_hrp`] method may be of use.
    fn checksum<Ck: Checksum>(self) -> ChecksumIter<Self, Ck> {
        ChecksumIter {
            iter: self,
            checksum_remaining: CHECKSUM_LENGTH,
            checksum_engine: checksum::Engine::new(),
        }
    }

    /// Adapts the Fe32 iterator to output characters using `hrp` for the human-readable prefix.
    ///
    /// Note, `hrp` is expected to be the same as that fed into the checksum engine with
    /// `with_checksummed_hrp`.
    fn hrp_char<'hrp>(self, hrp: &Hrp<'hrp>) -> HrpCharIter<'hrp, Self> {
        HrpCharIter { hrp_iter: hrp.lowercase_char_iter(), fe_iter: self, hrp_done: false }
    }
}
impl<I> Fe32IterExt for I where I: Iterator<Item = Fe32> {}

/// Iterator adaptor for field-element-yielding iterator, which tacks a
/// checksum onto the end of the yielded data.
#[derive(Clone, PartialEq, Eq)]
pub struct ChecksumIter<I, Ck>
where
    I: Iterator<Item = Fe32>,
    Ck: Checksum,
{
    iter: I,
    checksum_remaining: usize,
    checksum_engine: checksum::Engine<Ck>,
}

impl<I, Ck> ChecksumIter<I, Ck>
where
    I: Iterator<Item = Fe32>,
    Ck: Checksum,
{
    /// Helper function to input a prefix into the underlying checksum engine of the iterator.
    ///
    /// If you call this function after the iterator has already yielded a value then
    /// you will get useless results.
    pub fn with_checksummed_hrp(mut self, hrp: &Hrp) -> Self {
        self.checksum_engine.input_hrp(hrp);
        self
    }
}

impl<I, Ck> Iterator for ChecksumIter<I, Ck>
where
    I: Iterator<Item = Fe32>,
    Ck: Checksum,
{
    type Item = Fe32;

    fn next(&mut self) -> Option<Fe32> {
        if self.checksum_remaining == CHECKSUM_LENGTH {
            if let Some(fe) = self.iter.next() {
                self.checksum_engine.input_fe(fe);
                return Some(fe);
            }
            self.checksum_engine.input_target_residue();
        }
        if self.checksum_remaining == 0 {
            return None;
        }
        self.checksum_remaining -= 1;
        Some(self.checksum_engine.residue_fe(self.checksum_remaining))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (min, max) = if self.checksum_remaining == CHECKSUM_LENGTH {
            self.iter.size_hint()
        } else {
            (0, Some(0))
        };
        (min + self.checksum_remaining, max.map(|max| max + self.checksum_remaining))
    }
}

/// Iterator adaptor which takes a stream of field elements, converts it to characters prefixed by
/// the prefix and separator. If `fe_iter` is a checksummed iter, it is expected that the `hrp`
/// strings are identical.
pub struct HrpCharIter<'hrp, I>
where
    I: Iterator<Item = Fe32>,
{
    hrp_iter: hrp::LowercaseCharIter<'hrp>,
    fe_iter: I,
    hrp_done: bool,
}

impl<'hrp, I> Iterator for HrpCharIter<'hrp, I>
where
    I: Iterator<Item = Fe32>,
{
    type Item = char;

    fn next(&mut self) -> Option<char> {
        if !self.hrp_done {
            match self.hrp_iter.next() {
                Some(c) => return Some(c),
                None => {
                    self.hrp_done = true;
                    return Some(crate::SEP);
                }
            }
        }
        self.fe_iter.next().map(Fe32::to_char)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (min, max) = self.fe_iter.size_hint();
        let add = if !self.hrp_done {
            self.hrp_iter.len() + 1 // hrp | SEP
        } else {
            0
        };

        (min + add, max.map(|max| max + add))
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;
    use crate::primitives::checksum::Bech32m;

    const PUZZLE_HASH: [u8; 32] =
        hex!("0b8622123401acf18bda97dfaa9d2c5e81f2be8c737c283e18903b35d209553e");

    #[test]
    fn iterator_adaptors() {
        // 1. Convert bytes to field elements, via iterator
        let data_chars = "pwrzyy35qxk0rz76jl0648fvt6ql905vwd7zs0scjqant5sf25lq";
        let fes = PUZZLE_HASH.iter().copied().bytes_to_fes();
        assert!(fes.map(Fe32::to_char).eq(data_chars.chars()));

        // 2. Convert field elements to bytes, via iterator
        let char_len = data_chars.len();
        let fes = PUZZLE_HASH.iter().copied().bytes_to_fes();
        assert_eq!(fes.size_hint(), (char_len, Some(char_len)));

        let fe_iter = data_chars.bytes().map(|b| Fe32::from_char(char::from(b)).unwrap());
        let mut byte_iter = fe_iter.fes_to_bytes();
        assert!(byte_iter.by_ref().eq(PUZZLE_HASH.iter().copied()));
        assert_eq!(byte_iter.padding_check(), Ok(()));

        // 3. Append the checksum.
        let hrp = Hrp::parse("xch").unwrap();
        let checksummed_len = char_len + 6;
        let iter = PUZZLE_HASH.iter().copied().bytes_to_fes().checksum::<Bech32m>();
        assert_eq!(iter.size_hint().0, checksummed_len);

        // Does not add the hrp to the iterator, only adds it to the checksum engine.
        let iter = iter.with_checksummed_hrp(&hrp);
        assert_eq!(iter.size_hint().0, checksummed_len);

        let iter = iter.map(Fe32::to_char);
        assert!(iter.eq("pwrzyy35qxk0rz76jl0648fvt6ql905vwd7zs0scjqant5sf25lql4hz3z".chars()));
    }

    #[test]
    fn checksum_iter_matches_create_checksum() {
        for prefix in ["xch", "txch", "nft", "did", "a1b"] {
            let hrp = Hrp::parse(prefix).unwrap();
            let payload = PUZZLE_HASH.iter().copied().bytes_to_fes();
            let expected = checksum::create_checksum::<Bech32m, _>(&hrp, payload);
            let iter = PUZZLE_HASH
                .iter()
                .copied()
                .bytes_to_fes()
                .checksum::<Bech32m>()
                .with_checksummed_hrp(&hrp);
            assert!(iter.skip(52).eq(expected.iter().copied()), "prefix {}", prefix);
        }
    }

    #[test]
    fn hrp_char_iter() {
        let hrp = Hrp::parse("TXCH").unwrap();
        let iter = PUZZLE_HASH
            .iter()
            .copied()
            .bytes_to_fes()
            .checksum::<Bech32m>()
            .with_checksummed_hrp(&hrp)
            .hrp_char(&hrp);
        assert_eq!(iter.size_hint(), (63, Some(63)));

        let address = iter.collect::<String>();
        assert_eq!(address, "txch1pwrzyy35qxk0rz76jl0648fvt6ql905vwd7zs0scjqant5sf25lqjjs5s3");
    }

    #[test]
    fn checksum_size_hint_counts_down() {
        let mut iter = core::iter::once(Fe32::Q).checksum::<Bech32m>();
        assert_eq!(iter.size_hint(), (7, Some(7)));
        iter.next();
        assert_eq!(iter.size_hint(), (6, Some(6)));
        iter.next();
        assert_eq!(iter.size_hint(), (5, Some(5)));
        assert_eq!(iter.count(), 5);
    }
}
