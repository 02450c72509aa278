// SPDX-License-Identifier: MIT

//! Lossless regrouping of a big-endian bit stream between 8-bit bytes and 5-bit field elements.
//!
//! Going from bytes to field elements the final group is right-padded with zero bits. Going back
//! the padding must be fewer than five bits and all zero, anything else means a group was dropped
//! or the payload was tampered with.

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::vec::Vec;
use core::fmt;

use crate::primitives::gf32::Fe32;

/// Iterator adaptor that converts bytes to GF32 elements. If the total number
/// of bits is not a multiple of 5, it right-pads with 0 bits.
#[derive(Clone, PartialEq, Eq)]
pub struct ByteToFeIter<I: Iterator<Item = u8>> {
    iter: I,
    // Only the low `bits` bits are pending, at most 12 of the 16.
    acc: u16,
    bits: u32,
}

impl<I: Iterator<Item = u8>> ByteToFeIter<I> {
    pub(crate) fn new(iter: I) -> Self { ByteToFeIter { iter, acc: 0, bits: 0 } }
}

impl<I> Iterator for ByteToFeIter<I>
where
    I: Iterator<Item = u8>,
{
    type Item = Fe32;

    fn next(&mut self) -> Option<Fe32> {
        if self.bits < 5 {
            match self.iter.next() {
                Some(byte) => {
                    self.acc = (self.acc << 8) | u16::from(byte);
                    self.bits += 8;
                }
                None if self.bits > 0 => {
                    let padded = self.acc << (5 - self.bits);
                    self.bits = 0;
                    return Some(Fe32::from_low_5_bits(padded as u8));
                }
                None => return None,
            }
        }
        self.bits -= 5;
        let fe = Fe32::from_low_5_bits((self.acc >> self.bits) as u8);
        self.acc &= (1 << self.bits) - 1;
        Some(fe)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let pending = self.bits as usize;
        let (min, max) = self.iter.size_hint();
        let fes = |bytes: usize| (bytes * 8 + pending + 4) / 5;
        (fes(min), max.map(fes))
    }
}

/// Iterator adaptor that converts GF32 elements to bytes.
///
/// Trailing bits that do not make up a whole byte are held back. Once the iterator is exhausted
/// call [`FeToByteIter::padding_check`] to make sure they are valid padding.
#[derive(Clone, PartialEq, Eq)]
pub struct FeToByteIter<I: Iterator<Item = Fe32>> {
    iter: I,
    // Only the low `bits` bits are pending, at most 12 of the 16.
    acc: u16,
    bits: u32,
}

impl<I: Iterator<Item = Fe32>> FeToByteIter<I> {
    pub(crate) fn new(iter: I) -> Self { FeToByteIter { iter, acc: 0, bits: 0 } }

    /// Checks the bits left over after the last full byte.
    ///
    /// Only meaningful once [`Iterator::next`] has returned `None`.
    ///
    /// # Errors
    ///
    /// If five or more bits are left over (a whole group carried no data) or if any of the
    /// leftover bits is set.
    pub fn padding_check(&self) -> Result<(), PaddingError> {
        if self.bits >= 5 {
            return Err(PaddingError::TooManyBits(self.bits as u8));
        }
        if self.acc & ((1 << self.bits) - 1) != 0 {
            return Err(PaddingError::NonZero);
        }
        Ok(())
    }
}

impl<I> Iterator for FeToByteIter<I>
where
    I: Iterator<Item = Fe32>,
{
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        while self.bits < 8 {
            let fe = self.iter.next()?;
            self.acc = (self.acc << 5) | u16::from(fe.to_u8());
            self.bits += 5;
        }
        self.bits -= 8;
        let byte = (self.acc >> self.bits) as u8;
        self.acc &= (1 << self.bits) - 1;
        Some(byte)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let pending = self.bits as usize;
        let (min, max) = self.iter.size_hint();
        let bytes = |fes: usize| (fes * 5 + pending) / 8;
        (bytes(min), max.map(bytes))
    }
}

/// Regroups `bytes` into 5-bit field elements, zero-padding the last one.
///
/// 32 bytes always produce 52 field elements, the last one carrying a single data bit.
#[cfg(feature = "alloc")]
pub fn regroup_8_to_5(bytes: &[u8]) -> Vec<Fe32> {
    ByteToFeIter::new(bytes.iter().copied()).collect()
}

/// Regroups 5-bit field elements into bytes, validating the padding.
///
/// Does not check the number of bytes produced.
///
/// # Errors
///
/// If the leftover bits are not valid padding, see [`FeToByteIter::padding_check`].
#[cfg(feature = "alloc")]
pub fn regroup_5_to_8(fes: &[Fe32]) -> Result<Vec<u8>, PaddingError> {
    let mut iter = FeToByteIter::new(fes.iter().copied());
    let bytes = iter.by_ref().collect::<Vec<u8>>();
    iter.padding_check()?;
    Ok(bytes)
}

/// The bits left over after regrouping field elements into bytes are not valid padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PaddingError {
    /// Five or more bits left over, i.e. a whole field element carried no data.
    TooManyBits(u8),
    /// Some of the leftover bits are set.
    NonZero,
}

impl fmt::Display for PaddingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use PaddingError::*;

        match *self {
            TooManyBits(n) => write!(f, "{} padding bits left over, must be fewer than 5", n),
            NonZero => write!(f, "padding bits are not all zero"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PaddingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use PaddingError::*;

        match *self {
            TooManyBits(_) | NonZero => None,
        }
    }
}

#[cfg(all(test, feature = "alloc"))]
mod tests {
    use hex_literal::hex;

    use super::*;

    fn fes(s: &str) -> Vec<Fe32> { s.chars().map(|c| Fe32::from_char(c).unwrap()).collect() }

    #[test]
    fn single_byte() {
        assert_eq!(regroup_8_to_5(&[0xff]), [Fe32::L, Fe32::U]);
        assert_eq!(regroup_5_to_8(&[Fe32::L, Fe32::U]), Ok(vec![0xff]));
    }

    #[test]
    fn puzzle_hash_groups() {
        let hash = hex!("0b8622123401acf18bda97dfaa9d2c5e81f2be8c737c283e18903b35d209553e");
        let groups = regroup_8_to_5(&hash);
        assert_eq!(groups.len(), 52);
        assert_eq!(groups, fes("pwrzyy35qxk0rz76jl0648fvt6ql905vwd7zs0scjqant5sf25lq"));
        assert_eq!(regroup_5_to_8(&groups), Ok(hash.to_vec()));
    }

    #[test]
    fn all_ones_pads_with_zeros() {
        let groups = regroup_8_to_5(&[0xff; 32]);
        assert_eq!(groups.len(), 52);
        // 256 = 51 * 5 + 1, the last group is one data bit followed by four zero bits.
        assert_eq!(groups[51].to_u8(), 0b10000);
        assert!(groups[..51].iter().all(|&fe| fe == Fe32::L));
    }

    #[test]
    fn empty_input() {
        assert!(regroup_8_to_5(&[]).is_empty());
        assert_eq!(regroup_5_to_8(&[]), Ok(vec![]));
    }

    #[test]
    fn exact_multiple_of_forty_bits() {
        // 5 bytes == 8 groups, no padding in either direction.
        let bytes = [0x01, 0x23, 0x45, 0x67, 0x89];
        let groups = regroup_8_to_5(&bytes);
        assert_eq!(groups.len(), 8);
        assert_eq!(regroup_5_to_8(&groups), Ok(bytes.to_vec()));
    }

    #[test]
    fn nonzero_padding() {
        assert_eq!(regroup_5_to_8(&[Fe32::L, Fe32::L]), Err(PaddingError::NonZero));
        assert_eq!(regroup_5_to_8(&[Fe32::Q, Fe32::P]), Err(PaddingError::NonZero));
    }

    #[test]
    fn dropped_group_is_rejected_even_if_zero() {
        // A lone group has 5 bits, not enough for a byte and too many to be padding.
        assert_eq!(regroup_5_to_8(&[Fe32::Q]), Err(PaddingError::TooManyBits(5)));

        // 51 groups are 255 bits, 31 bytes and 7 bits short of a 32nd byte.
        let groups = regroup_8_to_5(&[0xab; 32]);
        assert_eq!(regroup_5_to_8(&groups[..51]), Err(PaddingError::TooManyBits(7)));
    }

    #[test]
    fn extra_zero_group_makes_an_extra_byte() {
        // 53 groups are 265 bits, the spare zero bits form a 33rd byte and one bit of padding.
        let mut groups = regroup_8_to_5(&[0xab; 32]);
        groups.push(Fe32::Q);
        let bytes = regroup_5_to_8(&groups).expect("padding is valid");
        assert_eq!(bytes.len(), 33);
        assert_eq!(bytes[32], 0);
    }

    #[test]
    fn size_hints_are_exact() {
        let bytes = [0x5a; 32];
        let iter = ByteToFeIter::new(bytes.iter().copied());
        assert_eq!(iter.size_hint(), (52, Some(52)));

        let groups = regroup_8_to_5(&bytes);
        let mut iter = FeToByteIter::new(groups.iter().copied());
        assert_eq!(iter.size_hint(), (32, Some(32)));
        iter.next();
        assert_eq!(iter.size_hint(), (31, Some(31)));
    }
}
