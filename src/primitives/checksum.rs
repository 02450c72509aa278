// SPDX-License-Identifier: MIT

//! Degree-2 [BCH] code checksum.
//!
//! The checksum is the residue of the prefix expansion followed by the data, read as a polynomial
//! over GF(32), modulo a fixed degree-6 generator. Residues are kept packed into a `u32`, five
//! bits per coefficient, so multiplying by `x` is a left shift and adding is an xor.
//!
//! [BCH]: <https://en.wikipedia.org/wiki/BCH_code>

use core::marker::PhantomData;

use crate::primitives::gf32::Fe32;
use crate::primitives::hrp::{Hrp, LowercaseByteIter};

/// The number of characters in every checksum of this family.
pub const CHECKSUM_LENGTH: usize = 6;

/// The generator polynomial, without its leading monic term, packed big-endian, along with its
/// four shifts by the field elements { P, Z, Y, G, S }.
pub const GENERATOR: [u32; 5] = [0x3b6a57b2, 0x26508e6d, 0x1ea119fa, 0x3d4233dd, 0x2a1462b3];

/// Trait defining a particular checksum.
///
/// For users, this can be treated as a marker trait; none of the associated data
/// are end-user relevant.
pub trait Checksum {
    /// The coefficients of the generator polynomial, except the leading monic term,
    /// in "big-endian" (highest-degree coefficients get leftmost bits) order, along
    /// with the 4 shifts of the generator.
    const GENERATOR_SH: [u32; 5];

    /// The residue, modulo the generator polynomial, that a valid codeword will have.
    const TARGET_RESIDUE: u32;

    /// Sanity checks that the generator shifts are consistent with each other.
    ///
    /// This function never needs to be called by users, but anyone defining a checksum
    /// should add a unit test to their codebase which calls this.
    fn sanity_check() {
        for i in 1..5 {
            for j in 0..CHECKSUM_LENGTH {
                let last = unpack(Self::GENERATOR_SH[i - 1], j);
                let curr = unpack(Self::GENERATOR_SH[i], j);
                // GF32 is defined by extending GF2 with a root of x^5 + x^3 + 1 = 0
                // which when written as bit coefficients is 41 = 0. Hence xoring
                // (adding, in GF32) by 41 is the way to reduce x^5.
                assert_eq!(
                    curr,
                    (last << 1) ^ if last & 0x10 == 0x10 { 41 } else { 0 },
                    "Element {} of generator << 2^{} was incorrectly computed. \
                     (Should have been {} << 1)",
                    j,
                    i,
                    last,
                );
            }
        }
        assert!(Self::TARGET_RESIDUE < 1 << (5 * CHECKSUM_LENGTH));
    }
}

/// The original bech32 checksum, target residue `1`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Bech32 {}

impl Checksum for Bech32 {
    const GENERATOR_SH: [u32; 5] = GENERATOR;
    const TARGET_RESIDUE: u32 = 1;
}

/// The bech32m checksum used by all addresses, target residue `0x2bc830a3`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Bech32m {}

impl Checksum for Bech32m {
    const GENERATOR_SH: [u32; 5] = GENERATOR;
    const TARGET_RESIDUE: u32 = 0x2bc830a3;
}

/// Extracts the coefficient of x^n from a packed polynomial.
#[inline]
fn unpack(packed: u32, n: usize) -> u8 { (packed >> (n * 5)) as u8 & 0x1f }

/// One round of the polymod: multiply by x, add `value`, and reduce by the generator.
#[inline]
fn polymod_step(chk: u32, value: u32, generator: &[u32; 5]) -> u32 {
    let top = chk >> 25;
    let mut chk = ((chk & 0x1ff_ffff) << 5) ^ value;
    for (i, g) in generator.iter().enumerate() {
        if (top >> i) & 1 == 1 {
            chk ^= g;
        }
    }
    chk
}

/// Computes the bech32 polymod of `values`, starting from the residue `1`.
///
/// This is the reference formulation, every value is fed in as-is and the full 32-bit
/// accumulator is returned. [`Engine`] computes the same thing one field element at a time.
pub fn polymod<I: IntoIterator<Item = u32>>(values: I) -> u32 {
    values.into_iter().fold(1, |chk, v| polymod_step(chk, v, &GENERATOR))
}

/// Computes the 6 checksum characters for `payload` under `hrp`.
///
/// [`ChecksumIter`] runs the same steps as it yields the payload.
///
/// [`ChecksumIter`]: crate::primitives::iter::ChecksumIter
pub fn create_checksum<Ck, I>(hrp: &Hrp, payload: I) -> [Fe32; CHECKSUM_LENGTH]
where
    Ck: Checksum,
    I: IntoIterator<Item = Fe32>,
{
    let mut engine = Engine::<Ck>::new();
    engine.input_hrp(hrp);
    payload.into_iter().for_each(|fe| engine.input_fe(fe));
    engine.input_target_residue();

    let mut checksum = [Fe32::Q; CHECKSUM_LENGTH];
    for (i, fe) in checksum.iter_mut().enumerate() {
        *fe = engine.residue_fe(CHECKSUM_LENGTH - 1 - i);
    }
    checksum
}

/// Returns true if `data_with_checksum` carries a valid checksum for `hrp`.
///
/// The comparison is not constant time, checksums are public.
pub fn verify_checksum<Ck, I>(hrp: &Hrp, data_with_checksum: I) -> bool
where
    Ck: Checksum,
    I: IntoIterator<Item = Fe32>,
{
    let mut engine = Engine::<Ck>::new();
    engine.input_hrp(hrp);
    data_with_checksum.into_iter().for_each(|fe| engine.input_fe(fe));
    engine.residue() == Ck::TARGET_RESIDUE
}

/// A checksum engine, which can be used to compute or verify a checksum.
///
/// Use this to verify a checksum, feed it the data to be checksummed using
/// the `Self::input_*` methods.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Engine<Ck: Checksum> {
    residue: u32,
    ck: PhantomData<Ck>,
}

impl<Ck: Checksum> Default for Engine<Ck> {
    fn default() -> Self { Self::new() }
}

impl<Ck: Checksum> Engine<Ck> {
    /// Constructs a new checksum engine with no data input.
    #[inline]
    pub fn new() -> Self { Engine { residue: 1, ck: PhantomData } }

    /// Feeds the expansion of `hrp` into the checksum engine.
    #[inline]
    pub fn input_hrp(&mut self, hrp: &Hrp) {
        for fe in HrpFe32Iter::new(hrp) {
            self.input_fe(fe)
        }
    }

    /// Adds a single gf32 element to the checksum engine.
    #[inline]
    pub fn input_fe(&mut self, e: Fe32) {
        self.residue = polymod_step(self.residue, u32::from(e.to_u8()), &Ck::GENERATOR_SH);
    }

    /// Inputs the target residue of the checksum.
    ///
    /// Checksums are generated by appending the target residue to the input
    /// string, then computing the actual residue, and then replacing the
    /// target with the actual. This method lets us compute the actual residue
    /// without doing any string concatenations.
    #[inline]
    pub fn input_target_residue(&mut self) {
        for i in 0..CHECKSUM_LENGTH {
            let fe = unpack(Ck::TARGET_RESIDUE, CHECKSUM_LENGTH - i - 1);
            self.input_fe(Fe32::from_low_5_bits(fe));
        }
    }

    /// Returns the current checksum residue.
    #[inline]
    pub fn residue(&self) -> u32 { self.residue }

    /// Returns the `i`th checksum character, counting from the end, once the data and the target
    /// residue have been input.
    #[inline]
    pub(crate) fn residue_fe(&self, i: usize) -> Fe32 {
        Fe32::from_low_5_bits(unpack(self.residue, i))
    }
}

/// Iterator that yields the field elements that are input into a checksum algorithm for an [`Hrp`].
///
/// This is the prefix expansion: the high bits of every lowercase character, a zero separator,
/// then the low five bits of every character.
pub struct HrpFe32Iter<'hrp> {
    /// `None` once the hrp high fes have been yielded.
    high_iter: Option<LowercaseByteIter<'hrp>>,
    /// `None` once the hrp low fes have been yielded.
    low_iter: Option<LowercaseByteIter<'hrp>>,
}

impl<'hrp> HrpFe32Iter<'hrp> {
    /// Creates an iterator that yields the field elements of `hrp` as they are input into the
    /// checksum algorithm.
    #[inline]
    pub fn new(hrp: &Hrp<'hrp>) -> Self {
        let high_iter = hrp.lowercase_byte_iter();
        let low_iter = hrp.lowercase_byte_iter();

        Self { high_iter: Some(high_iter), low_iter: Some(low_iter) }
    }
}

impl<'hrp> Iterator for HrpFe32Iter<'hrp> {
    type Item = Fe32;
    #[inline]
    fn next(&mut self) -> Option<Fe32> {
        if let Some(high_iter) = &mut self.high_iter {
            match high_iter.next() {
                Some(high) => return Some(Fe32(high >> 5)),
                None => {
                    self.high_iter = None;
                    return Some(Fe32::Q);
                }
            }
        }
        if let Some(low_iter) = &mut self.low_iter {
            match low_iter.next() {
                Some(low) => return Some(Fe32::from_low_5_bits(low)),
                None => self.low_iter = None,
            }
        }
        None
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let high = match &self.high_iter {
            Some(high_iter) => high_iter.len() + 1, // +1 for the extra Q
            None => 0,
        };
        let low = match &self.low_iter {
            Some(low_iter) => low_iter.len(),
            None => 0,
        };
        (high + low, Some(high + low))
    }
}

impl<'hrp> ExactSizeIterator for HrpFe32Iter<'hrp> {}

#[cfg(all(test, feature = "alloc"))]
mod tests {
    use core::convert::TryFrom;

    use hex_literal::hex;

    use super::*;
    use crate::primitives::regroup::regroup_8_to_5;

    const PUZZLE_HASH: [u8; 32] =
        hex!("0b8622123401acf18bda97dfaa9d2c5e81f2be8c737c283e18903b35d209553e");

    fn chars(fes: &[Fe32]) -> String { fes.iter().map(|fe| fe.to_char()).collect() }

    fn fes(s: &str) -> Vec<Fe32> { s.chars().map(|c| Fe32::from_char(c).unwrap()).collect() }

    #[test]
    fn sanity_checks() {
        Bech32::sanity_check();
        Bech32m::sanity_check();
    }

    #[test]
    fn generator_unpacks_to_known_polynomial() {
        let unpacked_poly = (0..6)
            .rev() // Note .rev() to convert from BE integer literal to LE polynomial!
            .map(|i| unpack(GENERATOR[0], i))
            .map(|u| Fe32::try_from(u).unwrap())
            .collect::<Vec<_>>();
        assert_eq!(unpacked_poly, [Fe32::A, Fe32::K, Fe32::_5, Fe32::_4, Fe32::A, Fe32::J]);
    }

    #[test]
    fn expand_prefix() {
        let hrp = Hrp::parse("xch").unwrap();
        let expanded = HrpFe32Iter::new(&hrp).map(Fe32::to_u8).collect::<Vec<_>>();
        assert_eq!(expanded, [3, 3, 3, 0, 24, 3, 8]);
        assert_eq!(HrpFe32Iter::new(&hrp).len(), 7);

        // Case is ignored.
        let upper = Hrp::parse("XCH").unwrap();
        assert!(HrpFe32Iter::new(&upper).eq(HrpFe32Iter::new(&hrp)));
    }

    #[test]
    fn polymod_of_nothing_is_one() {
        assert_eq!(polymod(core::iter::empty()), 1);
    }

    #[test]
    fn engine_matches_reference_polymod() {
        let hrp = Hrp::parse("txch").unwrap();
        let payload = regroup_8_to_5(&PUZZLE_HASH);

        let mut engine = Engine::<Bech32m>::new();
        engine.input_hrp(&hrp);
        payload.iter().for_each(|&fe| engine.input_fe(fe));

        let values =
            HrpFe32Iter::new(&hrp).chain(payload.iter().copied()).map(|fe| u32::from(fe.to_u8()));
        assert_eq!(engine.residue(), polymod(values));
    }

    #[test]
    fn create_known_checksum() {
        let hrp = Hrp::parse("xch").unwrap();
        let payload = regroup_8_to_5(&PUZZLE_HASH);
        assert_eq!(chars(&create_checksum::<Bech32m, _>(&hrp, payload.iter().copied())), "l4hz3z");
    }

    #[test]
    fn verify_known_checksum() {
        let hrp = Hrp::parse("xch").unwrap();
        let data = fes("pwrzyy35qxk0rz76jl0648fvt6ql905vwd7zs0scjqant5sf25lql4hz3z");
        assert!(verify_checksum::<Bech32m, _>(&hrp, data.iter().copied()));
        // Valid bech32m is by definition invalid bech32.
        assert!(!verify_checksum::<Bech32, _>(&hrp, data.iter().copied()));
        // The prefix is bound into the checksum.
        let txch = Hrp::parse("txch").unwrap();
        assert!(!verify_checksum::<Bech32m, _>(&txch, data.iter().copied()));
    }

    #[test]
    fn target_residue_trick_matches_xor() {
        let hrp = Hrp::parse("nft").unwrap();
        let payload = regroup_8_to_5(&PUZZLE_HASH);

        // Reference formulation: six zero groups, then xor the target residue.
        let values = HrpFe32Iter::new(&hrp)
            .chain(payload.iter().copied())
            .map(|fe| u32::from(fe.to_u8()))
            .chain([0; CHECKSUM_LENGTH]);
        let plm = polymod(values) ^ Bech32m::TARGET_RESIDUE;
        let expected = (0..CHECKSUM_LENGTH)
            .rev()
            .map(|i| Fe32::from_low_5_bits(unpack(plm, i)))
            .collect::<Vec<_>>();

        assert_eq!(create_checksum::<Bech32m, _>(&hrp, payload.iter().copied()), expected[..]);
    }

    #[test]
    fn checksum_round_trips_through_verify() {
        for prefix in ["a", "xch", "did", "a1b", "?"] {
            let hrp = Hrp::parse(prefix).unwrap();
            for len in [0usize, 1, 7, 52] {
                let mut data =
                    (0..len).map(|i| Fe32::from_low_5_bits((i * 7) as u8)).collect::<Vec<_>>();
                let checksum = create_checksum::<Bech32m, _>(&hrp, data.iter().copied());
                data.extend_from_slice(&checksum);
                assert!(verify_checksum::<Bech32m, _>(&hrp, data.iter().copied()));
                let last = data.len() - 1;
                data[last] = Fe32::from_low_5_bits(data[last].to_u8() ^ 1);
                assert!(!verify_checksum::<Bech32m, _>(&hrp, data.iter().copied()));
            }
        }
    }

    #[test]
    fn bip_350_vectors() {
        for s in ["a1lqfn3a", "abcdef1l7aum6echk45nj3s0wdvt2fg8x9yrzpqzd3ryx", "?1v759aa"] {
            let sep = s.rfind('1').unwrap();
            let hrp = Hrp::parse(&s[..sep]).unwrap();
            assert!(verify_checksum::<Bech32m, _>(&hrp, fes(&s[sep + 1..])), "{}", s);
        }
    }
}
