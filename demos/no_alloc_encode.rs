//! Shows how to decode and encode a puzzle hash address without an allocator.

use puzzle_address::address::{DecodeError, UncheckedAddress};
use puzzle_address::primitives::hrp::Hrp;
use puzzle_address::primitives::iter::{ByteIterExt, Fe32IterExt};
use puzzle_address::{Bech32m, KnownPrefix, PuzzleHash};

pub fn main() -> Result<(), DecodeError> {
    let addr = "xch1pwrzyy35qxk0rz76jl0648fvt6ql905vwd7zs0scjqant5sf25lql4hz3z";

    let checked =
        UncheckedAddress::new(addr)?.validate_characters()?.validate_checksum::<Bech32m>()?;
    let prefix = checked.hrp().as_str().parse::<KnownPrefix>().expect("xch is known");
    let puzzle_hash = checked.puzzle_hash()?;

    let encoded = encode(prefix, &puzzle_hash);
    assert!(encoded.eq(addr.chars()));

    Ok(())
}

/// Encodes `puzzle_hash` under `prefix`.
///
/// # Returns
///
/// An iterator over the characters of the address - this means no allocation is required.
pub fn encode(prefix: KnownPrefix, puzzle_hash: &PuzzleHash) -> impl Iterator<Item = char> + '_ {
    let hrp = Hrp::from(prefix);

    puzzle_hash
        .as_bytes()
        .iter()
        .copied()
        .bytes_to_fes() // convert bytes to field elements in-line
        .checksum::<Bech32m>()
        .with_checksummed_hrp(&hrp)
        .hrp_char(&hrp)
}
