// SPDX-License-Identifier: MIT

//! Encoding and decoding of puzzle hash addresses.
//!
//! A puzzle hash address is a 32-byte puzzle hash written as a [BIP-350] bech32m string under a
//! short human-readable prefix that names the network or kind of object, e.g. "xch" for mainnet
//! coins or "txch" for testnet coins.
//!
//! The crate root exposes the two operations most users want, [`encode`] and [`decode`]. The
//! [`address`] module provides the staged decoding types behind `decode` and the
//! [`primitives`] module the field elements, prefix handling, bit regrouping and checksum engine
//! they are built from.
//!
//! # Examples
//!
//! ```
//! # #[cfg(feature = "alloc")] {
//! use puzzle_address::{KnownPrefix, PuzzleHash};
//!
//! let hash: PuzzleHash =
//!     "0b8622123401acf18bda97dfaa9d2c5e81f2be8c737c283e18903b35d209553e".parse().unwrap();
//!
//! let address = puzzle_address::encode(hash.as_bytes(), KnownPrefix::Xch.as_str()).unwrap();
//! assert_eq!(address, "xch1pwrzyy35qxk0rz76jl0648fvt6ql905vwd7zs0scjqant5sf25lql4hz3z");
//!
//! // The prefix is checked against the checksum but otherwise not required to be known.
//! assert_eq!(puzzle_address::decode(&address).unwrap(), hash);
//!
//! let info = puzzle_address::decode_address_info(&address).unwrap();
//! assert_eq!(info.prefix.parse::<KnownPrefix>().unwrap(), KnownPrefix::Xch);
//! assert_eq!(info.puzzle_hash, hash);
//! # }
//! ```
//!
//! Encoding without an allocator.
//!
//! ```
//! use core::fmt::Write;
//!
//! use puzzle_address::encode_to_fmt;
//!
//! struct Buf {
//!     bytes: [u8; 90],
//!     len: usize,
//! }
//!
//! impl Write for Buf {
//!     fn write_str(&mut self, s: &str) -> core::fmt::Result {
//!         let end = self.len + s.len();
//!         let dst = self.bytes.get_mut(self.len..end).ok_or(core::fmt::Error)?;
//!         dst.copy_from_slice(s.as_bytes());
//!         self.len = end;
//!         Ok(())
//!     }
//! }
//!
//! let mut buf = Buf { bytes: [0; 90], len: 0 };
//! encode_to_fmt(&mut buf, &[0u8; 32], "xch").unwrap();
//! assert_eq!(
//!     &buf.bytes[..buf.len],
//!     b"xch1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqq2u30kz",
//! );
//! ```
//!
//! [BIP-350]: <https://github.com/bitcoin/bips/blob/master/bip-0350.mediawiki>

#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]
// Experimental features we need.
#![cfg_attr(bench, feature(test))]
// Coding conventions
#![deny(missing_docs)]
#![deny(non_upper_case_globals)]
#![deny(non_camel_case_types)]
#![deny(non_snake_case)]
#![deny(unused_mut)]

#[cfg(bench)]
extern crate test;

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod address;
pub mod primitives;
pub mod puzzle_hash;

#[rustfmt::skip]                // Keep public re-exports separate.
#[doc(inline)]
pub use crate::{
    address::{decode, encode_to_fmt, DecodeError, EncodeError},
    primitives::checksum::{Bech32, Bech32m},
    primitives::gf32::Fe32,
    primitives::hrp::{Hrp, KnownPrefix},
    puzzle_hash::{LengthError, PuzzleHash, PUZZLE_HASH_LEN},
};
#[cfg(feature = "alloc")]
#[doc(inline)]
pub use crate::address::{decode_address_info, encode, AddressInfo};

/// The separator between the human-readable prefix and the data part of an address.
pub(crate) const SEP: char = '1';
