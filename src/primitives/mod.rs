// SPDX-License-Identifier: MIT

//! Provides the internal nuts and bolts that enable address encoding/decoding.

pub mod checksum;
pub mod gf32;
pub mod hrp;
pub mod iter;
pub mod regroup;
