//! The byte-permutation schedule of the Full-Time-Pad round function.
//!
//! Starting from the identity ordering of the 32 key bytes, the generator alternates a spread
//! (stride-4 regrouping into four lanes) with three in-block rotations, producing one permutation
//! vector per round. The vectors can be moved between the big- and little-endian word layouts, and
//! consecutive vectors can be related by the single permutation that maps one onto the next.

#![no_std]

extern crate alloc;

mod byte_order;
mod error;
mod generator;
mod inverse;
mod key;
mod tables;
mod vector;

pub use byte_order::*;
pub use error::*;
pub use generator::*;
pub use inverse::*;
pub use key::*;
pub use tables::*;
pub use vector::*;

/// Number of key bytes permuted by the schedule.
pub const KEY_BYTES: usize = 32;
/// Bytes per machine word; also the block size of the rotate step.
pub const WORD_BYTES: usize = 4;
/// Number of spread steps, each followed by `ROTATIONS_PER_SPREAD` rotations.
pub const NUM_SPREADS: usize = 4;
pub const ROTATIONS_PER_SPREAD: usize = 3;
/// Total number of permutation vectors in a schedule.
pub const NUM_STEPS: usize = NUM_SPREADS * (1 + ROTATIONS_PER_SPREAD);
