//! Traits shared by the permutation layers of the round function.

#![no_std]

pub mod permutation;

pub use permutation::*;
