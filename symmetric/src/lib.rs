//! Permutation traits and deterministic parameter derivation.

#![no_std]

extern crate alloc;

mod constant_stream;
mod permutation;

pub use constant_stream::*;
pub use permutation::*;
