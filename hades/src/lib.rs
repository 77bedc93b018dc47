//! A generic HADES permutation engine over GF(2^n).
//!
//! The engine knows nothing about how its matrices and constants were chosen; it validates
//! them once and then evaluates rounds forwards or backwards over any contiguous range.

#![no_std]

extern crate alloc;

mod error;
mod instance;
mod linear_layer;
mod round_constants;

pub use error::*;
pub use instance::*;
pub use linear_layer::*;
pub use round_constants::*;
