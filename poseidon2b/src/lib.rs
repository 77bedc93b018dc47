//! The Poseidon2b and Poseidonb permutations over binary extension fields.
//!
//! Both are HADES designs with the S-box `x^alpha` over GF(2^n). Six (n, t) pairs have
//! published parameters:
//!
//! | n   | t  | state bits |
//! |-----|----|------------|
//! | 32  | 16 | 512        |
//! | 32  | 24 | 768        |
//! | 64  | 8  | 512        |
//! | 64  | 12 | 768        |
//! | 128 | 4  | 512        |
//! | 128 | 6  | 768        |
//!
//! Any other pair can be built as a toy instance, in which case the linear layers are
//! generated. Round constants always come from the family's SHAKE128 stream unless supplied.

#![no_std]

extern crate alloc;

mod builder;
mod config;
mod error;
mod family;
mod linear_layers;
mod permutation;
mod round_numbers;
mod tables;

pub use builder::*;
pub use config::*;
pub use error::*;
pub use family::*;
pub use linear_layers::*;
pub use p2b_hades::Direction;
pub use permutation::*;
pub use round_numbers::*;
pub use tables::*;
