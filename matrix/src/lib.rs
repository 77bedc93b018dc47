//! Dense matrices over GF(2^n).

#![no_std]

extern crate alloc;

mod constructors;
mod dense;
mod error;
mod solve;

pub use dense::*;
pub use error::*;
