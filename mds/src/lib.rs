//! Construction and validation of the linear layers of HADES-style permutations over GF(2^n).

#![no_std]

extern crate alloc;

mod circulant;
mod error;
mod m4;
mod mds;
mod trail;

pub use circulant::*;
pub use error::*;
pub use m4::*;
pub use mds::*;
pub use trail::*;
