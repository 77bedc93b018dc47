//! Arithmetic over binary extension fields GF(2^n), 2 <= n <= 128.
//!
//! Elements are canonical integers in polynomial basis. The field descriptor is a runtime value
//! rather than a type so one code path serves every degree, including small toy fields.

#![no_std]

extern crate alloc;

mod error;
mod exponentiation;
mod field;
mod polynomial;

pub use error::*;
pub use exponentiation::*;
pub use field::*;
pub use polynomial::*;
