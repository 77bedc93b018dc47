//! Nothing-up-my-sleeve field elements from SHAKE128.
//!
//! The stream absorbs a domain label and the field order, then squeezes fixed-size
//! little-endian chunks and keeps those below the field order. The output is a pure function
//! of (label, n) and must never change: published parameters are derived from it.

use alloc::vec::Vec;

use p2b_field::{BinaryElement, BinaryField, FieldElement};
use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Shake128, Shake128Reader};
use tracing::trace;

/// Bytes needed to hold `2^128` in little-endian form.
const MAX_DRAW_BYTES: usize = 17;

/// Deterministic stream of field elements seeded by a domain label.
pub struct ConstantStream {
    reader: Shake128Reader,
    degree: u32,
    draw_bytes: usize,
}

impl ConstantStream {
    /// Seeds the stream with `label` and the order `2^n` of `field`.
    ///
    /// The order is absorbed as `ceil((n + 1) / 64)` little-endian 64-bit words, least
    /// significant word first.
    pub fn new(label: &str, field: &BinaryField) -> Self {
        let degree = field.degree();
        let mut shake = Shake128::default();
        shake.update(label.as_bytes());
        let words = (degree as usize + 1).div_ceil(64);
        for i in 0..words {
            let word: u64 = if i == (degree / 64) as usize {
                1 << (degree % 64)
            } else {
                0
            };
            shake.update(&word.to_le_bytes());
        }
        Self {
            reader: shake.finalize_xof(),
            degree,
            draw_bytes: (degree as usize + 1).div_ceil(8),
        }
    }

    /// Squeezes until a draw is below `2^n` and returns it.
    ///
    /// Expected draws per element are at most 256, reached when `n` is a multiple of 8 and the
    /// extra top byte must be zero. There is no hard bound.
    pub fn next_element(&mut self) -> BinaryElement {
        let mut rejected = 0usize;
        loop {
            let mut buf = [0u8; MAX_DRAW_BYTES];
            self.reader.read(&mut buf[..self.draw_bytes]);
            if let Some(value) = self.accept(&buf) {
                if rejected > 0 {
                    trace!(rejected, "constant stream rejections");
                }
                return BinaryElement::from_canonical_u128(value);
            }
            rejected += 1;
        }
    }

    fn accept(&self, buf: &[u8; MAX_DRAW_BYTES]) -> Option<u128> {
        if buf[16] != 0 {
            return None;
        }
        let mut low = [0u8; 16];
        low.copy_from_slice(&buf[..16]);
        let value = u128::from_le_bytes(low);
        (self.degree == 128 || value >> self.degree == 0).then_some(value)
    }

    /// The next `k` accepted elements in draw order.
    pub fn elements(&mut self, k: usize) -> Vec<BinaryElement> {
        (0..k).map(|_| self.next_element()).collect()
    }
}

impl Iterator for ConstantStream {
    type Item = BinaryElement;

    fn next(&mut self) -> Option<BinaryElement> {
        Some(self.next_element())
    }
}
