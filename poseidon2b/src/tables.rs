//! Fixed parameters of the six standard instances.
//!
//! All values are canonical integers in polynomial basis over the standard field of their
//! degree (`0x401` is `x^10 + 1`).
//!
//! The diagonals are the internal matrices' `D` in `MP = J - I + D`. Those of (32, 16),
//! (64, 8) and (64, 12) are the published ones that other implementations and proof circuits
//! depend on. No diagonal was published for (32, 24), (128, 4) and (128, 6); their tables were
//! derived here and are accepted because they pass the internal matrix check.
//!
//! The Cauchy list pairs are published for (32, 16), (64, 8) and (64, 12), normalized so that
//! `L2[0] = 0`. Shifting both lists by the same element leaves the matrix unchanged.

/// The published (field degree, width) pairs.
pub const STANDARD_INSTANCES: [(u32, usize); 6] =
    [(32, 16), (32, 24), (64, 8), (64, 12), (128, 4), (128, 6)];

pub fn is_standard_instance(degree: u32, width: usize) -> bool {
    STANDARD_INSTANCES.contains(&(degree, width))
}

/// First row of the circulant external matrix for width 6.
pub const CIRCULANT_ROW_6: [u128; 6] = [1, 1, 2, 3, 5, 7];

const DIAGONAL_32_16: [u128; 16] = [
    0x400, 0x8, 0x100, 0x800, 0x4000, 0x1, 0x8000, 0x401, 0x10, 0x5, 0x40, 0x80, 0x2001, 0x4,
    0x20, 0x3,
];

const DIAGONAL_32_24: [u128; 24] = [
    0x81, 0x10001, 0x20, 0x9, 0x200000, 0x10000, 0x40001, 0x4, 0x100000, 0x8001, 0x800001, 0x80,
    0x401, 0x10, 0x2000, 0x100001, 0x400000, 0x800000, 0x20001, 0x1000000, 0x800, 0x8000, 0x1,
    0x400001,
];

const DIAGONAL_64_8: [u128; 8] = [0x81, 0x2, 0x200, 0x80, 0x2000, 0x1000, 0x4000, 0x40];

const DIAGONAL_64_12: [u128; 12] = [
    0x3, 0x8, 0x80, 0x2000, 0x8000, 0x1, 0x8001, 0x800, 0x2, 0x401, 0x1000, 0x400,
];

const DIAGONAL_128_4: [u128; 4] = [0x4, 0x20, 0x9, 0x1];

const DIAGONAL_128_6: [u128; 6] = [0x2, 0x10, 0x1, 0x11, 0x41, 0x40];

/// The internal diagonal for `(degree, width)`, shared by both families.
pub const fn internal_diagonal(degree: u32, width: usize) -> Option<&'static [u128]> {
    match (degree, width) {
        (32, 16) => Some(&DIAGONAL_32_16),
        (32, 24) => Some(&DIAGONAL_32_24),
        (64, 8) => Some(&DIAGONAL_64_8),
        (64, 12) => Some(&DIAGONAL_64_12),
        (128, 4) => Some(&DIAGONAL_128_4),
        (128, 6) => Some(&DIAGONAL_128_6),
        _ => None,
    }
}

const CAUCHY_L1_32_16: [u128; 16] = [
    0x8f4363b6, 0x5410e3a6, 0x2b63bb5b, 0xcbb13ce1, 0xed6adefd, 0x14169f13, 0xd4369013, 0x2f20abe2,
    0xec090cee, 0xdd0298e0, 0x158a85ea, 0x178aba94, 0x28f03166, 0xacdf3010, 0x7fe80c3b, 0xcf5d30fc,
];

const CAUCHY_L2_32_16: [u128; 16] = [
    0x0, 0x219a0761, 0x94fa9c00, 0x9bf2675d, 0x489b9f47, 0xb5717dcb, 0x9fe0329, 0x1df858fc,
    0xf3c8af16, 0x76dd60e3, 0xfb32189a, 0x7230eb03, 0x7ba3f4bf, 0x3ab41315, 0x3fc073e0, 0x73c14c9d,
];

const CAUCHY_L1_64_8: [u128; 8] = [
    0x98953985dee4912f, 0x15ba46c2d7fb8578, 0x661699db22aab068, 0x9dbc2601a112f022,
    0xfd238b87a20aac5f, 0x7c913cc557f526ea, 0x84cbdcc0528152c0, 0xf138b30415af7b0c,
];

const CAUCHY_L2_64_8: [u128; 8] = [
    0x0, 0x91cc60406c452f0, 0x19a287fcebd660c2, 0x7411eb0af691ad70, 0xe6728d16f56acdf8,
    0x5e13b291e5422b5e, 0xd788e04569307d69, 0x441f61e118d75def,
];

const CAUCHY_L1_64_12: [u128; 12] = [
    0xdf74975abfc9af18, 0x9f33f78916d69922, 0xc4510ee49e649a10, 0xfecdc28041be8fb5,
    0xb1819f3041e54734, 0x7c4a6ca45b0894f1, 0xd60fce576bd1d8c7, 0xbc8ee83624b68f24,
    0xb08188f378dffeca, 0x2674a3ef0ec3982, 0x1284abb901f597c3, 0x58e0ddd93c703d35,
];

const CAUCHY_L2_64_12: [u128; 12] = [
    0x0, 0xa02af132248a23d4, 0x4a1042afcebc65e0, 0xad3a012ac4b4cfad, 0xe06a09120b8948b2,
    0x843656b54df21550, 0x5b193ce246a17d64, 0x62f10d621873abf7, 0x3969cfd359dbc30,
    0x88edda315e3d7e9d, 0x4603e473b6c4bea7, 0x2a054758f6524658,
];

/// The Poseidonb external matrix lists `(L1, L2)` for `(degree, width)`, if published.
pub const fn cauchy_lists(degree: u32, width: usize) -> Option<(&'static [u128], &'static [u128])> {
    match (degree, width) {
        (32, 16) => Some((CAUCHY_L1_32_16.as_slice(), CAUCHY_L2_32_16.as_slice())),
        (64, 8) => Some((CAUCHY_L1_64_8.as_slice(), CAUCHY_L2_64_8.as_slice())),
        (64, 12) => Some((CAUCHY_L1_64_12.as_slice(), CAUCHY_L2_64_12.as_slice())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_standard_instance_has_a_diagonal() {
        for (degree, width) in STANDARD_INSTANCES {
            let diag = internal_diagonal(degree, width).unwrap();
            assert_eq!(diag.len(), width);
            assert!(diag.iter().all(|&d| d != 0 && d >> degree == 0));
        }
        assert_eq!(internal_diagonal(8, 4), None);
        assert!(!is_standard_instance(64, 16));
    }

    #[test]
    fn test_published_64_bit_diagonals() {
        assert_eq!(
            internal_diagonal(64, 8).unwrap(),
            [0x81, 0x2, 0x200, 0x80, 0x2000, 0x1000, 0x4000, 0x40]
        );
        assert_eq!(
            internal_diagonal(64, 12).unwrap(),
            [0x3, 0x8, 0x80, 0x2000, 0x8000, 0x1, 0x8001, 0x800, 0x2, 0x401, 0x1000, 0x400]
        );
    }

    #[test]
    fn test_cauchy_lists_are_disjoint() {
        for (degree, width) in [(32, 16), (64, 8), (64, 12)] {
            let (l1, l2) = cauchy_lists(degree, width).unwrap();
            assert_eq!((l1.len(), l2.len()), (width, width));
            assert_eq!(l2[0], 0);
            assert!(l1.iter().chain(l2).all(|&v| v >> degree == 0));
            assert!(l1.iter().all(|a| !l2.contains(a)));
        }
        assert_eq!(cauchy_lists(32, 24), None);
        assert_eq!(cauchy_lists(8, 8), None);
    }
}
