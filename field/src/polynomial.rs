//! Reduction polynomials over GF(2).
//!
//! A degree `n` polynomial `x^n + low` is stored as its `low` part only, bit `i` holding the
//! coefficient of `x^i`. This lets degree 128 moduli fit in a `u128`.

use alloc::vec::Vec;

use tracing::debug;

use crate::field::{low_mask, mul_reduce};

/// x^32 + x^15 + x^9 + x^7 + x^4 + x^3 + 1, the Conway polynomial used by the GF(2^32) tables.
pub const CONWAY_32_LOW: u128 = 0x8299;

/// The Conway polynomial x^64 + x^33 + x^30 + x^26 + x^25 + x^24 + x^23 + x^22 + x^21 + x^20
/// + x^18 + x^13 + x^12 + x^11 + x^10 + x^7 + x^5 + x^4 + x^2 + x + 1, used by the GF(2^64)
/// tables.
pub const CONWAY_64_LOW: u128 = 0x247f43cb7;

/// x^128 + x^7 + x^2 + x + 1.
pub const STANDARD_128_LOW: u128 = 0x87;

/// The reduction polynomial used when the caller does not supply one.
///
/// Degrees 32, 64 and 128 use fixed moduli; every other degree uses the minimal weight
/// irreducible polynomial found by [`minimal_weight_polynomial`].
pub fn standard_polynomial(degree: u32) -> Option<u128> {
    match degree {
        32 => Some(CONWAY_32_LOW),
        64 => Some(CONWAY_64_LOW),
        128 => Some(STANDARD_128_LOW),
        _ => minimal_weight_polynomial(degree),
    }
}

/// First irreducible trinomial `x^n + x^k + 1` by ascending `k`, falling back to the first
/// pentanomial `x^n + x^a + x^b + x^c + 1` by ascending `(a, b, c)`.
pub fn minimal_weight_polynomial(degree: u32) -> Option<u128> {
    if !(2..=128).contains(&degree) {
        return None;
    }
    let trinomials = (1..degree).map(|k| (1u128 << k) | 1);
    let pentanomials = (3..degree).flat_map(|a| {
        (2..a).flat_map(move |b| (1..b).map(move |c| (1u128 << a) | (1 << b) | (1 << c) | 1))
    });
    let found = trinomials
        .chain(pentanomials)
        .find(|&low| is_irreducible(degree, low));
    if let Some(low) = found {
        debug!("selected minimal weight modulus x^{degree} + {low:#x}");
    }
    found
}

/// Rabin's test: `x^n + low` is irreducible iff `x^(2^n) = x` modulo it and, for every prime
/// `q | n`, `gcd(x^(2^(n/q)) - x, x^n + low) = 1`.
pub fn is_irreducible(degree: u32, low: u128) -> bool {
    if !(2..=128).contains(&degree) || low & !low_mask(degree) != 0 {
        return false;
    }
    // Divisible by x.
    if low & 1 == 0 {
        return false;
    }
    let frobenius = |k: u32| (0..k).fold(2u128, |a, _| mul_reduce(a, a, degree, low));
    if frobenius(degree) != 2 {
        return false;
    }
    prime_factors(degree).into_iter().all(|q| {
        let g = frobenius(degree / q) ^ 2;
        g != 0 && poly_gcd(g, modulus_rem(degree, low, g)) == 1
    })
}

fn prime_factors(mut n: u32) -> Vec<u32> {
    let mut factors = Vec::new();
    let mut d = 2;
    while d * d <= n {
        if n % d == 0 {
            factors.push(d);
            while n % d == 0 {
                n /= d;
            }
        }
        d += 1;
    }
    if n > 1 {
        factors.push(n);
    }
    factors
}

const fn poly_degree(a: u128) -> u32 {
    127 - a.leading_zeros()
}

/// `a mod b` for `b != 0`.
fn poly_rem(mut a: u128, b: u128) -> u128 {
    let db = poly_degree(b);
    while a != 0 && poly_degree(a) >= db {
        a ^= b << (poly_degree(a) - db);
    }
    a
}

fn poly_gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, poly_rem(a, b));
    }
    a
}

/// `(x^degree + low) mod g` for a nonzero `g` of degree below `degree`.
fn modulus_rem(degree: u32, low: u128, g: u128) -> u128 {
    let dg = poly_degree(g);
    let mut power = 1u128;
    for _ in 0..degree {
        power <<= 1;
        if power >> dg & 1 == 1 {
            power ^= g;
        }
    }
    power ^ poly_rem(low, g)
}
