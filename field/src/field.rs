use alloc::format;
use alloc::string::{String, ToString};
use core::fmt::{self, Debug, Display, Formatter};
use core::hash::Hash;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Sub, SubAssign};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::FieldError;
use crate::exponentiation::exp_by_squaring;
use crate::polynomial::{is_irreducible, standard_polynomial};

/// Largest supported extension degree.
pub const MAX_DEGREE: u32 = 128;

/// A value with a canonical integer encoding in `[0, 2^n)`.
///
/// Elements carry no reference to their field, so the conversions are unchecked: callers that
/// need range validation go through [`BinaryField::element`].
pub trait FieldElement:
    'static + Copy + Clone + Debug + Default + PartialEq + Eq + Hash + Send + Sync
{
    fn to_canonical_u128(&self) -> u128;

    fn from_canonical_u128(value: u128) -> Self;

    #[must_use]
    fn is_zero(&self) -> bool {
        self.to_canonical_u128() == 0
    }
}

/// An element of GF(2^n) in polynomial basis, bit `i` holding the coefficient of `x^i`.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct BinaryElement(u128);

impl BinaryElement {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(1);

    /// Wraps a canonical integer without checking it against any field.
    #[inline]
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn value(self) -> u128 {
        self.0
    }
}

impl FieldElement for BinaryElement {
    #[inline]
    fn to_canonical_u128(&self) -> u128 {
        self.0
    }

    #[inline]
    fn from_canonical_u128(value: u128) -> Self {
        Self(value)
    }
}

impl Add for BinaryElement {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl AddAssign for BinaryElement {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

// Characteristic 2: subtraction is addition.
impl Sub for BinaryElement {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl SubAssign for BinaryElement {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

impl Sum for BinaryElement {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + x)
    }
}

impl Display for BinaryElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl Debug for BinaryElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl fmt::LowerHex for BinaryElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl fmt::UpperHex for BinaryElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}

/// Bit mask of the low `degree` bits.
#[inline]
pub(crate) const fn low_mask(degree: u32) -> u128 {
    if degree >= 128 {
        u128::MAX
    } else {
        (1u128 << degree) - 1
    }
}

/// Shift-and-add multiplication modulo `x^degree + low`.
///
/// Both operands must already be reduced. Runs in time proportional to the bit length of `b`;
/// no constant-time guarantee is made.
#[inline]
pub(crate) const fn mul_reduce(mut a: u128, mut b: u128, degree: u32, low: u128) -> u128 {
    let mask = low_mask(degree);
    let top = 1u128 << (degree - 1);
    let mut acc = 0;
    while b != 0 {
        if b & 1 == 1 {
            acc ^= a;
        }
        b >>= 1;
        let carry = a & top != 0;
        a = (a << 1) & mask;
        if carry {
            a ^= low;
        }
    }
    acc
}

/// The binary extension field GF(2^n) = GF(2)[x] / (x^n + low).
///
/// The descriptor is a small `Copy` value; every element of one permutation instance is
/// interpreted against the same descriptor.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BinaryField {
    degree: u32,
    low: u128,
    mask: u128,
}

impl BinaryField {
    /// Builds GF(2^degree) reduced by `x^degree + low`, rejecting reducible polynomials.
    pub fn new(degree: u32, low: u128) -> Result<Self, FieldError> {
        if !(2..=MAX_DEGREE).contains(&degree) {
            return Err(FieldError::UnsupportedDegree { degree });
        }
        if low & !low_mask(degree) != 0 || !is_irreducible(degree, low) {
            return Err(FieldError::ReduciblePolynomial { degree, low });
        }
        Ok(Self::new_unchecked(degree, low))
    }

    /// Builds GF(2^degree) with the workspace's standard reduction polynomial.
    pub fn standard(degree: u32) -> Result<Self, FieldError> {
        if !(2..=MAX_DEGREE).contains(&degree) {
            return Err(FieldError::UnsupportedDegree { degree });
        }
        let low = standard_polynomial(degree).ok_or(FieldError::UnsupportedDegree { degree })?;
        Ok(Self::new_unchecked(degree, low))
    }

    pub(crate) const fn new_unchecked(degree: u32, low: u128) -> Self {
        Self {
            degree,
            low,
            mask: low_mask(degree),
        }
    }

    #[inline]
    pub const fn degree(&self) -> u32 {
        self.degree
    }

    /// Coefficients of the reduction polynomial below `x^n`.
    #[inline]
    pub const fn reduction_low(&self) -> u128 {
        self.low
    }

    /// `2^n - 1`, the order of the multiplicative group.
    #[inline]
    pub const fn order_minus_one(&self) -> u128 {
        self.mask
    }

    /// Width of the fixed hex encoding, `ceil(n / 4)`.
    #[inline]
    pub const fn hex_digits(&self) -> usize {
        self.degree.div_ceil(4) as usize
    }

    #[inline]
    pub const fn contains(&self, e: BinaryElement) -> bool {
        e.0 & !self.mask == 0
    }

    /// Checked conversion from a canonical integer.
    pub fn element(&self, value: u128) -> Result<BinaryElement, FieldError> {
        if value & !self.mask != 0 {
            return Err(FieldError::NonCanonical {
                value,
                degree: self.degree,
            });
        }
        Ok(BinaryElement(value))
    }

    #[inline]
    pub const fn zero(&self) -> BinaryElement {
        BinaryElement::ZERO
    }

    #[inline]
    pub const fn one(&self) -> BinaryElement {
        BinaryElement::ONE
    }

    /// The class of `x`, a generator of the field over GF(2).
    #[inline]
    pub const fn generator(&self) -> BinaryElement {
        BinaryElement(2)
    }

    #[inline]
    pub const fn add(&self, a: BinaryElement, b: BinaryElement) -> BinaryElement {
        BinaryElement(a.0 ^ b.0)
    }

    #[inline]
    pub const fn sub(&self, a: BinaryElement, b: BinaryElement) -> BinaryElement {
        BinaryElement(a.0 ^ b.0)
    }

    #[inline]
    pub const fn mul(&self, a: BinaryElement, b: BinaryElement) -> BinaryElement {
        BinaryElement(mul_reduce(a.0, b.0, self.degree, self.low))
    }

    /// Multiplies by the generator `x`: one shift and a conditional reduction.
    #[inline]
    pub const fn mul_by_x(&self, a: BinaryElement) -> BinaryElement {
        let carry = a.0 >> (self.degree - 1) & 1 == 1;
        let shifted = (a.0 << 1) & self.mask;
        BinaryElement(if carry { shifted ^ self.low } else { shifted })
    }

    #[inline]
    pub const fn square(&self, a: BinaryElement) -> BinaryElement {
        self.mul(a, a)
    }

    /// Computes `a^(2^power_log)` by repeated squaring.
    pub fn exp_power_of_2(&self, a: BinaryElement, power_log: u32) -> BinaryElement {
        (0..power_log).fold(a, |acc, _| self.square(acc))
    }

    /// Computes `a^power`. `0^0` is one.
    #[inline]
    pub fn exp_u128(&self, a: BinaryElement, power: u128) -> BinaryElement {
        exp_by_squaring(self, a, power)
    }

    /// Multiplicative inverse via `a^(2^n - 2)`, `None` for zero.
    pub fn try_inverse(&self, a: BinaryElement) -> Option<BinaryElement> {
        if a.0 == 0 {
            return None;
        }
        Some(self.exp_u128(a, self.mask - 1))
    }

    pub fn inverse(&self, a: BinaryElement) -> Result<BinaryElement, FieldError> {
        self.try_inverse(a).ok_or(FieldError::ZeroInverse)
    }

    /// Computes `a / b`, failing when `b` is zero.
    pub fn div(&self, a: BinaryElement, b: BinaryElement) -> Result<BinaryElement, FieldError> {
        Ok(self.mul(a, self.inverse(b)?))
    }

    /// Fixed-width lowercase hex of `ceil(n / 4)` digits, no prefix.
    pub fn to_hex(&self, e: BinaryElement) -> String {
        format!("{:0width$x}", e.0, width = self.hex_digits())
    }

    /// Parses the fixed-width encoding produced by [`to_hex`](Self::to_hex). Upper case digits
    /// are accepted.
    pub fn from_hex(&self, literal: &str) -> Result<BinaryElement, FieldError> {
        let digits = self.hex_digits();
        let invalid = || FieldError::InvalidHex {
            literal: literal.to_string(),
            degree: self.degree,
            digits,
        };
        if literal.len() != digits || !literal.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let value = u128::from_str_radix(literal, 16).map_err(|_| invalid())?;
        self.element(value)
    }

    /// Uniformly random element.
    pub fn random_element<R: Rng + ?Sized>(&self, rng: &mut R) -> BinaryElement {
        BinaryElement(rng.random::<u128>() & self.mask)
    }
}

impl Debug for BinaryField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinaryField")
            .field("degree", &self.degree)
            .field("low", &format_args!("{:#x}", self.low))
            .finish()
    }
}

impl Display for BinaryField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "GF(2^{})", self.degree)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn aes_field() -> BinaryField {
        BinaryField::new(8, 0x1b).unwrap()
    }

    #[test]
    fn test_aes_known_answers() {
        let f = aes_field();
        assert_eq!(f.mul(BinaryElement::new(0x57), BinaryElement::new(0x83)).value(), 0xc1);
        assert_eq!(f.mul(BinaryElement::new(0x57), BinaryElement::new(0x13)).value(), 0xfe);
        assert_eq!(f.inverse(BinaryElement::new(0x53)).unwrap().value(), 0xca);
    }

    #[test]
    fn test_gf64_known_answers() {
        let f = BinaryField::standard(64).unwrap();
        assert_eq!(f.reduction_low(), crate::CONWAY_64_LOW);
        let a = BinaryElement::new(0x0123_4567_89ab_cdef);
        let b = BinaryElement::new(0xfedc_ba98_7654_3210);
        assert_eq!(f.mul(a, b).value(), 0x4bc8_bd86_3bf2_4ee4);
        // x^63 * x wraps to the low part of the modulus.
        assert_eq!(f.mul_by_x(BinaryElement::new(1 << 63)).value(), 0x2_47f4_3cb7);
        assert_eq!(f.inverse(f.generator()).unwrap().value(), 0x8000_0001_23fa_1e5b);
    }

    #[test]
    fn test_inverse_exhaustive_small_field() {
        let f = BinaryField::standard(6).unwrap();
        for v in 1..64 {
            let a = BinaryElement::new(v);
            assert_eq!(f.mul(a, f.inverse(a).unwrap()), BinaryElement::ONE);
        }
        assert_eq!(f.inverse(BinaryElement::ZERO), Err(FieldError::ZeroInverse));
        assert_eq!(f.try_inverse(BinaryElement::ZERO), None);
    }

    #[test]
    fn test_field_axioms_random() {
        let mut rng = SmallRng::seed_from_u64(1);
        for degree in [3, 17, 32, 64, 127, 128] {
            let f = BinaryField::standard(degree).unwrap();
            for _ in 0..50 {
                let a = f.random_element(&mut rng);
                let b = f.random_element(&mut rng);
                let c = f.random_element(&mut rng);
                assert!(f.contains(f.mul(a, b)));
                assert_eq!(f.mul(a, b), f.mul(b, a));
                assert_eq!(f.mul(f.mul(a, b), c), f.mul(a, f.mul(b, c)));
                assert_eq!(f.mul(a, b + c), f.mul(a, b) + f.mul(a, c));
                assert_eq!(f.mul(a, BinaryElement::ONE), a);
                assert_eq!(a - a, BinaryElement::ZERO);
            }
        }
    }

    #[test]
    fn test_inverse_random_large_fields() {
        let mut rng = SmallRng::seed_from_u64(7);
        for degree in [32, 64, 128] {
            let f = BinaryField::standard(degree).unwrap();
            for _ in 0..20 {
                let a = f.random_element(&mut rng);
                if a.is_zero() {
                    continue;
                }
                let inv = f.inverse(a).unwrap();
                assert_eq!(f.mul(a, inv), f.one());
                assert_eq!(f.div(a, a).unwrap(), f.one());
            }
        }
    }

    #[test]
    fn test_generator_order_divides_group_order() {
        let f = BinaryField::standard(32).unwrap();
        let x = f.generator();
        assert_eq!(f.exp_u128(x, f.order_minus_one()), f.one());
        // x^(2^n) = x in GF(2^n).
        assert_eq!(f.exp_power_of_2(x, 32), x);
    }

    #[test]
    fn test_mul_by_x_matches_mul() {
        let mut rng = SmallRng::seed_from_u64(3);
        for degree in [3, 8, 32, 128] {
            let f = BinaryField::standard(degree).unwrap();
            for _ in 0..20 {
                let a = f.random_element(&mut rng);
                assert_eq!(f.mul_by_x(a), f.mul(a, f.generator()));
            }
        }
    }

    #[test]
    fn test_exp_matches_repeated_multiplication() {
        let f = BinaryField::standard(13).unwrap();
        let a = BinaryElement::new(0x1abc);
        let mut acc = f.one();
        for k in 0..40u128 {
            assert_eq!(f.exp_u128(a, k), acc);
            acc = f.mul(acc, a);
        }
        assert_eq!(f.exp_u128(f.zero(), 0), f.one());
    }

    #[test]
    fn test_hex_encoding() {
        let f32 = BinaryField::standard(32).unwrap();
        let e = f32.element(0x401).unwrap();
        assert_eq!(f32.to_hex(e), "00000401");
        assert_eq!(f32.from_hex("00000401").unwrap(), e);
        assert_eq!(f32.from_hex("0000040A").unwrap().value(), 0x40a);

        let f5 = BinaryField::standard(5).unwrap();
        assert_eq!(f5.hex_digits(), 2);
        assert_eq!(f5.to_hex(BinaryElement::new(0x1f)), "1f");
        // Two digits can hold 0x20, which is outside GF(2^5).
        assert_eq!(
            f5.from_hex("20").unwrap_err(),
            FieldError::NonCanonical {
                value: 0x20,
                degree: 5
            }
        );

        for bad in ["401", "0x000401", "0000040g", "+0000401"] {
            let err = f32.from_hex(bad).unwrap_err();
            assert!(matches!(err, FieldError::InvalidHex { .. }), "{bad}");
        }

        let f128 = BinaryField::standard(128).unwrap();
        let top = f128.element(u128::MAX).unwrap();
        let hex = f128.to_hex(top);
        assert_eq!(hex.len(), 32);
        assert_eq!(f128.from_hex(&hex).unwrap(), top);
    }

    #[test]
    fn test_element_range_checks() {
        let f = BinaryField::standard(4).unwrap();
        assert!(f.element(15).is_ok());
        assert_eq!(
            f.element(16),
            Err(FieldError::NonCanonical {
                value: 16,
                degree: 4
            })
        );
        let all: Vec<_> = (0..16).map(|v| f.element(v).unwrap()).collect();
        assert!(all.iter().all(|&e| f.contains(e)));
        for e in &all {
            assert_eq!(BinaryElement::from_canonical_u128(e.to_canonical_u128()), *e);
        }
        assert!(all[0].is_zero() && !all[1].is_zero());
    }

    #[test]
    fn test_rejects_bad_parameters() {
        assert_eq!(
            BinaryField::new(1, 1),
            Err(FieldError::UnsupportedDegree { degree: 1 })
        );
        assert_eq!(
            BinaryField::standard(129),
            Err(FieldError::UnsupportedDegree { degree: 129 })
        );
        // x^4 + x^2 + 1 = (x^2 + x + 1)^2.
        assert_eq!(
            BinaryField::new(4, 0b101),
            Err(FieldError::ReduciblePolynomial { degree: 4, low: 0b101 })
        );
        // Low part must stay below x^n.
        assert!(BinaryField::new(4, 0x13).is_err());
        assert_eq!(
            BinaryField::new(4, 0b11).unwrap(),
            BinaryField::standard(4).unwrap()
        );
    }

    #[test]
    fn test_element_serde_is_transparent() {
        let e = BinaryElement::new(0x8000_0001);
        let json = serde_json::to_string(&e).unwrap();
        assert_eq!(json, "2147483649");
        assert_eq!(serde_json::from_str::<BinaryElement>(&json).unwrap(), e);
    }
}
