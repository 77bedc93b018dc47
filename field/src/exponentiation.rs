use gcd::Gcd;
use num_bigint::BigUint;

use crate::error::FieldError;
use crate::field::{BinaryElement, BinaryField, low_mask};

/// Right-to-left square-and-multiply over the bits of `power`.
pub fn exp_by_squaring(field: &BinaryField, val: BinaryElement, power: u128) -> BinaryElement {
    let mut current = val;
    let mut product = BinaryElement::ONE;

    for j in 0..bits_u128(power) {
        if (power >> j & 1) != 0 {
            product = field.mul(product, current);
        }
        current = field.square(current);
    }
    product
}

const fn bits_u128(n: u128) -> u32 {
    128 - n.leading_zeros()
}

/// Returns `alpha^{-1} mod (2^degree - 1)`, the exponent of the inverse power map.
///
/// `x -> x^alpha` is a bijection of GF(2^n) exactly when `gcd(alpha, 2^n - 1) = 1`; any other
/// exponent is rejected.
pub fn inverse_exponent(alpha: u64, degree: u32) -> Result<u128, FieldError> {
    let order_minus_one = low_mask(degree);
    let not_invertible = FieldError::NonInvertibleExponent { alpha, degree };
    if (alpha as u128).gcd(order_minus_one) != 1 {
        return Err(not_invertible);
    }
    let inverse = BigUint::from(alpha)
        .modinv(&BigUint::from(order_minus_one))
        .ok_or(not_invertible.clone())?;
    u128::try_from(&inverse).map_err(|_| not_invertible)
}
