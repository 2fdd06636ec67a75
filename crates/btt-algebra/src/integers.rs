//! The ring of integers ℤ on [`BigInt`], plus scalar number-theory helpers.

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use crate::error::{AlgebraError, Result};
use crate::structure::{EuclideanDomain, Ring};

/// ℤ with floor-style Euclidean division (`0 ≤ r < |b|`).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Integers;

impl Ring for Integers {
    type Element = BigInt;

    #[inline]
    fn zero(&self) -> BigInt {
        BigInt::zero()
    }

    #[inline]
    fn one(&self) -> BigInt {
        BigInt::one()
    }

    #[inline]
    fn add(&self, a: &BigInt, b: &BigInt) -> BigInt {
        a + b
    }

    #[inline]
    fn negate(&self, a: &BigInt) -> BigInt {
        -a
    }

    #[inline]
    fn multiply(&self, a: &BigInt, b: &BigInt) -> BigInt {
        a * b
    }

    #[inline]
    fn subtract(&self, a: &BigInt, b: &BigInt) -> BigInt {
        a - b
    }

    #[inline]
    fn is_zero(&self, a: &BigInt) -> bool {
        a.is_zero()
    }

    #[inline]
    fn from_int(&self, n: i64) -> BigInt {
        BigInt::from(n)
    }

    fn name(&self) -> String {
        "Z".into()
    }

    fn format(&self, a: &BigInt) -> String {
        a.to_string()
    }
}

impl EuclideanDomain for Integers {
    type Norm = BigUint;

    #[inline]
    fn ed_norm(&self, a: &BigInt) -> BigUint {
        a.magnitude().clone()
    }

    /// `a = q·b + r` with `0 ≤ r < |b|` for either sign of `b`.
    fn divmod(&self, a: &BigInt, b: &BigInt) -> Result<(BigInt, BigInt)> {
        if b.is_zero() {
            return Err(AlgebraError::DivisionByZero);
        }
        let r = a.mod_floor(&b.abs());
        let q = (a - &r) / b;
        Ok((q, r))
    }

    #[inline]
    fn unit_inverse(&self, a: &BigInt) -> Option<BigInt> {
        a.magnitude().is_one().then(|| a.clone())
    }

    #[inline]
    fn gcd(&self, a: &BigInt, b: &BigInt) -> BigInt {
        Integer::gcd(a, b)
    }
}

/* --------------------------- scalar helpers (i64) --------------------------- */

/// Non-negative gcd; `gcd(0, 0) = 0`.
#[must_use]
pub fn gcd(a: i64, b: i64) -> i64 {
    let g = num_integer::gcd(a.unsigned_abs(), b.unsigned_abs());
    i64::try_from(g).unwrap_or(i64::MAX)
}

/// Mathematical mod: result in `0..|b|`.
///
/// # Errors
/// `b == 0`.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub fn modulo(a: i64, b: i64) -> Result<i64> {
    if b == 0 {
        return Err(AlgebraError::DivisionByZero);
    }
    // |result| < |b| ≤ 2^63, so the narrowing is exact
    Ok(i128::from(a).rem_euclid(i128::from(b).abs()) as i64)
}

/// `a^{-1} mod n` in `0..|n|`.
///
/// # Errors
/// [`AlgebraError::NotInvertible`] if `gcd(a, n) ≠ 1`;
/// [`AlgebraError::DivisionByZero`] if `n == 0`.
pub fn inverse_mod(a: i64, n: i64) -> Result<i64> {
    if n == 0 {
        return Err(AlgebraError::DivisionByZero);
    }
    let m = i128::from(n).abs();
    let eg = i128::from(a).rem_euclid(m).extended_gcd(&m);
    if eg.gcd != 1 {
        return Err(AlgebraError::NotInvertible);
    }
    i64::try_from(eg.x.rem_euclid(m)).map_err(|_| AlgebraError::NotInvertible)
}

/// Trial-division primality test; non-positive numbers are not prime.
#[must_use]
pub fn is_prime(n: i64) -> bool {
    if n <= 1 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut d = 3i64;
    while d.saturating_mul(d) <= n {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn z(n: i64) -> BigInt {
        BigInt::from(n)
    }

    #[test]
    fn divmod_is_floor_style() {
        let zz = Integers;
        assert_eq!(zz.divmod(&z(7), &z(3)), Ok((z(2), z(1))));
        assert_eq!(zz.divmod(&z(-7), &z(3)), Ok((z(-3), z(2))));
        assert_eq!(zz.divmod(&z(7), &z(-3)), Ok((z(-2), z(1))));
        assert_eq!(zz.divmod(&z(-7), &z(-3)), Ok((z(3), z(2))));
        assert_eq!(zz.divmod(&z(1), &z(0)), Err(AlgebraError::DivisionByZero));
    }

    #[test]
    fn modulo_matches_math_mod() {
        assert_eq!(modulo(7, 5), Ok(2));
        assert_eq!(modulo(12, 7), Ok(5));
        assert_eq!(modulo(-7, 5), Ok(3));
        assert_eq!(modulo(-12, 7), Ok(2));
        assert_eq!(modulo(-5, 5), Ok(0));
        assert_eq!(modulo(-7, -3), Ok(2));
        assert_eq!(modulo(i64::MIN, -1), Ok(0));
        assert_eq!(modulo(1, 0), Err(AlgebraError::DivisionByZero));
    }

    #[test]
    fn gcd_ignores_signs() {
        assert_eq!(gcd(12, 8), 4);
        assert_eq!(gcd(-12, 8), 4);
        assert_eq!(gcd(12, -8), 4);
        assert_eq!(gcd(0, 5), 5);
        assert_eq!(gcd(5, 0), 5);
        assert_eq!(gcd(0, 0), 0);
        assert_eq!(Integers.gcd(&z(100), &z(-10)), z(10));
    }

    #[test]
    fn inverse_mod_cases() {
        assert_eq!(inverse_mod(2, 5), Ok(3));
        assert_eq!(inverse_mod(3, 7), Ok(5));
        assert_eq!(inverse_mod(1, 13), Ok(1));
        assert_eq!(inverse_mod(-3, 7), Ok(2));
        assert_eq!(inverse_mod(2, 4), Err(AlgebraError::NotInvertible));
        assert_eq!(inverse_mod(0, 5), Err(AlgebraError::NotInvertible));
        assert_eq!(Integers.inverse_mod(&z(-3), &z(7)), Ok(z(2)));
    }

    #[test]
    fn products_past_i64_are_exact() {
        let zz = Integers;
        let big = zz.pow(&z(3), 80).unwrap();
        assert_eq!(big.to_string(), "147808829414345923316083210206383297601");
        let (q, r) = zz.divmod(&zz.add(&big, &z(5)), &z(3)).unwrap();
        assert_eq!(r, z(2));
        assert_eq!(zz.add(&zz.multiply(&q, &z(3)), &r), zz.add(&big, &z(5)));
        assert_eq!(zz.ed_norm(&zz.negate(&big)), big.magnitude().clone());
    }

    #[test]
    fn primality() {
        for p in [2, 3, 5, 13, 97, 7919] {
            assert!(is_prime(p), "{p} should be prime");
        }
        for n in [-7, 0, 1, 4, 9, 100, 7917] {
            assert!(!is_prime(n), "{n} should not be prime");
        }
    }

    #[test]
    fn display() {
        assert_eq!(Integers.name(), "Z");
        assert_eq!(Integers.format(&z(-4)), "-4");
    }
}
