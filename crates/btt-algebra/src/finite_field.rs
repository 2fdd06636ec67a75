//! Prime field 𝔽_p with a runtime modulus.
//!
//! Elements are canonical residues in `0..p`. Products go through `u128`
//! so any prime below 2^63 is safe.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::ToPrimitive;

use crate::error::{AlgebraError, Result};
use crate::integers::{inverse_mod, is_prime};
use crate::structure::{Field, Ring};

/// ℤ/pℤ for a prime `p`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FiniteField {
    p: u64,
}

impl FiniteField {
    /// Construct 𝔽_p.
    ///
    /// # Errors
    /// [`AlgebraError::InvalidPrime`] if `p` is not a positive prime.
    pub fn new(p: i64) -> Result<Self> {
        if !is_prime(p) {
            return Err(AlgebraError::InvalidPrime(p));
        }
        Ok(Self { p: p.unsigned_abs() })
    }

    /// The characteristic.
    #[inline]
    #[must_use]
    pub const fn p(&self) -> u64 {
        self.p
    }

    /// The characteristic as a signed integer.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn p_signed(&self) -> i64 {
        self.p as i64
    }

    /// Canonical residue of a signed integer.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn reduce(&self, x: i64) -> u64 {
        (i128::from(x).rem_euclid(i128::from(self.p))) as u64
    }

    /// Iterator over all elements `0..p`.
    pub fn elements(&self) -> impl Iterator<Item = u64> {
        0..self.p
    }
}

impl Ring for FiniteField {
    type Element = u64;

    #[inline]
    fn zero(&self) -> u64 {
        0
    }

    #[inline]
    fn one(&self) -> u64 {
        1 % self.p
    }

    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    fn add(&self, a: &u64, b: &u64) -> u64 {
        ((u128::from(*a) + u128::from(*b)) % u128::from(self.p)) as u64
    }

    #[inline]
    fn negate(&self, a: &u64) -> u64 {
        if *a == 0 {
            0
        } else {
            self.p - a
        }
    }

    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    fn multiply(&self, a: &u64, b: &u64) -> u64 {
        ((u128::from(*a) * u128::from(*b)) % u128::from(self.p)) as u64
    }

    #[inline]
    fn from_int(&self, n: i64) -> u64 {
        self.reduce(n)
    }

    /// Canonical residue of an arbitrary-precision integer.
    fn from_big_int(&self, n: &BigInt) -> u64 {
        n.mod_floor(&BigInt::from(self.p)).to_u64().unwrap_or(0)
    }

    fn name(&self) -> String {
        format!("FiniteField({})", self.p)
    }

    fn format(&self, a: &u64) -> String {
        a.to_string()
    }
}

impl Field for FiniteField {
    /// Inverse via extended Euclid over ℤ; zero maps to zero.
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    fn invert_unchecked(&self, a: &u64) -> u64 {
        inverse_mod(*a as i64, self.p_signed()).map_or(0, |inv| inv as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[track_caller]
    fn f(p: i64) -> FiniteField {
        FiniteField::new(p).unwrap()
    }

    #[test]
    fn construction_requires_prime() {
        assert!(FiniteField::new(5).is_ok());
        assert_eq!(FiniteField::new(4), Err(AlgebraError::InvalidPrime(4)));
        assert_eq!(FiniteField::new(1), Err(AlgebraError::InvalidPrime(1)));
        assert_eq!(FiniteField::new(-5), Err(AlgebraError::InvalidPrime(-5)));
    }

    #[test]
    fn arithmetic_mod_5() {
        let f5 = f(5);
        assert_eq!(f5.add(&3, &4), 2);
        assert_eq!(f5.subtract(&1, &3), 3);
        assert_eq!(f5.multiply(&3, &4), 2);
        assert_eq!(f5.negate(&2), 3);
        assert_eq!(f5.negate(&0), 0);
        assert_eq!(f5.from_int(-7), 3);
        assert_eq!(f5.from_int(12), 2);
    }

    #[test]
    fn inverses() {
        let f7 = f(7);
        for a in 1..7u64 {
            let inv = f7.invert(&a).unwrap();
            assert_eq!(f7.multiply(&a, &inv), 1, "a = {a}");
        }
        assert_eq!(f7.invert(&0), Err(AlgebraError::DivisionByZero));
        assert_eq!(f7.divide(&3, &2), Ok(5));
    }

    #[test]
    fn fermat() {
        let f13 = f(13);
        for a in 1..13u64 {
            assert_eq!(f13.pow(&a, 12), Ok(1));
        }
    }

    #[test]
    fn display() {
        assert_eq!(f(5).name(), "FiniteField(5)");
        assert_eq!(f(5).format(&3), "3");
    }
}
