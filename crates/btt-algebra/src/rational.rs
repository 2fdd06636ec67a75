//! The field of rational numbers ℚ on arbitrary-precision integers.

use core::fmt;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use crate::error::{AlgebraError, Result};
use crate::structure::{Field, Ring};

/// A rational number in lowest terms with a positive denominator.
///
/// The fields are private: every constructor but
/// [`Rational::new_unchecked`] canonicalizes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rational {
    num: BigInt,
    den: BigInt,
}

impl Rational {
    /// The integer `n`.
    #[inline]
    #[must_use]
    pub fn int(n: i64) -> Self {
        Self::integer(BigInt::from(n))
    }

    /// The integer `n`.
    #[inline]
    #[must_use]
    pub fn integer(n: BigInt) -> Self {
        Self { num: n, den: BigInt::one() }
    }

    /// `num / den` in canonical form.
    ///
    /// # Errors
    /// [`AlgebraError::ZeroDenominator`] when `den == 0`.
    pub fn new(num: i64, den: i64) -> Result<Self> {
        Self::from_parts(BigInt::from(num), BigInt::from(den))
    }

    /// Canonicalize a fraction: sign on the numerator, gcd divided out.
    ///
    /// # Errors
    /// [`AlgebraError::ZeroDenominator`] when `den == 0`.
    pub fn from_parts(num: BigInt, den: BigInt) -> Result<Self> {
        if den.is_zero() {
            return Err(AlgebraError::ZeroDenominator);
        }
        Ok(Self::lowest_terms(num, den))
    }

    /// Canonical form of `num / den` for a nonzero `den`.
    fn lowest_terms(num: BigInt, den: BigInt) -> Self {
        if num.is_zero() {
            return Self::integer(num);
        }
        let g = num.gcd(&den);
        let (num, den) = (num / &g, den / &g);
        if den.is_negative() {
            Self { num: -num, den: -den }
        } else {
            Self { num, den }
        }
    }

    /// Wrap `num / den` as is. The caller guarantees `gcd(num, den) = 1`
    /// and `den > 0`; equality and hashing assume it.
    #[inline]
    #[must_use]
    pub const fn new_unchecked(num: BigInt, den: BigInt) -> Self {
        Self { num, den }
    }

    /// Numerator.
    #[inline]
    #[must_use]
    pub const fn numer(&self) -> &BigInt {
        &self.num
    }

    /// Denominator, always `> 0`.
    #[inline]
    #[must_use]
    pub const fn denom(&self) -> &BigInt {
        &self.den
    }

    /// `true` for zero.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.num.is_zero()
    }

    /// `true` when the denominator is one.
    #[inline]
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.den.is_one()
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

/// ℚ as a [`Field`]. Stateless; every method reduces its result.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RationalField;

impl RationalField {
    /// Canonical `num / den`.
    ///
    /// # Errors
    /// Zero denominator.
    #[inline]
    pub fn reduce(&self, num: BigInt, den: BigInt) -> Result<Rational> {
        Rational::from_parts(num, den)
    }

    /// `a^n` for `n ≥ 0` without intermediate gcds (powers of a reduced
    /// fraction stay reduced).
    #[must_use]
    pub fn nonzero_pow(&self, a: &Rational, n: u32) -> Rational {
        Rational { num: a.num.pow(n), den: a.den.pow(n) }
    }
}

impl Ring for RationalField {
    type Element = Rational;

    #[inline]
    fn zero(&self) -> Rational {
        Rational::int(0)
    }

    #[inline]
    fn one(&self) -> Rational {
        Rational::int(1)
    }

    fn add(&self, a: &Rational, b: &Rational) -> Rational {
        if a.is_integer() && b.is_integer() {
            return Rational::integer(&a.num + &b.num);
        }
        Rational::lowest_terms(&a.num * &b.den + &b.num * &a.den, &a.den * &b.den)
    }

    #[inline]
    fn negate(&self, a: &Rational) -> Rational {
        Rational { num: -&a.num, den: a.den.clone() }
    }

    fn multiply(&self, a: &Rational, b: &Rational) -> Rational {
        Rational::lowest_terms(&a.num * &b.num, &a.den * &b.den)
    }

    #[inline]
    fn is_zero(&self, a: &Rational) -> bool {
        a.is_zero()
    }

    #[inline]
    fn from_int(&self, n: i64) -> Rational {
        Rational::int(n)
    }

    #[inline]
    fn from_big_int(&self, n: &BigInt) -> Rational {
        Rational::integer(n.clone())
    }

    fn name(&self) -> String {
        "Q".into()
    }

    fn format(&self, a: &Rational) -> String {
        a.to_string()
    }

    fn latex(&self, a: &Rational) -> String {
        if a.is_integer() {
            a.num.to_string()
        } else {
            format!("\\frac{{{}}}{{{}}}", a.num, a.den)
        }
    }
}

impl Field for RationalField {
    /// Reciprocal; zero maps to zero.
    #[inline]
    fn invert_unchecked(&self, a: &Rational) -> Rational {
        if a.num.is_zero() {
            return self.zero();
        }
        let den = a.num.abs();
        let num = if a.num.is_negative() { -&a.den } else { a.den.clone() };
        Rational { num, den }
    }

    fn divide_unchecked(&self, a: &Rational, b: &Rational) -> Rational {
        if b.num.is_zero() {
            return self.zero();
        }
        Rational::lowest_terms(&a.num * &b.den, &a.den * &b.num)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[track_caller]
    fn q(num: i64, den: i64) -> Rational {
        Rational::new(num, den).unwrap()
    }

    #[test]
    fn reduce_normalizes_sign_and_gcd() {
        let half = Rational::new_unchecked(BigInt::from(1), BigInt::from(2));
        assert_eq!(q(2, 4), half);
        assert_eq!(q(-2, -4), half);
        assert_eq!(q(2, -4), RationalField.negate(&half));
        assert_eq!(q(2, -4).numer(), &BigInt::from(-1));
        assert_eq!(q(2, -4).denom(), &BigInt::from(2));
        assert_eq!(q(0, -7), Rational::int(0));
        assert_eq!(Rational::new(1, 0), Err(AlgebraError::ZeroDenominator));
    }

    #[test]
    fn field_operations() {
        let f = RationalField;
        assert_eq!(f.add(&q(1, 2), &q(1, 3)), q(5, 6));
        assert_eq!(f.add(&q(1, 2), &q(-1, 2)), f.zero());
        assert_eq!(f.subtract(&q(1, 2), &q(1, 3)), q(1, 6));
        assert_eq!(f.multiply(&q(2, 3), &q(9, 4)), q(3, 2));
        assert_eq!(f.divide(&q(2, 3), &q(4, 9)), Ok(q(3, 2)));
        assert_eq!(f.invert(&q(-2, 3)), Ok(q(-3, 2)));
        assert_eq!(f.invert(&f.zero()), Err(AlgebraError::DivisionByZero));
        assert_eq!(f.pow_signed(&q(2, 3), -2), Ok(q(9, 4)));
        assert_eq!(f.nonzero_pow(&q(-2, 3), 3), q(-8, 27));
    }

    #[test]
    fn sums_past_i64_stay_exact() {
        let f = RationalField;
        let third = q(1, 3);
        let tiny = f.nonzero_pow(&third, 60);
        let big = f.nonzero_pow(&q(5, 1), 40);
        let s = f.add(&tiny, &big);
        assert_eq!(f.subtract(&s, &big), tiny);
        assert_eq!(f.multiply(&tiny, &f.nonzero_pow(&q(3, 1), 60)), f.one());
        assert_eq!(f.from_big_int(big.numer()), big);
        assert!(s.denom() > &BigInt::from(i64::MAX));
    }

    #[test]
    fn display() {
        let f = RationalField;
        assert_eq!(f.format(&q(5, 1)), "5/1");
        assert_eq!(f.latex(&q(5, 6)), "\\frac{5}{6}");
        assert_eq!(f.latex(&q(-5, 1)), "-5");
    }
}
