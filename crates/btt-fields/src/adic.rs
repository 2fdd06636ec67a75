//! ℚ with the `p`-adic valuation.

use btt_algebra::{
    AlgebraError, EuclideanDomain, Field, FiniteField, Integers, Rational, RationalField, Result,
    Ring,
};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::Zero;
use once_cell::sync::OnceCell;

use crate::dvfield::DVField;

/// The `p`-adic field, modelled on its dense subfield ℚ.
///
/// Elements are [`Rational`]s in lowest terms; arithmetic is exact and the
/// valuation is `v_p`.
#[derive(Clone, Debug)]
pub struct Adic {
    p: i64,
    prime: BigInt,
    residue: FiniteField,
    uniformizer: OnceCell<Rational>,
}

impl PartialEq for Adic {
    fn eq(&self, other: &Self) -> bool {
        self.p == other.p
    }
}

impl Eq for Adic {}

impl Adic {
    /// ℚ_p.
    ///
    /// # Errors
    /// [`AlgebraError::InvalidPrime`] if `p` is not a positive prime.
    pub fn new(p: i64) -> Result<Self> {
        let residue = FiniteField::new(p)?;
        Ok(Self { p, prime: BigInt::from(p), residue, uniformizer: OnceCell::new() })
    }

    /// The prime.
    #[inline]
    #[must_use]
    pub const fn p(&self) -> i64 {
        self.p
    }
}

impl Ring for Adic {
    type Element = Rational;

    #[inline]
    fn zero(&self) -> Rational {
        RationalField.zero()
    }

    #[inline]
    fn one(&self) -> Rational {
        RationalField.one()
    }

    #[inline]
    fn add(&self, a: &Rational, b: &Rational) -> Rational {
        RationalField.add(a, b)
    }

    #[inline]
    fn subtract(&self, a: &Rational, b: &Rational) -> Rational {
        RationalField.subtract(a, b)
    }

    #[inline]
    fn negate(&self, a: &Rational) -> Rational {
        RationalField.negate(a)
    }

    #[inline]
    fn multiply(&self, a: &Rational, b: &Rational) -> Rational {
        RationalField.multiply(a, b)
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
        format!("{}-adic Field", self.p)
    }

    fn format(&self, a: &Rational) -> String {
        RationalField.format(a)
    }

    fn latex(&self, a: &Rational) -> String {
        RationalField.latex(a)
    }
}

impl Field for Adic {
    #[inline]
    fn invert_unchecked(&self, a: &Rational) -> Rational {
        RationalField.invert_unchecked(a)
    }

    #[inline]
    fn divide_unchecked(&self, a: &Rational, b: &Rational) -> Rational {
        RationalField.divide_unchecked(a, b)
    }

    #[inline]
    fn from_rational(&self, r: &Rational) -> Result<Rational> {
        Ok(r.clone())
    }
}

impl DVField for Adic {
    type Integral = BigInt;
    type ValuationRing = Integers;

    #[inline]
    fn valuation_ring(&self) -> &Integers {
        &Integers
    }

    #[inline]
    fn residue_field(&self) -> &FiniteField {
        &self.residue
    }

    #[inline]
    fn uniformizer_int(&self) -> BigInt {
        self.prime.clone()
    }

    #[inline]
    fn num(&self, x: &Rational) -> BigInt {
        x.numer().clone()
    }

    #[inline]
    fn den(&self, x: &Rational) -> BigInt {
        x.denom().clone()
    }

    #[inline]
    fn fraction_unchecked(&self, num: BigInt, den: BigInt) -> Rational {
        Rational::new_unchecked(num, den)
    }

    #[inline]
    fn reduce(&self, num: &BigInt, den: &BigInt) -> Result<Rational> {
        Rational::from_parts(num.clone(), den.clone())
    }

    #[inline]
    fn residue_int(&self, a: &BigInt) -> u64 {
        self.residue.from_big_int(a)
    }

    fn split_int(&self, a: &BigInt) -> Result<(BigInt, i64)> {
        if a.is_zero() {
            return Err(AlgebraError::ZeroElement);
        }
        let (mut u, mut v) = (a.clone(), 0i64);
        loop {
            let (q, r) = u.div_rem(&self.prime);
            if !r.is_zero() {
                return Ok((u, v));
            }
            u = q;
            v += 1;
        }
    }

    /// `num · den^{-1} mod p^k` in `0..p^k`.
    fn reduce_unit(&self, num: &BigInt, den: &BigInt, k: u32) -> Result<BigInt> {
        let m = self.prime.pow(k);
        let inv = Integers.inverse_mod(den, &m)?;
        Ok((num * inv).mod_floor(&m))
    }

    /// `p^n`, computed directly.
    #[inline]
    fn integral_from_val(&self, n: u32) -> BigInt {
        self.prime.pow(n)
    }

    fn uniformizer(&self) -> Rational {
        self.uniformizer.get_or_init(|| Rational::integer(self.prime.clone())).clone()
    }
}
