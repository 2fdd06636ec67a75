//! 𝔽_p(x) with the `x`-adic valuation.
//!
//! Elements are fractions of polynomials with coprime numerator and a monic
//! denominator. Reduction runs the extended Euclidean algorithm once: the
//! annihilating cofactors `s, t` of `(num, den)` are exactly the reduced
//! fraction `-t/s`, up to making `s` monic.

use core::fmt;

use btt_algebra::{
    AlgebraError, EuclideanDomain, ExtendedInt, Field, FiniteField, Polynomial, PolynomialRing,
    Result, Ring,
};
use once_cell::sync::OnceCell;

use crate::dvfield::DVField;

/// A reduced rational function `num / den` with `den` monic.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RationalFunction {
    num: Polynomial,
    den: Polynomial,
}

impl RationalFunction {
    /// Numerator.
    #[inline]
    #[must_use]
    pub const fn num(&self) -> &Polynomial {
        &self.num
    }

    /// Denominator (monic).
    #[inline]
    #[must_use]
    pub const fn den(&self) -> &Polynomial {
        &self.den
    }
}

impl fmt::Display for RationalFunction {
    /// `num` alone when the denominator is one; otherwise a multi-term
    /// numerator and the denominator are parenthesized: `(1 + x)/(x)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den.coeffs() == [1] {
            return write!(f, "{}", self.num);
        }
        if self.num.term_count() > 1 {
            write!(f, "({})/({})", self.num, self.den)
        } else {
            write!(f, "{}/({})", self.num, self.den)
        }
    }
}

/// 𝔽_p(x), the fraction field of 𝔽_p\[x\], valued at `x = 0`.
#[derive(Clone, Debug)]
pub struct FunctionField {
    ring: PolynomialRing,
    uniformizer: OnceCell<RationalFunction>,
}

impl PartialEq for FunctionField {
    fn eq(&self, other: &Self) -> bool {
        self.ring == other.ring
    }
}

impl Eq for FunctionField {}

impl FunctionField {
    /// 𝔽_p(x).
    ///
    /// # Errors
    /// [`AlgebraError::InvalidPrime`] if `p` is not a positive prime.
    pub fn new(p: i64) -> Result<Self> {
        let ring = PolynomialRing::new(FiniteField::new(p)?);
        Ok(Self { ring, uniformizer: OnceCell::new() })
    }

    /// The characteristic.
    #[inline]
    #[must_use]
    pub const fn p(&self) -> u64 {
        self.ring.field().p()
    }

    /// Polynomial with the given integer coefficients, as a field element.
    #[must_use]
    pub fn from_ints(&self, coeffs: &[i64]) -> RationalFunction {
        self.from_integral(&self.ring.from_ints(coeffs))
    }

    /// Canonical `num / den` from integer coefficient lists.
    ///
    /// # Errors
    /// `den` is the zero polynomial.
    pub fn fraction(&self, num: &[i64], den: &[i64]) -> Result<RationalFunction> {
        self.reduce(&self.ring.from_ints(num), &self.ring.from_ints(den))
    }

    /// `num / 1`.
    fn polynomial(&self, num: Polynomial) -> RationalFunction {
        RationalFunction { num, den: self.ring.one() }
    }

    /// `num / den` in lowest terms for a nonzero `den`.
    ///
    /// `num·s = −den·t` with `s, t` coprime, so `s ≠ 0` whenever `den ≠ 0`
    /// and `−t/s` made monic is the canonical form.
    fn lowest_terms(&self, num: &Polynomial, den: &Polynomial) -> RationalFunction {
        let r = &self.ring;
        let eg = r.extended_gcd(num, den);
        debug_assert!(!eg.s.is_zero(), "zero cofactor for a nonzero denominator");
        let c = eg.s.coeffs().last().map_or(0, |lc| r.field().invert_unchecked(lc));
        RationalFunction {
            num: r.multiply_by_scalar(c, &r.negate(&eg.t)),
            den: r.multiply_by_scalar(c, &eg.s),
        }
    }
}

impl Ring for FunctionField {
    type Element = RationalFunction;

    #[inline]
    fn zero(&self) -> RationalFunction {
        self.polynomial(self.ring.zero())
    }

    #[inline]
    fn one(&self) -> RationalFunction {
        self.polynomial(self.ring.one())
    }

    fn add(&self, a: &RationalFunction, b: &RationalFunction) -> RationalFunction {
        let r = &self.ring;
        if r.is_one(&a.den) && r.is_one(&b.den) {
            return self.polynomial(r.add(&a.num, &b.num));
        }
        let num = r.add(&r.multiply(&a.num, &b.den), &r.multiply(&b.num, &a.den));
        self.lowest_terms(&num, &r.multiply(&a.den, &b.den))
    }

    #[inline]
    fn negate(&self, a: &RationalFunction) -> RationalFunction {
        RationalFunction { num: self.ring.negate(&a.num), den: a.den.clone() }
    }

    /// Common powers of `x` are cancelled crosswise before multiplying so
    /// degrees stay small.
    fn multiply(&self, a: &RationalFunction, b: &RationalFunction) -> RationalFunction {
        let r = &self.ring;
        if a.num.is_zero() || b.num.is_zero() {
            return self.zero();
        }
        let strip = |n: &Polynomial, d: &Polynomial| -> (Polynomial, Polynomial) {
            match r.valuation(n).min(r.valuation(d)) {
                ExtendedInt::Finite(k) if k > 0 => (r.shift(n, -k), r.shift(d, -k)),
                _ => (n.clone(), d.clone()),
            }
        };
        let (an, bd) = strip(&a.num, &b.den);
        let (bn, ad) = strip(&b.num, &a.den);
        self.lowest_terms(&r.multiply(&an, &bn), &r.multiply(&ad, &bd))
    }

    #[inline]
    fn from_int(&self, n: i64) -> RationalFunction {
        self.polynomial(self.ring.from_int(n))
    }

    fn name(&self) -> String {
        format!("FunctionField({})", self.p())
    }

    fn format(&self, a: &RationalFunction) -> String {
        a.to_string()
    }

    fn latex(&self, a: &RationalFunction) -> String {
        let r = &self.ring;
        if r.is_one(&a.den) {
            r.latex(&a.num)
        } else {
            format!("\\frac{{{}}}{{{}}}", r.latex(&a.num), r.latex(&a.den))
        }
    }
}

impl Field for FunctionField {
    /// `den/num` rescaled so the new denominator is monic; zero maps to zero.
    fn invert_unchecked(&self, a: &RationalFunction) -> RationalFunction {
        let r = &self.ring;
        let Ok(lc) = r.leading_coefficient(&a.num) else {
            return self.zero();
        };
        let c = r.field().invert_unchecked(&lc);
        RationalFunction {
            num: r.multiply_by_scalar(c, &a.den),
            den: r.multiply_by_scalar(c, &a.num),
        }
    }

    fn divide_unchecked(&self, a: &RationalFunction, b: &RationalFunction) -> RationalFunction {
        self.multiply(a, &self.invert_unchecked(b))
    }
}

impl DVField for FunctionField {
    type Integral = Polynomial;
    type ValuationRing = PolynomialRing;

    #[inline]
    fn valuation_ring(&self) -> &PolynomialRing {
        &self.ring
    }

    #[inline]
    fn residue_field(&self) -> &FiniteField {
        self.ring.field()
    }

    #[inline]
    fn uniformizer_int(&self) -> Polynomial {
        self.ring.x()
    }

    #[inline]
    fn num(&self, x: &RationalFunction) -> Polynomial {
        x.num.clone()
    }

    #[inline]
    fn den(&self, x: &RationalFunction) -> Polynomial {
        x.den.clone()
    }

    #[inline]
    fn fraction_unchecked(&self, num: Polynomial, den: Polynomial) -> RationalFunction {
        RationalFunction { num, den }
    }

    fn reduce(&self, num: &Polynomial, den: &Polynomial) -> Result<RationalFunction> {
        if den.is_zero() {
            return Err(AlgebraError::ZeroDenominator);
        }
        Ok(self.lowest_terms(num, den))
    }

    #[inline]
    fn residue_int(&self, a: &Polynomial) -> u64 {
        a.coeff(0)
    }

    #[inline]
    fn valuation_int(&self, a: &Polynomial) -> ExtendedInt {
        self.ring.valuation(a)
    }

    fn split_int(&self, a: &Polynomial) -> Result<(Polynomial, i64)> {
        match self.ring.valuation(a) {
            ExtendedInt::Finite(v) => Ok((self.ring.shift(a, -v), v)),
            ExtendedInt::Infinite => Err(AlgebraError::ZeroElement),
        }
    }

    /// Power-series division: the first `k` coefficients of `num/den`.
    fn reduce_unit(&self, num: &Polynomial, den: &Polynomial, k: u32) -> Result<Polynomial> {
        let precision = usize::try_from(k).unwrap_or(usize::MAX);
        self.ring.divmod_low(num, den, precision).map(|(q, _)| q)
    }

    fn uniformizer(&self) -> RationalFunction {
        self.uniformizer.get_or_init(|| self.from_integral(&self.ring.x())).clone()
    }
}
