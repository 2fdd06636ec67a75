//! The [`DVField`] trait and its derived operations.
//!
//! An implementor supplies the valuation ring `R`, the uniformizer `π ∈ R`,
//! fraction accessors and a canonical [`DVField::reduce`]. Everything else
//! (valuation, `π`-powers, unit/valuation split, residues, the Euclidean
//! remainder lifted to fractions, and `π`-adic truncation) is derived here.

use core::fmt::Debug;

use btt_algebra::{
    pow_nonneg, AlgebraError, EuclideanDomain, ExtendedInt, Field, FiniteField, Result, Ring,
};

/// A field with a discrete valuation, presented as `Frac(R)` for a Euclidean
/// domain `R` whose residue field `R/π` is 𝔽_p.
///
/// Elements are always in the canonical form produced by
/// [`DVField::reduce`]; [`DVField::fraction_unchecked`] is the escape hatch
/// for callers that have already established reducedness.
pub trait DVField: Field {
    /// Element type of the valuation ring.
    type Integral: Clone + PartialEq + Debug;
    /// The valuation ring `R`.
    type ValuationRing: EuclideanDomain<Element = Self::Integral>;

    /// The valuation ring.
    fn valuation_ring(&self) -> &Self::ValuationRing;

    /// The residue field `R/π`.
    fn residue_field(&self) -> &FiniteField;

    /// `|R/π|`.
    #[inline]
    fn residue_field_size(&self) -> u64 {
        self.residue_field().p()
    }

    /// The uniformizer as an element of `R`.
    fn uniformizer_int(&self) -> Self::Integral;

    /// Numerator of a canonical fraction.
    fn num(&self, x: &Self::Element) -> Self::Integral;

    /// Denominator of a canonical fraction.
    fn den(&self, x: &Self::Element) -> Self::Integral;

    /// Wrap `num / den` without reduction.
    fn fraction_unchecked(&self, num: Self::Integral, den: Self::Integral) -> Self::Element;

    /// Canonical `num / den`; defined for any nonzero `den`, coprime or not.
    ///
    /// # Errors
    /// [`AlgebraError::ZeroDenominator`] when `den` is zero.
    fn reduce(&self, num: &Self::Integral, den: &Self::Integral) -> Result<Self::Element>;

    /// Image of an integral element in the residue field.
    fn residue_int(&self, a: &Self::Integral) -> u64;

    /// `a = u·π^v` with `u` a unit of `R`.
    ///
    /// # Errors
    /// [`AlgebraError::ZeroElement`] for `a = 0`.
    fn split_int(&self, a: &Self::Integral) -> Result<(Self::Integral, i64)> {
        let r = self.valuation_ring();
        if r.is_zero(a) {
            return Err(AlgebraError::ZeroElement);
        }
        let pi = self.uniformizer_int();
        let mut u = a.clone();
        let mut v = 0i64;
        loop {
            let (q, rem) = r.divmod(&u, &pi)?;
            if !r.is_zero(&rem) {
                return Ok((u, v));
            }
            u = q;
            v += 1;
        }
    }

    /// Valuation of an integral element (`Infinite` for zero).
    fn valuation_int(&self, a: &Self::Integral) -> ExtendedInt {
        self.split_int(a).map_or(ExtendedInt::Infinite, |(_, v)| ExtendedInt::Finite(v))
    }

    /// `num · den^{-1} mod π^k` as an element of `R` in canonical form, for a
    /// unit `den`.
    ///
    /// # Errors
    /// `den` is not invertible modulo `π^k`.
    fn reduce_unit(&self, num: &Self::Integral, den: &Self::Integral, k: u32) -> Result<Self::Integral> {
        let r = self.valuation_ring();
        let m = self.integral_from_val(k);
        let inv = r.inverse_mod(den, &m)?;
        r.modulo(&r.multiply(num, &inv), &m)
    }

    /* --------------------------- derived operations --------------------------- */

    /// `π` as a field element.
    #[inline]
    fn uniformizer(&self) -> Self::Element {
        self.fraction_unchecked(self.uniformizer_int(), self.valuation_ring().one())
    }

    /// `π^n ∈ R`.
    #[inline]
    fn integral_from_val(&self, n: u32) -> Self::Integral {
        let r = self.valuation_ring();
        pow_nonneg(&r.multiplicative_monoid(), &self.uniformizer_int(), u64::from(n))
    }

    /// Embed `R` into the field.
    #[inline]
    fn from_integral(&self, a: &Self::Integral) -> Self::Element {
        self.fraction_unchecked(a.clone(), self.valuation_ring().one())
    }

    /// `π^n` as a field element; `Infinite` maps to zero.
    fn from_val(&self, n: ExtendedInt) -> Self::Element {
        match n {
            ExtendedInt::Infinite => self.zero(),
            ExtendedInt::Finite(k) => {
                let pk = self.integral_from_val(u32::try_from(k.unsigned_abs()).unwrap_or(u32::MAX));
                if k >= 0 {
                    self.from_integral(&pk)
                } else {
                    self.fraction_unchecked(self.valuation_ring().one(), pk)
                }
            }
        }
    }

    /// `v(x)`; `Infinite` iff `x = 0`.
    fn valuation(&self, x: &Self::Element) -> ExtendedInt {
        if self.is_zero(x) {
            return ExtendedInt::Infinite;
        }
        match (self.valuation_int(&self.num(x)), self.valuation_int(&self.den(x))) {
            (ExtendedInt::Finite(a), ExtendedInt::Finite(b)) => ExtendedInt::Finite(a - b),
            _ => ExtendedInt::Infinite,
        }
    }

    /// `v(x) ≥ 0`.
    #[inline]
    fn in_valuation_ring(&self, x: &Self::Element) -> bool {
        self.valuation(x) >= ExtendedInt::ZERO
    }

    /// `v(x) = 0`.
    #[inline]
    fn is_integer_unit(&self, x: &Self::Element) -> bool {
        self.valuation(x) == ExtendedInt::ZERO
    }

    /// `x = u·π^v` with `v(u) = 0`.
    ///
    /// # Errors
    /// [`AlgebraError::ZeroElement`] for `x = 0`.
    fn split_nonzero(&self, x: &Self::Element) -> Result<(Self::Element, i64)> {
        if self.is_zero(x) {
            return Err(AlgebraError::ZeroElement);
        }
        let (un, vn) = self.split_int(&self.num(x))?;
        let (ud, vd) = self.split_int(&self.den(x))?;
        Ok((self.fraction_unchecked(un, ud), vn - vd))
    }

    /// Residue class of an element of the valuation ring.
    ///
    /// # Errors
    /// [`AlgebraError::NotIntegral`] when `v(x) < 0`.
    fn residue(&self, x: &Self::Element) -> Result<u64> {
        if let ExtendedInt::Finite(v) = self.valuation(x) {
            if v < 0 {
                return Err(AlgebraError::NotIntegral(v));
            }
        }
        let f = self.residue_field();
        f.divide(&self.residue_int(&self.num(x)), &self.residue_int(&self.den(x)))
    }

    /// Euclidean remainder of `a` by `b`, lifted to fractions by
    /// cross-multiplying denominators. Returns `a` itself when its integral
    /// form is already smaller than `b`'s. Not a local-field residue.
    ///
    /// # Errors
    /// [`AlgebraError::DivisionByZero`] when `b` is zero.
    fn remainder(&self, a: &Self::Element, b: &Self::Element) -> Result<Self::Element> {
        if self.is_zero(b) {
            return Err(AlgebraError::DivisionByZero);
        }
        let r = self.valuation_ring();
        let (da, db) = (self.den(a), self.den(b));
        if r.is_one(&da) && r.is_one(&db) {
            return Ok(self.from_integral(&r.modulo(&self.num(a), &self.num(b))?));
        }
        let int_a = r.multiply(&self.num(a), &db);
        let int_b = r.multiply(&self.num(b), &da);
        if r.ed_norm(&int_a) < r.ed_norm(&int_b) {
            return Ok(a.clone());
        }
        self.reduce(&r.modulo(&int_a, &int_b)?, &r.multiply(&da, &db))
    }

    /// The canonical representative of `a mod π^n`: zero when `v(a) ≥ n`,
    /// otherwise `ũ·π^v` where `a = u·π^v` and `ũ ∈ R` is the canonical
    /// residue of `u` modulo `π^(n−v)`. Idempotent.
    ///
    /// # Errors
    /// Propagates failures of [`DVField::reduce_unit`].
    fn mod_pow(&self, a: &Self::Element, n: i64) -> Result<Self::Element> {
        if self.is_zero(a) {
            return Ok(self.zero());
        }
        let (u, v) = self.split_nonzero(a)?;
        if v >= n {
            return Ok(self.zero());
        }
        let k = u32::try_from(n - v).map_err(|_| AlgebraError::ExtendedArithmetic("precision overflow"))?;
        let digits = self.reduce_unit(&self.num(&u), &self.den(&u), k)?;
        Ok(self.multiply(&self.from_integral(&digits), &self.from_val(ExtendedInt::Finite(v))))
    }
}
