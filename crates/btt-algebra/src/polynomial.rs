//! Univariate polynomials over 𝔽_p.
//!
//! Coefficients are stored low-to-high, reduced into `0..p`, with trailing
//! zeros stripped, so the zero polynomial is the empty list and equality is
//! structural.
//!
//! Two divisions are provided:
//! - [`EuclideanDomain::divmod`]: school-book division on the *leading*
//!   term, so the remainder has smaller degree; gcds and modular inverses
//!   run on it. The [`EuclideanDomain::ed_norm`] is still the valuation,
//!   which is what fraction remainders compare.
//! - [`PolynomialRing::divmod_low`]: division on the *lowest* term up to a
//!   precision, i.e. power-series division at `x = 0`. Cancelling low terms
//!   alone never terminates in general (`1 / (1 + x)`), hence the bound.

use core::fmt;

use crate::error::{AlgebraError, Result};
use crate::finite_field::FiniteField;
use crate::order::ExtendedInt;
use crate::structure::{EuclideanDomain, Field, Ring};

/// A polynomial with canonical coefficients.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Polynomial(Vec<u64>);

impl Polynomial {
    /// Coefficients, lowest degree first.
    #[inline]
    #[must_use]
    pub fn coeffs(&self) -> &[u64] {
        &self.0
    }

    /// `true` for the zero polynomial.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_empty()
    }

    /// Coefficient of `x^i` (zero past the end).
    #[inline]
    #[must_use]
    pub fn coeff(&self, i: usize) -> u64 {
        self.0.get(i).copied().unwrap_or(0)
    }

    /// Highest index with a nonzero coefficient.
    #[inline]
    #[must_use]
    pub fn degree(&self) -> Option<usize> {
        self.0.len().checked_sub(1)
    }

    /// Number of nonzero terms.
    #[inline]
    #[must_use]
    pub fn term_count(&self) -> usize {
        self.0.iter().filter(|&&c| c != 0).count()
    }
}

impl fmt::Display for Polynomial {
    /// `1 + 2x + x^3`; zero renders as `0`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }
        let mut first = true;
        for (i, &c) in self.0.iter().enumerate().filter(|&(_, &c)| c != 0) {
            if !first {
                f.write_str(" + ")?;
            }
            first = false;
            match (i, c) {
                (0, c) => write!(f, "{c}")?,
                (1, 1) => f.write_str("x")?,
                (1, c) => write!(f, "{c}x")?,
                (i, 1) => write!(f, "x^{i}")?,
                (i, c) => write!(f, "{c}x^{i}")?,
            }
        }
        Ok(())
    }
}

/// 𝔽_p\[x\].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PolynomialRing {
    field: FiniteField,
}

impl PolynomialRing {
    /// Polynomials over `field`.
    #[inline]
    #[must_use]
    pub const fn new(field: FiniteField) -> Self {
        Self { field }
    }

    /// Coefficient field.
    #[inline]
    #[must_use]
    pub const fn field(&self) -> &FiniteField {
        &self.field
    }

    /// Canonicalize raw coefficients: reduce mod p, strip trailing zeros.
    #[must_use]
    pub fn from_coeffs(&self, mut coeffs: Vec<u64>) -> Polynomial {
        let p = self.field.p();
        for c in &mut coeffs {
            *c %= p;
        }
        Polynomial(truncate_zeros(coeffs))
    }

    /// Polynomial from signed integer coefficients (lowest first).
    #[must_use]
    pub fn from_ints(&self, coeffs: &[i64]) -> Polynomial {
        Polynomial(truncate_zeros(coeffs.iter().map(|&c| self.field.reduce(c)).collect()))
    }

    /// Constant polynomial.
    #[inline]
    #[must_use]
    pub fn constant(&self, c: u64) -> Polynomial {
        self.from_coeffs(vec![c])
    }

    /// `c · x^k`.
    #[must_use]
    pub fn monomial(&self, c: u64, k: usize) -> Polynomial {
        let mut coeffs = vec![0; k + 1];
        coeffs[k] = c;
        self.from_coeffs(coeffs)
    }

    /// `x`.
    #[inline]
    #[must_use]
    pub fn x(&self) -> Polynomial {
        self.monomial(1, 1)
    }

    /// Degree, `None` for zero.
    #[inline]
    #[must_use]
    pub fn degree(&self, a: &Polynomial) -> Option<usize> {
        a.degree()
    }

    /// Index of the lowest nonzero coefficient; `Infinite` for zero.
    #[must_use]
    pub fn valuation(&self, a: &Polynomial) -> ExtendedInt {
        a.0.iter()
            .position(|&c| c != 0)
            .map_or(ExtendedInt::Infinite, |i| ExtendedInt::Finite(i as i64))
    }

    /// Highest-degree coefficient.
    ///
    /// # Errors
    /// [`AlgebraError::ZeroElement`] for the zero polynomial.
    #[inline]
    pub fn leading_coefficient(&self, a: &Polynomial) -> Result<u64> {
        a.0.last().copied().ok_or(AlgebraError::ZeroElement)
    }

    /// `c · a`.
    #[must_use]
    pub fn multiply_by_scalar(&self, c: u64, a: &Polynomial) -> Polynomial {
        let f = &self.field;
        Polynomial(truncate_zeros(a.0.iter().map(|x| f.multiply(&c, x)).collect()))
    }

    /// `a / c`.
    ///
    /// # Errors
    /// `c ≡ 0 (mod p)`.
    pub fn divide_by_scalar(&self, a: &Polynomial, c: u64) -> Result<Polynomial> {
        let inv = self.field.invert(&(c % self.field.p()))?;
        Ok(self.multiply_by_scalar(inv, a))
    }

    /// Scale to leading coefficient one; zero stays zero.
    #[must_use]
    pub fn monic(&self, a: &Polynomial) -> Polynomial {
        match a.0.last() {
            Some(&lc) => self.multiply_by_scalar(self.field.invert_unchecked(&lc), a),
            None => Polynomial::default(),
        }
    }

    /// `a · x^n`; for negative `n` the lowest `|n|` coefficients are dropped.
    #[must_use]
    pub fn shift(&self, a: &Polynomial, n: i64) -> Polynomial {
        if a.is_zero() {
            return Polynomial::default();
        }
        let k = usize::try_from(n.unsigned_abs()).unwrap_or(usize::MAX);
        if n >= 0 {
            let mut coeffs = vec![0; k];
            coeffs.extend_from_slice(&a.0);
            Polynomial(coeffs)
        } else {
            Polynomial(truncate_zeros(a.0.iter().skip(k).copied().collect()))
        }
    }

    /// Drop every term of degree `≥ k` (i.e. reduce mod `x^k`).
    #[must_use]
    pub fn truncate(&self, a: &Polynomial, k: usize) -> Polynomial {
        Polynomial(truncate_zeros(a.0.iter().take(k).copied().collect()))
    }

    /// Value at `t` (Horner).
    #[must_use]
    pub fn evaluate(&self, a: &Polynomial, t: u64) -> u64 {
        let f = &self.field;
        let t = t % f.p();
        a.0.iter().rev().fold(0, |acc, c| f.add(&f.multiply(&acc, &t), c))
    }

    /// Low-order division: `(q, r)` with `a = q·b + r`, built by cancelling
    /// the lowest surviving term of the remainder against the lowest term of
    /// `b`, until the remainder vanishes to order `precision` (or its lowest
    /// term sits below `b`'s valuation and cannot be cancelled).
    ///
    /// With `b(0) ≠ 0`, `q` is `a/b mod x^precision` as a power series.
    ///
    /// # Errors
    /// `b` is zero.
    pub fn divmod_low(
        &self,
        a: &Polynomial,
        b: &Polynomial,
        precision: usize,
    ) -> Result<(Polynomial, Polynomial)> {
        let vb = b.0.iter().position(|&c| c != 0).ok_or(AlgebraError::DivisionByZero)?;
        let f = &self.field;
        let lead_inv = f.invert_unchecked(&b.0[vb]);

        let mut q = vec![0u64; precision.saturating_sub(vb).max(1)];
        let mut r = a.0.clone();
        loop {
            let Some(vr) = r.iter().position(|&c| c != 0) else { break };
            if vr >= precision || vr < vb {
                break;
            }
            let j = vr - vb;
            let c = f.multiply(&r[vr], &lead_inv);
            q[j] = f.add(&q[j], &c);
            if r.len() < b.0.len() + j {
                r.resize(b.0.len() + j, 0);
            }
            for (i, bi) in b.0.iter().enumerate() {
                r[i + j] = f.subtract(&r[i + j], &f.multiply(&c, bi));
            }
        }
        Ok((Polynomial(truncate_zeros(q)), Polynomial(truncate_zeros(r))))
    }
}

/// Strip trailing zeros in place and return the vector.
#[must_use]
pub fn truncate_zeros(mut coeffs: Vec<u64>) -> Vec<u64> {
    while coeffs.last() == Some(&0) {
        coeffs.pop();
    }
    coeffs
}

impl Ring for PolynomialRing {
    type Element = Polynomial;

    #[inline]
    fn zero(&self) -> Polynomial {
        Polynomial::default()
    }

    #[inline]
    fn one(&self) -> Polynomial {
        self.constant(1)
    }

    fn add(&self, a: &Polynomial, b: &Polynomial) -> Polynomial {
        let f = &self.field;
        let n = a.0.len().max(b.0.len());
        Polynomial(truncate_zeros((0..n).map(|i| f.add(&a.coeff(i), &b.coeff(i))).collect()))
    }

    fn negate(&self, a: &Polynomial) -> Polynomial {
        Polynomial(a.0.iter().map(|c| self.field.negate(c)).collect())
    }

    fn subtract(&self, a: &Polynomial, b: &Polynomial) -> Polynomial {
        let f = &self.field;
        let n = a.0.len().max(b.0.len());
        Polynomial(truncate_zeros((0..n).map(|i| f.subtract(&a.coeff(i), &b.coeff(i))).collect()))
    }

    fn multiply(&self, a: &Polynomial, b: &Polynomial) -> Polynomial {
        if a.is_zero() || b.is_zero() {
            return Polynomial::default();
        }
        let f = &self.field;
        let mut out = vec![0u64; a.0.len() + b.0.len() - 1];
        for (i, x) in a.0.iter().enumerate().filter(|&(_, &x)| x != 0) {
            for (j, y) in b.0.iter().enumerate() {
                out[i + j] = f.add(&out[i + j], &f.multiply(x, y));
            }
        }
        Polynomial(truncate_zeros(out))
    }

    #[inline]
    fn from_int(&self, n: i64) -> Polynomial {
        Polynomial(truncate_zeros(vec![self.field.reduce(n)]))
    }

    fn name(&self) -> String {
        format!("PolynomialRing({})", self.field.name())
    }

    fn format(&self, a: &Polynomial) -> String {
        a.to_string()
    }

    /// Like [`fmt::Display`] but with braced exponents (`x^{3}`).
    fn latex(&self, a: &Polynomial) -> String {
        if a.is_zero() {
            return "0".into();
        }
        a.0.iter()
            .enumerate()
            .filter(|&(_, &c)| c != 0)
            .map(|(i, &c)| match (i, c) {
                (0, c) => c.to_string(),
                (1, 1) => "x".into(),
                (1, c) => format!("{c}x"),
                (i, 1) => format!("x^{{{i}}}"),
                (i, c) => format!("{c}x^{{{i}}}"),
            })
            .collect::<Vec<_>>()
            .join(" + ")
    }
}

impl EuclideanDomain for PolynomialRing {
    type Norm = ExtendedInt;

    /// The valuation; `Infinite` for the zero polynomial.
    #[inline]
    fn ed_norm(&self, a: &Polynomial) -> ExtendedInt {
        self.valuation(a)
    }

    fn divmod(&self, a: &Polynomial, b: &Polynomial) -> Result<(Polynomial, Polynomial)> {
        let lb = *b.0.last().ok_or(AlgebraError::DivisionByZero)?;
        let db = b.0.len() - 1;
        if a.0.len() < b.0.len() {
            return Ok((Polynomial::default(), a.clone()));
        }

        let f = &self.field;
        let lead_inv = f.invert_unchecked(&lb);
        let mut q = vec![0u64; a.0.len() - db];
        let mut r = a.0.clone();
        while r.len() > db {
            let Some(&lr) = r.last() else { break };
            let k = r.len() - 1 - db;
            let c = f.multiply(&lr, &lead_inv);
            q[k] = c;
            for (i, bi) in b.0.iter().enumerate() {
                r[i + k] = f.subtract(&r[i + k], &f.multiply(&c, bi));
            }
            r = truncate_zeros(r);
        }
        Ok((Polynomial(truncate_zeros(q)), Polynomial(r)))
    }

    /// Nonzero constants are the units.
    fn unit_inverse(&self, a: &Polynomial) -> Option<Polynomial> {
        match a.0.as_slice() {
            [c] => Some(self.constant(self.field.invert_unchecked(c))),
            _ => None,
        }
    }
}
