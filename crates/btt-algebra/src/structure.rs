//! Structure traits: monoid → group, ring → Euclidean domain → field.
//!
//! Each trait is implemented on a *structure* value (`Integers`,
//! `FiniteField`, ...) whose associated `Element` type is plain data. Derived
//! operations are default methods; the additive group and multiplicative
//! monoid of a ring are exposed as borrowing wrappers so the generic
//! square-and-multiply in [`pow_nonneg`] serves both `pow` and `from_int`.

use core::fmt::Debug;

use num_bigint::{BigInt, Sign};

use crate::error::{AlgebraError, Result};
use crate::rational::Rational;

/* ------------------------------- Monoid / Group ------------------------------ */

/// An associative binary operation with identity.
pub trait Monoid {
    /// Element type.
    type Element: Clone + PartialEq + Debug;

    /// Neutral element.
    fn identity(&self) -> Self::Element;

    /// The monoid operation.
    fn multiply(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;

    /// Equality of elements (value equality unless overridden).
    #[inline]
    fn equals(&self, a: &Self::Element, b: &Self::Element) -> bool {
        a == b
    }

    /// `a == identity`.
    #[inline]
    fn is_identity(&self, a: &Self::Element) -> bool {
        self.equals(a, &self.identity())
    }

    /// `g^n` for `n ≥ 0`.
    ///
    /// # Errors
    /// [`AlgebraError::NegativeExponent`] for `n < 0`.
    fn pow(&self, g: &Self::Element, n: i64) -> Result<Self::Element> {
        if n < 0 {
            return Err(AlgebraError::NegativeExponent(n));
        }
        Ok(pow_nonneg(self, g, n.unsigned_abs()))
    }
}

/// Exponentiation by squaring over any monoid.
#[must_use]
pub fn pow_nonneg<M: Monoid + ?Sized>(m: &M, g: &M::Element, mut e: u64) -> M::Element {
    let mut base = g.clone();
    let mut acc = m.identity();
    while e > 0 {
        if e & 1 == 1 {
            acc = m.multiply(&acc, &base);
        }
        e >>= 1;
        if e > 0 {
            base = m.multiply(&base, &base);
        }
    }
    acc
}

/// A monoid in which every element is invertible.
pub trait Group: Monoid {
    /// Inverse element.
    fn invert(&self, g: &Self::Element) -> Self::Element;
}

/// `g^n` for any sign of `n`: negative exponents invert first.
#[must_use]
pub fn group_pow<G: Group + ?Sized>(grp: &G, g: &G::Element, n: i64) -> G::Element {
    if n < 0 {
        pow_nonneg(grp, &grp.invert(g), n.unsigned_abs())
    } else {
        pow_nonneg(grp, g, n.unsigned_abs())
    }
}

/* ----------------------------------- Ring ----------------------------------- */

/// A commutative ring with identity.
pub trait Ring {
    /// Element type.
    type Element: Clone + PartialEq + Debug;

    /// Additive identity.
    fn zero(&self) -> Self::Element;
    /// Multiplicative identity.
    fn one(&self) -> Self::Element;
    /// `a + b`.
    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    /// `-a`.
    fn negate(&self, a: &Self::Element) -> Self::Element;
    /// `a · b`.
    fn multiply(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;

    /// Short human-readable name of the structure (e.g. `Z`).
    fn name(&self) -> String;

    /// Plain-text rendering of an element.
    fn format(&self, a: &Self::Element) -> String;

    /// LaTeX rendering of an element; plain text unless overridden.
    fn latex(&self, a: &Self::Element) -> String {
        self.format(a)
    }

    /// Equality of elements (value equality unless overridden).
    #[inline]
    fn equals(&self, a: &Self::Element, b: &Self::Element) -> bool {
        a == b
    }

    /// `a - b`.
    #[inline]
    fn subtract(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        self.add(a, &self.negate(b))
    }

    /// `a == 0`.
    #[inline]
    fn is_zero(&self, a: &Self::Element) -> bool {
        self.equals(a, &self.zero())
    }

    /// `a == 1`.
    #[inline]
    fn is_one(&self, a: &Self::Element) -> bool {
        self.equals(a, &self.one())
    }

    /// The additive group `(R, +)`.
    #[inline]
    fn additive_group(&self) -> AdditiveGroup<'_, Self>
    where
        Self: Sized,
    {
        AdditiveGroup(self)
    }

    /// The multiplicative monoid `(R, ·)`.
    #[inline]
    fn multiplicative_monoid(&self) -> MultiplicativeMonoid<'_, Self>
    where
        Self: Sized,
    {
        MultiplicativeMonoid(self)
    }

    /// Image of `n` under the unique ring map `ℤ → R` (`n` additions of one).
    fn from_int(&self, n: i64) -> Self::Element
    where
        Self: Sized,
    {
        group_pow(&self.additive_group(), &self.one(), n)
    }

    /// Image of an arbitrary-precision integer, by Horner's rule in base 2^32.
    fn from_big_int(&self, n: &BigInt) -> Self::Element
    where
        Self: Sized,
    {
        let radix = self.from_int(1 << 32);
        let (sign, digits) = n.to_u32_digits();
        let v = digits.iter().rev().fold(self.zero(), |acc, &d| {
            self.add(&self.multiply(&acc, &radix), &self.from_int(i64::from(d)))
        });
        if sign == Sign::Minus {
            self.negate(&v)
        } else {
            v
        }
    }

    /// `a^n` for `n ≥ 0`.
    ///
    /// # Errors
    /// [`AlgebraError::ZeroToTheZero`] for `0^0`;
    /// [`AlgebraError::NegativeExponent`] for `n < 0`.
    fn pow(&self, a: &Self::Element, n: i64) -> Result<Self::Element>
    where
        Self: Sized,
    {
        if self.is_zero(a) {
            return match n {
                0 => Err(AlgebraError::ZeroToTheZero),
                n if n < 0 => Err(AlgebraError::NegativeExponent(n)),
                _ => Ok(self.zero()),
            };
        }
        self.multiplicative_monoid().pow(a, n)
    }

    /// `Σ a_i · b_i` over the common prefix of both slices.
    fn dot(&self, a: &[Self::Element], b: &[Self::Element]) -> Self::Element {
        a.iter()
            .zip(b)
            .fold(self.zero(), |acc, (x, y)| self.add(&acc, &self.multiply(x, y)))
    }

    /// Sum of a sequence (zero when empty).
    fn sum<'e, I>(&self, items: I) -> Self::Element
    where
        I: IntoIterator<Item = &'e Self::Element>,
        Self::Element: 'e,
    {
        items.into_iter().fold(self.zero(), |acc, x| self.add(&acc, x))
    }

    /// Product of a sequence (one when empty).
    fn product<'e, I>(&self, items: I) -> Self::Element
    where
        I: IntoIterator<Item = &'e Self::Element>,
        Self::Element: 'e,
    {
        items.into_iter().fold(self.one(), |acc, x| self.multiply(&acc, x))
    }
}

/// `(R, +)` viewed as a group.
#[derive(Debug)]
pub struct AdditiveGroup<'a, R: Ring>(pub &'a R);

impl<R: Ring> Monoid for AdditiveGroup<'_, R> {
    type Element = R::Element;

    #[inline]
    fn identity(&self) -> R::Element {
        self.0.zero()
    }

    #[inline]
    fn multiply(&self, a: &R::Element, b: &R::Element) -> R::Element {
        self.0.add(a, b)
    }

    #[inline]
    fn equals(&self, a: &R::Element, b: &R::Element) -> bool {
        self.0.equals(a, b)
    }

    fn pow(&self, g: &R::Element, n: i64) -> Result<R::Element> {
        Ok(group_pow(self, g, n))
    }
}

impl<R: Ring> Group for AdditiveGroup<'_, R> {
    #[inline]
    fn invert(&self, g: &R::Element) -> R::Element {
        self.0.negate(g)
    }
}

/// `(R, ·)` viewed as a monoid.
#[derive(Debug)]
pub struct MultiplicativeMonoid<'a, R: Ring>(pub &'a R);

impl<R: Ring> Monoid for MultiplicativeMonoid<'_, R> {
    type Element = R::Element;

    #[inline]
    fn identity(&self) -> R::Element {
        self.0.one()
    }

    #[inline]
    fn multiply(&self, a: &R::Element, b: &R::Element) -> R::Element {
        self.0.multiply(a, b)
    }

    #[inline]
    fn equals(&self, a: &R::Element, b: &R::Element) -> bool {
        self.0.equals(a, b)
    }
}

/* ----------------------------- Euclidean domain ----------------------------- */

/// Output of the extended Euclidean algorithm.
///
/// `gcd = a·x + b·y` and `a·s + b·t = 0` with `s`, `t` coprime, so `-t/s`
/// is `a/b` in lowest terms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtendedGcd<E> {
    /// A greatest common divisor of `a` and `b`.
    pub gcd: E,
    /// Bézout coefficient of `a`.
    pub x: E,
    /// Bézout coefficient of `b`.
    pub y: E,
    /// Annihilating cofactor of `a`.
    pub s: E,
    /// Annihilating cofactor of `b`.
    pub t: E,
}

/// An integral domain with division with remainder.
pub trait EuclideanDomain: Ring {
    /// Totally ordered size measure returned by [`EuclideanDomain::ed_norm`].
    type Norm: Ord;

    /// Size of an element; fraction remainders compare integral forms by it.
    fn ed_norm(&self, a: &Self::Element) -> Self::Norm;

    /// `(q, r)` with `a = q·b + r` and `r` strictly smaller than `b`.
    ///
    /// # Errors
    /// [`AlgebraError::DivisionByZero`] when `b` is zero.
    fn divmod(&self, a: &Self::Element, b: &Self::Element) -> Result<(Self::Element, Self::Element)>;

    /// Multiplicative inverse of `a` if it is a unit.
    fn unit_inverse(&self, a: &Self::Element) -> Option<Self::Element>;

    /// Quotient of [`EuclideanDomain::divmod`].
    ///
    /// # Errors
    /// `b` is zero.
    #[inline]
    fn div(&self, a: &Self::Element, b: &Self::Element) -> Result<Self::Element> {
        self.divmod(a, b).map(|(q, _)| q)
    }

    /// Remainder of [`EuclideanDomain::divmod`].
    ///
    /// # Errors
    /// `b` is zero.
    #[inline]
    fn modulo(&self, a: &Self::Element, b: &Self::Element) -> Result<Self::Element> {
        self.divmod(a, b).map(|(_, r)| r)
    }

    /// A greatest common divisor; `gcd(a, 0) = a`.
    fn gcd(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        let (mut a, mut b) = (a.clone(), b.clone());
        while !self.is_zero(&b) {
            match self.modulo(&a, &b) {
                Ok(r) => {
                    a = b;
                    b = r;
                }
                Err(_) => break,
            }
        }
        a
    }

    /// Iterative extended Euclid; see [`ExtendedGcd`].
    fn extended_gcd(&self, a: &Self::Element, b: &Self::Element) -> ExtendedGcd<Self::Element> {
        let (mut old_r, mut r) = (a.clone(), b.clone());
        let (mut old_x, mut x) = (self.one(), self.zero());
        let (mut old_y, mut y) = (self.zero(), self.one());

        while !self.is_zero(&r) {
            let Ok((q, rem)) = self.divmod(&old_r, &r) else { break };
            old_r = core::mem::replace(&mut r, rem);
            let next_x = self.subtract(&old_x, &self.multiply(&q, &x));
            old_x = core::mem::replace(&mut x, next_x);
            let next_y = self.subtract(&old_y, &self.multiply(&q, &y));
            old_y = core::mem::replace(&mut y, next_y);
        }

        ExtendedGcd { gcd: old_r, x: old_x, y: old_y, s: x, t: y }
    }

    /// `a^{-1} mod m`, reduced by [`EuclideanDomain::modulo`].
    ///
    /// # Errors
    /// [`AlgebraError::NotInvertible`] if `gcd(a, m)` is not a unit;
    /// [`AlgebraError::DivisionByZero`] if `m` is zero.
    fn inverse_mod(&self, a: &Self::Element, m: &Self::Element) -> Result<Self::Element> {
        if self.is_zero(m) {
            return Err(AlgebraError::DivisionByZero);
        }
        let eg = self.extended_gcd(a, m);
        let g_inv = self.unit_inverse(&eg.gcd).ok_or(AlgebraError::NotInvertible)?;
        self.modulo(&self.multiply(&eg.x, &g_inv), m)
    }
}

/* ----------------------------------- Field ---------------------------------- */

/// A ring in which every nonzero element is invertible.
pub trait Field: Ring {
    /// Inverse of a nonzero element. The result for zero is unspecified.
    fn invert_unchecked(&self, a: &Self::Element) -> Self::Element;

    /// `a / b` for nonzero `b`. The result for `b = 0` is unspecified.
    #[inline]
    fn divide_unchecked(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        self.multiply(a, &self.invert_unchecked(b))
    }

    /// Checked inverse.
    ///
    /// # Errors
    /// [`AlgebraError::DivisionByZero`] when `a` is zero.
    #[inline]
    fn invert(&self, a: &Self::Element) -> Result<Self::Element> {
        if self.is_zero(a) {
            return Err(AlgebraError::DivisionByZero);
        }
        Ok(self.invert_unchecked(a))
    }

    /// Checked division.
    ///
    /// # Errors
    /// [`AlgebraError::DivisionByZero`] when `b` is zero.
    #[inline]
    fn divide(&self, a: &Self::Element, b: &Self::Element) -> Result<Self::Element> {
        if self.is_zero(b) {
            return Err(AlgebraError::DivisionByZero);
        }
        Ok(self.divide_unchecked(a, b))
    }

    /// Image of a rational number under `ℚ → F`.
    ///
    /// # Errors
    /// The denominator vanishes in `F` (positive characteristic).
    fn from_rational(&self, r: &Rational) -> Result<Self::Element>
    where
        Self: Sized,
    {
        self.divide(&self.from_big_int(r.numer()), &self.from_big_int(r.denom()))
    }

    /// The multiplicative group of nonzero elements.
    #[inline]
    fn multiplicative_group(&self) -> FieldMultiplicativeGroup<'_, Self>
    where
        Self: Sized,
    {
        FieldMultiplicativeGroup(self)
    }

    /// `a^n` for any integer `n`.
    ///
    /// # Errors
    /// `0^0`, or a negative power of zero.
    fn pow_signed(&self, a: &Self::Element, n: i64) -> Result<Self::Element>
    where
        Self: Sized,
    {
        if n < 0 {
            let inv = self.invert(a)?;
            return self.pow(&inv, n.checked_neg().unwrap_or(i64::MAX));
        }
        self.pow(a, n)
    }
}

/// `F^×` viewed as a group. Callers keep zero out of it.
#[derive(Debug)]
pub struct FieldMultiplicativeGroup<'a, F: Field>(pub &'a F);

impl<F: Field> Monoid for FieldMultiplicativeGroup<'_, F> {
    type Element = F::Element;

    #[inline]
    fn identity(&self) -> F::Element {
        self.0.one()
    }

    #[inline]
    fn multiply(&self, a: &F::Element, b: &F::Element) -> F::Element {
        self.0.multiply(a, b)
    }

    #[inline]
    fn equals(&self, a: &F::Element, b: &F::Element) -> bool {
        self.0.equals(a, b)
    }

    fn pow(&self, g: &F::Element, n: i64) -> Result<F::Element> {
        if self.0.is_zero(g) {
            return Err(AlgebraError::DivisionByZero);
        }
        Ok(group_pow(self, g, n))
    }
}

impl<F: Field> Group for FieldMultiplicativeGroup<'_, F> {
    #[inline]
    fn invert(&self, g: &F::Element) -> F::Element {
        self.0.invert_unchecked(g)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FiniteField, Integers, RationalField};

    /// Strings under concatenation: a non-commutative monoid with cheap equality.
    struct Words;

    impl Monoid for Words {
        type Element = String;

        fn identity(&self) -> String {
            String::new()
        }

        fn multiply(&self, a: &String, b: &String) -> String {
            format!("{a}{b}")
        }
    }

    #[test]
    fn pow_nonneg_repeats_the_operation() {
        let w = "ab".to_string();
        assert_eq!(Words.pow(&w, 0), Ok(String::new()));
        assert_eq!(Words.pow(&w, 1), Ok("ab".into()));
        assert_eq!(Words.pow(&w, 5), Ok("ababababab".into()));
        for n in 0..40u64 {
            assert_eq!(pow_nonneg(&Words, &"x".to_string(), n).len() as u64, n);
        }
    }

    #[test]
    fn monoid_pow_rejects_negative() {
        assert_eq!(Words.pow(&"a".into(), -1), Err(AlgebraError::NegativeExponent(-1)));
    }

    fn z(n: i64) -> BigInt {
        BigInt::from(n)
    }

    #[test]
    fn additive_group_pow_is_scalar_multiple() {
        let zz = Integers;
        let g = zz.additive_group();
        assert_eq!(g.pow(&z(7), 3), Ok(z(21)));
        assert_eq!(g.pow(&z(7), -3), Ok(z(-21)));
        assert_eq!(g.pow(&z(7), 0), Ok(z(0)));
        assert!(g.is_identity(&z(0)));
    }

    #[test]
    fn ring_from_int_and_pow() {
        let zz = Integers;
        assert_eq!(zz.from_int(-12), z(-12));
        assert_eq!(zz.pow(&z(3), 4), Ok(z(81)));
        assert_eq!(zz.pow(&z(0), 3), Ok(z(0)));
        assert_eq!(zz.pow(&z(0), 0), Err(AlgebraError::ZeroToTheZero));
        assert_eq!(zz.pow(&z(2), -1), Err(AlgebraError::NegativeExponent(-1)));
        assert_eq!(zz.dot(&[z(1), z(2), z(3)], &[z(4), z(5), z(6)]), z(32));
        assert_eq!(zz.sum(&[z(1), z(2), z(3)]), z(6));
        assert_eq!(zz.product(&[z(2), z(3), z(4)]), z(24));
    }

    #[test]
    fn from_big_int_uses_every_digit() {
        let big = Integers.pow(&z(10), 30).unwrap() + z(4);
        assert_eq!(Integers.from_big_int(&big), big);
        // 10^30 + 4 ≡ 1 + 4 (mod 7), since 10^6 ≡ 1
        let f = FiniteField::new(7).unwrap();
        assert_eq!(f.from_big_int(&big), 5);
        assert_eq!(f.from_big_int(&-big), 2);
        // generic Horner path
        let r = crate::PolynomialRing::new(f);
        assert_eq!(r.from_big_int(&z(-(1i64 << 40))), r.from_int(-(1i64 << 40)));
    }

    #[test]
    fn field_group_handles_negative_powers() {
        let f = FiniteField::new(7).unwrap();
        let g = f.multiplicative_group();
        assert_eq!(g.pow(&3, -1), Ok(5));
        assert_eq!(g.pow(&3, 6), Ok(1));
        assert_eq!(g.pow(&0, 2), Err(AlgebraError::DivisionByZero));
        assert_eq!(f.pow_signed(&2, -2), Ok(2)); // 4^{-1} = 2 mod 7
        assert_eq!(f.pow_signed(&0, -2), Err(AlgebraError::DivisionByZero));
    }

    #[test]
    fn from_rational_in_q_and_fp() {
        let q = RationalField;
        let r = Rational::new(3, 4).unwrap();
        assert_eq!(q.from_rational(&r), Ok(r.clone()));

        let f = FiniteField::new(5).unwrap();
        assert_eq!(f.from_rational(&r), Ok(2)); // 3 · 4^{-1} = 3 · 4 = 12 = 2
        let bad = Rational::new(1, 5).unwrap();
        assert_eq!(f.from_rational(&bad), Err(AlgebraError::DivisionByZero));
    }

    #[test]
    fn extended_gcd_cofactors() {
        let zz = Integers;
        let eg = zz.extended_gcd(&z(6), &z(4));
        assert_eq!(eg.gcd, z(2));
        assert_eq!(z(6) * &eg.x + z(4) * &eg.y, z(2));
        assert_eq!(z(6) * &eg.s + z(4) * &eg.t, z(0));
        assert_eq!(zz.gcd(&eg.s, &eg.t), z(1));
    }
}
