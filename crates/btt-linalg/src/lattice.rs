//! Lattices in `K^n` over a discrete-valuation field `K`.
//!
//! A lattice is given by generators: the columns of an invertible matrix. All
//! membership tests reduce to "is this coordinate vector integral", after
//! moving into the basis of the generators.

use btt_algebra::{ExtendedInt, Result};
use btt_fields::DVField;

use crate::matrix::MatrixAlgebra;
use crate::vector::VectorSpace;
use crate::{Matrix, Vector};

/// `K^dim` together with lattice predicates relative to `K`'s valuation ring.
#[derive(Clone, Debug)]
pub struct DVVectorSpace<F: DVField + Clone> {
    space: VectorSpace<F>,
}

impl<F: DVField + Clone> DVVectorSpace<F> {
    /// `field^dim`.
    #[must_use]
    pub fn new(field: F, dim: usize) -> Self {
        Self { space: VectorSpace::new(field, dim) }
    }

    /// Underlying vector space.
    #[inline]
    #[must_use]
    pub const fn space(&self) -> &VectorSpace<F> {
        &self.space
    }

    /// Scalar field.
    #[inline]
    #[must_use]
    pub const fn field(&self) -> &F {
        self.space.field()
    }

    /// Matrix algebra of the underlying space.
    ///
    /// # Errors
    /// Dimension above 2.
    #[inline]
    pub fn matrix_algebra(&self) -> Result<&MatrixAlgebra<F>> {
        self.space.matrix_algebra()
    }

    /* ------------------------------- integrality ------------------------------- */

    /// Every coordinate has nonnegative valuation.
    #[must_use]
    pub fn vector_in_valuation_ring(&self, v: &[F::Element]) -> bool {
        v.iter().all(|e| self.field().in_valuation_ring(e))
    }

    /// Every entry has nonnegative valuation.
    #[must_use]
    pub fn matrix_in_valuation_ring(&self, m: &Matrix<F::Element>) -> bool {
        m.iter().all(|v| self.vector_in_valuation_ring(v))
    }

    /// Smallest coordinate valuation.
    ///
    /// # Errors
    /// [`btt_algebra::AlgebraError::EmptyCollection`] for a zero-dimensional vector.
    pub fn min_valuation_vector(&self, v: &[F::Element]) -> Result<ExtendedInt> {
        ExtendedInt::min_all(v.iter().map(|e| self.field().valuation(e)))
    }

    /// Smallest entry valuation; `Infinite` for the zero matrix.
    ///
    /// # Errors
    /// [`btt_algebra::AlgebraError::EmptyCollection`] for a `0 × 0` matrix.
    pub fn min_valuation(&self, m: &Matrix<F::Element>) -> Result<ExtendedInt> {
        ExtendedInt::min_all(m.iter().flatten().map(|e| self.field().valuation(e)))
    }

    /// `v` scaled by `π^(-min v(v_i))`, so that it is integral with some unit
    /// coordinate. The zero vector is returned unchanged.
    ///
    /// # Errors
    /// Empty vector.
    pub fn to_int_vector(&self, v: &[F::Element]) -> Result<Vector<F::Element>> {
        match self.min_valuation_vector(v)? {
            ExtendedInt::Infinite => Ok(v.to_vec()),
            ExtendedInt::Finite(a) => Ok(self.space.scale(&self.field().from_val(ExtendedInt::Finite(-a)), v)),
        }
    }

    /// `m` scaled by `π^(-min v(m_ij))`; the zero matrix is returned unchanged.
    ///
    /// # Errors
    /// Empty matrix or unsupported dimension.
    pub fn to_int_matrix(&self, m: &Matrix<F::Element>) -> Result<Matrix<F::Element>> {
        let alg = self.matrix_algebra()?;
        match self.min_valuation(m)? {
            ExtendedInt::Infinite => Ok(m.clone()),
            ExtendedInt::Finite(a) => Ok(alg.scale(&self.field().from_val(ExtendedInt::Finite(-a)), m)),
        }
    }

    /* ------------------------------- membership -------------------------------- */

    /// `v` lies in the lattice spanned by the columns of `gens`.
    ///
    /// # Errors
    /// `gens` is singular.
    pub fn in_lattice(&self, gens: &Matrix<F::Element>, v: &[F::Element]) -> Result<bool> {
        let alg = self.matrix_algebra()?;
        Ok(self.vector_in_valuation_ring(&alg.apply(&alg.invert(gens)?, v)))
    }

    /// Lattice of `sub` is contained in lattice of `gens`.
    ///
    /// # Errors
    /// `gens` is singular.
    pub fn is_sublattice(&self, gens: &Matrix<F::Element>, sub: &Matrix<F::Element>) -> Result<bool> {
        let alg = self.matrix_algebra()?;
        Ok(self.matrix_in_valuation_ring(&alg.multiply(&alg.invert(gens)?, sub)))
    }

    /// `a` and `b` span the same lattice.
    ///
    /// # Errors
    /// `a` is singular.
    pub fn is_same_lattice(&self, a: &Matrix<F::Element>, b: &Matrix<F::Element>) -> Result<bool> {
        let alg = self.matrix_algebra()?;
        Ok(self.is_trivial_lattice(&alg.multiply(&alg.invert(a)?, b)))
    }

    /// Integral with at least one unit entry, i.e. primitive in `R^{n×n}`.
    #[must_use]
    pub fn in_standard_tree(&self, m: &Matrix<F::Element>) -> bool {
        self.matrix_in_valuation_ring(m)
            && m.iter().flatten().any(|e| self.field().valuation(e) == ExtendedInt::ZERO)
    }

    /// Columns form a basis of the standard lattice `R^n`: integral with unit
    /// determinant.
    #[must_use]
    pub fn is_trivial_lattice(&self, m: &Matrix<F::Element>) -> bool {
        let Ok(alg) = self.matrix_algebra() else {
            return false;
        };
        self.in_standard_tree(m) && self.field().valuation(&alg.determinant(m)) == ExtendedInt::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use btt_algebra::{AlgebraError, Rational};
    use btt_fields::Adic;

    #[track_caller]
    fn q(num: i64, den: i64) -> Rational {
        Rational::new(num, den).unwrap()
    }

    #[track_caller]
    fn space() -> DVVectorSpace<Adic> {
        DVVectorSpace::new(Adic::new(3).unwrap(), 2)
    }

    #[test]
    fn valuation_ring_membership() {
        let v = space();
        assert!(v.vector_in_valuation_ring(&[q(1, 2), q(3, 1)]));
        assert!(!v.vector_in_valuation_ring(&[q(1, 3), q(1, 1)]));
        assert!(v.matrix_in_valuation_ring(&vec![vec![q(5, 1), q(0, 1)], vec![q(9, 4), q(1, 1)]]));
        assert_eq!(v.min_valuation(&vec![vec![q(9, 1), q(1, 3)], vec![q(0, 1), q(6, 1)]]), Ok(ExtendedInt::Finite(-1)));
        assert_eq!(v.min_valuation(&vec![vec![q(0, 1); 2]; 2]), Ok(ExtendedInt::Infinite));
    }

    #[test]
    fn scaling_to_integral() {
        let v = space();
        assert_eq!(v.to_int_vector(&[q(1, 9), q(2, 3)]), Ok(vec![q(1, 1), q(6, 1)]));
        assert_eq!(v.to_int_vector(&[q(9, 1), q(18, 1)]), Ok(vec![q(1, 1), q(2, 1)]));
        let zero = vec![q(0, 1), q(0, 1)];
        assert_eq!(v.to_int_vector(&zero), Ok(zero));

        let m = vec![vec![q(3, 1), q(0, 1)], vec![q(0, 1), q(9, 1)]];
        let int = v.to_int_matrix(&m).unwrap();
        assert_eq!(int, vec![vec![q(1, 1), q(0, 1)], vec![q(0, 1), q(3, 1)]]);
        assert!(v.in_standard_tree(&int));
        assert!(!v.in_standard_tree(&m));
    }

    #[test]
    fn lattice_membership() {
        let v = space();
        // columns (1, 0) and (0, 3)
        let gens = vec![vec![q(1, 1), q(0, 1)], vec![q(0, 1), q(3, 1)]];
        assert_eq!(v.in_lattice(&gens, &[q(5, 1), q(6, 1)]), Ok(true));
        assert_eq!(v.in_lattice(&gens, &[q(0, 1), q(1, 1)]), Ok(false));
        assert_eq!(v.in_lattice(&gens, &[q(1, 2), q(3, 4)]), Ok(true));

        let std = vec![vec![q(1, 1), q(0, 1)], vec![q(0, 1), q(1, 1)]];
        assert_eq!(v.is_sublattice(&std, &gens), Ok(true));
        assert_eq!(v.is_sublattice(&gens, &std), Ok(false));

        let singular = vec![vec![q(1, 1), q(2, 1)], vec![q(2, 1), q(4, 1)]];
        assert_eq!(v.in_lattice(&singular, &[q(1, 1), q(0, 1)]), Err(AlgebraError::SingularMatrix));
    }

    #[test]
    fn same_lattice_and_trivial() {
        let v = space();
        let std = vec![vec![q(1, 1), q(0, 1)], vec![q(0, 1), q(1, 1)]];
        // unimodular change of basis over Z_(3)
        let other = vec![vec![q(2, 1), q(1, 1)], vec![q(1, 1), q(1, 1)]];
        assert!(v.is_trivial_lattice(&std));
        assert!(v.is_trivial_lattice(&other));
        assert_eq!(v.is_same_lattice(&std, &other), Ok(true));

        let gens = vec![vec![q(1, 1), q(0, 1)], vec![q(0, 1), q(3, 1)]];
        assert!(!v.is_trivial_lattice(&gens));
        assert_eq!(v.is_same_lattice(&std, &gens), Ok(false));
        // homothetic but not equal
        let scaled = vec![vec![q(3, 1), q(0, 1)], vec![q(0, 1), q(3, 1)]];
        assert_eq!(v.is_same_lattice(&std, &scaled), Ok(false));
    }
}
