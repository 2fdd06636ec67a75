//! Coordinate vector spaces `F^n`.

use btt_algebra::{AlgebraError, Field, Result};
use once_cell::sync::OnceCell;

use crate::matrix::MatrixAlgebra;
use crate::Vector;

/// `F^dim`.
#[derive(Clone, Debug)]
pub struct VectorSpace<F: Field + Clone> {
    field: F,
    dim: usize,
    algebra: OnceCell<MatrixAlgebra<F>>,
}

impl<F: Field + Clone> VectorSpace<F> {
    /// `field^dim`.
    #[must_use]
    pub fn new(field: F, dim: usize) -> Self {
        Self { field, dim, algebra: OnceCell::new() }
    }

    /// Scalar field.
    #[inline]
    #[must_use]
    pub const fn field(&self) -> &F {
        &self.field
    }

    /// Dimension.
    #[inline]
    #[must_use]
    pub const fn dim(&self) -> usize {
        self.dim
    }

    /// `End(F^dim)`, built once on first use.
    ///
    /// # Errors
    /// [`AlgebraError::UnsupportedDimension`] for `dim > 2`.
    pub fn matrix_algebra(&self) -> Result<&MatrixAlgebra<F>> {
        self.algebra.get_or_try_init(|| MatrixAlgebra::new(self.field.clone(), self.dim))
    }

    /// Check that `v` has `dim` coordinates.
    ///
    /// # Errors
    /// [`AlgebraError::DimensionMismatch`] otherwise.
    #[inline]
    pub const fn check(&self, len: usize) -> Result<()> {
        if len == self.dim {
            Ok(())
        } else {
            Err(AlgebraError::DimensionMismatch { expected: self.dim, got: len })
        }
    }

    /// The zero vector.
    #[must_use]
    pub fn zero(&self) -> Vector<F::Element> {
        vec![self.field.zero(); self.dim]
    }

    /// `i`-th standard basis vector (zero if `i ≥ dim`).
    #[must_use]
    pub fn basis(&self, i: usize) -> Vector<F::Element> {
        (0..self.dim)
            .map(|j| if i == j { self.field.one() } else { self.field.zero() })
            .collect()
    }

    /// Vector from integer coordinates.
    ///
    /// # Errors
    /// Wrong number of coordinates.
    pub fn from_ints(&self, coords: &[i64]) -> Result<Vector<F::Element>> {
        self.check(coords.len())?;
        Ok(coords.iter().map(|&c| self.field.from_int(c)).collect())
    }

    /// `u + v`.
    #[must_use]
    pub fn add(&self, u: &[F::Element], v: &[F::Element]) -> Vector<F::Element> {
        u.iter().zip(v).map(|(a, b)| self.field.add(a, b)).collect()
    }

    /// `u - v`.
    #[must_use]
    pub fn subtract(&self, u: &[F::Element], v: &[F::Element]) -> Vector<F::Element> {
        u.iter().zip(v).map(|(a, b)| self.field.subtract(a, b)).collect()
    }

    /// `-v`.
    #[must_use]
    pub fn negate(&self, v: &[F::Element]) -> Vector<F::Element> {
        v.iter().map(|a| self.field.negate(a)).collect()
    }

    /// `c · v`.
    #[must_use]
    pub fn scale(&self, c: &F::Element, v: &[F::Element]) -> Vector<F::Element> {
        v.iter().map(|a| self.field.multiply(c, a)).collect()
    }

    /// `Σ u_i v_i`.
    #[must_use]
    pub fn inner_product(&self, u: &[F::Element], v: &[F::Element]) -> F::Element {
        self.field.dot(u, v)
    }

    /// Every coordinate is zero.
    #[must_use]
    pub fn is_zero(&self, v: &[F::Element]) -> bool {
        v.iter().all(|a| self.field.is_zero(a))
    }

    /// Coordinate-wise equality.
    #[must_use]
    pub fn equals(&self, u: &[F::Element], v: &[F::Element]) -> bool {
        u.len() == v.len() && u.iter().zip(v).all(|(a, b)| self.field.equals(a, b))
    }

    /// `(x_1, ..., x_n)` rendered with the field's formatter.
    #[must_use]
    pub fn format(&self, v: &[F::Element]) -> String {
        let parts: Vec<String> = v.iter().map(|a| self.field.format(a)).collect();
        format!("({})", parts.join(", "))
    }
}
